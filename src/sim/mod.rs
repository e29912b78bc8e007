//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed per-tick displacements only
//! - Gap placement from an injected source only
//! - Obstacle pairs kept in spawn order
//! - No rendering, input device or file system dependencies

pub mod collision;
pub mod physics;
pub mod rect;
pub mod score;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Contact, check_collision, detect};
pub use rect::{Rect, intersects};
pub use score::ScoreTracker;
pub use spawn::{GapSource, ObstacleLayout, SeededGaps, generate, needs_spawn};
pub use state::{Body, Buttons, GameEvent, GameMode, GameState, ObstaclePair, Snapshot};
pub use tick::{InputEvent, TickInput, handle_input, tick};
