//! Flappy Sim - a side-scrolling gap-runner simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, obstacles, collisions, game state)
//! - `tuning`: Data-driven game balance
//! - `persistence`: High score storage backends
//! - `highscores`: Best-effort high score load/save
//! - `session`: Game state wired to persistence for a host loop

pub mod error;
pub mod highscores;
pub mod persistence;
pub mod session;
pub mod sim;
pub mod tuning;

pub use error::{ConfigError, PersistenceError};
pub use persistence::{FileStore, HighScoreStore, MemoryStore};
pub use session::Session;
pub use tuning::Tuning;

/// Game configuration defaults
pub mod consts {
    /// Host frame pacing between ticks
    pub const TICK_MILLIS: u64 = 6;

    /// Playfield dimensions
    pub const PLAYFIELD_WIDTH: i32 = 640;
    pub const PLAYFIELD_HEIGHT: i32 = 480;

    /// Body start position and size
    pub const BODY_START_X: i32 = 100;
    pub const BODY_START_Y: i32 = 200;
    pub const BODY_SIZE: i32 = 50;

    /// Downward displacement per tick
    pub const GRAVITY: i32 = 3;
    /// Upward displacement per flap
    pub const FLAP_IMPULSE: i32 = 70;

    /// Obstacle defaults
    pub const SCROLL_SPEED: i32 = 5;
    pub const GAP_HEIGHT: i32 = 150;
    pub const SEGMENT_WIDTH: i32 = 70;
    pub const MIN_SEGMENT_HEIGHT: i32 = 50;
    /// Spawn the next pair once the newest one is left of this x
    pub const SPAWN_X: i32 = 300;

    /// Overlay buttons
    pub const BUTTON_WIDTH: i32 = 200;
    pub const BUTTON_HEIGHT: i32 = 50;
    pub const BUTTON_SPACING: i32 = 60;

    /// Default high score file
    pub const HIGH_SCORE_FILE: &str = "highscore.txt";
}
