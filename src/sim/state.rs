//! Game state and core simulation types
//!
//! [`GameState`] is the single owner of everything the simulation mutates.
//! Renderers only ever see a [`Snapshot`].

use serde::{Deserialize, Serialize};

use super::collision::Contact;
use super::rect::Rect;
use super::score::ScoreTracker;
use super::spawn::{GapSource, ObstacleLayout, SeededGaps};
use crate::consts::{BUTTON_HEIGHT, BUTTON_SPACING, BUTTON_WIDTH};
use crate::error::ConfigError;
use crate::tuning::Tuning;

/// Current mode of the state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameMode {
    /// Waiting for the player (initial mode)
    Paused,
    /// Active gameplay
    Running,
    /// Run ended
    GameOver,
}

/// The player-controlled body. Only its y coordinate ever changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Body {
    pub rect: Rect,
}

impl Body {
    pub fn new(rect: Rect) -> Self {
        Self { rect }
    }
}

/// Upper and lower obstacle segments around one gap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObstaclePair {
    pub upper: Rect,
    pub lower: Rect,
    /// Set once the body has horizontally cleared this pair
    pub passed: bool,
}

impl ObstaclePair {
    /// Entirely left of the playfield
    #[inline]
    pub fn is_offscreen(&self) -> bool {
        self.upper.right() < 0
    }
}

/// Overlay button hit-regions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Buttons {
    /// "Play again" on game over, "resume" while paused
    pub primary: Rect,
    pub quit: Rect,
}

impl Buttons {
    /// Two stacked buttons centered horizontally, starting at mid-height
    pub fn for_playfield(width: i32, height: i32) -> Self {
        let x = width / 2 - BUTTON_WIDTH / 2;
        let y = height / 2;
        Self {
            primary: Rect::new(x, y, BUTTON_WIDTH, BUTTON_HEIGHT),
            quit: Rect::new(x, y + BUTTON_SPACING, BUTTON_WIDTH, BUTTON_HEIGHT),
        }
    }
}

/// Something observable that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Paused -> Running via flap
    Started,
    Paused,
    /// Paused -> Running via pause toggle or resume button
    Resumed,
    Flapped,
    PairSpawned,
    PairPassed { score: u32 },
    GameOver { score: u32, contact: Contact },
    /// High score was raised and should be persisted
    NewHighScore(u32),
    /// GameOver -> Running with a fresh run
    Restarted,
    QuitRequested,
}

/// Read-only view for renderers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub mode: GameMode,
    pub body: Rect,
    /// Oldest (leftmost) first
    pub obstacles: Vec<ObstaclePair>,
    pub score: u32,
    pub high_score: u32,
    /// Present only while paused or game over
    pub buttons: Option<Buttons>,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState<G: GapSource = SeededGaps> {
    pub tuning: Tuning,
    pub mode: GameMode,
    pub body: Body,
    /// Obstacle pairs in spawn order
    pub pipes: Vec<ObstaclePair>,
    pub scores: ScoreTracker,
    pub buttons: Buttons,
    /// Ticks simulated while running
    pub time_ticks: u64,
    layout: ObstacleLayout,
    gaps: G,
}

impl GameState<SeededGaps> {
    /// Create a state whose gaps come from a seeded PCG stream
    pub fn seeded(tuning: Tuning, high_score: u32, seed: u64) -> Result<Self, ConfigError> {
        Self::new(tuning, high_score, SeededGaps::new(seed))
    }
}

impl<G: GapSource> GameState<G> {
    /// Validate tuning and build a paused state with one pair queued
    pub fn new(tuning: Tuning, high_score: u32, gaps: G) -> Result<Self, ConfigError> {
        tuning.validate()?;
        let layout = tuning.obstacle_layout()?;

        let mut state = Self {
            mode: GameMode::Paused,
            body: Body::new(tuning.body_start),
            pipes: Vec::new(),
            scores: ScoreTracker::new(high_score),
            buttons: Buttons::for_playfield(tuning.playfield_width, tuning.playfield_height),
            time_ticks: 0,
            layout,
            gaps,
            tuning,
        };
        state.spawn_pair();

        Ok(state)
    }

    /// Append a freshly generated pair at the right edge
    pub fn spawn_pair(&mut self) {
        let pair = self.layout.generate(&mut self.gaps);
        log::debug!(
            "Spawned pair: upper h={} lower h={}",
            pair.upper.h,
            pair.lower.h
        );
        self.pipes.push(pair);
    }

    /// Start a new run: body home, one fresh pair, score zero, running
    pub fn reset(&mut self) {
        self.body = Body::new(self.tuning.body_start);
        self.pipes.clear();
        self.spawn_pair();
        self.scores.start_run();
        self.time_ticks = 0;
        self.mode = GameMode::Running;
    }

    pub fn score(&self) -> u32 {
        self.scores.score
    }

    pub fn high_score(&self) -> u32 {
        self.scores.high_score
    }

    /// Copy out what a renderer needs
    pub fn snapshot(&self) -> Snapshot {
        let buttons = match self.mode {
            GameMode::Paused | GameMode::GameOver => Some(self.buttons),
            GameMode::Running => None,
        };
        Snapshot {
            mode: self.mode,
            body: self.body.rect,
            obstacles: self.pipes.clone(),
            score: self.scores.score,
            high_score: self.scores.high_score,
            buttons,
        }
    }
}
