//! Game state wired to its collaborators
//!
//! A host loop owns one [`Session`], feeds it a [`TickInput`] per frame, and
//! draws [`Session::snapshot`]. The session persists raised high scores and
//! remembers quit requests.

use crate::error::ConfigError;
use crate::highscores::{load_high_score, save_high_score};
use crate::persistence::HighScoreStore;
use crate::sim::{GameEvent, GameState, GapSource, SeededGaps, Snapshot, TickInput, tick};
use crate::tuning::Tuning;

pub struct Session<S: HighScoreStore, G: GapSource = SeededGaps> {
    state: GameState<G>,
    store: S,
    quit: bool,
}

impl<S: HighScoreStore> Session<S, SeededGaps> {
    pub fn seeded(tuning: Tuning, store: S, seed: u64) -> Result<Self, ConfigError> {
        Self::new(tuning, store, SeededGaps::new(seed))
    }
}

impl<S: HighScoreStore, G: GapSource> Session<S, G> {
    /// Load the high score and build a paused game
    pub fn new(tuning: Tuning, store: S, gaps: G) -> Result<Self, ConfigError> {
        let high_score = load_high_score(&store);
        let state = GameState::new(tuning, high_score, gaps)?;
        Ok(Self {
            state,
            store,
            quit: false,
        })
    }

    /// Run one tick and service its side effects
    pub fn tick(&mut self, input: &TickInput) -> Vec<GameEvent> {
        let events = tick(&mut self.state, input);
        for event in &events {
            match *event {
                GameEvent::NewHighScore(score) => {
                    save_high_score(&mut self.store, score);
                }
                GameEvent::QuitRequested => self.quit = true,
                _ => {}
            }
        }
        events
    }

    pub fn snapshot(&self) -> Snapshot {
        self.state.snapshot()
    }

    /// The player asked to leave; the host should stop ticking
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn state(&self) -> &GameState<G> {
        &self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
