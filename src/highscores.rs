//! Best-effort high score persistence
//!
//! Failures never reach the player: a bad read means a high score of 0, a
//! bad write is logged and dropped.

use crate::persistence::HighScoreStore;
use crate::PersistenceError;

/// Load the stored high score, defaulting to 0
pub fn load_high_score<S: HighScoreStore + ?Sized>(store: &S) -> u32 {
    match store.load() {
        Ok(score) => {
            log::info!("Loaded high score {score}");
            score
        }
        Err(PersistenceError::Missing) => {
            log::info!("No high score found, starting fresh");
            0
        }
        Err(e) => {
            log::warn!("Failed to load high score, using 0: {e}");
            0
        }
    }
}

/// Store a new high score. Returns whether the write succeeded.
pub fn save_high_score<S: HighScoreStore + ?Sized>(store: &mut S, score: u32) -> bool {
    match store.save(score) {
        Ok(()) => {
            log::info!("High score saved ({score})");
            true
        }
        Err(e) => {
            log::warn!("Failed to save high score {score}: {e}");
            false
        }
    }
}
