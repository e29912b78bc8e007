//! Score and high score bookkeeping for a single process

use serde::{Deserialize, Serialize};

use super::state::ObstaclePair;

/// Current run score plus the best score seen so far
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreTracker {
    pub score: u32,
    pub high_score: u32,
}

impl ScoreTracker {
    pub fn new(high_score: u32) -> Self {
        Self {
            score: 0,
            high_score,
        }
    }

    /// Reset the run score
    pub fn start_run(&mut self) {
        self.score = 0;
    }

    /// Award one point per pair whose right edge is now left of `body_left`.
    ///
    /// Each pair scores once; the `passed` flag latches.
    pub fn award_passes(&mut self, body_left: i32, pipes: &mut [ObstaclePair]) -> u32 {
        let mut awarded = 0;
        for pair in pipes.iter_mut().filter(|p| !p.passed) {
            if pair.upper.right() < body_left {
                pair.passed = true;
                awarded += 1;
            }
        }
        self.score += awarded;
        awarded
    }

    /// Close the run. Returns the new high score if this run beat it.
    pub fn finish_run(&mut self) -> Option<u32> {
        if self.score > self.high_score {
            self.high_score = self.score;
            Some(self.high_score)
        } else {
            None
        }
    }
}
