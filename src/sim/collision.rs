//! Terminal contact detection
//!
//! A run ends when the body touches an obstacle segment or reaches the top
//! or bottom of the playfield. Touching counts.

use serde::{Deserialize, Serialize};

use super::rect::Rect;
use super::state::ObstaclePair;

/// What the body hit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Contact {
    /// Top edge at or above y = 0
    Ceiling,
    /// Bottom edge at or below the playfield height
    Floor,
    /// Overlaps a segment of the pair at this queue index
    Obstacle { index: usize },
}

/// Find the first terminal contact, bounds first
pub fn detect(body: &Rect, pipes: &[ObstaclePair], playfield_height: i32) -> Option<Contact> {
    if body.y <= 0 {
        return Some(Contact::Ceiling);
    }
    if body.bottom() >= playfield_height {
        return Some(Contact::Floor);
    }

    pipes
        .iter()
        .position(|pair| body.intersects(&pair.upper) || body.intersects(&pair.lower))
        .map(|index| Contact::Obstacle { index })
}

/// True if the run must end
#[inline]
pub fn check_collision(body: &Rect, pipes: &[ObstaclePair], playfield_height: i32) -> bool {
    detect(body, pipes, playfield_height).is_some()
}
