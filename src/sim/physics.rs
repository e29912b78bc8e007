//! Discrete per-tick integration
//!
//! Gravity is a fixed displacement per tick, not an acceleration. A flap is
//! an instantaneous upward displacement of the same kind.

use super::state::{Body, ObstaclePair};

/// Move the body down by one tick of gravity
#[inline]
pub fn fall(body: &mut Body, gravity: i32) {
    body.rect.y += gravity;
}

/// Move the body up by one flap
#[inline]
pub fn flap(body: &mut Body, impulse: i32) {
    body.rect.y -= impulse;
}

/// Scroll every obstacle pair left
pub fn scroll(pipes: &mut [ObstaclePair], speed: i32) {
    for pair in pipes {
        pair.upper.x -= speed;
        pair.lower.x -= speed;
    }
}
