//! Procedural obstacle generation
//!
//! Gap placement draws from an injected [`GapSource`] so runs are
//! reproducible from a seed and tests can pin exact heights.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::rect::Rect;
use super::state::ObstaclePair;
use crate::error::ConfigError;

/// Source of uniformly distributed integers for gap placement
pub trait GapSource {
    /// Integer in `min..=max`
    fn pick(&mut self, min: i32, max: i32) -> i32;
}

/// Seeded PCG-backed [`GapSource`]
#[derive(Debug, Clone)]
pub struct SeededGaps {
    rng: Pcg32,
}

impl SeededGaps {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }
}

impl GapSource for SeededGaps {
    fn pick(&mut self, min: i32, max: i32) -> i32 {
        if max <= min {
            return min;
        }
        self.rng.random_range(min..=max)
    }
}

/// Validated obstacle geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObstacleLayout {
    playfield_width: i32,
    playfield_height: i32,
    gap_height: i32,
    segment_width: i32,
    min_segment_height: i32,
}

impl ObstacleLayout {
    pub fn new(
        playfield_width: i32,
        playfield_height: i32,
        gap_height: i32,
        segment_width: i32,
        min_segment_height: i32,
    ) -> Result<Self, ConfigError> {
        for (field, value) in [
            ("playfield_width", playfield_width),
            ("playfield_height", playfield_height),
            ("gap_height", gap_height),
            ("segment_width", segment_width),
        ] {
            if value <= 0 {
                return Err(ConfigError::NonPositive { field, value });
            }
        }
        if min_segment_height < 0 {
            return Err(ConfigError::NonPositive {
                field: "min_segment_height",
                value: min_segment_height,
            });
        }
        let required = min_segment_height
            .checked_mul(2)
            .and_then(|segments| segments.checked_add(gap_height));
        if required.is_none_or(|required| required > playfield_height) {
            return Err(ConfigError::ObstacleGeometry {
                playfield_height,
                gap_height,
                min_segment_height,
            });
        }

        Ok(Self {
            playfield_width,
            playfield_height,
            gap_height,
            segment_width,
            min_segment_height,
        })
    }

    /// Tallest allowed upper segment
    #[inline]
    pub fn max_upper_height(&self) -> i32 {
        self.playfield_height - self.gap_height - self.min_segment_height
    }

    /// Generate a new pair at the right edge of the playfield
    pub fn generate<G: GapSource + ?Sized>(&self, gaps: &mut G) -> ObstaclePair {
        let upper_h = gaps
            .pick(self.min_segment_height, self.max_upper_height())
            .clamp(self.min_segment_height, self.max_upper_height());
        let lower_h = self.playfield_height - upper_h - self.gap_height;

        ObstaclePair {
            upper: Rect::new(self.playfield_width, 0, self.segment_width, upper_h),
            lower: Rect::new(
                self.playfield_width,
                self.playfield_height - lower_h,
                self.segment_width,
                lower_h,
            ),
            passed: false,
        }
    }
}

/// One-shot generation; fails only on inconsistent geometry
pub fn generate<G: GapSource + ?Sized>(
    playfield_width: i32,
    playfield_height: i32,
    gap_height: i32,
    segment_width: i32,
    min_segment_height: i32,
    gaps: &mut G,
) -> Result<ObstaclePair, ConfigError> {
    let layout = ObstacleLayout::new(
        playfield_width,
        playfield_height,
        gap_height,
        segment_width,
        min_segment_height,
    )?;
    Ok(layout.generate(gaps))
}

/// Spawn when the queue is empty or the newest pair has scrolled past `spawn_x`
pub fn needs_spawn(pipes: &[ObstaclePair], spawn_x: i32) -> bool {
    pipes.last().is_none_or(|newest| newest.upper.x < spawn_x)
}
