//! Data-driven game tuning
//!
//! Every physics and layout constant lives here so a JSON file can override
//! any subset of them. Missing fields fall back to [`crate::consts`].

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;
use crate::sim::Rect;
use crate::sim::spawn::ObstacleLayout;

/// Game tunables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Playfield ===
    pub playfield_width: i32,
    pub playfield_height: i32,

    // === Body ===
    /// Body rect at the start of every run
    pub body_start: Rect,
    /// Downward displacement per tick
    pub gravity: i32,
    /// Upward displacement per flap
    pub flap_impulse: i32,

    // === Obstacles ===
    /// Leftward displacement of every obstacle per tick
    pub scroll_speed: i32,
    pub gap_height: i32,
    pub segment_width: i32,
    pub min_segment_height: i32,
    /// A new pair spawns once the newest pair's x drops below this
    pub spawn_x: i32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            playfield_width: PLAYFIELD_WIDTH,
            playfield_height: PLAYFIELD_HEIGHT,

            body_start: Rect::new(BODY_START_X, BODY_START_Y, BODY_SIZE, BODY_SIZE),
            gravity: GRAVITY,
            flap_impulse: FLAP_IMPULSE,

            scroll_speed: SCROLL_SPEED,
            gap_height: GAP_HEIGHT,
            segment_width: SEGMENT_WIDTH,
            min_segment_height: MIN_SEGMENT_HEIGHT,
            spawn_x: SPAWN_X,
        }
    }
}

impl Tuning {
    /// Load tuning from a JSON file and validate it
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Parse tuning from a JSON string and validate it
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Check every constraint the simulation relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("playfield_width", self.playfield_width),
            ("playfield_height", self.playfield_height),
            ("body_start.w", self.body_start.w),
            ("body_start.h", self.body_start.h),
            ("scroll_speed", self.scroll_speed),
        ];
        for (field, value) in positive {
            if value <= 0 {
                return Err(ConfigError::NonPositive { field, value });
            }
        }

        for (field, value) in [
            ("gravity", self.gravity),
            ("flap_impulse", self.flap_impulse),
        ] {
            if value < 0 {
                return Err(ConfigError::Negative { field, value });
            }
        }

        // Widened: JSON values may sit near i32::MAX. Touching the ceiling
        // or floor already counts as a collision.
        let body = self.body_start;
        let (x, y) = (i64::from(body.x), i64::from(body.y));
        if x < 0
            || y <= 0
            || x + i64::from(body.w) > i64::from(self.playfield_width)
            || y + i64::from(body.h) >= i64::from(self.playfield_height)
        {
            return Err(ConfigError::BodyOutsidePlayfield {
                width: self.playfield_width,
                height: self.playfield_height,
            });
        }

        if !(0..=self.playfield_width).contains(&self.spawn_x) {
            return Err(ConfigError::SpawnOutsidePlayfield {
                spawn_x: self.spawn_x,
                width: self.playfield_width,
            });
        }

        self.obstacle_layout().map(|_| ())
    }

    /// Obstacle geometry derived from these tunables
    pub fn obstacle_layout(&self) -> Result<ObstacleLayout, ConfigError> {
        ObstacleLayout::new(
            self.playfield_width,
            self.playfield_height,
            self.gap_height,
            self.segment_width,
            self.min_segment_height,
        )
    }
}
