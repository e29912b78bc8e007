//! Error types
//!
//! Only configuration and persistence can fail. Collision, scoring and mode
//! transitions are total over a validated [`Tuning`](crate::Tuning).

use std::path::PathBuf;

use thiserror::Error;

/// Tunables are mutually inconsistent or could not be read. Fatal at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(
        "obstacle geometry does not fit: 2 * min segment ({min_segment_height}) + gap ({gap_height}) > playfield height ({playfield_height})"
    )]
    ObstacleGeometry {
        playfield_height: i32,
        gap_height: i32,
        min_segment_height: i32,
    },

    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: i32 },

    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: i32 },

    #[error("body start rect does not fit strictly inside the {width}x{height} playfield")]
    BodyOutsidePlayfield { width: i32, height: i32 },

    #[error("spawn_x ({spawn_x}) must lie within 0..={width}")]
    SpawnOutsidePlayfield { spawn_x: i32, width: i32 },

    #[error("failed to read tuning file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse tuning file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// High score could not be loaded or stored. Always recovered locally.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("no high score recorded yet")]
    Missing,

    #[error("high score I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("high score record is corrupt: {0:?}")]
    Corrupt(String),
}
