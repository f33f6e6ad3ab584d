//! Game balance and board configuration
//!
//! Defaults mirror `consts`; a JSON file can override any subset of fields.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Data-driven game balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Board ===
    pub board_width: f32,
    pub board_height: f32,

    // === Speeds (pixels per second) ===
    pub paddle_speed: f32,
    pub ball_speed: f32,
    pub bonus_speed: f32,

    // === Pools ===
    /// Balls available for multi-ball
    pub ball_pool: usize,
    /// Lives at session start
    pub lives: usize,

    // === Scoring ===
    pub brick_points: u64,
    pub bonus_points: u64,
    pub bad_points_penalty: u64,

    // === Slow motion ===
    pub slow_motion_secs: f64,
    pub slow_motion_factor: f32,

    /// Seed for the serve-angle RNG
    pub seed: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            board_width: BOARD_WIDTH,
            board_height: BOARD_HEIGHT,

            paddle_speed: PADDLE_SPEED,
            ball_speed: BALL_SPEED,
            bonus_speed: BONUS_SPEED,

            ball_pool: BALL_POOL,
            lives: LIVES,

            brick_points: BRICK_POINTS,
            bonus_points: BONUS_POINTS,
            bad_points_penalty: BAD_POINTS_PENALTY,

            slow_motion_secs: SLOW_MOTION_SECS,
            slow_motion_factor: SLOW_MOTION_FACTOR,

            seed: 0x5EED_B41C,
        }
    }
}

/// Errors reading a tuning file
#[derive(Debug, thiserror::Error)]
pub enum TuningError {
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid tuning json: {0}")]
    Json(#[from] serde_json::Error),
}

impl Tuning {
    /// Parse a (possibly partial) JSON override
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load overrides from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let tuning = Self::from_json(&text)?;
        log::info!("Loaded tuning from {}", path.as_ref().display());
        Ok(tuning)
    }

    /// Board center, where balls are served from
    pub fn board_center(&self) -> glam::Vec2 {
        glam::Vec2::new(self.board_width / 2.0, self.board_height / 2.0)
    }

    /// Pool size and life count never drop below one
    pub fn sanitized(mut self) -> Self {
        self.ball_pool = self.ball_pool.max(1);
        self.lives = self.lives.max(1);
        self
    }
}
