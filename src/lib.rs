//! Bricks - a single-screen brick-breaking arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, physics, collisions, game state)
//! - `input`: Polled keyboard state owned by the session
//! - `render`: Drawing surface abstraction used by the draw pass
//! - `ui`: Lives, score and message overlay
//! - `tuning`: Data-driven game balance

pub mod error;
pub mod input;
pub mod render;
pub mod sim;
pub mod tuning;
pub mod ui;
pub mod vector;

pub use error::{LevelError, SimError};
pub use input::{InputSource, Key, KeyboardState};
pub use render::{Color, DrawCommand, RecordingSurface, Surface};
pub use sim::{GameEvent, GamePhase, GameSession};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    use glam::Vec2;

    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Board dimensions
    pub const BOARD_WIDTH: f32 = 384.0;
    pub const BOARD_HEIGHT: f32 = 512.0;

    /// Paddle defaults
    pub const PADDLE_SPEED: f32 = 350.0;
    pub const PADDLE_NORMAL_SIZE: Vec2 = Vec2::new(60.0, 20.0);
    pub const PADDLE_SUPER_SIZE: Vec2 = Vec2::new(90.0, 20.0);
    /// Paddle top edge sits this far above the board bottom
    pub const PADDLE_BOTTOM_OFFSET: f32 = 80.0;

    /// Ball defaults
    pub const BALL_SPEED: f32 = 200.0;
    pub const BALL_RADIUS: f32 = 4.5;
    pub const BALL_POOL: usize = 3;

    /// Bonus defaults
    pub const BONUS_SPEED: f32 = 150.0;
    pub const BONUS_SIZE: Vec2 = Vec2::new(40.0, 16.0);
    /// Bonus offset from its brick's top-left corner
    pub const BONUS_INSET: f32 = 4.0;

    /// Brick grid
    pub const BRICK_SIZE: Vec2 = Vec2::new(48.0, 24.0);
    pub const LEVEL_ROWS: usize = 8;
    pub const LEVEL_COLS: usize = 8;
    pub const LEVEL_TOP: f32 = 48.0;

    /// Scoring
    pub const BRICK_POINTS: u64 = 100;
    pub const BONUS_POINTS: u64 = 50;
    pub const BAD_POINTS_PENALTY: u64 = 150;

    /// Player lives
    pub const LIVES: usize = 3;

    /// Slow motion lasts this many seconds of game time
    pub const SLOW_MOTION_SECS: f64 = 10.0;
    /// Physics time factor while slow motion is active
    pub const SLOW_MOTION_FACTOR: f32 = 0.5;
}

/// Wrap an angle into [0, 2π)
#[inline]
pub fn wrap_angle(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(std::f32::consts::TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if wrapped >= std::f32::consts::TAU {
        0.0
    } else {
        wrapped
    }
}
