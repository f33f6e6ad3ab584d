//! Collision detection and response for axis-aligned geometry
//!
//! Walls reflect the ball's heading in place; bricks pick a reflection axis
//! from the ball's last brick-free position.

use std::f32::consts::PI;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::ball::Ball;
use super::entity::Sprite;

/// Inclusive AABB overlap test on (min, max) corner pairs
#[inline]
pub fn overlaps(a: (Vec2, Vec2), b: (Vec2, Vec2)) -> bool {
    a.0.x <= b.1.x && a.1.x >= b.0.x && a.0.y <= b.1.y && a.1.y >= b.0.y
}

/// Which wall (if any) deflected the ball this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WallBounce {
    pub side: bool,
    pub top: bool,
}

impl WallBounce {
    #[inline]
    pub fn any(&self) -> bool {
        self.side || self.top
    }
}

/// Reflect off the left/right/top walls, pushing the ball back inside
pub fn bounce_walls(ball: &mut Ball, board: Vec2) -> WallBounce {
    let mut bounce = WallBounce::default();
    let r = ball.radius;
    let p = ball.location();

    if p.x + r >= board.x {
        ball.set_location(Vec2::new(board.x - r, p.y));
        ball.set_rotation(PI - ball.rotation());
        bounce.side = true;
    } else if p.x - r <= 0.0 {
        ball.set_location(Vec2::new(r, p.y));
        ball.set_rotation(PI - ball.rotation());
        bounce.side = true;
    }

    let p = ball.location();
    if p.y - r <= 0.0 {
        ball.set_location(Vec2::new(p.x, r));
        ball.set_rotation(-ball.rotation());
        bounce.top = true;
    }

    bounce
}

/// Ball has reached the bottom edge of the board
#[inline]
pub fn fell_out(ball: &Ball, board_height: f32) -> bool {
    ball.location().y + ball.radius >= board_height
}

/// New heading after striking a brick. If the last safe position sat above
/// or below the brick the ball hit a horizontal face and reflects vertically,
/// otherwise it hit a side face and reflects horizontally.
pub fn brick_reflection(rotation: f32, last_safe: Vec2, brick: (Vec2, Vec2)) -> f32 {
    let (min, max) = brick;
    if last_safe.y < min.y || last_safe.y > max.y {
        -rotation
    } else {
        PI - rotation
    }
}
