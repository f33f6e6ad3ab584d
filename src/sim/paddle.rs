//! The player's paddle
//!
//! A rectangular body flanked by two triangular wedges. The wedges hang off
//! the body's left and right edges, each `height` wide, and deflect the ball
//! at fixed steep angles. The body deflects at an angle that depends on where
//! along its width the ball lands.

use std::f32::consts::PI;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::ball::Ball;
use super::entity::{Body, Sprite};
use crate::consts::{PADDLE_BOTTOM_OFFSET, PADDLE_NORMAL_SIZE, PADDLE_SUPER_SIZE};
use crate::error::SimError;
use crate::render::{Surface, colors};
use crate::vector::VecExt;

/// Outgoing heading after a left-wedge hit
pub const LEFT_WEDGE_ANGLE: f32 = PI * 9.0 / 5.0;
/// Outgoing heading after a right-wedge hit
pub const RIGHT_WEDGE_ANGLE: f32 = PI * 6.0 / 5.0;

/// Vertical slack on the wedge slopes: sin(45 radians) times the ball radius.
/// The argument is radians, not degrees.
#[inline]
fn wedge_slack(radius: f32) -> f32 {
    45.0_f32.sin() * radius
}

/// Width animation state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PaddleResize {
    #[default]
    None,
    /// Shrink to normal width, then switch to `ReGrow`
    Grow,
    /// Shrink to normal width, then stop
    Shrink,
    /// Grow from normal to super width, then stop
    ReGrow,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    pub body: Body,
    pub size: Vec2,
    pub resize: PaddleResize,
    /// Top-inner, bottom-inner, bottom-outer corners
    pub left_wedge: [Vec2; 3],
    pub right_wedge: [Vec2; 3],
    board_width: f32,
    home: Vec2,
}

impl Paddle {
    pub fn new(board_width: f32, board_height: f32, speed: f32) -> Self {
        let home = Vec2::new(
            (board_width - PADDLE_NORMAL_SIZE.x) / 2.0,
            board_height - PADDLE_BOTTOM_OFFSET,
        );
        let mut paddle = Self {
            body: Body::new(home, speed),
            size: PADDLE_NORMAL_SIZE,
            resize: PaddleResize::None,
            left_wedge: [Vec2::ZERO; 3],
            right_wedge: [Vec2::ZERO; 3],
            board_width,
            home,
        };
        paddle.build_wedges();
        paddle
    }

    /// Back to the starting position, normal width, no motion
    pub fn reset(&mut self) {
        self.body.location = self.home;
        self.body.velocity = Vec2::ZERO;
        self.size = PADDLE_NORMAL_SIZE;
        self.resize = PaddleResize::None;
        self.build_wedges();
    }

    /// Start the shrink-then-grow pulse that ends at super width
    pub fn super_size(&mut self) {
        self.resize = PaddleResize::Grow;
    }

    /// Shrink back to normal width
    pub fn shrink(&mut self) {
        self.resize = PaddleResize::Shrink;
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.size.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.size.y
    }

    /// Top-left corner and size of the rectangular body
    pub fn bounds(&self) -> (Vec2, Vec2) {
        (self.body.location, self.body.location + self.size)
    }

    fn animate_resize(&mut self, dt: f32) {
        let step = (self.body.speed / 2.0) * dt;
        match self.resize {
            PaddleResize::None => {}
            PaddleResize::ReGrow => {
                if self.size.x == PADDLE_SUPER_SIZE.x {
                    self.resize = PaddleResize::None;
                } else {
                    self.size.x += step;
                    self.body.location.x -= step / 2.0;
                    if self.size.x >= PADDLE_SUPER_SIZE.x {
                        self.size.x = PADDLE_SUPER_SIZE.x;
                    }
                }
            }
            PaddleResize::Grow | PaddleResize::Shrink => {
                if self.size.x == PADDLE_NORMAL_SIZE.x {
                    self.resize = if self.resize == PaddleResize::Shrink {
                        PaddleResize::None
                    } else {
                        PaddleResize::ReGrow
                    };
                } else {
                    self.size.x -= step;
                    self.body.location.x += step / 2.0;
                    if self.size.x <= PADDLE_NORMAL_SIZE.x {
                        self.size.x = PADDLE_NORMAL_SIZE.x;
                    }
                }
            }
        }
    }

    /// Keep body and both wedges on the board
    fn clamp_location(&mut self) {
        let (w, h) = (self.size.x, self.size.y);
        if self.body.location.x + w + h >= self.board_width {
            self.body.location.x = self.board_width - w - h;
        } else if self.body.location.x - h <= 0.0 {
            self.body.location.x = h;
        }
    }

    fn build_wedges(&mut self) {
        let Vec2 { x, y } = self.body.location;
        let (w, h) = (self.size.x, self.size.y);

        self.left_wedge = [
            Vec2::new(x, y),
            Vec2::new(x, y + h),
            Vec2::new(x - h, y + h),
        ];
        self.right_wedge = [
            Vec2::new(x + w, y),
            Vec2::new(x + w, y + h),
            Vec2::new(x + w + h, y + h),
        ];
    }

    /// Height of the left wedge slope under `x` (minus the radius slack)
    fn left_slope_y(&self, x: f32, radius: f32) -> f32 {
        self.body.location.y + (self.body.location.x - x) - wedge_slack(radius)
    }

    fn right_slope_y(&self, x: f32, radius: f32) -> f32 {
        self.body.location.y + (x - self.body.location.x - self.size.x) - wedge_slack(radius)
    }

    /// Ball landing on the flat top
    pub fn bounces_main_body(&self, ball: &Ball) -> bool {
        let p = ball.location();
        let Vec2 { x, y } = self.body.location;
        ball.is_descending()
            && p.x >= x
            && p.x <= x + self.size.x
            && p.y + ball.radius >= y
    }

    /// Ball landing on the left wedge slope
    pub fn bounces_left_wedge(&self, ball: &Ball) -> bool {
        let p = ball.location();
        let x = self.body.location.x;
        ball.is_descending()
            && p.x < x
            && p.x >= x - self.size.y
            && p.y >= self.left_slope_y(p.x, ball.radius)
    }

    /// Ball landing on the right wedge slope
    pub fn bounces_right_wedge(&self, ball: &Ball) -> bool {
        let p = ball.location();
        let right = self.body.location.x + self.size.x;
        ball.is_descending()
            && p.x > right
            && p.x <= right + self.size.y
            && p.y >= self.right_slope_y(p.x, ball.radius)
    }

    /// Outgoing heading for a main-body hit: π·(1.8 − 0.6·t), where t is the
    /// hit position across the width (0 = left edge, 1 = right edge)
    pub fn compute_bounce_angle(&self, ball: &Ball) -> Result<f32, SimError> {
        let offset = (ball.location() - self.body.location).try_div(self.size.x)?;
        let t = offset.x.clamp(0.0, 1.0);
        Ok(PI * (1.8 - 0.6 * t))
    }

    /// Resolve a ball against the paddle. Wedges win over the body and at
    /// most one surface fires. Returns whether the ball was deflected.
    pub fn deflect(&self, ball: &mut Ball) -> Result<bool, SimError> {
        let p = ball.location();
        if self.bounces_left_wedge(ball) {
            let y = self.left_slope_y(p.x, ball.radius);
            ball.set_location(Vec2::new(p.x, y));
            ball.set_rotation(LEFT_WEDGE_ANGLE);
        } else if self.bounces_right_wedge(ball) {
            let y = self.right_slope_y(p.x, ball.radius);
            ball.set_location(Vec2::new(p.x, y));
            ball.set_rotation(RIGHT_WEDGE_ANGLE);
        } else if self.bounces_main_body(ball) {
            let angle = self.compute_bounce_angle(ball)?;
            ball.set_location(Vec2::new(p.x, self.body.location.y - ball.radius));
            ball.set_rotation(angle);
        } else {
            return Ok(false);
        }
        Ok(true)
    }
}

impl Sprite for Paddle {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn set_location(&mut self, location: Vec2) {
        self.body.location = location;
        self.build_wedges();
    }

    fn update(&mut self, _game_time: f64, dt: f32) {
        self.animate_resize(dt);
        self.body.location.x += self.body.velocity.x * dt;
        self.clamp_location();
        self.build_wedges();
    }

    fn draw(&self, surface: &mut dyn Surface) {
        surface.fill_polygon(&self.left_wedge, colors::PADDLE_WEDGE);
        surface.fill_rect(self.body.location, self.size, colors::PADDLE);
        surface.fill_polygon(&self.right_wedge, colors::PADDLE_WEDGE);
    }
}
