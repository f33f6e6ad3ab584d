//! The ball: straight-line motion along its heading

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::{Body, Sprite, SpriteState};
use crate::consts::BALL_RADIUS;
use crate::render::{Surface, colors};
use crate::vector::from_angle;
use crate::wrap_angle;

/// A ball entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub body: Body,
    pub radius: f32,
    /// Most recent center that did not overlap any brick
    pub last_safe: Vec2,
}

impl Ball {
    pub fn new(location: Vec2, speed: f32) -> Self {
        let mut ball = Self {
            body: Body::new(location, speed),
            radius: BALL_RADIUS,
            last_safe: location,
        };
        ball.set_rotation(0.0);
        ball
    }

    /// Moving toward the bottom of the board
    #[inline]
    pub fn is_descending(&self) -> bool {
        self.body.rotation.sin() > 0.0
    }

    /// Return to `location` with a fresh heading, remembering it as safe
    pub fn serve(&mut self, location: Vec2, rotation: f32) {
        self.body.location = location;
        self.last_safe = location;
        self.set_rotation(rotation);
    }

    /// Axis-aligned bounds of the ball treated as a square
    pub fn bounds(&self) -> (Vec2, Vec2) {
        let r = Vec2::splat(self.radius);
        (self.body.location - r, self.body.location + r)
    }
}

impl Sprite for Ball {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    /// Headings are kept in [0, 2π) and velocity follows the heading
    fn set_rotation(&mut self, rotation: f32) {
        self.body.rotation = wrap_angle(rotation);
        self.body.velocity = from_angle(self.body.rotation, self.body.speed);
    }

    fn set_speed(&mut self, speed: f32) {
        self.body.speed = speed;
        self.body.velocity = from_angle(self.body.rotation, speed);
    }

    fn update(&mut self, _game_time: f64, dt: f32) {
        if self.body.state == SpriteState::Dead {
            return;
        }
        self.body.velocity = from_angle(self.body.rotation, self.body.speed);
        self.body.location += self.body.velocity * dt;
    }

    fn draw(&self, surface: &mut dyn Surface) {
        if self.body.state != SpriteState::Alive {
            return;
        }
        surface.fill_circle(self.body.location, self.radius, colors::BALL);
    }
}
