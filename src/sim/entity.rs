//! Shared movable-entity contract
//!
//! Every playable entity carries a `Body` (position, heading, velocity,
//! speed, lifecycle state) and implements `Sprite` for its own update and
//! draw behavior.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::render::Surface;

/// Lifecycle state; the meaning of `Stunned` depends on the entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SpriteState {
    #[default]
    Alive,
    /// Brick: downgraded this contact. Bonus: armed by a first paddle overlap.
    Stunned,
    Dead,
}

/// Kinematic state shared by all sprites
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    /// Top-left corner for boxes, center for the ball
    pub location: Vec2,
    /// Heading in radians (screen space, +y down)
    pub rotation: f32,
    pub velocity: Vec2,
    /// Scalar speed in pixels per second
    pub speed: f32,
    pub state: SpriteState,
}

impl Body {
    pub fn new(location: Vec2, speed: f32) -> Self {
        Self {
            location,
            rotation: 0.0,
            velocity: Vec2::ZERO,
            speed,
            state: SpriteState::Alive,
        }
    }
}

pub trait Sprite {
    fn body(&self) -> &Body;
    fn body_mut(&mut self) -> &mut Body;

    /// Advance internal state by `dt` seconds
    fn update(&mut self, game_time: f64, dt: f32);

    /// Emit draw primitives for the current state
    fn draw(&self, surface: &mut dyn Surface);

    fn location(&self) -> Vec2 {
        self.body().location
    }

    fn set_location(&mut self, location: Vec2) {
        self.body_mut().location = location;
    }

    fn rotation(&self) -> f32 {
        self.body().rotation
    }

    fn set_rotation(&mut self, rotation: f32) {
        self.body_mut().rotation = rotation;
    }

    fn velocity(&self) -> Vec2 {
        self.body().velocity
    }

    fn set_velocity(&mut self, velocity: Vec2) {
        self.body_mut().velocity = velocity;
    }

    fn speed(&self) -> f32 {
        self.body().speed
    }

    fn set_speed(&mut self, speed: f32) {
        self.body_mut().speed = speed;
    }

    fn state(&self) -> SpriteState {
        self.body().state
    }

    fn set_state(&mut self, state: SpriteState) {
        self.body_mut().state = state;
    }

    fn is_alive(&self) -> bool {
        self.state() == SpriteState::Alive
    }

    fn is_dead(&self) -> bool {
        self.state() == SpriteState::Dead
    }
}
