//! Bricks and the bonuses they carry

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::{Body, Sprite, SpriteState};
use crate::consts::{BONUS_SIZE, BRICK_SIZE};
use crate::render::{Color, Surface, colors};

/// Brick types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BrickKind {
    /// Destroyed by one hit
    Regular,
    /// First hit downgrades it to `Regular`
    DoubleHit,
}

/// Bonus pickup types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BonusKind {
    ThreeBalls,
    SuperSize,
    SlowMotion,
    BadPoints,
}

impl BonusKind {
    /// Rectangle and triangle colors
    fn palette(self) -> (Color, Color) {
        match self {
            BonusKind::ThreeBalls => ([1.0, 0.71, 0.76, 1.0], [0.6, 0.98, 0.6, 1.0]),
            BonusKind::SuperSize => ([0.39, 0.58, 0.93, 1.0], [0.69, 0.77, 0.87, 1.0]),
            BonusKind::SlowMotion => ([0.44, 0.5, 0.56, 1.0], [0.73, 0.33, 0.83, 1.0]),
            BonusKind::BadPoints => ([0.1, 0.1, 0.1, 1.0], [0.55, 0.0, 0.0, 1.0]),
        }
    }
}

/// A falling pickup. Inert (`Dead`) until its brick breaks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bonus {
    pub body: Body,
    pub size: Vec2,
    pub kind: BonusKind,
}

impl Bonus {
    pub fn new(kind: BonusKind, location: Vec2, speed: f32) -> Self {
        let mut body = Body::new(location, speed);
        body.state = SpriteState::Dead;
        Self {
            body,
            size: BONUS_SIZE,
            kind,
        }
    }

    /// Start falling
    pub fn release(&mut self) {
        self.body.state = SpriteState::Alive;
    }

    /// Still on the board and collectable (armed or not)
    pub fn is_falling(&self) -> bool {
        matches!(self.body.state, SpriteState::Alive | SpriteState::Stunned)
    }

    pub fn bounds(&self) -> (Vec2, Vec2) {
        (self.body.location, self.body.location + self.size)
    }
}

impl Sprite for Bonus {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn update(&mut self, _game_time: f64, dt: f32) {
        if !self.is_falling() {
            return;
        }
        self.body.location.y += self.body.speed * dt;
    }

    fn draw(&self, surface: &mut dyn Surface) {
        if self.body.state == SpriteState::Dead {
            return;
        }
        let (rect, triangle) = self.kind.palette();
        let Vec2 { x, y } = self.body.location;
        surface.fill_rect(self.body.location, self.size, rect);
        surface.fill_polygon(
            &[
                Vec2::new(x, y),
                Vec2::new(x, y + self.size.y),
                Vec2::new(x + self.size.x, y + self.size.y),
            ],
            triangle,
        );
    }
}

/// What a ball hit did to a brick
#[derive(Debug)]
pub enum BrickHit {
    /// DoubleHit brick downgraded to Regular and stunned
    Downgraded,
    /// Brick destroyed, handing over its bonus (now falling) if it had one
    Destroyed { bonus: Option<Bonus> },
}

/// A stationary brick
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Brick {
    pub body: Body,
    pub size: Vec2,
    pub kind: BrickKind,
    pub bonus: Option<Bonus>,
    pub color: Color,
}

impl Brick {
    pub fn new(kind: BrickKind, location: Vec2) -> Self {
        Self {
            body: Body::new(location, 0.0),
            size: BRICK_SIZE,
            kind,
            bonus: None,
            color: colors::BRICK_PALETTE[0],
        }
    }

    pub fn with_bonus(mut self, bonus: Bonus) -> Self {
        self.bonus = Some(bonus);
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Top-left and bottom-right corners
    pub fn bounds(&self) -> (Vec2, Vec2) {
        (self.body.location, self.body.location + self.size)
    }

    /// Apply one ball hit
    pub fn hit(&mut self) -> BrickHit {
        match self.kind {
            BrickKind::DoubleHit => {
                self.kind = BrickKind::Regular;
                self.body.state = SpriteState::Stunned;
                BrickHit::Downgraded
            }
            BrickKind::Regular => {
                self.body.state = SpriteState::Dead;
                let bonus = self.bonus.take().map(|mut bonus| {
                    bonus.release();
                    bonus
                });
                BrickHit::Destroyed { bonus }
            }
        }
    }
}

impl Sprite for Brick {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn update(&mut self, _game_time: f64, _dt: f32) {}

    fn draw(&self, surface: &mut dyn Surface) {
        if self.body.state == SpriteState::Dead {
            return;
        }
        match self.kind {
            BrickKind::Regular => surface.fill_rect(self.body.location, self.size, self.color),
            BrickKind::DoubleHit => {
                const BORDER: f32 = 4.0;
                surface.fill_rect(self.body.location, self.size, colors::BRICK_BORDER);
                surface.fill_rect(
                    self.body.location + Vec2::splat(BORDER),
                    self.size - Vec2::splat(2.0 * BORDER),
                    self.color,
                );
            }
        }
    }
}
