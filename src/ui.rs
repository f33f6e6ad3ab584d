//! HUD elements: remaining lives, score counter and the message overlay

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{BOARD_HEIGHT, BOARD_WIDTH};
use crate::render::{Surface, TextAlign, colors};
use crate::sim::SpriteState;

/// One extra-life marker along the top of the board
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Life {
    pub x: f32,
    pub state: SpriteState,
}

impl Life {
    const SIZE: Vec2 = Vec2::new(48.0, 24.0);
    const Y: f32 = 10.0;

    pub fn new(x: f32) -> Self {
        Self {
            x,
            state: SpriteState::Alive,
        }
    }

    /// Row of `count` life markers, 60px apart
    pub fn row(count: usize) -> Vec<Life> {
        (0..count).map(|i| Life::new(24.0 + i as f32 * 60.0)).collect()
    }

    pub fn is_alive(&self) -> bool {
        self.state == SpriteState::Alive
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        if self.state == SpriteState::Dead {
            return;
        }
        surface.fill_rect(Vec2::new(self.x, Self::Y), Self::SIZE, colors::LIFE);
    }
}

/// Running point total
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub points: u64,
}

impl Score {
    pub fn add(&mut self, points: u64) {
        self.points += points;
    }

    pub fn deduct(&mut self, points: u64) {
        self.points = self.points.saturating_sub(points);
    }

    pub fn reset(&mut self) {
        self.points = 0;
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        surface.fill_text(
            &format!("Score: {}", self.points),
            Vec2::new(10.0, 30.0),
            20.0,
            TextAlign::Left,
            colors::TEXT,
        );
    }
}

/// Centered multi-line message over a dimmed board
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Message {
    pub text: String,
    pub visible: bool,
}

impl Message {
    const LINE_HEIGHT: f32 = 30.0;

    pub fn show(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.visible = true;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        if !self.visible {
            return;
        }

        surface.fill_rect(
            Vec2::ZERO,
            Vec2::new(BOARD_WIDTH, BOARD_HEIGHT),
            colors::OVERLAY,
        );

        let lines: Vec<&str> = self.text.split('\n').collect();
        let start_y = (BOARD_HEIGHT - lines.len() as f32 * Self::LINE_HEIGHT) / 2.0;
        for (i, line) in lines.iter().enumerate() {
            surface.fill_text(
                line,
                Vec2::new(BOARD_WIDTH / 2.0, start_y + i as f32 * Self::LINE_HEIGHT),
                24.0,
                TextAlign::Center,
                colors::TEXT,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::RecordingSurface;

    #[test]
    fn test_dead_life_draws_nothing() {
        let mut surface = RecordingSurface::new();
        let mut life = Life::new(24.0);
        life.draw(&mut surface);
        assert_eq!(surface.len(), 1);

        life.state = SpriteState::Dead;
        surface.clear();
        life.draw(&mut surface);
        assert!(surface.is_empty());
    }

    #[test]
    fn test_score_saturates() {
        let mut score = Score::default();
        score.add(50);
        score.deduct(150);
        assert_eq!(score.points, 0);
    }

    #[test]
    fn test_message_lines() {
        let mut surface = RecordingSurface::new();
        let mut message = Message::default();
        message.draw(&mut surface);
        assert!(surface.is_empty());

        message.show("~ Game Over ~\nPress SPACE to restart");
        message.draw(&mut surface);
        assert_eq!(surface.texts(), vec!["~ Game Over ~", "Press SPACE to restart"]);
    }
}
