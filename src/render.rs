//! Drawing surface abstraction
//!
//! Entities describe themselves with a handful of 2D primitives. The host
//! supplies the actual rasterizer; `RecordingSurface` keeps the command list
//! for headless runs and tests.

use glam::Vec2;

/// RGBA color, components in 0..=1
pub type Color = [f32; 4];

/// Colors for game elements
pub mod colors {
    use super::Color;

    pub const BACKGROUND: Color = [0.0, 0.0, 0.55, 1.0]; // dark blue
    pub const BALL: Color = [0.75, 0.75, 0.75, 1.0]; // silver
    pub const PADDLE: Color = [1.0, 0.71, 0.76, 1.0]; // light pink
    pub const PADDLE_WEDGE: Color = [0.88, 1.0, 1.0, 1.0]; // light cyan
    pub const LIFE: Color = [1.0, 0.71, 0.76, 1.0];
    pub const TEXT: Color = [1.0, 1.0, 1.0, 1.0];
    pub const OVERLAY: Color = [0.0, 0.0, 0.0, 0.5];

    /// Brick fill palette, picked per grid cell
    pub const BRICK_PALETTE: [Color; 8] = [
        [0.94, 0.33, 0.31, 1.0],
        [1.0, 0.6, 0.2, 1.0],
        [0.98, 0.85, 0.3, 1.0],
        [0.45, 0.8, 0.35, 1.0],
        [0.3, 0.75, 0.8, 1.0],
        [0.35, 0.5, 0.95, 1.0],
        [0.65, 0.4, 0.9, 1.0],
        [0.9, 0.45, 0.7, 1.0],
    ];
    /// Inner border drawn on double-hit bricks
    pub const BRICK_BORDER: Color = [0.15, 0.15, 0.2, 1.0];
}

/// Horizontal text anchoring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
}

/// The primitives a host surface must support
pub trait Surface {
    fn fill_rect(&mut self, origin: Vec2, size: Vec2, color: Color);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);
    fn fill_polygon(&mut self, points: &[Vec2], color: Color);
    fn fill_text(&mut self, text: &str, at: Vec2, font_px: f32, align: TextAlign, color: Color);
}

/// A recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Rect { origin: Vec2, size: Vec2, color: Color },
    Circle { center: Vec2, radius: f32, color: Color },
    Polygon { points: Vec<Vec2>, color: Color },
    Text { text: String, at: Vec2, font_px: f32, align: TextAlign, color: Color },
}

/// Surface that stores every command instead of rasterizing
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    pub commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop the previous frame's commands
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Text of every recorded text command, in draw order
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn circle_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Circle { .. }))
            .count()
    }
}

impl Surface for RecordingSurface {
    fn fill_rect(&mut self, origin: Vec2, size: Vec2, color: Color) {
        self.commands.push(DrawCommand::Rect { origin, size, color });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.commands.push(DrawCommand::Circle { center, radius, color });
    }

    fn fill_polygon(&mut self, points: &[Vec2], color: Color) {
        self.commands.push(DrawCommand::Polygon {
            points: points.to_vec(),
            color,
        });
    }

    fn fill_text(&mut self, text: &str, at: Vec2, font_px: f32, align: TextAlign, color: Color) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            at,
            font_px,
            align,
            color,
        });
    }
}
