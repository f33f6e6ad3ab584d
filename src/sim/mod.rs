//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Caller-supplied timestep only
//! - Seeded RNG only
//! - Stable iteration order (collection order)
//! - No platform dependencies; drawing goes through `render::Surface`

pub mod ball;
pub mod brick;
pub mod collision;
pub mod entity;
pub mod level;
pub mod paddle;
pub mod state;
pub mod tick;

pub use ball::Ball;
pub use brick::{Bonus, BonusKind, Brick, BrickHit, BrickKind};
pub use collision::{WallBounce, bounce_walls, brick_reflection, fell_out, overlaps};
pub use entity::{Body, Sprite, SpriteState};
pub use level::{
    DEFAULT_LEVELS, FileLevels, LevelBlock, LevelLoader, LevelSource, TextLevels, parse_catalog,
    parse_grid, wrap_level,
};
pub use paddle::{LEFT_WEDGE_ANGLE, Paddle, PaddleResize, RIGHT_WEDGE_ANGLE};
pub use state::{GameEvent, GamePhase, GameSession, Snapshot};
