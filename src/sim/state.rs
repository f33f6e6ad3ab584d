//! Game session state
//!
//! The session owns every entity. Entities never point back at it; all
//! cross-entity rules live in `tick.rs`.

use std::f32::consts::PI;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::ball::Ball;
use super::brick::{Bonus, BonusKind, Brick};
use super::collision::WallBounce;
use super::entity::{Sprite, SpriteState};
use super::level::{LevelLoader, LevelSource};
use super::paddle::{Paddle, PaddleResize};
use crate::input::InputSource;
use crate::tuning::Tuning;
use crate::ui::{Life, Message, Score};

/// Top-level phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for Space, message shown
    Intro,
    /// Simulation running
    Play,
    /// Out of lives, waiting for Space
    Over,
    // Reserved; the session never enters these
    HighScores,
    Demo,
    Finish,
    NewScore,
}

/// Things that happened during an update, drained by the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    SessionStarted,
    PlayStarted { level: u32 },
    LevelLoaded { level: u32, bricks: usize },
    /// A double-hit brick took its first hit
    BrickDowngraded { index: usize },
    BrickDestroyed { index: usize, points: u64 },
    BonusReleased(BonusKind),
    BonusCollected(BonusKind),
    BonusMissed(BonusKind),
    /// A ball came off a side wall and/or the top
    WallHit(WallBounce),
    PaddleHit,
    BallLost { remaining: usize },
    LifeLost { lives_left: usize },
    LevelComplete { level: u32 },
    GameOver { score: u64 },
}

/// Serializable summary of the session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub level: u32,
    pub score: u64,
    pub lives_left: usize,
    pub balls_in_play: usize,
    pub bricks_left: usize,
    pub falling_bonuses: usize,
    pub paddle_width: f32,
    pub paddle_resize: PaddleResize,
    pub slow_motion: bool,
    pub level_complete: bool,
}

/// Complete game session
pub struct GameSession<I, S> {
    pub tuning: Tuning,
    pub phase: GamePhase,
    /// Level counter; keeps counting past the end of the catalog
    pub level: u32,
    pub balls: Vec<Ball>,
    pub bricks: Vec<Brick>,
    /// Released bonuses still on the board
    pub bonuses: Vec<Bonus>,
    pub paddle: Paddle,
    pub lives: Vec<Life>,
    pub score: Score,
    pub message: Message,
    /// Game time at which slow motion started, while active
    pub slow_motion: Option<f64>,
    /// Set when the bricks run out; cleared when play resumes
    pub level_complete: bool,
    pub input: I,
    pub(crate) levels: LevelLoader<S>,
    pub(crate) rng: Pcg32,
    /// Space was held on the previous update (for edge detection)
    pub(crate) start_held: bool,
    pub(crate) events: Vec<GameEvent>,
}

impl<I: InputSource, S: LevelSource> GameSession<I, S> {
    /// Build a session and load level 1; the session starts in `Intro`
    pub fn new(tuning: Tuning, input: I, levels: LevelLoader<S>) -> Self {
        let tuning = tuning.sanitized();
        let mut session = Self {
            phase: GamePhase::Intro,
            level: 1,
            balls: Vec::new(),
            bricks: Vec::new(),
            bonuses: Vec::new(),
            paddle: Paddle::new(tuning.board_width, tuning.board_height, tuning.paddle_speed),
            lives: Vec::new(),
            score: Score::default(),
            message: Message::default(),
            slow_motion: None,
            level_complete: false,
            input,
            levels: levels.with_bonus_speed(tuning.bonus_speed),
            rng: Pcg32::seed_from_u64(tuning.seed),
            start_held: false,
            events: Vec::new(),
            tuning,
        };
        session.reset();
        session
    }

    /// Fresh session: full ball pool, all lives, zero score, level 1
    pub fn reset(&mut self) {
        let center = self.tuning.board_center();
        self.balls = (0..self.tuning.ball_pool)
            .map(|_| Ball::new(center, self.tuning.ball_speed))
            .collect();
        self.lives = Life::row(self.tuning.lives);
        self.score.reset();
        self.slow_motion = None;
        self.level_complete = false;
        self.paddle.reset();
        self.events.push(GameEvent::SessionStarted);
        log::info!("Session reset");
        self.load_level(1);
    }

    /// Replace the bricks with `level`'s grid and wait in `Intro`
    pub fn load_level(&mut self, level: u32) {
        self.level = level;
        self.bricks = self.levels.load(level);
        self.bonuses.clear();
        self.phase = GamePhase::Intro;

        // Each level grants back one lost life
        if let Some(life) = self.lives.iter_mut().rev().find(|l| !l.is_alive()) {
            life.state = SpriteState::Alive;
        }

        self.message
            .show(format!("Level {level}\n\n~ Get Ready ~\nPress SPACE to start"));
        self.serve();

        log::info!("Level {level} loaded with {} bricks", self.bricks.len());
        self.events.push(GameEvent::LevelLoaded {
            level,
            bricks: self.bricks.len(),
        });
    }

    /// Put every ball back at the center with an upward heading; only the
    /// first ball stays in play. Resets the paddle.
    pub fn serve(&mut self) {
        let center = self.tuning.board_center();
        for ball in &mut self.balls {
            let angle = -(PI / 4.0 + self.rng.random::<f32>() * PI / 3.0);
            ball.serve(center, angle);
            ball.set_state(SpriteState::Dead);
        }
        if let Some(first) = self.balls.first_mut() {
            first.set_state(SpriteState::Alive);
        }
        self.paddle.reset();
    }

    /// Take away the rightmost remaining life and serve again
    pub(crate) fn lose_life(&mut self) {
        let Some(life) = self.lives.iter_mut().rev().find(|l| l.is_alive()) else {
            return;
        };
        life.state = SpriteState::Dead;
        let lives_left = self.lives_left();
        log::debug!("Life lost, {lives_left} left");
        self.events.push(GameEvent::LifeLost { lives_left });
        self.serve();
    }

    /// Bring every dead ball of the pool back into play at `origin`
    pub(crate) fn spawn_extra_balls(&mut self, origin: Vec2) {
        for i in 0..self.balls.len() {
            if !self.balls[i].is_dead() {
                continue;
            }
            let angle = self.rng.random_range(1.2 * PI..1.8 * PI);
            let ball = &mut self.balls[i];
            ball.serve(origin, angle);
            ball.set_state(SpriteState::Alive);
        }
    }

    pub fn lives_left(&self) -> usize {
        self.lives.iter().filter(|l| l.is_alive()).count()
    }

    pub fn balls_in_play(&self) -> usize {
        self.balls.iter().filter(|b| b.is_alive()).count()
    }

    pub fn bricks_left(&self) -> usize {
        self.bricks.iter().filter(|b| !b.is_dead()).count()
    }

    pub fn is_slow_motion(&self) -> bool {
        self.slow_motion.is_some()
    }

    pub fn input_mut(&mut self) -> &mut I {
        &mut self.input
    }

    /// Events recorded since the last drain
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase,
            level: self.level,
            score: self.score.points,
            lives_left: self.lives_left(),
            balls_in_play: self.balls_in_play(),
            bricks_left: self.bricks_left(),
            falling_bonuses: self.bonuses.iter().filter(|b| b.is_falling()).count(),
            paddle_width: self.paddle.width(),
            paddle_resize: self.paddle.resize,
            slow_motion: self.is_slow_motion(),
            level_complete: self.level_complete,
        }
    }
}
