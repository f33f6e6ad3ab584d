//! Per-frame session update
//!
//! Advances a `GameSession` by one frame: phase transitions, paddle input,
//! ball physics and collisions, bonus pickups, then the level-complete and
//! game-over checks.

use glam::Vec2;

use super::brick::{BonusKind, BrickHit};
use super::collision;
use super::entity::{Sprite, SpriteState};
use super::level::LevelSource;
use super::state::{GameEvent, GamePhase, GameSession};
use crate::consts::BALL_RADIUS;
use crate::error::SimError;
use crate::input::{InputSource, Key};
use crate::render::{Surface, colors};

impl<I: InputSource, S: LevelSource> GameSession<I, S> {
    /// Advance one frame. `game_time` is the host's running clock in seconds,
    /// `dt` the frame length.
    pub fn update(&mut self, game_time: f64, dt: f32) -> Result<(), SimError> {
        let start_down = self.input.is_key_down(Key::Space);
        let start_pressed = start_down && !self.start_held;
        self.start_held = start_down;

        match self.phase {
            GamePhase::Intro if start_pressed => {
                self.phase = GamePhase::Play;
                self.level_complete = false;
                self.message.hide();
                self.events.push(GameEvent::PlayStarted { level: self.level });
                log::info!("Level {} started", self.level);
            }
            GamePhase::Over if start_pressed => {
                self.reset();
                self.phase = GamePhase::Play;
                self.message.hide();
                self.events.push(GameEvent::PlayStarted { level: self.level });
                return Ok(());
            }
            _ => {}
        }

        if self.phase != GamePhase::Play {
            return Ok(());
        }

        let dt = self.physics_dt(game_time, dt);

        self.steer_paddle();
        self.paddle.update(game_time, dt);

        // Bricks overlapped by any ball this frame
        let mut touched = vec![false; self.bricks.len()];
        for i in 0..self.balls.len() {
            if !self.balls[i].is_alive() {
                continue;
            }
            self.balls[i].update(game_time, dt);
            self.resolve_ball(i, &mut touched)?;
        }
        self.rearm_bricks(&touched);

        self.update_bonuses(game_time, dt);
        self.check_level_complete();
        self.check_game_over();
        Ok(())
    }

    /// Frame length after slow motion. Expiry is checked first, but the
    /// expiring frame still runs slowed.
    fn physics_dt(&mut self, game_time: f64, dt: f32) -> f32 {
        let Some(since) = self.slow_motion else {
            return dt;
        };
        if game_time - since > self.tuning.slow_motion_secs {
            self.slow_motion = None;
            log::debug!("Slow motion ended at {game_time:.2}s");
        }
        dt * self.tuning.slow_motion_factor
    }

    fn steer_paddle(&mut self) {
        let left = self.input.is_key_down(Key::ArrowLeft);
        let right = self.input.is_key_down(Key::ArrowRight);
        let speed = self.paddle.speed();
        let vx = match (left, right) {
            (true, false) => -speed,
            (false, true) => speed,
            _ => 0.0,
        };
        self.paddle.set_velocity(Vec2::new(vx, 0.0));
    }

    /// Walls, bottom edge, paddle, then bricks for ball `i`
    fn resolve_ball(&mut self, i: usize, touched: &mut [bool]) -> Result<(), SimError> {
        let board = Vec2::new(self.tuning.board_width, self.tuning.board_height);
        let wall = collision::bounce_walls(&mut self.balls[i], board);
        if wall.any() {
            self.events.push(GameEvent::WallHit(wall));
        }

        if collision::fell_out(&self.balls[i], board.y) {
            self.balls[i].set_state(SpriteState::Dead);
            let remaining = self.balls_in_play();
            self.events.push(GameEvent::BallLost { remaining });
            if remaining == 0 {
                self.lose_life();
            }
            return Ok(());
        }

        if self.paddle.deflect(&mut self.balls[i])? {
            self.events.push(GameEvent::PaddleHit);
        }
        self.resolve_bricks(i, touched);
        Ok(())
    }

    /// Every overlapping armed brick takes a hit; the last one hit decides
    /// the reflection. A ball that touched nothing records its position as
    /// safe. Overlaps are marked in `touched`, stunned bricks included.
    fn resolve_bricks(&mut self, i: usize, touched: &mut [bool]) {
        let ball = &mut self.balls[i];
        let ball_box = ball.bounds();
        let mut reflection = None;

        for (index, brick) in self.bricks.iter_mut().enumerate() {
            if brick.is_dead() {
                continue;
            }
            if !collision::overlaps(ball_box, brick.bounds()) {
                continue;
            }
            touched[index] = true;
            if brick.state() == SpriteState::Stunned {
                continue;
            }

            reflection = Some(collision::brick_reflection(
                ball.rotation(),
                ball.last_safe,
                brick.bounds(),
            ));

            match brick.hit() {
                BrickHit::Downgraded => self.events.push(GameEvent::BrickDowngraded { index }),
                BrickHit::Destroyed { bonus } => {
                    let points = self.tuning.brick_points;
                    self.score.add(points);
                    self.events.push(GameEvent::BrickDestroyed { index, points });
                    if let Some(bonus) = bonus {
                        log::debug!("Bonus {:?} released", bonus.kind);
                        self.events.push(GameEvent::BonusReleased(bonus.kind));
                        self.bonuses.push(bonus);
                    }
                }
            }
        }

        match reflection {
            Some(rotation) => ball.set_rotation(rotation),
            None => ball.last_safe = ball.location(),
        }
    }

    /// Stunned bricks that no ball overlapped this frame can be hit again
    fn rearm_bricks(&mut self, touched: &[bool]) {
        for (brick, &hit) in self.bricks.iter_mut().zip(touched) {
            if !hit && brick.state() == SpriteState::Stunned {
                brick.set_state(SpriteState::Alive);
            }
        }
    }

    /// Move falling bonuses and check them against the paddle. A bonus must
    /// overlap on two consecutive frames to be collected.
    fn update_bonuses(&mut self, game_time: f64, dt: f32) {
        let paddle_box = self.paddle.bounds();
        let board_height = self.tuning.board_height;
        let mut collected = Vec::new();

        for bonus in self.bonuses.iter_mut().filter(|b| b.is_falling()) {
            bonus.update(game_time, dt);

            if bonus.location().y > board_height {
                bonus.set_state(SpriteState::Dead);
                self.events.push(GameEvent::BonusMissed(bonus.kind));
                continue;
            }

            let touching = collision::overlaps(bonus.bounds(), paddle_box);
            match (bonus.state(), touching) {
                (SpriteState::Alive, true) => bonus.set_state(SpriteState::Stunned),
                (SpriteState::Stunned, true) => {
                    bonus.set_state(SpriteState::Dead);
                    collected.push(bonus.kind);
                }
                (SpriteState::Stunned, false) => bonus.set_state(SpriteState::Alive),
                _ => {}
            }
        }

        self.bonuses.retain(|b| b.is_falling());

        for kind in collected {
            self.collect_bonus(kind, game_time);
        }
    }

    fn collect_bonus(&mut self, kind: BonusKind, game_time: f64) {
        self.score.add(self.tuning.bonus_points);
        self.events.push(GameEvent::BonusCollected(kind));
        log::debug!("Bonus {kind:?} collected");

        match kind {
            BonusKind::ThreeBalls => {
                let origin = self
                    .balls
                    .iter()
                    .find(|b| b.is_alive())
                    .map(|b| b.location())
                    .unwrap_or_else(|| {
                        let (min, max) = self.paddle.bounds();
                        Vec2::new((min.x + max.x) / 2.0, min.y - BALL_RADIUS - 1.0)
                    });
                self.spawn_extra_balls(origin);
            }
            BonusKind::SuperSize => self.paddle.super_size(),
            BonusKind::SlowMotion => self.slow_motion = Some(game_time),
            BonusKind::BadPoints => self.score.deduct(self.tuning.bad_points_penalty),
        }
    }

    fn check_level_complete(&mut self) {
        if self.bricks.iter().any(|b| !b.is_dead()) {
            return;
        }
        self.level_complete = true;
        let finished = self.level;
        log::info!("Level {finished} complete, score {}", self.score.points);
        self.events.push(GameEvent::LevelComplete { level: finished });

        self.serve();
        self.load_level(finished + 1);
        self.message.show(format!(
            "Level {finished} Complete!\n\n~ Get Ready ~\nPress SPACE to continue"
        ));
    }

    fn check_game_over(&mut self) {
        if self.phase == GamePhase::Over || self.lives.iter().any(|l| l.is_alive()) {
            return;
        }
        self.phase = GamePhase::Over;
        self.message.show("~ Game Over ~\nPress SPACE to restart");
        log::info!("Game over, final score {}", self.score.points);
        self.events.push(GameEvent::GameOver {
            score: self.score.points,
        });
    }

    /// Paint the whole frame back to front
    pub fn draw(&self, surface: &mut dyn Surface) {
        surface.fill_rect(
            Vec2::ZERO,
            Vec2::new(self.tuning.board_width, self.tuning.board_height),
            colors::BACKGROUND,
        );

        for brick in self.bricks.iter().filter(|b| !b.is_dead()) {
            brick.draw(surface);
        }
        for bonus in &self.bonuses {
            bonus.draw(surface);
        }
        self.paddle.draw(surface);
        for ball in self.balls.iter().filter(|b| b.is_alive()) {
            ball.draw(surface);
        }

        for life in &self.lives {
            life.draw(surface);
        }
        self.score.draw(surface);
        self.message.draw(surface);
    }
}
