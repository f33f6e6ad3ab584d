//! Bricks entry point
//!
//! Headless runner: plays the game with a simple autopilot at a fixed 60 Hz
//! step, drawing each frame to a recording surface and logging game events.
//! Logs the final session snapshot as JSON.
//!
//! Usage: `bricks [--levels FILE] [--tuning FILE] [--frames N]` (see `--help`)

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::error::Error;
    use std::path::PathBuf;

    use clap::Parser;

    use bricks::consts::SIM_DT;
    use bricks::render::RecordingSurface;
    use bricks::sim::{
        FileLevels, GameEvent, GamePhase, GameSession, LevelLoader, LevelSource, Sprite,
        TextLevels,
    };
    use bricks::{Key, KeyboardState, Tuning};

    /// Paddle dead zone around the target, in pixels
    const STEER_SLACK: f32 = 4.0;

    #[derive(Parser, Debug)]
    #[command(name = "bricks")]
    #[command(about = "Headless brick-breaker run with a simple autopilot")]
    pub struct Options {
        /// Level catalog file (defaults to the built-in levels)
        #[arg(long)]
        levels: Option<PathBuf>,
        /// JSON tuning overrides
        #[arg(long)]
        tuning: Option<PathBuf>,
        /// Frames to simulate at 60 Hz (default: two minutes)
        #[arg(long, default_value_t = 60 * 120)]
        frames: u64,
    }

    type Session<S> = GameSession<KeyboardState, S>;

    /// Press Space to get past Intro and Over, otherwise chase the ball
    /// closest to the bottom that is heading down
    fn autopilot<S: LevelSource>(session: &mut Session<S>, frame: u64) {
        let phase = session.phase;
        let (min, max) = session.paddle.bounds();
        let center = (min.x + max.x) / 2.0;
        let target = session
            .balls
            .iter()
            .filter(|b| b.is_alive())
            .max_by(|a, b| {
                (a.is_descending(), a.location().y)
                    .partial_cmp(&(b.is_descending(), b.location().y))
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .map(|b| b.location().x);

        let input = session.input_mut();
        input.clear();
        match phase {
            // Release on odd frames so every press is a fresh edge
            GamePhase::Intro | GamePhase::Over if frame % 2 == 0 => input.press(Key::Space),
            GamePhase::Play => match target {
                Some(x) if x < center - STEER_SLACK => input.press(Key::ArrowLeft),
                Some(x) if x > center + STEER_SLACK => input.press(Key::ArrowRight),
                _ => {}
            },
            _ => {}
        }
    }

    fn play<S: LevelSource>(mut session: Session<S>, frames: u64) -> Result<(), Box<dyn Error>> {
        let mut surface = RecordingSurface::new();
        let mut game_time = 0.0_f64;

        for frame in 0..frames {
            autopilot(&mut session, frame);
            session.update(game_time, SIM_DT)?;
            game_time += f64::from(SIM_DT);

            surface.clear();
            session.draw(&mut surface);

            for event in session.drain_events() {
                match event {
                    GameEvent::LevelComplete { .. } | GameEvent::GameOver { .. } => {
                        log::info!("[{game_time:8.2}s] {event:?}")
                    }
                    _ => log::debug!("[{game_time:8.2}s] {event:?}"),
                }
            }
        }

        log::info!(
            "Ran {frames} frames ({game_time:.1}s), last frame drew {} commands",
            surface.len()
        );
        log::info!("Final state: {}", serde_json::to_string(&session.snapshot())?);
        Ok(())
    }

    pub fn run(options: Options) -> Result<(), Box<dyn Error>> {
        let tuning = match &options.tuning {
            Some(path) => Tuning::load(path)?,
            None => Tuning::default(),
        };
        log::info!("Seed: {:#x}", tuning.seed);

        match options.levels {
            Some(path) => {
                log::info!("Levels from {}", path.display());
                let loader = LevelLoader::new(FileLevels::new(path));
                play(GameSession::new(tuning, KeyboardState::new(), loader), options.frames)
            }
            None => {
                let loader = LevelLoader::new(TextLevels::default());
                play(GameSession::new(tuning, KeyboardState::new(), loader), options.frames)
            }
        }
    }

}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use clap::Parser;

    let options = headless::Options::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Bricks (headless) starting...");

    if let Err(e) = headless::run(options) {
        log::error!("{e}");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The library is driven by the embedding page on wasm
}
