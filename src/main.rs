//! Object Fight headless demo
//!
//! Plays one match on autopilot through the fixed-step driver, logging
//! lifecycle events, then prints the final snapshot as JSON.
//!
//! Usage: `object-fight [config.json]`

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use std::error::Error;

    use object_fight::consts::*;
    use object_fight::sim::{AudioSink, Game, GameListener, SoundCue};
    use object_fight::{FixedStepDriver, GameConfig};

    /// Ten simulated minutes
    const MAX_TICKS: u64 = 10 * 60 * FPS as u64;

    /// Writes lifecycle events to the log
    struct LogListener;

    impl GameListener for LogListener {
        fn on_game_over(&mut self) {
            log::info!("Listener: game over");
        }

        fn on_game_won(&mut self) {
            log::info!("Listener: game won");
        }

        fn on_level_completed(&mut self, level: u32) {
            log::info!("Listener: level cleared, now on level {level}");
        }

        fn on_life_lost(&mut self, remaining_lives: u32) {
            log::info!("Listener: life lost, {remaining_lives} left");
        }
    }

    /// No audio device here; cues go to the debug log
    struct LogAudio;

    impl AudioSink for LogAudio {
        fn play(&mut self, cue: SoundCue) {
            log::debug!("Cue: {}", cue.as_str());
        }
    }

    pub fn run() -> Result<(), Box<dyn Error>> {
        let config = match std::env::args().nth(1) {
            Some(path) => GameConfig::load(path)?,
            None => GameConfig::default(),
        };

        let mut game = Game::new(config)?;
        game.set_listener(Box::new(LogListener));
        game.set_audio_sink(Box::new(LogAudio));
        game.start();

        let mut driver = FixedStepDriver::new(game).with_autopilot(true);
        let mut frames = 0u64;
        while frames < MAX_TICKS && !driver.game().is_finished() {
            driver.advance(SIM_DT);
            frames += 1;
        }

        let game = driver.game();
        log::info!(
            "Demo finished after {} ticks: level {}, score {}, lives {}",
            driver.ticks(),
            game.current_level(),
            game.score(),
            game.lives()
        );

        println!("{}", serde_json::to_string_pretty(&game.snapshot())?);
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    env_logger::init();
    log::info!("Object Fight demo starting...");

    match demo::run() {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            eprintln!("object-fight: {e}");
            std::process::ExitCode::FAILURE
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Headless demo is native only
}
