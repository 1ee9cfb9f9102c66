//! Fixed-rate host loop
//!
//! Converts variable frame times into whole `SIM_DT` ticks. Commands are
//! queued between frames and applied at the start of the next tick.

use crate::consts::*;
use crate::sim::{Command, Game, GameEvent, autopilot};

/// Longest frame accepted before clamping (avoids a huge catch-up after a stall)
const MAX_FRAME_DT: f32 = 0.1;

/// Drives a `Game` at a fixed tick rate
#[derive(Debug)]
pub struct FixedStepDriver {
    game: Game,
    accumulator: f32,
    /// Ticks left in the pause after a level is cleared
    transition_ticks: u32,
    /// One-shot commands for the next tick
    pending: Vec<Command>,
    /// AI plays the game
    autopilot: bool,
    /// Ticks in which a running game was updated
    ticks: u64,
}

impl FixedStepDriver {
    pub fn new(game: Game) -> Self {
        Self {
            game,
            accumulator: 0.0,
            transition_ticks: 0,
            pending: Vec::new(),
            autopilot: false,
            ticks: 0,
        }
    }

    pub fn with_autopilot(mut self, enabled: bool) -> Self {
        self.autopilot = enabled;
        self
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn game_mut(&mut self) -> &mut Game {
        &mut self.game
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// True while holding between levels
    pub fn in_transition(&self) -> bool {
        self.transition_ticks > 0
    }

    /// Queue a command for the next tick
    pub fn queue(&mut self, command: Command) {
        self.pending.push(command);
    }

    /// Run the ticks owed for `frame_dt` seconds, at most `MAX_SUBSTEPS`.
    /// Returns the number of fixed steps consumed, level-transition holds
    /// included.
    pub fn advance(&mut self, frame_dt: f32) -> u32 {
        if self.game.is_finished() {
            self.accumulator = 0.0;
            return 0;
        }

        let dt = if frame_dt.is_finite() {
            frame_dt.clamp(0.0, MAX_FRAME_DT)
        } else {
            0.0
        };
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.step();
            self.accumulator -= SIM_DT;
            substeps += 1;

            if self.game.is_finished() {
                self.accumulator = 0.0;
                break;
            }
        }

        // Drop whatever could not be simulated this frame
        if self.accumulator >= SIM_DT {
            log::debug!("Dropping {:.3}s of simulation backlog", self.accumulator);
            self.accumulator = 0.0;
        }

        substeps
    }

    fn step(&mut self) {
        if self.transition_ticks > 0 {
            self.transition_ticks -= 1;
            if self.transition_ticks == 0 {
                self.game.resume();
            }
            return;
        }

        for command in self.pending.drain(..) {
            self.game.apply(command);
        }
        if self.autopilot {
            let command = autopilot(&self.game);
            self.game.apply(command);
        }

        let running = self.game.is_running();
        self.game.update();
        if running {
            self.ticks += 1;
        }

        let cleared = self
            .game
            .events()
            .iter()
            .any(|e| matches!(e, GameEvent::LevelCompleted { .. }));
        if cleared {
            self.game.pause();
            self.transition_ticks = LEVEL_TRANSITION_TICKS;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::sim::GamePhase;

    fn driver() -> FixedStepDriver {
        let mut game = Game::new(GameConfig::default()).expect("valid config");
        game.start();
        FixedStepDriver::new(game)
    }

    #[test]
    fn test_one_tick_per_frame() {
        let mut d = driver();
        for _ in 0..10 {
            assert_eq!(d.advance(SIM_DT), 1);
        }
        assert_eq!(d.ticks(), 10);
    }

    #[test]
    fn test_partial_frames_accumulate() {
        let mut d = driver();
        assert_eq!(d.advance(SIM_DT / 2.0), 0);
        assert_eq!(d.advance(SIM_DT / 2.0), 1);
    }

    #[test]
    fn test_long_frame_capped_and_backlog_dropped() {
        let mut d = driver();
        assert_eq!(d.advance(5.0), MAX_SUBSTEPS);
        assert_eq!(d.advance(0.0), 0);
        assert_eq!(d.advance(f32::NAN), 0);
        assert_eq!(d.advance(-1.0), 0);
    }

    #[test]
    fn test_queued_commands_apply_once() {
        let mut d = driver();
        d.queue(Command::MoveRight);
        d.queue(Command::Launch);
        let x = d.game().paddle().center_x();
        d.advance(SIM_DT);
        assert!(!d.game().ball().is_stuck_to_paddle());
        assert_eq!(d.game().paddle().center_x(), x + PADDLE_SPEED);
        assert!(d.pending.is_empty());
    }

    #[test]
    fn test_level_transition_hold() {
        let mut d = driver();
        d.game_mut().bricks.clear();
        d.advance(SIM_DT);
        assert_eq!(d.game().current_level(), 2);
        assert!(d.game().is_paused());
        assert!(d.in_transition());

        for _ in 0..LEVEL_TRANSITION_TICKS {
            assert!(d.game().is_paused());
            d.advance(SIM_DT);
        }
        assert!(d.game().is_running());
        assert!(!d.in_transition());
        assert_eq!(d.ticks(), 1);

        d.advance(SIM_DT);
        assert_eq!(d.ticks(), 2);
    }

    #[test]
    fn test_paused_ticks_not_counted() {
        let mut d = driver();
        d.advance(SIM_DT);
        assert_eq!(d.ticks(), 1);

        d.queue(Command::TogglePause);
        assert_eq!(d.advance(SIM_DT), 1);
        assert!(d.game().is_paused());
        assert_eq!(d.advance(SIM_DT), 1);
        assert_eq!(d.ticks(), 1);

        d.queue(Command::TogglePause);
        d.advance(SIM_DT);
        assert!(d.game().is_running());
        assert_eq!(d.ticks(), 2);
    }

    #[test]
    fn test_stops_when_finished() {
        let mut d = driver();
        d.game_mut().phase = GamePhase::Won;
        assert_eq!(d.advance(SIM_DT * 3.0), 0);
        assert_eq!(d.ticks(), 0);
    }

    #[test]
    fn test_autopilot_plays() {
        let mut d = driver().with_autopilot(true);
        let steps: u32 = (0..600).map(|_| d.advance(SIM_DT)).sum();
        assert!(steps == 600 || d.game().is_finished());
        assert!(d.ticks() > 0 && d.ticks() <= 600);
        // Launched on the first tick
        assert!(d.game().score() > 0 || d.game().lives() < GAME_INITIAL_LIVES || d.ticks() > 1);
    }
}
