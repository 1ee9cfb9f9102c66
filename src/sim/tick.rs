//! Fixed timestep simulation tick
//!
//! Core game loop that advances a match deterministically: update the
//! entities, resolve collisions, then check lives and level progress.

use serde::{Deserialize, Serialize};

use super::body::GameObject;
use super::events::{GameEvent, SoundCue};
use super::state::{Game, GamePhase};
use crate::consts::*;

/// Discrete player input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    MoveLeft,
    MoveRight,
    Stop,
    /// Free a stuck ball
    Launch,
    TogglePause,
}

/// How far ahead (in ticks) the autopilot extrapolates the ball
const AUTOPILOT_LEAD_TICKS: f32 = 4.0;

impl Game {
    /// Apply one command. Movement and launch only act on a running game.
    pub fn apply(&mut self, command: Command) {
        if command == Command::TogglePause {
            match self.phase {
                GamePhase::Running => self.pause(),
                GamePhase::Paused => self.resume(),
                _ => {}
            }
            return;
        }
        if !self.is_running() {
            return;
        }
        match command {
            Command::MoveLeft => self.paddle.move_left(),
            Command::MoveRight => self.paddle.move_right(),
            Command::Stop => self.paddle.stop(),
            Command::Launch => {
                self.ball.launch();
            }
            Command::TogglePause => {}
        }
    }

    /// Advance the match by one fixed step. No-op unless running.
    pub fn update(&mut self) {
        self.events.clear();
        if self.phase != GamePhase::Running {
            return;
        }

        self.paddle.update();
        if self.ball.update_with_paddle(&self.paddle) {
            Self::play(&mut self.audio, SoundCue::BallCollision);
        }
        for brick in &mut self.bricks {
            brick.update();
        }

        self.check_collisions();
        self.check_game_state();
    }

    /// True once no destructible brick is left alive
    pub fn is_level_completed(&self) -> bool {
        self.bricks_remaining() == 0
    }

    fn check_collisions(&mut self) {
        if self.ball.collides_with(&self.paddle) {
            self.ball.handle_collision(self.paddle.contact());
            Self::play(&mut self.audio, SoundCue::BallCollision);
        }

        let points = u64::from(self.config.points_per_brick);
        for brick in &mut self.bricks {
            if !self.ball.collides_with(&*brick) {
                continue;
            }
            self.ball.handle_collision(brick.contact());
            brick.handle_collision(self.ball.contact());

            if brick.counts_for_clear() {
                self.score += points;
                Self::play(&mut self.audio, SoundCue::BrickBroken);
                if !brick.is_alive() {
                    log::debug!("Brick {} destroyed", brick.id);
                }
            } else {
                Self::play(&mut self.audio, SoundCue::BallCollision);
            }
        }

        self.bricks.retain(|b| b.is_alive());
    }

    fn check_game_state(&mut self) {
        if !self.ball.is_alive() {
            self.lose_life();
        } else if self.is_running() && self.is_level_completed() {
            self.complete_level();
        }
    }

    fn lose_life(&mut self) {
        self.lives = self.lives.saturating_sub(1);
        self.ball.hold();
        Self::play(&mut self.audio, SoundCue::LifeLost);
        self.emit(GameEvent::LifeLost {
            remaining_lives: self.lives,
        });

        if self.lives == 0 {
            self.phase = GamePhase::GameOver;
            Self::play(&mut self.audio, SoundCue::GameOver);
            self.emit(GameEvent::GameOver);
            log::info!("Game over with score {}", self.score);
            return;
        }

        self.ball.reset_position();
        self.ball.reset_velocity();
        self.ball.stick_to(&self.paddle);
    }

    fn complete_level(&mut self) {
        let cleared = self.current_level;
        let Some(next) = cleared.next() else {
            self.phase = GamePhase::Won;
            Self::play(&mut self.audio, SoundCue::Victory);
            self.emit(GameEvent::GameWon);
            log::info!("All levels cleared with score {}", self.score);
            return;
        };

        self.current_level = next;
        self.load_level();
        self.paddle
            .reduce_size((next.get() - 1) as f32 * GAME_PADDLE_REDUCTION_PER_LEVEL);
        self.ball.reset_position();
        self.ball.reset_velocity();
        self.ball.stick_to(&self.paddle);
        log::info!("Level {} cleared", cleared.get());
        self.emit(GameEvent::LevelCompleted { level: next.get() });
    }
}

/// Demo AI: launch when stuck, otherwise chase the ball's projected x
pub fn autopilot(game: &Game) -> Command {
    let ball = game.ball();
    if ball.is_stuck_to_paddle() {
        return Command::Launch;
    }

    let body = ball.body();
    let target_x = body.center().x + body.vel.x * AUTOPILOT_LEAD_TICKS;
    let paddle = game.paddle();
    let dx = target_x - paddle.center_x();
    let dead_zone = paddle.width() / 4.0;

    if dx < -dead_zone {
        Command::MoveLeft
    } else if dx > dead_zone {
        Command::MoveRight
    } else {
        Command::Stop
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use proptest::prelude::*;

    use super::*;
    use crate::config::GameConfig;
    use crate::sim::brick::{Brick, Durability};
    use crate::sim::events::{AudioSink, GameListener};

    #[derive(Clone, Default)]
    struct EventLog(Rc<RefCell<Vec<GameEvent>>>);

    impl GameListener for EventLog {
        fn on_event(&mut self, event: GameEvent) {
            self.0.borrow_mut().push(event);
        }
    }

    impl EventLog {
        fn count(&self, event: GameEvent) -> usize {
            self.0.borrow().iter().filter(|e| **e == event).count()
        }
    }

    #[derive(Clone, Default)]
    struct CueLog(Rc<RefCell<Vec<SoundCue>>>);

    impl AudioSink for CueLog {
        fn play(&mut self, cue: SoundCue) {
            self.0.borrow_mut().push(cue);
        }
    }

    fn running_game(config: GameConfig) -> Game {
        let mut game = Game::new(config).expect("valid config");
        game.start();
        game
    }

    fn with_lives(lives: u32) -> GameConfig {
        GameConfig {
            initial_lives: lives,
            ..Default::default()
        }
    }

    /// Free the ball and aim it so this tick's motion carries it into the
    /// bottom face of brick `id`
    fn strike_from_below(game: &mut Game, id: u32) {
        game.apply(Command::Launch);
        let bounds = game
            .bricks
            .iter()
            .find(|b| b.id == id)
            .expect("brick exists")
            .body()
            .bounding_box();
        let r = game.ball.radius();
        let body = game.ball.body_mut();
        body.set_position(Vec2::new(bounds.center().x - r, bounds.bottom() + 5.0));
        body.vel = Vec2::new(0.0, -10.0);
        game.update();
    }

    /// Free the ball and send it through the floor away from the paddle
    fn drop_ball(game: &mut Game) {
        game.apply(Command::Launch);
        let h = game.config.screen_height;
        let body = game.ball.body_mut();
        body.set_position(Vec2::new(100.0, h - 5.0));
        body.vel = Vec2::new(0.0, 10.0);
        game.update();
    }

    #[test]
    fn test_update_noop_unless_running() {
        let mut game = Game::new(GameConfig::default()).expect("valid config");
        let before = game.snapshot();
        game.apply(Command::MoveLeft);
        game.update();
        assert_eq!(game.snapshot(), before);

        game.start();
        game.apply(Command::TogglePause);
        assert!(game.is_paused());
        game.apply(Command::MoveLeft);
        game.apply(Command::Launch);
        game.update();
        assert!(game.ball().is_stuck_to_paddle());
        assert_eq!(game.paddle().body().vel, Vec2::ZERO);

        game.apply(Command::TogglePause);
        assert!(game.is_running());
    }

    #[test]
    fn test_commands_drive_paddle_and_ball() {
        let mut game = running_game(GameConfig::default());
        let x = game.paddle().center_x();
        game.apply(Command::MoveRight);
        game.update();
        assert_eq!(game.paddle().center_x(), x + PADDLE_SPEED);
        // Stuck ball rides along
        assert_eq!(game.ball().body().center().x, game.paddle().center_x());

        game.apply(Command::Stop);
        game.apply(Command::Launch);
        game.update();
        assert!(!game.ball().is_stuck_to_paddle());
        assert!(game.ball().body().vel.y < 0.0);
    }

    #[test]
    fn test_speed_multiplier_scales_paddle() {
        let mut game = running_game(GameConfig {
            paddle_speed_multiplier: 0.5,
            ..Default::default()
        });
        let x = game.paddle().center_x();
        game.apply(Command::MoveLeft);
        game.update();
        assert_eq!(game.paddle().center_x(), x - PADDLE_SPEED * 0.5);
    }

    #[test]
    fn test_clearing_level_one_advances() {
        let mut game = running_game(with_lives(5));
        let log = EventLog::default();
        game.set_listener(Box::new(log.clone()));

        // Bottom rows first so nothing sits under the struck brick
        let ids: Vec<u32> = game.bricks().iter().rev().map(|b| b.id).collect();
        assert_eq!(ids.len(), 30);
        for id in ids {
            strike_from_below(&mut game, id);
        }

        assert_eq!(game.score(), 30 * u64::from(GAME_POINTS_PER_BRICK));
        assert_eq!(game.current_level(), 2);
        assert_eq!(game.lives(), 5);
        assert!(game.ball().is_stuck_to_paddle());
        assert_eq!(game.ball().body().vel, Vec2::ZERO);
        assert_eq!(game.events(), &[GameEvent::LevelCompleted { level: 2 }]);
        assert_eq!(log.count(GameEvent::LevelCompleted { level: 2 }), 1);
        assert_eq!(game.bricks().len(), 34);
        // Shrink is floored at the base width
        assert_eq!(game.paddle().width(), PADDLE_ORIGINAL_WIDTH);
        assert_eq!(game.paddle().body().bounding_box().width, PADDLE_ORIGINAL_WIDTH);

        // Events only cover the most recent tick
        game.update();
        assert!(game.events().is_empty());
    }

    #[test]
    fn test_three_falls_end_the_game() {
        let mut game = running_game(with_lives(3));
        let log = EventLog::default();
        let cues = CueLog::default();
        game.set_listener(Box::new(log.clone()));
        game.set_audio_sink(Box::new(cues.clone()));

        drop_ball(&mut game);
        assert_eq!(game.lives(), 2);
        assert!(game.ball().is_alive());
        assert!(game.ball().is_stuck_to_paddle());
        assert!(game.is_running());

        drop_ball(&mut game);
        drop_ball(&mut game);
        assert_eq!(game.lives(), 0);
        assert!(game.is_game_over());
        assert!(!game.is_running());
        assert_eq!(log.count(GameEvent::GameOver), 1);
        assert_eq!(
            log.0.borrow().as_slice(),
            &[
                GameEvent::LifeLost { remaining_lives: 2 },
                GameEvent::LifeLost { remaining_lives: 1 },
                GameEvent::LifeLost { remaining_lives: 0 },
                GameEvent::GameOver,
            ]
        );
        assert_eq!(
            cues.0.borrow().iter().filter(|c| **c == SoundCue::LifeLost).count(),
            3
        );
        assert_eq!(cues.0.borrow().last(), Some(&SoundCue::GameOver));

        // Nothing moves or fires after game over
        let pos = game.ball().body().pos;
        for _ in 0..10 {
            game.apply(Command::Launch);
            game.update();
        }
        assert_eq!(game.ball().body().pos, pos);
        assert_eq!(log.count(GameEvent::GameOver), 1);
        assert_eq!(game.lives(), 0);
    }

    #[test]
    fn test_clearing_last_level_wins_once() {
        let mut game = running_game(GameConfig {
            start_level: 5,
            ..Default::default()
        });
        let log = EventLog::default();
        let cues = CueLog::default();
        game.set_listener(Box::new(log.clone()));
        game.set_audio_sink(Box::new(cues.clone()));

        // Middle plain brick of the top row is struck last
        let target = game.bricks[3].id;
        assert_eq!(game.bricks[3].durability(), Durability::Plain);
        assert!(!game.bricks[3].is_movable());
        for brick in game.bricks.iter_mut() {
            if brick.counts_for_clear() && brick.id != target {
                brick.body_mut().alive = false;
            }
        }
        strike_from_below(&mut game, target);

        assert!(game.is_game_won());
        assert!(!game.is_running());
        assert_eq!(log.count(GameEvent::GameWon), 1);
        assert_eq!(cues.0.borrow().last(), Some(&SoundCue::Victory));
        // Unbreakable bricks are still standing
        assert_eq!(game.bricks().len(), 4);
        assert!(game.bricks().iter().all(|b| !b.counts_for_clear()));

        for _ in 0..10 {
            game.update();
        }
        assert_eq!(log.count(GameEvent::GameWon), 1);
        assert_eq!(game.current_level(), MAX_LEVEL);
    }

    #[test]
    fn test_only_unbreakable_left_completes_level() {
        let mut game = running_game(GameConfig::default());
        game.set_level(2).expect("valid level");
        game.bricks.retain(|b| !b.counts_for_clear());
        assert_eq!(game.bricks().len(), 4);
        assert!(game.is_level_completed());

        game.update();
        assert_eq!(game.current_level(), 3);
        assert_eq!(game.events(), &[GameEvent::LevelCompleted { level: 3 }]);
    }

    #[test]
    fn test_resizing_only_on_level_four() {
        let mut game = running_game(GameConfig::default());
        game.set_level(3).expect("valid level");
        game.bricks.clear();
        game.update();
        assert_eq!(game.current_level(), 4);
        assert!(game.paddle().resizing_enabled());

        game.bricks.clear();
        game.update();
        assert_eq!(game.current_level(), 5);
        assert!(!game.paddle().resizing_enabled());
        // The tick on level 4 narrowed the paddle; the level-5 shrink is floored
        assert_eq!(game.paddle().width(), PADDLE_ORIGINAL_WIDTH);
    }

    #[test]
    fn test_resistant_brick_scores_every_hit() {
        let mut game = running_game(GameConfig::default());
        let cues = CueLog::default();
        game.set_audio_sink(Box::new(cues.clone()));
        game.bricks = vec![Brick::new(
            900,
            Vec2::new(500.0, 200.0),
            BRICK_WIDTH,
            BRICK_HEIGHT,
            Durability::resistant(),
        )];

        strike_from_below(&mut game, 900);
        strike_from_below(&mut game, 900);
        assert_eq!(game.bricks()[0].damage_phase(), 2);
        assert_eq!(game.score(), 20);
        assert_eq!(game.current_level(), 1);

        strike_from_below(&mut game, 900);
        assert_eq!(game.score(), 30);
        // Last brick gone: on to level 2
        assert_eq!(game.current_level(), 2);
        assert_eq!(
            cues.0.borrow().iter().filter(|c| **c == SoundCue::BrickBroken).count(),
            3
        );
    }

    #[test]
    fn test_unbreakable_hit_bounces_without_score() {
        let mut game = running_game(GameConfig::default());
        let cues = CueLog::default();
        game.set_audio_sink(Box::new(cues.clone()));
        game.set_level(3).expect("valid level");
        let tip = game.bricks.last().expect("tip").id;
        let remaining = game.bricks_remaining();

        strike_from_below(&mut game, tip);

        assert_eq!(game.score(), 0);
        assert_eq!(game.bricks_remaining(), remaining);
        assert!(game.bricks().iter().any(|b| b.id == tip));
        assert!(game.ball().body().vel.y > 0.0);
        assert_eq!(cues.0.borrow().as_slice(), &[SoundCue::BallCollision]);
    }

    #[test]
    fn test_wall_bounce_plays_collision_cue() {
        let mut game = running_game(GameConfig::default());
        let cues = CueLog::default();
        game.set_audio_sink(Box::new(cues.clone()));
        game.apply(Command::Launch);
        let body = game.ball.body_mut();
        body.set_position(Vec2::new(5.0, 500.0));
        body.vel = Vec2::new(-10.0, 0.0);
        game.update();

        assert!(game.ball().body().vel.x > 0.0);
        assert_eq!(cues.0.borrow().as_slice(), &[SoundCue::BallCollision]);
    }

    #[test]
    fn test_paddle_hit_sends_ball_up() {
        let mut game = running_game(GameConfig::default());
        game.apply(Command::Launch);
        let paddle_top = game.paddle().body().pos.y;
        let cx = game.paddle().center_x();
        let r = game.ball().radius();
        let body = game.ball.body_mut();
        body.set_position(Vec2::new(cx - r, paddle_top - 2.0 * r - 5.0));
        body.vel = Vec2::new(0.0, 10.0);
        game.update();

        assert!(game.ball().body().vel.y < 0.0);
        assert!(game.ball().is_alive());
    }

    #[test]
    fn test_autopilot_choices() {
        let mut game = running_game(GameConfig::default());
        assert_eq!(autopilot(&game), Command::Launch);

        game.apply(Command::Launch);
        let r = game.ball().radius();
        let x = game.paddle().center_x();

        let body = game.ball.body_mut();
        body.set_position(Vec2::new(x + 400.0 - r, 300.0));
        body.vel = Vec2::new(0.0, 10.0);
        assert_eq!(autopilot(&game), Command::MoveRight);

        let body = game.ball.body_mut();
        body.set_position(Vec2::new(x - 400.0 - r, 300.0));
        assert_eq!(autopilot(&game), Command::MoveLeft);

        let body = game.ball.body_mut();
        body.set_position(Vec2::new(x - r, 300.0));
        assert_eq!(autopilot(&game), Command::Stop);
    }

    #[test]
    fn test_determinism() {
        // Two games with the same seed and inputs stay identical
        let mut a = running_game(GameConfig::default());
        let mut b = running_game(GameConfig::default());

        for _ in 0..600 {
            a.apply(autopilot(&a));
            b.apply(autopilot(&b));
            a.update();
            b.update();
        }

        assert_eq!(a.snapshot(), b.snapshot());
    }

    proptest! {
        #[test]
        fn prop_match_invariants(
            seed in any::<u64>(),
            commands in prop::collection::vec(0u8..6, 1..400),
        ) {
            let mut game = running_game(GameConfig { seed, ..Default::default() });
            let mut score = 0;
            for c in commands {
                let command = match c {
                    0 => Command::MoveLeft,
                    1 => Command::MoveRight,
                    2 => Command::Stop,
                    3 => Command::Launch,
                    _ => autopilot(&game),
                };
                game.apply(command);
                game.update();

                prop_assert!(game.score() >= score);
                score = game.score();
                prop_assert!(game.lives() <= GAME_INITIAL_LIVES);
                prop_assert!((1..=MAX_LEVEL).contains(&game.current_level()));
                prop_assert!(game.bricks().iter().all(|b| b.is_alive()));
                if game.ball().is_stuck_to_paddle() {
                    prop_assert_eq!(game.ball().body().vel, Vec2::ZERO);
                }
                let ball = game.ball().body().bounding_box();
                prop_assert!(ball.x >= 0.0 && ball.right() <= game.config().screen_width);
            }
        }
    }
}
