//! Game state and match lifecycle
//!
//! `Game` owns every entity of one match. Construction, phase changes and
//! accessors live here; the per-tick pipeline is in `tick.rs`.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::ball::Ball;
use super::body::GameObject;
use super::brick::{Brick, Durability};
use super::collider::Rect;
use super::events::{AudioSink, GameEvent, GameListener, SoundCue};
use super::levels::{Level, generate_level};
use super::paddle::Paddle;
use crate::config::{ConfigError, GameConfig};
use crate::consts::*;

/// Current phase of a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Built, waiting for `start`
    Idle,
    /// Active gameplay
    Running,
    /// Game is paused
    Paused,
    /// Out of lives
    GameOver,
    /// Last level cleared
    Won,
}

/// One match: ball, paddle, the current level's bricks and the counters
pub struct Game {
    pub(crate) config: GameConfig,
    pub(crate) ball: Ball,
    pub(crate) paddle: Paddle,
    /// Live bricks in layout order
    pub(crate) bricks: Vec<Brick>,
    pub(crate) score: u64,
    pub(crate) lives: u32,
    pub(crate) current_level: Level,
    pub(crate) phase: GamePhase,
    /// Events raised by the most recent `update`
    pub(crate) events: Vec<GameEvent>,
    pub(crate) listener: Option<Box<dyn GameListener>>,
    pub(crate) audio: Option<Box<dyn AudioSink>>,
    next_id: u32,
}

impl Game {
    /// Build a match from a validated config. The ball starts stuck to the
    /// centered paddle and the game waits in `Idle` until `start`.
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let level = Level::new(config.start_level)?;

        let paddle = Paddle::new(
            config.screen_width,
            config.screen_height,
            config.paddle_speed_multiplier,
        );
        let mut ball = Ball::new(config.screen_width, config.screen_height, config.seed);
        ball.stick_to(&paddle);

        let mut game = Self {
            lives: config.initial_lives,
            config,
            ball,
            paddle,
            bricks: Vec::new(),
            score: 0,
            current_level: level,
            phase: GamePhase::Idle,
            events: Vec::new(),
            listener: None,
            audio: None,
            next_id: 1,
        };
        game.load_level();

        log::info!(
            "New game: {}x{}, {} lives, level {}, seed {}",
            game.config.screen_width,
            game.config.screen_height,
            game.lives,
            level.get(),
            game.config.seed
        );
        Ok(game)
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Replace the bricks with the current level's layout and set the
    /// paddle's resizing mode for it
    pub(crate) fn load_level(&mut self) {
        self.bricks = generate_level(
            self.current_level,
            self.config.screen_width,
            &mut self.next_id,
        );
        self.paddle
            .enable_resizing(self.current_level.get() == PADDLE_RESIZING_LEVEL);
    }

    /// Jump to `level` (debug/skip). Score and lives are kept; the ball
    /// re-sticks to the paddle.
    pub fn set_level(&mut self, level: u32) -> Result<(), ConfigError> {
        self.current_level = Level::new(level)?;
        self.load_level();
        self.ball.reset_position();
        self.ball.stick_to(&self.paddle);
        log::info!("Skipped to level {level}");
        Ok(())
    }

    // === Lifecycle ===

    /// Enter `Running` from any phase
    pub fn start(&mut self) {
        self.phase = GamePhase::Running;
        log::info!("Game started on level {}", self.current_level.get());
    }

    /// Running -> Paused; other phases are left alone
    pub fn pause(&mut self) {
        if self.phase == GamePhase::Running {
            self.phase = GamePhase::Paused;
            log::debug!("Game paused");
        }
    }

    /// Paused -> Running; other phases are left alone
    pub fn resume(&mut self) {
        if self.phase == GamePhase::Paused {
            self.phase = GamePhase::Running;
            log::debug!("Game resumed");
        }
    }

    pub fn set_listener(&mut self, listener: Box<dyn GameListener>) {
        self.listener = Some(listener);
    }

    pub fn set_audio_sink(&mut self, sink: Box<dyn AudioSink>) {
        self.audio = Some(sink);
    }

    /// Buffer an event and deliver it to the listener
    pub(crate) fn emit(&mut self, event: GameEvent) {
        log::info!("{event:?}");
        self.events.push(event);
        if let Some(listener) = self.listener.as_mut() {
            listener.on_event(event);
        }
    }

    pub(crate) fn play(audio: &mut Option<Box<dyn AudioSink>>, cue: SoundCue) {
        if let Some(sink) = audio.as_mut() {
            sink.play(cue);
        }
    }

    // === Accessors ===

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    pub fn is_paused(&self) -> bool {
        self.phase == GamePhase::Paused
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub fn is_game_won(&self) -> bool {
        self.phase == GamePhase::Won
    }

    /// Over or won: nothing left to simulate
    pub fn is_finished(&self) -> bool {
        matches!(self.phase, GamePhase::GameOver | GamePhase::Won)
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn current_level(&self) -> u32 {
        self.current_level.get()
    }

    pub fn ball(&self) -> &Ball {
        &self.ball
    }

    pub fn paddle(&self) -> &Paddle {
        &self.paddle
    }

    pub fn bricks(&self) -> &[Brick] {
        &self.bricks
    }

    /// Live bricks that still have to be destroyed to clear the level
    pub fn bricks_remaining(&self) -> usize {
        self.bricks
            .iter()
            .filter(|b| b.is_alive() && b.counts_for_clear())
            .count()
    }

    /// Events raised by the most recent `update`
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Owned copy of everything a renderer reads
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            ball: BallView {
                bounds: self.ball.body().bounding_box(),
                stuck: self.ball.is_stuck_to_paddle(),
                alive: self.ball.is_alive(),
            },
            paddle: self.paddle.body().bounding_box(),
            bricks: self
                .bricks
                .iter()
                .filter(|b| b.is_alive())
                .map(|b| BrickView {
                    id: b.id,
                    kind: b.durability(),
                    movable: b.is_movable(),
                    bounds: b.body().bounding_box(),
                    damage_phase: b.damage_phase(),
                })
                .collect(),
            score: self.score,
            lives: self.lives,
            level: self.current_level.get(),
            phase: self.phase,
            running: self.is_running(),
            game_over: self.is_game_over(),
            game_won: self.is_game_won(),
        }
    }
}

impl fmt::Debug for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Game")
            .field("phase", &self.phase)
            .field("level", &self.current_level.get())
            .field("score", &self.score)
            .field("lives", &self.lives)
            .field("bricks", &self.bricks.len())
            .finish_non_exhaustive()
    }
}

/// Ball as seen by a renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BallView {
    pub bounds: Rect,
    pub stuck: bool,
    pub alive: bool,
}

/// Brick as seen by a renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrickView {
    pub id: u32,
    pub kind: Durability,
    pub movable: bool,
    pub bounds: Rect,
    /// 0 untouched, grows with each hit on a resistant brick
    pub damage_phase: u8,
}

/// Read-only render state, detached from the live `Game`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub ball: BallView,
    pub paddle: Rect,
    pub bricks: Vec<BrickView>,
    pub score: u64,
    pub lives: u32,
    pub level: u32,
    pub phase: GamePhase,
    pub running: bool,
    pub game_over: bool,
    pub game_won: bool,
}
