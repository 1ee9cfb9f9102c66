//! Lifecycle events and audio cues emitted by the simulation
//!
//! Both ports are synchronous: handlers run inline during `Game::update` and
//! must not call back into the game.

use serde::{Deserialize, Serialize};

/// Match lifecycle notifications
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    LifeLost { remaining_lives: u32 },
    /// `level` is the level now being played
    LevelCompleted { level: u32 },
    GameOver,
    GameWon,
}

/// Receiver for lifecycle events
pub trait GameListener {
    fn on_game_over(&mut self) {}

    fn on_game_won(&mut self) {}

    fn on_level_completed(&mut self, _level: u32) {}

    fn on_life_lost(&mut self, _remaining_lives: u32) {}

    /// Route an event to its handler
    fn on_event(&mut self, event: GameEvent) {
        match event {
            GameEvent::LifeLost { remaining_lives } => self.on_life_lost(remaining_lives),
            GameEvent::LevelCompleted { level } => self.on_level_completed(level),
            GameEvent::GameOver => self.on_game_over(),
            GameEvent::GameWon => self.on_game_won(),
        }
    }
}

/// Named sound cues; playback belongs to the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundCue {
    /// Ball hits paddle, wall or an unbreakable brick
    BallCollision,
    /// Ball damages a destructible brick
    BrickBroken,
    LifeLost,
    Victory,
    GameOver,
}

impl SoundCue {
    pub fn as_str(&self) -> &'static str {
        match self {
            SoundCue::BallCollision => "ball-collision",
            SoundCue::BrickBroken => "brick-broken",
            SoundCue::LifeLost => "life-lost",
            SoundCue::Victory => "victory",
            SoundCue::GameOver => "game-over",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "ball-collision" => Some(SoundCue::BallCollision),
            "brick-broken" => Some(SoundCue::BrickBroken),
            "life-lost" => Some(SoundCue::LifeLost),
            "victory" => Some(SoundCue::Victory),
            "game-over" => Some(SoundCue::GameOver),
            _ => None,
        }
    }
}

/// Host-side audio port
pub trait AudioSink {
    fn play(&mut self, cue: SoundCue);
}
