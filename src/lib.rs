//! Object Fight - A ball-and-paddle brick breaker
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, game state)
//! - `config`: Match configuration with validation
//! - `driver`: Fixed-rate host loop around the simulation

pub mod config;
pub mod driver;
pub mod sim;

pub use config::{ConfigError, GameConfig};
pub use driver::FixedStepDriver;

/// Game configuration constants
pub mod consts {
    /// Target simulation rate
    pub const FPS: u32 = 60;
    /// Fixed simulation timestep (one tick per frame)
    pub const SIM_DT: f32 = 1.0 / FPS as f32;
    /// Maximum ticks per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 5;

    /// Match defaults
    pub const GAME_INITIAL_LIVES: u32 = 3;
    pub const GAME_POINTS_PER_BRICK: u32 = 10;
    pub const GAME_PADDLE_REDUCTION_PER_LEVEL: f32 = 10.0;
    pub const MAX_LEVEL: u32 = 5;
    /// Ticks the host holds the game paused after a level is cleared (~100 ms)
    pub const LEVEL_TRANSITION_TICKS: u32 = 6;

    /// Paddle defaults
    pub const INITIAL_PADDLE_WIDTH: f32 = 250.0;
    pub const PADDLE_HEIGHT: f32 = 40.0;
    pub const PADDLE_SPEED: f32 = 40.0;
    pub const PADDLE_ORIGINAL_WIDTH: f32 = 250.0;
    pub const PADDLE_MIN_WIDTH: f32 = 100.0;
    pub const PADDLE_RESIZE_SPEED: f32 = 2.0;
    /// Level on which the paddle width oscillates
    pub const PADDLE_RESIZING_LEVEL: u32 = 4;
    /// Distance from the paddle's top edge to the bottom of the screen
    pub const PADDLE_BOTTOM_OFFSET: f32 = 50.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 40.0;
    pub const INITIAL_BALL_SPEED: f32 = 18.0;
    pub const BASE_BALL_SPEED: f32 = 15.0;
    /// Launch speed multiplier over `BASE_BALL_SPEED`
    pub const LAUNCH_BOOST: f32 = 1.2;
    /// Speed gained on every paddle hit
    pub const SPEED_INCREMENT: f32 = 0.2;
    pub const MAX_BALL_SPEED: f32 = 25.0;
    /// Launch angle spread either side of vertical (degrees)
    pub const LAUNCH_SPREAD_DEG: f32 = 60.0;
    /// Maximum bounce angle from a central paddle hit (degrees)
    pub const PADDLE_BOUNCE_DEG: f32 = 50.0;
    /// Random jitter added to a central bounce (degrees)
    pub const BOUNCE_JITTER_DEG: f32 = 10.0;
    /// Random jitter added to the bounce speed
    pub const BOUNCE_SPEED_JITTER: f32 = 1.5;
    /// Side-hit horizontal magnitude jitter (fraction)
    pub const SIDE_HIT_JITTER: f32 = 0.2;
    /// Minimum vertical speed after a side hit, as a fraction of speed
    pub const SIDE_HIT_MIN_VERTICAL: f32 = 0.6;

    /// Brick defaults
    pub const BRICK_WIDTH: f32 = 100.0;
    pub const BRICK_HEIGHT: f32 = 60.0;
    pub const BRICK_TOP_MARGIN: f32 = 80.0;
    pub const RESISTANT_BRICK_INITIAL_HITS: u8 = 3;
    pub const MOVABLE_BRICK_DEFAULT_SPEED: f32 = 1.0;

    /// Smallest playfield every level layout fits in
    pub const MIN_SCREEN_WIDTH: f32 = 840.0;
    pub const MIN_SCREEN_HEIGHT: f32 = 680.0;
}
