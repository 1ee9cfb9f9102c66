//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed step per `Game::update` call
//! - Seeded RNG only
//! - Stable iteration order (bricks keep layout order and ids)
//! - No rendering, audio or platform dependencies

pub mod ball;
pub mod body;
pub mod brick;
pub mod collider;
pub mod events;
pub mod levels;
pub mod paddle;
pub mod state;
pub mod tick;
pub mod vector;

pub use ball::{Ball, Face};
pub use body::{Body, Contact, GameObject};
pub use brick::{Brick, Durability, Motion};
pub use collider::{CircleCollider, Collider, Rect, RectCollider};
pub use events::{AudioSink, GameEvent, GameListener, SoundCue};
pub use levels::{Level, generate_level};
pub use paddle::Paddle;
pub use state::{BallView, BrickView, Game, GamePhase, Snapshot};
pub use tick::{Command, autopilot};
pub use vector::{Vector2D, VectorOps, from_vertical};
