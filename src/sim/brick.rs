//! Bricks: destructibility and motion as two independent axes

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::{Body, Contact, GameObject};
use crate::consts::*;

/// How a brick takes damage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Durability {
    /// Breaks on the first hit
    #[default]
    Plain,
    /// Breaks once `hits_remaining` reaches zero
    Resistant { hits_remaining: u8 },
    /// Absorbs every hit, doesn't count for level clear
    Unbreakable,
}

impl Durability {
    pub fn resistant() -> Self {
        Durability::Resistant {
            hits_remaining: RESISTANT_BRICK_INITIAL_HITS,
        }
    }
}

/// How a brick moves on its own
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum Motion {
    #[default]
    Static,
    /// Slides horizontally within `initial_x ± range`
    Oscillating {
        initial_x: f32,
        range: f32,
        /// +1 right, -1 left
        direction: f32,
        speed: f32,
    },
}

/// A brick entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Brick {
    pub id: u32,
    body: Body,
    durability: Durability,
    motion: Motion,
}

impl Brick {
    pub fn new(id: u32, pos: Vec2, width: f32, height: f32, durability: Durability) -> Self {
        Self {
            id,
            body: Body::rect(pos, width, height),
            durability,
            motion: Motion::Static,
        }
    }

    /// Start oscillating around the current x position. `range` is a
    /// half-width; its sign is ignored.
    pub fn with_motion(mut self, range: f32, direction: f32, speed: f32) -> Self {
        self.motion = Motion::Oscillating {
            initial_x: self.body.pos.x,
            range: range.abs(),
            direction: direction.signum(),
            speed,
        };
        self
    }

    pub fn durability(&self) -> Durability {
        self.durability
    }

    pub fn is_movable(&self) -> bool {
        matches!(self.motion, Motion::Oscillating { .. })
    }

    /// Returns true if this brick must be destroyed to clear the level
    pub fn counts_for_clear(&self) -> bool {
        self.durability != Durability::Unbreakable
    }

    pub fn hits_remaining(&self) -> Option<u8> {
        match self.durability {
            Durability::Plain => Some(u8::from(self.body.alive)),
            Durability::Resistant { hits_remaining } => Some(hits_remaining),
            Durability::Unbreakable => None,
        }
    }

    /// Damage stage for rendering: 0 untouched, grows with each hit taken
    pub fn damage_phase(&self) -> u8 {
        match self.durability {
            Durability::Resistant { hits_remaining } => {
                RESISTANT_BRICK_INITIAL_HITS.saturating_sub(hits_remaining)
            }
            _ => 0,
        }
    }

    fn oscillate(&mut self) {
        let Motion::Oscillating {
            initial_x,
            range,
            ref mut direction,
            speed,
        } = self.motion
        else {
            return;
        };

        let mut x = self.body.pos.x + *direction * speed;
        if (x - initial_x).abs() >= range {
            x = x.clamp(initial_x - range, initial_x + range);
            *direction = -*direction;
        }
        let y = self.body.pos.y;
        self.body.set_position(Vec2::new(x, y));
    }
}

impl GameObject for Brick {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn contact(&self) -> Contact<'_> {
        Contact::Brick(&self.body)
    }

    fn update(&mut self) {
        if !self.body.alive {
            return;
        }
        self.oscillate();
    }

    fn handle_collision(&mut self, other: Contact<'_>) {
        if !matches!(other, Contact::Ball(_)) || !self.body.alive {
            return;
        }
        match &mut self.durability {
            Durability::Plain => self.body.alive = false,
            Durability::Resistant { hits_remaining } => {
                *hits_remaining = hits_remaining.saturating_sub(1);
                if *hits_remaining == 0 {
                    self.body.alive = false;
                }
            }
            Durability::Unbreakable => {}
        }
    }
}
