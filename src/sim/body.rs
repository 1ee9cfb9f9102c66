//! Shared entity state and the game-object contract

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collider::{Collider, Rect};
use super::vector::VectorOps;

/// Position, velocity, size, liveness and the owned collider of an entity.
///
/// `pos` is always the top-left corner of the entity's box; the collider is
/// re-anchored from it after every mutation so it never lags a frame behind.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Body {
    pub pos: Vec2,
    pub vel: Vec2,
    pub width: f32,
    pub height: f32,
    pub alive: bool,
    collider: Collider,
}

impl Body {
    /// Rectangular body with top-left corner at `pos`
    pub fn rect(pos: Vec2, width: f32, height: f32) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            width,
            height,
            alive: true,
            collider: Collider::rect(pos, width, height),
        }
    }

    /// Circular body whose bounding square has its top-left corner at `pos`
    pub fn circle(pos: Vec2, radius: f32) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            width: radius * 2.0,
            height: radius * 2.0,
            alive: true,
            collider: Collider::circle(pos + Vec2::splat(radius), radius),
        }
    }

    pub fn collider(&self) -> &Collider {
        &self.collider
    }

    /// Re-anchor the collider on the current position
    pub fn sync_collider(&mut self) {
        let anchor = match self.collider {
            Collider::Rect(_) => self.pos,
            Collider::Circle(c) => self.pos + Vec2::splat(c.radius),
        };
        self.collider.update_position(anchor);
    }

    /// Euler step; dead bodies never move
    pub fn integrate(&mut self) {
        if !self.alive {
            return;
        }
        self.pos.offset(self.vel);
        self.sync_collider();
    }

    pub fn set_position(&mut self, pos: Vec2) {
        self.pos = pos;
        self.sync_collider();
    }

    pub fn set_size(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
        self.collider.update_size(width, height);
        self.sync_collider();
    }

    /// False if either side is dead, otherwise a collider intersection test
    pub fn collides_with(&self, other: &Body) -> bool {
        if !self.alive || !other.alive {
            return false;
        }
        self.collider.intersects(&other.collider)
    }

    pub fn bounding_box(&self) -> Rect {
        self.collider.bounding_box()
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}

/// What an entity sees of the object it collided with
#[derive(Debug, Clone, Copy)]
pub enum Contact<'a> {
    Ball(&'a Body),
    Paddle(&'a Body),
    Brick(&'a Body),
}

/// Common behavior of every simulated entity.
///
/// `handle_collision` is the only place a collision mutates state; the
/// intersection test itself is side-effect free.
pub trait GameObject {
    fn body(&self) -> &Body;

    fn body_mut(&mut self) -> &mut Body;

    /// How this object presents itself to the other side of a collision
    fn contact(&self) -> Contact<'_>;

    /// Per-tick motion
    fn update(&mut self) {
        self.body_mut().integrate();
    }

    fn handle_collision(&mut self, other: Contact<'_>);

    fn is_alive(&self) -> bool {
        self.body().alive
    }

    fn collides_with(&self, other: &dyn GameObject) -> bool {
        self.body().collides_with(other.body())
    }
}
