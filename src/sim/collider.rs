//! Collision shapes
//!
//! Every entity owns one `Collider`: an axis-aligned rectangle (paddle,
//! bricks) or a circle (ball). Intersection is two-phase for circles: a cheap
//! bounding-box rejection first, then the exact circle-vs-box test.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned box, top-left origin, y grows downward
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Strict overlap: boxes that only share an edge do not intersect
    #[inline]
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Closest point inside the box to `p`
    #[inline]
    pub fn clamp_point(&self, p: Vec2) -> Vec2 {
        Vec2::new(p.x.clamp(self.x, self.right()), p.y.clamp(self.y, self.bottom()))
    }
}

/// Rectangle collider anchored at its top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RectCollider {
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
}

/// Circle collider anchored at its center
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CircleCollider {
    pub center: Vec2,
    pub radius: f32,
}

impl CircleCollider {
    pub fn bounding_box(&self) -> Rect {
        Rect::new(
            self.center.x - self.radius,
            self.center.y - self.radius,
            self.radius * 2.0,
            self.radius * 2.0,
        )
    }

    /// Two-phase circle-vs-box test
    pub fn intersects_box(&self, other: &Rect) -> bool {
        if !self.bounding_box().intersects(other) {
            return false;
        }
        let closest = other.clamp_point(self.center);
        self.center.distance_squared(closest) < self.radius * self.radius
    }
}

/// Shape attached to a game object
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Collider {
    Rect(RectCollider),
    Circle(CircleCollider),
}

impl Collider {
    pub fn rect(pos: Vec2, width: f32, height: f32) -> Self {
        Collider::Rect(RectCollider { pos, width, height })
    }

    pub fn circle(center: Vec2, radius: f32) -> Self {
        Collider::Circle(CircleCollider { center, radius })
    }

    /// Relocate the shape (top-left for rectangles, center for circles)
    pub fn update_position(&mut self, pos: Vec2) {
        match self {
            Collider::Rect(r) => r.pos = pos,
            Collider::Circle(c) => c.center = pos,
        }
    }

    /// Resize the shape to fit a `width` x `height` box
    pub fn update_size(&mut self, width: f32, height: f32) {
        match self {
            Collider::Rect(r) => {
                r.width = width;
                r.height = height;
            }
            Collider::Circle(c) => c.radius = width.min(height) / 2.0,
        }
    }

    /// Axis-aligned box enclosing the shape
    pub fn bounding_box(&self) -> Rect {
        match self {
            Collider::Rect(r) => Rect::new(r.pos.x, r.pos.y, r.width, r.height),
            Collider::Circle(c) => c.bounding_box(),
        }
    }

    /// Overlap test. Pairs involving a circle always run the precise
    /// circle-vs-box test, whichever side the circle is on.
    pub fn intersects(&self, other: &Collider) -> bool {
        match (self, other) {
            (Collider::Circle(c), _) => c.intersects_box(&other.bounding_box()),
            (_, Collider::Circle(c)) => c.intersects_box(&self.bounding_box()),
            (Collider::Rect(_), Collider::Rect(_)) => {
                self.bounding_box().intersects(&other.bounding_box())
            }
        }
    }
}
