//! 2D vector primitive
//!
//! Positions and velocities are plain `glam::Vec2`. `VectorOps` adds the
//! in-place, chainable arithmetic the entities use during integration.

use glam::Vec2;

/// Coordinate primitive used for every position and velocity
pub type Vector2D = Vec2;

/// In-place vector arithmetic returning `&mut Self` for chaining
pub trait VectorOps {
    /// `self += other`
    fn offset(&mut self, other: Vec2) -> &mut Self;
    /// `self -= other`
    fn subtract(&mut self, other: Vec2) -> &mut Self;
    /// `self *= scalar`
    fn multiply(&mut self, scalar: f32) -> &mut Self;
    /// Euclidean norm
    fn magnitude(&self) -> f32;
    /// Scale to unit length; zero vectors are left untouched
    fn normalize_in_place(&mut self) -> &mut Self;
}

impl VectorOps for Vec2 {
    #[inline]
    fn offset(&mut self, other: Vec2) -> &mut Self {
        *self += other;
        self
    }

    #[inline]
    fn subtract(&mut self, other: Vec2) -> &mut Self {
        *self -= other;
        self
    }

    #[inline]
    fn multiply(&mut self, scalar: f32) -> &mut Self {
        *self *= scalar;
        self
    }

    #[inline]
    fn magnitude(&self) -> f32 {
        self.length()
    }

    fn normalize_in_place(&mut self) -> &mut Self {
        let mag = self.length();
        if mag != 0.0 {
            *self /= mag;
        }
        self
    }
}

/// Vector at `angle_deg` from straight up (screen y grows downward)
#[inline]
pub fn from_vertical(speed: f32, angle_deg: f32) -> Vec2 {
    let angle = angle_deg.to_radians();
    Vec2::new(speed * angle.sin(), -speed * angle.cos())
}
