//! The player's paddle

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::{Body, Contact, GameObject};
use crate::consts::*;

/// Player-controlled rectangle along the bottom of the playfield
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    body: Body,
    /// Right bound for clamping
    screen_width: f32,
    /// Horizontal speed applied by `move_left`/`move_right`
    speed: f32,
    /// Periodic width oscillation (level 4)
    resizing_enabled: bool,
    /// +1 growing, -1 shrinking
    size_change_direction: f32,
}

impl Paddle {
    /// Paddle centered horizontally, `PADDLE_BOTTOM_OFFSET` above the bottom
    pub fn new(screen_width: f32, screen_height: f32, speed_multiplier: f32) -> Self {
        let pos = Vec2::new(
            (screen_width - INITIAL_PADDLE_WIDTH) / 2.0,
            screen_height - PADDLE_BOTTOM_OFFSET,
        );
        Self {
            body: Body::rect(pos, INITIAL_PADDLE_WIDTH, PADDLE_HEIGHT),
            screen_width,
            speed: PADDLE_SPEED * speed_multiplier,
            resizing_enabled: false,
            size_change_direction: -1.0,
        }
    }

    pub fn move_left(&mut self) {
        self.body.vel.x = -self.speed;
    }

    pub fn move_right(&mut self) {
        self.body.vel.x = self.speed;
    }

    pub fn stop(&mut self) {
        self.body.vel.x = 0.0;
    }

    pub fn enable_resizing(&mut self, enable: bool) {
        self.resizing_enabled = enable;
    }

    pub fn resizing_enabled(&self) -> bool {
        self.resizing_enabled
    }

    /// Shrink by `amount`, never below the base width `PADDLE_ORIGINAL_WIDTH`
    pub fn reduce_size(&mut self, amount: f32) {
        let width = (self.body.width - amount).max(PADDLE_ORIGINAL_WIDTH);
        let height = self.body.height;
        self.body.set_size(width, height);
        self.clamp_to_screen();
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.body.width
    }

    #[inline]
    pub fn center_x(&self) -> f32 {
        self.body.pos.x + self.body.width / 2.0
    }

    fn clamp_to_screen(&mut self) {
        let max_x = (self.screen_width - self.body.width).max(0.0);
        let x = self.body.pos.x.clamp(0.0, max_x);
        if x != self.body.pos.x {
            self.body.set_position(Vec2::new(x, self.body.pos.y));
        }
    }

    /// One resize step: width walks toward the active bound and turns around
    /// once it reaches it
    fn update_size(&mut self) {
        if !self.resizing_enabled {
            return;
        }
        let mut width = self.body.width + self.size_change_direction * PADDLE_RESIZE_SPEED;
        if width <= PADDLE_MIN_WIDTH || width >= PADDLE_ORIGINAL_WIDTH {
            self.size_change_direction = -self.size_change_direction;
            width = width.clamp(PADDLE_MIN_WIDTH, PADDLE_ORIGINAL_WIDTH);
        }
        let height = self.body.height;
        self.body.set_size(width, height);
    }
}

impl GameObject for Paddle {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn contact(&self) -> Contact<'_> {
        Contact::Paddle(&self.body)
    }

    fn update(&mut self) {
        self.body.integrate();
        self.clamp_to_screen();
        self.update_size();
        self.clamp_to_screen();
    }

    /// The ball owns bounce logic; the paddle never reacts
    fn handle_collision(&mut self, _other: Contact<'_>) {}
}
