//! The ball: free flight, paddle-stick state and bounce responses

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::body::{Body, Contact, GameObject};
use super::collider::Rect;
use super::paddle::Paddle;
use super::vector::{VectorOps, from_vertical};
use crate::consts::*;

/// Which face of a brick the ball was resolved against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Face {
    Top,
    Bottom,
    Left,
    Right,
}

/// Circular body bouncing around the playfield.
///
/// While stuck the ball rides centered on top of the paddle with zero
/// velocity; `launch` frees it. Jitter on launches and bounces comes from a
/// seeded `Pcg32`, so a match replays identically for a given seed.
#[derive(Debug, Clone)]
pub struct Ball {
    body: Body,
    radius: f32,
    stuck_to_paddle: bool,
    /// Set when the last update bounced off a wall
    hit_wall: bool,
    screen_width: f32,
    screen_height: f32,
    rng: Pcg32,
}

impl Ball {
    pub fn new(screen_width: f32, screen_height: f32, seed: u64) -> Self {
        let mut ball = Self {
            body: Body::circle(Vec2::ZERO, BALL_RADIUS),
            radius: BALL_RADIUS,
            stuck_to_paddle: true,
            hit_wall: false,
            screen_width,
            screen_height,
            rng: Pcg32::seed_from_u64(seed),
        };
        ball.reset_position();
        ball
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    #[inline]
    pub fn is_stuck_to_paddle(&self) -> bool {
        self.stuck_to_paddle
    }

    #[inline]
    pub fn current_speed(&self) -> f32 {
        self.body.vel.magnitude()
    }

    pub fn set_alive(&mut self, alive: bool) {
        self.body.alive = alive;
    }

    /// Snap onto the paddle and hold still until launched
    pub fn stick_to(&mut self, paddle: &Paddle) {
        self.stuck_to_paddle = true;
        self.follow(paddle);
    }

    /// Mark stuck and stop in place; the next update snaps onto the paddle
    pub fn hold(&mut self) {
        self.stuck_to_paddle = true;
        self.body.vel = Vec2::ZERO;
    }

    fn follow(&mut self, paddle: &Paddle) {
        self.body.vel = Vec2::ZERO;
        let top = paddle.body().pos.y;
        self.body.set_position(Vec2::new(
            paddle.center_x() - self.radius,
            top - self.radius * 2.0,
        ));
    }

    /// Per-tick update. Returns true when the ball bounced off a wall.
    pub fn update_with_paddle(&mut self, paddle: &Paddle) -> bool {
        self.hit_wall = false;
        if !self.body.alive {
            return false;
        }
        if self.stuck_to_paddle {
            self.follow(paddle);
            return false;
        }
        self.advance();
        self.hit_wall
    }

    /// True if the most recent update bounced off a wall
    #[inline]
    pub fn hit_wall(&self) -> bool {
        self.hit_wall
    }

    fn advance(&mut self) {
        self.hit_wall = false;
        if !self.body.alive {
            return;
        }
        self.body.integrate();
        self.hit_wall = self.check_bounds();
    }

    /// Free the ball at a random angle within `LAUNCH_SPREAD_DEG` of
    /// vertical, always upward. No effect unless stuck.
    pub fn launch(&mut self) -> bool {
        if !self.stuck_to_paddle {
            return false;
        }
        self.stuck_to_paddle = false;
        let speed = BASE_BALL_SPEED * LAUNCH_BOOST;
        let angle = self
            .rng
            .random_range(-LAUNCH_SPREAD_DEG..=LAUNCH_SPREAD_DEG);
        self.body.vel = from_vertical(speed, angle);
        log::debug!("Ball launched at {angle:.1} deg");
        true
    }

    /// Center the ball on screen and revive it
    pub fn reset_position(&mut self) {
        self.body.set_position(Vec2::new(
            self.screen_width / 2.0 - self.radius,
            self.screen_height / 2.0 - self.radius,
        ));
        self.body.alive = true;
    }

    /// Restore the initial speed and direction (up and to the right)
    pub fn reset_velocity(&mut self) {
        self.body.vel = Vec2::new(INITIAL_BALL_SPEED, -INITIAL_BALL_SPEED);
    }

    /// Walls bounce, the floor kills. Returns true on a wall bounce.
    pub fn check_bounds(&mut self) -> bool {
        let diameter = self.radius * 2.0;
        let mut bounced = false;
        let mut pos = self.body.pos;

        if pos.x <= 0.0 || pos.x + diameter >= self.screen_width {
            self.body.vel.x = if pos.x <= 0.0 {
                self.body.vel.x.abs()
            } else {
                -self.body.vel.x.abs()
            };
            pos.x = pos.x.clamp(0.0, (self.screen_width - diameter).max(0.0));
            bounced = true;
        }

        if pos.y <= 0.0 {
            self.body.vel.y = self.body.vel.y.abs();
            pos.y = 0.0;
            bounced = true;
        }

        if bounced {
            self.body.set_position(pos);
        }

        if pos.y >= self.screen_height {
            self.body.alive = false;
        }

        bounced
    }

    fn handle_paddle_collision(&mut self, paddle: &Body) {
        let bounds = paddle.bounding_box();
        let center_x = self.body.center().x;
        let speed = (self.current_speed() + SPEED_INCREMENT).min(MAX_BALL_SPEED);

        if center_x >= bounds.x && center_x <= bounds.right() {
            self.handle_central_hit(paddle, speed);
        } else {
            self.handle_side_hit(speed);
        }
    }

    /// Bounce angle follows where the ball landed on the paddle
    fn handle_central_hit(&mut self, paddle: &Body, speed: f32) {
        let half_width = paddle.width / 2.0;
        let relative_hit =
            ((self.body.center().x - paddle.center().x) / half_width).clamp(-1.0, 1.0);

        let speed = (speed
            + self
                .rng
                .random_range(-BOUNCE_SPEED_JITTER..=BOUNCE_SPEED_JITTER))
        .clamp(SPEED_INCREMENT, MAX_BALL_SPEED);
        let jitter = self
            .rng
            .random_range(-BOUNCE_JITTER_DEG..=BOUNCE_JITTER_DEG);
        let angle = relative_hit * PADDLE_BOUNCE_DEG + jitter;

        self.body.vel = from_vertical(speed, angle);
    }

    /// Clipped the paddle's side: reverse both axes, keep enough vertical
    /// speed to avoid a near-horizontal stall
    fn handle_side_hit(&mut self, speed: f32) {
        let jitter = 1.0 + self.rng.random_range(-SIDE_HIT_JITTER..=SIDE_HIT_JITTER);
        let vel = &mut self.body.vel;
        vel.x = -vel.x * jitter;
        vel.y = -vel.y;

        let min_vertical = speed * SIDE_HIT_MIN_VERTICAL;
        if vel.y.abs() < min_vertical {
            vel.y = if vel.y < 0.0 {
                -min_vertical
            } else {
                min_vertical
            };
        }
    }

    /// Resolve against the face the ball approached from, judged by where its
    /// center was before this tick's motion. Falls back to the nearest edge
    /// when the ball was already overlapping.
    fn handle_brick_collision(&mut self, brick: &Body) -> Face {
        let bounds = brick.bounding_box();
        let r = self.radius;
        let prev_center = self.body.center() - self.body.vel;

        let face = if prev_center.y + r <= bounds.y {
            Face::Top
        } else if prev_center.y - r >= bounds.bottom() {
            Face::Bottom
        } else if prev_center.x + r <= bounds.x {
            Face::Left
        } else if prev_center.x - r >= bounds.right() {
            Face::Right
        } else {
            self.nearest_face(&bounds)
        };

        self.push_out(face, &bounds);
        face
    }

    fn nearest_face(&self, bounds: &Rect) -> Face {
        let center = self.body.center();
        let to_left = (center.x - bounds.x).abs();
        let to_right = (center.x - bounds.right()).abs();
        let to_top = (center.y - bounds.y).abs();
        let to_bottom = (center.y - bounds.bottom()).abs();

        let min = to_left.min(to_right).min(to_top.min(to_bottom));
        if min == to_left {
            Face::Left
        } else if min == to_right {
            Face::Right
        } else if min == to_top {
            Face::Top
        } else {
            Face::Bottom
        }
    }

    fn push_out(&mut self, face: Face, bounds: &Rect) {
        let diameter = self.radius * 2.0;
        let mut pos = self.body.pos;
        let vel = &mut self.body.vel;
        match face {
            Face::Top => {
                vel.y = -vel.y.abs();
                pos.y = bounds.y - diameter;
            }
            Face::Bottom => {
                vel.y = vel.y.abs();
                pos.y = bounds.bottom();
            }
            Face::Left => {
                vel.x = -vel.x.abs();
                pos.x = bounds.x - diameter;
            }
            Face::Right => {
                vel.x = vel.x.abs();
                pos.x = bounds.right();
            }
        }
        self.body.set_position(pos);
    }
}

impl GameObject for Ball {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn contact(&self) -> Contact<'_> {
        Contact::Ball(&self.body)
    }

    /// Free flight only; a stuck ball needs the paddle (`update_with_paddle`)
    fn update(&mut self) {
        self.hit_wall = false;
        if !self.stuck_to_paddle {
            self.advance();
        }
    }

    fn handle_collision(&mut self, other: Contact<'_>) {
        match other {
            Contact::Paddle(paddle) => self.handle_paddle_collision(paddle),
            Contact::Brick(brick) => {
                let face = self.handle_brick_collision(brick);
                log::debug!("Ball resolved against brick {face:?} face");
            }
            Contact::Ball(_) => {}
        }
    }
}
