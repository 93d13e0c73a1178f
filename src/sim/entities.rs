//! Player, enemy and bullet entities
//!
//! All three share the [`Bounded`] capability (position + size, used for
//! bounds checks and collisions). Enemies and bullets drift on their own and
//! also implement [`Movable`]; the player is steered by input instead.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use super::spawn::SlotId;
use crate::ms_to_secs;
use crate::settings::{BulletTuning, EnemyTuning, FieldGeometry, PlayerTuning};

/// Entity handle used by the renderer. 0 means "not yet registered".
pub type EntityId = u32;

/// Anything with a box on the field
pub trait Bounded {
    /// Top-left corner
    fn pos(&self) -> Vec2;
    /// Width/height, fixed after construction
    fn size(&self) -> Vec2;

    fn aabb(&self) -> Aabb {
        Aabb::new(self.pos(), self.size())
    }

    fn center(&self) -> Vec2 {
        self.pos() + self.size() / 2.0
    }

    /// True once the box has fully left the field expanded by its own size.
    /// Exact equality on an edge still counts as out.
    fn is_out_of_bounds(&self, field: &FieldGeometry) -> bool {
        let pos = self.pos();
        let size = self.size();
        let in_y = -size.y < pos.y && pos.y < field.height + size.y;
        let in_x = -size.x < pos.x && pos.x < field.width + size.x;
        !(in_x && in_y)
    }
}

/// Entities that drift with a fixed velocity
pub trait Movable: Bounded {
    /// Advance by `dt_ms` milliseconds
    fn advance(&mut self, dt_ms: f32);
}

/// Which side fired a bullet (and therefore which side it can hurt)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Player,
    Enemy,
}

/// Horizontal steering input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
    Idle,
}

/// Fire-rate limiter shared by everything that shoots
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cooldown {
    /// Minimum milliseconds between two shots
    pub period: f32,
    /// Milliseconds accumulated since the last shot
    pub elapsed: f32,
}

impl Cooldown {
    pub fn new(period: f32) -> Self {
        Self {
            period,
            elapsed: 0.0,
        }
    }

    /// Start part-way through the window
    pub fn primed(period: f32, elapsed: f32) -> Self {
        Self { period, elapsed }
    }

    /// Let time pass without trying to fire
    #[inline]
    pub fn accumulate(&mut self, dt_ms: f32) {
        self.elapsed += dt_ms;
    }

    /// Accumulate and report whether a shot is allowed now
    pub fn try_fire(&mut self, dt_ms: f32) -> bool {
        self.accumulate(dt_ms);
        if self.elapsed >= self.period {
            self.elapsed = 0.0;
            true
        } else {
            false
        }
    }
}

/// A projectile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bullet {
    pub id: EntityId,
    pub pos: Vec2,
    pub size: Vec2,
    /// Render colour (0xRRGGBB)
    pub color: u32,
    pub vel: Vec2,
}

impl Bullet {
    pub fn new(pos: Vec2, size: Vec2, color: u32, vel: Vec2) -> Self {
        Self {
            id: 0,
            pos,
            size,
            color,
            vel,
        }
    }

    /// Upward bullets belong to the player, downward ones to enemies.
    /// A bullet with no vertical motion hurts nobody.
    pub fn side(&self) -> Option<Side> {
        if self.vel.y < 0.0 {
            Some(Side::Player)
        } else if self.vel.y > 0.0 {
            Some(Side::Enemy)
        } else {
            None
        }
    }
}

impl Bounded for Bullet {
    fn pos(&self) -> Vec2 {
        self.pos
    }
    fn size(&self) -> Vec2 {
        self.size
    }
}

impl Movable for Bullet {
    fn advance(&mut self, dt_ms: f32) {
        self.pos += self.vel * ms_to_secs(dt_ms);
    }
}

/// The player's ship
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: EntityId,
    pub pos: Vec2,
    pub size: Vec2,
    /// Horizontal speed (pixels/s)
    pub speed: f32,
    pub cooldown: Cooldown,
    pub bullet_velocity: Vec2,
    pub exploded: bool,
    /// Right-most allowed x
    max_x: f32,
    tuning: PlayerTuning,
    bullet: BulletTuning,
}

impl Player {
    pub fn new(tuning: &PlayerTuning, bullet: &BulletTuning, field: &FieldGeometry) -> Self {
        Self {
            id: 0,
            pos: tuning.start(),
            size: tuning.size(),
            speed: tuning.speed,
            cooldown: Cooldown::new(tuning.firing_cooldown),
            bullet_velocity: Vec2::new(0.0, tuning.bullet_speed),
            exploded: false,
            max_x: (field.width - tuning.width).max(0.0),
            tuning: tuning.clone(),
            bullet: bullet.clone(),
        }
    }

    /// Steer horizontally, clamped to the field
    pub fn steer(&mut self, direction: Direction, dt_ms: f32) {
        let delta = self.speed * ms_to_secs(dt_ms);
        match direction {
            Direction::Left => self.pos.x = (self.pos.x - delta).max(0.0),
            Direction::Right => self.pos.x = (self.pos.x + delta).min(self.max_x),
            Direction::Idle => {}
        }
    }

    /// Fire if the cooldown has elapsed
    pub fn shoot_if_ready(&mut self, dt_ms: f32) -> Option<Bullet> {
        if self.cooldown.try_fire(dt_ms) {
            Some(self.shoot())
        } else {
            None
        }
    }

    /// Keep the cooldown running while the fire key is up
    pub fn refresh_cooldown(&mut self, dt_ms: f32) {
        self.cooldown.accumulate(dt_ms);
    }

    fn shoot(&self) -> Bullet {
        let size = self.bullet.size();
        Bullet::new(
            Vec2::new(self.center().x - size.x / 2.0, self.pos.y - size.y / 2.0),
            size,
            self.bullet.color,
            self.bullet_velocity,
        )
    }

    /// Faster ship, faster bullets, shorter cooldown
    pub fn level_up(&mut self) {
        let t = &self.tuning;
        self.speed = (self.speed * t.speed_growth).round();
        self.cooldown.period = (self.cooldown.period * t.cooldown_decay)
            .round()
            .max(t.min_cooldown);
        self.bullet_velocity.y = (self.bullet_velocity.y * t.bullet_growth)
            .round()
            .max(-t.max_bullet_speed);
    }

    pub fn explode(&mut self) {
        self.exploded = true;
    }

    /// Back to the start position with level 1 stats
    pub fn reset(&mut self) {
        let t = &self.tuning;
        self.pos = t.start();
        self.speed = t.speed;
        self.cooldown = Cooldown::new(t.firing_cooldown);
        self.bullet_velocity = Vec2::new(0.0, t.bullet_speed);
        self.exploded = false;
    }
}

impl Bounded for Player {
    fn pos(&self) -> Vec2 {
        self.pos
    }
    fn size(&self) -> Vec2 {
        self.size
    }
}

/// An enemy ship
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub id: EntityId,
    pub pos: Vec2,
    pub size: Vec2,
    pub vel: Vec2,
    pub cooldown: Cooldown,
    /// Slot to hand back to the pool on removal
    pub slot: SlotId,
    pub exploded: bool,
    bullet: BulletTuning,
    bullet_speed_factor: f32,
}

impl Enemy {
    pub fn new(
        pos: Vec2,
        vel: Vec2,
        firing_cooldown: f32,
        slot: SlotId,
        tuning: &EnemyTuning,
        bullet: &BulletTuning,
    ) -> Self {
        Self {
            id: 0,
            pos,
            size: tuning.size(),
            vel,
            // First shot comes after half a window
            cooldown: Cooldown::primed(firing_cooldown, firing_cooldown / 2.0),
            slot,
            exploded: false,
            bullet: bullet.clone(),
            bullet_speed_factor: tuning.bullet_speed_factor,
        }
    }

    /// Fire downward from the bottom-centre if the cooldown has elapsed
    pub fn shoot_if_ready(&mut self, dt_ms: f32) -> Option<Bullet> {
        if !self.cooldown.try_fire(dt_ms) {
            return None;
        }
        let size = self.bullet.size();
        Some(Bullet::new(
            Vec2::new(
                self.center().x - size.x / 2.0,
                self.pos.y + self.size.y - size.y / 2.0,
            ),
            size,
            self.bullet.color,
            Vec2::new(0.0, self.vel.y * self.bullet_speed_factor),
        ))
    }

    pub fn explode(&mut self) {
        self.exploded = true;
    }
}

impl Bounded for Enemy {
    fn pos(&self) -> Vec2 {
        self.pos
    }
    fn size(&self) -> Vec2 {
        self.size
    }
}

impl Movable for Enemy {
    fn advance(&mut self, dt_ms: f32) {
        self.pos += self.vel * ms_to_secs(dt_ms);
    }
}
