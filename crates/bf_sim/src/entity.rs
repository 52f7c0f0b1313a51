//! Shared body shape for the player and the boss.
//!
//! Positions are the top-left corner in logical pixels with y growing
//! downward; velocities are pixels per tick.

use glam::Vec2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Player,
    Boss,
}

impl EntityKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Player => "player",
            Self::Boss => "boss",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub center_x: f32,
    pub center_y: f32,
    pub half_w: f32,
    pub half_h: f32,
}

impl Aabb {
    pub fn overlaps(&self, other: &Aabb) -> bool {
        (self.center_x - other.center_x).abs() < self.half_w + other.half_w
            && (self.center_y - other.center_y).abs() < self.half_h + other.half_h
    }

    pub fn distance_to_point(&self, p: Vec2) -> f32 {
        let dx = ((p.x - self.center_x).abs() - self.half_w).max(0.0);
        let dy = ((p.y - self.center_y).abs() - self.half_h).max(0.0);
        (dx * dx + dy * dy).sqrt()
    }
}

/// Result of [`Body::apply_damage`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DamageOutcome {
    pub dealt: f32,
    /// Set only on the hit that brought health to zero.
    pub killed: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub kind: EntityKind,
    pub pos: Vec2,
    pub vel: Vec2,
    pub width: f32,
    pub height: f32,
    health: f32,
    max_health: f32,
    dead: bool,
    pub facing_right: bool,
    /// Remaining freeze ticks. While nonzero the owner skips its update.
    pub hit_stop: u32,
}

impl Body {
    pub fn new(kind: EntityKind, pos: Vec2, width: f32, height: f32, max_health: f32) -> Self {
        Self {
            kind,
            pos,
            vel: Vec2::ZERO,
            width,
            height,
            health: max_health,
            max_health,
            dead: false,
            facing_right: kind == EntityKind::Player,
            hit_stop: 0,
        }
    }

    pub fn health(&self) -> f32 {
        self.health
    }

    pub fn max_health(&self) -> f32 {
        self.max_health
    }

    pub fn is_dead(&self) -> bool {
        self.dead
    }

    /// Subtracts `amount` from health, clamping at zero. Death is terminal:
    /// a dead body ignores further damage.
    pub fn apply_damage(&mut self, amount: f32) -> DamageOutcome {
        if self.dead || amount <= 0.0 {
            return DamageOutcome {
                dealt: 0.0,
                killed: false,
            };
        }
        let before = self.health;
        self.health = (self.health - amount).max(0.0);
        let killed = self.health <= 0.0;
        if killed {
            self.health = 0.0;
            self.dead = true;
        }
        DamageOutcome {
            dealt: before - self.health,
            killed,
        }
    }

    /// Test and scenario setup hook. Never revives a dead body.
    pub fn set_health(&mut self, health: f32) {
        if self.dead {
            return;
        }
        self.health = health.clamp(0.0, self.max_health);
        if self.health <= 0.0 {
            self.dead = true;
        }
    }

    pub fn is_frozen(&self) -> bool {
        self.hit_stop > 0
    }

    /// Extends the freeze to at least `ticks`.
    pub fn freeze(&mut self, ticks: u32) {
        self.hit_stop = self.hit_stop.max(ticks);
    }

    /// Consumes one tick of hitstop. Returns true when this tick is frozen.
    pub fn tick_hit_stop(&mut self) -> bool {
        if self.hit_stop > 0 {
            self.hit_stop -= 1;
            true
        } else {
            false
        }
    }

    pub fn left(&self) -> f32 {
        self.pos.x
    }

    pub fn right(&self) -> f32 {
        self.pos.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.pos.y + self.height
    }

    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::new(self.width * 0.5, self.height * 0.5)
    }

    pub fn aabb(&self) -> Aabb {
        let c = self.center();
        Aabb {
            center_x: c.x,
            center_y: c.y,
            half_w: self.width * 0.5,
            half_h: self.height * 0.5,
        }
    }

    pub fn on_ground(&self, ground_y: f32) -> bool {
        self.bottom() >= ground_y - 0.5
    }

    pub fn height_above_ground(&self, ground_y: f32) -> f32 {
        (ground_y - self.bottom()).max(0.0)
    }

    /// Applies gravity and velocity, then clamps to the floor and arena walls.
    /// Returns true when the body is standing on the ground afterwards.
    pub fn integrate(&mut self, gravity: f32, max_fall: f32, ground_y: f32, arena_width: f32) -> bool {
        self.vel.y = (self.vel.y + gravity).min(max_fall);
        self.pos += self.vel;

        let mut grounded = false;
        if self.bottom() >= ground_y {
            self.pos.y = ground_y - self.height;
            if self.vel.y > 0.0 {
                self.vel.y = 0.0;
            }
            grounded = true;
        }

        let max_x = (arena_width - self.width).max(0.0);
        if self.pos.x < 0.0 || self.pos.x > max_x {
            self.pos.x = self.pos.x.clamp(0.0, max_x);
            self.vel.x = 0.0;
        }
        grounded
    }
}

pub(crate) fn move_towards(current: f32, target: f32, max_delta: f32) -> f32 {
    if (target - current).abs() <= max_delta {
        target
    } else if target > current {
        current + max_delta
    } else {
        current - max_delta
    }
}
