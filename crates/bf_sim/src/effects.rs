//! Visual-only state: particles and screen shake. Advances every tick, even
//! while combatants are frozen in hitstop, and never feeds back into combat.

use glam::Vec2;

use crate::rng::{AiRng, SeededRng};

pub type Rgba = [f32; 4];

pub const SPARK: Rgba = [1.0, 0.9, 0.5, 1.0];
pub const BLOOD: Rgba = [0.8, 0.1, 0.15, 1.0];
pub const FROST: Rgba = [0.55, 0.85, 1.0, 1.0];
pub const DUST: Rgba = [0.6, 0.55, 0.45, 1.0];

const LIFE_DECAY: f32 = 0.02;
const PARTICLE_GRAVITY: f32 = 0.15;
const SHAKE_DECAY: f32 = 0.9;
const MAX_PARTICLES: usize = 1024;

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// 1.0 at spawn, removed once it reaches 0.
    pub life: f32,
    pub color: Rgba,
    pub size: f32,
}

pub struct Effects {
    particles: Vec<Particle>,
    shake: f32,
    rng: SeededRng,
}

impl Effects {
    pub fn new(seed: u64) -> Self {
        Self {
            particles: Vec::new(),
            shake: 0.0,
            rng: SeededRng::new(seed),
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn shake(&self) -> f32 {
        self.shake
    }

    /// Raises shake to at least `intensity`.
    pub fn add_shake(&mut self, intensity: f32) {
        self.shake = self.shake.max(intensity);
    }

    pub fn burst(&mut self, origin: Vec2, count: usize, color: Rgba, speed: f32) {
        for _ in 0..count {
            if self.particles.len() >= MAX_PARTICLES {
                break;
            }
            let angle = self.rng.unit() * std::f32::consts::TAU;
            let s = speed * self.rng.range(0.3, 1.0);
            self.particles.push(Particle {
                pos: origin,
                vel: Vec2::new(angle.cos() * s, angle.sin() * s),
                life: 1.0,
                color,
                size: self.rng.range(2.0, 5.0),
            });
        }
    }

    pub fn step(&mut self) {
        for p in &mut self.particles {
            p.pos += p.vel;
            p.vel.y += PARTICLE_GRAVITY;
            p.life -= LIFE_DECAY;
        }
        self.particles.retain(|p| p.life > 0.0);

        self.shake *= SHAKE_DECAY;
        if self.shake < 0.1 {
            self.shake = 0.0;
        }
    }
}
