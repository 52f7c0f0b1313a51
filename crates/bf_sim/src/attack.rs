//! Player attack table and per-swing hit bookkeeping.
//!
//! Every swing carries an [`ActiveAttack`]: the attack kind, the number of
//! gameplay ticks since it started, and a [`HitLedger`] that decides whether
//! another hit may register. Active-frame windows are measured in those ticks,
//! never in presentation frames.

use glam::Vec2;
use serde::Deserialize;

use crate::entity::{Aabb, Body};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttackKind {
    Light1,
    Light2,
    /// Launcher: lifts the player into the air.
    Light3,
    /// Finisher slam: short hop, then a dive.
    Light4,
    AirSpin,
    Heavy,
}

impl AttackKind {
    pub fn from_combo_step(step: u8) -> Option<Self> {
        match step {
            1 => Some(Self::Light1),
            2 => Some(Self::Light2),
            3 => Some(Self::Light3),
            4 => Some(Self::Light4),
            _ => None,
        }
    }

    pub fn combo_step(self) -> Option<u8> {
        match self {
            Self::Light1 => Some(1),
            Self::Light2 => Some(2),
            Self::Light3 => Some(3),
            Self::Light4 => Some(4),
            Self::AirSpin | Self::Heavy => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Light1 => "light_1",
            Self::Light2 => "light_2",
            Self::Light3 => "light_3",
            Self::Light4 => "light_4",
            Self::AirSpin => "air_spin",
            Self::Heavy => "heavy",
        }
    }
}

impl std::fmt::Display for AttackKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Hitbox shape relative to the attacker.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum Reach {
    /// Box starting at the attacker's leading edge, extending `range` in the
    /// facing direction, `height` tall and centered on the attacker.
    Box { range: f32, height: f32 },
    /// Circle around the attacker's center.
    Radius { radius: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum HitMode {
    Single,
    /// One hit per `segment_ticks` slice of the active window.
    Multi { segment_ticks: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct AttackSpec {
    pub damage: f32,
    pub duration: u32,
    pub active_start: u32,
    pub active_end: u32,
    pub cooldown: u32,
    pub reach: Reach,
    pub hits: HitMode,
    #[serde(default)]
    pub knockback_x: f32,
    #[serde(default)]
    pub knockback_y: f32,
    pub attacker_hitstop: u32,
    pub target_hitstop: u32,
    #[serde(default)]
    pub shake: f32,
    /// Horizontal impulse along the facing direction when the swing starts.
    #[serde(default)]
    pub lunge: f32,
    /// Vertical impulse when the swing starts (negative is up).
    #[serde(default)]
    pub lift: f32,
    /// Forces the target into its hit state.
    #[serde(default)]
    pub staggers: bool,
}

impl AttackSpec {
    pub fn is_active_at(&self, elapsed: u32) -> bool {
        elapsed >= self.active_start && elapsed < self.active_end
    }

    pub fn knockback(&self, facing_right: bool) -> Vec2 {
        let dir = if facing_right { 1.0 } else { -1.0 };
        Vec2::new(self.knockback_x * dir, self.knockback_y)
    }

    pub fn validate(&self, name: &str) -> Result<(), String> {
        if self.damage < 0.0 {
            return Err(format!("attack '{name}': damage must be >= 0"));
        }
        if self.active_start >= self.active_end {
            return Err(format!("attack '{name}': active_start must be < active_end"));
        }
        if self.active_end > self.duration {
            return Err(format!("attack '{name}': active window ends after duration"));
        }
        if let HitMode::Multi { segment_ticks } = self.hits {
            if segment_ticks == 0 {
                return Err(format!("attack '{name}': segment_ticks must be > 0"));
            }
        }
        match self.reach {
            Reach::Box { range, height } if range <= 0.0 || height <= 0.0 => {
                Err(format!("attack '{name}': box reach must be positive"))
            }
            Reach::Radius { radius } if radius <= 0.0 => {
                Err(format!("attack '{name}': radius must be positive"))
            }
            _ => Ok(()),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AttackTable {
    pub combo: [AttackSpec; 4],
    pub air_spin: AttackSpec,
    pub heavy: AttackSpec,
}

impl AttackTable {
    pub fn spec(&self, kind: AttackKind) -> &AttackSpec {
        match kind {
            AttackKind::Light1 => &self.combo[0],
            AttackKind::Light2 => &self.combo[1],
            AttackKind::Light3 => &self.combo[2],
            AttackKind::Light4 => &self.combo[3],
            AttackKind::AirSpin => &self.air_spin,
            AttackKind::Heavy => &self.heavy,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        for (i, spec) in self.combo.iter().enumerate() {
            spec.validate(&format!("combo[{i}]"))?;
        }
        self.air_spin.validate("air_spin")?;
        self.heavy.validate("heavy")
    }
}

impl Default for AttackTable {
    fn default() -> Self {
        let light = |damage, duration, active_start, active_end, cooldown| AttackSpec {
            damage,
            duration,
            active_start,
            active_end,
            cooldown,
            reach: Reach::Box {
                range: 70.0,
                height: 60.0,
            },
            hits: HitMode::Single,
            knockback_x: 0.0,
            knockback_y: 0.0,
            attacker_hitstop: 3,
            target_hitstop: 4,
            shake: 2.0,
            lunge: 3.0,
            lift: 0.0,
            staggers: false,
        };

        Self {
            combo: [
                light(10.0, 18, 4, 10, 12),
                AttackSpec {
                    knockback_x: 1.0,
                    lunge: 4.0,
                    ..light(12.0, 20, 5, 11, 14)
                },
                AttackSpec {
                    knockback_x: 2.0,
                    attacker_hitstop: 4,
                    target_hitstop: 5,
                    shake: 3.0,
                    lunge: 2.0,
                    lift: -9.0,
                    reach: Reach::Box {
                        range: 75.0,
                        height: 90.0,
                    },
                    ..light(15.0, 24, 6, 13, 16)
                },
                AttackSpec {
                    knockback_x: 9.0,
                    knockback_y: -3.0,
                    attacker_hitstop: 8,
                    target_hitstop: 10,
                    shake: 8.0,
                    lunge: 0.0,
                    lift: -5.0,
                    staggers: true,
                    reach: Reach::Box {
                        range: 90.0,
                        height: 120.0,
                    },
                    ..light(25.0, 32, 14, 23, 30)
                },
            ],
            air_spin: AttackSpec {
                damage: 6.0,
                duration: 26,
                active_start: 6,
                active_end: 21,
                cooldown: 20,
                reach: Reach::Radius { radius: 90.0 },
                hits: HitMode::Multi { segment_ticks: 5 },
                knockback_x: 1.0,
                knockback_y: 0.0,
                attacker_hitstop: 2,
                target_hitstop: 3,
                shake: 2.0,
                lunge: 0.0,
                lift: 0.0,
                staggers: false,
            },
            heavy: AttackSpec {
                damage: 40.0,
                duration: 40,
                active_start: 16,
                active_end: 25,
                cooldown: 42,
                reach: Reach::Box {
                    range: 140.0,
                    height: 100.0,
                },
                hits: HitMode::Single,
                knockback_x: 12.0,
                knockback_y: -4.0,
                attacker_hitstop: 10,
                target_hitstop: 12,
                shake: 12.0,
                lunge: 0.0,
                lift: 0.0,
                staggers: true,
            },
        }
    }
}

/// Dedup state for one swing. A new swing always starts with a fresh ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitLedger {
    Single { dealt: bool },
    Multi { last_segment: Option<u32>, hits: u32 },
}

impl HitLedger {
    pub fn new(mode: HitMode) -> Self {
        match mode {
            HitMode::Single => Self::Single { dealt: false },
            HitMode::Multi { .. } => Self::Multi {
                last_segment: None,
                hits: 0,
            },
        }
    }

    pub fn hits(&self) -> u32 {
        match *self {
            Self::Single { dealt } => u32::from(dealt),
            Self::Multi { hits, .. } => hits,
        }
    }
}

fn segment_of(spec: &AttackSpec, elapsed: u32) -> u32 {
    match spec.hits {
        HitMode::Multi { segment_ticks } => {
            elapsed.saturating_sub(spec.active_start) / segment_ticks.max(1)
        }
        HitMode::Single => 0,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveAttack {
    pub kind: AttackKind,
    pub elapsed: u32,
    pub ledger: HitLedger,
}

impl ActiveAttack {
    pub fn new(kind: AttackKind, spec: &AttackSpec) -> Self {
        Self {
            kind,
            elapsed: 0,
            ledger: HitLedger::new(spec.hits),
        }
    }

    /// True when the hitbox is live and the ledger still accepts a hit.
    pub fn can_hit(&self, spec: &AttackSpec) -> bool {
        if !spec.is_active_at(self.elapsed) {
            return false;
        }
        match self.ledger {
            HitLedger::Single { dealt } => !dealt,
            HitLedger::Multi { last_segment, .. } => {
                last_segment != Some(segment_of(spec, self.elapsed))
            }
        }
    }

    pub fn record_hit(&mut self, spec: &AttackSpec) {
        let segment = segment_of(spec, self.elapsed);
        match &mut self.ledger {
            HitLedger::Single { dealt } => *dealt = true,
            HitLedger::Multi { last_segment, hits } => {
                *last_segment = Some(segment);
                *hits += 1;
            }
        }
    }
}

/// World-space hitbox for a swing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Hitbox {
    Box(Aabb),
    Circle { center: Vec2, radius: f32 },
}

impl Hitbox {
    pub fn for_attacker(attacker: &Body, reach: Reach) -> Self {
        match reach {
            Reach::Box { range, height } => {
                let half_w = range * 0.5;
                let center_x = if attacker.facing_right {
                    attacker.right() + half_w
                } else {
                    attacker.left() - half_w
                };
                Self::Box(Aabb {
                    center_x,
                    center_y: attacker.center().y,
                    half_w,
                    half_h: height * 0.5,
                })
            }
            Reach::Radius { radius } => Self::Circle {
                center: attacker.center(),
                radius,
            },
        }
    }

    pub fn touches(&self, hurtbox: &Aabb) -> bool {
        match *self {
            Self::Box(aabb) => aabb.overlaps(hurtbox),
            Self::Circle { center, radius } => hurtbox.distance_to_point(center) <= radius,
        }
    }
}
