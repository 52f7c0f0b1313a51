//! Tunable combat constants. Everything is measured in ticks (60 per second),
//! logical pixels and pixels per tick.
//!
//! Defaults are the shipped balance. A JSON file can override any subset of
//! fields; missing fields keep their default.

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::attack::AttackTable;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CombatTuning {
    pub seed: u64,
    pub arena: ArenaTuning,
    pub player: PlayerTuning,
    pub boss: BossTuning,
    pub immobilize: ImmobilizeTuning,
    pub attacks: AttackTable,
}

impl Default for CombatTuning {
    fn default() -> Self {
        Self {
            seed: 0x5eed_b1ad,
            arena: ArenaTuning::default(),
            player: PlayerTuning::default(),
            boss: BossTuning::default(),
            immobilize: ImmobilizeTuning::default(),
            attacks: AttackTable::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ArenaTuning {
    pub width: f32,
    pub ground_y: f32,
    pub viewport_width: f32,
    pub camera_margin: f32,
    pub camera_smoothing: f32,
    /// Horizontal nudge applied per tick to separate overlapping bodies.
    pub collision_push: f32,
}

impl Default for ArenaTuning {
    fn default() -> Self {
        Self {
            width: 1600.0,
            ground_y: 460.0,
            viewport_width: 800.0,
            camera_margin: 120.0,
            camera_smoothing: 0.1,
            collision_push: 2.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    pub width: f32,
    pub height: f32,
    pub spawn_x: f32,
    pub max_health: f32,
    pub gravity: f32,
    pub max_fall_speed: f32,
    /// Gravity multiplier while spinning in the air.
    pub float_gravity_scale: f32,
    pub jump_speed: f32,
    pub max_speed: f32,
    pub accel: f32,
    pub friction: f32,
    /// Per-tick velocity multiplier during light swings.
    pub attack_damping: f32,
    pub finisher_dive_speed: f32,
    pub dodge_speed: f32,
    pub dodge_decay: f32,
    pub dodge_end_speed: f32,
    pub dodge_max_ticks: u32,
    pub dodge_cooldown: u32,
    pub dodge_stamina_cost: f32,
    pub stamina_max: f32,
    pub stamina_regen: f32,
    pub charge_threshold: u32,
    pub combo_window: u32,
    pub air_spin_min_height: f32,
    pub hit_stun_ticks: u32,
    pub hit_friction: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            width: 40.0,
            height: 80.0,
            spawn_x: 200.0,
            max_health: 100.0,
            gravity: 0.6,
            max_fall_speed: 14.0,
            float_gravity_scale: 0.25,
            jump_speed: 12.0,
            max_speed: 5.0,
            accel: 0.8,
            friction: 0.7,
            attack_damping: 0.8,
            finisher_dive_speed: 14.0,
            dodge_speed: 12.0,
            dodge_decay: 0.88,
            dodge_end_speed: 1.0,
            dodge_max_ticks: 22,
            dodge_cooldown: 40,
            dodge_stamina_cost: 25.0,
            stamina_max: 100.0,
            stamina_regen: 0.25,
            charge_threshold: 36,
            combo_window: 30,
            air_spin_min_height: 60.0,
            hit_stun_ticks: 24,
            hit_friction: 0.85,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BossTuning {
    pub width: f32,
    pub height: f32,
    pub spawn_x: f32,
    pub max_health: f32,
    pub gravity: f32,
    pub max_fall_speed: f32,
    pub run_speed: f32,
    pub friction: f32,
    pub chase_distance: f32,
    pub standoff_distance: f32,
    pub backstep_speed: f32,
    pub standoff_engage_chance: f32,

    pub melee_range: f32,
    /// Range re-checked when the delayed melee strike resolves.
    pub melee_reach: f32,
    pub melee_height: f32,
    pub melee_windup: u32,
    pub melee_recovery: u32,
    pub melee_damage: f32,
    pub melee_knockback: f32,
    pub melee_cooldown: u32,

    pub slam_windup: u32,
    pub slam_recovery: u32,
    pub slam_radius: f32,
    /// A player higher than this above the floor clears the shockwave.
    pub slam_clearance: f32,
    pub slam_damage: f32,
    pub slam_knockback: f32,
    pub slam_cooldown: u32,
    pub slam_first_cooldown: u32,
    pub slam_shake: f32,

    pub jump_band_min: f32,
    pub jump_band_max: f32,
    pub jump_chance: f32,
    pub jump_speed: f32,
    pub jump_forward_speed: f32,
    pub jump_radius: f32,
    pub jump_damage: f32,
    pub jump_knockback: f32,
    pub jump_land_delay: u32,
    pub jump_cooldown: u32,

    pub attacker_hitstop: u32,
    pub target_hitstop: u32,
    pub hit_recovery_ticks: u32,
    pub hit_friction: f32,
}

impl Default for BossTuning {
    fn default() -> Self {
        Self {
            width: 90.0,
            height: 140.0,
            spawn_x: 1100.0,
            max_health: 600.0,
            gravity: 0.7,
            max_fall_speed: 16.0,
            run_speed: 3.5,
            friction: 0.5,
            chase_distance: 360.0,
            standoff_distance: 240.0,
            backstep_speed: 1.2,
            standoff_engage_chance: 0.02,

            melee_range: 120.0,
            melee_reach: 150.0,
            melee_height: 110.0,
            melee_windup: 24,
            melee_recovery: 18,
            melee_damage: 14.0,
            melee_knockback: 7.0,
            melee_cooldown: 70,

            slam_windup: 45,
            slam_recovery: 35,
            slam_radius: 190.0,
            slam_clearance: 30.0,
            slam_damage: 22.0,
            slam_knockback: 9.0,
            slam_cooldown: 420,
            slam_first_cooldown: 300,
            slam_shake: 14.0,

            jump_band_min: 200.0,
            jump_band_max: 480.0,
            jump_chance: 0.015,
            jump_speed: 13.0,
            jump_forward_speed: 6.0,
            jump_radius: 160.0,
            jump_damage: 18.0,
            jump_knockback: 8.0,
            jump_land_delay: 30,
            jump_cooldown: 240,

            attacker_hitstop: 6,
            target_hitstop: 8,
            hit_recovery_ticks: 40,
            hit_friction: 0.9,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ImmobilizeTuning {
    pub range: f32,
    pub duration: u32,
    pub spell_cooldown: u32,
    /// Damage taken while frozen must exceed this to shatter the freeze.
    pub break_threshold: f32,
    pub shatter_hitstop: u32,
    pub shatter_knockback: f32,
    pub shatter_shake: f32,
    pub muted_hitstop: u32,
    pub particle_interval: u32,
}

impl Default for ImmobilizeTuning {
    fn default() -> Self {
        Self {
            range: 320.0,
            duration: 180,
            spell_cooldown: 45,
            break_threshold: 60.0,
            shatter_hitstop: 14,
            shatter_knockback: 14.0,
            shatter_shake: 24.0,
            muted_hitstop: 3,
            particle_interval: 10,
        }
    }
}

impl CombatTuning {
    pub fn validate(&self) -> Result<(), String> {
        let a = &self.arena;
        if a.width <= 0.0 || a.ground_y <= 0.0 {
            return Err("Tuning validation failed: arena width and ground_y must be > 0".to_string());
        }
        if a.viewport_width <= 0.0 || a.viewport_width > a.width {
            return Err(
                "Tuning validation failed: viewport_width must be in (0, arena width]".to_string(),
            );
        }
        if !(0.0..=1.0).contains(&a.camera_smoothing) {
            return Err("Tuning validation failed: camera_smoothing must be in [0, 1]".to_string());
        }

        let p = &self.player;
        if p.max_health <= 0.0 || p.width <= 0.0 || p.height <= 0.0 {
            return Err("Tuning validation failed: player size and health must be > 0".to_string());
        }
        if p.charge_threshold == 0 {
            return Err("Tuning validation failed: charge_threshold must be > 0".to_string());
        }
        if p.stamina_max <= 0.0 {
            return Err("Tuning validation failed: stamina_max must be > 0".to_string());
        }

        let b = &self.boss;
        if b.max_health <= 0.0 || b.width <= 0.0 || b.height <= 0.0 {
            return Err("Tuning validation failed: boss size and health must be > 0".to_string());
        }
        for (name, chance) in [
            ("jump_chance", b.jump_chance),
            ("standoff_engage_chance", b.standoff_engage_chance),
        ] {
            if !(0.0..=1.0).contains(&chance) {
                return Err(format!("Tuning validation failed: {name} must be in [0, 1]"));
            }
        }
        if b.jump_band_min > b.jump_band_max {
            return Err("Tuning validation failed: jump band min exceeds max".to_string());
        }

        if self.immobilize.break_threshold <= 0.0 {
            return Err("Tuning validation failed: break_threshold must be > 0".to_string());
        }

        self.attacks
            .validate()
            .map_err(|e| format!("Tuning validation failed: {e}"))
    }
}

pub fn load_tuning_from_path(path: &Path) -> Result<CombatTuning, String> {
    let raw =
        fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
    let tuning: CombatTuning = serde_json::from_str(&raw)
        .map_err(|e| format!("Failed to parse tuning JSON {}: {e}", path.display()))?;
    tuning.validate()?;
    Ok(tuning)
}
