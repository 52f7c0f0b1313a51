//! Player control: movement, the four-step light combo, charged heavy swing,
//! air spin, dodge and the immobilize cast.
//!
//! One call to [`Player::step`] is one tick. While the body is in hitstop the
//! whole step is skipped after consuming one tick of the freeze, so timers,
//! position and velocity hold still.

use glam::Vec2;

use crate::attack::{ActiveAttack, AttackKind};
use crate::boss::PlayerView;
use crate::config::CombatTuning;
use crate::entity::{move_towards, Body, EntityKind};
use crate::events::CombatEvent;
use crate::input::TickInput;
use crate::stamina::Stamina;

const TICKS_PER_ANIM_FRAME: u32 = 6;
const COMBO_LENGTH: u8 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerState {
    Idle,
    Run,
    Jump,
    Fall,
    /// Light combo swing, steps 1-4.
    Attack(ActiveAttack),
    AirAttack(ActiveAttack),
    HeavyAttack(ActiveAttack),
    Dodge { ticks: u32 },
    Hit { ticks: u32 },
}

impl PlayerState {
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Run => "run",
            Self::Jump => "jump",
            Self::Fall => "fall",
            Self::Attack(_) => "attack",
            Self::AirAttack(_) => "air_attack",
            Self::HeavyAttack(_) => "heavy_attack",
            Self::Dodge { .. } => "dodge",
            Self::Hit { .. } => "hit",
        }
    }

    fn is_locomotion(&self) -> bool {
        matches!(self, Self::Idle | Self::Run | Self::Jump | Self::Fall)
    }
}

/// What the player can see of the boss when deciding whether a cast lands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetInfo {
    pub center_x: f32,
    pub alive: bool,
    pub immobilized: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayerActions {
    pub cast_immobilize: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub body: Body,
    pub state: PlayerState,
    pub attack_cooldown: u32,
    pub dodge_cooldown: u32,
    pub spell_cooldown: u32,
    pub charge_timer: u32,
    pub combo_window: u32,
    pub combo_count: u8,
    /// Cleared by an air spin, restored on landing.
    pub air_combo_ready: bool,
    state_ticks: u32,
}

impl Player {
    pub fn new(tuning: &CombatTuning) -> Self {
        let pt = &tuning.player;
        let pos = Vec2::new(pt.spawn_x, tuning.arena.ground_y - pt.height);
        Self {
            body: Body::new(EntityKind::Player, pos, pt.width, pt.height, pt.max_health),
            state: PlayerState::Idle,
            attack_cooldown: 0,
            dodge_cooldown: 0,
            spell_cooldown: 0,
            charge_timer: 0,
            combo_window: 0,
            combo_count: 0,
            air_combo_ready: true,
            state_ticks: 0,
        }
    }

    pub fn step(
        &mut self,
        input: &TickInput,
        target: Option<TargetInfo>,
        stamina: &mut Stamina,
        tuning: &CombatTuning,
        events: &mut Vec<CombatEvent>,
    ) -> PlayerActions {
        let mut actions = PlayerActions::default();
        if self.body.is_dead() {
            return actions;
        }
        if self.body.tick_hit_stop() {
            return actions;
        }

        self.decay_timers();
        self.handle_dodge(input, stamina, tuning, events);
        self.handle_attack_input(input, tuning, events);
        if input.special_pressed && self.try_cast_immobilize(target, tuning) {
            actions.cast_immobilize = true;
        }
        self.apply_movement(input, tuning);

        let pt = &tuning.player;
        let gravity = match self.state {
            PlayerState::AirAttack(_) => pt.gravity * pt.float_gravity_scale,
            _ => pt.gravity,
        };
        let grounded = self.body.integrate(
            gravity,
            pt.max_fall_speed,
            tuning.arena.ground_y,
            tuning.arena.width,
        );
        if grounded {
            self.air_combo_ready = true;
        }

        self.advance_state(grounded, tuning);
        actions
    }

    fn decay_timers(&mut self) {
        self.attack_cooldown = self.attack_cooldown.saturating_sub(1);
        self.dodge_cooldown = self.dodge_cooldown.saturating_sub(1);
        self.spell_cooldown = self.spell_cooldown.saturating_sub(1);
        self.combo_window = self.combo_window.saturating_sub(1);
        if self.combo_window == 0 && !self.is_mid_combo() {
            self.combo_count = 0;
        }
    }

    fn handle_dodge(
        &mut self,
        input: &TickInput,
        stamina: &mut Stamina,
        tuning: &CombatTuning,
        events: &mut Vec<CombatEvent>,
    ) {
        if !input.dodge_pressed || self.dodge_cooldown > 0 {
            return;
        }
        if matches!(self.state, PlayerState::Dodge { .. } | PlayerState::Hit { .. }) {
            return;
        }
        let pt = &tuning.player;
        if !stamina.try_spend(pt.dodge_stamina_cost) {
            log::trace!("dodge refused: stamina {:.1}", stamina.value());
            return;
        }

        let dir = match input.move_dir() {
            d if d != 0.0 => d,
            _ => self.facing_sign(),
        };
        self.body.vel.x = dir * pt.dodge_speed;
        self.dodge_cooldown = pt.dodge_cooldown;
        self.charge_timer = 0;
        self.set_state(PlayerState::Dodge { ticks: 0 });
        events.push(CombatEvent::Dodged);
    }

    fn handle_attack_input(
        &mut self,
        input: &TickInput,
        tuning: &CombatTuning,
        events: &mut Vec<CombatEvent>,
    ) {
        if matches!(self.state, PlayerState::Dodge { .. } | PlayerState::Hit { .. }) {
            self.charge_timer = 0;
            return;
        }

        let threshold = tuning.player.charge_threshold;
        if input.attack_held && !matches!(self.state, PlayerState::HeavyAttack(_)) {
            self.charge_timer = self.charge_timer.saturating_add(1);
            if self.charge_timer == threshold {
                events.push(CombatEvent::ChargeReady);
            }
        }

        if !input.attack_released {
            return;
        }
        let charged = self.charge_timer >= threshold;
        self.charge_timer = 0;
        if self.attack_cooldown > 0 {
            return;
        }

        if charged {
            self.start_attack(AttackKind::Heavy, tuning);
        } else {
            self.light_press(tuning);
        }
    }

    fn light_press(&mut self, tuning: &CombatTuning) {
        let ground_y = tuning.arena.ground_y;
        let airborne = !self.body.on_ground(ground_y);

        match self.state {
            PlayerState::Attack(swing) if swing.kind == AttackKind::Light3 => {
                self.start_attack(AttackKind::Light4, tuning);
            }
            PlayerState::AirAttack(_) => self.start_attack(AttackKind::Light4, tuning),
            _ if airborne => {
                let high_enough =
                    self.body.height_above_ground(ground_y) >= tuning.player.air_spin_min_height;
                if high_enough && self.air_combo_ready {
                    self.start_attack(AttackKind::AirSpin, tuning);
                }
            }
            _ => {
                let chaining =
                    self.combo_window > 0 || matches!(self.state, PlayerState::Attack(_));
                let next = if chaining {
                    self.combo_count % COMBO_LENGTH + 1
                } else {
                    1
                };
                if let Some(kind) = AttackKind::from_combo_step(next) {
                    self.start_attack(kind, tuning);
                }
            }
        }
    }

    fn start_attack(&mut self, kind: AttackKind, tuning: &CombatTuning) {
        let spec = tuning.attacks.spec(kind);
        let swing = ActiveAttack::new(kind, spec);

        let state = match kind {
            AttackKind::Heavy => PlayerState::HeavyAttack(swing),
            AttackKind::AirSpin => PlayerState::AirAttack(swing),
            _ => PlayerState::Attack(swing),
        };
        self.set_state(state);
        self.attack_cooldown = spec.cooldown;

        match kind {
            AttackKind::Heavy => {
                self.combo_count = 0;
                self.combo_window = 0;
            }
            AttackKind::AirSpin => {
                // Counts as the third step so the next press slams.
                self.combo_count = 3;
                self.air_combo_ready = false;
                self.body.vel.y = 0.0;
            }
            _ => {
                if let Some(step) = kind.combo_step() {
                    self.combo_count = step;
                }
            }
        }

        if spec.lunge != 0.0 {
            self.body.vel.x = self.facing_sign() * spec.lunge;
        }
        if spec.lift != 0.0 {
            self.body.vel.y = spec.lift;
        }
        log::debug!("player starts {kind} (combo {})", self.combo_count);
    }

    fn try_cast_immobilize(&mut self, target: Option<TargetInfo>, tuning: &CombatTuning) -> bool {
        if self.spell_cooldown > 0
            || matches!(self.state, PlayerState::Dodge { .. } | PlayerState::Hit { .. })
        {
            return false;
        }
        let Some(target) = target else {
            return false;
        };
        if !target.alive || target.immobilized {
            return false;
        }

        let dx = target.center_x - self.body.center().x;
        let facing_target = (dx >= 0.0) == self.body.facing_right;
        if !facing_target || dx.abs() > tuning.immobilize.range {
            return false;
        }
        self.spell_cooldown = tuning.immobilize.spell_cooldown;
        true
    }

    fn apply_movement(&mut self, input: &TickInput, tuning: &CombatTuning) {
        let pt = &tuning.player;
        let grounded = self.body.on_ground(tuning.arena.ground_y);
        let dir = input.move_dir();

        match self.state {
            PlayerState::Idle | PlayerState::Run | PlayerState::Jump | PlayerState::Fall => {
                if dir != 0.0 {
                    self.body.vel.x = move_towards(self.body.vel.x, dir * pt.max_speed, pt.accel);
                    self.body.facing_right = dir > 0.0;
                } else if grounded {
                    self.body.vel.x = move_towards(self.body.vel.x, 0.0, pt.friction);
                }
                if input.jump_pressed && grounded {
                    self.body.vel.y = -pt.jump_speed;
                }
            }
            PlayerState::Attack(swing) if swing.kind == AttackKind::Light4 => {
                self.body.vel.x = 0.0;
            }
            PlayerState::Attack(_) | PlayerState::AirAttack(_) => {
                self.body.vel.x *= pt.attack_damping;
            }
            PlayerState::HeavyAttack(_) => self.body.vel.x = 0.0,
            PlayerState::Dodge { .. } => self.body.vel.x *= pt.dodge_decay,
            PlayerState::Hit { .. } => self.body.vel.x *= pt.hit_friction,
        }
    }

    fn advance_state(&mut self, grounded: bool, tuning: &CombatTuning) {
        let pt = &tuning.player;
        self.state_ticks = self.state_ticks.saturating_add(1);

        let mut finished_swing = None;
        let mut done = false;
        match &mut self.state {
            PlayerState::Attack(swing)
            | PlayerState::AirAttack(swing)
            | PlayerState::HeavyAttack(swing) => {
                swing.elapsed += 1;
                let spec = tuning.attacks.spec(swing.kind);
                if swing.kind == AttackKind::Light4 && swing.elapsed == spec.active_start {
                    self.body.vel.y = pt.finisher_dive_speed;
                }
                let landed_spin = swing.kind == AttackKind::AirSpin && grounded && swing.elapsed > 1;
                if swing.elapsed >= spec.duration || landed_spin {
                    finished_swing = Some(swing.kind);
                }
            }
            PlayerState::Dodge { ticks } => {
                *ticks += 1;
                done = *ticks >= pt.dodge_max_ticks || self.body.vel.x.abs() < pt.dodge_end_speed;
            }
            PlayerState::Hit { ticks } => {
                *ticks += 1;
                done = (*ticks >= pt.hit_stun_ticks && grounded)
                    || *ticks >= pt.hit_stun_ticks.saturating_mul(3);
            }
            PlayerState::Idle | PlayerState::Run | PlayerState::Jump | PlayerState::Fall => {}
        }

        if let Some(kind) = finished_swing {
            if kind == AttackKind::Heavy {
                self.combo_count = 0;
                self.combo_window = 0;
            } else {
                self.combo_window = pt.combo_window;
            }
            done = true;
        }

        if done || self.state.is_locomotion() {
            let next = self.locomotion_state(grounded);
            if next != self.state {
                self.set_state(next);
            }
        }
    }

    fn locomotion_state(&self, grounded: bool) -> PlayerState {
        if grounded {
            if self.body.vel.x.abs() > 0.1 {
                PlayerState::Run
            } else {
                PlayerState::Idle
            }
        } else if self.body.vel.y < 0.0 {
            PlayerState::Jump
        } else {
            PlayerState::Fall
        }
    }

    fn set_state(&mut self, state: PlayerState) {
        self.state = state;
        self.state_ticks = 0;
    }

    fn facing_sign(&self) -> f32 {
        if self.body.facing_right {
            1.0
        } else {
            -1.0
        }
    }

    fn is_mid_combo(&self) -> bool {
        matches!(self.state, PlayerState::Attack(_) | PlayerState::AirAttack(_))
    }

    /// Knocks the player into hit-stun. Cancels any swing or charge.
    pub fn receive_hit(&mut self, knockback: Vec2, hitstop: u32) {
        self.body.vel = knockback;
        self.body.freeze(hitstop);
        self.charge_timer = 0;
        self.combo_count = 0;
        self.combo_window = 0;
        self.set_state(PlayerState::Hit { ticks: 0 });
    }

    pub fn is_dodging(&self) -> bool {
        matches!(self.state, PlayerState::Dodge { .. })
    }

    pub fn active_swing(&self) -> Option<&ActiveAttack> {
        match &self.state {
            PlayerState::Attack(s) | PlayerState::AirAttack(s) | PlayerState::HeavyAttack(s) => {
                Some(s)
            }
            _ => None,
        }
    }

    pub fn active_swing_mut(&mut self) -> Option<&mut ActiveAttack> {
        match &mut self.state {
            PlayerState::Attack(s) | PlayerState::AirAttack(s) | PlayerState::HeavyAttack(s) => {
                Some(s)
            }
            _ => None,
        }
    }

    /// Presentation frame index, derived from gameplay timers.
    pub fn anim_frame(&self) -> u32 {
        match self.active_swing() {
            Some(swing) => swing.elapsed / TICKS_PER_ANIM_FRAME,
            None => self.state_ticks / TICKS_PER_ANIM_FRAME,
        }
    }

    pub fn target_info(&self) -> TargetInfo {
        TargetInfo {
            center_x: self.body.center().x,
            alive: !self.body.is_dead(),
            immobilized: false,
        }
    }

    pub fn view(&self, ground_y: f32) -> PlayerView {
        PlayerView {
            center: self.body.center(),
            height_above_ground: self.body.height_above_ground(ground_y),
            dodging: self.is_dodging(),
            alive: !self.body.is_dead(),
        }
    }
}
