//! Boss AI: chase, standoff, a delayed melee swipe, the kowtow ground slam
//! and a leaping smash.
//!
//! Every delayed strike is a tick count held inside the attack state, so a
//! stagger that replaces the state also cancels the pending hit.

use glam::Vec2;

use crate::config::{BossTuning, CombatTuning};
use crate::effects::{Effects, DUST, FROST};
use crate::entity::{move_towards, Body, EntityKind};
use crate::events::CombatEvent;
use crate::player::TargetInfo;
use crate::rng::AiRng;

const TICKS_PER_ANIM_FRAME: u32 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BossAttack {
    Melee,
    /// Ground slam with a shockwave. Jumping players clear it.
    Kowtow,
    JumpSmash,
}

impl BossAttack {
    pub fn label(self) -> &'static str {
        match self {
            Self::Melee => "melee",
            Self::Kowtow => "kowtow",
            Self::JumpSmash => "jump_smash",
        }
    }
}

impl std::fmt::Display for BossAttack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BossState {
    Idle,
    Run,
    Standoff,
    Attack { elapsed: u32, resolved: bool },
    Kowtow { elapsed: u32, resolved: bool },
    JumpSmash {
        airborne_ticks: u32,
        landed_for: Option<u32>,
        resolved: bool,
    },
    Hit { ticks: u32 },
}

impl BossState {
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Run => "run",
            Self::Standoff => "standoff",
            Self::Attack { .. } => "attack",
            Self::Kowtow { .. } => "kowtow",
            Self::JumpSmash { .. } => "jump_smash",
            Self::Hit { .. } => "hit",
        }
    }

    fn attack(&self) -> Option<BossAttack> {
        match self {
            Self::Attack { .. } => Some(BossAttack::Melee),
            Self::Kowtow { .. } => Some(BossAttack::Kowtow),
            Self::JumpSmash { .. } => Some(BossAttack::JumpSmash),
            _ => None,
        }
    }
}

/// Active immobilize spell. Damage taken while frozen accumulates toward a
/// shatter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Immobilize {
    pub ticks_left: u32,
    pub damage_taken: f32,
}

/// What the boss perceives of the player this tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerView {
    pub center: Vec2,
    pub height_above_ground: f32,
    pub dodging: bool,
    pub alive: bool,
}

/// A boss hit that connected this tick. The world applies it to the player.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BossStrike {
    pub attack: BossAttack,
    pub damage: f32,
    pub knockback: Vec2,
    pub attacker_hitstop: u32,
    pub target_hitstop: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Boss {
    pub body: Body,
    pub state: BossState,
    pub attack_cooldown: u32,
    pub slam_cooldown: u32,
    pub jump_cooldown: u32,
    pub immobilized: Option<Immobilize>,
    state_ticks: u32,
}

impl Boss {
    pub fn new(tuning: &CombatTuning) -> Self {
        let bt = &tuning.boss;
        let pos = Vec2::new(bt.spawn_x, tuning.arena.ground_y - bt.height);
        Self {
            body: Body::new(EntityKind::Boss, pos, bt.width, bt.height, bt.max_health),
            state: BossState::Idle,
            attack_cooldown: 0,
            slam_cooldown: bt.slam_first_cooldown,
            jump_cooldown: 0,
            immobilized: None,
            state_ticks: 0,
        }
    }

    pub fn is_immobilized(&self) -> bool {
        self.immobilized.is_some()
    }

    pub fn step(
        &mut self,
        player: &PlayerView,
        tuning: &CombatTuning,
        rng: &mut dyn AiRng,
        effects: &mut Effects,
        events: &mut Vec<CombatEvent>,
    ) -> Option<BossStrike> {
        if self.body.is_dead() {
            return None;
        }
        let frozen = self.body.tick_hit_stop();
        if self.tick_immobilize(tuning, effects, events) || frozen {
            return None;
        }

        let bt = &tuning.boss;
        self.state_ticks = self.state_ticks.saturating_add(1);
        self.attack_cooldown = self.attack_cooldown.saturating_sub(1);
        self.slam_cooldown = self.slam_cooldown.saturating_sub(1);
        self.jump_cooldown = self.jump_cooldown.saturating_sub(1);

        let mut strike = match self.state {
            BossState::Idle | BossState::Run | BossState::Standoff => {
                self.decide(player, tuning, rng, events);
                None
            }
            BossState::Attack { elapsed, resolved } => {
                self.advance_melee(elapsed + 1, resolved, player, tuning)
            }
            BossState::Kowtow { elapsed, resolved } => {
                self.advance_kowtow(elapsed + 1, resolved, player, tuning, effects)
            }
            BossState::JumpSmash { .. } => None,
            BossState::Hit { ticks } => {
                let ticks = ticks + 1;
                if player.alive {
                    self.body.facing_right = player.center.x >= self.body.center().x;
                }
                self.body.vel.x *= bt.hit_friction;
                let settled = ticks > 1 && self.body.vel.x.abs() < 0.1;
                if settled || ticks >= bt.hit_recovery_ticks {
                    self.set_state(BossState::Idle);
                } else {
                    self.state = BossState::Hit { ticks };
                }
                None
            }
        };

        let grounded = self.body.integrate(
            bt.gravity,
            bt.max_fall_speed,
            tuning.arena.ground_y,
            tuning.arena.width,
        );

        if let BossState::JumpSmash {
            airborne_ticks,
            landed_for,
            resolved,
        } = self.state
        {
            strike = self.advance_jump_smash(
                airborne_ticks,
                landed_for,
                resolved,
                grounded,
                player,
                tuning,
                effects,
            );
        }
        strike
    }

    /// Returns true while the spell holds the boss in place this tick.
    fn tick_immobilize(
        &mut self,
        tuning: &CombatTuning,
        effects: &mut Effects,
        events: &mut Vec<CombatEvent>,
    ) -> bool {
        let Some(spell) = self.immobilized.as_mut() else {
            return false;
        };
        spell.ticks_left = spell.ticks_left.saturating_sub(1);

        let interval = tuning.immobilize.particle_interval;
        if interval > 0 && spell.ticks_left % interval == 0 {
            effects.burst(self.body.center(), 3, FROST, 1.5);
        }

        if spell.ticks_left == 0 {
            self.immobilized = None;
            events.push(CombatEvent::ImmobilizeExpired);
            log::debug!("immobilize expired");
        }
        true
    }

    fn decide(
        &mut self,
        player: &PlayerView,
        tuning: &CombatTuning,
        rng: &mut dyn AiRng,
        events: &mut Vec<CombatEvent>,
    ) {
        let bt = &tuning.boss;
        if !player.alive {
            self.body.vel.x = move_towards(self.body.vel.x, 0.0, bt.friction);
            if self.state != BossState::Idle {
                self.set_state(BossState::Idle);
            }
            return;
        }

        let dx = player.center.x - self.body.center().x;
        let dist = dx.abs();
        let dir = if dx >= 0.0 { 1.0 } else { -1.0 };
        self.body.facing_right = dx >= 0.0;

        if self.slam_cooldown == 0 {
            self.body.vel.x = 0.0;
            self.begin_attack(BossAttack::Kowtow, events);
            return;
        }

        if dist <= bt.melee_range && self.attack_cooldown == 0 {
            self.body.vel.x = 0.0;
            self.begin_attack(BossAttack::Melee, events);
            return;
        }

        let chasing = dist > bt.chase_distance
            || (self.state == BossState::Run && dist > bt.melee_range);
        if chasing {
            if self.state != BossState::Run {
                self.set_state(BossState::Run);
            }
            self.body.vel.x = dir * bt.run_speed;

            let in_band = (bt.jump_band_min..=bt.jump_band_max).contains(&dist);
            if in_band && self.jump_cooldown == 0 && rng.chance(bt.jump_chance) {
                self.body.vel = Vec2::new(dir * bt.jump_forward_speed, -bt.jump_speed);
                self.begin_attack(BossAttack::JumpSmash, events);
            }
            return;
        }

        if self.state != BossState::Standoff {
            self.set_state(BossState::Standoff);
        }
        if dist < bt.standoff_distance {
            self.body.vel.x = -dir * bt.backstep_speed;
        } else {
            self.body.vel.x = move_towards(self.body.vel.x, 0.0, bt.friction);
        }
        if rng.chance(bt.standoff_engage_chance) {
            self.set_state(BossState::Run);
        }
    }

    fn begin_attack(&mut self, attack: BossAttack, events: &mut Vec<CombatEvent>) {
        let state = match attack {
            BossAttack::Melee => BossState::Attack {
                elapsed: 0,
                resolved: false,
            },
            BossAttack::Kowtow => BossState::Kowtow {
                elapsed: 0,
                resolved: false,
            },
            BossAttack::JumpSmash => BossState::JumpSmash {
                airborne_ticks: 0,
                landed_for: None,
                resolved: false,
            },
        };
        self.set_state(state);
        events.push(CombatEvent::BossAttackStarted(attack));
        log::debug!("boss starts {attack}");
    }

    fn advance_melee(
        &mut self,
        elapsed: u32,
        resolved: bool,
        player: &PlayerView,
        tuning: &CombatTuning,
    ) -> Option<BossStrike> {
        let bt = &tuning.boss;
        self.body.vel.x = move_towards(self.body.vel.x, 0.0, bt.friction);

        let mut strike = None;
        let mut resolved = resolved;
        if !resolved && elapsed >= bt.melee_windup {
            resolved = true;
            if self.melee_connects(player, bt) {
                strike = Some(self.strike(BossAttack::Melee, bt.melee_damage, bt.melee_knockback, player, bt));
            } else {
                log::trace!("boss melee whiffed");
            }
        }

        if elapsed >= bt.melee_windup + bt.melee_recovery {
            self.finish_attack(BossAttack::Melee, tuning);
        } else {
            self.state = BossState::Attack { elapsed, resolved };
        }
        strike
    }

    fn melee_connects(&self, player: &PlayerView, bt: &BossTuning) -> bool {
        if !player.alive || player.dodging {
            return false;
        }
        let center = self.body.center();
        let dx = player.center.x - center.x;
        let in_front = (dx >= 0.0) == self.body.facing_right;
        in_front && dx.abs() <= bt.melee_reach && (player.center.y - center.y).abs() <= bt.melee_height
    }

    fn advance_kowtow(
        &mut self,
        elapsed: u32,
        resolved: bool,
        player: &PlayerView,
        tuning: &CombatTuning,
        effects: &mut Effects,
    ) -> Option<BossStrike> {
        let bt = &tuning.boss;
        self.body.vel.x = 0.0;

        let mut strike = None;
        let mut resolved = resolved;
        if !resolved && elapsed >= bt.slam_windup {
            resolved = true;
            effects.add_shake(bt.slam_shake);
            let feet = Vec2::new(self.body.center().x, self.body.bottom());
            effects.burst(feet, 24, DUST, 5.0);
            if self.shockwave_connects(player, bt.slam_radius, bt) {
                strike = Some(self.strike(BossAttack::Kowtow, bt.slam_damage, bt.slam_knockback, player, bt));
            }
        }

        if elapsed >= bt.slam_windup + bt.slam_recovery {
            self.finish_attack(BossAttack::Kowtow, tuning);
        } else {
            self.state = BossState::Kowtow { elapsed, resolved };
        }
        strike
    }

    #[allow(clippy::too_many_arguments)]
    fn advance_jump_smash(
        &mut self,
        airborne_ticks: u32,
        landed_for: Option<u32>,
        resolved: bool,
        grounded: bool,
        player: &PlayerView,
        tuning: &CombatTuning,
        effects: &mut Effects,
    ) -> Option<BossStrike> {
        let bt = &tuning.boss;
        match landed_for {
            None => {
                let airborne_ticks = airborne_ticks + 1;
                if !(grounded && airborne_ticks > 1) {
                    self.state = BossState::JumpSmash {
                        airborne_ticks,
                        landed_for: None,
                        resolved,
                    };
                    return None;
                }

                effects.add_shake(bt.slam_shake * 0.6);
                let feet = Vec2::new(self.body.center().x, self.body.bottom());
                effects.burst(feet, 16, DUST, 4.0);
                let strike = if !resolved && self.shockwave_connects(player, bt.jump_radius, bt) {
                    Some(self.strike(BossAttack::JumpSmash, bt.jump_damage, bt.jump_knockback, player, bt))
                } else {
                    None
                };
                self.state = BossState::JumpSmash {
                    airborne_ticks,
                    landed_for: Some(0),
                    resolved: true,
                };
                strike
            }
            Some(ticks) => {
                let ticks = ticks + 1;
                self.body.vel.x = move_towards(self.body.vel.x, 0.0, bt.friction);
                if ticks >= bt.jump_land_delay {
                    self.finish_attack(BossAttack::JumpSmash, tuning);
                } else {
                    self.state = BossState::JumpSmash {
                        airborne_ticks,
                        landed_for: Some(ticks),
                        resolved,
                    };
                }
                None
            }
        }
    }

    fn shockwave_connects(&self, player: &PlayerView, radius: f32, bt: &BossTuning) -> bool {
        player.alive
            && !player.dodging
            && player.height_above_ground <= bt.slam_clearance
            && (player.center.x - self.body.center().x).abs() <= radius
    }

    fn strike(
        &self,
        attack: BossAttack,
        damage: f32,
        knockback: f32,
        player: &PlayerView,
        bt: &BossTuning,
    ) -> BossStrike {
        let dir = if player.center.x >= self.body.center().x {
            1.0
        } else {
            -1.0
        };
        BossStrike {
            attack,
            damage,
            knockback: Vec2::new(dir * knockback, -knockback * 0.5),
            attacker_hitstop: bt.attacker_hitstop,
            target_hitstop: bt.target_hitstop,
        }
    }

    fn finish_attack(&mut self, attack: BossAttack, tuning: &CombatTuning) {
        self.arm_cooldown(attack, &tuning.boss);
        self.set_state(BossState::Idle);
    }

    fn arm_cooldown(&mut self, attack: BossAttack, bt: &BossTuning) {
        match attack {
            BossAttack::Melee => self.attack_cooldown = bt.melee_cooldown,
            BossAttack::Kowtow => self.slam_cooldown = bt.slam_cooldown,
            BossAttack::JumpSmash => self.jump_cooldown = bt.jump_cooldown,
        }
    }

    fn set_state(&mut self, state: BossState) {
        self.state = state;
        self.state_ticks = 0;
    }

    /// Suspends AI and integration; position, velocity and state are kept
    /// as they were. Fails on a dead or already frozen boss.
    pub fn immobilize(&mut self, tuning: &CombatTuning) -> bool {
        if self.body.is_dead() || self.immobilized.is_some() {
            return false;
        }
        self.immobilized = Some(Immobilize {
            ticks_left: tuning.immobilize.duration,
            damage_taken: 0.0,
        });
        true
    }

    /// Ends the spell early and hands back its final state.
    pub fn release_immobilize(&mut self) -> Option<Immobilize> {
        self.immobilized.take()
    }

    /// Reaction to a player hit. Attacks carry armor against light hits; a
    /// staggering hit interrupts anything and puts the attack on cooldown.
    pub fn take_hit(&mut self, knockback: Vec2, stagger: bool, tuning: &CombatTuning) {
        if self.body.is_dead() {
            return;
        }
        let interrupted = self.state.attack();
        if interrupted.is_some() && !stagger {
            return;
        }
        if let Some(attack) = interrupted {
            self.arm_cooldown(attack, &tuning.boss);
            log::debug!("boss {attack} interrupted");
        }

        self.body.vel.x = knockback.x;
        if knockback.y != 0.0 {
            self.body.vel.y = knockback.y;
        }
        self.set_state(BossState::Hit { ticks: 0 });
    }

    /// True while sliding from a leap. Collision leaves its velocity alone.
    pub fn is_sliding(&self) -> bool {
        matches!(self.state, BossState::JumpSmash { .. })
    }

    pub fn target_info(&self) -> TargetInfo {
        TargetInfo {
            center_x: self.body.center().x,
            alive: !self.body.is_dead(),
            immobilized: self.is_immobilized(),
        }
    }

    pub fn anim_frame(&self) -> u32 {
        match self.state {
            BossState::Attack { elapsed, .. } | BossState::Kowtow { elapsed, .. } => {
                elapsed / TICKS_PER_ANIM_FRAME
            }
            _ => self.state_ticks / TICKS_PER_ANIM_FRAME,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::FixedRng;

    const NEVER: FixedRng = FixedRng(1.0);
    const ALWAYS: FixedRng = FixedRng(0.0);

    struct Rig {
        tuning: CombatTuning,
        boss: Boss,
        effects: Effects,
        events: Vec<CombatEvent>,
        rng: FixedRng,
    }

    impl Rig {
        fn new(rng: FixedRng) -> Self {
            let tuning = CombatTuning::default();
            let boss = Boss::new(&tuning);
            Self {
                tuning,
                boss,
                effects: Effects::new(3),
                events: Vec::new(),
                rng,
            }
        }

        /// A grounded player `dx` pixels from the boss center.
        fn view(&self, dx: f32) -> PlayerView {
            let c = self.boss.body.center();
            PlayerView {
                center: Vec2::new(c.x + dx, c.y + 30.0),
                height_above_ground: 0.0,
                dodging: false,
                alive: true,
            }
        }

        fn tick(&mut self, view: PlayerView) -> Option<BossStrike> {
            self.boss.step(
                &view,
                &self.tuning,
                &mut self.rng,
                &mut self.effects,
                &mut self.events,
            )
        }
    }

    #[test]
    fn spawns_facing_left_with_slam_primed() {
        let rig = Rig::new(NEVER);
        assert!(!rig.boss.body.facing_right);
        assert_eq!(rig.boss.slam_cooldown, rig.tuning.boss.slam_first_cooldown);
        assert!(rig.boss.body.on_ground(rig.tuning.arena.ground_y));
    }

    #[test]
    fn chases_distant_player() {
        let mut rig = Rig::new(NEVER);
        let view = rig.view(-600.0);
        rig.tick(view);
        assert_eq!(rig.boss.state, BossState::Run);
        assert_eq!(rig.boss.body.vel.x, -rig.tuning.boss.run_speed);
        assert!(!rig.boss.body.facing_right);
    }

    #[test]
    fn backs_off_inside_standoff_band() {
        let mut rig = Rig::new(NEVER);
        rig.boss.attack_cooldown = 100;
        let view = rig.view(-200.0);
        rig.tick(view);
        assert_eq!(rig.boss.state, BossState::Standoff);
        assert!(rig.boss.body.vel.x > 0.0, "steps away from a player on its left");
    }

    #[test]
    fn melee_strike_lands_after_windup() {
        let mut rig = Rig::new(NEVER);
        let mut strike_ticks = Vec::new();
        for t in 1..=60 {
            let view = rig.view(-100.0);
            if let Some(strike) = rig.tick(view) {
                assert_eq!(strike.attack, BossAttack::Melee);
                assert_eq!(strike.damage, rig.tuning.boss.melee_damage);
                assert!(strike.knockback.x < 0.0);
                strike_ticks.push(t);
            }
        }
        assert_eq!(strike_ticks, vec![1 + rig.tuning.boss.melee_windup]);
        assert!(rig
            .events
            .contains(&CombatEvent::BossAttackStarted(BossAttack::Melee)));
    }

    #[test]
    fn staggered_boss_turns_to_face_player() {
        let mut rig = Rig::new(NEVER);
        assert!(!rig.boss.body.facing_right);
        rig.boss.take_hit(Vec2::new(-6.0, 0.0), true, &rig.tuning);

        let view = rig.view(150.0);
        rig.tick(view);
        assert!(matches!(rig.boss.state, BossState::Hit { ticks: 1 }));
        assert!(rig.boss.body.facing_right);

        let view = rig.view(-150.0);
        rig.tick(view);
        assert!(!rig.boss.body.facing_right);
    }

    #[test]
    fn anim_frame_follows_attack_elapsed_then_state_ticks() {
        let mut rig = Rig::new(NEVER);
        let mut dead = rig.view(-600.0);
        dead.alive = false;
        for _ in 0..13 {
            rig.tick(dead);
        }
        assert_eq!(rig.boss.state, BossState::Idle);
        assert_eq!(rig.boss.anim_frame(), 2);

        // Melee begins on the first tick in range with elapsed zero.
        for _ in 0..13 {
            let view = rig.view(-100.0);
            rig.tick(view);
        }
        assert!(matches!(rig.boss.state, BossState::Attack { elapsed: 12, .. }));
        assert_eq!(rig.boss.anim_frame(), 2);
        let view = rig.view(-100.0);
        rig.tick(view);
        assert_eq!(rig.boss.anim_frame(), 2);
        for _ in 0..5 {
            let view = rig.view(-100.0);
            rig.tick(view);
        }
        assert_eq!(rig.boss.anim_frame(), 3);
    }

    #[test]
    fn melee_returns_to_idle_with_cooldown() {
        let mut rig = Rig::new(NEVER);
        let bt = rig.tuning.boss.clone();
        let total = 1 + bt.melee_windup + bt.melee_recovery;
        for _ in 0..total {
            let view = rig.view(-100.0);
            rig.tick(view);
        }
        assert_eq!(rig.boss.state, BossState::Idle);
        assert_eq!(rig.boss.attack_cooldown, bt.melee_cooldown);
    }

    #[test]
    fn dodging_player_avoids_pending_melee() {
        let mut rig = Rig::new(NEVER);
        let windup = rig.tuning.boss.melee_windup;
        let view = rig.view(-100.0);
        for _ in 0..windup {
            assert!(rig.tick(view).is_none());
        }
        let dodging = PlayerView {
            dodging: true,
            ..view
        };
        assert!(rig.tick(dodging).is_none());
        for _ in 0..10 {
            assert!(rig.tick(view).is_none(), "a resolved strike never re-fires");
        }
    }

    #[test]
    fn leaving_reach_during_windup_whiffs() {
        let mut rig = Rig::new(NEVER);
        let windup = rig.tuning.boss.melee_windup;
        let near = rig.view(-100.0);
        rig.tick(near);
        let far = rig.view(-300.0);
        for _ in 0..windup + 5 {
            assert!(rig.tick(far).is_none());
        }
    }

    #[test]
    fn kowtow_takes_priority_and_jumping_clears_it() {
        let mut rig = Rig::new(NEVER);
        rig.boss.slam_cooldown = 1;
        let grounded = rig.view(-150.0);
        rig.tick(grounded);
        assert!(matches!(rig.boss.state, BossState::Kowtow { .. }));

        let windup = rig.tuning.boss.slam_windup;
        let airborne = PlayerView {
            height_above_ground: 80.0,
            ..grounded
        };
        for _ in 0..windup {
            assert!(rig.tick(airborne).is_none());
        }
        assert!(rig.effects.shake() > 0.0, "impact shakes even on a miss");
    }

    #[test]
    fn kowtow_hits_grounded_player_in_radius() {
        let mut rig = Rig::new(NEVER);
        rig.boss.slam_cooldown = 1;
        let view = rig.view(-150.0);
        let strikes: Vec<BossStrike> = (0..=rig.tuning.boss.slam_windup)
            .filter_map(|_| rig.tick(view))
            .collect();
        assert_eq!(strikes.len(), 1);
        assert_eq!(strikes[0].attack, BossAttack::Kowtow);

        let bt = rig.tuning.boss.clone();
        for _ in 0..bt.slam_recovery {
            rig.tick(view);
        }
        assert_eq!(rig.boss.slam_cooldown, bt.slam_cooldown);
    }

    #[test]
    fn leaps_when_running_in_band() {
        let mut rig = Rig::new(ALWAYS);
        rig.boss.slam_cooldown = 10_000;
        let view = rig.view(-420.0);
        rig.tick(view);
        assert!(rig.boss.is_sliding());
        assert!(rig.boss.body.vel.y < 0.0);

        for _ in 0..200 {
            let view = rig.view(-420.0);
            rig.tick(view);
            if !rig.boss.is_sliding() {
                break;
            }
        }
        assert!(!rig.boss.is_sliding());
        assert!(rig.boss.body.on_ground(rig.tuning.arena.ground_y));
        assert!(rig.boss.jump_cooldown > 0);
    }

    #[test]
    fn immobilized_boss_holds_until_expiry() {
        let mut rig = Rig::new(ALWAYS);
        assert!(rig.boss.immobilize(&rig.tuning));
        assert!(!rig.boss.immobilize(&rig.tuning), "no stacking");

        let start = rig.boss.body.pos;
        let duration = rig.tuning.immobilize.duration;
        for _ in 0..duration - 1 {
            let view = rig.view(-600.0);
            rig.tick(view);
            assert_eq!(rig.boss.body.pos, start);
            assert_eq!(rig.boss.state, BossState::Idle);
        }
        assert!(rig.boss.is_immobilized());
        assert!(!rig.effects.particles().is_empty());

        let view = rig.view(-600.0);
        rig.tick(view);
        assert!(!rig.boss.is_immobilized());
        assert!(rig.events.contains(&CombatEvent::ImmobilizeExpired));

        rig.tick(view);
        assert_eq!(rig.boss.state, BossState::Run);
    }

    #[test]
    fn stagger_interrupts_melee_and_arms_cooldown() {
        let mut rig = Rig::new(NEVER);
        let view = rig.view(-100.0);
        rig.tick(view);
        assert!(matches!(rig.boss.state, BossState::Attack { .. }));

        let tuning = rig.tuning.clone();
        rig.boss.take_hit(Vec2::new(-6.0, 0.0), false, &tuning);
        assert!(
            matches!(rig.boss.state, BossState::Attack { .. }),
            "light hits do not break armor"
        );

        rig.boss.take_hit(Vec2::new(-6.0, 0.0), true, &tuning);
        assert_eq!(rig.boss.state, BossState::Hit { ticks: 0 });
        assert_eq!(rig.boss.attack_cooldown, tuning.boss.melee_cooldown);

        for _ in 0..30 {
            assert!(rig.tick(view).is_none(), "cancelled windup never lands");
        }
    }

    #[test]
    fn dead_boss_is_inert() {
        let mut rig = Rig::new(ALWAYS);
        rig.boss.body.apply_damage(10_000.0);
        let before = rig.boss.clone();
        for _ in 0..20 {
            let view = rig.view(-100.0);
            assert!(rig.tick(view).is_none());
        }
        assert_eq!(rig.boss, before);
    }

    #[test]
    fn ignores_dead_player() {
        let mut rig = Rig::new(ALWAYS);
        let view = PlayerView {
            alive: false,
            ..rig.view(-100.0)
        };
        for _ in 0..30 {
            assert!(rig.tick(view).is_none());
        }
        assert_eq!(rig.boss.state, BossState::Idle);
    }
}
