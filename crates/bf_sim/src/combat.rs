//! Hit resolution between the two combatants.
//!
//! Player swings are checked once per tick against the boss hurtbox. An
//! immobilized boss absorbs hits: damage still lands, knockback does not,
//! and once the damage taken under the spell passes the break threshold the
//! freeze shatters with a heavy stagger.

use glam::Vec2;

use crate::attack::{AttackKind, Hitbox};
use crate::boss::{Boss, BossStrike};
use crate::config::CombatTuning;
use crate::effects::{Effects, BLOOD, FROST, SPARK};
use crate::entity::DamageOutcome;
use crate::events::CombatEvent;
use crate::player::Player;

const BOSS_STRIKE_SHAKE: f32 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitReport {
    pub attack: AttackKind,
    pub damage: f32,
    pub killed: bool,
    pub shattered: bool,
}

pub fn resolve_player_attack(
    player: &mut Player,
    boss: &mut Boss,
    tuning: &CombatTuning,
    effects: &mut Effects,
    events: &mut Vec<CombatEvent>,
) -> Option<HitReport> {
    if player.body.is_dead() || boss.body.is_dead() {
        return None;
    }
    // Neither side's clock runs during hitstop.
    if player.body.is_frozen() || boss.body.is_frozen() {
        return None;
    }

    let swing = player.active_swing()?;
    let kind = swing.kind;
    let spec = *tuning.attacks.spec(kind);
    if !swing.can_hit(&spec) {
        return None;
    }
    let hitbox = Hitbox::for_attacker(&player.body, spec.reach);
    if !hitbox.touches(&boss.body.aabb()) {
        return None;
    }

    if let Some(swing) = player.active_swing_mut() {
        swing.record_hit(&spec);
    }
    let outcome = boss.body.apply_damage(spec.damage);
    events.push(CombatEvent::PlayerStrike {
        attack: kind,
        damage: outcome.dealt,
        boss_health: boss.body.health(),
    });
    log::debug!(
        "{kind} hit for {:.1}, boss at {:.1}",
        outcome.dealt,
        boss.body.health()
    );

    let contact = (player.body.center() + boss.body.center()) * 0.5;
    let facing_right = player.body.facing_right;
    let mut shattered = false;

    if let Some(spell) = boss.immobilized.as_mut() {
        spell.damage_taken += outcome.dealt;
        let taken = spell.damage_taken;
        let imm = &tuning.immobilize;

        if outcome.killed {
            boss.release_immobilize();
        } else if taken > imm.break_threshold {
            boss.release_immobilize();
            let dir = if facing_right { 1.0 } else { -1.0 };
            let knockback = Vec2::new(dir * imm.shatter_knockback, -imm.shatter_knockback * 0.3);
            boss.take_hit(knockback, true, tuning);
            player
                .body
                .freeze(spec.attacker_hitstop.max(imm.shatter_hitstop));
            boss.body.freeze(spec.target_hitstop.max(imm.shatter_hitstop));
            effects.add_shake(imm.shatter_shake);
            effects.burst(boss.body.center(), 30, FROST, 6.0);
            events.push(CombatEvent::ImmobilizeShattered);
            log::info!("immobilize shattered after {taken:.0} damage");
            shattered = true;
        } else {
            player.body.freeze(imm.muted_hitstop);
            boss.body.freeze(imm.muted_hitstop);
            effects.burst(contact, 4, FROST, 2.0);
        }
    } else {
        boss.take_hit(spec.knockback(facing_right), spec.staggers, tuning);
        player.body.freeze(spec.attacker_hitstop);
        boss.body.freeze(spec.target_hitstop);
        effects.add_shake(spec.shake);
        effects.burst(contact, 6, SPARK, 3.0);
    }

    Some(HitReport {
        attack: kind,
        damage: outcome.dealt,
        killed: outcome.killed,
        shattered,
    })
}

pub fn apply_boss_strike(
    strike: &BossStrike,
    boss: &mut Boss,
    player: &mut Player,
    effects: &mut Effects,
    events: &mut Vec<CombatEvent>,
) -> DamageOutcome {
    let outcome = player.body.apply_damage(strike.damage);
    player.receive_hit(strike.knockback, strike.target_hitstop);
    boss.body.freeze(strike.attacker_hitstop);

    effects.add_shake(BOSS_STRIKE_SHAKE);
    effects.burst(player.body.center(), 8, BLOOD, 3.0);
    events.push(CombatEvent::BossStrike {
        attack: strike.attack,
        damage: outcome.dealt,
        player_health: player.body.health(),
    });
    log::debug!(
        "boss {} hit player for {:.1}, player at {:.1}",
        strike.attack,
        outcome.dealt,
        player.body.health()
    );
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attack::ActiveAttack;
    use crate::boss::{BossAttack, BossState};
    use crate::player::PlayerState;

    struct Rig {
        tuning: CombatTuning,
        player: Player,
        boss: Boss,
        effects: Effects,
        events: Vec<CombatEvent>,
    }

    impl Rig {
        /// Player standing just left of the boss, facing it.
        fn new() -> Self {
            let tuning = CombatTuning::default();
            let mut player = Player::new(&tuning);
            let boss = Boss::new(&tuning);
            player.body.pos.x = boss.body.left() - player.body.width - 10.0;
            player.body.facing_right = true;
            Self {
                tuning,
                player,
                boss,
                effects: Effects::new(5),
                events: Vec::new(),
            }
        }

        fn swing(&mut self, kind: AttackKind) {
            let spec = self.tuning.attacks.spec(kind);
            let mut swing = ActiveAttack::new(kind, spec);
            swing.elapsed = spec.active_start;
            self.player.state = match kind {
                AttackKind::Heavy => PlayerState::HeavyAttack(swing),
                AttackKind::AirSpin => PlayerState::AirAttack(swing),
                _ => PlayerState::Attack(swing),
            };
        }

        fn resolve(&mut self) -> Option<HitReport> {
            resolve_player_attack(
                &mut self.player,
                &mut self.boss,
                &self.tuning,
                &mut self.effects,
                &mut self.events,
            )
        }
    }

    #[test]
    fn light_hit_lands_once_per_swing() {
        let mut rig = Rig::new();
        rig.swing(AttackKind::Light1);
        let report = rig.resolve().expect("swing in range should connect");
        assert_eq!(report.damage, 10.0);
        assert_eq!(rig.boss.body.health(), 590.0);
        assert_eq!(rig.player.body.hit_stop, 3);
        assert_eq!(rig.boss.body.hit_stop, 4);

        rig.player.body.hit_stop = 0;
        rig.boss.body.hit_stop = 0;
        assert!(rig.resolve().is_none(), "ledger blocks a repeat hit");
        assert_eq!(rig.boss.body.health(), 590.0);
    }

    #[test]
    fn out_of_reach_whiffs() {
        let mut rig = Rig::new();
        rig.player.body.pos.x -= 200.0;
        rig.swing(AttackKind::Light1);
        assert!(rig.resolve().is_none());
        assert!(rig.events.is_empty());
    }

    #[test]
    fn facing_away_whiffs() {
        let mut rig = Rig::new();
        rig.player.body.facing_right = false;
        rig.swing(AttackKind::Light1);
        assert!(rig.resolve().is_none());
    }

    #[test]
    fn frozen_attacker_cannot_hit() {
        let mut rig = Rig::new();
        rig.swing(AttackKind::Light1);
        rig.player.body.freeze(2);
        assert!(rig.resolve().is_none());
    }

    #[test]
    fn frozen_target_cannot_be_hit() {
        let mut rig = Rig::new();
        rig.swing(AttackKind::Heavy);
        rig.boss.body.freeze(1);
        assert!(rig.resolve().is_none());
        assert_eq!(rig.boss.body.health(), 600.0);
        assert_eq!(rig.boss.body.vel, Vec2::ZERO);
        assert_eq!(rig.boss.body.hit_stop, 1);
    }

    #[test]
    fn spin_hits_in_every_direction() {
        let mut rig = Rig::new();
        rig.player.body.facing_right = false;
        rig.swing(AttackKind::AirSpin);
        assert!(rig.resolve().is_some());
    }

    #[test]
    fn staggering_hit_knocks_boss_back() {
        let mut rig = Rig::new();
        rig.swing(AttackKind::Heavy);
        let report = rig.resolve().expect("heavy should connect");
        assert!(!report.shattered);
        assert_eq!(rig.boss.state, BossState::Hit { ticks: 0 });
        assert!(rig.boss.body.vel.x > 0.0);
        assert!(rig.effects.shake() >= rig.tuning.attacks.heavy.shake);
    }

    #[test]
    fn immobilized_boss_absorbs_knockback() {
        let mut rig = Rig::new();
        rig.boss.immobilize(&rig.tuning);
        rig.swing(AttackKind::Heavy);

        // Heavy alone deals 40, under the 60 break threshold.
        rig.resolve().expect("heavy should connect");
        assert!(rig.boss.is_immobilized());
        assert_eq!(rig.boss.body.vel, Vec2::ZERO);
        assert_eq!(rig.boss.state, BossState::Idle);
        assert_eq!(rig.boss.body.hit_stop, rig.tuning.immobilize.muted_hitstop);
        assert_eq!(rig.player.body.hit_stop, rig.tuning.immobilize.muted_hitstop);
        assert_eq!(rig.boss.body.health(), 560.0);
    }

    #[test]
    fn reaching_threshold_exactly_does_not_shatter() {
        let mut rig = Rig::new();
        rig.boss.immobilize(&rig.tuning);
        rig.boss.immobilized.as_mut().expect("spell active").damage_taken = 50.0;
        rig.swing(AttackKind::Light1);
        let report = rig.resolve().expect("swing should connect");
        assert!(!report.shattered);
        assert_eq!(
            rig.boss.immobilized.map(|s| s.damage_taken),
            Some(60.0)
        );
    }

    #[test]
    fn passing_threshold_shatters() {
        let mut rig = Rig::new();
        rig.boss.immobilize(&rig.tuning);
        rig.boss.immobilized.as_mut().expect("spell active").damage_taken = 55.0;
        rig.swing(AttackKind::Light1);

        let report = rig.resolve().expect("swing should connect");
        assert!(report.shattered);
        assert!(!rig.boss.is_immobilized());
        assert_eq!(rig.boss.state, BossState::Hit { ticks: 0 });
        assert!(rig.boss.body.vel.x > 0.0);

        let imm = &rig.tuning.immobilize;
        assert_eq!(rig.boss.body.hit_stop, imm.shatter_hitstop);
        assert_eq!(rig.player.body.hit_stop, imm.shatter_hitstop);
        assert_eq!(rig.effects.shake(), imm.shatter_shake);
        assert!(rig.events.contains(&CombatEvent::ImmobilizeShattered));
    }

    #[test]
    fn killing_blow_clears_immobilize() {
        let mut rig = Rig::new();
        rig.boss.immobilize(&rig.tuning);
        rig.boss.body.set_health(5.0);
        rig.swing(AttackKind::Light1);
        let report = rig.resolve().expect("swing should connect");
        assert!(report.killed);
        assert_eq!(report.damage, 5.0);
        assert!(!rig.boss.is_immobilized());
        assert!(rig.boss.body.is_dead());
    }

    #[test]
    fn dead_boss_takes_no_hits() {
        let mut rig = Rig::new();
        rig.boss.body.apply_damage(10_000.0);
        rig.swing(AttackKind::Light1);
        assert!(rig.resolve().is_none());
    }

    #[test]
    fn boss_strike_damages_and_staggers_player() {
        let mut rig = Rig::new();
        let strike = BossStrike {
            attack: BossAttack::Melee,
            damage: 14.0,
            knockback: Vec2::new(-7.0, -3.5),
            attacker_hitstop: 6,
            target_hitstop: 8,
        };
        let outcome = apply_boss_strike(
            &strike,
            &mut rig.boss,
            &mut rig.player,
            &mut rig.effects,
            &mut rig.events,
        );
        assert_eq!(outcome.dealt, 14.0);
        assert_eq!(rig.player.body.health(), 86.0);
        assert_eq!(rig.player.state, PlayerState::Hit { ticks: 0 });
        assert_eq!(rig.player.body.hit_stop, 8);
        assert_eq!(rig.boss.body.hit_stop, 6);
        assert_eq!(
            rig.events.last(),
            Some(&CombatEvent::BossStrike {
                attack: BossAttack::Melee,
                damage: 14.0,
                player_health: 86.0,
            })
        );
    }
}
