//! Things that happened during a tick, for observers that play sounds or
//! flash the HUD. The simulation appends; observers drain.

use crate::attack::AttackKind;
use crate::boss::BossAttack;
use crate::entity::EntityKind;

#[derive(Debug, Clone, PartialEq)]
pub enum CombatEvent {
    PlayerStrike {
        attack: AttackKind,
        damage: f32,
        boss_health: f32,
    },
    BossStrike {
        attack: BossAttack,
        damage: f32,
        player_health: f32,
    },
    BossAttackStarted(BossAttack),
    ChargeReady,
    Dodged,
    ImmobilizeCast,
    ImmobilizeExpired,
    ImmobilizeShattered,
    Died(EntityKind),
}
