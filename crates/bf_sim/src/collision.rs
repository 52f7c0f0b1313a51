//! Body-to-body separation. The arena floor and walls are handled by
//! [`Body::integrate`](crate::entity::Body::integrate); this only keeps the
//! player from standing inside the boss.

use crate::boss::Boss;
use crate::config::ArenaTuning;
use crate::player::Player;

/// Which bodies sat this tick out in hitstop. Sampled before each step
/// consumes its freeze, so the last frozen tick still counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Frozen {
    pub player: bool,
    pub boss: bool,
}

/// Nudges an overlapping player out of the boss. Returns true when a push
/// happened.
///
/// Dodging passes through. Frozen bodies are left alone, except that an
/// immobilized boss still blocks like a wall.
pub fn separate(player: &mut Player, boss: &mut Boss, arena: &ArenaTuning, frozen: Frozen) -> bool {
    if player.is_dodging() || frozen.player {
        return false;
    }
    if frozen.boss && !boss.is_immobilized() {
        return false;
    }
    if !player.body.aabb().overlaps(&boss.body.aabb()) {
        return false;
    }

    let dir = if player.body.center().x < boss.body.center().x {
        -1.0
    } else {
        1.0
    };
    let max_x = (arena.width - player.body.width).max(0.0);
    player.body.pos.x = (player.body.pos.x + dir * arena.collision_push).clamp(0.0, max_x);

    if !frozen.boss && !boss.is_immobilized() && !boss.is_sliding() {
        boss.body.vel.x = 0.0;
    }
    true
}
