//! Horizontal follow camera. Frames both combatants, keeps the player inside
//! a screen margin, and never shows past the arena walls.

use crate::config::ArenaTuning;
use crate::entity::Body;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera2D {
    /// Left edge of the view in arena pixels.
    pub x: f32,
    pub viewport_width: f32,
}

impl Camera2D {
    pub fn new(arena: &ArenaTuning) -> Self {
        Self {
            x: 0.0,
            viewport_width: arena.viewport_width,
        }
    }

    pub fn target_for(&self, player: &Body, boss: Option<&Body>, arena: &ArenaTuning) -> f32 {
        let player_x = player.center().x;
        let focus = match boss {
            Some(boss) if !boss.is_dead() => (player_x + boss.center().x) * 0.5,
            _ => player_x,
        };
        let mut target = focus - self.viewport_width * 0.5;

        let margin = arena.camera_margin.min(self.viewport_width * 0.5);
        let lo = player_x - (self.viewport_width - margin);
        let hi = player_x - margin;
        target = target.clamp(lo, hi);
        self.clamp_to_arena(target, arena)
    }

    /// Eases toward the target by the configured smoothing factor.
    pub fn update(&mut self, player: &Body, boss: Option<&Body>, arena: &ArenaTuning) {
        let target = self.target_for(player, boss, arena);
        let next = self.x + (target - self.x) * arena.camera_smoothing;
        self.x = self.clamp_to_arena(next, arena);
    }

    pub fn snap(&mut self, player: &Body, boss: Option<&Body>, arena: &ArenaTuning) {
        self.x = self.target_for(player, boss, arena);
    }

    fn clamp_to_arena(&self, x: f32, arena: &ArenaTuning) -> f32 {
        x.clamp(0.0, (arena.width - self.viewport_width).max(0.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::EntityKind;
    use glam::Vec2;

    fn body(kind: EntityKind, x: f32) -> Body {
        Body::new(kind, Vec2::new(x, 380.0), 40.0, 80.0, 100.0)
    }

    #[test]
    fn frames_midpoint_of_both_bodies() {
        let arena = ArenaTuning::default();
        let cam = Camera2D::new(&arena);
        let player = body(EntityKind::Player, 600.0);
        let boss = body(EntityKind::Boss, 800.0);
        let target = cam.target_for(&player, Some(&boss), &arena);
        assert_eq!(target, 720.0 - arena.viewport_width * 0.5);
    }

    #[test]
    fn player_kept_inside_margin() {
        let arena = ArenaTuning::default();
        let cam = Camera2D::new(&arena);
        let player = body(EntityKind::Player, 300.0);
        let boss = body(EntityKind::Boss, 1500.0);
        let target = cam.target_for(&player, Some(&boss), &arena);
        let on_screen = player.center().x - target;
        assert!(on_screen >= arena.camera_margin - 1e-3);
        assert!(on_screen <= arena.viewport_width - arena.camera_margin + 1e-3);
    }

    #[test]
    fn never_shows_past_walls() {
        let arena = ArenaTuning::default();
        let mut cam = Camera2D::new(&arena);
        let near_left = body(EntityKind::Player, 0.0);
        cam.snap(&near_left, None, &arena);
        assert_eq!(cam.x, 0.0);

        let near_right = body(EntityKind::Player, arena.width - 40.0);
        cam.snap(&near_right, None, &arena);
        assert_eq!(cam.x, arena.width - arena.viewport_width);
    }

    #[test]
    fn update_eases_toward_target() {
        let arena = ArenaTuning::default();
        let mut cam = Camera2D::new(&arena);
        let player = body(EntityKind::Player, 1000.0);
        let target = cam.target_for(&player, None, &arena);

        cam.update(&player, None, &arena);
        assert!(cam.x > 0.0 && cam.x < target);
        for _ in 0..300 {
            cam.update(&player, None, &arena);
        }
        assert!((cam.x - target).abs() < 0.5);
    }

    #[test]
    fn dead_boss_drops_out_of_frame() {
        let arena = ArenaTuning::default();
        let cam = Camera2D::new(&arena);
        let player = body(EntityKind::Player, 800.0);
        let mut boss = body(EntityKind::Boss, 1200.0);
        boss.apply_damage(1000.0);
        assert_eq!(
            cam.target_for(&player, Some(&boss), &arena),
            cam.target_for(&player, None, &arena)
        );
    }
}
