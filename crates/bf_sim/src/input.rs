//! Per-tick action snapshot. Built once at the start of a tick from the raw key
//! state and treated as immutable for the rest of that tick.

use bf_core::input::{InputState, Key};

const LEFT_KEYS: &[Key] = &[Key::Left, Key::A];
const RIGHT_KEYS: &[Key] = &[Key::Right, Key::D];
const JUMP_KEYS: &[Key] = &[Key::Space, Key::W, Key::Up];
const ATTACK_KEYS: &[Key] = &[Key::J];
const DODGE_KEYS: &[Key] = &[Key::K, Key::Shift];
const SPECIAL_KEYS: &[Key] = &[Key::L];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub move_left: bool,
    pub move_right: bool,
    pub jump_pressed: bool,
    /// Level: attack button is down this tick (charging).
    pub attack_held: bool,
    /// Edge: attack button went up. Resolves to a light or heavy swing.
    pub attack_released: bool,
    pub dodge_pressed: bool,
    pub special_pressed: bool,
}

impl TickInput {
    pub fn from_keys(input: &InputState) -> Self {
        Self {
            move_left: input.any_held(LEFT_KEYS),
            move_right: input.any_held(RIGHT_KEYS),
            jump_pressed: input.any_just_pressed(JUMP_KEYS),
            attack_held: input.any_held(ATTACK_KEYS),
            attack_released: input.any_just_released(ATTACK_KEYS),
            dodge_pressed: input.any_just_pressed(DODGE_KEYS),
            special_pressed: input.any_just_pressed(SPECIAL_KEYS),
        }
    }

    /// Same levels, no edges. Later ticks of a multi-tick frame use this so a
    /// single press is only seen once.
    pub fn levels_only(self) -> Self {
        Self {
            move_left: self.move_left,
            move_right: self.move_right,
            attack_held: self.attack_held,
            ..Self::default()
        }
    }

    /// -1, 0 or 1. Opposing directions cancel.
    pub fn move_dir(&self) -> f32 {
        match (self.move_left, self.move_right) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        }
    }

    /// A full press-and-release of the attack button inside one tick.
    pub fn tap_attack() -> Self {
        Self {
            attack_released: true,
            ..Self::default()
        }
    }

    pub fn hold_attack() -> Self {
        Self {
            attack_held: true,
            ..Self::default()
        }
    }

    pub fn dodge() -> Self {
        Self {
            dodge_pressed: true,
            ..Self::default()
        }
    }

    pub fn special() -> Self {
        Self {
            special_pressed: true,
            ..Self::default()
        }
    }

    pub fn jump() -> Self {
        Self {
            jump_pressed: true,
            ..Self::default()
        }
    }

    pub fn right() -> Self {
        Self {
            move_right: true,
            ..Self::default()
        }
    }

    pub fn left() -> Self {
        Self {
            move_left: true,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_maps_alternate_bindings() {
        let mut keys = InputState::new();
        keys.key_down(Key::D);
        keys.key_down(Key::W);
        keys.key_down(Key::Shift);
        let input = TickInput::from_keys(&keys);
        assert!(input.move_right);
        assert!(input.jump_pressed);
        assert!(input.dodge_pressed);
        assert!(!input.attack_held);
    }

    #[test]
    fn tap_within_frame_reads_as_release() {
        let mut keys = InputState::new();
        keys.key_down(Key::J);
        keys.key_up(Key::J);
        let input = TickInput::from_keys(&keys);
        assert!(!input.attack_held);
        assert!(input.attack_released);
    }

    #[test]
    fn levels_only_drops_edges() {
        let input = TickInput {
            move_right: true,
            attack_held: true,
            attack_released: true,
            dodge_pressed: true,
            ..TickInput::default()
        }
        .levels_only();
        assert!(input.move_right && input.attack_held);
        assert!(!input.attack_released && !input.dodge_pressed);
    }

    #[test]
    fn opposing_directions_cancel() {
        let input = TickInput {
            move_left: true,
            move_right: true,
            ..TickInput::default()
        };
        assert_eq!(input.move_dir(), 0.0);
        assert_eq!(TickInput::left().move_dir(), -1.0);
    }
}
