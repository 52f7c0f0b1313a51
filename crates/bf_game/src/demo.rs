//! Built-in input script used when no replay file is given: approach, a full
//! light combo, a dodge back, an immobilize into a combo, then a charged
//! heavy swing, repeated.

use bf_core::input::Key;
use bf_sim::replay::{ReplayFrame, ReplaySequence};

const ROUNDS: usize = 20;

fn hold(keys: &[Key], repeat: u32) -> ReplayFrame {
    ReplayFrame {
        held: keys.to_vec(),
        dt: None,
        repeat,
    }
}

fn combo(frames: &mut Vec<ReplayFrame>) {
    for _ in 0..4 {
        frames.push(hold(&[Key::J], 1));
        frames.push(hold(&[], 16));
    }
}

pub fn demo_replay() -> ReplaySequence {
    let mut frames = Vec::new();
    for _ in 0..ROUNDS {
        frames.push(hold(&[Key::Right], 80));
        combo(&mut frames);

        frames.push(hold(&[Key::K, Key::Left], 1));
        frames.push(hold(&[Key::Left], 24));
        frames.push(hold(&[Key::Right], 30));

        frames.push(hold(&[Key::L], 1));
        frames.push(hold(&[Key::Right], 12));
        combo(&mut frames);

        frames.push(hold(&[Key::J], 40));
        frames.push(hold(&[], 50));
    }
    ReplaySequence {
        seed: None,
        frame_dt: 1.0 / 60.0,
        frames,
    }
}
