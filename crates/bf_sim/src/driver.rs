//! Glue between real frames and simulation ticks: feeds one frame of held
//! keys and elapsed time into the fixed-step clock and runs the resulting
//! ticks against a session.

use bf_core::input::{InputState, Key};
use bf_core::time::TimeState;

use crate::input::TickInput;
use crate::session::Session;
use crate::world::FrameSnapshot;

pub struct FrameDriver {
    pub time: TimeState,
    pub input: InputState,
}

impl FrameDriver {
    pub fn new() -> Self {
        Self {
            time: TimeState::new(),
            input: InputState::new(),
        }
    }

    /// Runs every tick owed for `real_dt` seconds. Returns the snapshot of
    /// the last tick, or `None` when the frame was too short to tick.
    pub fn run_frame(
        &mut self,
        session: &mut Session,
        real_dt: f64,
        held: &[Key],
    ) -> Option<FrameSnapshot> {
        self.input.set_held(held);
        self.time.begin_frame_with_dt(real_dt);

        let mut last = None;
        while self.time.should_step() {
            let mut tick = TickInput::from_keys(&self.input);
            if self.time.steps_this_frame > 1 {
                tick = tick.levels_only();
            }
            last = Some(session.step(tick));
        }
        self.time.end_frame();

        // Edges survive a frame that ran no tick so a quick tap is not lost.
        if self.time.steps_this_frame > 0 {
            self.input.end_frame();
        }
        last
    }
}

impl Default for FrameDriver {
    fn default() -> Self {
        Self::new()
    }
}
