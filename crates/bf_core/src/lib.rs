//! Engine plumbing shared by the simulation and the runner: the fixed-step
//! clock and keyboard-style input tracking. Nothing in here knows about combat.

pub mod input;
pub mod time;

pub use input::{InputState, Key};
pub use time::TimeState;
