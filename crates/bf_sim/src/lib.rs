//! Deterministic boss-fight simulation.
//!
//! [`World::step`] advances one fixed tick from an immutable [`TickInput`] and
//! returns a [`FrameSnapshot`]. Rendering and audio observe the world and
//! drain [`CombatEvent`]s; they never feed back into it.

pub mod attack;
pub mod boss;
pub mod camera;
pub mod collision;
pub mod combat;
pub mod config;
pub mod driver;
pub mod effects;
pub mod entity;
pub mod events;
pub mod input;
pub mod narrative;
pub mod player;
pub mod replay;
pub mod rng;
pub mod session;
pub mod stamina;
pub mod world;

pub use config::{load_tuning_from_path, CombatTuning};
pub use driver::FrameDriver;
pub use events::CombatEvent;
pub use input::TickInput;
pub use narrative::{JsonFileNarrative, Narrative, NarrativeError, NarrativeSource, NoNarrative};
pub use replay::{load_replay_from_path, ReplaySequence};
pub use rng::{AiRng, SeededRng};
pub use session::Session;
pub use world::{FrameSnapshot, GamePhase, World};
