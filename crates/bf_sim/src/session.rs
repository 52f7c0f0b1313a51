//! Coarse run lifecycle: `Menu -> Loading -> Playing -> {GameOver | Victory}`,
//! with restart back into `Playing`. Only `Playing` advances combat; every
//! other phase is an inert pass-through for the UI layer.

use crate::config::CombatTuning;
use crate::input::TickInput;
use crate::narrative::{resolve_narrative, Narrative, NarrativeSource};
use crate::rng::AiRng;
use crate::world::{FrameSnapshot, GamePhase, World};

pub struct Session {
    world: World,
    narrative: Option<Narrative>,
}

impl Session {
    pub fn new(tuning: CombatTuning) -> Self {
        Self::from_world(World::new(tuning))
    }

    pub fn with_rng(tuning: CombatTuning, rng: Box<dyn AiRng>) -> Self {
        Self::from_world(World::with_rng(tuning, rng))
    }

    fn from_world(mut world: World) -> Self {
        world.set_phase(GamePhase::Menu);
        Self {
            world,
            narrative: None,
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.world.phase()
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn narrative(&self) -> Option<&Narrative> {
        self.narrative.as_ref()
    }

    pub fn begin_loading(&mut self) -> bool {
        if self.phase() != GamePhase::Menu {
            return false;
        }
        self.world.set_phase(GamePhase::Loading);
        true
    }

    /// Fetches the narrative (falling back on failure) and starts a fresh run.
    /// Accepted from `Menu` or `Loading`.
    pub fn start_run(&mut self, source: &mut dyn NarrativeSource) -> bool {
        match self.phase() {
            GamePhase::Menu | GamePhase::Loading => {}
            other => {
                log::debug!("start_run ignored in {other:?}");
                return false;
            }
        }
        let narrative = resolve_narrative(source);
        log::info!("{}: {}", narrative.chapter_title, narrative.boss_name);
        self.narrative = Some(narrative);
        self.world.reset();
        true
    }

    /// Rebuilds the run after it ended, reusing the cached narrative.
    pub fn restart(&mut self) -> bool {
        if !self.phase().is_finished() {
            return false;
        }
        log::info!("restarting run after {:?}", self.phase());
        self.world.reset();
        true
    }

    pub fn return_to_menu(&mut self) {
        self.world.set_phase(GamePhase::Menu);
    }

    pub fn step(&mut self, input: TickInput) -> FrameSnapshot {
        self.world.step(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::narrative::NoNarrative;
    use crate::rng::FixedRng;

    fn session() -> Session {
        Session::with_rng(CombatTuning::default(), Box::new(FixedRng(1.0)))
    }

    #[test]
    fn starts_in_menu_and_stays_inert() {
        let mut s = session();
        assert_eq!(s.phase(), GamePhase::Menu);
        let before = s.world().player.body.clone();
        for _ in 0..10 {
            let snap = s.step(TickInput::right());
            assert_eq!(snap.tick, 0);
        }
        assert_eq!(s.world().player.body, before);
    }

    #[test]
    fn run_starts_with_fallback_narrative() {
        let mut s = session();
        assert!(s.begin_loading());
        assert!(!s.begin_loading(), "already loading");
        assert!(s.start_run(&mut NoNarrative));
        assert_eq!(s.phase(), GamePhase::Playing);
        assert_eq!(s.narrative(), Some(&Narrative::fallback()));

        let snap = s.step(TickInput::right());
        assert_eq!(snap.tick, 1);
        assert!(!s.start_run(&mut NoNarrative), "no restart mid-run");
    }

    #[test]
    fn restart_only_after_the_match_ends() {
        let mut s = session();
        s.start_run(&mut NoNarrative);
        assert!(!s.restart());

        s.world_mut().player.body.set_health(0.0);
        let snap = s.step(TickInput::default());
        assert_eq!(snap.phase, GamePhase::GameOver);

        assert!(s.restart());
        assert_eq!(s.phase(), GamePhase::Playing);
        assert_eq!(s.world().player.body.health(), 100.0);
        assert!(!s.world().player.body.is_dead());
        assert!(s.narrative().is_some(), "narrative survives a restart");
    }

    #[test]
    fn return_to_menu_pauses_combat() {
        let mut s = session();
        s.start_run(&mut NoNarrative);
        s.step(TickInput::default());
        s.return_to_menu();
        let snap = s.step(TickInput::right());
        assert_eq!(snap.phase, GamePhase::Menu);
        assert_eq!(snap.tick, 1);
    }
}
