//! Owned simulation state and the per-tick step.
//!
//! Tick order: player logic, immobilize cast, player hit resolution, boss
//! logic and its strike, body separation, death check. Effects and camera
//! advance last and keep running outside `Playing`.

use crate::boss::Boss;
use crate::camera::Camera2D;
use crate::collision::{self, Frozen};
use crate::combat;
use crate::config::CombatTuning;
use crate::effects::{Effects, FROST};
use crate::entity::EntityKind;
use crate::events::CombatEvent;
use crate::input::TickInput;
use crate::player::Player;
use crate::rng::{AiRng, SeededRng};
use crate::stamina::Stamina;

const EFFECTS_SEED_SALT: u64 = 0x9e37_79b9_7f4a_7c15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GamePhase {
    Menu,
    Loading,
    Playing,
    GameOver,
    Victory,
}

impl GamePhase {
    pub fn is_finished(self) -> bool {
        matches!(self, Self::GameOver | Self::Victory)
    }
}

/// Read-only view of the run after a tick, for the HUD.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameSnapshot {
    pub tick: u64,
    pub phase: GamePhase,
    pub player_health: f32,
    pub player_max_health: f32,
    pub boss_health: f32,
    pub boss_max_health: f32,
    pub stamina: f32,
    pub score: u32,
    pub shake: f32,
    pub camera_x: f32,
    pub boss_immobilized: bool,
    pub combo_count: u8,
}

pub struct World {
    tuning: CombatTuning,
    pub player: Player,
    pub boss: Option<Boss>,
    pub stamina: Stamina,
    score: u32,
    effects: Effects,
    camera: Camera2D,
    phase: GamePhase,
    tick: u64,
    events: Vec<CombatEvent>,
    rng: Box<dyn AiRng>,
}

impl World {
    /// A fresh run using a ChaCha stream seeded from the tuning.
    pub fn new(tuning: CombatTuning) -> Self {
        let rng = Box::new(SeededRng::new(tuning.seed));
        Self::with_rng(tuning, rng)
    }

    pub fn with_rng(tuning: CombatTuning, rng: Box<dyn AiRng>) -> Self {
        let player = Player::new(&tuning);
        let boss = Boss::new(&tuning);
        let mut camera = Camera2D::new(&tuning.arena);
        camera.snap(&player.body, Some(&boss.body), &tuning.arena);
        Self {
            stamina: Stamina::new(tuning.player.stamina_max),
            effects: Effects::new(tuning.seed ^ EFFECTS_SEED_SALT),
            player,
            boss: Some(boss),
            score: 0,
            camera,
            phase: GamePhase::Playing,
            tick: 0,
            events: Vec::new(),
            rng,
            tuning,
        }
    }

    /// Rebuilds both combatants and run counters. The random stream carries on.
    pub fn reset(&mut self) {
        self.player = Player::new(&self.tuning);
        let boss = Boss::new(&self.tuning);
        self.camera
            .snap(&self.player.body, Some(&boss.body), &self.tuning.arena);
        self.boss = Some(boss);
        self.stamina = Stamina::new(self.tuning.player.stamina_max);
        self.effects = Effects::new(self.tuning.seed ^ EFFECTS_SEED_SALT);
        self.score = 0;
        self.tick = 0;
        self.events.clear();
        self.phase = GamePhase::Playing;
    }

    pub fn tuning(&self) -> &CombatTuning {
        &self.tuning
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub(crate) fn set_phase(&mut self, phase: GamePhase) {
        self.phase = phase;
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn effects(&self) -> &Effects {
        &self.effects
    }

    pub fn camera(&self) -> &Camera2D {
        &self.camera
    }

    pub fn events(&self) -> &[CombatEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<CombatEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn step(&mut self, input: TickInput) -> FrameSnapshot {
        if self.phase == GamePhase::Playing {
            self.step_combat(&input);
        }
        self.effects.step();
        self.camera.update(
            &self.player.body,
            self.boss.as_ref().map(|b| &b.body),
            &self.tuning.arena,
        );
        self.snapshot()
    }

    fn step_combat(&mut self, input: &TickInput) {
        self.tick += 1;
        self.stamina.regen(self.tuning.player.stamina_regen);

        // Sampled before the steps consume their freeze.
        let player_frozen = self.player.body.is_frozen();
        let target = self.boss.as_ref().map(Boss::target_info);
        let actions = self.player.step(
            input,
            target,
            &mut self.stamina,
            &self.tuning,
            &mut self.events,
        );

        if let Some(boss) = self.boss.as_mut() {
            if actions.cast_immobilize && boss.immobilize(&self.tuning) {
                self.effects.burst(boss.body.center(), 20, FROST, 4.0);
                self.events.push(CombatEvent::ImmobilizeCast);
                log::info!("boss immobilized at tick {}", self.tick);
            }

            if !player_frozen {
                if let Some(report) = combat::resolve_player_attack(
                    &mut self.player,
                    boss,
                    &self.tuning,
                    &mut self.effects,
                    &mut self.events,
                ) {
                    self.score = self.score.saturating_add(report.damage.floor() as u32);
                }
            }

            let boss_frozen = boss.body.is_frozen();
            let view = self.player.view(self.tuning.arena.ground_y);
            if let Some(strike) = boss.step(
                &view,
                &self.tuning,
                &mut *self.rng,
                &mut self.effects,
                &mut self.events,
            ) {
                // A player in hitstop cannot be struck.
                if !player_frozen && !self.player.body.is_frozen() {
                    combat::apply_boss_strike(
                        &strike,
                        boss,
                        &mut self.player,
                        &mut self.effects,
                        &mut self.events,
                    );
                }
            }

            let frozen = Frozen {
                player: player_frozen || self.player.body.is_frozen(),
                boss: boss_frozen || boss.body.is_frozen(),
            };
            collision::separate(&mut self.player, boss, &self.tuning.arena, frozen);
        }

        self.check_deaths();
    }

    fn check_deaths(&mut self) {
        let boss_dead = self.boss.as_ref().is_some_and(|b| b.body.is_dead());
        if boss_dead {
            self.finish(GamePhase::Victory, EntityKind::Boss);
        } else if self.player.body.is_dead() {
            self.finish(GamePhase::GameOver, EntityKind::Player);
        }
    }

    fn finish(&mut self, phase: GamePhase, fallen: EntityKind) {
        self.events.push(CombatEvent::Died(fallen));
        self.phase = phase;
        log::info!(
            "{} fell at tick {}: {:?}, score {}",
            fallen.label(),
            self.tick,
            phase,
            self.score
        );
    }

    pub fn snapshot(&self) -> FrameSnapshot {
        let (boss_health, boss_max_health, boss_immobilized) = match &self.boss {
            Some(boss) => (
                boss.body.health().max(0.0),
                boss.body.max_health(),
                boss.is_immobilized(),
            ),
            None => (0.0, 0.0, false),
        };
        FrameSnapshot {
            tick: self.tick,
            phase: self.phase,
            player_health: self.player.body.health().max(0.0),
            player_max_health: self.player.body.max_health(),
            boss_health,
            boss_max_health,
            stamina: self.stamina.value(),
            score: self.score,
            shake: self.effects.shake(),
            camera_x: self.camera.x,
            boss_immobilized,
            combo_count: self.player.combo_count,
        }
    }
}
