//! Bladefall headless runner.
//!
//! Plays a replay file (or the built-in demo script) through the fixed-step
//! driver and logs how the fight went:
//!
//!   bf_game [--tuning <file>] [--replay <file>] [--narrative <file>] [--seed <u64>]
//!
//! Set `RUST_LOG=debug` to see per-hit combat resolution.

mod demo;

use std::path::PathBuf;

use bf_sim::events::CombatEvent;
use bf_sim::narrative::{JsonFileNarrative, NarrativeSource, NoNarrative};
use bf_sim::{load_replay_from_path, load_tuning_from_path, CombatTuning, FrameDriver, Session};

#[derive(Debug, Default, PartialEq)]
struct RunArgs {
    tuning: Option<PathBuf>,
    replay: Option<PathBuf>,
    narrative: Option<PathBuf>,
    seed: Option<u64>,
}

fn usage() -> String {
    "Usage: bf_game [--tuning <file>] [--replay <file>] [--narrative <file>] [--seed <u64>]"
        .to_string()
}

fn parse_args(args: &[String]) -> Result<RunArgs, String> {
    let mut out = RunArgs::default();
    let mut iter = args.iter();
    while let Some(flag) = iter.next() {
        let mut value = || {
            iter.next()
                .cloned()
                .ok_or_else(|| format!("Missing value for {flag}\n{}", usage()))
        };
        match flag.as_str() {
            "--tuning" => out.tuning = Some(PathBuf::from(value()?)),
            "--replay" => out.replay = Some(PathBuf::from(value()?)),
            "--narrative" => out.narrative = Some(PathBuf::from(value()?)),
            "--seed" => {
                let raw = value()?;
                let seed = raw
                    .parse::<u64>()
                    .map_err(|e| format!("Invalid seed '{raw}': {e}"))?;
                out.seed = Some(seed);
            }
            other => return Err(format!("Unknown argument '{other}'\n{}", usage())),
        }
    }
    Ok(out)
}

#[derive(Debug, Default)]
struct EventTally {
    player_hits: u32,
    boss_hits: u32,
    dodges: u32,
    immobilizes: u32,
    shatters: u32,
}

impl EventTally {
    fn record(&mut self, event: &CombatEvent) {
        match event {
            CombatEvent::PlayerStrike { .. } => self.player_hits += 1,
            CombatEvent::BossStrike { .. } => self.boss_hits += 1,
            CombatEvent::Dodged => self.dodges += 1,
            CombatEvent::ImmobilizeCast => self.immobilizes += 1,
            CombatEvent::ImmobilizeShattered => self.shatters += 1,
            _ => {}
        }
    }
}

fn run(args: &RunArgs) -> Result<(), String> {
    let mut tuning = match &args.tuning {
        Some(path) => load_tuning_from_path(path)?,
        None => CombatTuning::default(),
    };
    let replay = match &args.replay {
        Some(path) => load_replay_from_path(path)?,
        None => demo::demo_replay(),
    };
    if let Some(seed) = args.seed.or(replay.seed) {
        tuning.seed = seed;
    }
    log::info!(
        "Loaded {} replay frames ({:.2}s), seed {:#x}",
        replay.frames.len(),
        replay.total_time(),
        tuning.seed
    );

    let mut source: Box<dyn NarrativeSource> = match &args.narrative {
        Some(path) => Box::new(JsonFileNarrative::new(path)),
        None => Box::new(NoNarrative),
    };
    let mut session = Session::new(tuning);
    session.begin_loading();
    if !session.start_run(source.as_mut()) {
        return Err("Failed to start run".to_string());
    }
    if let Some(narrative) = session.narrative() {
        log::info!("{}", narrative.intro_text);
    }

    let mut driver = FrameDriver::new();
    let mut tally = EventTally::default();
    for frame in replay.expanded_frames() {
        driver.run_frame(&mut session, frame.dt, &frame.held);
        for event in session.world_mut().drain_events() {
            tally.record(&event);
        }
        if session.phase().is_finished() {
            break;
        }
    }

    let snap = session.world().snapshot();
    log::info!(
        "Finished after {} ticks ({} frames): {:?}",
        snap.tick,
        driver.time.frame_count,
        snap.phase
    );
    log::info!(
        "Player {:.0}/{:.0} HP, boss {:.0}/{:.0} HP, score {}",
        snap.player_health,
        snap.player_max_health,
        snap.boss_health,
        snap.boss_max_health,
        snap.score
    );
    log::info!(
        "Hits landed {}, taken {}, dodges {}, immobilizes {} ({} shattered)",
        tally.player_hits,
        tally.boss_hits,
        tally.dodges,
        tally.immobilizes,
        tally.shatters
    );
    if driver.time.discarded_time > 0.0 {
        log::warn!(
            "Discarded {:.1}ms of backlog during playback",
            driver.time.discarded_time * 1000.0
        );
    }
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Bladefall runner starting...");

    let args: Vec<String> = std::env::args().skip(1).collect();
    if let Err(err) = parse_args(&args).and_then(|args| run(&args)) {
        log::error!("{err}");
        std::process::exit(1);
    }
}
