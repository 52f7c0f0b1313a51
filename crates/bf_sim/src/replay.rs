//! Recorded input scripts. Each frame lists the keys held during that real
//! frame and, optionally, the real elapsed time; the runner feeds them through
//! the fixed-step driver so frame pacing is reproduced as well as input.

use bf_core::input::Key;
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize, Clone)]
pub struct ReplaySequence {
    /// Overrides the tuning seed when present.
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default = "default_dt")]
    pub frame_dt: f64,
    pub frames: Vec<ReplayFrame>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ReplayFrame {
    #[serde(default)]
    pub held: Vec<Key>,
    /// Real seconds for this frame; `frame_dt` when absent.
    #[serde(default)]
    pub dt: Option<f64>,
    #[serde(default = "default_repeat")]
    pub repeat: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExpandedFrame {
    pub dt: f64,
    pub held: Vec<Key>,
}

impl ReplaySequence {
    pub fn expanded_frames(&self) -> Vec<ExpandedFrame> {
        let mut out = Vec::new();
        for frame in &self.frames {
            let dt = frame.dt.unwrap_or(self.frame_dt);
            for _ in 0..frame.repeat.max(1) {
                out.push(ExpandedFrame {
                    dt,
                    held: frame.held.clone(),
                });
            }
        }
        out
    }

    pub fn total_time(&self) -> f64 {
        self.expanded_frames().iter().map(|f| f.dt).sum()
    }
}

pub fn load_replay_from_path(path: &Path) -> Result<ReplaySequence, String> {
    let raw =
        fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
    let replay: ReplaySequence = serde_json::from_str(&raw)
        .map_err(|e| format!("Failed to parse replay JSON {}: {e}", path.display()))?;
    validate_replay(&replay)?;
    Ok(replay)
}

pub fn validate_replay(replay: &ReplaySequence) -> Result<(), String> {
    if replay.frame_dt <= 0.0 {
        return Err("Replay validation failed: frame_dt must be > 0".to_string());
    }
    if replay.frames.is_empty() {
        return Err("Replay validation failed: frames list is empty".to_string());
    }
    for (i, frame) in replay.frames.iter().enumerate() {
        if let Some(dt) = frame.dt {
            if !dt.is_finite() || dt < 0.0 {
                return Err(format!("Replay validation failed: frame {i} has invalid dt {dt}"));
            }
        }
    }
    Ok(())
}

const fn default_dt() -> f64 {
    1.0 / 60.0
}

const fn default_repeat() -> u32 {
    1
}
