//! Flavor text shown at the start of a run. Produced by an external
//! collaborator; the simulation only carries it through to the UI and falls
//! back to a built-in record whenever the source fails.

use serde::Deserialize;
use std::fs;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Narrative {
    pub chapter_title: String,
    pub intro_text: String,
    pub boss_name: String,
    pub boss_description: String,
}

impl Narrative {
    pub fn fallback() -> Self {
        Self {
            chapter_title: "Chapter I: The Ashen Gate".to_string(),
            intro_text: "The gate has stood sealed for a hundred winters. Tonight it opens."
                .to_string(),
            boss_name: "The Hollow Warden".to_string(),
            boss_description: "A sentinel of iron and grief, bound to the gate it guards."
                .to_string(),
        }
    }

    fn validate(&self) -> Result<(), NarrativeError> {
        let fields = [
            ("chapterTitle", &self.chapter_title),
            ("bossName", &self.boss_name),
        ];
        for (name, value) in fields {
            if value.trim().is_empty() {
                return Err(NarrativeError::Malformed(format!("{name} is empty")));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum NarrativeError {
    #[error("narrative source unavailable: {0}")]
    Unavailable(String),
    #[error("narrative record malformed: {0}")]
    Malformed(String),
}

pub trait NarrativeSource {
    fn fetch(&mut self) -> Result<Narrative, NarrativeError>;
}

/// Reads a narrative record from a JSON file.
pub struct JsonFileNarrative {
    path: PathBuf,
}

impl JsonFileNarrative {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl NarrativeSource for JsonFileNarrative {
    fn fetch(&mut self) -> Result<Narrative, NarrativeError> {
        let raw = fs::read_to_string(&self.path).map_err(|e| {
            NarrativeError::Unavailable(format!("Failed to read {}: {e}", self.path.display()))
        })?;
        let narrative: Narrative = serde_json::from_str(&raw).map_err(|e| {
            NarrativeError::Malformed(format!("{}: {e}", self.path.display()))
        })?;
        narrative.validate()?;
        Ok(narrative)
    }
}

/// Source used when no collaborator is configured.
pub struct NoNarrative;

impl NarrativeSource for NoNarrative {
    fn fetch(&mut self) -> Result<Narrative, NarrativeError> {
        Err(NarrativeError::Unavailable("no source configured".to_string()))
    }
}

/// Fetches from `source`, substituting the fallback record on any failure.
pub fn resolve_narrative(source: &mut dyn NarrativeSource) -> Narrative {
    match source.fetch() {
        Ok(narrative) => narrative,
        Err(e) => {
            log::warn!("{e}; using fallback narrative");
            Narrative::fallback()
        }
    }
}
