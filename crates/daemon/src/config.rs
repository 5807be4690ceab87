// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! TOML event configuration.
//!
//! `config.toml` describes the event and its questions; a sibling
//! `team.toml` optionally supplies display names for generated teams.

use quiz_core::Question;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid config: {0}")]
    Invalid(String),
}

fn default_team_size() -> u32 {
    4
}

/// `[event]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct EventSection {
    pub title: String,
    #[serde(default)]
    pub team_mode: bool,
    #[serde(default = "default_team_size")]
    pub team_size: u32,
    #[serde(default)]
    pub qrcode: Option<String>,
}

/// `[team_separation]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TeamSeparationSection {
    #[serde(default)]
    pub avoid_groups: Vec<String>,
}

/// The whole `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub event: EventSection,
    #[serde(default)]
    pub team_separation: TeamSeparationSection,
    pub questions: Vec<Question>,
}

/// Sibling `team.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
struct TeamNamesFile {
    #[serde(default)]
    team_names: Vec<String>,
}

/// Load and validate `config.toml`.
pub fn load(path: &Path) -> Result<Config, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let config: Config = toml::from_str(&text).map_err(|source| ConfigError::Parse {
        path: path.display().to_string(),
        source,
    })?;
    validate(&config)?;
    Ok(config)
}

/// Load `team.toml` from the same directory as the config file.
/// A missing file is fine; teams fall back to generated names.
pub fn load_team_names(config_path: &Path) -> Result<Vec<String>, ConfigError> {
    let path = config_path
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .join("team.toml");
    if !path.exists() {
        return Ok(Vec::new());
    }
    let text = std::fs::read_to_string(&path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let file: TeamNamesFile = toml::from_str(&text).map_err(|source| ConfigError::Parse {
        path: path.display().to_string(),
        source,
    })?;
    Ok(file.team_names)
}

fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.questions.is_empty() {
        return Err(ConfigError::Invalid("at least one question is required".into()));
    }
    if config.event.team_size == 0 {
        return Err(ConfigError::Invalid("event.team_size must be >= 1".into()));
    }
    for (i, q) in config.questions.iter().enumerate() {
        let n = i + 1;
        if q.choices.len() < 2 {
            return Err(ConfigError::Invalid(format!(
                "question {n} needs at least two choices"
            )));
        }
        if q.correct == 0 || q.correct as usize > q.choices.len() {
            return Err(ConfigError::Invalid(format!(
                "question {n}: correct={} out of range 1..={}",
                q.correct,
                q.choices.len()
            )));
        }
        if q.point == 0 {
            return Err(ConfigError::Invalid(format!("question {n}: point must be >= 1")));
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
