//! # Tracker Configuration
//!
//! Tunables shared by the aggregation engine and the live tracker: the
//! attribute schema new records are built from, the neutral score used by
//! the finalizer and the seed fallback, and the ranking depth.
//!
//! ## Usage
//! ```rust
//! use pitchside_core::config::TrackerConfig;
//!
//! let config = TrackerConfig::default();
//! let legacy = TrackerConfig::legacy();
//! assert!(legacy.schema.tactical.is_empty());
//! assert!(config.validate().is_ok());
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::{env, fs};

use crate::error::{CoreError, Result};
use crate::models::GroupType;

/// Environment variable pointing at a JSON or YAML config file.
pub const CONFIG_PATH_ENV: &str = "PITCHSIDE_CONFIG_PATH";

/// One attribute in the schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeDef {
    pub key: String,
    pub label: String,
}

impl AttributeDef {
    pub fn new(key: &str, label: &str) -> Self {
        Self { key: key.to_string(), label: label.to_string() }
    }
}

/// Attribute keys per group, in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeSchema {
    pub technical: Vec<AttributeDef>,
    pub physical: Vec<AttributeDef>,
    /// Empty for the legacy two-group schema.
    #[serde(default)]
    pub tactical: Vec<AttributeDef>,
}

impl Default for AttributeSchema {
    fn default() -> Self {
        Self {
            technical: vec![
                AttributeDef::new("passing", "Passing"),
                AttributeDef::new("first_touch", "First touch"),
                AttributeDef::new("dribbling", "Dribbling"),
                AttributeDef::new("shooting", "Shooting"),
                AttributeDef::new("heading", "Heading"),
                AttributeDef::new("crossing", "Crossing"),
            ],
            physical: vec![
                AttributeDef::new("speed", "Speed"),
                AttributeDef::new("stamina", "Stamina"),
                AttributeDef::new("strength", "Strength"),
                AttributeDef::new("agility", "Agility"),
            ],
            tactical: vec![
                AttributeDef::new("positioning", "Positioning"),
                AttributeDef::new("decision_making", "Decision making"),
                AttributeDef::new("pressing", "Pressing"),
                AttributeDef::new("off_the_ball", "Off the ball"),
                AttributeDef::new("communication", "Communication"),
            ],
        }
    }
}

impl AttributeSchema {
    pub fn defs(&self, group: GroupType) -> &[AttributeDef] {
        match group {
            GroupType::Technical => &self.technical,
            GroupType::Physical => &self.physical,
            GroupType::Tactical => &self.tactical,
        }
    }

    pub fn keys(&self, group: GroupType) -> Vec<&str> {
        self.defs(group).iter().map(|d| d.key.as_str()).collect()
    }

    pub fn has_tactical(&self) -> bool {
        !self.tactical.is_empty()
    }

    /// Display label for a key. Keys outside the schema (older records)
    /// fall back to a humanized form of the key.
    pub fn label_for(&self, group: GroupType, key: &str) -> String {
        self.defs(group)
            .iter()
            .find(|d| d.key == key)
            .map(|d| d.label.clone())
            .unwrap_or_else(|| humanize_key(key))
    }
}

/// `first_touch` -> `First touch`
pub fn humanize_key(key: &str) -> String {
    let spaced = key.replace(['_', '-'], " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackerConfig {
    #[serde(default)]
    pub schema: AttributeSchema,
    /// Score given to a finalized empty capture log.
    #[serde(default = "default_neutral")]
    pub neutral_score: f64,
    /// Value written into every physical key of a finalized capture.
    #[serde(default = "default_neutral")]
    pub physical_baseline: f64,
    /// Seed value for keys without history.
    #[serde(default = "default_neutral")]
    pub seed_default: f64,
    /// How many attributes the best/worst lists hold.
    #[serde(default = "default_ranking_depth")]
    pub ranking_depth: usize,
    /// Nominal half length, minutes.
    #[serde(default = "default_half_length")]
    pub half_length_minutes: u32,
}

fn default_neutral() -> f64 {
    5.0
}

fn default_ranking_depth() -> usize {
    3
}

fn default_half_length() -> u32 {
    45
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            schema: AttributeSchema::default(),
            neutral_score: default_neutral(),
            physical_baseline: default_neutral(),
            seed_default: default_neutral(),
            ranking_depth: default_ranking_depth(),
            half_length_minutes: default_half_length(),
        }
    }
}

impl TrackerConfig {
    /// Two-group schema used before tactical ratings existed.
    pub fn legacy() -> Self {
        let mut cfg = Self::default();
        cfg.schema.tactical.clear();
        cfg
    }

    /// Youth formats play shorter halves.
    pub fn youth(half_length_minutes: u32) -> Self {
        Self { half_length_minutes, ..Self::default() }
    }

    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Load from a file; `.yaml`/`.yml` is parsed as YAML, anything else as JSON.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config = match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml(&content)?,
            _ => Self::from_json(&content)?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Config from `PITCHSIDE_CONFIG_PATH` if set, otherwise the default.
    pub fn from_env_or_default() -> Result<Self> {
        let Ok(path) = env::var(CONFIG_PATH_ENV) else {
            return Ok(Self::default());
        };

        let path = path.trim();
        if path.is_empty() {
            return Ok(Self::default());
        }

        log::info!("Loading tracker config from {}={}", CONFIG_PATH_ENV, path);
        Self::load(Path::new(path))
    }

    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("neutral_score", self.neutral_score),
            ("physical_baseline", self.physical_baseline),
            ("seed_default", self.seed_default),
        ] {
            if !(0.0..=10.0).contains(&value) {
                return Err(CoreError::InvalidConfig(format!("{name} must be within 0..=10, got {value}")));
            }
        }
        if self.ranking_depth == 0 {
            return Err(CoreError::InvalidConfig("ranking_depth must be at least 1".to_string()));
        }
        if self.schema.technical.is_empty() || self.schema.physical.is_empty() {
            return Err(CoreError::InvalidConfig(
                "schema needs at least one technical and one physical attribute".to_string(),
            ));
        }
        for group in GroupType::ALL {
            let keys = self.schema.keys(group);
            if let Some(dup) = keys.iter().enumerate().find(|(i, k)| keys[..*i].contains(*k)) {
                return Err(CoreError::InvalidConfig(format!(
                    "duplicate {} attribute '{}'",
                    group.label().to_lowercase(),
                    dup.1
                )));
            }
        }
        Ok(())
    }
}
