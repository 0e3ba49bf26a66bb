//! # ixmon-settings
//!
//! **Tier 0 (Pure Settings)**
//!
//! Clap-free settings for the feed loader, the health resolver and the
//! knowledge-base store. Every section defaults, so an empty file (or no
//! file at all) is a valid configuration.
//!
//! ## What belongs here
//! * Pure data types with Serde derive
//! * Default values
//! * TOML parsing of `ixmon.toml`
//!
//! ## What does NOT belong here
//! * Clap parsing (see the `ixmon` binary)
//! * Business logic

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// File name looked up in the working directory and the user config dir.
pub const CONFIG_FILE_NAME: &str = "ixmon.toml";

/// Errors from loading settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to read settings file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse settings TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid health thresholds: degraded minimum {degraded} exceeds stable minimum {stable}")]
    InvertedThresholds { stable: u32, degraded: u32 },
}

/// Root settings document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub health: HealthSettings,
    pub feeds: FeedSettings,
    pub kb: KbSettings,
}

impl Settings {
    /// Parse settings from a TOML string and validate them.
    pub fn from_toml(s: &str) -> Result<Self, SettingsError> {
        let settings: Settings = toml::from_str(s)?;
        settings.health.validate()?;
        Ok(settings)
    }

    /// Load settings from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }
}

/// Inclusive lower bounds (success rate, percent) for the health states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthSettings {
    /// Success rate at or above which the exchange is "Stable".
    pub stable_min_pct: u32,

    /// Success rate at or above which the exchange is "Degraded" rather than "At Risk".
    pub degraded_min_pct: u32,
}

impl Default for HealthSettings {
    fn default() -> Self {
        Self {
            stable_min_pct: 95,
            degraded_min_pct: 85,
        }
    }
}

impl HealthSettings {
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.degraded_min_pct > self.stable_min_pct {
            return Err(SettingsError::InvertedThresholds {
                stable: self.stable_min_pct,
                degraded: self.degraded_min_pct,
            });
        }
        Ok(())
    }
}

/// Where the four upstream feeds, the OID directory and the governance
/// cases used to seed the knowledge base are read from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedSettings {
    /// Directory holding the feed files (defaults to the working directory).
    pub dir: Option<PathBuf>,
    pub findings: String,
    pub executions: String,
    pub telemetry: String,
    pub integration_health: String,
    pub oids: String,
    pub cases: String,
}

impl Default for FeedSettings {
    fn default() -> Self {
        Self {
            dir: None,
            findings: "findings.json".to_string(),
            executions: "executions.json".to_string(),
            telemetry: "telemetry.json".to_string(),
            integration_health: "integration-health.json".to_string(),
            oids: "oids.json".to_string(),
            cases: "cases.json".to_string(),
        }
    }
}

impl FeedSettings {
    /// Resolved feed directory.
    pub fn dir(&self) -> PathBuf {
        self.dir.clone().unwrap_or_else(|| PathBuf::from("."))
    }
}

/// Knowledge-base persistence location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KbSettings {
    /// Directory for the file-backed key-value store. `None` means the
    /// caller picks a per-user state directory.
    pub store_dir: Option<PathBuf>,

    /// Logical key the whole article collection is stored under.
    pub key: String,
}

impl Default for KbSettings {
    fn default() -> Self {
        Self {
            store_dir: None,
            key: default_kb_key(),
        }
    }
}

fn default_kb_key() -> String {
    "ixmon.kb.articles".to_string()
}
