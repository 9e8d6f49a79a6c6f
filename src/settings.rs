//! Run settings
//!
//! Loaded from an optional JSON file; any field left out falls back to its default.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::policy::PolicyKind;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid settings: {0}")]
    Invalid(String),
}

/// Which command semantics drive the robots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CommandMode {
    /// Wait / MoveTo / KickTo, arrival-clamped movement
    Discrete,
    /// Heading + speed + kick flag, velocity integration
    #[default]
    Continuous,
}

impl CommandMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            CommandMode::Discrete => "discrete",
            CommandMode::Continuous => "continuous",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "discrete" | "arrive" => Some(CommandMode::Discrete),
            "continuous" | "drive" => Some(CommandMode::Continuous),
            _ => None,
        }
    }
}

/// Match runner settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Seconds simulated per tick
    pub delta_time: f32,
    /// Ticks per episode
    pub ticks: u32,
    /// Episodes to run; each starts from a fresh terrain and fresh policies
    pub episodes: u32,
    /// Seed for randomized policies
    pub seed: u64,
    pub mode: CommandMode,
    pub blue_policy: PolicyKind,
    pub yellow_policy: PolicyKind,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            delta_time: 1.0,
            ticks: 1000,
            episodes: 1,
            seed: 42,
            mode: CommandMode::Continuous,
            blue_policy: PolicyKind::Chase,
            yellow_policy: PolicyKind::Wait,
        }
    }
}

impl Settings {
    /// Parse settings from a JSON string
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file, or defaults when no path is given
    pub fn load(path: Option<&Path>) -> Result<Self, SettingsError> {
        let Some(path) = path else {
            log::info!("Using default settings");
            return Ok(Self::default());
        };

        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if !self.delta_time.is_finite() || self.delta_time <= 0.0 {
            return Err(SettingsError::Invalid(format!(
                "delta_time must be positive, got {}",
                self.delta_time
            )));
        }
        Ok(())
    }

    /// Seed for one side's policy in a given episode, distinct per side and episode
    pub fn policy_seed(&self, episode: u32, blue: bool) -> u64 {
        self.seed
            .wrapping_add(u64::from(episode).wrapping_mul(2))
            .wrapping_add(u64::from(!blue))
    }
}
