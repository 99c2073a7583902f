//! Board configuration parameters
//!
//! Which pins the robot uses and how the status output is driven.
//! Values come from a JSON file at startup; anything omitted falls back
//! to the defaults in [`crate::pins`].

use core::fmt;
use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::app::ports::NumberingMode;
use crate::drivers::robot_state::RobotState;
use crate::pins;

/// A digital output and the level it is driven to at bring-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputPinConfig {
    pub pin: u32,
    #[serde(default)]
    pub initial_high: bool,
}

/// Core board configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Pin-identifier scheme for every pin number below
    pub numbering_mode: NumberingMode,

    // --- Status pattern ---
    /// Pin wired to the status LED controller
    pub status_pin: u32,
    /// PWM frame rate (Hz)
    pub status_freq_hz: u32,
    /// Pattern applied right after bring-up
    pub initial_state: Option<RobotState>,

    // --- Digital I/O ---
    /// Outputs configured at bring-up
    pub outputs: Vec<OutputPinConfig>,
    /// Inputs configured at bring-up
    pub inputs: Vec<u32>,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            numbering_mode: NumberingMode::Board,

            status_pin: pins::STATUS_PWM_PIN,
            status_freq_hz: pins::STATUS_PWM_FREQ_HZ, // 20 ms frame
            initial_state: None,

            outputs: Vec::new(),
            inputs: Vec::new(),
        }
    }
}

impl BoardConfig {
    /// Parse and validate a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("{}: {}", path.display(), e)))?;
        Self::from_json_str(&json)
    }

    /// Reject values the drivers would refuse at runtime.
    ///
    /// Every pin may appear at most once across the status pin, outputs
    /// and inputs: a physical pin has exactly one owner.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !RobotState::fits_frequency(self.status_freq_hz) {
            return Err(ConfigError::ValidationFailed(
                "status_freq_hz must be non-zero and short enough for the longest pulse",
            ));
        }

        let mut seen = HashSet::new();
        seen.insert(self.status_pin);
        let digital = self
            .outputs
            .iter()
            .map(|o| o.pin)
            .chain(self.inputs.iter().copied());
        for pin in digital {
            if !seen.insert(pin) {
                return Err(ConfigError::DuplicatePin(pin));
            }
        }
        Ok(())
    }
}

/// Errors from loading or validating a [`BoardConfig`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// File could not be read.
    Io(String),
    /// Document is not valid JSON for this schema.
    Parse(String),
    /// A pin appears more than once.
    DuplicatePin(u32),
    /// A field failed range validation.
    ValidationFailed(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(msg) => write!(f, "I/O error: {}", msg),
            Self::Parse(msg) => write!(f, "parse error: {}", msg),
            Self::DuplicatePin(pin) => write!(f, "pin {} is assigned more than once", pin),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}
