//! Robot operational states and their status-pattern pulse widths.
//!
//! The status LED controller on the robot reads an RC-servo style pulse
//! and selects one of its built-in animations from the pulse width.  Each
//! [`RobotState`] maps to exactly one width:
//!
//! | State              | µs   | Meaning              |
//! |--------------------|------|----------------------|
//! | `BREATH_RED`       | 1415 | Docked               |
//! | `BREATH_SLOW`      | 1545 | Idle                 |
//! | `LIGHT_CHASE_RED`  | 1345 | To pickup station    |
//! | `RED`              | 1885 | At pickup station    |
//! | `CONFETTI`         | 1065 | Item picked up       |
//! | `LIGHT_CHASE_BLUE` | 1355 | To delivery          |
//! | `BLUE`             | 1935 | At delivery          |
//! | `TWINKLES`         | 1225 | Item delivered       |
//! | `LIGHT_CHASE_GRAY` | 1365 | Item returning       |
//! | `HEARTBEAT_SLOW`   | 1515 | Charging             |
//! | `STROBE_RED`       | 1445 | Critical error       |

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::StatusError;

/// Closed set of states the status pattern can encode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u16)]
pub enum RobotState {
    BreathRed = 1415,
    BreathSlow = 1545,
    LightChaseRed = 1345,
    Red = 1885,
    Confetti = 1065,
    LightChaseBlue = 1355,
    Blue = 1935,
    Twinkles = 1225,
    LightChaseGray = 1365,
    HeartbeatSlow = 1515,
    StrobeRed = 1445,
}

impl RobotState {
    /// Every state, in table order.
    pub const ALL: [Self; 11] = [
        Self::BreathRed,
        Self::BreathSlow,
        Self::LightChaseRed,
        Self::Red,
        Self::Confetti,
        Self::LightChaseBlue,
        Self::Blue,
        Self::Twinkles,
        Self::LightChaseGray,
        Self::HeartbeatSlow,
        Self::StrobeRed,
    ];

    /// Widest pulse in the table (`BLUE`).
    pub const LONGEST_PULSE_US: u16 = 1935;

    /// Highest PWM frequency whose period still fits every pulse width.
    pub const MAX_FREQ_HZ: u32 = 1_000_000 / Self::LONGEST_PULSE_US as u32;

    /// Whether every state can be encoded at `freq_hz`.
    pub const fn fits_frequency(freq_hz: u32) -> bool {
        freq_hz != 0 && freq_hz <= Self::MAX_FREQ_HZ
    }

    /// High time of the pulse in microseconds.
    pub const fn pulse_width_us(self) -> u16 {
        self as u16
    }

    /// Duty cycle (0–100 %) that produces this pulse width at `freq_hz`.
    ///
    /// `freq_hz` must be non-zero.
    pub fn duty_cycle_percent(self, freq_hz: u32) -> f64 {
        let period_us = 1_000_000.0 / f64::from(freq_hz);
        (f64::from(self.pulse_width_us()) / period_us) * 100.0
    }

    /// Canonical name, e.g. `LIGHT_CHASE_RED`.
    pub const fn name(self) -> &'static str {
        match self {
            Self::BreathRed => "BREATH_RED",
            Self::BreathSlow => "BREATH_SLOW",
            Self::LightChaseRed => "LIGHT_CHASE_RED",
            Self::Red => "RED",
            Self::Confetti => "CONFETTI",
            Self::LightChaseBlue => "LIGHT_CHASE_BLUE",
            Self::Blue => "BLUE",
            Self::Twinkles => "TWINKLES",
            Self::LightChaseGray => "LIGHT_CHASE_GRAY",
            Self::HeartbeatSlow => "HEARTBEAT_SLOW",
            Self::StrobeRed => "STROBE_RED",
        }
    }

    /// What the pattern tells an observer about the robot.
    pub const fn meaning(self) -> &'static str {
        match self {
            Self::BreathRed => "docked",
            Self::BreathSlow => "idle",
            Self::LightChaseRed => "to pickup station",
            Self::Red => "at pickup station",
            Self::Confetti => "item picked up",
            Self::LightChaseBlue => "to delivery",
            Self::Blue => "at delivery",
            Self::Twinkles => "item delivered",
            Self::LightChaseGray => "item returning",
            Self::HeartbeatSlow => "charging",
            Self::StrobeRed => "critical error",
        }
    }
}

impl fmt::Display for RobotState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RobotState {
    type Err = StatusError;

    /// Case-insensitive; `-` is accepted in place of `_`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|state| {
                let name = state.name();
                name.len() == wanted.len()
                    && name.bytes().zip(wanted.bytes()).all(|(n, w)| {
                        let w = if w == b'-' { b'_' } else { w.to_ascii_uppercase() };
                        n == w
                    })
            })
            .ok_or_else(|| StatusError::InvalidState(s.to_owned()))
    }
}

impl TryFrom<u16> for RobotState {
    type Error = StatusError;

    fn try_from(pulse_width_us: u16) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|state| state.pulse_width_us() == pulse_width_us)
            .ok_or_else(|| StatusError::InvalidState(format!("{pulse_width_us}us")))
    }
}
