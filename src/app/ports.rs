//! Port traits: the hexagonal boundary between pin logic and the board.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ PinRegistry / StatusPatternController
//! ```
//!
//! Hardware adapters (rppal, in-memory simulation, test mocks) implement
//! these traits.  The drivers consume them via generics injected at the
//! call site, so the core never touches registers directly and never owns
//! the hardware handle.
//!
//! ## Numbering mode
//!
//! The pin-identifier scheme is process-wide on real boards.  It is passed
//! into the adapter's constructor and reported back through
//! [`GpioPort::numbering_mode`]; nothing in the core sets it.

use core::fmt;

// ───────────────────────────────────────────────────────────────
// Boundary value types
// ───────────────────────────────────────────────────────────────

/// Pin-identifier scheme used to address header pins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NumberingMode {
    /// Physical header position.
    #[default]
    Board,
    /// Broadcom SoC numbering.
    Bcm,
    /// Jetson CVM connector naming.
    Cvm,
    /// Tegra SoC port naming.
    TegraSoc,
}

impl fmt::Display for NumberingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Board => write!(f, "BOARD"),
            Self::Bcm => write!(f, "BCM"),
            Self::Cvm => write!(f, "CVM"),
            Self::TegraSoc => write!(f, "TEGRA_SOC"),
        }
    }
}

/// Configured direction of a digital pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Input,
    Output,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Input => write!(f, "input"),
            Self::Output => write!(f, "output"),
        }
    }
}

/// Opaque handle to a running hardware PWM output.
///
/// Issued by [`PwmPort::start_pwm`]; only the adapter that issued it
/// knows what it refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PwmHandle(u32);

impl PwmHandle {
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u32 {
        self.0
    }
}

// ───────────────────────────────────────────────────────────────
// GPIO port (driven adapter: registry → header pins)
// ───────────────────────────────────────────────────────────────

/// Digital pin access.
pub trait GpioPort {
    /// Numbering mode the adapter was constructed with.
    fn numbering_mode(&self) -> NumberingMode;

    /// Set the direction of `pin`.
    fn configure_pin(&mut self, pin: u32, direction: Direction) -> Result<(), HwError>;

    /// Drive an output pin high (`true`) or low (`false`).
    fn write_level(&mut self, pin: u32, level: bool) -> Result<(), HwError>;

    /// Sample the live level of an input pin.
    fn read_level(&mut self, pin: u32) -> Result<bool, HwError>;

    /// Return `pin` to its power-on default.
    fn release_pin(&mut self, pin: u32) -> Result<(), HwError>;
}

// ───────────────────────────────────────────────────────────────
// PWM port (driven adapter: status controller → PWM channel)
// ───────────────────────────────────────────────────────────────

/// Hardware PWM channel access.
pub trait PwmPort {
    /// Start PWM on `pin` at `freq_hz` with a 0 % duty cycle.
    fn start_pwm(&mut self, pin: u32, freq_hz: u32) -> Result<PwmHandle, HwError>;

    /// Set the duty cycle (0.0–100.0 %) of a running output.
    fn update_duty_cycle(&mut self, handle: PwmHandle, percent: f64) -> Result<(), HwError>;

    /// Stop a running output.  The handle is invalid afterwards.
    fn stop_pwm(&mut self, handle: PwmHandle) -> Result<(), HwError>;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: board service → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The board service emits structured [`IoEvent`](super::events::IoEvent)s
/// through this port.  Adapters decide where they go (console log, ROS
/// topic, test buffer, etc.).
pub trait EventSink {
    fn emit(&mut self, event: &super::events::IoEvent);
}

// ───────────────────────────────────────────────────────────────
// Error types
// ───────────────────────────────────────────────────────────────

/// Errors surfaced by a hardware adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HwError {
    /// Pin number does not exist in the active numbering mode.
    InvalidPin(u32),
    /// Pin cannot be muxed to a hardware PWM channel.
    NotPwmCapable(u32),
    /// Pin or channel is already claimed by another consumer.
    Busy(u32),
    /// Handle does not refer to a running PWM output.
    UnknownHandle(PwmHandle),
    /// Duty cycle outside 0.0–100.0 %.
    DutyOutOfRange,
    /// The adapter cannot operate in the requested configuration.
    Unsupported(&'static str),
    /// Driver-level failure reported by the backend.
    Backend(String),
}

impl fmt::Display for HwError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPin(pin) => write!(f, "invalid pin {}", pin),
            Self::NotPwmCapable(pin) => write!(f, "pin {} is not PWM capable", pin),
            Self::Busy(pin) => write!(f, "pin {} is busy", pin),
            Self::UnknownHandle(h) => write!(f, "unknown PWM handle {}", h.raw()),
            Self::DutyOutOfRange => write!(f, "duty cycle out of range"),
            Self::Unsupported(what) => write!(f, "unsupported: {}", what),
            Self::Backend(msg) => write!(f, "backend: {}", msg),
        }
    }
}

impl std::error::Error for HwError {}
