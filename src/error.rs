//! Unified error types for robotio.
//!
//! Each component returns its own typed error ([`PinError`] from the
//! registry, [`StatusError`] from the status controller) so callers can
//! match on the exact failure.  Both convert into the top-level [`Error`]
//! for code that only needs to propagate.
//!
//! Nothing here is fatal by construction: every variant is a value handed
//! back to the caller, who decides whether to log, retry or escalate.

use core::fmt;

use crate::app::ports::{Direction, HwError};
use crate::config::ConfigError;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

/// Every fallible operation in the crate funnels into this type.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// A digital pin operation failed validation or hardware access.
    Pin(PinError),
    /// The status pattern controller rejected a request.
    Status(StatusError),
    /// Board configuration is invalid or could not be loaded.
    Config(ConfigError),
    /// The hardware adapter could not be constructed.
    Hardware(HwError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pin(e) => write!(f, "pin: {e}"),
            Self::Status(e) => write!(f, "status: {e}"),
            Self::Config(e) => write!(f, "config: {e}"),
            Self::Hardware(e) => write!(f, "hardware: {e}"),
        }
    }
}

impl std::error::Error for Error {}

// ---------------------------------------------------------------------------
// Pin registry errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PinError {
    /// Pin was configured earlier; the request was ignored.
    AlreadyConfigured { pin: u32, direction: Direction },
    /// Pin has not been configured.
    NotConfigured(u32),
    /// Operation requires the other direction.
    WrongDirection { pin: u32, direction: Direction },
    /// The hardware adapter reported a failure.
    Hardware { pin: u32, cause: HwError },
}

impl PinError {
    /// Pin the error refers to.
    pub fn pin(&self) -> u32 {
        match self {
            Self::AlreadyConfigured { pin, .. }
            | Self::NotConfigured(pin)
            | Self::WrongDirection { pin, .. }
            | Self::Hardware { pin, .. } => *pin,
        }
    }
}

impl fmt::Display for PinError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyConfigured { pin, direction } => {
                write!(f, "pin {pin} is already configured as {direction}")
            }
            Self::NotConfigured(pin) => write!(f, "pin {pin} has not been configured"),
            Self::WrongDirection { pin, direction } => {
                write!(f, "pin {pin} has been configured as an {direction} pin")
            }
            Self::Hardware { pin, cause } => write!(f, "pin {pin}: {cause}"),
        }
    }
}

impl std::error::Error for PinError {}

impl From<PinError> for Error {
    fn from(e: PinError) -> Self {
        Self::Pin(e)
    }
}

// ---------------------------------------------------------------------------
// Status pattern errors
// ---------------------------------------------------------------------------

/// Hardware PWM operation that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PwmOp {
    Start,
    UpdateDutyCycle,
    Stop,
}

impl fmt::Display for PwmOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => write!(f, "start"),
            Self::UpdateDutyCycle => write!(f, "duty cycle update"),
            Self::Stop => write!(f, "stop"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusError {
    /// Input does not name a member of the robot state enumeration.
    InvalidState(String),
    /// No active PWM output; the controller never started or was cleaned up.
    NotInitialized { pin: u32 },
    /// `cleanup` found nothing to stop.
    NoActivePattern { pin: u32 },
    /// `begin` called on a controller that already left `Uninitialized`.
    AlreadyStarted { pin: u32 },
    /// PWM frequency must be non-zero.
    InvalidFrequency(u32),
    /// The hardware adapter failed during a PWM operation.
    HardwareFault { pin: u32, op: PwmOp, cause: HwError },
}

impl fmt::Display for StatusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidState(input) => {
                write!(f, "invalid robot state {input:?}")
            }
            Self::NotInitialized { pin } => write!(f, "PWM not initialised on pin {pin}"),
            Self::NoActivePattern { pin } => {
                write!(f, "no robot status pattern is active on pin {pin}")
            }
            Self::AlreadyStarted { pin } => write!(f, "PWM on pin {pin} was already started"),
            Self::InvalidFrequency(hz) => write!(f, "invalid PWM frequency {hz} Hz"),
            Self::HardwareFault { pin, op, cause } => {
                write!(f, "PWM {op} failed on pin {pin}: {cause}")
            }
        }
    }
}

impl std::error::Error for StatusError {}

impl From<StatusError> for Error {
    fn from(e: StatusError) -> Self {
        Self::Status(e)
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<HwError> for Error {
    fn from(e: HwError) -> Self {
        Self::Hardware(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
