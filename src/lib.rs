//! robotio: digital I/O and status-pattern PWM for a single-board robot.
//!
//! Two independent components sit behind hexagonal port traits:
//!
//! - [`PinRegistry`] tracks each configured pin's direction and last
//!   commanded level, and refuses operations that do not fit.
//! - [`StatusPatternController`] drives one hardware PWM pin with the
//!   pulse width that encodes a [`RobotState`].
//!
//! [`Board`] sequences both from a [`BoardConfig`].  Hardware comes in
//! through [`GpioPort`]/[`PwmPort`]: [`SimBoard`] on a development host,
//! `RpiBoard` with the `rpi` feature.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod drivers;
pub mod error;
pub mod pins;

pub use adapters::log_sink::LogEventSink;
pub use adapters::sim::SimBoard;
pub use app::board::Board;
pub use app::events::IoEvent;
pub use app::ports::{Direction, EventSink, GpioPort, HwError, NumberingMode, PwmHandle, PwmPort};
pub use config::{BoardConfig, ConfigError, OutputPinConfig};
pub use drivers::pin_registry::PinRegistry;
pub use drivers::robot_state::RobotState;
pub use drivers::status_pattern::{ControllerPhase, StatusPatternController};
pub use error::{Error, PinError, PwmOp, Result, StatusError};
