//! Outbound I/O events.
//!
//! The [`Board`](super::board::Board) service emits these through the
//! [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide what to do with them: log to the console, publish on a
//! ROS topic, collect in a test buffer, etc.

use crate::app::ports::{Direction, NumberingMode};
use crate::drivers::robot_state::RobotState;
use crate::error::{PinError, StatusError};

/// Structured events emitted by the board service.
#[derive(Debug, Clone, PartialEq)]
pub enum IoEvent {
    /// Registry constructed with the given numbering mode.
    ModeSelected(NumberingMode),

    /// A pin was configured.
    PinConfigured {
        pin: u32,
        direction: Direction,
        initial_high: bool,
    },

    /// A pin could not be configured; bring-up continued without it.
    PinRejected { pin: u32, error: PinError },

    /// The status PWM output started.
    StatusStarted { pin: u32, freq_hz: u32 },

    /// The status PWM output could not start.
    StatusUnavailable { pin: u32, error: StatusError },

    /// A robot state pattern was pushed to hardware.
    PatternApplied {
        pin: u32,
        state: RobotState,
        duty_percent: f64,
    },

    /// A robot state pattern was not applied.
    PatternRejected { pin: u32, error: StatusError },

    /// Status PWM stopped and every registry pin released.
    ShutDown { released: usize },
}
