//! Status pattern controller.
//!
//! Drives one hardware PWM pin with an RC-servo style pulse whose width
//! selects the animation shown by the robot's status LED controller.
//!
//! ## Lifecycle
//!
//! ```text
//!  Uninitialized ──begin ok──▶ Active ──cleanup──▶ Stopped
//!        │                                           ▲
//!        └────────────────begin failed───────────────┘
//! ```
//!
//! Hardware is touched only by `begin` and by an `Active` controller.
//! Once `Stopped` there is no way back; build a new controller to restart
//! the output.
//!
//! ## Duty cycle
//!
//! Recomputed on every call from the state's pulse width and the fixed
//! frequency, never accumulated:
//!
//! `duty % = pulse_us / (1_000_000 / freq_hz) * 100`
//!
//! Re-applying the same state pushes the same duty again; a different
//! state replaces the previous one immediately.
//!
//! `begin` refuses frequencies above [`RobotState::MAX_FREQ_HZ`]: past
//! that point the widest pulse no longer fits in one period and the duty
//! would exceed 100 %.

use log::{debug, error, info, warn};

use crate::app::ports::{PwmHandle, PwmPort};
use crate::drivers::robot_state::RobotState;
use crate::error::{PwmOp, StatusError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerPhase {
    Uninitialized,
    Active,
    Stopped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Output {
    Uninitialized,
    Active(PwmHandle),
    Stopped,
}

/// Owns the status PWM pin and the state it currently shows.
#[derive(Debug)]
pub struct StatusPatternController {
    pin: u32,
    freq_hz: u32,
    output: Output,
    current: Option<RobotState>,
}

impl StatusPatternController {
    /// Bind to `pin` at `freq_hz`.  No hardware access until [`begin`](Self::begin).
    pub fn new(pin: u32, freq_hz: u32) -> Self {
        Self {
            pin,
            freq_hz,
            output: Output::Uninitialized,
            current: None,
        }
    }

    /// Construct and [`begin`](Self::begin) in one step.
    ///
    /// The controller comes back `Active` or, if the start failed,
    /// `Stopped`; the failure is logged and visible through
    /// [`phase`](Self::phase).
    pub fn start(hw: &mut impl PwmPort, pin: u32, freq_hz: u32) -> Self {
        let mut controller = Self::new(pin, freq_hz);
        if let Err(e) = controller.begin(hw) {
            debug!("status controller on pin {} left stopped: {}", pin, e);
        }
        controller
    }

    /// Start the PWM output at 0 % duty.
    ///
    /// On failure the controller moves straight to `Stopped` and every
    /// later pattern request reports [`StatusError::NotInitialized`].
    pub fn begin(&mut self, hw: &mut impl PwmPort) -> Result<(), StatusError> {
        if self.output != Output::Uninitialized {
            return Err(StatusError::AlreadyStarted { pin: self.pin });
        }
        if !RobotState::fits_frequency(self.freq_hz) {
            self.output = Output::Stopped;
            error!(
                "PWM frequency {} Hz on pin {} must be within 1..={} Hz.",
                self.freq_hz,
                self.pin,
                RobotState::MAX_FREQ_HZ
            );
            return Err(StatusError::InvalidFrequency(self.freq_hz));
        }

        match hw.start_pwm(self.pin, self.freq_hz) {
            Ok(handle) => {
                self.output = Output::Active(handle);
                info!("PWM set up on pin {} at {} Hz.", self.pin, self.freq_hz);
                Ok(())
            }
            Err(cause) => {
                self.output = Output::Stopped;
                error!(
                    "Error setting up PWM on pin {}: {}. Ensure pinmux is configured \
                     correctly and the pin is available for PWM.",
                    self.pin, cause
                );
                Err(StatusError::HardwareFault {
                    pin: self.pin,
                    op: PwmOp::Start,
                    cause,
                })
            }
        }
    }

    /// Show `state`.  Returns the duty cycle pushed to hardware.
    pub fn set_robot_state_pattern(
        &mut self,
        hw: &mut impl PwmPort,
        state: RobotState,
    ) -> Result<f64, StatusError> {
        let Output::Active(handle) = self.output else {
            warn!("PWM not initialised on pin {}. Cannot set robot state.", self.pin);
            return Err(StatusError::NotInitialized { pin: self.pin });
        };

        let duty = state.duty_cycle_percent(self.freq_hz);
        hw.update_duty_cycle(handle, duty).map_err(|cause| {
            error!("Error changing duty cycle on pin {}: {}", self.pin, cause);
            StatusError::HardwareFault {
                pin: self.pin,
                op: PwmOp::UpdateDutyCycle,
                cause,
            }
        })?;

        self.current = Some(state);
        debug!(
            "Robot state pattern '{}' set on pin {} with {}us pulse width ({:.2}% duty cycle).",
            state,
            self.pin,
            state.pulse_width_us(),
            duty
        );
        Ok(duty)
    }

    /// Parse `name` as a [`RobotState`] and show it.
    pub fn set_named_pattern(
        &mut self,
        hw: &mut impl PwmPort,
        name: &str,
    ) -> Result<f64, StatusError> {
        let state = name.parse::<RobotState>().inspect_err(|_| {
            warn!("Invalid robot state {:?}; must be a member of RobotState.", name);
        })?;
        self.set_robot_state_pattern(hw, state)
    }

    /// Stop the PWM output and invalidate the handle.
    ///
    /// A failed stop leaves the controller `Active` so it can be retried.
    pub fn cleanup(&mut self, hw: &mut impl PwmPort) -> Result<(), StatusError> {
        let Output::Active(handle) = self.output else {
            info!("No robot status pattern is currently active on pin {}.", self.pin);
            return Err(StatusError::NoActivePattern { pin: self.pin });
        };

        hw.stop_pwm(handle).map_err(|cause| {
            error!("Error stopping PWM on pin {}: {}", self.pin, cause);
            StatusError::HardwareFault {
                pin: self.pin,
                op: PwmOp::Stop,
                cause,
            }
        })?;

        self.output = Output::Stopped;
        self.current = None;
        info!("Robot status pattern cleared on pin {}.", self.pin);
        Ok(())
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn pin(&self) -> u32 {
        self.pin
    }

    pub fn freq_hz(&self) -> u32 {
        self.freq_hz
    }

    /// PWM period in microseconds, or `None` at 0 Hz.
    pub fn period_us(&self) -> Option<f64> {
        (self.freq_hz != 0).then(|| 1_000_000.0 / f64::from(self.freq_hz))
    }

    pub fn phase(&self) -> ControllerPhase {
        match self.output {
            Output::Uninitialized => ControllerPhase::Uninitialized,
            Output::Active(_) => ControllerPhase::Active,
            Output::Stopped => ControllerPhase::Stopped,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self.output, Output::Active(_))
    }

    /// Last state successfully pushed while active.
    pub fn current_state(&self) -> Option<RobotState> {
        self.current
    }

    /// Duty cycle of the current state, derived on demand.
    pub fn duty_cycle(&self) -> Option<f64> {
        self.current
            .map(|state| state.duty_cycle_percent(self.freq_hz))
    }
}
