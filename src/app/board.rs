//! Board service: bring-up, state changes and shutdown in one place.
//!
//! [`Board`] owns a [`PinRegistry`] and a [`StatusPatternController`]
//! built from a [`BoardConfig`].  The two never talk to each other; the
//! service only sequences them and reports what happened through an
//! [`EventSink`].  Hardware is injected at every call.
//!
//! ```text
//!                ┌───────────────────────────────┐
//!  BoardConfig ─▶│            Board              │──▶ EventSink
//!                │  PinRegistry   StatusPattern  │
//!  GpioPort  ◀───│  (digital I/O) (status PWM)   │───▶ PwmPort
//!                └───────────────────────────────┘
//! ```

use log::{debug, info};

use crate::config::{BoardConfig, ConfigError};
use crate::drivers::pin_registry::PinRegistry;
use crate::drivers::robot_state::RobotState;
use crate::drivers::status_pattern::StatusPatternController;
use crate::error::{Error, PinError, StatusError};

use super::events::IoEvent;
use super::ports::{Direction, EventSink, GpioPort, PwmPort};

/// Configured digital I/O plus the status pattern output.
#[derive(Debug)]
pub struct Board {
    registry: PinRegistry,
    status: StatusPatternController,
    rejected: Vec<PinError>,
}

impl Board {
    /// Configure every pin in `config` and start the status output.
    ///
    /// Only an invalid config is fatal.  Pins the hardware refuses and a
    /// status output that fails to start are reported through `sink` and
    /// left out; see [`rejected_pins`](Self::rejected_pins) and
    /// [`status`](Self::status).
    pub fn bring_up<H>(
        hw: &mut H,
        config: &BoardConfig,
        sink: &mut impl EventSink,
    ) -> Result<Self, ConfigError>
    where
        H: GpioPort + PwmPort,
    {
        config.validate()?;
        if hw.numbering_mode() != config.numbering_mode {
            return Err(ConfigError::ValidationFailed(
                "numbering_mode differs from the hardware adapter",
            ));
        }

        let mut board = Self {
            registry: PinRegistry::new(&*hw),
            status: StatusPatternController::new(config.status_pin, config.status_freq_hz),
            rejected: Vec::new(),
        };
        sink.emit(&IoEvent::ModeSelected(board.registry.numbering_mode()));

        // ── Digital I/O ───────────────────────────────────────
        let requests = config
            .outputs
            .iter()
            .map(|o| (o.pin, Direction::Output, o.initial_high))
            .chain(config.inputs.iter().map(|&pin| (pin, Direction::Input, false)));

        for (pin, direction, initial_high) in requests {
            match board.registry.configure(hw, pin, direction, initial_high) {
                Ok(()) => sink.emit(&IoEvent::PinConfigured {
                    pin,
                    direction,
                    initial_high,
                }),
                Err(error) => {
                    sink.emit(&IoEvent::PinRejected {
                        pin,
                        error: error.clone(),
                    });
                    board.rejected.push(error);
                }
            }
        }

        // ── Status output ─────────────────────────────────────
        match board.status.begin(hw) {
            Ok(()) => sink.emit(&IoEvent::StatusStarted {
                pin: config.status_pin,
                freq_hz: config.status_freq_hz,
            }),
            Err(error) => sink.emit(&IoEvent::StatusUnavailable {
                pin: config.status_pin,
                error,
            }),
        }

        if let Some(state) = config.initial_state {
            // Outcome already reported through the sink.
            if let Err(e) = board.set_state(hw, state, sink) {
                debug!("initial state {} not applied: {}", state, e);
            }
        }

        info!(
            "board up: {} pin(s) configured, {} rejected, status {:?}",
            board.registry.len(),
            board.rejected.len(),
            board.status.phase()
        );
        Ok(board)
    }

    // ── Status pattern ────────────────────────────────────────

    /// Show `state` on the status output.
    pub fn set_state(
        &mut self,
        hw: &mut impl PwmPort,
        state: RobotState,
        sink: &mut impl EventSink,
    ) -> Result<f64, StatusError> {
        let result = self.status.set_robot_state_pattern(hw, state);
        self.report_pattern(state, &result, sink);
        result
    }

    /// Parse `name` and show it on the status output.
    pub fn set_named_state(
        &mut self,
        hw: &mut impl PwmPort,
        name: &str,
        sink: &mut impl EventSink,
    ) -> Result<f64, StatusError> {
        match name.parse::<RobotState>() {
            Ok(state) => self.set_state(hw, state, sink),
            Err(error) => {
                sink.emit(&IoEvent::PatternRejected {
                    pin: self.status.pin(),
                    error: error.clone(),
                });
                Err(error)
            }
        }
    }

    fn report_pattern(
        &self,
        state: RobotState,
        result: &Result<f64, StatusError>,
        sink: &mut impl EventSink,
    ) {
        let pin = self.status.pin();
        match result {
            Ok(duty_percent) => sink.emit(&IoEvent::PatternApplied {
                pin,
                state,
                duty_percent: *duty_percent,
            }),
            Err(error) => sink.emit(&IoEvent::PatternRejected {
                pin,
                error: error.clone(),
            }),
        }
    }

    // ── Shutdown ──────────────────────────────────────────────

    /// Stop the status output, then release every registry pin.
    ///
    /// Both steps always run.  Returns the number of pins released, or
    /// the first failure.  A status output that was never active is not
    /// a failure here.  The emitted [`IoEvent::ShutDown`] always carries
    /// the number of pins actually released.
    pub fn shutdown<H>(&mut self, hw: &mut H, sink: &mut impl EventSink) -> Result<usize, Error>
    where
        H: GpioPort + PwmPort,
    {
        let status = match self.status.cleanup(hw) {
            Ok(()) | Err(StatusError::NoActivePattern { .. }) => Ok(()),
            Err(e) => Err(Error::from(e)),
        };

        let (released, release_err) = self.registry.release_counted(hw);
        sink.emit(&IoEvent::ShutDown { released });

        status?;
        match release_err {
            Some(e) => Err(e.into()),
            None => Ok(released),
        }
    }

    // ── Accessors ─────────────────────────────────────────────

    pub fn registry(&self) -> &PinRegistry {
        &self.registry
    }

    /// Mutable registry for runtime digital I/O.
    pub fn registry_mut(&mut self) -> &mut PinRegistry {
        &mut self.registry
    }

    pub fn status(&self) -> &StatusPatternController {
        &self.status
    }

    /// Pin errors collected during bring-up.
    pub fn rejected_pins(&self) -> &[PinError] {
        &self.rejected
    }
}
