//! In-memory board simulation.
//!
//! Implements [`GpioPort`] and [`PwmPort`] without touching any
//! registers, so the full stack runs on a development host.  Enforces the
//! same rules a real pin-mux driver would: pins must exist in the active
//! numbering mode, writes need an output, PWM needs a PWM-capable pin that
//! is not already running.
//!
//! Inputs read whatever the test or demo last injected with
//! [`SimBoard::set_input_level`].

use std::collections::HashMap;

use log::debug;

use crate::app::ports::{Direction, GpioPort, HwError, NumberingMode, PwmHandle, PwmPort};
use crate::pins;

#[derive(Debug, Clone, Copy, PartialEq)]
struct SimPwm {
    pin: u32,
    freq_hz: u32,
    duty_percent: f64,
}

/// Simulated GPIO header plus hardware PWM channels.
#[derive(Debug)]
pub struct SimBoard {
    mode: NumberingMode,
    max_pin: u32,
    pwm_capable: Vec<u32>,
    directions: HashMap<u32, Direction>,
    outputs: HashMap<u32, bool>,
    inputs: HashMap<u32, bool>,
    pwm: HashMap<PwmHandle, SimPwm>,
    next_handle: u32,
}

impl SimBoard {
    /// Board with the pin range and PWM pins of a 40-pin header in `mode`.
    pub fn new(mode: NumberingMode) -> Self {
        let (max_pin, pwm_capable) = match mode {
            NumberingMode::Board => (pins::HEADER_PIN_COUNT, pins::BOARD_PWM_PINS.to_vec()),
            NumberingMode::Bcm => (pins::BCM_MAX_PIN, pins::BCM_PWM_PINS.to_vec()),
            NumberingMode::Cvm | NumberingMode::TegraSoc => (pins::SOC_MAX_PIN, Vec::new()),
        };
        Self {
            mode,
            max_pin,
            pwm_capable,
            directions: HashMap::new(),
            outputs: HashMap::new(),
            inputs: HashMap::new(),
            pwm: HashMap::new(),
            next_handle: 1,
        }
    }

    /// Replace the set of pins that accept hardware PWM.
    #[must_use]
    pub fn with_pwm_pins(mut self, pwm_pins: &[u32]) -> Self {
        self.pwm_capable = pwm_pins.to_vec();
        self
    }

    /// Drive the simulated external signal on an input pin.
    pub fn set_input_level(&mut self, pin: u32, level: bool) {
        self.inputs.insert(pin, level);
    }

    /// Last level written to `pin`, if it is a configured output.
    pub fn output_level(&self, pin: u32) -> Option<bool> {
        self.outputs.get(&pin).copied()
    }

    /// Duty cycle of the PWM output running on `pin`, if any.
    pub fn pwm_duty(&self, pin: u32) -> Option<f64> {
        self.pwm
            .values()
            .find(|p| p.pin == pin)
            .map(|p| p.duty_percent)
    }

    /// Frequency of the PWM output running on `pin`, if any.
    pub fn pwm_freq(&self, pin: u32) -> Option<u32> {
        self.pwm.values().find(|p| p.pin == pin).map(|p| p.freq_hz)
    }

    fn check_pin(&self, pin: u32) -> Result<(), HwError> {
        let lowest = u32::from(self.mode == NumberingMode::Board);
        if pin < lowest || pin > self.max_pin {
            return Err(HwError::InvalidPin(pin));
        }
        Ok(())
    }

    fn pwm_running_on(&self, pin: u32) -> bool {
        self.pwm.values().any(|p| p.pin == pin)
    }
}

impl GpioPort for SimBoard {
    fn numbering_mode(&self) -> NumberingMode {
        self.mode
    }

    fn configure_pin(&mut self, pin: u32, direction: Direction) -> Result<(), HwError> {
        self.check_pin(pin)?;
        if self.pwm_running_on(pin) {
            return Err(HwError::Busy(pin));
        }
        self.directions.insert(pin, direction);
        match direction {
            Direction::Output => {
                self.outputs.insert(pin, false);
            }
            Direction::Input => {
                self.outputs.remove(&pin);
            }
        }
        debug!("sim: pin {} -> {}", pin, direction);
        Ok(())
    }

    fn write_level(&mut self, pin: u32, level: bool) -> Result<(), HwError> {
        self.check_pin(pin)?;
        match self.directions.get(&pin) {
            Some(Direction::Output) => {
                self.outputs.insert(pin, level);
                Ok(())
            }
            _ => Err(HwError::Unsupported("write to a pin that is not an output")),
        }
    }

    fn read_level(&mut self, pin: u32) -> Result<bool, HwError> {
        self.check_pin(pin)?;
        Ok(match self.directions.get(&pin) {
            Some(Direction::Output) => self.outputs.get(&pin).copied().unwrap_or(false),
            _ => self.inputs.get(&pin).copied().unwrap_or(false),
        })
    }

    fn release_pin(&mut self, pin: u32) -> Result<(), HwError> {
        self.check_pin(pin)?;
        self.directions.remove(&pin);
        self.outputs.remove(&pin);
        Ok(())
    }
}

impl PwmPort for SimBoard {
    fn start_pwm(&mut self, pin: u32, freq_hz: u32) -> Result<PwmHandle, HwError> {
        self.check_pin(pin)?;
        if !self.pwm_capable.contains(&pin) {
            return Err(HwError::NotPwmCapable(pin));
        }
        if self.pwm_running_on(pin) || self.directions.contains_key(&pin) {
            return Err(HwError::Busy(pin));
        }

        let handle = PwmHandle::new(self.next_handle);
        self.next_handle += 1;
        self.pwm.insert(
            handle,
            SimPwm {
                pin,
                freq_hz,
                duty_percent: 0.0,
            },
        );
        debug!("sim: PWM started on pin {} at {} Hz", pin, freq_hz);
        Ok(handle)
    }

    fn update_duty_cycle(&mut self, handle: PwmHandle, percent: f64) -> Result<(), HwError> {
        if !(0.0..=100.0).contains(&percent) {
            return Err(HwError::DutyOutOfRange);
        }
        let pwm = self
            .pwm
            .get_mut(&handle)
            .ok_or(HwError::UnknownHandle(handle))?;
        pwm.duty_percent = percent;
        Ok(())
    }

    fn stop_pwm(&mut self, handle: PwmHandle) -> Result<(), HwError> {
        self.pwm
            .remove(&handle)
            .map(|_| ())
            .ok_or(HwError::UnknownHandle(handle))
    }
}
