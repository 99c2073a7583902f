//! Mock hardware adapter for integration tests.
//!
//! Records every port call so tests can assert on the full command
//! history, and fails any call kind on demand.

use robotio::app::events::IoEvent;
use robotio::app::ports::{
    Direction, EventSink, GpioPort, HwError, NumberingMode, PwmHandle, PwmPort,
};
use std::collections::HashMap;

// ── Hardware call record ──────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum HwCall {
    Configure { pin: u32, direction: Direction },
    Write { pin: u32, level: bool },
    Read { pin: u32 },
    Release { pin: u32 },
    StartPwm { pin: u32, freq_hz: u32 },
    UpdateDuty { handle: PwmHandle, percent: f64 },
    StopPwm { handle: PwmHandle },
}

/// Call kinds that can be made to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailOn {
    Configure,
    Write,
    Read,
    Release,
    StartPwm,
    UpdateDuty,
    StopPwm,
}

// ── MockHardware ──────────────────────────────────────────────

pub struct MockHardware {
    pub mode: NumberingMode,
    pub calls: Vec<HwCall>,
    pub inputs: HashMap<u32, bool>,
    failures: HashMap<FailOn, HwError>,
    release_failures: HashMap<u32, HwError>,
    next_handle: u32,
}

#[allow(dead_code)]
impl MockHardware {
    pub fn new() -> Self {
        Self::with_mode(NumberingMode::Board)
    }

    pub fn with_mode(mode: NumberingMode) -> Self {
        Self {
            mode,
            calls: Vec::new(),
            inputs: HashMap::new(),
            failures: HashMap::new(),
            release_failures: HashMap::new(),
            next_handle: 1,
        }
    }

    /// Make every later call of `kind` return `error`.
    pub fn fail(&mut self, kind: FailOn, error: HwError) {
        self.failures.insert(kind, error);
    }

    /// Make releasing `pin` alone return `error`.
    pub fn fail_release_of(&mut self, pin: u32, error: HwError) {
        self.release_failures.insert(pin, error);
    }

    pub fn recover(&mut self, kind: FailOn) {
        self.failures.remove(&kind);
    }

    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    pub fn last_call(&self) -> Option<&HwCall> {
        self.calls.last()
    }

    pub fn writes(&self) -> Vec<(u32, bool)> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                HwCall::Write { pin, level } => Some((*pin, *level)),
                _ => None,
            })
            .collect()
    }

    pub fn duty_updates(&self) -> Vec<f64> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                HwCall::UpdateDuty { percent, .. } => Some(*percent),
                _ => None,
            })
            .collect()
    }

    pub fn pwm_calls(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| {
                matches!(
                    c,
                    HwCall::StartPwm { .. } | HwCall::UpdateDuty { .. } | HwCall::StopPwm { .. }
                )
            })
            .count()
    }

    fn check(&self, kind: FailOn) -> Result<(), HwError> {
        match self.failures.get(&kind) {
            Some(e) => Err(e.clone()),
            None => Ok(()),
        }
    }
}

impl Default for MockHardware {
    fn default() -> Self {
        Self::new()
    }
}

impl GpioPort for MockHardware {
    fn numbering_mode(&self) -> NumberingMode {
        self.mode
    }

    fn configure_pin(&mut self, pin: u32, direction: Direction) -> Result<(), HwError> {
        self.calls.push(HwCall::Configure { pin, direction });
        self.check(FailOn::Configure)
    }

    fn write_level(&mut self, pin: u32, level: bool) -> Result<(), HwError> {
        self.calls.push(HwCall::Write { pin, level });
        self.check(FailOn::Write)
    }

    fn read_level(&mut self, pin: u32) -> Result<bool, HwError> {
        self.calls.push(HwCall::Read { pin });
        self.check(FailOn::Read)?;
        Ok(self.inputs.get(&pin).copied().unwrap_or(false))
    }

    fn release_pin(&mut self, pin: u32) -> Result<(), HwError> {
        self.calls.push(HwCall::Release { pin });
        if let Some(e) = self.release_failures.get(&pin) {
            return Err(e.clone());
        }
        self.check(FailOn::Release)
    }
}

impl PwmPort for MockHardware {
    fn start_pwm(&mut self, pin: u32, freq_hz: u32) -> Result<PwmHandle, HwError> {
        self.calls.push(HwCall::StartPwm { pin, freq_hz });
        self.check(FailOn::StartPwm)?;
        let handle = PwmHandle::new(self.next_handle);
        self.next_handle += 1;
        Ok(handle)
    }

    fn update_duty_cycle(&mut self, handle: PwmHandle, percent: f64) -> Result<(), HwError> {
        self.calls.push(HwCall::UpdateDuty { handle, percent });
        self.check(FailOn::UpdateDuty)
    }

    fn stop_pwm(&mut self, handle: PwmHandle) -> Result<(), HwError> {
        self.calls.push(HwCall::StopPwm { handle });
        self.check(FailOn::StopPwm)
    }
}

// ── Recording EventSink ───────────────────────────────────────

pub struct RecordingSink {
    pub events: Vec<IoEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn has<F: Fn(&IoEvent) -> bool>(&self, pred: F) -> bool {
        self.events.iter().any(pred)
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &IoEvent) {
        self.events.push(event.clone());
    }
}
