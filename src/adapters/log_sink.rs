//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing one structured line per
//! [`IoEvent`] through the `log` facade.  The binary installs a
//! `tracing-subscriber` formatter that picks these up.

use log::{info, warn};

use crate::app::events::IoEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`IoEvent`].
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &IoEvent) {
        match event {
            IoEvent::ModeSelected(mode) => {
                info!("MODE   | {}", mode);
            }
            IoEvent::PinConfigured {
                pin,
                direction,
                initial_high,
            } => {
                info!(
                    "PIN    | {} -> {}{}",
                    pin,
                    direction,
                    if *initial_high { " (high)" } else { "" }
                );
            }
            IoEvent::PinRejected { pin, error } => {
                warn!("PIN    | {} rejected: {}", pin, error);
            }
            IoEvent::StatusStarted { pin, freq_hz } => {
                info!("STATUS | pin {} running at {} Hz", pin, freq_hz);
            }
            IoEvent::StatusUnavailable { pin, error } => {
                warn!("STATUS | pin {} unavailable: {}", pin, error);
            }
            IoEvent::PatternApplied {
                pin,
                state,
                duty_percent,
            } => {
                info!(
                    "STATUS | pin {} shows {} ({:.3}% duty)",
                    pin, state, duty_percent
                );
            }
            IoEvent::PatternRejected { pin, error } => {
                warn!("STATUS | pin {} pattern rejected: {}", pin, error);
            }
            IoEvent::ShutDown { released } => {
                info!("DOWN   | {} pin(s) released", released);
            }
        }
    }
}
