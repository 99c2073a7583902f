//! Digital pin registry.
//!
//! Single source of truth for which header pins are configured, in which
//! direction, and (for outputs) the last level commanded.
//!
//! ## Level tracking
//!
//! The GPIO port is write-only for outputs, so the registry mirrors every
//! level it writes and answers output reads from that mirror.  Input reads
//! always go to hardware; nothing is cached.
//!
//! ## Misuse is a value, not a crash
//!
//! Writing to an input or touching an unconfigured pin returns a
//! [`PinError`] and performs no hardware access.  The caller decides
//! whether to log it or abort the mission.
//!
//! ## Ownership
//!
//! The registry does not own the hardware.  Every operation that touches
//! pins takes the [`GpioPort`] at the call site, which keeps the registry
//! independent of the status PWM controller sharing the same board.

use std::collections::BTreeMap;

use log::{debug, info, warn};

use crate::app::ports::{Direction, GpioPort, NumberingMode};
use crate::error::PinError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PinEntry {
    direction: Direction,
    /// Last commanded level.  Meaningless for inputs.
    level: bool,
}

/// Tracks configured pins and validates every operation against them.
#[derive(Debug)]
pub struct PinRegistry {
    mode: NumberingMode,
    pins: BTreeMap<u32, PinEntry>,
}

impl PinRegistry {
    /// Create an empty registry bound to the adapter's numbering mode.
    pub fn new(hw: &impl GpioPort) -> Self {
        let mode = hw.numbering_mode();
        info!("{} numbering mode set.", mode);
        Self {
            mode,
            pins: BTreeMap::new(),
        }
    }

    pub fn numbering_mode(&self) -> NumberingMode {
        self.mode
    }

    // ── Configuration ─────────────────────────────────────────

    /// Configure `pin` once.  Outputs are driven to `initial_high`
    /// immediately.
    ///
    /// A repeat call leaves the pin untouched and returns
    /// [`PinError::AlreadyConfigured`].  If the hardware rejects the
    /// direction or initial write, the pin stays unconfigured; a pin whose
    /// initial write fails is handed back to the hardware first.
    pub fn configure(
        &mut self,
        hw: &mut impl GpioPort,
        pin: u32,
        direction: Direction,
        initial_high: bool,
    ) -> Result<(), PinError> {
        if let Some(entry) = self.pins.get(&pin) {
            warn!("Pin {} is already configured.", pin);
            return Err(PinError::AlreadyConfigured {
                pin,
                direction: entry.direction,
            });
        }

        hw.configure_pin(pin, direction)
            .map_err(|cause| PinError::Hardware { pin, cause })?;

        let level = if direction == Direction::Output {
            if let Err(cause) = hw.write_level(pin, initial_high) {
                match hw.release_pin(pin) {
                    Ok(()) => debug!("pin {} released after failed initial write", pin),
                    Err(e) => warn!("pin {} left claimed after failed initial write: {}", pin, e),
                }
                return Err(PinError::Hardware { pin, cause });
            }
            initial_high
        } else {
            false
        };

        self.pins.insert(pin, PinEntry { direction, level });
        debug!("pin {} configured as {} (level={})", pin, direction, level);
        Ok(())
    }

    // ── Output operations ─────────────────────────────────────

    pub fn set_high(&mut self, hw: &mut impl GpioPort, pin: u32) -> Result<(), PinError> {
        self.write(hw, pin, true)
    }

    pub fn set_low(&mut self, hw: &mut impl GpioPort, pin: u32) -> Result<(), PinError> {
        self.write(hw, pin, false)
    }

    /// Invert the tracked level.  Returns the new level.
    pub fn toggle(&mut self, hw: &mut impl GpioPort, pin: u32) -> Result<bool, PinError> {
        let next = !self.output_entry(pin)?.level;
        self.write(hw, pin, next)?;
        Ok(next)
    }

    fn write(&mut self, hw: &mut impl GpioPort, pin: u32, level: bool) -> Result<(), PinError> {
        self.output_entry(pin)?;
        hw.write_level(pin, level)
            .map_err(|cause| PinError::Hardware { pin, cause })?;
        if let Some(entry) = self.pins.get_mut(&pin) {
            entry.level = level;
        }
        Ok(())
    }

    /// Tracked level of a configured output, or the reason it isn't one.
    pub(crate) fn output_entry_level(&self, pin: u32) -> Result<bool, PinError> {
        self.output_entry(pin).map(|e| e.level)
    }

    fn output_entry(&self, pin: u32) -> Result<&PinEntry, PinError> {
        let entry = self.entry(pin)?;
        if entry.direction == Direction::Input {
            warn!("Pin {} has been configured as an input pin.", pin);
            return Err(PinError::WrongDirection {
                pin,
                direction: Direction::Input,
            });
        }
        Ok(entry)
    }

    fn entry(&self, pin: u32) -> Result<&PinEntry, PinError> {
        self.pins.get(&pin).ok_or_else(|| {
            warn!("Pin {} has not been configured.", pin);
            PinError::NotConfigured(pin)
        })
    }

    // ── Queries ───────────────────────────────────────────────

    /// Current level: live from hardware for inputs, tracked for outputs.
    pub fn read_level(&self, hw: &mut impl GpioPort, pin: u32) -> Result<bool, PinError> {
        let entry = self.entry(pin)?;
        match entry.direction {
            Direction::Input => hw
                .read_level(pin)
                .map_err(|cause| PinError::Hardware { pin, cause }),
            Direction::Output => Ok(entry.level),
        }
    }

    /// [`read_level`](Self::read_level), falling back to low on any error.
    pub fn read_level_or_low(&self, hw: &mut impl GpioPort, pin: u32) -> bool {
        self.read_level(hw, pin).unwrap_or_else(|e| {
            warn!("read of pin {} failed ({}), assuming low", pin, e);
            false
        })
    }

    /// Configured direction of `pin`.
    pub fn describe(&self, pin: u32) -> Result<Direction, PinError> {
        self.entry(pin).map(|e| e.direction)
    }

    pub fn is_configured(&self, pin: u32) -> bool {
        self.pins.contains_key(&pin)
    }

    /// Configured pins in ascending order.
    pub fn configured_pins(&self) -> impl Iterator<Item = (u32, Direction)> + '_ {
        self.pins.iter().map(|(pin, e)| (*pin, e.direction))
    }

    pub fn len(&self) -> usize {
        self.pins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pins.is_empty()
    }

    // ── Shutdown ──────────────────────────────────────────────

    /// Release every configured pin back to the hardware layer.
    ///
    /// Every pin is attempted and the registry is emptied even if some
    /// releases fail.  Returns how many were released, or the first
    /// failure.
    pub fn release_all(&mut self, hw: &mut impl GpioPort) -> Result<usize, PinError> {
        match self.release_counted(hw) {
            (released, None) => Ok(released),
            (_, Some(e)) => Err(e),
        }
    }

    /// Like [`release_all`](Self::release_all), but reports the release
    /// count alongside the first failure.
    pub(crate) fn release_counted(
        &mut self,
        hw: &mut impl GpioPort,
    ) -> (usize, Option<PinError>) {
        let mut released = 0;
        let mut first_err = None;

        for pin in core::mem::take(&mut self.pins).into_keys() {
            match hw.release_pin(pin) {
                Ok(()) => released += 1,
                Err(cause) => {
                    warn!("release of pin {} failed: {}", pin, cause);
                    first_err.get_or_insert(PinError::Hardware { pin, cause });
                }
            }
        }

        info!("released {} pin(s)", released);
        (released, first_err)
    }
}
