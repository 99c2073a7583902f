//! embedded-hal 1.0 digital pin views over the registry.
//!
//! Lets any `embedded-hal` driver (shift registers, bit-banged buses,
//! indicator LEDs) drive a registry-managed pin without bypassing the
//! direction checks or the tracked output level.
//!
//! ```ignore
//! let mut led = registry.output_pin(&mut hw, 7)?;
//! led.set_high()?;               // embedded_hal::digital::OutputPin
//! assert!(led.is_set_high()?);   // answered from the registry mirror
//! ```

use embedded_hal::digital::{ErrorKind, ErrorType, InputPin, OutputPin, StatefulOutputPin};

use crate::app::ports::{Direction, GpioPort};
use crate::drivers::pin_registry::PinRegistry;
use crate::error::PinError;

impl embedded_hal::digital::Error for PinError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

/// Borrowed output pin.  Writes go through [`PinRegistry`].
pub struct RegistryOutput<'a, H> {
    registry: &'a mut PinRegistry,
    hw: &'a mut H,
    pin: u32,
}

/// Borrowed input pin.  Reads go live to hardware.
pub struct RegistryInput<'a, H> {
    registry: &'a PinRegistry,
    hw: &'a mut H,
    pin: u32,
}

impl PinRegistry {
    /// View a configured output as an embedded-hal pin.
    pub fn output_pin<'a, H: GpioPort>(
        &'a mut self,
        hw: &'a mut H,
        pin: u32,
    ) -> Result<RegistryOutput<'a, H>, PinError> {
        self.output_entry_level(pin)?;
        Ok(RegistryOutput {
            registry: self,
            hw,
            pin,
        })
    }

    /// View a configured input as an embedded-hal pin.
    pub fn input_pin<'a, H: GpioPort>(
        &'a self,
        hw: &'a mut H,
        pin: u32,
    ) -> Result<RegistryInput<'a, H>, PinError> {
        match self.describe(pin)? {
            Direction::Input => Ok(RegistryInput {
                registry: self,
                hw,
                pin,
            }),
            Direction::Output => Err(PinError::WrongDirection {
                pin,
                direction: Direction::Output,
            }),
        }
    }
}

impl<H> RegistryOutput<'_, H> {
    pub fn pin(&self) -> u32 {
        self.pin
    }
}

impl<H> RegistryInput<'_, H> {
    pub fn pin(&self) -> u32 {
        self.pin
    }
}

impl<H: GpioPort> ErrorType for RegistryOutput<'_, H> {
    type Error = PinError;
}

impl<H: GpioPort> OutputPin for RegistryOutput<'_, H> {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.registry.set_low(&mut *self.hw, self.pin)
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.registry.set_high(&mut *self.hw, self.pin)
    }
}

impl<H: GpioPort> StatefulOutputPin for RegistryOutput<'_, H> {
    fn is_set_high(&mut self) -> Result<bool, Self::Error> {
        self.registry.output_entry_level(self.pin)
    }

    fn is_set_low(&mut self) -> Result<bool, Self::Error> {
        self.is_set_high().map(|high| !high)
    }

    fn toggle(&mut self) -> Result<(), Self::Error> {
        self.registry.toggle(&mut *self.hw, self.pin).map(|_| ())
    }
}

impl<H: GpioPort> ErrorType for RegistryInput<'_, H> {
    type Error = PinError;
}

impl<H: GpioPort> InputPin for RegistryInput<'_, H> {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        self.registry.read_level(&mut *self.hw, self.pin)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        self.is_high().map(|high| !high)
    }
}
