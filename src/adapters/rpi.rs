//! Raspberry Pi hardware adapter (`rpi` feature).
//!
//! Backs [`GpioPort`] and [`PwmPort`] with `rppal`.  `rppal` addresses
//! pins by BCM GPIO number only, so this adapter refuses every other
//! numbering mode at construction.
//!
//! Hardware PWM goes through the kernel `pwm-bcm2835` driver and needs
//! the matching overlay (`dtoverlay=pwm-2chan`) so that GPIO 12/18 and
//! 13/19 are muxed to channels 0 and 1.  Only one pin per channel can
//! run at a time.

use std::collections::HashMap;
use std::fmt::Display;

use log::{debug, info};
use rppal::gpio::{Gpio, InputPin, OutputPin};
use rppal::pwm::{Channel, Polarity, Pwm};

use crate::app::ports::{Direction, GpioPort, HwError, NumberingMode, PwmHandle, PwmPort};

enum IoPin {
    Input(InputPin),
    Output(OutputPin),
}

struct ActivePwm {
    pin: u32,
    channel: Channel,
    pwm: Pwm,
}

/// GPIO header and PWM channels of the running Raspberry Pi.
pub struct RpiBoard {
    gpio: Gpio,
    pins: HashMap<u32, IoPin>,
    pwm: HashMap<PwmHandle, ActivePwm>,
    next_handle: u32,
}

fn backend(e: impl Display) -> HwError {
    HwError::Backend(e.to_string())
}

fn bcm(pin: u32) -> Result<u8, HwError> {
    u8::try_from(pin).map_err(|_| HwError::InvalidPin(pin))
}

fn pwm_channel(pin: u32) -> Option<Channel> {
    match pin {
        12 | 18 => Some(Channel::Pwm0),
        13 | 19 => Some(Channel::Pwm1),
        _ => None,
    }
}

impl RpiBoard {
    pub fn new(mode: NumberingMode) -> Result<Self, HwError> {
        if mode != NumberingMode::Bcm {
            return Err(HwError::Unsupported("rppal addresses pins by BCM number only"));
        }
        let gpio = Gpio::new().map_err(backend)?;
        info!("rppal GPIO opened");
        Ok(Self {
            gpio,
            pins: HashMap::new(),
            pwm: HashMap::new(),
            next_handle: 1,
        })
    }
}

impl GpioPort for RpiBoard {
    fn numbering_mode(&self) -> NumberingMode {
        NumberingMode::Bcm
    }

    fn configure_pin(&mut self, pin: u32, direction: Direction) -> Result<(), HwError> {
        let number = bcm(pin)?;
        if self.pwm.values().any(|p| p.pin == pin) {
            return Err(HwError::Busy(pin));
        }
        // Dropping the old handle resets the pin before it is reclaimed.
        self.pins.remove(&pin);

        let raw = self.gpio.get(number).map_err(backend)?;
        let io = match direction {
            Direction::Input => IoPin::Input(raw.into_input()),
            Direction::Output => IoPin::Output(raw.into_output_low()),
        };
        self.pins.insert(pin, io);
        debug!("rpi: GPIO {} -> {}", pin, direction);
        Ok(())
    }

    fn write_level(&mut self, pin: u32, level: bool) -> Result<(), HwError> {
        match self.pins.get_mut(&pin) {
            Some(IoPin::Output(out)) => {
                if level {
                    out.set_high();
                } else {
                    out.set_low();
                }
                Ok(())
            }
            _ => Err(HwError::Unsupported("write to a pin that is not an output")),
        }
    }

    fn read_level(&mut self, pin: u32) -> Result<bool, HwError> {
        match self.pins.get(&pin) {
            Some(IoPin::Input(input)) => Ok(input.is_high()),
            Some(IoPin::Output(out)) => Ok(out.is_set_high()),
            None => Err(HwError::InvalidPin(pin)),
        }
    }

    fn release_pin(&mut self, pin: u32) -> Result<(), HwError> {
        // rppal restores the pin's previous mode on drop.
        self.pins.remove(&pin);
        Ok(())
    }
}

impl PwmPort for RpiBoard {
    fn start_pwm(&mut self, pin: u32, freq_hz: u32) -> Result<PwmHandle, HwError> {
        let channel = pwm_channel(pin).ok_or(HwError::NotPwmCapable(pin))?;
        if self.pins.contains_key(&pin) || self.pwm.values().any(|p| p.channel == channel) {
            return Err(HwError::Busy(pin));
        }

        let pwm = Pwm::with_frequency(channel, f64::from(freq_hz), 0.0, Polarity::Normal, true)
            .map_err(backend)?;

        let handle = PwmHandle::new(self.next_handle);
        self.next_handle += 1;
        self.pwm.insert(handle, ActivePwm { pin, channel, pwm });
        debug!("rpi: PWM {:?} on GPIO {} at {} Hz", channel, pin, freq_hz);
        Ok(handle)
    }

    fn update_duty_cycle(&mut self, handle: PwmHandle, percent: f64) -> Result<(), HwError> {
        if !(0.0..=100.0).contains(&percent) {
            return Err(HwError::DutyOutOfRange);
        }
        let active = self
            .pwm
            .get(&handle)
            .ok_or(HwError::UnknownHandle(handle))?;
        active.pwm.set_duty_cycle(percent / 100.0).map_err(backend)
    }

    fn stop_pwm(&mut self, handle: PwmHandle) -> Result<(), HwError> {
        let active = self
            .pwm
            .get(&handle)
            .ok_or(HwError::UnknownHandle(handle))?;
        active.pwm.disable().map_err(backend)?;
        self.pwm.remove(&handle);
        Ok(())
    }
}
