//! Fuzz target: `PinRegistry` operation sequences
//!
//! Each input byte pair is decoded into one registry operation on a
//! simulated 40-pin header.  The registry must never panic, and every
//! configured output must agree with what the simulated hardware holds.
//!
//! cargo fuzz run fuzz_pin_registry

#![no_main]

use libfuzzer_sys::fuzz_target;
use robotio::adapters::sim::SimBoard;
use robotio::app::ports::{Direction, NumberingMode};
use robotio::drivers::pin_registry::PinRegistry;

fuzz_target!(|data: &[u8]| {
    let mut hw = SimBoard::new(NumberingMode::Board);
    let mut reg = PinRegistry::new(&hw);

    for chunk in data.chunks_exact(2) {
        // Pin 0 and 41+ are out of range on purpose.
        let pin = u32::from(chunk[1] % 48);
        match chunk[0] % 6 {
            0 => { let _ = reg.configure(&mut hw, pin, Direction::Output, chunk[0] & 0x80 != 0); }
            1 => { let _ = reg.configure(&mut hw, pin, Direction::Input, false); }
            2 => { let _ = reg.set_high(&mut hw, pin); }
            3 => { let _ = reg.set_low(&mut hw, pin); }
            4 => { let _ = reg.toggle(&mut hw, pin); }
            _ => { let _ = reg.read_level_or_low(&mut hw, pin); }
        }
    }

    let outputs: Vec<u32> = reg
        .configured_pins()
        .filter(|(_, d)| *d == Direction::Output)
        .map(|(p, _)| p)
        .collect();
    for pin in outputs {
        let tracked = reg.read_level(&mut hw, pin);
        assert_eq!(tracked.ok(), hw.output_level(pin), "pin {pin} out of sync");
    }

    let count = reg.len();
    assert_eq!(reg.release_all(&mut hw), Ok(count));
    assert!(reg.is_empty());
});
