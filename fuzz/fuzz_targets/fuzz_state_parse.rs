//! Fuzz target: `RobotState::from_str`
//!
//! Arbitrary text must parse to a state or to `InvalidState`, never
//! panic.  Any accepted input round-trips through `Display`.
//!
//! cargo fuzz run fuzz_state_parse

#![no_main]

use libfuzzer_sys::fuzz_target;
use robotio::drivers::robot_state::RobotState;
use robotio::error::StatusError;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = core::str::from_utf8(data) else {
        return;
    };

    match text.parse::<RobotState>() {
        Ok(state) => {
            assert_eq!(state.to_string().parse::<RobotState>(), Ok(state));
            assert_eq!(RobotState::try_from(state.pulse_width_us()), Ok(state));
        }
        Err(e) => assert_eq!(e, StatusError::InvalidState(text.to_owned())),
    }
});
