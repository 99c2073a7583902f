//! Integration tests for `PinRegistry` against the recording mock.
//!
//! Verifies level tracking, direction enforcement, and that misuse never
//! reaches the hardware write path.

use robotio::app::ports::{Direction, HwError};
use robotio::drivers::pin_registry::PinRegistry;
use robotio::error::PinError;

use super::mock_hw::{FailOn, HwCall, MockHardware};

fn setup() -> (MockHardware, PinRegistry) {
    let hw = MockHardware::new();
    let reg = PinRegistry::new(&hw);
    (hw, reg)
}

// ── Level tracking ────────────────────────────────────────────

#[test]
fn pin_seven_scenario() {
    let (mut hw, mut reg) = setup();

    reg.configure(&mut hw, 7, Direction::Output, false).unwrap();
    assert_eq!(reg.read_level(&mut hw, 7), Ok(false));

    reg.set_high(&mut hw, 7).unwrap();
    assert_eq!(reg.read_level(&mut hw, 7), Ok(true));

    reg.toggle(&mut hw, 7).unwrap();
    assert_eq!(reg.read_level(&mut hw, 7), Ok(false));

    assert_eq!(
        hw.calls,
        vec![
            HwCall::Configure {
                pin: 7,
                direction: Direction::Output
            },
            HwCall::Write {
                pin: 7,
                level: false
            },
            HwCall::Write {
                pin: 7,
                level: true
            },
            HwCall::Write {
                pin: 7,
                level: false
            },
        ]
    );
}

#[test]
fn output_reads_come_from_tracked_level() {
    let (mut hw, mut reg) = setup();
    reg.configure(&mut hw, 11, Direction::Output, true).unwrap();
    hw.clear_calls();

    assert_eq!(reg.read_level(&mut hw, 11), Ok(true));
    assert!(hw.calls.is_empty());
}

#[test]
fn double_toggle_restores_level() {
    let (mut hw, mut reg) = setup();
    reg.configure(&mut hw, 13, Direction::Output, true).unwrap();

    let before = reg.read_level(&mut hw, 13).unwrap();
    assert_eq!(reg.toggle(&mut hw, 13), Ok(!before));
    assert_eq!(reg.toggle(&mut hw, 13), Ok(before));
    assert_eq!(reg.read_level(&mut hw, 13), Ok(before));
}

#[test]
fn input_reads_go_live_every_time() {
    let (mut hw, mut reg) = setup();
    reg.configure(&mut hw, 15, Direction::Input, false).unwrap();

    hw.inputs.insert(15, true);
    assert_eq!(reg.read_level(&mut hw, 15), Ok(true));
    hw.inputs.insert(15, false);
    assert_eq!(reg.read_level(&mut hw, 15), Ok(false));

    let reads = hw
        .calls
        .iter()
        .filter(|c| matches!(c, HwCall::Read { pin: 15 }))
        .count();
    assert_eq!(reads, 2);
}

// ── Configuration rules ───────────────────────────────────────

#[test]
fn second_configure_changes_nothing() {
    let (mut hw, mut reg) = setup();
    reg.configure(&mut hw, 7, Direction::Output, true).unwrap();
    hw.clear_calls();

    assert_eq!(
        reg.configure(&mut hw, 7, Direction::Input, false),
        Err(PinError::AlreadyConfigured {
            pin: 7,
            direction: Direction::Output
        })
    );
    assert!(hw.calls.is_empty());
    assert_eq!(reg.describe(7), Ok(Direction::Output));
    assert_eq!(reg.read_level(&mut hw, 7), Ok(true));
}

#[test]
fn input_ignores_initial_level() {
    let (mut hw, mut reg) = setup();
    reg.configure(&mut hw, 15, Direction::Input, true).unwrap();
    assert!(hw.writes().is_empty());
}

#[test]
fn hardware_refusal_leaves_pin_unconfigured() {
    let (mut hw, mut reg) = setup();
    hw.fail(FailOn::Configure, HwError::InvalidPin(99));

    assert_eq!(
        reg.configure(&mut hw, 99, Direction::Output, false),
        Err(PinError::Hardware {
            pin: 99,
            cause: HwError::InvalidPin(99)
        })
    );
    assert!(!reg.is_configured(99));

    // Retry succeeds once the hardware recovers.
    hw.recover(FailOn::Configure);
    assert!(reg.configure(&mut hw, 99, Direction::Output, false).is_ok());
}

#[test]
fn failed_initial_write_leaves_pin_unconfigured() {
    let (mut hw, mut reg) = setup();
    hw.fail(FailOn::Write, HwError::Backend("bus".into()));
    assert!(matches!(
        reg.configure(&mut hw, 7, Direction::Output, true),
        Err(PinError::Hardware { pin: 7, .. })
    ));
    assert!(reg.is_empty());
    // The half-configured pin goes back to the hardware.
    assert_eq!(
        hw.calls,
        vec![
            HwCall::Configure { pin: 7, direction: Direction::Output },
            HwCall::Write { pin: 7, level: true },
            HwCall::Release { pin: 7 },
        ]
    );

    // A failing rollback still reports the write error.
    hw.clear_calls();
    hw.fail(FailOn::Release, HwError::Busy(7));
    assert!(matches!(
        reg.configure(&mut hw, 7, Direction::Output, true),
        Err(PinError::Hardware { pin: 7, cause: HwError::Backend(_) })
    ));
    assert_eq!(hw.last_call(), Some(&HwCall::Release { pin: 7 }));
    assert!(reg.is_empty());
}

// ── Direction enforcement ─────────────────────────────────────

#[test]
fn writes_to_input_never_reach_hardware() {
    let (mut hw, mut reg) = setup();
    reg.configure(&mut hw, 15, Direction::Input, false).unwrap();
    hw.clear_calls();

    let wrong = Err(PinError::WrongDirection {
        pin: 15,
        direction: Direction::Input,
    });
    assert_eq!(reg.set_high(&mut hw, 15), wrong);
    assert_eq!(reg.set_low(&mut hw, 15), wrong);
    assert_eq!(reg.toggle(&mut hw, 15).map(|_| ()), wrong);
    assert!(hw.writes().is_empty());
}

#[test]
fn unconfigured_pin_is_reported() {
    let (mut hw, mut reg) = setup();

    assert_eq!(reg.read_level(&mut hw, 22), Err(PinError::NotConfigured(22)));
    assert!(!reg.read_level_or_low(&mut hw, 22));
    assert_eq!(reg.set_high(&mut hw, 22), Err(PinError::NotConfigured(22)));
    assert_eq!(reg.describe(22), Err(PinError::NotConfigured(22)));
    assert!(hw.calls.is_empty());
}

#[test]
fn failed_write_keeps_previous_level() {
    let (mut hw, mut reg) = setup();
    reg.configure(&mut hw, 7, Direction::Output, false).unwrap();
    hw.fail(FailOn::Write, HwError::Backend("bus".into()));

    assert!(reg.set_high(&mut hw, 7).is_err());
    assert_eq!(reg.read_level(&mut hw, 7), Ok(false));
}

#[test]
fn failed_input_read_falls_back_to_low() {
    let (mut hw, mut reg) = setup();
    reg.configure(&mut hw, 15, Direction::Input, false).unwrap();
    hw.inputs.insert(15, true);
    hw.fail(FailOn::Read, HwError::Backend("bus".into()));

    assert!(reg.read_level(&mut hw, 15).is_err());
    assert!(!reg.read_level_or_low(&mut hw, 15));
}

// ── Shutdown ──────────────────────────────────────────────────

#[test]
fn release_all_releases_in_ascending_order() {
    let (mut hw, mut reg) = setup();
    for pin in [16, 7, 11] {
        reg.configure(&mut hw, pin, Direction::Output, false).unwrap();
    }
    hw.clear_calls();

    assert_eq!(reg.release_all(&mut hw), Ok(3));
    assert_eq!(
        hw.calls,
        vec![
            HwCall::Release { pin: 7 },
            HwCall::Release { pin: 11 },
            HwCall::Release { pin: 16 },
        ]
    );
    assert!(reg.is_empty());
}

#[test]
fn release_failure_still_empties_registry() {
    let (mut hw, mut reg) = setup();
    reg.configure(&mut hw, 7, Direction::Output, false).unwrap();
    reg.configure(&mut hw, 15, Direction::Input, false).unwrap();
    hw.fail(FailOn::Release, HwError::Busy(7));

    assert_eq!(
        reg.release_all(&mut hw),
        Err(PinError::Hardware {
            pin: 7,
            cause: HwError::Busy(7)
        })
    );
    assert!(reg.is_empty());
    let releases = hw
        .calls
        .iter()
        .filter(|c| matches!(c, HwCall::Release { .. }))
        .count();
    assert_eq!(releases, 2);
}
