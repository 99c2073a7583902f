//! Pin assignments and PWM constants for the robot's 40-pin expansion header.
//!
//! Single source of truth for defaults; a [`BoardConfig`](crate::config::BoardConfig)
//! overrides any of them at runtime.

// ---------------------------------------------------------------------------
// Header geometry
// ---------------------------------------------------------------------------

/// Physical positions run 1..=40.
pub const HEADER_PIN_COUNT: u32 = 40;
/// Highest Broadcom GPIO routed to the header.
pub const BCM_MAX_PIN: u32 = 27;
/// Upper bound accepted for SoC-relative naming schemes.
pub const SOC_MAX_PIN: u32 = 255;

// ---------------------------------------------------------------------------
// Hardware PWM
// ---------------------------------------------------------------------------

/// Header positions that can be muxed to a hardware PWM channel.
pub const BOARD_PWM_PINS: [u32; 2] = [32, 33];
/// Broadcom GPIOs with a hardware PWM alternate function.
pub const BCM_PWM_PINS: [u32; 4] = [12, 13, 18, 19];

// ---------------------------------------------------------------------------
// Status LED controller
// ---------------------------------------------------------------------------

/// Header position wired to the status LED controller's signal input.
pub const STATUS_PWM_PIN: u32 = 33;
/// RC-servo frame rate expected by the status LED controller (20 ms period).
pub const STATUS_PWM_FREQ_HZ: u32 = 50;
