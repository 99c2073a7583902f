//! Application core: pin bookkeeping and status sequencing, zero I/O.
//!
//! All interaction with hardware happens through **port traits** defined
//! in [`ports`], keeping this layer fully testable without real pins.

pub mod board;
pub mod events;
pub mod ports;
