//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements         | Connects to                  |
//! |------------|--------------------|------------------------------|
//! | `sim`      | GpioPort, PwmPort  | In-memory board model        |
//! | `rpi`      | GpioPort, PwmPort  | Raspberry Pi via `rppal`     |
//! | `log_sink` | EventSink          | `log` facade                 |

pub mod log_sink;
#[cfg(feature = "rpi")]
pub mod rpi;
pub mod sim;
