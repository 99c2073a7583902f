//! Pin registry, status pattern controller and their vocabulary.

pub mod ehal;
pub mod pin_registry;
pub mod robot_state;
pub mod status_pattern;
