//! Integration test driver for `tests/integration/` submodule.
//!
//! Each `mod` below maps to a file that exercises one component against
//! the recording mock in `mock_hw`.  All tests run on the host with no
//! real hardware required.

mod mock_hw;
mod pin_registry_tests;
