//! Integration tests for the Safeguard alert engine
//!
//! This test suite validates:
//! - Manual and shake-triggered alerts end to end
//! - Location precondition, timeout and degraded-location handling
//! - Channel fallback and per-recipient failure isolation
//! - Recipient routing modes loaded from TOML
//! - Detection lifecycle across pause/resume and the async worker

pub mod test_utils;


#[cfg(test)]
mod shake_detection_tests;
