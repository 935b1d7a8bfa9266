//! Wall-clock access.
//!
//! The engine never reads the clock itself -- every transition takes the
//! current time as an argument. [`Clock`] is the seam the controller uses to
//! obtain real time, so tests can substitute a scripted source.

use std::time::{SystemTime, UNIX_EPOCH};

pub trait Clock {
    /// Current wall-clock time in milliseconds since the Unix epoch.
    fn now_ms(&self) -> u64;
}

/// The system wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64
    }
}
