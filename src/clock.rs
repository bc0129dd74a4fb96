//! Time source abstraction
//!
//! Rotation decisions compare calendar dates, so the logger reads time
//! through a small trait rather than calling `Local::now()` inline. Tests
//! substitute a fixed clock to drive day rollover deterministically.

use chrono::{DateTime, Local};

/// Source of the current wall-clock time
pub trait Clock: Send + Sync {
    /// Current local time
    fn now(&self) -> DateTime<Local>;
}

/// The real system clock
#[derive(Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}
