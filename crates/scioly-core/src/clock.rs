//! Time source for drill deadlines.

use std::cell::Cell;

use chrono::{DateTime, TimeDelta, Utc};

/// Supplies the current time to the drill runner.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock that only moves when told to.
///
/// Interior mutability lets a test frontend advance the same clock the
/// runner reads from while both hold shared references.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Cell<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(at: DateTime<Utc>) -> Self {
        Self { now: Cell::new(at) }
    }

    /// A clock fixed at 2023-11-14T22:13:20Z.
    pub fn fixed() -> Self {
        Self::new(DateTime::<Utc>::from_timestamp(FIXED_TIMESTAMP, 0).unwrap_or_default())
    }

    pub fn advance(&self, delta: TimeDelta) {
        self.now.set(self.now.get() + delta);
    }

    pub fn advance_secs(&self, secs: i64) {
        self.advance(TimeDelta::seconds(secs));
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        self.now.get()
    }
}

const FIXED_TIMESTAMP: i64 = 1_700_000_000;
