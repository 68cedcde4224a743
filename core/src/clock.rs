//! Time source for the query surface and the exporter.
//!
//! Nothing outside this module reads the wall clock while answering
//! queries. Tests pin "now" with FixedClock.

use crate::types::Days;
use chrono::{DateTime, Duration, Utc};

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    /// Start of a trailing window ending now. Records with
    /// `timestamp >= cutoff` are inside the window. A window reaching past
    /// the earliest representable instant covers everything.
    fn cutoff(&self, days: Days) -> DateTime<Utc> {
        let now = self.now();
        now.checked_sub_signed(Duration::days(i64::from(days)))
            .unwrap_or_else(|| {
                log::warn!("clock: window of {days} days predates the calendar, using full history");
                DateTime::<Utc>::MIN_UTC
            })
    }
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock frozen at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock {
    pub at: DateTime<Utc>,
}

impl FixedClock {
    pub fn new(at: DateTime<Utc>) -> Self {
        Self { at }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.at
    }
}
