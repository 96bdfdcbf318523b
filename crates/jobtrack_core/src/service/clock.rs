//! Time source for record keys and default draft dates.

use chrono::{Local, NaiveDate, TimeZone};

/// Supplies creation timestamps and the local calendar date.
pub trait Clock {
    fn now_epoch_ms(&self) -> i64;
    fn today(&self) -> NaiveDate;
}

/// Wall clock in the device's local time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_epoch_ms(&self) -> i64 {
        Local::now().timestamp_millis()
    }

    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Clock pinned to one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock {
    epoch_ms: i64,
}

impl FixedClock {
    pub fn new(epoch_ms: i64) -> Self {
        Self { epoch_ms }
    }
}

impl Clock for FixedClock {
    fn now_epoch_ms(&self) -> i64 {
        self.epoch_ms
    }

    fn today(&self) -> NaiveDate {
        Local
            .timestamp_millis_opt(self.epoch_ms)
            .single()
            .map_or(NaiveDate::MIN, |at| at.date_naive())
    }
}
