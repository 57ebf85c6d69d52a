//! Time windows for the transaction feed.
use chrono::{DateTime, FixedOffset, SecondsFormat, TimeDelta, Utc};

/// Source of the current instant.
pub trait Clock {
    fn now(&self) -> DateTime<FixedOffset>;
}

/// Wall clock, in UTC.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Utc::now().fixed_offset()
    }
}

/// Clock stopped at a given instant.
#[derive(Clone, Copy, Debug)]
pub struct FixedClock(DateTime<FixedOffset>);

impl FixedClock {
    pub fn new(instant: DateTime<FixedOffset>) -> Self {
        Self(instant)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        self.0
    }
}

/// Half-open `[begin, end)` window. Both ends keep the offset they were
/// built with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Interval {
    begin: DateTime<FixedOffset>,
    end: DateTime<FixedOffset>,
}

impl Interval {
    /// The 168 hours before `clock.now()`.
    ///
    /// The clock is read once so both ends derive from the same instant.
    pub fn last_week(clock: &impl Clock) -> Self {
        let end = clock.now();
        Self {
            begin: end - TimeDelta::days(7),
            end,
        }
    }

    pub fn begin(&self) -> DateTime<FixedOffset> {
        self.begin
    }

    pub fn end(&self) -> DateTime<FixedOffset> {
        self.end
    }
}

/// ISO-8601 rendering used in query strings: `Z` for a zero offset,
/// fractional seconds only when present.
pub fn wire_timestamp(instant: &DateTime<FixedOffset>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}
