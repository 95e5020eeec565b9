//! Clock abstraction for date normalization.
//!
//! The normalizer needs "now" in several shapes (day-of-week, long-form
//! date, 12-hour time). Injecting the clock keeps every date-dependent test
//! deterministic.

use chrono::{DateTime, Local};

/// Source of the current local date and time.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Local>;
}

/// Clock backed by the host system time.
#[derive(Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Clock pinned to a fixed instant, for tests and reproducible runs.
#[derive(Debug)]
pub struct FixedClock(DateTime<Local>);

impl FixedClock {
    pub fn new(instant: DateTime<Local>) -> Self {
        Self(instant)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Local> {
        self.0
    }
}

/// The current date rendered in the formats the normalization prompts use.
#[derive(Debug, Clone)]
pub struct DateInfo {
    /// ISO date, e.g. "2025-01-11"
    pub date: String,

    /// Day of week, e.g. "Saturday"
    pub day: String,

    /// Long form, e.g. "Saturday, January 11, 2025"
    pub full_date: String,

    /// 12-hour time, e.g. "03:00 PM"
    pub time: String,
}

impl DateInfo {
    /// Render a timestamp into the prompt formats.
    pub fn from_datetime(now: &DateTime<Local>) -> Self {
        Self {
            date: now.format("%Y-%m-%d").to_string(),
            day: now.format("%A").to_string(),
            full_date: now.format("%A, %B %d, %Y").to_string(),
            time: now.format("%I:%M %p").to_string(),
        }
    }
}
