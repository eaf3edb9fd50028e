//! Simulated time.

use std::fmt;

use crate::rates::SECONDS_PER_DAY;

/// Elapsed simulated time in whole seconds.
///
/// Displays as `Day D HH:MM:SS`, with day 0 being the first day.
///
/// ```
/// use pestis_engine::Elapsed;
///
/// let t = Elapsed::from_seconds(2 * 86_400 + 3 * 3600 + 4 * 60 + 5);
/// assert_eq!(t.to_string(), "Day 2 03:04:05");
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Elapsed(u64);

impl Elapsed {
    /// Wrap a number of seconds.
    pub fn from_seconds(seconds: u64) -> Self {
        Self(seconds)
    }

    /// Total seconds.
    pub fn as_seconds(self) -> u64 {
        self.0
    }

    /// Whole days.
    pub fn days(self) -> u64 {
        self.0 / SECONDS_PER_DAY as u64
    }

    /// Hour of the current day, `0..24`.
    pub fn hours(self) -> u64 {
        self.0 % SECONDS_PER_DAY as u64 / 3600
    }

    /// Minute of the current hour, `0..60`.
    pub fn minutes(self) -> u64 {
        self.0 % 3600 / 60
    }

    /// Second of the current minute, `0..60`.
    pub fn seconds(self) -> u64 {
        self.0 % 60
    }

    /// Elapsed time in fractional days.
    pub fn as_days_f64(self) -> f64 {
        self.0 as f64 / SECONDS_PER_DAY
    }
}

impl fmt::Display for Elapsed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Day {} {:02}:{:02}:{:02}",
            self.days(),
            self.hours(),
            self.minutes(),
            self.seconds()
        )
    }
}
