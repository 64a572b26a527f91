//! Fixed time spans
//!
//! A [`Duration`] is the `TimeDelta` of the wire format: three signed
//! components that are kept exactly as supplied. Two spans that cover the same
//! amount of time but are split differently (`1 day` vs `86400 seconds`) are
//! distinct values; use [`Duration::normalized`] or
//! [`Duration::total_microseconds`] to compare them by length.

use chrono::TimeDelta;

const SECONDS_PER_DAY: i64 = 86_400;
const MICROS_PER_SECOND: i64 = 1_000_000;
const MICROS_PER_DAY: i128 = SECONDS_PER_DAY as i128 * MICROS_PER_SECOND as i128;

/// A fixed span of days, seconds and microseconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Duration {
    days: i64,
    seconds: i64,
    microseconds: i64,
}

impl Duration {
    /// The empty span.
    pub const ZERO: Self = Self::new(0, 0, 0);

    pub const fn new(days: i64, seconds: i64, microseconds: i64) -> Self {
        Self { days, seconds, microseconds }
    }

    pub const fn from_days(days: i64) -> Self {
        Self::new(days, 0, 0)
    }

    pub const fn from_seconds(seconds: i64) -> Self {
        Self::new(0, seconds, 0)
    }

    pub const fn from_microseconds(microseconds: i64) -> Self {
        Self::new(0, 0, microseconds)
    }

    pub const fn days(&self) -> i64 {
        self.days
    }

    pub const fn seconds(&self) -> i64 {
        self.seconds
    }

    pub const fn microseconds(&self) -> i64 {
        self.microseconds
    }

    /// Total length of the span in microseconds.
    ///
    /// Computed in `i128`, so it never overflows for any component values.
    pub fn total_microseconds(&self) -> i128 {
        i128::from(self.days) * MICROS_PER_DAY
            + i128::from(self.seconds) * i128::from(MICROS_PER_SECOND)
            + i128::from(self.microseconds)
    }

    pub fn is_zero(&self) -> bool {
        self.total_microseconds() == 0
    }

    /// Canonical form of the same span: `0 <= seconds < 86400` and
    /// `0 <= microseconds < 1_000_000`, with the sign carried by `days`.
    ///
    /// Returns `None` when the resulting day count does not fit in `i64`.
    ///
    /// # Examples
    ///
    /// ```
    /// use tempowire_domain::Duration;
    ///
    /// let span = Duration::new(0, -1, 0).normalized().unwrap();
    /// assert_eq!(span, Duration::new(-1, 86_399, 0));
    /// ```
    pub fn normalized(&self) -> Option<Self> {
        let total = self.total_microseconds();
        let days = i64::try_from(total.div_euclid(MICROS_PER_DAY)).ok()?;
        let rest = total.rem_euclid(MICROS_PER_DAY);
        let micros_per_second = i128::from(MICROS_PER_SECOND);
        // rest < MICROS_PER_DAY, so both parts fit in i64
        let seconds = (rest / micros_per_second) as i64;
        let microseconds = (rest % micros_per_second) as i64;
        Some(Self::new(days, seconds, microseconds))
    }

    /// Negate every component, or `None` if one of them is `i64::MIN`.
    pub fn checked_neg(&self) -> Option<Self> {
        Some(Self::new(
            self.days.checked_neg()?,
            self.seconds.checked_neg()?,
            self.microseconds.checked_neg()?,
        ))
    }

    /// Convert into a `chrono` span, or `None` if it exceeds chrono's range.
    pub fn to_time_delta(&self) -> Option<TimeDelta> {
        TimeDelta::try_days(self.days)?
            .checked_add(&TimeDelta::try_seconds(self.seconds)?)?
            .checked_add(&TimeDelta::microseconds(self.microseconds))
    }
}

/// Sub-microsecond precision is truncated toward zero.
impl From<TimeDelta> for Duration {
    fn from(delta: TimeDelta) -> Self {
        let mut secs = delta.num_seconds();
        let mut micros = i64::from(delta.subsec_nanos() / 1_000);
        if micros < 0 {
            secs -= 1;
            micros += MICROS_PER_SECOND;
        }
        Self::new(secs.div_euclid(SECONDS_PER_DAY), secs.rem_euclid(SECONDS_PER_DAY), micros)
    }
}
