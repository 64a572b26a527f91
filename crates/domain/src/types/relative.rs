//! Calendar-relative offsets
//!
//! A [`RelativeOffset`] is the `RelativeDelta` of the wire format. It mixes
//! two families of fields:
//!
//! - *absolute-set* fields (`year`, `month`, ..., `microsecond`) replace the
//!   matching component of a base datetime when set, and are `None` otherwise.
//!   `Some(0)` and `None` are different values.
//! - *relative-add* fields (`years`, `months`, ..., `leapdays`) are added to
//!   the base datetime and default to zero.
//!
//! ```
//! use chrono::NaiveDate;
//! use tempowire_domain::RelativeOffset;
//!
//! // "the 5th of next month, at midnight"
//! let offset = RelativeOffset::default().with_months(1).with_day(5).with_hour(0);
//! let base = NaiveDate::from_ymd_opt(2024, 1, 20).unwrap().and_hms_opt(13, 45, 0).unwrap();
//! let target = offset.apply_to(base).unwrap();
//! assert_eq!(target, NaiveDate::from_ymd_opt(2024, 2, 5).unwrap().and_hms_opt(0, 45, 0).unwrap());
//! ```

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Timelike};

use crate::errors::OffsetApplyError;

/// A calendar-relative adjustment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct RelativeOffset {
    pub year: Option<i64>,
    pub month: Option<i64>,
    pub day: Option<i64>,
    pub hour: Option<i64>,
    pub minute: Option<i64>,
    pub second: Option<i64>,
    pub microsecond: Option<i64>,

    pub years: i64,
    pub months: i64,
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
    pub microseconds: i64,
    pub leapdays: i64,
}

macro_rules! offset_setters {
    (absolute: $($abs:ident => $abs_setter:ident),* ; relative: $($rel:ident => $rel_setter:ident),* $(,)?) => {
        impl RelativeOffset {
            $(
                #[doc = concat!("Set the absolute `", stringify!($abs), "` field.")]
                #[must_use]
                pub fn $abs_setter(mut self, value: i64) -> Self {
                    self.$abs = Some(value);
                    self
                }
            )*
            $(
                #[doc = concat!("Set the relative `", stringify!($rel), "` field.")]
                #[must_use]
                pub fn $rel_setter(mut self, value: i64) -> Self {
                    self.$rel = value;
                    self
                }
            )*
        }
    };
}

offset_setters! {
    absolute:
        year => with_year,
        month => with_month,
        day => with_day,
        hour => with_hour,
        minute => with_minute,
        second => with_second,
        microsecond => with_microsecond;
    relative:
        years => with_years,
        months => with_months,
        days => with_days,
        hours => with_hours,
        minutes => with_minutes,
        seconds => with_seconds,
        microseconds => with_microseconds,
        leapdays => with_leapdays,
}

impl RelativeOffset {
    /// An offset that changes nothing.
    pub const fn new() -> Self {
        Self {
            year: None,
            month: None,
            day: None,
            hour: None,
            minute: None,
            second: None,
            microsecond: None,
            years: 0,
            months: 0,
            days: 0,
            hours: 0,
            minutes: 0,
            seconds: 0,
            microseconds: 0,
            leapdays: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::new()
    }

    /// Whether any absolute-set field is present.
    pub fn has_absolute_fields(&self) -> bool {
        [self.year, self.month, self.day, self.hour, self.minute, self.second, self.microsecond]
            .iter()
            .any(Option::is_some)
    }

    /// Carry relative-add overflow into the next larger unit.
    ///
    /// Microseconds carry into seconds, seconds into minutes, minutes into
    /// hours, hours into days and months into years. Each unit keeps the sign
    /// of its original value, so `-90 minutes` becomes `-1 hour -30 minutes`.
    /// Days never carry into months. Returns `None` on overflow.
    pub fn normalized(&self) -> Option<Self> {
        let mut out = *self;
        let (carry, rest) = split_signed(out.microseconds, 1_000_000);
        out.microseconds = rest;
        out.seconds = out.seconds.checked_add(carry)?;

        let (carry, rest) = split_signed(out.seconds, 60);
        out.seconds = rest;
        out.minutes = out.minutes.checked_add(carry)?;

        let (carry, rest) = split_signed(out.minutes, 60);
        out.minutes = rest;
        out.hours = out.hours.checked_add(carry)?;

        let (carry, rest) = split_signed(out.hours, 24);
        out.hours = rest;
        out.days = out.days.checked_add(carry)?;

        let (carry, rest) = split_signed(out.months, 12);
        out.months = rest;
        out.years = out.years.checked_add(carry)?;

        Some(out)
    }

    /// Negate every relative-add field; absolute-set fields are kept.
    pub fn checked_neg(&self) -> Option<Self> {
        Some(Self {
            years: self.years.checked_neg()?,
            months: self.months.checked_neg()?,
            days: self.days.checked_neg()?,
            hours: self.hours.checked_neg()?,
            minutes: self.minutes.checked_neg()?,
            seconds: self.seconds.checked_neg()?,
            microseconds: self.microseconds.checked_neg()?,
            leapdays: self.leapdays.checked_neg()?,
            ..*self
        })
    }

    /// Apply the offset to `base`.
    ///
    /// Absolute year and month are set first, then `years`/`months` are added
    /// and the day (absolute or inherited) is clamped to the length of the
    /// resulting month. The remaining absolute time fields replace those of
    /// `base`. Finally `days` (plus `leapdays` when the resulting year is a
    /// leap year and the month is after February), `hours`, `minutes`,
    /// `seconds` and `microseconds` are added as one fixed span.
    pub fn apply_to(&self, base: NaiveDateTime) -> Result<NaiveDateTime, OffsetApplyError> {
        let month = match self.month {
            Some(month) => check_range("month", month, 1, 12)?,
            None => i64::from(base.month()),
        };
        let year = self.year.unwrap_or_else(|| i64::from(base.year()));

        let total_months = year
            .checked_mul(12)
            .and_then(|m| m.checked_add(month - 1))
            .and_then(|m| m.checked_add(self.years.checked_mul(12)?))
            .and_then(|m| m.checked_add(self.months))
            .ok_or(OffsetApplyError::OutOfRange)?;
        let year = i32::try_from(total_months.div_euclid(12))
            .map_err(|_| OffsetApplyError::OutOfRange)?;
        // rem_euclid(12) + 1 is always within 1..=12
        let month = (total_months.rem_euclid(12) + 1) as u32;

        let day = match self.day {
            Some(day) if day < 1 => {
                return Err(OffsetApplyError::InvalidField { field: "day", value: day });
            }
            Some(day) => day,
            None => i64::from(base.day()),
        };
        let day = day.min(i64::from(days_in_month(year, month))) as u32;
        let date =
            NaiveDate::from_ymd_opt(year, month, day).ok_or(OffsetApplyError::OutOfRange)?;

        let hour = time_field("hour", self.hour, base.hour(), 23)?;
        let minute = time_field("minute", self.minute, base.minute(), 59)?;
        let second = time_field("second", self.second, base.second(), 59)?;
        let nanos = match self.microsecond {
            Some(us) => check_range("microsecond", us, 0, 999_999)? as u32 * 1_000,
            None => base.nanosecond(),
        };
        let time = NaiveTime::from_hms_nano_opt(hour, minute, second, nanos)
            .ok_or(OffsetApplyError::OutOfRange)?;

        let mut days = self.days;
        if self.leapdays != 0 && month > 2 && is_leap_year(year) {
            days = days.checked_add(self.leapdays).ok_or(OffsetApplyError::OutOfRange)?;
        }

        let span = fixed_span(days, self.hours, self.minutes, self.seconds, self.microseconds)
            .ok_or(OffsetApplyError::OutOfRange)?;

        NaiveDateTime::new(date, time)
            .checked_add_signed(span)
            .ok_or(OffsetApplyError::OutOfRange)
    }
}

/// Split `value` into `(carry, rest)` with `|rest| < unit` and both parts
/// carrying the sign of `value`.
fn split_signed(value: i64, unit: i64) -> (i64, i64) {
    (value / unit, value % unit)
}

fn check_range(
    field: &'static str,
    value: i64,
    min: i64,
    max: i64,
) -> Result<i64, OffsetApplyError> {
    if (min..=max).contains(&value) {
        Ok(value)
    } else {
        Err(OffsetApplyError::InvalidField { field, value })
    }
}

fn time_field(
    field: &'static str,
    value: Option<i64>,
    inherited: u32,
    max: i64,
) -> Result<u32, OffsetApplyError> {
    match value {
        // within 0..=max, so the cast is lossless
        Some(value) => check_range(field, value, 0, max).map(|v| v as u32),
        None => Ok(inherited),
    }
}

fn fixed_span(
    days: i64,
    hours: i64,
    minutes: i64,
    seconds: i64,
    micros: i64,
) -> Option<TimeDelta> {
    TimeDelta::try_days(days)?
        .checked_add(&TimeDelta::try_hours(hours)?)?
        .checked_add(&TimeDelta::try_minutes(minutes)?)?
        .checked_add(&TimeDelta::try_seconds(seconds)?)?
        .checked_add(&TimeDelta::microseconds(micros))
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        2 if is_leap_year(year) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}
