//! Cron expressions
//!
//! [`CronExpression`] is an opaque wrapper around a schedule string; building
//! one never fails. Grammar checking is a separate, opt-in step:
//! [`CronExpression::schedule`] parses the string into a [`CronSchedule`]
//! that can be evaluated against datetimes.
//!
//! Supported grammar, per field: `*` (or `?` in the day fields), single
//! values, ranges `a-b`, steps `*/n`, `a-b/n` and `a/n`, and comma-separated
//! lists of those. Months accept `jan`..`dec` and weekdays `sun`..`sat`
//! (case-insensitive); weekday `7` is Sunday. A sixth field, when present, is
//! the seconds field.

use std::fmt;

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, TimeDelta, Timelike, Utc};

use crate::errors::CronParseError;

/// A cron schedule string, kept verbatim.
///
/// Equality is string equality: `"0 0 * * *"` and `"0  0 * * *"` are
/// different expressions even though they describe the same schedule.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CronExpression {
    value: String,
}

impl CronExpression {
    /// Wrap an expression without checking its grammar.
    pub fn new(value: impl Into<String>) -> Self {
        Self { value: value.into() }
    }

    /// The expression as sent.
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Parse the expression into an evaluable schedule.
    ///
    /// # Examples
    ///
    /// ```
    /// use tempowire_domain::CronExpression;
    ///
    /// assert!(CronExpression::new("5 4 * * *").schedule().is_ok());
    /// assert!(CronExpression::new("not a schedule").schedule().is_err());
    /// ```
    pub fn schedule(&self) -> Result<CronSchedule, CronParseError> {
        CronSchedule::parse(&self.value)
    }
}

impl fmt::Display for CronExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl From<&str> for CronExpression {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for CronExpression {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

const MONTH_NAMES: [&str; 12] =
    ["jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec"];
const WEEKDAY_NAMES: [&str; 7] = ["sun", "mon", "tue", "wed", "thu", "fri", "sat"];

/// How far ahead [`CronSchedule::next_after`] searches before giving up.
const SEARCH_YEARS: i32 = 5;

/// A parsed cron schedule
///
/// Supports `minute hour day month weekday`, optionally followed by
/// `second`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CronSchedule {
    second: Option<CronField>,
    minute: CronField,
    hour: CronField,
    day: CronField,
    month: CronField,
    weekday: CronField,
}

impl CronSchedule {
    /// Parse a cron expression from a string
    pub fn parse(expr: &str) -> Result<Self, CronParseError> {
        let parts: Vec<&str> = expr.split_whitespace().collect();

        if parts.len() < 5 {
            return Err(CronParseError::TooFewFields(parts.len()));
        }
        if parts.len() > 6 {
            return Err(CronParseError::TooManyFields(parts.len()));
        }

        let second = match parts.get(5) {
            Some(part) => Some(CronField::parse(part, FieldKind::Second)?),
            None => None,
        };

        Ok(Self {
            second,
            minute: CronField::parse(parts[0], FieldKind::Minute)?,
            hour: CronField::parse(parts[1], FieldKind::Hour)?,
            day: CronField::parse(parts[2], FieldKind::Day)?,
            month: CronField::parse(parts[3], FieldKind::Month)?,
            weekday: CronField::parse(parts[4], FieldKind::Weekday)?,
        })
    }

    /// Whether the schedule has a seconds field
    pub fn has_seconds(&self) -> bool {
        self.second.is_some()
    }

    /// Check if a datetime matches this schedule
    ///
    /// Without a seconds field, only the first second of a minute matches.
    pub fn matches(&self, dt: &DateTime<Utc>) -> bool {
        self.matches_naive(&dt.naive_utc())
    }

    /// Get the next occurrence strictly after the given datetime
    ///
    /// Returns `None` if nothing matches within the next few years (for
    /// example `0 0 30 2 *`).
    pub fn next_after(&self, dt: &DateTime<Utc>) -> Option<DateTime<Utc>> {
        let start = dt.naive_utc().with_nanosecond(0)?;
        let mut current = if self.has_seconds() {
            start.checked_add_signed(TimeDelta::seconds(1))?
        } else {
            start.with_second(0)?.checked_add_signed(TimeDelta::minutes(1))?
        };
        let last_year = current.year().checked_add(SEARCH_YEARS)?;

        while current.year() <= last_year {
            if !self.month.matches(current.month()) {
                current = first_of_next_month(current.date())?.and_hms_opt(0, 0, 0)?;
            } else if !self.day_matches(current.date()) {
                current = current.date().succ_opt()?.and_hms_opt(0, 0, 0)?;
            } else if !self.hour.matches(current.hour()) {
                current = current
                    .with_minute(0)?
                    .with_second(0)?
                    .checked_add_signed(TimeDelta::hours(1))?;
            } else if !self.minute.matches(current.minute()) {
                current = current.with_second(0)?.checked_add_signed(TimeDelta::minutes(1))?;
            } else if !self.second_matches(current.second()) {
                current = current.checked_add_signed(TimeDelta::seconds(1))?;
            } else {
                return Some(current.and_utc());
            }
        }

        None
    }

    fn matches_naive(&self, dt: &NaiveDateTime) -> bool {
        self.second_matches(dt.second())
            && self.minute.matches(dt.minute())
            && self.hour.matches(dt.hour())
            && self.month.matches(dt.month())
            && self.day_matches(dt.date())
    }

    fn second_matches(&self, second: u32) -> bool {
        match &self.second {
            Some(field) => field.matches(second),
            None => second == 0,
        }
    }

    /// When both day-of-month and weekday are restricted, either may match.
    fn day_matches(&self, date: NaiveDate) -> bool {
        let day = self.day.matches(date.day());
        let weekday = self.weekday.matches(date.weekday().num_days_from_sunday());
        match (self.day.is_any(), self.weekday.is_any()) {
            (false, false) => day || weekday,
            _ => day && weekday,
        }
    }
}

impl std::str::FromStr for CronSchedule {
    type Err = CronParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for CronSchedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {} {}", self.minute, self.hour, self.day, self.month, self.weekday)?;
        if let Some(second) = &self.second {
            write!(f, " {}", second)?;
        }
        Ok(())
    }
}

fn first_of_next_month(date: NaiveDate) -> Option<NaiveDate> {
    if date.month() == 12 {
        NaiveDate::from_ymd_opt(date.year().checked_add(1)?, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(date.year(), date.month() + 1, 1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldKind {
    Second,
    Minute,
    Hour,
    Day,
    Month,
    Weekday,
}

impl FieldKind {
    fn bounds(self) -> (u32, u32) {
        match self {
            Self::Second | Self::Minute => (0, 59),
            Self::Hour => (0, 23),
            Self::Day => (1, 31),
            Self::Month => (1, 12),
            // 7 is folded onto 0 after parsing
            Self::Weekday => (0, 7),
        }
    }

    fn parse_value(self, token: &str) -> Option<u32> {
        if let Ok(value) = token.parse::<u32>() {
            return Some(value);
        }
        let lower = token.to_ascii_lowercase();
        let names: &[&str] = match self {
            Self::Month => &MONTH_NAMES,
            Self::Weekday => &WEEKDAY_NAMES,
            _ => return None,
        };
        let index = names.iter().position(|name| *name == lower)?;
        let offset = if self == Self::Month { 1 } else { 0 };
        u32::try_from(index).ok().map(|i| i + offset)
    }

    fn accepts_question_mark(self) -> bool {
        matches!(self, Self::Day | Self::Weekday)
    }
}

/// One field of a schedule: the set of allowed values as a bitmask, plus the
/// source text for display.
#[derive(Debug, Clone, PartialEq, Eq)]
struct CronField {
    allowed: u64,
    any: bool,
    source: String,
}

impl CronField {
    fn parse(s: &str, kind: FieldKind) -> Result<Self, CronParseError> {
        let (min, max) = kind.bounds();
        let mut allowed = 0u64;
        let mut any = false;

        for item in s.split(',') {
            let (base, step) = match item.split_once('/') {
                Some((base, step)) => {
                    let step: u32 =
                        step.parse().map_err(|_| CronParseError::InvalidField(s.to_string()))?;
                    if step == 0 {
                        return Err(CronParseError::InvalidField(s.to_string()));
                    }
                    (base, Some(step))
                }
                None => (item, None),
            };

            let wildcard = base == "*" || (base == "?" && kind.accepts_question_mark());
            let (start, end) = if wildcard {
                (min, max)
            } else if let Some((lo, hi)) = base.split_once('-') {
                let lo = kind.parse_value(lo).ok_or_else(|| invalid_field(s))?;
                let hi = kind.parse_value(hi).ok_or_else(|| invalid_field(s))?;
                (lo, hi)
            } else {
                let value = kind.parse_value(base).ok_or_else(|| invalid_field(s))?;
                // `a/n` runs from a to the end of the field
                match step {
                    Some(_) => (value, max),
                    None => (value, value),
                }
            };

            if start < min || end > max || start > end {
                return Err(CronParseError::InvalidRange(format!(
                    "{}-{} not valid in range {}-{}",
                    start, end, min, max
                )));
            }

            any |= wildcard && step.is_none();
            let step = step.unwrap_or(1) as usize;
            for value in (start..=end).step_by(step) {
                allowed |= 1 << value;
            }
        }

        if kind == FieldKind::Weekday && allowed & (1 << 7) != 0 {
            allowed = (allowed & !(1 << 7)) | 1;
        }

        Ok(Self { allowed, any, source: s.to_string() })
    }

    fn matches(&self, value: u32) -> bool {
        value < 64 && self.allowed & (1 << value) != 0
    }

    fn is_any(&self) -> bool {
        self.any
    }
}

fn invalid_field(s: &str) -> CronParseError {
    CronParseError::InvalidField(s.to_string())
}

impl fmt::Display for CronField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for cron parsing and evaluation.
    use chrono::TimeZone;

    use super::*;

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, s).unwrap()
    }

    #[test]
    fn test_expression_is_opaque() {
        let expr = CronExpression::new("definitely not cron");
        assert_eq!(expr.as_str(), "definitely not cron");
        assert_eq!(expr.to_string(), "definitely not cron");
        assert!(expr.schedule().is_err());
    }

    #[test]
    fn test_expression_equality_is_textual() {
        let owned = CronExpression::new(String::from("5 4 * * *"));
        assert_eq!(CronExpression::from("5 4 * * *"), owned);
        assert_ne!(CronExpression::from("5 4 * * *"), CronExpression::from("5  4 * * *"));
    }

    #[test]
    fn test_parse_every_minute() {
        let cron = CronSchedule::parse("* * * * *").unwrap();
        assert!(cron.minute.is_any());
        assert!(!cron.has_seconds());
    }

    #[test]
    fn test_parse_specific_time() {
        let cron = CronSchedule::parse("5 4 * * *").unwrap();
        assert!(cron.matches(&utc(2024, 1, 1, 4, 5, 0)));
        assert!(!cron.matches(&utc(2024, 1, 1, 4, 5, 30)));
        assert!(!cron.matches(&utc(2024, 1, 1, 4, 6, 0)));
    }

    #[test]
    fn test_parse_mixed_list() {
        let cron = CronSchedule::parse("0 1-3,10,16-22/3 * * *").unwrap();
        for hour in [1, 2, 3, 10, 16, 19, 22] {
            assert!(cron.hour.matches(hour), "hour {hour} should match");
        }
        assert!(!cron.hour.matches(4));
        assert!(!cron.hour.matches(17));
    }

    #[test]
    fn test_parse_steps() {
        let cron = CronSchedule::parse("*/15 * * * *").unwrap();
        assert!(cron.minute.matches(45));
        assert!(!cron.minute.matches(50));

        let cron = CronSchedule::parse("10/20 * * * *").unwrap();
        assert!(cron.minute.matches(10));
        assert!(cron.minute.matches(50));
        assert!(!cron.minute.matches(0));
    }

    #[test]
    fn test_parse_names() {
        let cron = CronSchedule::parse("0 9 ? JAN-mar mon-FRI").unwrap();
        assert!(cron.month.matches(2));
        assert!(!cron.month.matches(4));
        assert!(cron.weekday.matches(1));
        assert!(!cron.weekday.matches(0));
    }

    #[test]
    fn test_weekday_seven_is_sunday() {
        let cron = CronSchedule::parse("0 0 * * 7").unwrap();
        // 2024-01-07 is a Sunday
        assert!(cron.matches(&utc(2024, 1, 7, 0, 0, 0)));
    }

    #[test]
    fn test_day_or_weekday_when_both_restricted() {
        let cron = CronSchedule::parse("0 0 1 * mon").unwrap();
        // 2024-01-01 is a Monday, 2024-01-08 a Monday, 2024-02-01 a Thursday
        assert!(cron.matches(&utc(2024, 1, 8, 0, 0, 0)));
        assert!(cron.matches(&utc(2024, 2, 1, 0, 0, 0)));
        assert!(!cron.matches(&utc(2024, 1, 9, 0, 0, 0)));
    }

    #[test]
    fn test_six_fields_uses_seconds() {
        let cron = CronSchedule::parse("* * * * * 30").unwrap();
        assert!(cron.has_seconds());
        assert!(cron.matches(&utc(2024, 1, 1, 0, 0, 30)));
        assert!(!cron.matches(&utc(2024, 1, 1, 0, 0, 0)));
    }

    #[test]
    fn test_next_after() {
        let cron = CronSchedule::parse("0 0 * * *").unwrap();
        let next = cron.next_after(&utc(2024, 1, 1, 12, 0, 0)).unwrap();
        assert_eq!(next, utc(2024, 1, 2, 0, 0, 0));
    }

    #[test]
    fn test_next_after_is_strict() {
        let cron = CronSchedule::parse("5 4 * * *").unwrap();
        let next = cron.next_after(&utc(2024, 1, 1, 4, 5, 0)).unwrap();
        assert_eq!(next, utc(2024, 1, 2, 4, 5, 0));
    }

    #[test]
    fn test_next_after_crosses_year() {
        let cron = CronSchedule::parse("30 6 29 2 *").unwrap();
        let next = cron.next_after(&utc(2024, 3, 1, 0, 0, 0)).unwrap();
        assert_eq!(next, utc(2028, 2, 29, 6, 30, 0));
    }

    #[test]
    fn test_next_after_with_seconds() {
        let cron = CronSchedule::parse("* * * * * */20").unwrap();
        let next = cron.next_after(&utc(2024, 1, 1, 0, 0, 41)).unwrap();
        assert_eq!(next, utc(2024, 1, 1, 0, 1, 0));
    }

    #[test]
    fn test_next_after_impossible_date() {
        let cron = CronSchedule::parse("0 0 30 2 *").unwrap();
        assert_eq!(cron.next_after(&utc(2024, 1, 1, 0, 0, 0)), None);
    }

    #[test]
    fn test_invalid_expressions() {
        assert_eq!(CronSchedule::parse("invalid"), Err(CronParseError::TooFewFields(1)));
        assert_eq!(CronSchedule::parse("* * * * * * *"), Err(CronParseError::TooManyFields(7)));
        assert!(CronSchedule::parse("60 * * * *").is_err());
        assert!(CronSchedule::parse("* 25 * * *").is_err());
        assert!(CronSchedule::parse("*/0 * * * *").is_err());
        assert!(CronSchedule::parse("5-1 * * * *").is_err());
        assert!(CronSchedule::parse("? * * * *").is_err());
    }

    #[test]
    fn test_display_round_trips_fields() {
        let cron: CronSchedule = "0 9-17/2 * jan-jun 1,3 15".parse().unwrap();
        assert_eq!(cron.to_string(), "0 9-17/2 * jan-jun 1,3 15");
    }
}
