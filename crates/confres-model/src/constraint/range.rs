//! Range payloads, including modulo ranges over cyclic domains

use chrono::{DateTime, Datelike, NaiveTime, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Inclusive numeric range
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NumericRange {
    pub min: f64,
    pub max: f64,
}

impl NumericRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }

    pub(crate) fn validate(&self, criterion: &str) -> Result<()> {
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(Error::InvalidRange {
                criterion: criterion.to_string(),
                message: format!("bounds must be finite (min {}, max {})", self.min, self.max),
            });
        }
        if self.min > self.max {
            return Err(Error::InvalidRange {
                criterion: criterion.to_string(),
                message: format!("min {} is greater than max {}", self.min, self.max),
            });
        }
        Ok(())
    }
}

/// Range over the 24 hour clock. Wraps past midnight when `min > max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeOfDayRange {
    pub min: NaiveTime,
    pub max: NaiveTime,
}

impl TimeOfDayRange {
    pub fn new(min: NaiveTime, max: NaiveTime) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, time: NaiveTime) -> bool {
        within_cycle(
            second_of_day(self.min),
            second_of_day(self.max),
            second_of_day(time),
        )
    }
}

/// Range over the calendar year, ignoring the year itself.
///
/// Wraps past New Year when `min > max`. Positions are compared as
/// `(month, day, second of day)`, so 29 February falls between 28 February
/// and 1 March in every year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeOfYearRange {
    pub min: DateTime<Utc>,
    pub max: DateTime<Utc>,
}

impl TimeOfYearRange {
    pub fn new(min: DateTime<Utc>, max: DateTime<Utc>) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        within_cycle(
            year_position(&self.min),
            year_position(&self.max),
            year_position(&instant),
        )
    }
}

/// Parse `HH:MM:SS[.f]`, `HH:MM` or an RFC 3339 instant into a time of day
pub fn parse_time_of_day(literal: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(literal, "%H:%M:%S%.f")
        .or_else(|_| NaiveTime::parse_from_str(literal, "%H:%M"))
        .or_else(|_| parse_instant(literal).map(|instant| instant.time()))
        .map_err(|_| Error::InvalidLiteral {
            kind: "time of day",
            value: literal.to_string(),
        })
}

/// Parse an RFC 3339 instant, normalized to UTC
pub fn parse_instant(literal: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(literal)
        .map(|instant| instant.with_timezone(&Utc))
        .map_err(|_| Error::InvalidLiteral {
            kind: "instant",
            value: literal.to_string(),
        })
}

/// `(second, nanosecond)` since midnight
fn second_of_day(time: NaiveTime) -> (u32, u32) {
    (time.num_seconds_from_midnight(), time.nanosecond())
}

fn year_position(instant: &DateTime<Utc>) -> (u32, u32, (u32, u32)) {
    (instant.month(), instant.day(), second_of_day(instant.time()))
}

/// Membership in `[min, max]` on a cyclic domain; `min > max` wraps
fn within_cycle<T: PartialOrd>(min: T, max: T, value: T) -> bool {
    if min <= max {
        min <= value && value <= max
    } else {
        value >= min || value <= max
    }
}
