//! Calendar helpers: inclusive day spans and the on-disk date format.

use crate::{
    error::{DashError, DashResult},
    types::Day,
};
use chrono::{Days, NaiveDateTime};

/// Dates are written in this form.
pub const DAY_FORMAT: &str = "%Y-%m-%d";

/// pandas writes datetime columns with a midnight time component.
const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// An inclusive run of calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DaySpan {
    pub start: Day,
    pub end: Day,
}

impl DaySpan {
    pub fn new(start: Day, end: Day) -> DashResult<Self> {
        if start > end {
            return Err(DashError::InvalidDateRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Number of days, both ends included.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        ((self.end - self.start).num_days() + 1) as usize
    }

    /// Days in order, paired with their offset from `start`.
    pub fn days(&self) -> impl Iterator<Item = (usize, Day)> + '_ {
        self.start
            .iter_days()
            .take_while(move |d| *d <= self.end)
            .enumerate()
    }
}

/// `origin + offset` days, saturating at the calendar maximum.
pub fn offset_day(origin: Day, offset: u64) -> Day {
    origin.checked_add_days(Days::new(offset)).unwrap_or(Day::MAX)
}

/// Parse `YYYY-MM-DD`, tolerating a trailing `HH:MM:SS`.
pub fn parse_day(text: &str) -> DashResult<Day> {
    let trimmed = text.trim();
    Day::parse_from_str(trimmed, DAY_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(trimmed, DATETIME_FORMAT).map(|dt| dt.date()))
        .map_err(|_| DashError::DateParse { value: text.to_string() })
}

/// Serde adapter for date columns in the CSV tables.
pub mod day_format {
    use super::{parse_day, DAY_FORMAT};
    use crate::types::Day;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(day: &Day, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&day.format(DAY_FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Day, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse_day(&raw).map_err(serde::de::Error::custom)
    }
}
