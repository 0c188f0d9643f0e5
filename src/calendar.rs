//! Calendar months and month ranges

use crate::error::{DashboardError, Result};
use chrono::{Datelike, Local, Months, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A calendar month, canonically written `YYYY-MM`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MonthKey {
    year: i32,
    month: u32,
}

impl MonthKey {
    /// Create a month key, rejecting months outside 1..=12
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(DashboardError::ParseError(format!(
                "Month must be between 1 and 12, got: {}",
                month
            )));
        }
        if !(1..=9999).contains(&year) {
            return Err(DashboardError::ParseError(format!(
                "Year must be between 1 and 9999, got: {}",
                year
            )));
        }
        Ok(Self { year, month })
    }

    /// Month containing the given date
    pub fn from_date(date: NaiveDate) -> Result<Self> {
        Self::new(date.year(), date.month())
    }

    /// Month of the local wall clock
    pub fn current() -> Self {
        let today = Local::now().date_naive();
        Self {
            year: today.year().clamp(1, 9999),
            month: today.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// Day 1 of this month
    pub fn first_day(&self) -> NaiveDate {
        // year/month are validated on construction, day 1 always exists
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    /// Next calendar month, saturating at 9999-12
    pub fn succ(&self) -> Self {
        self.first_day()
            .checked_add_months(Months::new(1))
            .and_then(|next| Self::from_date(next).ok())
            .unwrap_or(*self)
    }

    /// Months elapsed since year 0, January
    pub fn ordinal(&self) -> i64 {
        self.year as i64 * 12 + (self.month as i64 - 1)
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for MonthKey {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let (year, month) = trimmed.split_once('-').ok_or_else(|| {
            DashboardError::ParseError(format!("Expected YYYY-MM, got: {}", trimmed))
        })?;

        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if year.len() != 4
            || month.is_empty()
            || month.len() > 2
            || !all_digits(year)
            || !all_digits(month)
        {
            return Err(DashboardError::ParseError(format!(
                "Expected YYYY-MM, got: {}",
                trimmed
            )));
        }

        let year: i32 = year
            .parse()
            .map_err(|e| DashboardError::ParseError(format!("Invalid year in {}: {}", trimmed, e)))?;
        let month: u32 = month
            .parse()
            .map_err(|e| DashboardError::ParseError(format!("Invalid month in {}: {}", trimmed, e)))?;

        Self::new(year, month)
    }
}

impl Serialize for MonthKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MonthKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Inclusive iterator over calendar months
#[derive(Debug, Clone)]
pub struct MonthRange {
    next: Option<MonthKey>,
    end: MonthKey,
}

impl MonthRange {
    /// Empty when `start > end`
    pub fn new(start: MonthKey, end: MonthKey) -> Self {
        Self {
            next: (start <= end).then_some(start),
            end,
        }
    }
}

impl Iterator for MonthRange {
    type Item = MonthKey;

    fn next(&mut self) -> Option<MonthKey> {
        let current = self.next?;
        self.next = if current < self.end {
            Some(current.succ())
        } else {
            None
        };
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = match self.next {
            Some(next) => (self.end.ordinal() - next.ordinal() + 1) as usize,
            None => 0,
        };
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for MonthRange {}

/// Every month from `start` to `end`, both included
///
/// A reversed range yields an empty vector rather than an error.
pub fn months_between(start: MonthKey, end: MonthKey) -> Vec<MonthKey> {
    MonthRange::new(start, end).collect()
}

/// Number of months `months_between` yields for the same bounds
pub fn month_count(start: MonthKey, end: MonthKey) -> usize {
    if start > end {
        0
    } else {
        (end.ordinal() - start.ordinal() + 1) as usize
    }
}
