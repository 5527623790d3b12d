//! Selection logic for date and date-range pickers.
//!
//! The crate holds everything a picker needs apart from rendering: a
//! day-granularity [`CalendarDay`] value, the range-selection state machine
//! ([`RangeController`]), the per-day modifier engine ([`compute_modifiers`]),
//! the month window used for sliding calendars ([`MonthWindow`]) and the
//! synchronization between text inputs and canonical state.

mod clock;
mod config;
mod consts;
mod controller;
mod grid;
mod input;
mod modifiers;
mod predicates;
mod prelude;
mod range;
mod settings;
mod single;
mod types;

#[cfg(test)]
mod test_utils;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{ConfigError, Orientation, PickerConfig};
pub use consts::*;
pub use controller::{ClickOutcome, RangeController, RangeObserver, RangeState};
pub use grid::{
    EnglishMonthLabels, MonthAnchor, MonthLabeler, MonthModifiers, MonthWindow, TransitionId,
    month_weeks, partition_modifiers,
};
pub use input::{DateFormat, RangeInputSync, SingleInputSync, parse_date_input};
pub use modifiers::{
    DayPredicates, DayState, Modifier, ModifierSet, NoPredicates, PredicateFns, RenderContext,
    compute_modifiers, compute_month_modifiers,
};
pub use predicates::{
    Inclusivity, is_between, is_inclusively_after_day, is_inclusively_before_day, is_next_day,
    is_same_day,
};
pub use range::{FocusTarget, HoverState, RangeError, SelectionRange};
pub use settings::{CalendarDaySettings, DayPhrases};
pub use single::{SingleDateController, SingleDateObserver, SingleDateState};
pub use types::{Day, Month, Weekday, Year, days_in_month, is_leap_year};

use crate::prelude::*;
use std::str::FromStr;
use types::{civil_from_days, days_from_civil};

/// A calendar day. Time of day never takes part in comparisons or
/// arithmetic; every value is a valid proleptic Gregorian date within
/// `MIN_YEAR..=MAX_YEAR`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{:04}-{:02}-{:02}", "year.get()", "month.get()", "day.get()")]
pub struct CalendarDay {
    year:  Year,
    month: Month,
    day:   Day,
}

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ParseError {
    #[display(fmt = "Invalid date format: {_0}")]
    InvalidFormat(String),
    #[display(fmt = "Invalid year: {} (must be {}-{})", "_0", MIN_YEAR, MAX_YEAR)]
    InvalidYear(u16),
    #[display(fmt = "Invalid month: {} (must be 1-{})", "_0", MAX_MONTH)]
    InvalidMonth(u8),
    #[display(fmt = "Invalid day {day} for month {year}-{month:02}")]
    InvalidDay { year: u16, month: u8, day: u8 },
    #[display(fmt = "Empty date string")]
    EmptyInput,
}

impl std::error::Error for ParseError {}

impl CalendarDay {
    /// 0001-01-01
    pub const MIN: Self = Self {
        year:  Year::MIN,
        month: Month::JANUARY,
        day:   Day::FIRST,
    };
    /// 9999-12-31
    pub const MAX: Self = Self {
        year:  Year::MAX,
        month: Month::DECEMBER,
        day:   Day::LAST_OF_DECEMBER,
    };

    /// Builds a day from raw components.
    ///
    /// # Errors
    /// Returns the `ParseError` of the first component that fails validation.
    pub fn new(year: u16, month: u8, day: u8) -> Result<Self, ParseError> {
        let year = Year::new(year)?;
        let month = Month::new(month)?;
        let day = Day::new(day, year, month)?;
        Ok(Self { year, month, day })
    }

    /// Builds a day from components that are already validated together.
    pub const fn from_parts(year: Year, month: Month, day: Day) -> Self {
        Self { year, month, day }
    }

    pub const fn year(self) -> u16 {
        self.year.get()
    }

    pub const fn month(self) -> u8 {
        self.month.get()
    }

    pub const fn day(self) -> u8 {
        self.day.get()
    }

    pub const fn year_typed(self) -> Year {
        self.year
    }

    pub const fn month_typed(self) -> Month {
        self.month
    }

    /// Days since 1970-01-01 (negative before).
    pub fn epoch_day(self) -> i64 {
        days_from_civil(self.year(), self.month(), self.day())
    }

    /// Inverse of [`CalendarDay::epoch_day`]; `None` outside the supported years.
    pub fn from_epoch_day(epoch_day: i64) -> Option<Self> {
        let (year, month, day) = civil_from_days(epoch_day)?;
        Self::new(year, month, day).ok()
    }

    /// Adds `days` (which may be negative), rolling over months and years.
    /// Returns `None` when the result leaves the supported year range.
    pub fn checked_add_days(self, days: i64) -> Option<Self> {
        Self::from_epoch_day(self.epoch_day().checked_add(days)?)
    }

    pub fn checked_sub_days(self, days: i64) -> Option<Self> {
        Self::from_epoch_day(self.epoch_day().checked_sub(days)?)
    }

    /// Signed number of days from `self` to `other`.
    pub fn days_until(self, other: Self) -> i64 {
        other.epoch_day() - self.epoch_day()
    }

    pub fn weekday(self) -> Weekday {
        Weekday::from_epoch_day(self.epoch_day())
    }

    pub const fn first_of_month(self) -> Self {
        Self {
            year:  self.year,
            month: self.month,
            day:   Day::FIRST,
        }
    }

    pub fn last_of_month(self) -> Self {
        let last = days_in_month(self.year(), self.month());
        // Every month has a day `last`, so this never falls back.
        Day::new(last, self.year, self.month)
            .map_or(self, |day| Self { day, ..self })
    }

    /// Formats as `MM/DD/YYYY`, the default display format of picker inputs.
    pub fn to_month_first_string(self) -> String {
        format!(
            "{:02}{sep}{:02}{sep}{:04}",
            self.month(),
            self.day(),
            self.year(),
            sep = MONTH_FIRST_SEPARATOR
        )
    }
}

impl TryFrom<chrono::NaiveDate> for CalendarDay {
    type Error = ParseError;

    fn try_from(date: chrono::NaiveDate) -> Result<Self, Self::Error> {
        use chrono::Datelike;

        let year = u16::try_from(date.year())
            .map_err(|_| ParseError::InvalidFormat(date.to_string()))?;
        let month = u8::try_from(date.month())
            .map_err(|_| ParseError::InvalidFormat(date.to_string()))?;
        let day =
            u8::try_from(date.day()).map_err(|_| ParseError::InvalidFormat(date.to_string()))?;
        Self::new(year, month, day)
    }
}

impl FromStr for CalendarDay {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ParseError::EmptyInput);
        }

        let has_hyphen = trimmed.contains(DATE_SEPARATOR);
        let has_slash = trimmed.contains(MONTH_FIRST_SEPARATOR);

        if has_hyphen && has_slash {
            return Err(ParseError::InvalidFormat(format!(
                "Mixed delimiters ({DATE_SEPARATOR} and {MONTH_FIRST_SEPARATOR})"
            )));
        }

        if has_hyphen {
            Self::parse_iso(trimmed)
        } else if has_slash {
            Self::parse_month_first(trimmed)
        } else {
            Err(ParseError::InvalidFormat(trimmed.to_owned()))
        }
    }
}

impl CalendarDay {
    fn parse_u16(s: &str) -> Result<u16, ParseError> {
        s.parse::<u16>()
            .map_err(|_| ParseError::InvalidFormat(s.to_owned()))
    }

    fn parse_u8(s: &str) -> Result<u8, ParseError> {
        s.parse::<u8>()
            .map_err(|_| ParseError::InvalidFormat(s.to_owned()))
    }

    fn split_three(s: &str, separator: char) -> Result<[&str; 3], ParseError> {
        let parts: Vec<&str> = s.split(separator).map(str::trim).collect();
        match parts.as_slice() {
            [a, b, c] => Ok([*a, *b, *c]),
            _ => Err(ParseError::InvalidFormat(format!(
                "Expected 2 {separator} separators, found {}",
                parts.len() - 1
            ))),
        }
    }

    /// `YYYY-MM-DD`
    pub(crate) fn parse_iso(s: &str) -> Result<Self, ParseError> {
        let [year, month, day] = Self::split_three(s, DATE_SEPARATOR)?;
        Self::new(
            Self::parse_u16(year)?,
            Self::parse_u8(month)?,
            Self::parse_u8(day)?,
        )
    }

    /// `MM/DD/YYYY`
    pub(crate) fn parse_month_first(s: &str) -> Result<Self, ParseError> {
        let [month, day, year] = Self::split_three(s, MONTH_FIRST_SEPARATOR)?;
        Self::new(
            Self::parse_u16(year)?,
            Self::parse_u8(month)?,
            Self::parse_u8(day)?,
        )
    }
}

impl serde::Serialize for CalendarDay {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for CalendarDay {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
