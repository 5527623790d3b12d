use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{
    CalendarDay, OPEN_RANGE_MARKER, ParseError, RANGE_SEPARATOR,
    predicates::{Inclusivity, is_between},
    prelude::*,
};

/// Which endpoint of the range the next day click will set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, Serialize, Deserialize)]
pub enum FocusTarget {
    #[display(fmt = "startDate")]
    #[serde(rename = "startDate")]
    Start,
    #[display(fmt = "endDate")]
    #[serde(rename = "endDate")]
    End,
    #[default]
    #[display(fmt = "none")]
    #[serde(rename = "none")]
    None,
}

impl FocusTarget {
    pub const fn is_focused(self) -> bool {
        !matches!(self, Self::None)
    }
}

/// The day under the pointer, if any. Transient: cleared on pointer leave
/// and on blur, and never part of a committed selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct HoverState {
    pub hover_date: Option<CalendarDay>,
}

impl HoverState {
    pub const fn new(hover_date: Option<CalendarDay>) -> Self {
        Self { hover_date }
    }

    pub fn clear(&mut self) {
        self.hover_date = None;
    }
}

/// A possibly open date range.
///
/// Ordering of the endpoints is not enforced here: hosts may hand back a
/// reversed pair, and the selection controller repairs it on the next
/// transition. Use [`SelectionRange::is_ordered`] to check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SelectionRange {
    pub start_date: Option<CalendarDay>,
    pub end_date:   Option<CalendarDay>,
}

/// Error type for range text parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RangeError {
    /// Error parsing one of the endpoints.
    #[error(transparent)]
    ParseError(#[from] ParseError),

    /// Invalid range format.
    #[error("Invalid range format: {0}")]
    InvalidFormat(String),
}

impl SelectionRange {
    pub const EMPTY: Self = Self {
        start_date: None,
        end_date:   None,
    };

    pub const fn new(start_date: Option<CalendarDay>, end_date: Option<CalendarDay>) -> Self {
        Self { start_date, end_date }
    }

    pub const fn is_empty(&self) -> bool {
        self.start_date.is_none() && self.end_date.is_none()
    }

    pub const fn is_complete(&self) -> bool {
        self.start_date.is_some() && self.end_date.is_some()
    }

    /// False only when both endpoints are set and start is after end.
    pub fn is_ordered(&self) -> bool {
        match (self.start_date, self.end_date) {
            (Some(start), Some(end)) => start <= end,
            _ => true,
        }
    }

    /// Nights between the endpoints when both are set.
    pub fn nights(&self) -> Option<i64> {
        Some(self.start_date?.days_until(self.end_date?))
    }

    /// Inclusive containment; an open range contains nothing.
    pub fn contains(&self, day: CalendarDay) -> bool {
        is_between(day, self.start_date, self.end_date, Inclusivity::Inclusive)
    }

    /// The month a calendar should open on: the start date, else the end date.
    pub fn anchor_day(&self) -> Option<CalendarDay> {
        self.start_date.or(self.end_date)
    }
}

fn write_side(f: &mut std::fmt::Formatter<'_>, side: Option<CalendarDay>) -> std::fmt::Result {
    match side {
        Some(day) => write!(f, "{day}"),
        None => f.write_str(OPEN_RANGE_MARKER),
    }
}

impl std::fmt::Display for SelectionRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write_side(f, self.start_date)?;
        write!(f, "{RANGE_SEPARATOR}")?;
        write_side(f, self.end_date)
    }
}

impl FromStr for SelectionRange {
    type Err = RangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let separator_count = trimmed.matches(RANGE_SEPARATOR).count();

        match separator_count {
            0 => Err(RangeError::InvalidFormat(format!(
                "No range separator found (expected '{RANGE_SEPARATOR}'): {s}"
            ))),
            1 => {
                let (start_str, end_str) = trimmed.split_once(RANGE_SEPARATOR).ok_or_else(|| {
                    RangeError::InvalidFormat(format!("Separator '{RANGE_SEPARATOR}' not found despite count == 1"))
                })?;
                Ok(Self::new(parse_side(start_str)?, parse_side(end_str)?))
            },
            _ => Err(RangeError::InvalidFormat(format!(
                "Too many '{RANGE_SEPARATOR}' separators: expected 1, found {separator_count}"
            ))),
        }
    }
}

fn parse_side(s: &str) -> Result<Option<CalendarDay>, ParseError> {
    let s = s.trim();
    if s == OPEN_RANGE_MARKER {
        return Ok(None);
    }
    CalendarDay::parse_iso(s).map(Some)
}

impl Serialize for SelectionRange {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for SelectionRange {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{day, range};

    #[test]
    fn test_is_ordered_cases() {
        struct TestCase {
            range:       SelectionRange,
            ordered:     bool,
            description: &'static str,
        }

        let cases = [
            TestCase {
                range:       range(Some(day(2024, 3, 10)), Some(day(2024, 3, 12))),
                ordered:     true,
                description: "start before end",
            },
            TestCase {
                range:       range(Some(day(2024, 3, 10)), Some(day(2024, 3, 10))),
                ordered:     true,
                description: "single-day range",
            },
            TestCase {
                range:       range(Some(day(2024, 3, 12)), Some(day(2024, 3, 10))),
                ordered:     false,
                description: "reversed endpoints",
            },
            TestCase {
                range:       range(Some(day(2024, 3, 12)), None),
                ordered:     true,
                description: "open end",
            },
            TestCase {
                range:       SelectionRange::EMPTY,
                ordered:     true,
                description: "empty",
            },
        ];

        for case in &cases {
            assert_eq!(case.range.is_ordered(), case.ordered, "{}", case.description);
        }
    }

    #[test]
    fn test_nights_and_contains() {
        let r = range(Some(day(2024, 3, 10)), Some(day(2024, 3, 13)));
        assert_eq!(r.nights(), Some(3));
        assert!(r.contains(day(2024, 3, 10)));
        assert!(r.contains(day(2024, 3, 13)));
        assert!(!r.contains(day(2024, 3, 14)));

        let open = range(Some(day(2024, 3, 10)), None);
        assert_eq!(open.nights(), None);
        assert!(!open.contains(day(2024, 3, 10)));
    }

    #[test]
    fn test_anchor_day() {
        assert_eq!(
            range(Some(day(2024, 3, 10)), Some(day(2024, 4, 1))).anchor_day(),
            Some(day(2024, 3, 10))
        );
        assert_eq!(range(None, Some(day(2024, 4, 1))).anchor_day(), Some(day(2024, 4, 1)));
        assert_eq!(SelectionRange::EMPTY.anchor_day(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(
            range(Some(day(2024, 3, 10)), Some(day(2024, 3, 12))).to_string(),
            "2024-03-10/2024-03-12"
        );
        assert_eq!(range(None, Some(day(2024, 3, 12))).to_string(), "../2024-03-12");
        assert_eq!(SelectionRange::EMPTY.to_string(), "../..");
    }

    #[test]
    fn test_from_str() {
        let r = "2024-03-10/2024-03-12".parse::<SelectionRange>().expect("failed to parse closed range");
        assert_eq!(r, range(Some(day(2024, 3, 10)), Some(day(2024, 3, 12))));

        let r = "2024-03-10/..".parse::<SelectionRange>().expect("failed to parse open range");
        assert_eq!(r, range(Some(day(2024, 3, 10)), None));

        // Reversed ranges are representable; the controller repairs them.
        let r = "2024-03-12/2024-03-10".parse::<SelectionRange>().expect("failed to parse reversed range");
        assert!(!r.is_ordered());
    }

    #[test]
    fn test_from_str_errors() {
        let err = "2024-03-10".parse::<SelectionRange>().expect_err("expected missing separator error");
        assert!(err.to_string().contains("No range separator found"));

        let err = "2024-03-10/2024-03-11/2024-03-12"
            .parse::<SelectionRange>()
            .expect_err("expected too many separators error");
        assert!(err.to_string().contains("expected 1, found 2"));

        let err = "2024-03-10/2024-02-30".parse::<SelectionRange>().expect_err("expected invalid day");
        assert!(matches!(err, RangeError::ParseError(ParseError::InvalidDay { .. })));
    }

    #[test]
    fn test_serde_string_format() {
        let r = range(Some(day(2024, 3, 10)), None);
        let json = serde_json::to_string(&r).expect("failed to serialize range");
        assert_eq!(json, r#""2024-03-10/..""#);
        let parsed: SelectionRange = serde_json::from_str(&json).expect("failed to deserialize range");
        assert_eq!(parsed, r);
    }

    #[test]
    fn test_focus_target_serde_and_display() {
        assert_eq!(serde_json::to_string(&FocusTarget::Start).unwrap(), r#""startDate""#);
        assert_eq!(serde_json::from_str::<FocusTarget>(r#""endDate""#).unwrap(), FocusTarget::End);
        assert_eq!(FocusTarget::None.to_string(), "none");
        assert!(FocusTarget::End.is_focused());
        assert!(!FocusTarget::default().is_focused());
    }
}
