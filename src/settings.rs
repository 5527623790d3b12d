//! Render-facing summary of one day cell.

use std::fmt;

use crate::{
    CalendarDay,
    modifiers::{Modifier, ModifierSet},
};

type Phrase = fn(&str) -> String;

/// Accessible-label phrases. Each receives the long form of the date,
/// e.g. "Tuesday, October 10, 2017". The start/end phrases are optional and
/// fall back to `date_is_selected`.
#[derive(Clone, Copy)]
pub struct DayPhrases {
    pub choose_available_date:          Phrase,
    pub date_is_unavailable:            Phrase,
    pub date_is_selected:               Phrase,
    pub date_is_selected_as_start_date: Option<Phrase>,
    pub date_is_selected_as_end_date:   Option<Phrase>,
}

fn available(date: &str) -> String {
    date.to_owned()
}

fn unavailable(date: &str) -> String {
    format!("Not available. {date}")
}

fn selected(date: &str) -> String {
    format!("Selected. {date}")
}

fn selected_as_start(date: &str) -> String {
    format!("Selected as start date. {date}")
}

fn selected_as_end(date: &str) -> String {
    format!("Selected as end date. {date}")
}

impl Default for DayPhrases {
    fn default() -> Self {
        Self {
            choose_available_date:          available,
            date_is_unavailable:            unavailable,
            date_is_selected:               selected,
            date_is_selected_as_start_date: Some(selected_as_start as Phrase),
            date_is_selected_as_end_date:   Some(selected_as_end as Phrase),
        }
    }
}

impl fmt::Debug for DayPhrases {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DayPhrases")
            .field("date_is_selected_as_start_date", &self.date_is_selected_as_start_date.is_some())
            .field("date_is_selected_as_end_date", &self.date_is_selected_as_end_date.is_some())
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarDaySettings {
    /// `selected`, `selected-start` or `selected-end`.
    pub selected:           bool,
    /// In the hovered span and not selected.
    pub hovered_span:       bool,
    pub is_outside_range:   bool,
    /// Any blocked-* modifier.
    pub use_default_cursor: bool,
    pub aria_label:         String,
}

impl CalendarDaySettings {
    pub fn new(day: CalendarDay, modifiers: &ModifierSet, phrases: &DayPhrases) -> Self {
        let selected = modifiers.is_selected();
        let hovered_span = (modifiers.contains(Modifier::HoveredSpan)
            || modifiers.contains(Modifier::AfterHoveredStart))
            && !selected;

        let start_phrase = phrases
            .date_is_selected_as_start_date
            .filter(|_| modifiers.contains(Modifier::SelectedStart));
        let end_phrase = phrases
            .date_is_selected_as_end_date
            .filter(|_| modifiers.contains(Modifier::SelectedEnd));

        let phrase = start_phrase.or(end_phrase).unwrap_or(if selected {
            phrases.date_is_selected
        } else if modifiers.contains(Modifier::Blocked) {
            phrases.date_is_unavailable
        } else {
            phrases.choose_available_date
        });

        Self {
            selected,
            hovered_span,
            is_outside_range:   modifiers.contains(Modifier::BlockedOutOfRange),
            use_default_cursor: modifiers.is_any_blocked(),
            aria_label:         phrase(&long_date(day)),
        }
    }
}

/// "Tuesday, October 10, 2017"
fn long_date(day: CalendarDay) -> String {
    format!(
        "{}, {} {}, {}",
        day.weekday(),
        day.month_typed().name(),
        day.day(),
        day.year()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::day;

    fn settings(modifiers: &[Modifier], phrases: &DayPhrases) -> CalendarDaySettings {
        let set: ModifierSet = modifiers.iter().copied().collect();
        CalendarDaySettings::new(day(2017, 10, 10), &set, phrases)
    }

    #[test]
    fn test_long_date() {
        assert_eq!(long_date(day(2017, 10, 10)), "Tuesday, October 10, 2017");
        assert_eq!(long_date(day(2024, 3, 1)), "Friday, March 1, 2024");
    }

    #[test]
    fn test_default_cursor_for_any_blocked() {
        let phrases = DayPhrases::default();
        for blocked in [
            Modifier::BlockedMinimumNights,
            Modifier::BlockedCalendar,
            Modifier::BlockedOutOfRange,
        ] {
            assert!(settings(&[blocked], &phrases).use_default_cursor, "{blocked}");
        }
        assert!(!settings(&[Modifier::Valid], &phrases).use_default_cursor);
    }

    #[test]
    fn test_selected_and_hovered_span() {
        let phrases = DayPhrases::default();
        for selected in [Modifier::Selected, Modifier::SelectedStart, Modifier::SelectedEnd] {
            let s = settings(&[selected, Modifier::HoveredSpan], &phrases);
            assert!(s.selected, "{selected}");
            assert!(!s.hovered_span, "{selected}");
        }
        assert!(settings(&[Modifier::HoveredSpan], &phrases).hovered_span);
        assert!(settings(&[Modifier::AfterHoveredStart], &phrases).hovered_span);
        assert!(!settings(&[], &phrases).selected);
    }

    #[test]
    fn test_outside_range() {
        let phrases = DayPhrases::default();
        assert!(settings(&[Modifier::BlockedOutOfRange], &phrases).is_outside_range);
        assert!(!settings(&[Modifier::BlockedCalendar], &phrases).is_outside_range);
    }

    #[test]
    fn test_aria_label_cases() {
        struct TestCase {
            modifiers:   &'static [Modifier],
            expected:    &'static str,
            description: &'static str,
        }

        let cases = [
            TestCase {
                modifiers:   &[],
                expected:    "Tuesday, October 10, 2017",
                description: "available",
            },
            TestCase {
                modifiers:   &[Modifier::Selected],
                expected:    "Selected. Tuesday, October 10, 2017",
                description: "selected",
            },
            TestCase {
                modifiers:   &[Modifier::Blocked, Modifier::SelectedStart],
                expected:    "Selected as start date. Tuesday, October 10, 2017",
                description: "start wins over blocked",
            },
            TestCase {
                modifiers:   &[Modifier::Blocked, Modifier::SelectedEnd],
                expected:    "Selected as end date. Tuesday, October 10, 2017",
                description: "end wins over blocked",
            },
            TestCase {
                modifiers:   &[Modifier::Blocked],
                expected:    "Not available. Tuesday, October 10, 2017",
                description: "unavailable",
            },
        ];

        let phrases = DayPhrases::default();
        for case in &cases {
            assert_eq!(settings(case.modifiers, &phrases).aria_label, case.expected, "{}", case.description);
        }
    }

    #[test]
    fn test_aria_label_falls_back_to_selected() {
        let phrases = DayPhrases {
            date_is_selected_as_start_date: None,
            date_is_selected_as_end_date:   None,
            ..DayPhrases::default()
        };
        for modifier in [Modifier::SelectedStart, Modifier::SelectedEnd] {
            assert_eq!(
                settings(&[modifier], &phrases).aria_label,
                "Selected. Tuesday, October 10, 2017"
            );
        }
    }
}
