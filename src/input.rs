//! Text input synchronization.
//!
//! Typed text either becomes a valid endpoint or clears it, so the inputs
//! never disagree with the canonical state past the next edit.

use serde::{Deserialize, Serialize};

use crate::{
    CalendarDay, FocusTarget, ParseError, PickerConfig, SelectionRange,
    controller::{RangeObserver, RangeState},
    modifiers::{DayPredicates, NoPredicates},
    single::{SingleDateObserver, SingleDateState},
};

/// A text format accepted by the date inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DateFormat {
    /// `MM/DD/YYYY`
    #[default]
    MonthFirst,
    /// `YYYY-MM-DD`
    Iso,
}

impl DateFormat {
    /// Display format first.
    pub const DEFAULTS: [Self; 2] = [Self::MonthFirst, Self::Iso];

    /// # Errors
    /// Returns a `ParseError` when `text` is not a valid date in this format.
    pub fn parse(self, text: &str) -> Result<CalendarDay, ParseError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ParseError::EmptyInput);
        }
        match self {
            Self::MonthFirst => CalendarDay::parse_month_first(text),
            Self::Iso => CalendarDay::parse_iso(text),
        }
    }

    pub fn format(self, day: CalendarDay) -> String {
        match self {
            Self::MonthFirst => day.to_month_first_string(),
            Self::Iso => day.to_string(),
        }
    }
}

/// Parses `text` with the first of `formats` that accepts it.
///
/// # Errors
/// `ParseError::EmptyInput` for blank text, otherwise the error of the last
/// format tried.
pub fn parse_date_input(text: &str, formats: &[DateFormat]) -> Result<CalendarDay, ParseError> {
    let mut last_err = ParseError::EmptyInput;
    for format in formats {
        match format.parse(text) {
            Ok(day) => return Ok(day),
            Err(err) => last_err = err,
        }
    }
    Err(last_err)
}

fn is_unavailable(day: CalendarDay, predicates: &impl DayPredicates) -> bool {
    predicates.is_day_blocked(day) || predicates.is_outside_range(day)
}

fn display(format: DateFormat, day: Option<CalendarDay>) -> String {
    day.map(|d| format.format(d)).unwrap_or_default()
}

/// Keeps the start and end text fields of a range picker in step with its
/// [`RangeState`].
#[derive(Debug, Clone)]
pub struct RangeInputSync<P = NoPredicates> {
    predicates: P,
    formats:    Vec<DateFormat>,
}

impl<P: DayPredicates> RangeInputSync<P> {
    /// An empty `formats` falls back to [`DateFormat::DEFAULTS`].
    pub fn new(predicates: P, formats: impl Into<Vec<DateFormat>>) -> Self {
        let mut formats = formats.into();
        if formats.is_empty() {
            formats = DateFormat::DEFAULTS.to_vec();
        }
        Self { predicates, formats }
    }

    pub fn from_config(predicates: P, config: &PickerConfig) -> Self {
        Self::new(predicates, config.display_formats.clone())
    }

    pub fn display_format(&self) -> DateFormat {
        self.formats.first().copied().unwrap_or_default()
    }

    fn parse_available(&self, text: &str) -> Option<CalendarDay> {
        parse_date_input(text, &self.formats)
            .inspect_err(|err| tracing::trace!(text, %err, "unparseable date input"))
            .ok()
            .filter(|day| !is_unavailable(*day, &self.predicates))
    }

    /// The start field was edited. A valid start moves focus to the end
    /// field and drops an end that is not after it; anything else clears the
    /// start.
    pub fn start_text_changed(
        &self,
        state: &RangeState,
        text: &str,
        observer: &mut impl RangeObserver,
    ) -> RangeState {
        let end_date = state.range.end_date;
        match self.parse_available(text) {
            Some(start) => {
                let range = SelectionRange::new(Some(start), end_date.filter(|end| *end > start));
                observer.on_dates_change(range);
                observer.on_focus_change(FocusTarget::End);
                RangeState::new(range, FocusTarget::End)
            },
            None => {
                let range = SelectionRange::new(None, end_date);
                observer.on_dates_change(range);
                RangeState::new(range, state.focus)
            },
        }
    }

    /// The end field was edited. A valid end after the start closes the
    /// picker; anything else clears the end.
    pub fn end_text_changed(
        &self,
        state: &RangeState,
        text: &str,
        observer: &mut impl RangeObserver,
    ) -> RangeState {
        let start_date = state.range.start_date;
        let end = self
            .parse_available(text)
            .filter(|end| start_date.is_none_or(|start| *end > start));
        match end {
            Some(end) => {
                let range = SelectionRange::new(start_date, Some(end));
                observer.on_dates_change(range);
                observer.on_focus_change(FocusTarget::None);
                RangeState::new(range, FocusTarget::None)
            },
            None => {
                let range = SelectionRange::new(start_date, None);
                observer.on_dates_change(range);
                RangeState::new(range, state.focus)
            },
        }
    }

    /// Text for the start and end fields; empty for an unset endpoint.
    pub fn display_text(&self, range: &SelectionRange) -> (String, String) {
        let format = self.display_format();
        (display(format, range.start_date), display(format, range.end_date))
    }
}

/// Text field synchronization for the single-date picker.
#[derive(Debug, Clone)]
pub struct SingleInputSync<P = NoPredicates> {
    predicates:               P,
    formats:                  Vec<DateFormat>,
    keep_open_on_date_select: bool,
}

impl<P: DayPredicates> SingleInputSync<P> {
    pub fn new(predicates: P, formats: impl Into<Vec<DateFormat>>) -> Self {
        let mut formats = formats.into();
        if formats.is_empty() {
            formats = DateFormat::DEFAULTS.to_vec();
        }
        Self {
            predicates,
            formats,
            keep_open_on_date_select: false,
        }
    }

    pub fn from_config(predicates: P, config: &PickerConfig) -> Self {
        Self {
            keep_open_on_date_select: config.keep_open_on_date_select,
            ..Self::new(predicates, config.display_formats.clone())
        }
    }

    pub fn display_format(&self) -> DateFormat {
        self.formats.first().copied().unwrap_or_default()
    }

    /// A valid, available date is selected and, unless the picker stays
    /// open, closes it. Anything else clears the date.
    pub fn text_changed(
        &self,
        state: &SingleDateState,
        text: &str,
        observer: &mut impl SingleDateObserver,
    ) -> SingleDateState {
        let date = parse_date_input(text, &self.formats)
            .ok()
            .filter(|day| !is_unavailable(*day, &self.predicates));
        observer.on_date_change(date);

        let focused = if date.is_some() && !self.keep_open_on_date_select {
            observer.on_focus_change(false);
            false
        } else {
            state.focused
        };
        SingleDateState { date, focused }
    }

    pub fn display_text(&self, date: Option<CalendarDay>) -> String {
        display(self.display_format(), date)
    }
}
