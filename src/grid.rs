//! Month layout: the sliding window of rendered months, the week rows of one
//! month, month captions and the per-month split of day modifiers.

use std::{
    collections::{BTreeMap, VecDeque},
    num::NonZeroU8,
};

use crate::{
    CalendarDay, DAYS_PER_WEEK, MAX_MONTH, Month, ParseError, TRANSITION_BUFFER_MONTHS, Weekday,
    Year,
    config::Orientation,
    days_in_month,
    modifiers::{DayPredicates, DayState, ModifierSet, RenderContext, compute_month_modifiers},
    prelude::*,
};

/// Modifiers of the days of one month, in day order.
pub type MonthModifiers = BTreeMap<CalendarDay, ModifierSet>;

/// A calendar month, identified by its first day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{:04}-{:02}", "year.get()", "month.get()")]
pub struct MonthAnchor {
    year:  Year,
    month: Month,
}

impl MonthAnchor {
    /// # Errors
    /// Returns `ParseError::InvalidYear` or `ParseError::InvalidMonth`.
    pub fn new(year: u16, month: u8) -> Result<Self, ParseError> {
        Ok(Self {
            year:  Year::new(year)?,
            month: Month::new(month)?,
        })
    }

    /// The month containing `day`.
    pub const fn of(day: CalendarDay) -> Self {
        Self {
            year:  day.year_typed(),
            month: day.month_typed(),
        }
    }

    pub const fn year(self) -> u16 {
        self.year.get()
    }

    pub const fn month(self) -> u8 {
        self.month.get()
    }

    pub fn first_day(self) -> CalendarDay {
        CalendarDay::from_parts(self.year, self.month, crate::Day::FIRST)
    }

    pub fn last_day(self) -> CalendarDay {
        self.first_day().last_of_month()
    }

    pub const fn len_days(self) -> u8 {
        days_in_month(self.year(), self.month())
    }

    /// Every day of the month, in order.
    pub fn days(self) -> impl Iterator<Item = CalendarDay> {
        (1..=self.len_days()).filter_map(move |d| CalendarDay::new(self.year(), self.month(), d).ok())
    }

    fn month_index(self) -> i64 {
        i64::from(self.year()) * i64::from(MAX_MONTH) + i64::from(self.month()) - 1
    }

    fn from_month_index(index: i64) -> Option<Self> {
        let months = i64::from(MAX_MONTH);
        let year = u16::try_from(index.div_euclid(months)).ok()?;
        let month = u8::try_from(index.rem_euclid(months) + 1).ok()?;
        Self::new(year, month).ok()
    }

    /// `None` when the result leaves the supported years.
    pub fn checked_add_months(self, months: i64) -> Option<Self> {
        Self::from_month_index(self.month_index().checked_add(months)?)
    }

    /// Signed number of months from `self` to `other`.
    pub fn months_until(self, other: Self) -> i64 {
        other.month_index() - self.month_index()
    }
}

impl From<CalendarDay> for MonthAnchor {
    fn from(day: CalendarDay) -> Self {
        Self::of(day)
    }
}

/// Identifies one window change. Completion signals carrying an older id
/// are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, From, Into)]
pub struct TransitionId(u64);

/// Produces month captions. `locale` identifies the label set; captions are
/// recomputed only when it changes.
pub trait MonthLabeler {
    fn locale(&self) -> &str;
    fn label(&self, month: MonthAnchor) -> String;
}

/// "March 2024"
#[derive(Debug, Clone, Copy, Default)]
pub struct EnglishMonthLabels;

impl MonthLabeler for EnglishMonthLabels {
    fn locale(&self) -> &str {
        "en"
    }

    fn label(&self, month: MonthAnchor) -> String {
        format!("{} {}", month.month.name(), month.year())
    }
}

/// The months a calendar renders: the visible ones plus, outside
/// vertical-scrollable layouts, one hidden buffer month on each side so a
/// one-month slide has content to reveal.
#[derive(Debug, Clone)]
pub struct MonthWindow {
    months:           VecDeque<MonthAnchor>,
    anchor:           MonthAnchor,
    number_of_months: NonZeroU8,
    orientation:      Orientation,
    next_transition:  u64,
    pending:          Option<TransitionId>,
    label_locale:     Option<String>,
    labels:           BTreeMap<MonthAnchor, String>,
}

impl MonthWindow {
    pub fn new(anchor: MonthAnchor, number_of_months: NonZeroU8, orientation: Orientation) -> Self {
        Self {
            months:          build_months(anchor, number_of_months, orientation),
            anchor,
            number_of_months,
            orientation,
            next_transition: 0,
            pending:         None,
            label_locale:    None,
            labels:          BTreeMap::new(),
        }
    }

    /// Moves the window so that `anchor` is the first visible month.
    ///
    /// A shift of exactly one month slides the window and keeps the other
    /// months in place; any other change rebuilds it. Returns the id of the
    /// started transition, or `None` when nothing changed.
    pub fn update(
        &mut self,
        anchor: MonthAnchor,
        number_of_months: NonZeroU8,
        orientation: Orientation,
    ) -> Option<TransitionId> {
        let layout_changed = number_of_months != self.number_of_months || orientation != self.orientation;
        let shift = self.anchor.months_until(anchor);

        if !layout_changed && shift == 0 {
            return None;
        }

        let slid = !layout_changed && self.slide(shift);
        if !slid {
            tracing::debug!(
                from = %self.anchor,
                to = %anchor,
                number_of_months = number_of_months.get(),
                ?orientation,
                "rebuilding month window"
            );
            self.months = build_months(anchor, number_of_months, orientation);
        }

        self.anchor = anchor;
        self.number_of_months = number_of_months;
        self.orientation = orientation;
        self.labels.retain(|month, _| self.months.contains(month));

        let id = TransitionId(self.next_transition);
        self.next_transition += 1;
        self.pending = Some(id);
        Some(id)
    }

    /// Slides by one month in place. Only a window holding every buffer
    /// month can slide; a window clipped at a calendar bound is rebuilt.
    fn slide(&mut self, shift: i64) -> bool {
        let full = i64::from(self.number_of_months.get()) + 2 * buffer_months(self.orientation);
        if i64::try_from(self.months.len()).ok() != Some(full) {
            return false;
        }
        match shift {
            1 => {
                let Some(next) = self.months.back().and_then(|m| m.checked_add_months(1)) else {
                    return false;
                };
                self.months.pop_front();
                self.months.push_back(next);
                true
            },
            -1 => {
                let Some(prev) = self.months.front().and_then(|m| m.checked_add_months(-1)) else {
                    return false;
                };
                self.months.pop_back();
                self.months.push_front(prev);
                true
            },
            _ => false,
        }
    }

    /// Marks the transition `id` as finished. Returns `false`, changing
    /// nothing, when `id` is not the pending transition.
    pub fn finish_transition(&mut self, id: TransitionId) -> bool {
        if self.pending == Some(id) {
            self.pending = None;
            true
        } else {
            tracing::trace!(?id, pending = ?self.pending, "ignoring stale transition end");
            false
        }
    }

    pub const fn is_transitioning(&self) -> bool {
        self.pending.is_some()
    }

    pub const fn anchor(&self) -> MonthAnchor {
        self.anchor
    }

    pub const fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// All rendered months, buffer months included.
    pub fn months(&self) -> impl ExactSizeIterator<Item = MonthAnchor> + '_ {
        self.months.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.months.len()
    }

    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }

    fn leading_buffer(&self) -> usize {
        self.months.iter().take_while(|m| **m < self.anchor).count()
    }

    /// Whether the month at `index` (into [`MonthWindow::months`]) is shown.
    pub fn is_visible(&self, index: usize) -> bool {
        let start = self.leading_buffer();
        (start..start + usize::from(self.number_of_months.get())).contains(&index) && index < self.months.len()
    }

    pub fn visible_months(&self) -> impl Iterator<Item = MonthAnchor> + '_ {
        self.months
            .iter()
            .copied()
            .skip(self.leading_buffer())
            .take(usize::from(self.number_of_months.get()))
    }

    /// Fills in missing captions. When the labeler's locale differs from the
    /// one the cached captions were made with, every caption is redone and
    /// `true` is returned.
    pub fn refresh_labels(&mut self, labeler: &impl MonthLabeler) -> bool {
        let locale_changed = self.label_locale.as_deref() != Some(labeler.locale());
        if locale_changed {
            tracing::debug!(locale = labeler.locale(), "recomputing month labels");
            self.labels.clear();
            self.label_locale = Some(labeler.locale().to_owned());
        }
        for month in &self.months {
            self.labels.entry(*month).or_insert_with(|| labeler.label(*month));
        }
        locale_changed
    }

    /// Caption of `month` as of the last [`MonthWindow::refresh_labels`].
    pub fn label(&self, month: MonthAnchor) -> Option<&str> {
        self.labels.get(&month).map(String::as_str)
    }

    /// Modifiers for every day of every rendered month, keyed by `YYYY-MM`.
    pub fn window_modifiers(
        &self,
        state: &DayState,
        predicates: &impl DayPredicates,
        ctx: &RenderContext,
    ) -> BTreeMap<String, MonthModifiers> {
        self.months
            .iter()
            .map(|month| (month.to_string(), compute_month_modifiers(*month, state, predicates, ctx)))
            .collect()
    }
}

fn buffer_months(orientation: Orientation) -> i64 {
    if orientation.uses_transition_months() {
        i64::from(TRANSITION_BUFFER_MONTHS)
    } else {
        0
    }
}

fn build_months(anchor: MonthAnchor, number_of_months: NonZeroU8, orientation: Orientation) -> VecDeque<MonthAnchor> {
    let buffer = buffer_months(orientation);
    let count = i64::from(number_of_months.get());
    (-buffer..count + buffer)
        .filter_map(|offset| anchor.checked_add_months(offset))
        .collect()
}

/// The week rows of `month`, each starting on `first_day_of_week`. Cells
/// outside the month hold the neighbouring days when `enable_outside_days`
/// is set and `None` otherwise.
pub fn month_weeks(
    month: MonthAnchor,
    first_day_of_week: Weekday,
    enable_outside_days: bool,
) -> Vec<[Option<CalendarDay>; DAYS_PER_WEEK as usize]> {
    let first = month.first_day();
    let leading = i64::from(first.weekday().column(first_day_of_week));
    let cells = leading + i64::from(month.len_days());
    let rows = (cells + i64::from(DAYS_PER_WEEK) - 1) / i64::from(DAYS_PER_WEEK);

    (0..rows)
        .map(|row| {
            let mut week = [None; DAYS_PER_WEEK as usize];
            for (col, cell) in (0_i64..).zip(week.iter_mut()) {
                let offset = row * i64::from(DAYS_PER_WEEK) + col - leading;
                let day = first.checked_add_days(offset);
                let inside = day.is_some_and(|d| MonthAnchor::of(d) == month);
                if inside || enable_outside_days {
                    *cell = day;
                }
            }
            week
        })
        .collect()
}

/// Splits day modifiers by month, keyed by `YYYY-MM`.
pub fn partition_modifiers(
    days: impl IntoIterator<Item = (CalendarDay, ModifierSet)>,
) -> BTreeMap<String, MonthModifiers> {
    let mut months: BTreeMap<String, MonthModifiers> = BTreeMap::new();
    for (day, set) in days {
        months
            .entry(MonthAnchor::of(day).to_string())
            .or_default()
            .insert(day, set);
    }
    months
}
