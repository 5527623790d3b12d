//! Per-day modifier computation.
//!
//! [`compute_modifiers`] is a pure function of the day, the selection state,
//! the host predicates and the render context. It is called once per visible
//! day per render, so it allocates nothing and evaluates each host predicate
//! at most a handful of times.

use std::fmt;

use crate::{
    CalendarDay, Clock, FocusTarget, HoverState, SelectionRange,
    grid::{MonthAnchor, MonthModifiers},
    predicates::{Inclusivity, is_between, is_next_day, is_same_day},
    prelude::*,
};

/// A named visual/semantic state of a calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
pub enum Modifier {
    #[display(fmt = "blocked")]
    Blocked,
    #[display(fmt = "blocked-calendar")]
    BlockedCalendar,
    #[display(fmt = "blocked-out-of-range")]
    BlockedOutOfRange,
    #[display(fmt = "blocked-minimum-nights")]
    BlockedMinimumNights,
    #[display(fmt = "valid")]
    Valid,
    #[display(fmt = "hovered")]
    Hovered,
    #[display(fmt = "hovered-span")]
    HoveredSpan,
    #[display(fmt = "after-hovered-start")]
    AfterHoveredStart,
    #[display(fmt = "last-in-range")]
    LastInRange,
    #[display(fmt = "selected-start")]
    SelectedStart,
    #[display(fmt = "selected-end")]
    SelectedEnd,
    #[display(fmt = "selected-span")]
    SelectedSpan,
    /// Set by the single-date controller only.
    #[display(fmt = "selected")]
    Selected,
    #[display(fmt = "today")]
    Today,
    #[display(fmt = "highlighted-calendar")]
    HighlightedCalendar,
}

impl Modifier {
    pub const ALL: [Self; 15] = [
        Self::Blocked,
        Self::BlockedCalendar,
        Self::BlockedOutOfRange,
        Self::BlockedMinimumNights,
        Self::Valid,
        Self::Hovered,
        Self::HoveredSpan,
        Self::AfterHoveredStart,
        Self::LastInRange,
        Self::SelectedStart,
        Self::SelectedEnd,
        Self::SelectedSpan,
        Self::Selected,
        Self::Today,
        Self::HighlightedCalendar,
    ];

    const fn bit(self) -> u16 {
        1 << self as u16
    }
}

/// The modifiers that apply to one day. A bit set, so it is `Copy` and
/// cheap to build for every cell of every visible month.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ModifierSet(u16);

impl ModifierSet {
    pub const EMPTY: Self = Self(0);

    pub const fn contains(self, modifier: Modifier) -> bool {
        self.0 & modifier.bit() != 0
    }

    pub const fn insert(&mut self, modifier: Modifier) {
        self.0 |= modifier.bit();
    }

    pub const fn remove(&mut self, modifier: Modifier) {
        self.0 &= !modifier.bit();
    }

    /// Inserts `modifier` when `on` is true.
    pub const fn set(&mut self, modifier: Modifier, on: bool) {
        if on {
            self.insert(modifier);
        } else {
            self.remove(modifier);
        }
    }

    #[must_use]
    pub const fn with(mut self, modifier: Modifier) -> Self {
        self.insert(modifier);
        self
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn iter(self) -> impl Iterator<Item = Modifier> {
        Modifier::ALL.into_iter().filter(move |m| self.contains(*m))
    }

    /// True for any of the blocked-* modifiers, not only the aggregate.
    pub const fn is_any_blocked(self) -> bool {
        self.contains(Modifier::Blocked)
            || self.contains(Modifier::BlockedCalendar)
            || self.contains(Modifier::BlockedOutOfRange)
            || self.contains(Modifier::BlockedMinimumNights)
    }

    /// True for `selected`, `selected-start` or `selected-end`.
    pub const fn is_selected(self) -> bool {
        self.contains(Modifier::Selected)
            || self.contains(Modifier::SelectedStart)
            || self.contains(Modifier::SelectedEnd)
    }
}

impl FromIterator<Modifier> for ModifierSet {
    fn from_iter<I: IntoIterator<Item = Modifier>>(iter: I) -> Self {
        let mut set = Self::EMPTY;
        set.extend(iter);
        set
    }
}

impl Extend<Modifier> for ModifierSet {
    fn extend<I: IntoIterator<Item = Modifier>>(&mut self, iter: I) {
        for modifier in iter {
            self.insert(modifier);
        }
    }
}

impl fmt::Debug for ModifierSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter().map(|m| m.to_string())).finish()
    }
}

/// Space-separated modifier names, in declaration order.
impl fmt::Display for ModifierSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, modifier) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{modifier}")?;
        }
        Ok(())
    }
}

/// Host-supplied day predicates. Every method defaults to "never", so a
/// host only implements the ones it needs. Implementations must be pure.
pub trait DayPredicates {
    fn is_day_blocked(&self, _day: CalendarDay) -> bool {
        false
    }

    fn is_outside_range(&self, _day: CalendarDay) -> bool {
        false
    }

    fn is_day_highlighted(&self, _day: CalendarDay) -> bool {
        false
    }
}

/// Predicates that never fire.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPredicates;

impl DayPredicates for NoPredicates {}

impl<P: DayPredicates + ?Sized> DayPredicates for &P {
    fn is_day_blocked(&self, day: CalendarDay) -> bool {
        (**self).is_day_blocked(day)
    }

    fn is_outside_range(&self, day: CalendarDay) -> bool {
        (**self).is_outside_range(day)
    }

    fn is_day_highlighted(&self, day: CalendarDay) -> bool {
        (**self).is_day_highlighted(day)
    }
}

impl<P: DayPredicates + ?Sized> DayPredicates for Box<P> {
    fn is_day_blocked(&self, day: CalendarDay) -> bool {
        (**self).is_day_blocked(day)
    }

    fn is_outside_range(&self, day: CalendarDay) -> bool {
        (**self).is_outside_range(day)
    }

    fn is_day_highlighted(&self, day: CalendarDay) -> bool {
        (**self).is_day_highlighted(day)
    }
}

type DayFn = Box<dyn Fn(CalendarDay) -> bool>;

/// [`DayPredicates`] built from closures.
#[derive(Default)]
pub struct PredicateFns {
    is_day_blocked:     Option<DayFn>,
    is_outside_range:   Option<DayFn>,
    is_day_highlighted: Option<DayFn>,
}

impl PredicateFns {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn day_blocked(mut self, f: impl Fn(CalendarDay) -> bool + 'static) -> Self {
        self.is_day_blocked = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn outside_range(mut self, f: impl Fn(CalendarDay) -> bool + 'static) -> Self {
        self.is_outside_range = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn day_highlighted(mut self, f: impl Fn(CalendarDay) -> bool + 'static) -> Self {
        self.is_day_highlighted = Some(Box::new(f));
        self
    }
}

impl DayPredicates for PredicateFns {
    fn is_day_blocked(&self, day: CalendarDay) -> bool {
        self.is_day_blocked.as_ref().is_some_and(|f| f(day))
    }

    fn is_outside_range(&self, day: CalendarDay) -> bool {
        self.is_outside_range.as_ref().is_some_and(|f| f(day))
    }

    fn is_day_highlighted(&self, day: CalendarDay) -> bool {
        self.is_day_highlighted.as_ref().is_some_and(|f| f(day))
    }
}

impl fmt::Debug for PredicateFns {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PredicateFns")
            .field("is_day_blocked", &self.is_day_blocked.is_some())
            .field("is_outside_range", &self.is_outside_range.is_some())
            .field("is_day_highlighted", &self.is_day_highlighted.is_some())
            .finish()
    }
}

/// Everything about the selection that modifiers depend on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DayState {
    pub range:          SelectionRange,
    pub focus:          FocusTarget,
    pub hover:          HoverState,
    pub minimum_nights: u32,
}

/// Per-render environment. `today` is sampled once per pass; `touch`
/// disables every hover-derived modifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderContext {
    pub today: CalendarDay,
    pub touch: bool,
}

impl RenderContext {
    pub fn new(clock: &impl Clock, touch: bool) -> Self {
        Self {
            today: clock.today(),
            touch,
        }
    }
}

/// While the end date is being picked, days that would make the stay
/// shorter than `minimum_nights`.
pub(crate) fn does_not_meet_minimum_nights(
    day: CalendarDay,
    state: &DayState,
    predicates: &impl DayPredicates,
) -> bool {
    if state.focus != FocusTarget::End {
        return false;
    }
    let nights = i64::from(state.minimum_nights);
    match state.range.start_date {
        Some(start) => {
            let diff = start.days_until(day);
            (0..nights).contains(&diff)
        },
        // No start yet: the day can only end a stay whose start is at
        // least `minimum_nights` earlier. Before the calendar begins there
        // is no such start.
        None => day
            .checked_sub_days(nights)
            .is_none_or(|shifted| predicates.is_outside_range(shifted)),
    }
}

/// The aggregate `blocked` modifier, also used to gate clicks.
pub(crate) fn is_blocked(day: CalendarDay, state: &DayState, predicates: &impl DayPredicates) -> bool {
    predicates.is_day_blocked(day)
        || predicates.is_outside_range(day)
        || does_not_meet_minimum_nights(day, state, predicates)
}

fn is_in_hovered_span(day: CalendarDay, state: &DayState, predicates: &impl DayPredicates) -> bool {
    let SelectionRange { start_date, end_date } = state.range;
    let Some(hover) = state.hover.hover_date else {
        return false;
    };
    let on_hover = day == hover;

    let forward = start_date.is_some()
        && end_date.is_none()
        && (is_between(day, start_date, Some(hover), Inclusivity::Exclusive) || on_hover);
    let backward = end_date.is_some()
        && start_date.is_none()
        && (is_between(day, Some(hover), end_date, Inclusivity::Exclusive) || on_hover);

    (forward || backward) && !is_blocked(hover, state, predicates)
}

/// Computes every modifier for `day`.
pub fn compute_modifiers(
    day: CalendarDay,
    state: &DayState,
    predicates: &impl DayPredicates,
    ctx: &RenderContext,
) -> ModifierSet {
    let SelectionRange { start_date, end_date } = state.range;
    let current = Some(day);
    let mut set = ModifierSet::EMPTY;

    let blocked_calendar = predicates.is_day_blocked(day);
    let blocked_out_of_range = predicates.is_outside_range(day);
    let blocked_minimum_nights = does_not_meet_minimum_nights(day, state, predicates);
    let blocked = blocked_calendar || blocked_out_of_range || blocked_minimum_nights;

    set.set(Modifier::BlockedCalendar, blocked_calendar);
    set.set(Modifier::BlockedOutOfRange, blocked_out_of_range);
    set.set(Modifier::BlockedMinimumNights, blocked_minimum_nights);
    set.set(Modifier::Blocked, blocked);
    set.set(Modifier::Valid, !blocked);

    set.set(Modifier::SelectedStart, is_same_day(current, start_date));
    set.set(Modifier::SelectedEnd, is_same_day(current, end_date));
    let in_span = is_between(day, start_date, end_date, Inclusivity::Exclusive);
    set.set(Modifier::SelectedSpan, in_span);
    set.set(Modifier::LastInRange, in_span && is_next_day(current, end_date));

    if !ctx.touch {
        let hover = state.hover.hover_date;
        set.set(Modifier::Hovered, is_same_day(current, hover));
        set.set(Modifier::HoveredSpan, is_in_hovered_span(day, state, predicates));
        set.set(
            Modifier::AfterHoveredStart,
            start_date.is_some()
                && end_date.is_none()
                && !blocked
                && is_next_day(hover, current)
                && state.minimum_nights > 0
                && is_same_day(hover, start_date),
        );
    }

    set.set(Modifier::Today, day == ctx.today);
    set.set(Modifier::HighlightedCalendar, predicates.is_day_highlighted(day));
    set
}

/// Modifiers for every day of `month`.
pub fn compute_month_modifiers(
    month: MonthAnchor,
    state: &DayState,
    predicates: &impl DayPredicates,
    ctx: &RenderContext,
) -> MonthModifiers {
    month
        .days()
        .map(|day| (day, compute_modifiers(day, state, predicates, ctx)))
        .collect()
}
