//! Single-date picker controller. Same controlled contract as the range
//! controller: the host stores [`SingleDateState`], this computes the next one.

use crate::{
    CalendarDay, Clock, HoverState,
    config::PickerConfig,
    grid::MonthAnchor,
    modifiers::{DayPredicates, Modifier, ModifierSet, NoPredicates, RenderContext},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SingleDateState {
    pub date:    Option<CalendarDay>,
    pub focused: bool,
}

impl SingleDateState {
    pub const fn new(date: Option<CalendarDay>, focused: bool) -> Self {
        Self { date, focused }
    }
}

/// Host callbacks; all default to no-ops.
pub trait SingleDateObserver {
    fn on_date_change(&mut self, _date: Option<CalendarDay>) {}
    fn on_focus_change(&mut self, _focused: bool) {}
    fn on_close(&mut self, _date: Option<CalendarDay>) {}
}

impl SingleDateObserver for () {}

#[derive(Debug, Clone)]
pub struct SingleDateController<P = NoPredicates> {
    predicates:               P,
    keep_open_on_date_select: bool,
    disabled:                 bool,
    touch:                    bool,
    hover:                    HoverState,
}

impl Default for SingleDateController {
    fn default() -> Self {
        Self::new(NoPredicates)
    }
}

impl<P: DayPredicates> SingleDateController<P> {
    pub fn new(predicates: P) -> Self {
        Self::from_config(predicates, &PickerConfig::default())
    }

    pub fn from_config(predicates: P, config: &PickerConfig) -> Self {
        Self {
            predicates,
            keep_open_on_date_select: config.keep_open_on_date_select,
            disabled:                 config.disabled,
            touch:                    false,
            hover:                    HoverState::default(),
        }
    }

    #[must_use]
    pub const fn with_keep_open_on_date_select(mut self, keep_open: bool) -> Self {
        self.keep_open_on_date_select = keep_open;
        self
    }

    #[must_use]
    pub const fn with_touch(mut self, touch: bool) -> Self {
        self.touch = touch;
        self
    }

    pub const fn hover(&self) -> HoverState {
        self.hover
    }

    pub fn is_blocked(&self, day: CalendarDay) -> bool {
        self.predicates.is_day_blocked(day) || self.predicates.is_outside_range(day)
    }

    /// The state after clicking `day`, `None` for a blocked day.
    pub fn click_day(&self, state: &SingleDateState, day: CalendarDay) -> Option<SingleDateState> {
        if self.is_blocked(day) {
            tracing::trace!(%day, "ignoring click on blocked day");
            return None;
        }
        let focused = state.focused && self.keep_open_on_date_select;
        tracing::debug!(%day, focused, "date selected");
        Some(SingleDateState::new(Some(day), focused))
    }

    pub fn dispatch_click(
        &self,
        state: &SingleDateState,
        day: CalendarDay,
        observer: &mut impl SingleDateObserver,
    ) -> SingleDateState {
        let Some(next) = self.click_day(state, day) else {
            return *state;
        };
        if next.focused != state.focused {
            observer.on_focus_change(next.focused);
        }
        observer.on_date_change(next.date);
        next
    }

    pub fn hover_day(&mut self, day: CalendarDay) -> bool {
        if self.touch || self.hover.hover_date == Some(day) {
            return false;
        }
        self.hover.hover_date = Some(day);
        true
    }

    pub fn leave_day(&mut self) -> bool {
        if self.touch || self.hover.hover_date.is_none() {
            return false;
        }
        self.hover.clear();
        true
    }

    /// Focus left the picker. Clears hover and, when it was open, reports
    /// the loss of focus and closes it.
    pub fn blur(&mut self, state: &SingleDateState, observer: &mut impl SingleDateObserver) -> SingleDateState {
        self.hover.clear();
        if !state.focused {
            return *state;
        }
        observer.on_focus_change(false);
        observer.on_close(state.date);
        SingleDateState::new(state.date, false)
    }

    /// The input received focus. `false` when the picker is disabled.
    pub fn focus_input(&self, observer: &mut impl SingleDateObserver) -> bool {
        if self.disabled {
            return false;
        }
        observer.on_focus_change(true);
        true
    }

    pub fn clear_date(&self, state: &SingleDateState, observer: &mut impl SingleDateObserver) -> SingleDateState {
        observer.on_date_change(None);
        SingleDateState::new(None, state.focused)
    }

    pub fn initial_visible_month(&self, state: &SingleDateState, clock: &impl Clock) -> MonthAnchor {
        MonthAnchor::of(state.date.unwrap_or_else(|| clock.today()))
    }

    pub fn modifiers(&self, state: &SingleDateState, day: CalendarDay, ctx: &RenderContext) -> ModifierSet {
        let mut set = ModifierSet::EMPTY;
        let blocked_calendar = self.predicates.is_day_blocked(day);
        let blocked_out_of_range = self.predicates.is_outside_range(day);
        let blocked = blocked_calendar || blocked_out_of_range;

        set.set(Modifier::BlockedCalendar, blocked_calendar);
        set.set(Modifier::BlockedOutOfRange, blocked_out_of_range);
        set.set(Modifier::Blocked, blocked);
        set.set(Modifier::Valid, !blocked);
        set.set(Modifier::Selected, state.date == Some(day));
        set.set(Modifier::Hovered, !ctx.touch && self.hover.hover_date == Some(day));
        set.set(Modifier::Today, day == ctx.today);
        set.set(Modifier::HighlightedCalendar, self.predicates.is_day_highlighted(day));
        set
    }
}
