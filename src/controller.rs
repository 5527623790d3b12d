//! The date-range selection state machine.
//!
//! The host owns the canonical [`RangeState`]. The controller turns an event
//! and the current state into the next state, and reports it through a
//! [`RangeObserver`]; the host stores it and passes it back on the next
//! event. Hover is the only state the controller keeps for itself.

use crate::{
    CalendarDay, Clock, FocusTarget, HoverState, SelectionRange,
    config::{Orientation, PickerConfig},
    grid::MonthAnchor,
    modifiers::{DayPredicates, DayState, ModifierSet, NoPredicates, RenderContext, compute_modifiers, is_blocked},
};

/// Canonical picker state: the selected range and the focused endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RangeState {
    pub range: SelectionRange,
    pub focus: FocusTarget,
}

impl RangeState {
    pub const fn new(range: SelectionRange, focus: FocusTarget) -> Self {
        Self { range, focus }
    }
}

/// Result of a day click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Blocked day or no focused endpoint; nothing changes.
    Ignored,
    Changed {
        state:         RangeState,
        focus_changed: bool,
    },
}

impl ClickOutcome {
    /// The state after the click, `current` when it was ignored.
    pub const fn state_or(self, current: RangeState) -> RangeState {
        match self {
            Self::Ignored => current,
            Self::Changed { state, .. } => state,
        }
    }

    pub const fn is_ignored(self) -> bool {
        matches!(self, Self::Ignored)
    }
}

/// Host callbacks. Every method defaults to doing nothing.
pub trait RangeObserver {
    fn on_dates_change(&mut self, _range: SelectionRange) {}
    fn on_focus_change(&mut self, _focus: FocusTarget) {}
    /// The picker lost focus with this range selected.
    fn on_close(&mut self, _range: SelectionRange) {}
    /// Fired after every committed day click.
    fn on_blur(&mut self) {}
}

impl RangeObserver for () {}

/// Range-selection controller.
#[derive(Debug, Clone)]
pub struct RangeController<P = NoPredicates> {
    predicates:               P,
    minimum_nights:           u32,
    keep_open_on_date_select: bool,
    orientation:              Orientation,
    disabled:                 bool,
    touch:                    bool,
    hover:                    HoverState,
    show_keyboard_shortcuts:  bool,
}

impl Default for RangeController {
    fn default() -> Self {
        Self::new(NoPredicates)
    }
}

impl<P: DayPredicates> RangeController<P> {
    pub fn new(predicates: P) -> Self {
        Self::from_config(predicates, &PickerConfig::default())
    }

    pub fn from_config(predicates: P, config: &PickerConfig) -> Self {
        Self {
            predicates,
            minimum_nights:           config.minimum_nights,
            keep_open_on_date_select: config.keep_open_on_date_select,
            orientation:              config.orientation,
            disabled:                 config.disabled,
            touch:                    false,
            hover:                    HoverState::default(),
            show_keyboard_shortcuts:  false,
        }
    }

    #[must_use]
    pub const fn with_minimum_nights(mut self, minimum_nights: u32) -> Self {
        self.minimum_nights = minimum_nights;
        self
    }

    #[must_use]
    pub const fn with_keep_open_on_date_select(mut self, keep_open: bool) -> Self {
        self.keep_open_on_date_select = keep_open;
        self
    }

    /// Marks the host as a touch device, which disables hover tracking.
    #[must_use]
    pub const fn with_touch(mut self, touch: bool) -> Self {
        self.touch = touch;
        self
    }

    pub const fn predicates(&self) -> &P {
        &self.predicates
    }

    pub const fn minimum_nights(&self) -> u32 {
        self.minimum_nights
    }

    pub const fn hover(&self) -> HoverState {
        self.hover
    }

    pub const fn is_touch(&self) -> bool {
        self.touch
    }

    pub const fn show_keyboard_shortcuts(&self) -> bool {
        self.show_keyboard_shortcuts
    }

    pub const fn open_keyboard_shortcuts(&mut self) {
        self.show_keyboard_shortcuts = true;
    }

    pub const fn close_keyboard_shortcuts(&mut self) {
        self.show_keyboard_shortcuts = false;
    }

    pub const fn day_state(&self, state: &RangeState) -> DayState {
        DayState {
            range:          state.range,
            focus:          state.focus,
            hover:          self.hover,
            minimum_nights: self.minimum_nights,
        }
    }

    /// `today` from `clock` plus this controller's touch flag.
    pub fn render_context(&self, clock: &impl Clock) -> RenderContext {
        RenderContext::new(clock, self.touch)
    }

    pub fn is_blocked(&self, state: &RangeState, day: CalendarDay) -> bool {
        is_blocked(day, &self.day_state(state), &self.predicates)
    }

    /// Computes the state that clicking `day` leads to.
    pub fn click_day(&self, state: &RangeState, day: CalendarDay) -> ClickOutcome {
        if self.is_blocked(state, day) {
            tracing::trace!(%day, "ignoring click on blocked day");
            return ClickOutcome::Ignored;
        }

        let SelectionRange { start_date, end_date } = state.range;
        let next = match state.focus {
            FocusTarget::Start => {
                // A start can never sit at or after the paired end.
                let end_date = end_date.filter(|end| *end > day);
                RangeState::new(SelectionRange::new(Some(day), end_date), FocusTarget::End)
            },
            FocusTarget::End => match start_date {
                None => RangeState::new(SelectionRange::new(None, Some(day)), FocusTarget::Start),
                Some(start) if self.meets_minimum_nights(start, day) => {
                    let focus = if self.keep_open_on_date_select {
                        state.focus
                    } else {
                        FocusTarget::None
                    };
                    RangeState::new(SelectionRange::new(Some(start), Some(day)), focus)
                },
                // Too close to, or before, the start: the clicked day becomes
                // the new start and the previous one is dropped.
                Some(_) => RangeState::new(SelectionRange::new(Some(day), None), FocusTarget::End),
            },
            FocusTarget::None => {
                tracing::trace!(%day, "ignoring click without a focused input");
                return ClickOutcome::Ignored;
            },
        };

        tracing::debug!(%day, range = %next.range, focus = %next.focus, "day click");
        ClickOutcome::Changed {
            state:         next,
            focus_changed: next.focus != state.focus,
        }
    }

    fn meets_minimum_nights(&self, start: CalendarDay, day: CalendarDay) -> bool {
        // Past the last supported day nothing can meet the minimum.
        start
            .checked_add_days(i64::from(self.minimum_nights))
            .is_some_and(|first_allowed_end| day >= first_allowed_end)
    }

    /// Runs [`RangeController::click_day`] and reports the result: focus
    /// first (only when it moved), then dates, then `on_blur`.
    pub fn dispatch_click(
        &self,
        state: &RangeState,
        day: CalendarDay,
        observer: &mut impl RangeObserver,
    ) -> RangeState {
        match self.click_day(state, day) {
            ClickOutcome::Ignored => *state,
            ClickOutcome::Changed { state, focus_changed } => {
                if focus_changed {
                    observer.on_focus_change(state.focus);
                }
                observer.on_dates_change(state.range);
                observer.on_blur();
                state
            },
        }
    }

    /// Pointer entered `day`. Returns whether the hover changed.
    pub fn hover_day(&mut self, day: CalendarDay) -> bool {
        if self.touch || self.hover.hover_date == Some(day) {
            return false;
        }
        self.hover.hover_date = Some(day);
        true
    }

    /// Pointer left the calendar days.
    pub fn leave_day(&mut self) -> bool {
        if self.touch || self.hover.hover_date.is_none() {
            return false;
        }
        self.hover.clear();
        true
    }

    /// The picker lost focus (for example a click outside it). Transient
    /// state is reset; the dates are left alone.
    pub fn blur(&mut self, state: &RangeState, observer: &mut impl RangeObserver) -> RangeState {
        self.hover.clear();
        self.show_keyboard_shortcuts = false;

        if !state.focus.is_focused() {
            return *state;
        }
        tracing::debug!(range = %state.range, "closing picker");
        observer.on_focus_change(FocusTarget::None);
        observer.on_close(state.range);
        RangeState::new(state.range, FocusTarget::None)
    }

    /// Empties the range and focuses the start input.
    pub fn clear_dates(&self, observer: &mut impl RangeObserver) -> RangeState {
        observer.on_dates_change(SelectionRange::EMPTY);
        observer.on_focus_change(FocusTarget::Start);
        RangeState::new(SelectionRange::EMPTY, FocusTarget::Start)
    }

    /// The start input received focus. `None` when the picker is disabled.
    pub fn focus_start_input(&self, observer: &mut impl RangeObserver) -> Option<FocusTarget> {
        if self.disabled {
            return None;
        }
        observer.on_focus_change(FocusTarget::Start);
        Some(FocusTarget::Start)
    }

    /// The end input received focus. Vertical pickers without a start date
    /// focus the start input instead.
    pub fn focus_end_input(&self, state: &RangeState, observer: &mut impl RangeObserver) -> Option<FocusTarget> {
        if self.disabled {
            return None;
        }
        let focus = if state.range.start_date.is_none() && self.orientation.is_vertical() {
            FocusTarget::Start
        } else {
            FocusTarget::End
        };
        observer.on_focus_change(focus);
        Some(focus)
    }

    /// The month a freshly opened calendar shows first.
    pub fn initial_visible_month(&self, state: &RangeState, clock: &impl Clock) -> MonthAnchor {
        MonthAnchor::of(state.range.anchor_day().unwrap_or_else(|| clock.today()))
    }

    pub fn modifiers(&self, state: &RangeState, day: CalendarDay, ctx: &RenderContext) -> ModifierSet {
        compute_modifiers(day, &self.day_state(state), &self.predicates, ctx)
    }
}
