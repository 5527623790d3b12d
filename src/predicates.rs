//! Day-granularity comparisons shared by the modifier engine and the
//! selection controllers. Every function takes `Option`s: an absent day is
//! never the same as, next to, after, before or between anything.

use crate::CalendarDay;

/// Bound policy for [`is_between`], named after interval notation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Inclusivity {
    /// `(start, end)`
    #[default]
    Exclusive,
    /// `[start, end]`
    Inclusive,
    /// `[start, end)`
    StartInclusive,
    /// `(start, end]`
    EndInclusive,
}

impl Inclusivity {
    const fn includes_start(self) -> bool {
        matches!(self, Self::Inclusive | Self::StartInclusive)
    }

    const fn includes_end(self) -> bool {
        matches!(self, Self::Inclusive | Self::EndInclusive)
    }
}

pub fn is_same_day(a: Option<CalendarDay>, b: Option<CalendarDay>) -> bool {
    matches!((a, b), (Some(a), Some(b)) if a == b)
}

/// True iff `b` is exactly one calendar day after `a`.
pub fn is_next_day(a: Option<CalendarDay>, b: Option<CalendarDay>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => a.days_until(b) == 1,
        _ => false,
    }
}

/// `a >= b`
pub fn is_inclusively_after_day(a: Option<CalendarDay>, b: Option<CalendarDay>) -> bool {
    matches!((a, b), (Some(a), Some(b)) if a >= b)
}

/// `a <= b`
pub fn is_inclusively_before_day(a: Option<CalendarDay>, b: Option<CalendarDay>) -> bool {
    matches!((a, b), (Some(a), Some(b)) if a <= b)
}

pub fn is_between(
    day: CalendarDay,
    start: Option<CalendarDay>,
    end: Option<CalendarDay>,
    inclusivity: Inclusivity,
) -> bool {
    let (Some(start), Some(end)) = (start, end) else {
        return false;
    };
    let after_start = if inclusivity.includes_start() {
        day >= start
    } else {
        day > start
    };
    let before_end = if inclusivity.includes_end() {
        day <= end
    } else {
        day < end
    };
    after_start && before_end
}
