use chrono::Local;

use crate::CalendarDay;

/// Source of "today". Sampled once per render pass so that a picker left
/// open across midnight moves its `today` marker.
pub trait Clock {
    fn today(&self) -> CalendarDay;
}

/// Reads the local calendar date from the system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> CalendarDay {
        let now = Local::now().date_naive();
        CalendarDay::try_from(now).unwrap_or_else(|err| {
            tracing::warn!(%now, %err, "local date outside the supported calendar, clamping");
            clamp_out_of_range(now)
        })
    }
}

fn clamp_out_of_range(date: chrono::NaiveDate) -> CalendarDay {
    use chrono::Datelike;

    if date.year() < 1 { CalendarDay::MIN } else { CalendarDay::MAX }
}

/// A clock frozen on one day; for hosts that render server-side snapshots,
/// and for tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub CalendarDay);

impl Clock for FixedClock {
    fn today(&self) -> CalendarDay {
        self.0
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn today(&self) -> CalendarDay {
        (**self).today()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::day;

    #[test]
    fn test_fixed_clock() {
        let clock = FixedClock(day(2024, 3, 10));
        assert_eq!(clock.today(), day(2024, 3, 10));
        assert_eq!((&clock).today(), day(2024, 3, 10));
    }

    #[test]
    fn test_system_clock_matches_chrono() {
        let expected = CalendarDay::try_from(Local::now().date_naive()).unwrap();
        let today = SystemClock.today();
        // Allow for the test straddling midnight.
        assert!(today.days_until(expected).abs() <= 1);
    }

    #[test]
    fn test_clamp_out_of_range() {
        let late = chrono::NaiveDate::from_ymd_opt(12_000, 6, 1).unwrap();
        assert_eq!(clamp_out_of_range(late), day(9999, 12, 31));
        let early = chrono::NaiveDate::from_ymd_opt(-5, 6, 1).unwrap();
        assert_eq!(clamp_out_of_range(early), day(1, 1, 1));
    }
}
