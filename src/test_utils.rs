use crate::{CalendarDay, SelectionRange};

pub fn day(year: u16, month: u8, day: u8) -> CalendarDay {
    CalendarDay::new(year, month, day)
        .unwrap_or_else(|e| panic!("invalid test day {year}-{month}-{day}: {e}"))
}

pub fn range(start: Option<CalendarDay>, end: Option<CalendarDay>) -> SelectionRange {
    SelectionRange::new(start, end)
}
