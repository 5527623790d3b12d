// Calendar bounds

/// Earliest representable year
pub const MIN_YEAR: u16 = 1;
/// Latest representable year
pub const MAX_YEAR: u16 = 9999;
/// Months per year, and the number of the last one
pub const MAX_MONTH: u8 = 12;

pub const FEBRUARY: u8 = 2;
pub const DECEMBER: u8 = 12;

/// February length in leap years
pub const FEBRUARY_DAYS_LEAP: u8 = 29;

/// Month lengths indexed by month number; slot 0 is padding and February
/// holds its common-year length.
pub const DAYS_IN_MONTH: [u8; 13] = [0, 31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

// Gregorian leap rule: every 4th year, except centuries not divisible by 400
pub(crate) const LEAP_YEAR_CYCLE: u16 = 4;
pub(crate) const CENTURY_CYCLE: u16 = 100;
pub(crate) const GREGORIAN_CYCLE: u16 = 400;

/// Days in a full 400-year Gregorian cycle
pub(crate) const DAYS_PER_ERA: i64 = 146_097;
/// Offset between 0000-03-01 and 1970-01-01 in days
pub(crate) const UNIX_EPOCH_SHIFT: i64 = 719_468;

/// Days in a week, and columns in a month grid
pub const DAYS_PER_WEEK: u8 = 7;

// Text forms

/// Between the parts of `YYYY-MM-DD`
pub const DATE_SEPARATOR: char = '-';
/// Between the parts of `MM/DD/YYYY`
pub const MONTH_FIRST_SEPARATOR: char = '/';
/// Between the endpoints of a range
pub const RANGE_SEPARATOR: char = '/';
/// Placeholder for an unset side of a range
pub const OPEN_RANGE_MARKER: &str = "..";

// Picker defaults

/// Nights required between start and end unless configured otherwise
pub const DEFAULT_MINIMUM_NIGHTS: u32 = 1;
/// Months shown side by side by the range picker
pub const DEFAULT_NUMBER_OF_MONTHS: u8 = 2;
/// Buffer months kept on each side of the visible window for slide transitions
pub const TRANSITION_BUFFER_MONTHS: u8 = 1;
