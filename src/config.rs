use std::num::NonZeroU8;

use serde::{Deserialize, Serialize};

use crate::{DEFAULT_MINIMUM_NIGHTS, DEFAULT_NUMBER_OF_MONTHS, DAYS_PER_WEEK, Weekday, input::DateFormat};

/// How months are laid out. Only `VerticalScrollable` changes selection-
/// adjacent behaviour: it renders without transition buffer months.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Orientation {
    #[default]
    Horizontal,
    Vertical,
    VerticalScrollable,
}

impl Orientation {
    pub const fn uses_transition_months(self) -> bool {
        !matches!(self, Self::VerticalScrollable)
    }

    /// Scrollable layouts count as vertical for end-input focus redirects.
    pub const fn is_vertical(self) -> bool {
        matches!(self, Self::Vertical | Self::VerticalScrollable)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("numberOfMonths must be at least 1")]
    NoMonths,

    #[error("firstDayOfWeek must be 0-6, got {0}")]
    InvalidFirstDayOfWeek(u8),

    #[error("displayFormat must not be empty")]
    NoDisplayFormat,
}

/// Options recognised by the pickers. Deserializes from the camelCase keys
/// hosts already use; every key is optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PickerConfig {
    pub minimum_nights:           u32,
    pub number_of_months:         u8,
    pub orientation:              Orientation,
    pub first_day_of_week:        u8,
    pub keep_open_on_date_select: bool,
    pub enable_outside_days:      bool,
    pub disabled:                 bool,
    /// Formats accepted by the text inputs; the first one is used for display.
    pub display_formats:          Vec<DateFormat>,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            minimum_nights:           DEFAULT_MINIMUM_NIGHTS,
            number_of_months:         DEFAULT_NUMBER_OF_MONTHS,
            orientation:              Orientation::default(),
            first_day_of_week:        Weekday::Sunday.index(),
            keep_open_on_date_select: false,
            enable_outside_days:      false,
            disabled:                 false,
            display_formats:          DateFormat::DEFAULTS.to_vec(),
        }
    }
}

impl PickerConfig {
    /// Checks the numeric options that serde cannot constrain.
    ///
    /// # Errors
    /// Returns the first `ConfigError` found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.number_of_months == 0 {
            return Err(ConfigError::NoMonths);
        }
        if self.first_day_of_week >= DAYS_PER_WEEK {
            return Err(ConfigError::InvalidFirstDayOfWeek(self.first_day_of_week));
        }
        if self.display_formats.is_empty() {
            return Err(ConfigError::NoDisplayFormat);
        }
        Ok(())
    }

    /// # Errors
    /// Returns `ConfigError::InvalidFirstDayOfWeek` for values above 6.
    pub fn first_weekday(&self) -> Result<Weekday, ConfigError> {
        Weekday::from_index(self.first_day_of_week)
            .ok_or(ConfigError::InvalidFirstDayOfWeek(self.first_day_of_week))
    }

    /// # Errors
    /// Returns `ConfigError::NoMonths` when `number_of_months` is zero.
    pub fn months(&self) -> Result<NonZeroU8, ConfigError> {
        NonZeroU8::new(self.number_of_months).ok_or(ConfigError::NoMonths)
    }

    pub fn display_format(&self) -> DateFormat {
        self.display_formats.first().copied().unwrap_or_default()
    }
}
