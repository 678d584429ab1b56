// Settings module
// User-facing configuration for the week view

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const SUNDAY: u8 = 0;
pub const SATURDAY: u8 = 6;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsValidationError {
    #[error("first day of week must be 0-6 (Sunday-Saturday), got {0}")]
    InvalidFirstDayOfWeek(u8),
    #[error("excluded weekday must be 0-6, got {0}")]
    InvalidExcludedDay(u8),
    #[error("weekend day must be 0-6, got {0}")]
    InvalidWeekendDay(u8),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeekViewSettings {
    /// 0 = Sunday .. 6 = Saturday
    pub first_day_of_week: u8,
    /// Weekday numbers hidden from the grid
    pub exclude_days: Vec<u8>,
    pub weekend_days: Vec<u8>,
    /// Snap the live drag preview to whole day columns
    pub snap_dragged_events: bool,
    /// Snap the live resize preview to whole day columns
    pub snap_resized_events: bool,
}

impl Default for WeekViewSettings {
    fn default() -> Self {
        Self {
            first_day_of_week: SUNDAY,
            exclude_days: Vec::new(),
            weekend_days: vec![SUNDAY, SATURDAY],
            snap_dragged_events: true,
            snap_resized_events: true,
        }
    }
}

impl WeekViewSettings {
    pub fn validate(&self) -> Result<(), SettingsValidationError> {
        if self.first_day_of_week > SATURDAY {
            return Err(SettingsValidationError::InvalidFirstDayOfWeek(
                self.first_day_of_week,
            ));
        }
        if let Some(&day) = self.exclude_days.iter().find(|&&d| d > SATURDAY) {
            return Err(SettingsValidationError::InvalidExcludedDay(day));
        }
        if let Some(&day) = self.weekend_days.iter().find(|&&d| d > SATURDAY) {
            return Err(SettingsValidationError::InvalidWeekendDay(day));
        }
        Ok(())
    }
}
