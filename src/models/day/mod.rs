// Day module
// View model for one visible day column of the week grid

use chrono::{Datelike, NaiveDate};

/// One visible day bucket in the week grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayViewModel {
    pub date: NaiveDate,
    pub is_weekend: bool,
    pub is_past: bool,
    pub is_today: bool,
    pub is_future: bool,
    /// Extra class set by a before-render subscriber
    pub css_class: Option<String>,
}

impl DayViewModel {
    pub fn new(date: NaiveDate, is_weekend: bool, today: NaiveDate) -> Self {
        Self {
            date,
            is_weekend,
            is_past: date < today,
            is_today: date == today,
            is_future: date > today,
            css_class: None,
        }
    }

    /// Weekday number, 0 = Sunday .. 6 = Saturday
    pub fn weekday_number(&self) -> u8 {
        self.date.weekday().num_days_from_sunday() as u8
    }
}
