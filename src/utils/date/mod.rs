// Date utility functions
// Day boundaries and week anchoring on zone-less timestamps

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};

pub fn start_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

pub fn end_of_day(date: NaiveDate) -> NaiveDateTime {
    start_of_day(date) + Duration::days(1) - Duration::seconds(1)
}

/// Calculate the start of the week containing the given date.
///
/// # Arguments
/// * `date` - The date to find the week start for
/// * `first_day_of_week` - 0 = Sunday, 1 = Monday, etc.
pub fn get_week_start(date: NaiveDate, first_day_of_week: u8) -> NaiveDate {
    let weekday = date.weekday().num_days_from_sunday() as i64;
    let offset = (weekday - (first_day_of_week % 7) as i64 + 7) % 7;
    date - Duration::days(offset)
}

/// Floor division for signed amounts against a positive unit.
pub fn floor_div(value: i64, unit: i64) -> i64 {
    value.div_euclid(unit)
}

/// Ceiling division for signed amounts against a positive unit.
pub fn ceil_div(value: i64, unit: i64) -> i64 {
    -(-value).div_euclid(unit)
}
