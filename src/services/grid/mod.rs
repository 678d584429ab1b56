//! Week grid construction.
//!
//! Turns an anchor date plus the week settings into the ordered list of
//! visible day columns, and derives the period those columns cover.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Timelike};

use crate::models::day::DayViewModel;
use crate::utils::date::{end_of_day, floor_div, get_week_start, start_of_day};

/// Width of one column in grid minutes
pub const MINUTES_PER_COLUMN: i64 = 24 * 60;

/// Time range covered by the visible day columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewPeriod {
    /// Midnight of the first visible day
    pub start: NaiveDateTime,
    /// Last second of the last visible day
    pub end: NaiveDateTime,
}

impl ViewPeriod {
    /// Midnight after the last visible day.
    pub fn end_exclusive(&self) -> NaiveDateTime {
        start_of_day(self.end.date()) + Duration::days(1)
    }
}

/// Build the visible days of the week containing `view_date`.
///
/// Days whose weekday number (0 = Sunday) is in `exclude_days` are skipped,
/// the rest keep calendar order starting at `first_day_of_week`.
pub fn build_week_days(
    view_date: NaiveDate,
    first_day_of_week: u8,
    exclude_days: &[u8],
    weekend_days: &[u8],
    today: NaiveDate,
) -> Vec<DayViewModel> {
    let week_start = get_week_start(view_date, first_day_of_week);

    (0..7)
        .map(|i| week_start + Duration::days(i))
        .map(|date| (date, date.weekday().num_days_from_sunday() as u8))
        .filter(|(_, weekday)| !exclude_days.contains(weekday))
        .map(|(date, weekday)| DayViewModel::new(date, weekend_days.contains(&weekday), today))
        .collect()
}

/// Period spanned by `days`, or `None` when every day is excluded.
pub fn view_period(days: &[DayViewModel]) -> Option<ViewPeriod> {
    let first = days.first()?;
    let last = days.last()?;
    Some(ViewPeriod {
        start: start_of_day(first.date),
        end: end_of_day(last.date),
    })
}

/// Which end of a time range an instant bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    Start,
    /// Exclusive end: midnight belongs to the previous column
    End,
}

/// Dates of the visible columns in column order.
///
/// Excluded weekdays have no column, so a distance in columns is not a
/// distance in calendar days. Gestures measure in grid minutes instead:
/// minutes from the left edge of the first column, [`MINUTES_PER_COLUMN`]
/// per column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DayColumns {
    dates: Vec<NaiveDate>,
}

impl DayColumns {
    pub fn from_days(days: &[DayViewModel]) -> Self {
        Self {
            dates: days.iter().map(|day| day.date).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn date(&self, column: usize) -> Option<NaiveDate> {
        self.dates.get(column).copied()
    }

    /// Calendar time between the dates of two columns, zero if either is missing.
    pub fn shift_between(&self, from: usize, to: usize) -> Duration {
        match (self.date(from), self.date(to)) {
            (Some(from), Some(to)) => to - from,
            _ => Duration::zero(),
        }
    }

    /// Grid minutes covered by all columns.
    pub fn width_minutes(&self) -> i64 {
        self.len() as i64 * MINUTES_PER_COLUMN
    }

    /// Grid position of `instant`.
    ///
    /// Instants on a day without a column sit on the column edge where that
    /// day would be, as do instants before or after the visible days.
    pub fn position_of(&self, instant: NaiveDateTime) -> i64 {
        match self.dates.binary_search(&instant.date()) {
            Ok(column) => {
                column as i64 * MINUTES_PER_COLUMN
                    + i64::from(instant.time().num_seconds_from_midnight() / 60)
            }
            Err(column) => column as i64 * MINUTES_PER_COLUMN,
        }
    }

    /// Instant at grid position `minutes`, clamped to the columns.
    ///
    /// A position on a column edge resolves to the next column's midnight
    /// for a start and to the end of the previous column for an end.
    pub fn instant_at(&self, minutes: i64, boundary: Boundary) -> Option<NaiveDateTime> {
        let last = *self.dates.last()?;
        let minutes = minutes.clamp(0, self.width_minutes());
        let column = floor_div(minutes, MINUTES_PER_COLUMN);
        let minute_of_day = minutes - column * MINUTES_PER_COLUMN;
        let column = column as usize;

        let instant = match (self.date(column), boundary) {
            (_, Boundary::End) if minute_of_day == 0 && column > 0 => {
                start_of_day(self.dates[column - 1]) + Duration::days(1)
            }
            (Some(date), _) => start_of_day(date) + Duration::minutes(minute_of_day),
            (None, _) => start_of_day(last) + Duration::days(1),
        };
        Some(instant)
    }
}
