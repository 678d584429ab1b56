//! Week view model rebuilds.
//!
//! Pure functions from the view inputs to the rendered model. Callers decide
//! which parts are stale and rebuild only those.

use chrono::NaiveDate;

use crate::models::day::DayViewModel;
use crate::models::event::CalendarEvent;
use crate::models::settings::WeekViewSettings;
use crate::services::grid::{build_week_days, view_period, ViewPeriod};
use crate::services::layout::{place_events_with_preview, SpanPreview, WeekLayout};

/// Everything a week view is rendered from.
#[derive(Debug, Clone, PartialEq)]
pub struct WeekViewInputs {
    /// Any date inside the week to show
    pub view_date: NaiveDate,
    pub events: Vec<CalendarEvent>,
    pub settings: WeekViewSettings,
    /// Reference date for the past/today/future day flags
    pub today: NaiveDate,
}

impl WeekViewInputs {
    pub fn new(view_date: NaiveDate, today: NaiveDate) -> Self {
        Self {
            view_date,
            events: Vec::new(),
            settings: WeekViewSettings::default(),
            today,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeekViewModel {
    pub days: Vec<DayViewModel>,
    pub layout: WeekLayout,
    /// `None` when every day is excluded
    pub period: Option<ViewPeriod>,
}

pub fn rebuild_days(inputs: &WeekViewInputs) -> Vec<DayViewModel> {
    build_week_days(
        inputs.view_date,
        inputs.settings.first_day_of_week,
        &inputs.settings.exclude_days,
        &inputs.settings.weekend_days,
        inputs.today,
    )
}

pub fn rebuild_layout(
    days: &[DayViewModel],
    events: &[CalendarEvent],
    preview: Option<&SpanPreview>,
) -> WeekLayout {
    place_events_with_preview(days, events, preview)
}

/// Build the whole model from scratch.
pub fn rebuild(inputs: &WeekViewInputs) -> WeekViewModel {
    let days = rebuild_days(inputs);
    let layout = rebuild_layout(&days, &inputs.events, None);
    let period = view_period(&days);
    WeekViewModel {
        days,
        layout,
        period,
    }
}
