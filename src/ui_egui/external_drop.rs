//! Drops of events dragged in from outside the grid.
//!
//! Only day headers are drop targets. The dropped event is moved to midnight
//! of the header's day; its end is left for the caller to decide.

use egui::Pos2;

use super::geometry::{header_at, GeometryProvider};
use super::notifications::EventTimesChanged;
use crate::models::day::DayViewModel;
use crate::models::event::CalendarEvent;
use crate::utils::date::start_of_day;

pub struct ExternalDropAdapter;

impl ExternalDropAdapter {
    /// Resolve a drop at `pointer`. `None` when no day header is under it.
    pub fn drop_on_header(
        event: &CalendarEvent,
        pointer: Pos2,
        days: &[DayViewModel],
        geometry: &dyn GeometryProvider,
    ) -> Option<EventTimesChanged> {
        let index = header_at(geometry, days.len(), pointer)?;
        let day = days.get(index)?;

        log::debug!("External drop of {:?} on {}", event.title, day.date);
        Some(EventTimesChanged {
            event: event.clone(),
            new_start: start_of_day(day.date),
            new_end: None,
        })
    }
}
