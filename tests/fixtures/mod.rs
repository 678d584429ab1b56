// Test fixtures - reusable test data
// Provides consistent dates, events and grid geometry across the integration tests

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use chrono::{NaiveDate, NaiveDateTime};
use egui::{Pos2, Rect};
use rust_calendar_week::models::event::{CalendarEvent, Resizable};
use rust_calendar_week::services::week::WeekViewInputs;
use rust_calendar_week::ui_egui::controller::WeekViewController;
use rust_calendar_week::ui_egui::geometry::{ElementRef, GeometryProvider};
use rust_calendar_week::ui_egui::notifications::Notifier;

/// Sample dates for testing
pub mod dates {
    use super::*;

    pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    pub fn at(y: i32, m: u32, d: u32, hour: u32) -> NaiveDateTime {
        date(y, m, d).and_hms_opt(hour, 0, 0).unwrap()
    }

    /// Monday, June 27 2016
    pub fn monday_june_27_2016() -> NaiveDate {
        date(2016, 6, 27)
    }

    /// Hour of a day in June 2016
    pub fn june_2016(day: u32, hour: u32) -> NaiveDateTime {
        at(2016, 6, day, hour)
    }
}

/// Sample events for testing
pub mod events {
    use super::*;

    pub fn timed(title: &str, start: NaiveDateTime, end: NaiveDateTime) -> CalendarEvent {
        CalendarEvent::new(title, start, Some(end))
    }

    pub fn draggable(title: &str, start: NaiveDateTime, end: NaiveDateTime) -> CalendarEvent {
        let mut event = timed(title, start, end);
        event.draggable = true;
        event
    }

    pub fn resizable(
        title: &str,
        start: NaiveDateTime,
        end: Option<NaiveDateTime>,
        resizable: Resizable,
    ) -> CalendarEvent {
        let mut event = CalendarEvent::new(title, start, end);
        event.resizable = resizable;
        event
    }

    /// Monday June 27 2016, 04:00 - 06:00
    pub fn two_hour_monday() -> CalendarEvent {
        timed("foo", dates::june_2016(27, 4), dates::june_2016(27, 6))
    }
}

/// Hand-written geometry of a calendar laid out from x = 0 with equal columns.
pub struct FakeGeometry {
    pub column_width: f32,
    pub columns: usize,
    pub header_height: f32,
    pub height: f32,
    /// `false` simulates a calendar that is not on screen
    pub calendar_visible: bool,
}

impl FakeGeometry {
    pub fn week() -> Self {
        Self::with_columns(7)
    }

    pub fn with_columns(columns: usize) -> Self {
        Self {
            column_width: 100.0,
            columns,
            header_height: 40.0,
            height: 300.0,
            calendar_visible: true,
        }
    }

    /// Center of the header cell at `index`
    pub fn header_center(&self, index: usize) -> Pos2 {
        Pos2::new(
            (index as f32 + 0.5) * self.column_width,
            self.header_height / 2.0,
        )
    }

    /// Left edge x of column `index`
    pub fn column_left(&self, index: usize) -> f32 {
        index as f32 * self.column_width
    }

    /// Point at `x` halfway down the event rows
    pub fn row_point(&self, x: f32) -> Pos2 {
        Pos2::new(x, (self.header_height + self.height) / 2.0)
    }

    /// Point at `x` below the bottom of the calendar
    pub fn below(&self, x: f32) -> Pos2 {
        Pos2::new(x, self.height + 50.0)
    }
}

impl GeometryProvider for FakeGeometry {
    fn column_width(&self) -> f32 {
        self.column_width
    }

    fn bounding_box_of(&self, element: ElementRef) -> Option<Rect> {
        match element {
            ElementRef::Calendar if self.calendar_visible => Some(Rect::from_min_size(
                Pos2::ZERO,
                egui::vec2(self.columns as f32 * self.column_width, self.height),
            )),
            ElementRef::DayHeader(index) if index < self.columns => Some(Rect::from_min_size(
                Pos2::new(self.column_left(index), 0.0),
                egui::vec2(self.column_width, self.header_height),
            )),
            _ => None,
        }
    }
}

/// Controller for the week containing `view_date`, already rendered once.
pub fn controller_for(view_date: NaiveDate, events: Vec<CalendarEvent>) -> WeekViewController {
    let mut controller = unrendered_controller_for(view_date, events);
    controller.apply_changes();
    controller
}

pub fn unrendered_controller_for(
    view_date: NaiveDate,
    events: Vec<CalendarEvent>,
) -> WeekViewController {
    let mut inputs = WeekViewInputs::new(view_date, view_date);
    inputs.events = events;
    WeekViewController::new(inputs)
}

/// Subscribe a recorder that keeps a copy of every payload.
pub fn record<T: Clone + 'static>(notifier: &mut Notifier<T>) -> Rc<RefCell<Vec<T>>> {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    notifier.subscribe(move |payload: &mut T| sink.borrow_mut().push(payload.clone()));
    seen
}
