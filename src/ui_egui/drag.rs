// Event Drag System
//
// Moves an event across day columns by dragging its body.
// - The live preview is a horizontal translation, the event itself is untouched
// - Releasing over the calendar commits a move by whole columns
// - Releasing outside the calendar cancels the move
// Columns are mapped back to dates, so moves skip over excluded weekdays.

use egui::Pos2;

use super::geometry::{ElementRef, GeometryProvider};
use super::notifications::EventTimesChanged;
use crate::models::day::DayViewModel;
use crate::models::event::{CalendarEvent, EventKey};
use crate::services::grid::DayColumns;
use crate::services::layout::PlacedEvent;
use crate::services::snap::{SnapCalculator, SnapMode};

/// Context for an active move
#[derive(Clone, Debug, PartialEq)]
pub struct DragContext {
    pub key: EventKey,
    /// The event as it was when the drag started
    pub original: CalendarEvent,
    /// Column the event was rendered in at drag start
    pub origin_column: usize,
    /// Visible columns at drag start
    pub columns: DayColumns,
    pub origin_pointer_x: f32,
    pub current_pointer_x: f32,
    pub committed: bool,
}

impl DragContext {
    fn from_placed(placed: &PlacedEvent, days: &[DayViewModel], pointer_x: f32) -> Self {
        Self {
            key: placed.key,
            original: placed.event.clone(),
            origin_column: placed.offset_days,
            columns: DayColumns::from_days(days),
            origin_pointer_x: pointer_x,
            current_pointer_x: pointer_x,
            committed: false,
        }
    }

    /// Column offsets that keep the new start column inside the grid.
    fn column_offset_bounds(&self) -> (i64, i64) {
        let origin = self.origin_column as i64;
        let last_column = self.columns.len().saturating_sub(1) as i64;
        (-origin, (last_column - origin).max(0))
    }

    fn delta(&self) -> f32 {
        self.current_pointer_x - self.origin_pointer_x
    }

    /// Move by `columns` visible columns, keeping the time of day and duration.
    fn times_changed(&self, columns: i64) -> EventTimesChanged {
        let target = (self.origin_column as i64 + columns).max(0) as usize;
        let shift = self.columns.shift_between(self.origin_column, target);
        EventTimesChanged {
            event: self.original.clone(),
            new_start: self.original.start + shift,
            new_end: self.original.end.map(|end| end + shift),
        }
    }
}

/// Live visual state of a drag
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragPreview {
    /// Horizontal translation to draw the event with
    pub pixel_offset: f32,
    /// Whole columns the event would move if released now
    pub day_offset: i64,
}

#[derive(Clone, Debug, PartialEq)]
pub enum DragOutcome {
    Committed(EventTimesChanged),
    /// Released outside the calendar, nothing changes
    Cancelled,
}

/// Move gesture state machine: Idle -> Dragging -> Committed | Cancelled -> Idle
#[derive(Debug, Default)]
pub struct DragController {
    session: Option<DragContext>,
    snap_dragged_events: bool,
}

impl DragController {
    pub fn new(snap_dragged_events: bool) -> Self {
        Self {
            session: None,
            snap_dragged_events,
        }
    }

    pub fn set_snap(&mut self, snap_dragged_events: bool) {
        self.snap_dragged_events = snap_dragged_events;
    }

    /// Start dragging `placed`. Rejected for non-draggable events or while
    /// another drag is in progress.
    pub fn begin(&mut self, placed: &PlacedEvent, days: &[DayViewModel], pointer_x: f32) -> bool {
        if self.session.is_some() {
            log::debug!("Ignoring drag start on {:?}: a drag is already active", placed.key);
            return false;
        }
        if !placed.event.draggable {
            return false;
        }

        log::debug!("Drag started on {:?} at x={}", placed.key, pointer_x);
        self.session = Some(DragContext::from_placed(placed, days, pointer_x));
        true
    }

    pub fn active(&self) -> Option<&DragContext> {
        self.session.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    pub fn is_dragging_event(&self, key: EventKey) -> bool {
        self.session.as_ref().map_or(false, |ctx| ctx.key == key)
    }

    /// Track the pointer and return the clamped live preview.
    pub fn update(
        &mut self,
        pointer_x: f32,
        geometry: &dyn GeometryProvider,
    ) -> Option<DragPreview> {
        let session = self.session.as_mut()?;
        session.current_pointer_x = pointer_x;
        Some(Self::compute_preview(session, geometry, self.snap_dragged_events))
    }

    /// Preview for the last known pointer position.
    pub fn preview(&self, geometry: &dyn GeometryProvider) -> Option<DragPreview> {
        let session = self.session.as_ref()?;
        Some(Self::compute_preview(session, geometry, self.snap_dragged_events))
    }

    fn compute_preview(
        session: &DragContext,
        geometry: &dyn GeometryProvider,
        snap: bool,
    ) -> DragPreview {
        let calc = SnapCalculator::new(geometry.column_width());
        let (min_days, max_days) = session.column_offset_bounds();
        let delta = session.delta();
        let day_offset = calc.units(delta, SnapMode::Day).clamp(min_days, max_days);

        let pixel_offset = if snap {
            calc.to_pixels(day_offset, SnapMode::Day)
        } else {
            let min_px = calc.to_pixels(min_days, SnapMode::Day);
            let max_px = calc.to_pixels(max_days, SnapMode::Day);
            calc.snap(delta, SnapMode::Day, false).clamp(min_px, max_px)
        };

        DragPreview {
            pixel_offset,
            day_offset,
        }
    }

    /// Release the pointer and end the gesture.
    ///
    /// A release over the calendar always commits, even with a zero offset.
    pub fn finish(
        &mut self,
        pointer: Pos2,
        geometry: &dyn GeometryProvider,
    ) -> Option<DragOutcome> {
        let mut session = self.session.take()?;
        session.current_pointer_x = pointer.x;

        let columns = match geometry.bounding_box_of(ElementRef::Calendar) {
            Some(calendar) if !calendar.contains(pointer) => {
                log::debug!("Drag of {:?} released outside the calendar", session.key);
                return Some(DragOutcome::Cancelled);
            }
            Some(_) => Self::compute_preview(&session, geometry, true).day_offset,
            None => 0,
        };

        session.committed = true;
        log::debug!("Drag of {:?} committed with {} column(s)", session.key, columns);
        Some(DragOutcome::Committed(session.times_changed(columns)))
    }

    /// Abort without emitting anything.
    pub fn cancel(&mut self) -> Option<DragContext> {
        self.session.take()
    }
}
