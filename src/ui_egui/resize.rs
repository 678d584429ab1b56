// Event Resize System
//
// Enables resizing events by dragging the handles on their left and right borders.
// - Left handle: adjusts the start date
// - Right handle: adjusts the end date
// Both edges are clamped to the visible period and can never cross the other edge.
// Edges move over the visible columns, so excluded weekdays are skipped.

use chrono::NaiveDateTime;
use egui::{Pos2, Rect, Vec2};

use super::geometry::GeometryProvider;
use super::notifications::EventTimesChanged;
use crate::models::day::DayViewModel;
use crate::models::event::{CalendarEvent, EventKey};
use crate::services::grid::{view_period, Boundary, DayColumns, ViewPeriod};
use crate::services::layout::{PlacedEvent, SpanPreview};
use crate::services::snap::{SnapCalculator, SnapMode};
use crate::utils::date::{ceil_div, floor_div};

/// Which edge of the event is being resized
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ResizeHandle {
    /// Left edge - adjusts start date
    Left,
    /// Right edge - adjusts end date
    Right,
}

impl ResizeHandle {
    /// Returns the cursor icon for this handle
    pub fn cursor_icon(&self) -> egui::CursorIcon {
        egui::CursorIcon::ResizeHorizontal
    }

    /// Whether `placed` offers this handle.
    ///
    /// A clipped edge has no handle: the event continues past the visible period there.
    pub fn is_allowed_for(&self, placed: &PlacedEvent) -> bool {
        match self {
            ResizeHandle::Left => {
                placed.event.resizable.before_start && !placed.starts_before_period
            }
            ResizeHandle::Right => placed.event.resizable.after_end && !placed.ends_after_period,
        }
    }
}

/// Size of the resize handle hit area
pub const HANDLE_SIZE: f32 = 8.0;
/// Visual size of the handle circle
pub const HANDLE_VISUAL_SIZE: f32 = 6.0;

/// Live visual state of a resize
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResizePreview {
    pub new_start: NaiveDateTime,
    pub new_end: NaiveDateTime,
    /// How far the dragged edge is drawn from its original position
    pub pixel_delta: f32,
    /// Whole units (columns when snapped, hours otherwise) the edge moved
    pub units: i64,
}

/// Context for an active resize operation
#[derive(Clone, Debug, PartialEq)]
pub struct ResizeContext {
    /// The event being resized
    pub key: EventKey,
    /// The event as it was when the resize started
    pub original: CalendarEvent,
    /// Which handle is being dragged
    pub handle: ResizeHandle,
    /// Visible period at resize start, the edges never leave it
    pub period: ViewPeriod,
    /// Visible columns at resize start
    pub columns: DayColumns,
    pub origin_pointer_x: f32,
    pub current_pointer_x: f32,
    /// Whether the edge snaps to whole days
    pub snap: bool,
    pub last_preview: Option<ResizePreview>,
    pub committed: bool,
}

impl ResizeContext {
    fn mode(&self) -> SnapMode {
        if self.snap {
            SnapMode::Day
        } else {
            SnapMode::Hour
        }
    }

    /// End used when the event has none: it then lasts zero time on its start day.
    fn effective_end(&self) -> NaiveDateTime {
        self.original.end.unwrap_or(self.original.start)
    }

    /// Grid positions of the start and the effective end.
    fn positions(&self) -> (i64, i64) {
        (
            self.columns.position_of(self.original.start),
            self.columns.position_of(self.effective_end()),
        )
    }

    /// Range of unit offsets the dragged edge may move by.
    ///
    /// Always contains zero, so a fully constrained gesture keeps the original times.
    fn allowed_units(&self, mode: SnapMode) -> (i64, i64) {
        let unit = mode.unit_minutes();
        let (start, end) = self.positions();

        let (lower, upper) = match self.handle {
            ResizeHandle::Left => (ceil_div(-start, unit), floor_div(end - start, unit)),
            ResizeHandle::Right => (
                ceil_div(start - end, unit),
                floor_div(self.columns.width_minutes() - end, unit),
            ),
        };

        (lower.min(0), upper.max(0))
    }

    /// Times after moving the dragged edge by `units`.
    fn resized_times(&self, units: i64, mode: SnapMode) -> (NaiveDateTime, NaiveDateTime) {
        let start = self.original.start;
        let end = self.effective_end();
        if units == 0 {
            return (start, end);
        }

        let shift = units * mode.unit_minutes();
        let (start_pos, end_pos) = self.positions();
        match self.handle {
            ResizeHandle::Left => {
                let new_start = self
                    .columns
                    .instant_at(start_pos + shift, Boundary::Start)
                    .unwrap_or(start);
                (new_start.max(self.period.start).min(end), end)
            }
            ResizeHandle::Right => {
                let new_end = self
                    .columns
                    .instant_at(end_pos + shift, Boundary::End)
                    .unwrap_or(end);
                (start, new_end.min(self.period.end_exclusive()).max(start))
            }
        }
    }

    fn preview(&self, geometry: &dyn GeometryProvider) -> ResizePreview {
        let calc = SnapCalculator::new(geometry.column_width());
        let mode = self.mode();
        let (min_units, max_units) = self.allowed_units(mode);

        let delta = self.current_pointer_x - self.origin_pointer_x;
        let units = calc.units(delta, mode).clamp(min_units, max_units);
        let pixel_delta = if self.snap {
            calc.to_pixels(units, mode)
        } else {
            calc.snap(delta, mode, false).clamp(
                calc.to_pixels(min_units, mode),
                calc.to_pixels(max_units, mode),
            )
        };

        let (new_start, new_end) = self.resized_times(units, mode);

        ResizePreview {
            new_start,
            new_end,
            pixel_delta,
            units,
        }
    }
}

/// Resize gesture state machine: Idle -> Resizing -> Committed -> Idle
#[derive(Debug, Default)]
pub struct ResizeController {
    session: Option<ResizeContext>,
    snap_resized_events: bool,
}

impl ResizeController {
    pub fn new(snap_resized_events: bool) -> Self {
        Self {
            session: None,
            snap_resized_events,
        }
    }

    pub fn set_snap(&mut self, snap_resized_events: bool) {
        self.snap_resized_events = snap_resized_events;
    }

    /// Begin resizing `placed` from `handle`.
    ///
    /// Rejected when the handle is not offered for the event, no day is
    /// visible, or another resize is in progress.
    pub fn begin(
        &mut self,
        placed: &PlacedEvent,
        handle: ResizeHandle,
        days: &[DayViewModel],
        pointer_x: f32,
    ) -> bool {
        if self.session.is_some() || !handle.is_allowed_for(placed) {
            return false;
        }
        let Some(period) = view_period(days) else {
            return false;
        };

        log::debug!(
            "Resize started on {:?} from the {:?} edge at x={}",
            placed.key,
            handle,
            pointer_x
        );
        self.session = Some(ResizeContext {
            key: placed.key,
            original: placed.event.clone(),
            handle,
            period,
            columns: DayColumns::from_days(days),
            origin_pointer_x: pointer_x,
            current_pointer_x: pointer_x,
            snap: self.snap_resized_events,
            last_preview: None,
            committed: false,
        });
        true
    }

    pub fn active(&self) -> Option<&ResizeContext> {
        self.session.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    pub fn is_resizing_event(&self, key: EventKey) -> bool {
        self.session.as_ref().map_or(false, |ctx| ctx.key == key)
    }

    /// Track the pointer, returning the clamped preview.
    pub fn update(
        &mut self,
        pointer_x: f32,
        geometry: &dyn GeometryProvider,
    ) -> Option<ResizePreview> {
        let session = self.session.as_mut()?;
        session.current_pointer_x = pointer_x;
        let preview = session.preview(geometry);
        session.last_preview = Some(preview);
        Some(preview)
    }

    /// Times to lay the resized event out with while the gesture is live.
    pub fn span_preview(&self) -> Option<SpanPreview> {
        let session = self.session.as_ref()?;
        let preview = session.last_preview?;
        Some(SpanPreview {
            key: session.key,
            start: preview.new_start,
            end: Some(preview.new_end),
        })
    }

    /// Release the pointer. A resize always commits, clamped to the allowed range.
    pub fn finish(
        &mut self,
        pointer_x: f32,
        geometry: &dyn GeometryProvider,
    ) -> Option<EventTimesChanged> {
        let mut session = self.session.take()?;
        session.current_pointer_x = pointer_x;
        let preview = session.preview(geometry);
        session.committed = true;

        log::debug!(
            "Resize of {:?} committed with {} unit(s) on the {:?} edge",
            session.key,
            preview.units,
            session.handle
        );
        Some(EventTimesChanged {
            event: session.original,
            new_start: preview.new_start,
            new_end: Some(preview.new_end),
        })
    }

    /// Abort without emitting anything.
    pub fn cancel(&mut self) -> Option<ResizeContext> {
        self.session.take()
    }
}

/// Calculate handle rects for an event
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct HandleRects {
    pub left: Option<Rect>,
    pub right: Option<Rect>,
}

impl HandleRects {
    /// Create handle rects for an event drawn as a horizontal bar
    pub fn for_event_bar(event_rect: Rect) -> Self {
        let handle_height = event_rect.height().min(20.0);

        Self {
            left: Some(Rect::from_center_size(
                Pos2::new(event_rect.left(), event_rect.center().y),
                Vec2::new(HANDLE_SIZE, handle_height),
            )),
            right: Some(Rect::from_center_size(
                Pos2::new(event_rect.right(), event_rect.center().y),
                Vec2::new(HANDLE_SIZE, handle_height),
            )),
        }
    }

    /// Handle rects restricted to the handles `placed` offers
    pub fn for_placed(event_rect: Rect, placed: &PlacedEvent) -> Self {
        let all = Self::for_event_bar(event_rect);
        Self {
            left: all.left.filter(|_| ResizeHandle::Left.is_allowed_for(placed)),
            right: all.right.filter(|_| ResizeHandle::Right.is_allowed_for(placed)),
        }
    }

    /// Check if a point hits any handle and return which one
    pub fn hit_test(&self, pos: Pos2) -> Option<ResizeHandle> {
        if self.left.map_or(false, |r| r.contains(pos)) {
            Some(ResizeHandle::Left)
        } else if self.right.map_or(false, |r| r.contains(pos)) {
            Some(ResizeHandle::Right)
        } else {
            None
        }
    }
}

/// Draw resize handles on an event
pub fn draw_handles(
    ui: &mut egui::Ui,
    handles: &HandleRects,
    hovered_handle: Option<ResizeHandle>,
    color: egui::Color32,
) {
    let draw_handle = |rect: Rect, handle_type: ResizeHandle, is_hovered: bool| {
        // Position the visual circle at the edge, not center of hit zone
        let center = match handle_type {
            ResizeHandle::Left => {
                Pos2::new(rect.left() + HANDLE_VISUAL_SIZE / 2.0 + 2.0, rect.center().y)
            }
            ResizeHandle::Right => {
                Pos2::new(rect.right() - HANDLE_VISUAL_SIZE / 2.0 - 2.0, rect.center().y)
            }
        };

        let radius = if is_hovered {
            HANDLE_VISUAL_SIZE / 2.0 + 1.0
        } else {
            HANDLE_VISUAL_SIZE / 2.0
        };

        ui.painter().circle_filled(
            center,
            radius,
            if is_hovered {
                egui::Color32::WHITE
            } else {
                egui::Color32::from_rgba_unmultiplied(
                    color.r().saturating_add(60),
                    color.g().saturating_add(60),
                    color.b().saturating_add(60),
                    color.a(),
                )
            },
        );
        ui.painter().circle_stroke(
            center,
            radius,
            egui::Stroke::new(1.0, color.linear_multiply(0.6)),
        );
    };

    if let Some(rect) = handles.left {
        draw_handle(rect, ResizeHandle::Left, hovered_handle == Some(ResizeHandle::Left));
    }
    if let Some(rect) = handles.right {
        draw_handle(rect, ResizeHandle::Right, hovered_handle == Some(ResizeHandle::Right));
    }
}
