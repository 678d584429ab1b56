//! Week view controller.
//!
//! Owns the view inputs and the rendered model, routes pointer input into the
//! drag and resize state machines, and publishes the view notifications.
//! Input setters only mark state dirty; [`WeekViewController::apply_changes`]
//! gathers them into a single rebuild.

use chrono::NaiveDate;
use egui::Pos2;

use super::drag::{DragController, DragOutcome, DragPreview};
use super::external_drop::ExternalDropAdapter;
use super::geometry::GeometryProvider;
use super::notifications::{
    BeforeWeekViewRender, DayHeaderClicked, EventClicked, EventTimesChanged, RenderedPeriod,
    WeekViewNotifications,
};
use super::resize::{ResizeController, ResizeHandle, ResizePreview};
use crate::models::event::{ActionClick, CalendarEvent, EventKey};
use crate::models::settings::WeekViewSettings;
use crate::services::grid::view_period;
use crate::services::week::{rebuild_days, rebuild_layout, WeekViewInputs, WeekViewModel};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct DirtyFlags {
    header: bool,
    events: bool,
}

impl DirtyFlags {
    fn all() -> Self {
        Self {
            header: true,
            events: true,
        }
    }

    fn any(&self) -> bool {
        self.header || self.events
    }
}

/// Live preview of whichever gesture is active.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GesturePreview {
    Drag(DragPreview),
    Resize(ResizePreview),
}

pub struct WeekViewController {
    inputs: WeekViewInputs,
    model: WeekViewModel,
    dirty: DirtyFlags,
    drag: DragController,
    resize: ResizeController,
    notifications: WeekViewNotifications,
}

impl WeekViewController {
    /// Create a controller. Nothing is built until the first [`apply_changes`](Self::apply_changes),
    /// so subscribers registered before it see the first before-render notification.
    pub fn new(inputs: WeekViewInputs) -> Self {
        let drag = DragController::new(inputs.settings.snap_dragged_events);
        let resize = ResizeController::new(inputs.settings.snap_resized_events);
        Self {
            inputs,
            model: WeekViewModel::default(),
            dirty: DirtyFlags::all(),
            drag,
            resize,
            notifications: WeekViewNotifications::default(),
        }
    }

    pub fn inputs(&self) -> &WeekViewInputs {
        &self.inputs
    }

    pub fn model(&self) -> &WeekViewModel {
        &self.model
    }

    pub fn events(&self) -> &[CalendarEvent] {
        &self.inputs.events
    }

    pub fn notifications_mut(&mut self) -> &mut WeekViewNotifications {
        &mut self.notifications
    }

    pub fn drag(&self) -> &DragController {
        &self.drag
    }

    pub fn resize(&self) -> &ResizeController {
        &self.resize
    }

    // ---- Inputs ----

    pub fn set_view_date(&mut self, view_date: NaiveDate) {
        if self.inputs.view_date != view_date {
            self.inputs.view_date = view_date;
            self.dirty = DirtyFlags::all();
        }
    }

    pub fn set_today(&mut self, today: NaiveDate) {
        if self.inputs.today != today {
            self.inputs.today = today;
            self.dirty.header = true;
        }
    }

    pub fn set_events(&mut self, events: Vec<CalendarEvent>) {
        self.inputs.events = events;
        self.dirty.events = true;
    }

    /// Mutable access to the event list. Marks the events dirty.
    pub fn events_mut(&mut self) -> &mut Vec<CalendarEvent> {
        self.dirty.events = true;
        &mut self.inputs.events
    }

    pub fn set_settings(&mut self, settings: WeekViewSettings) {
        let grid_changed = settings.first_day_of_week != self.inputs.settings.first_day_of_week
            || settings.exclude_days != self.inputs.settings.exclude_days
            || settings.weekend_days != self.inputs.settings.weekend_days;

        self.drag.set_snap(settings.snap_dragged_events);
        self.resize.set_snap(settings.snap_resized_events);
        self.inputs.settings = settings;

        if grid_changed {
            self.dirty = DirtyFlags::all();
        }
    }

    // ---- Rebuild ----

    /// Rebuild whatever is stale and notify before-render subscribers.
    ///
    /// Performs at most one rebuild and one before-render notification no
    /// matter how many inputs changed. Returns whether anything was rebuilt.
    pub fn apply_changes(&mut self) -> bool {
        if !self.dirty.any() {
            return false;
        }
        let dirty = std::mem::take(&mut self.dirty);

        if dirty.header {
            let days = rebuild_days(&self.inputs);
            let grid_moved = days.iter().map(|d| d.date).ne(self.model.days.iter().map(|d| d.date));
            if grid_moved {
                self.abort_gesture("the visible days changed");
            }
            self.model.period = view_period(&days);
            self.model.days = days;
        }

        self.revalidate_gesture();
        self.relayout();
        self.emit_before_render();

        log::debug!(
            "Week view rebuilt (header: {}, events: {})",
            dirty.header,
            dirty.events
        );
        true
    }

    /// Mark everything stale and rebuild.
    pub fn refresh(&mut self) {
        self.dirty = DirtyFlags::all();
        self.apply_changes();
    }

    /// Re-pack rows, laying the resized event out at its preview times.
    fn relayout(&mut self) {
        let preview = self.resize.span_preview();
        self.model.layout = rebuild_layout(&self.model.days, &self.inputs.events, preview.as_ref());
    }

    /// Drop the active gesture if the event it started on is gone or changed.
    fn revalidate_gesture(&mut self) {
        let stale = self
            .drag
            .active()
            .map(|ctx| (ctx.key, &ctx.original))
            .or_else(|| self.resize.active().map(|ctx| (ctx.key, &ctx.original)))
            .map_or(false, |(key, original)| {
                self.inputs.events.get(key.0) != Some(original)
            });

        if stale {
            self.abort_gesture("its event changed");
        }
    }

    fn abort_gesture(&mut self, reason: &str) {
        if let Some(ctx) = self.drag.cancel() {
            log::debug!("Aborting drag of {:?}: {}", ctx.key, reason);
        }
        if let Some(ctx) = self.resize.cancel() {
            log::debug!("Aborting resize of {:?}: {}", ctx.key, reason);
        }
    }

    fn emit_before_render(&mut self) {
        let period = self.model.period.map(|period| RenderedPeriod {
            start: period.start,
            end: period.end,
            events: self
                .model
                .layout
                .period_events
                .iter()
                .filter_map(|key| self.inputs.events.get(key.0).cloned())
                .collect(),
        });
        let mut payload = BeforeWeekViewRender {
            header: self.model.days.clone(),
            period,
        };

        self.notifications.before_render.emit(&mut payload);

        for (day, decorated) in self.model.days.iter_mut().zip(payload.header) {
            day.css_class = decorated.css_class;
        }
    }

    // ---- Gestures ----

    pub fn is_gesture_active(&self) -> bool {
        self.drag.is_active() || self.resize.is_active()
    }

    /// Start moving an event. Rejected for hidden or non-draggable events.
    pub fn pointer_down_on_event(&mut self, key: EventKey, pointer_x: f32) -> bool {
        if self.is_gesture_active() {
            return false;
        }
        match self.model.layout.find(key) {
            Some((_, placed)) => self.drag.begin(placed, &self.model.days, pointer_x),
            None => false,
        }
    }

    /// Start resizing an event from one of its edges.
    pub fn pointer_down_on_handle(
        &mut self,
        key: EventKey,
        handle: ResizeHandle,
        pointer_x: f32,
    ) -> bool {
        if self.is_gesture_active() {
            return false;
        }
        match self.model.layout.find(key) {
            Some((_, placed)) => {
                self.resize
                    .begin(placed, handle, &self.model.days, pointer_x)
            }
            None => false,
        }
    }

    /// Track the pointer. A live resize re-packs the rows in the same call.
    pub fn pointer_move(
        &mut self,
        pointer_x: f32,
        geometry: &dyn GeometryProvider,
    ) -> Option<GesturePreview> {
        if let Some(preview) = self.drag.update(pointer_x, geometry) {
            return Some(GesturePreview::Drag(preview));
        }

        let preview = self.resize.update(pointer_x, geometry)?;
        self.relayout();
        Some(GesturePreview::Resize(preview))
    }

    /// Release the pointer, emitting the committed change if there is one.
    ///
    /// A drag released outside the calendar rect is cancelled.
    pub fn pointer_up(
        &mut self,
        pointer: Pos2,
        geometry: &dyn GeometryProvider,
    ) -> Option<EventTimesChanged> {
        let change = if self.drag.is_active() {
            match self.drag.finish(pointer, geometry)? {
                DragOutcome::Committed(change) => change,
                DragOutcome::Cancelled => return None,
            }
        } else {
            let change = self.resize.finish(pointer.x, geometry)?;
            self.relayout();
            change
        };

        Some(self.emit_times_changed(change))
    }

    /// Abort the active gesture without emitting anything.
    pub fn cancel_gesture(&mut self) -> bool {
        let was_resizing = self.resize.is_active();
        let was_active = self.is_gesture_active();
        self.abort_gesture("cancelled");
        if was_resizing {
            self.relayout();
        }
        was_active
    }

    /// Handle an event dragged in from outside the grid and dropped at `pointer`.
    pub fn drop_external(
        &mut self,
        event: &CalendarEvent,
        pointer: Pos2,
        geometry: &dyn GeometryProvider,
    ) -> Option<EventTimesChanged> {
        let change =
            ExternalDropAdapter::drop_on_header(event, pointer, &self.model.days, geometry)?;
        Some(self.emit_times_changed(change))
    }

    fn emit_times_changed(&mut self, change: EventTimesChanged) -> EventTimesChanged {
        let mut payload = change.clone();
        self.notifications.event_times_changed.emit(&mut payload);
        change
    }

    // ---- Activation ----

    pub fn click_day_header(&mut self, index: usize) -> bool {
        let Some(day) = self.model.days.get(index).cloned() else {
            return false;
        };
        self.notifications
            .day_header_clicked
            .emit(&mut DayHeaderClicked { day });
        true
    }

    pub fn click_event(&mut self, key: EventKey) -> bool {
        let Some(event) = self.inputs.events.get(key.0).cloned() else {
            return false;
        };
        self.notifications
            .event_clicked
            .emit(&mut EventClicked { event });
        true
    }

    /// Run an event action's handler. Does not count as a click on the event.
    pub fn click_event_action(&self, key: EventKey, action_index: usize) -> bool {
        let Some(event) = self.inputs.events.get(key.0) else {
            return false;
        };
        let Some(action) = event.actions.get(action_index) else {
            return false;
        };
        action.on_click.call(&ActionClick {
            event: event.clone(),
        });
        true
    }
}
