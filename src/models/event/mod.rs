// Event module
// Week view event model: timing, colors, gesture permissions and actions

use std::fmt;
use std::rc::Rc;

use chrono::{Duration, NaiveDate, NaiveDateTime};
use thiserror::Error;

/// Default primary color (border and text) for events without a color.
pub const DEFAULT_PRIMARY_COLOR: &str = "#1e90ff";
/// Default secondary color (background) for events without a color.
pub const DEFAULT_SECONDARY_COLOR: &str = "#D1E8FF";

/// Position of an event in the caller's event slice.
///
/// Events carry no identity of their own, so the layout and the gesture
/// controllers refer to them by index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EventKey(pub usize);

/// Validation errors for CalendarEvent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EventValidationError {
    #[error("event end {end} is before its start {start}")]
    EndBeforeStart {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventColor {
    pub primary: String,
    pub secondary: String,
}

impl EventColor {
    pub fn new(primary: impl Into<String>, secondary: impl Into<String>) -> Self {
        Self {
            primary: primary.into(),
            secondary: secondary.into(),
        }
    }
}

impl Default for EventColor {
    fn default() -> Self {
        Self::new(DEFAULT_PRIMARY_COLOR, DEFAULT_SECONDARY_COLOR)
    }
}

/// Which edges of an event may be dragged to change its times
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Resizable {
    /// Left edge - adjusts start
    pub before_start: bool,
    /// Right edge - adjusts end
    pub after_end: bool,
}

impl Resizable {
    pub fn both() -> Self {
        Self {
            before_start: true,
            after_end: true,
        }
    }
}

/// Payload handed to an action handler when the action is activated.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionClick {
    pub event: CalendarEvent,
}

/// Shared callback invoked when an event action is activated.
///
/// Two handlers compare equal only when they are the same allocation.
#[derive(Clone)]
pub struct ActionHandler(Rc<dyn Fn(&ActionClick)>);

impl ActionHandler {
    pub fn new(handler: impl Fn(&ActionClick) + 'static) -> Self {
        Self(Rc::new(handler))
    }

    pub fn call(&self, click: &ActionClick) {
        (self.0)(click)
    }
}

impl fmt::Debug for ActionHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ActionHandler(..)")
    }
}

impl PartialEq for ActionHandler {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

/// Clickable action rendered inside an event
#[derive(Debug, Clone, PartialEq)]
pub struct EventAction {
    pub label: String,
    pub css_class: Option<String>,
    pub on_click: ActionHandler,
}

impl EventAction {
    pub fn new(label: impl Into<String>, on_click: impl Fn(&ActionClick) + 'static) -> Self {
        Self {
            label: label.into(),
            css_class: None,
            on_click: ActionHandler::new(on_click),
        }
    }

    pub fn with_css_class(mut self, css_class: impl Into<String>) -> Self {
        self.css_class = Some(css_class.into());
        self
    }
}

/// Calendar event as shown in the week view.
///
/// `end` is an exclusive bound for day membership. An event without an end,
/// or with `end == start`, occupies only the day of its start.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarEvent {
    pub title: String,
    pub start: NaiveDateTime,
    pub end: Option<NaiveDateTime>,
    pub color: EventColor,
    pub draggable: bool,
    pub resizable: Resizable,
    pub css_class: Option<String>,
    pub actions: Vec<EventAction>,
}

impl CalendarEvent {
    /// Create an event with default colors and no gesture permissions.
    ///
    /// # Examples
    /// ```
    /// use rust_calendar_week::models::event::CalendarEvent;
    /// use chrono::NaiveDate;
    ///
    /// let start = NaiveDate::from_ymd_opt(2016, 6, 27).unwrap().and_hms_opt(4, 0, 0).unwrap();
    /// let event = CalendarEvent::new("Standup", start, Some(start + chrono::Duration::hours(2)));
    /// assert!(event.validate().is_ok());
    /// ```
    pub fn new(
        title: impl Into<String>,
        start: NaiveDateTime,
        end: Option<NaiveDateTime>,
    ) -> Self {
        Self {
            title: title.into(),
            start,
            end,
            color: EventColor::default(),
            draggable: false,
            resizable: Resizable::default(),
            css_class: None,
            actions: Vec::new(),
        }
    }

    /// Create a builder for constructing events with optional fields
    pub fn builder() -> EventBuilder {
        EventBuilder::new()
    }

    pub fn validate(&self) -> Result<(), EventValidationError> {
        match self.end {
            Some(end) if end < self.start => Err(EventValidationError::EndBeforeStart {
                start: self.start,
                end,
            }),
            _ => Ok(()),
        }
    }

    /// First calendar day the event touches.
    pub fn first_day(&self) -> NaiveDate {
        self.start.date()
    }

    /// Last calendar day the event touches, treating `end` as exclusive.
    pub fn last_day(&self) -> NaiveDate {
        match self.end {
            Some(end) if end > self.start => (end - Duration::nanoseconds(1)).date(),
            _ => self.start.date(),
        }
    }

    pub fn occupies(&self, date: NaiveDate) -> bool {
        self.first_day() <= date && date <= self.last_day()
    }

    pub fn duration(&self) -> Option<Duration> {
        self.end.map(|end| end - self.start)
    }

    /// Copy of this event moved to new times.
    pub fn with_times(&self, start: NaiveDateTime, end: Option<NaiveDateTime>) -> Self {
        Self {
            start,
            end,
            ..self.clone()
        }
    }
}

/// Builder for creating events with optional fields
#[derive(Default)]
pub struct EventBuilder {
    title: Option<String>,
    start: Option<NaiveDateTime>,
    end: Option<NaiveDateTime>,
    color: Option<EventColor>,
    draggable: bool,
    resizable: Resizable,
    css_class: Option<String>,
    actions: Vec<EventAction>,
}

impl EventBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn start(mut self, start: NaiveDateTime) -> Self {
        self.start = Some(start);
        self
    }

    pub fn end(mut self, end: NaiveDateTime) -> Self {
        self.end = Some(end);
        self
    }

    pub fn color(mut self, color: EventColor) -> Self {
        self.color = Some(color);
        self
    }

    pub fn draggable(mut self, draggable: bool) -> Self {
        self.draggable = draggable;
        self
    }

    pub fn resizable(mut self, resizable: Resizable) -> Self {
        self.resizable = resizable;
        self
    }

    pub fn css_class(mut self, css_class: impl Into<String>) -> Self {
        self.css_class = Some(css_class.into());
        self
    }

    pub fn action(mut self, action: EventAction) -> Self {
        self.actions.push(action);
        self
    }

    /// Build the event. Only the start time is required.
    pub fn build(self) -> Result<CalendarEvent, String> {
        let start = self.start.ok_or("Event start time is required")?;

        let event = CalendarEvent {
            title: self.title.unwrap_or_default(),
            start,
            end: self.end,
            color: self.color.unwrap_or_default(),
            draggable: self.draggable,
            resizable: self.resizable,
            css_class: self.css_class,
            actions: self.actions,
        };

        event.validate().map_err(|e| e.to_string())?;
        Ok(event)
    }
}
