//! Typed notification channels for the week view.
//!
//! Each notification kind has its own [`Notifier`]. Subscribers are called in
//! registration order and receive the payload mutably, which is how the
//! before-render hook lets callers decorate header cells.

use chrono::NaiveDateTime;

use crate::models::day::DayViewModel;
use crate::models::event::CalendarEvent;

pub type SubscriptionId = u64;

type Subscriber<T> = Box<dyn FnMut(&mut T)>;

pub struct Notifier<T> {
    next_id: SubscriptionId,
    subscribers: Vec<(SubscriptionId, Subscriber<T>)>,
}

impl<T> Default for Notifier<T> {
    fn default() -> Self {
        Self {
            next_id: 0,
            subscribers: Vec::new(),
        }
    }
}

impl<T> Notifier<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, subscriber: impl FnMut(&mut T) + 'static) -> SubscriptionId {
        let id = self.next_id;
        self.next_id += 1;
        self.subscribers.push((id, Box::new(subscriber)));
        id
    }

    /// Remove a subscriber. Returns false if it was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(existing, _)| *existing != id);
        self.subscribers.len() != before
    }

    pub fn emit(&mut self, payload: &mut T) {
        for (_, subscriber) in &mut self.subscribers {
            subscriber(payload);
        }
    }
}

/// Visible period handed to before-render subscribers.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedPeriod {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    /// Valid events touching the period, in input order
    pub events: Vec<CalendarEvent>,
}

/// Emitted once per rebuild, before the grid is painted.
///
/// Subscribers may set `css_class` on header days; the classes are kept on
/// the rebuilt grid.
#[derive(Debug, Clone, PartialEq)]
pub struct BeforeWeekViewRender {
    pub header: Vec<DayViewModel>,
    /// `None` when every day of the week is excluded
    pub period: Option<RenderedPeriod>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DayHeaderClicked {
    pub day: DayViewModel,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EventClicked {
    pub event: CalendarEvent,
}

/// New times for an event, produced by drag, resize or an external drop.
///
/// The caller decides whether to apply it.
#[derive(Debug, Clone, PartialEq)]
pub struct EventTimesChanged {
    pub event: CalendarEvent,
    pub new_start: NaiveDateTime,
    /// Not computed for external drops
    pub new_end: Option<NaiveDateTime>,
}

#[derive(Default)]
pub struct WeekViewNotifications {
    pub before_render: Notifier<BeforeWeekViewRender>,
    pub day_header_clicked: Notifier<DayHeaderClicked>,
    pub event_clicked: Notifier<EventClicked>,
    pub event_times_changed: Notifier<EventTimesChanged>,
}
