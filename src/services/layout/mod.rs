//! Event placement for the week grid.
//!
//! Events are bucketed into the visible day columns, clipped to the visible
//! period, then packed into rows with a greedy first-fit so that events
//! sharing a day never share a row.

use chrono::NaiveDateTime;

use crate::models::day::DayViewModel;
use crate::models::event::{CalendarEvent, EventKey, EventValidationError};

/// One event positioned inside a packing row.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedEvent {
    pub key: EventKey,
    /// The caller's event with its true (unclipped) times
    pub event: CalendarEvent,
    /// Index of the first visible day column the event occupies
    pub offset_days: usize,
    /// Number of visible day columns the event occupies
    pub span_days: usize,
    pub starts_before_period: bool,
    pub ends_after_period: bool,
}

impl PlacedEvent {
    pub fn end_offset(&self) -> usize {
        self.offset_days + self.span_days
    }

    fn overlaps(&self, offset_days: usize, span_days: usize) -> bool {
        self.offset_days < offset_days + span_days && offset_days < self.end_offset()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventRow {
    pub entries: Vec<PlacedEvent>,
}

impl EventRow {
    fn has_room_for(&self, offset_days: usize, span_days: usize) -> bool {
        !self
            .entries
            .iter()
            .any(|placed| placed.overlaps(offset_days, span_days))
    }
}

/// An event left out of the layout because it failed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacementDiagnostic {
    pub key: EventKey,
    pub title: String,
    pub error: EventValidationError,
}

/// Times to use for one event instead of its own, e.g. while it is being resized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpanPreview {
    pub key: EventKey,
    pub start: NaiveDateTime,
    pub end: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeekLayout {
    pub rows: Vec<EventRow>,
    pub diagnostics: Vec<PlacementDiagnostic>,
    /// Valid events touching at least one visible day, in input order
    pub period_events: Vec<EventKey>,
}

impl WeekLayout {
    /// Row index and placement of an event, if it is visible.
    pub fn find(&self, key: EventKey) -> Option<(usize, &PlacedEvent)> {
        self.rows.iter().enumerate().find_map(|(row_index, row)| {
            row.entries
                .iter()
                .find(|placed| placed.key == key)
                .map(|placed| (row_index, placed))
        })
    }

    pub fn placed_count(&self) -> usize {
        self.rows.iter().map(|row| row.entries.len()).sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct VisibleSpan {
    offset_days: usize,
    span_days: usize,
    starts_before_period: bool,
    ends_after_period: bool,
}

/// Clip an event to the visible columns. `None` when it touches none of them.
fn visible_span(days: &[DayViewModel], event: &CalendarEvent) -> Option<VisibleSpan> {
    let first_visible = days.first()?.date;
    let last_visible = days.last()?.date;
    let first = days.iter().position(|day| event.occupies(day.date))?;
    let last = days.iter().rposition(|day| event.occupies(day.date))?;

    Some(VisibleSpan {
        offset_days: first,
        span_days: last - first + 1,
        starts_before_period: event.first_day() < first_visible,
        ends_after_period: event.last_day() > last_visible,
    })
}

/// Place `events` onto the visible `days`.
pub fn place_events(days: &[DayViewModel], events: &[CalendarEvent]) -> WeekLayout {
    place_events_with_preview(days, events, None)
}

/// Place `events`, substituting the preview times for one of them.
///
/// Row-mates of the previewed event are re-packed against its preview span.
pub fn place_events_with_preview(
    days: &[DayViewModel],
    events: &[CalendarEvent],
    preview: Option<&SpanPreview>,
) -> WeekLayout {
    let mut layout = WeekLayout::default();
    let mut candidates: Vec<(PlacedEvent, NaiveDateTime)> = Vec::new();

    for (index, event) in events.iter().enumerate() {
        let key = EventKey(index);
        let effective = match preview {
            Some(preview) if preview.key == key => event.with_times(preview.start, preview.end),
            _ => event.clone(),
        };

        if let Err(error) = effective.validate() {
            log::warn!(
                "Skipping invalid event #{} ({:?}) in week view: {}",
                index,
                event.title,
                error
            );
            layout.diagnostics.push(PlacementDiagnostic {
                key,
                title: event.title.clone(),
                error,
            });
            continue;
        }

        let Some(span) = visible_span(days, &effective) else {
            continue;
        };

        layout.period_events.push(key);
        candidates.push((
            PlacedEvent {
                key,
                event: event.clone(),
                offset_days: span.offset_days,
                span_days: span.span_days,
                starts_before_period: span.starts_before_period,
                ends_after_period: span.ends_after_period,
            },
            effective.start,
        ));
    }

    // Stable sort: equal start and span keep input order
    candidates.sort_by(|(a, a_start), (b, b_start)| {
        a_start
            .cmp(b_start)
            .then_with(|| b.span_days.cmp(&a.span_days))
    });

    for (placed, _) in candidates {
        match layout
            .rows
            .iter_mut()
            .find(|row| row.has_room_for(placed.offset_days, placed.span_days))
        {
            Some(row) => row.entries.push(placed),
            None => layout.rows.push(EventRow {
                entries: vec![placed],
            }),
        }
    }

    for row in &mut layout.rows {
        row.entries.sort_by_key(|placed| placed.offset_days);
    }

    log::debug!(
        "Placed {} events into {} rows ({} skipped as invalid)",
        layout.placed_count(),
        layout.rows.len(),
        layout.diagnostics.len()
    );

    layout
}
