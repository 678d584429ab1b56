// Integration tests for the week view controller
// Drive the grid, layout and gestures the way the desktop front end does

mod fixtures;

use std::cell::RefCell;
use std::rc::Rc;

use chrono::{Datelike, Weekday};
use pretty_assertions::assert_eq;
use rust_calendar_week::models::event::{
    ActionClick, CalendarEvent, EventAction, EventKey, Resizable,
};
use rust_calendar_week::models::settings::WeekViewSettings;
use rust_calendar_week::ui_egui::controller::{GesturePreview, WeekViewController};
use rust_calendar_week::ui_egui::notifications::{DayHeaderClicked, EventTimesChanged};
use rust_calendar_week::ui_egui::resize::ResizeHandle;

use fixtures::dates::{at, date, june_2016, monday_june_27_2016};
use fixtures::events::{draggable, resizable, timed, two_hour_monday};
use fixtures::{controller_for, record, unrendered_controller_for, FakeGeometry};

fn with_settings(controller: &mut WeekViewController, settings: WeekViewSettings) {
    controller.set_settings(settings);
    controller.apply_changes();
}

// ---- Grid ----

#[test]
fn test_week_of_view_date_starts_on_sunday() {
    let controller = controller_for(date(2016, 6, 29), Vec::new());
    let days = &controller.model().days;

    assert_eq!(days.len(), 7);
    assert_eq!(days[0].date, date(2016, 6, 26));
    assert_eq!(days[6].date, date(2016, 7, 2));
}

#[test]
fn test_excluded_days_are_hidden() {
    let mut controller = controller_for(date(2016, 6, 29), Vec::new());

    with_settings(
        &mut controller,
        WeekViewSettings {
            exclude_days: vec![0, 6],
            ..WeekViewSettings::default()
        },
    );
    assert_eq!(controller.model().days.len(), 5);

    with_settings(
        &mut controller,
        WeekViewSettings {
            exclude_days: vec![1],
            ..WeekViewSettings::default()
        },
    );
    assert_eq!(controller.model().days.len(), 6);
}

#[test]
fn test_week_starts_on_monday() {
    let mut controller = controller_for(monday_june_27_2016(), Vec::new());
    with_settings(
        &mut controller,
        WeekViewSettings {
            first_day_of_week: 1,
            ..WeekViewSettings::default()
        },
    );

    let first = controller.model().days[0].date;
    assert_eq!(first, monday_june_27_2016());
    assert_eq!(first.weekday(), Weekday::Mon);
}

#[test]
fn test_custom_weekend_days() {
    let mut controller = controller_for(date(2017, 6, 25), Vec::new());
    with_settings(
        &mut controller,
        WeekViewSettings {
            weekend_days: vec![5, 6],
            ..WeekViewSettings::default()
        },
    );

    let days = &controller.model().days;
    assert!(!days[0].is_weekend);
    assert!(days[5].is_weekend);
    assert!(days[6].is_weekend);
}

// ---- Events ----

#[test]
fn test_events_get_default_colors() {
    let controller = controller_for(monday_june_27_2016(), vec![two_hour_monday()]);
    let (_, placed) = controller.model().layout.find(EventKey(0)).unwrap();

    assert_eq!(placed.event.color.primary, "#1e90ff");
    assert_eq!(placed.event.color.secondary, "#D1E8FF");
}

#[test]
fn test_custom_css_class_is_carried_to_rendered_event() {
    let mut event = two_hour_monday();
    event.css_class = Some("foo".to_string());
    let controller = controller_for(monday_june_27_2016(), vec![event]);

    let (_, placed) = controller.model().layout.find(EventKey(0)).unwrap();
    assert_eq!(placed.event.css_class.as_deref(), Some("foo"));
}

#[test]
fn test_refresh_picks_up_pushed_events() {
    let mut controller = controller_for(monday_june_27_2016(), Vec::new());
    assert_eq!(controller.model().layout.placed_count(), 0);

    controller.events_mut().push(two_hour_monday());
    controller.refresh();

    assert_eq!(controller.model().layout.placed_count(), 1);
}

#[test]
fn test_invalid_event_is_reported_once() {
    let inverted = timed("bad", june_2016(28, 6), june_2016(28, 4));
    let controller = controller_for(monday_june_27_2016(), vec![inverted, two_hour_monday()]);

    let layout = &controller.model().layout;
    assert_eq!(layout.diagnostics.len(), 1);
    assert_eq!(layout.diagnostics[0].key, EventKey(0));
    assert_eq!(layout.placed_count(), 1);
}

// ---- Notifications ----

#[test]
fn test_day_header_click_emits_day() {
    let mut controller = controller_for(monday_june_27_2016(), Vec::new());
    let clicks = record(&mut controller.notifications_mut().day_header_clicked);

    assert!(controller.click_day_header(0));

    assert_eq!(
        *clicks.borrow(),
        vec![DayHeaderClicked {
            day: controller.model().days[0].clone()
        }]
    );
}

#[test]
fn test_before_render_can_decorate_headers() {
    let mut controller = unrendered_controller_for(monday_june_27_2016(), Vec::new());
    controller
        .notifications_mut()
        .before_render
        .subscribe(|payload| payload.header[0].css_class = Some("foo".to_string()));

    controller.refresh();

    assert_eq!(controller.model().days[0].css_class.as_deref(), Some("foo"));
    assert_eq!(controller.model().days[1].css_class, None);
}

#[test]
fn test_refresh_fires_before_render_once() {
    let mut controller = controller_for(monday_june_27_2016(), Vec::new());
    let renders = record(&mut controller.notifications_mut().before_render);

    controller.refresh();

    assert_eq!(renders.borrow().len(), 1);
}

#[test]
fn test_before_render_exposes_period() {
    let event = two_hour_monday();
    let mut controller = unrendered_controller_for(monday_june_27_2016(), vec![event.clone()]);
    let renders = record(&mut controller.notifications_mut().before_render);

    controller.apply_changes();

    let renders = renders.borrow();
    let period = renders[0].period.as_ref().unwrap();
    assert_eq!(period.start, june_2016(26, 0));
    assert_eq!(
        period.end,
        date(2016, 7, 2).and_hms_opt(23, 59, 59).unwrap()
    );
    assert_eq!(period.events, vec![event]);
}

#[test]
fn test_event_action_runs_handler_without_event_click() {
    let handled = Rc::new(RefCell::new(Vec::new()));
    let sink = handled.clone();
    let mut event = two_hour_monday();
    event.actions.push(EventAction::new("Edit", move |click: &ActionClick| {
        sink.borrow_mut().push(click.event.title.clone())
    }));

    let mut controller = controller_for(monday_june_27_2016(), vec![event]);
    let clicks = record(&mut controller.notifications_mut().event_clicked);

    assert!(controller.click_event_action(EventKey(0), 0));

    assert_eq!(*handled.borrow(), vec!["foo".to_string()]);
    assert!(clicks.borrow().is_empty());
}

#[test]
fn test_event_click_emits_event() {
    let mut controller = controller_for(monday_june_27_2016(), vec![two_hour_monday()]);
    let clicks = record(&mut controller.notifications_mut().event_clicked);

    assert!(controller.click_event(EventKey(0)));
    assert_eq!(clicks.borrow()[0].event, two_hour_monday());
}

// ---- Resize ----

fn resize_event(
    event: CalendarEvent,
    handle: ResizeHandle,
    from_x: f32,
    to_x: f32,
) -> Vec<EventTimesChanged> {
    let geometry = FakeGeometry::week();
    let mut controller = controller_for(monday_june_27_2016(), vec![event]);
    let changes = record(&mut controller.notifications_mut().event_times_changed);

    assert!(controller.pointer_down_on_handle(EventKey(0), handle, from_x));
    controller.pointer_move(to_x, &geometry);
    controller.pointer_up(geometry.row_point(to_x), &geometry);

    let recorded = changes.borrow().clone();
    recorded
}

#[test]
fn test_resize_from_left_edge() {
    let event = resizable(
        "foo",
        june_2016(27, 4),
        Some(june_2016(27, 6)),
        Resizable {
            before_start: true,
            after_end: false,
        },
    );
    let changes = resize_event(event.clone(), ResizeHandle::Left, 100.0, 0.0);

    assert_eq!(
        changes,
        vec![EventTimesChanged {
            event,
            new_start: june_2016(26, 4),
            new_end: Some(june_2016(27, 6)),
        }]
    );
}

#[test]
fn test_resize_from_right_edge() {
    let event = resizable(
        "foo",
        june_2016(27, 4),
        Some(june_2016(27, 6)),
        Resizable {
            before_start: false,
            after_end: true,
        },
    );
    let changes = resize_event(event.clone(), ResizeHandle::Right, 200.0, 300.0);

    assert_eq!(
        changes,
        vec![EventTimesChanged {
            event,
            new_start: june_2016(27, 4),
            new_end: Some(june_2016(28, 6)),
        }]
    );
}

#[test]
fn test_resize_event_without_end() {
    let event = resizable(
        "foo",
        june_2016(27, 4),
        None,
        Resizable {
            before_start: false,
            after_end: true,
        },
    );
    let changes = resize_event(event, ResizeHandle::Right, 200.0, 300.0);

    assert_eq!(changes[0].new_start, june_2016(27, 4));
    assert_eq!(changes[0].new_end, Some(june_2016(28, 4)));
}

#[test]
fn test_left_edge_cannot_shrink_below_one_day() {
    let event = resizable("foo", june_2016(27, 4), Some(june_2016(27, 6)), Resizable::both());
    let changes = resize_event(event, ResizeHandle::Left, 100.0, 200.0);

    assert_eq!(changes[0].new_start, june_2016(27, 4));
    assert_eq!(changes[0].new_end, Some(june_2016(27, 6)));
}

#[test]
fn test_left_edge_clamped_at_start_of_week() {
    let event = resizable("foo", june_2016(27, 4), Some(june_2016(27, 6)), Resizable::both());
    let changes = resize_event(event, ResizeHandle::Left, 100.0, -100.0);

    assert_eq!(changes[0].new_start, june_2016(26, 4));
}

#[test]
fn test_resize_without_permission_is_ignored() {
    let geometry = FakeGeometry::week();
    let mut controller = controller_for(monday_june_27_2016(), vec![two_hour_monday()]);
    let changes = record(&mut controller.notifications_mut().event_times_changed);

    assert!(!controller.pointer_down_on_handle(EventKey(0), ResizeHandle::Right, 200.0));
    assert!(controller.pointer_up(geometry.row_point(300.0), &geometry).is_none());
    assert!(changes.borrow().is_empty());
}

#[test]
fn test_resizing_into_a_neighbour_repacks_it() {
    let first = resizable(
        "event 1",
        june_2016(27, 4),
        Some(june_2016(27, 6)),
        Resizable {
            before_start: false,
            after_end: true,
        },
    );
    let second = timed("event 2", june_2016(28, 4), june_2016(29, 6));
    let geometry = FakeGeometry::week();
    let mut controller = controller_for(monday_june_27_2016(), vec![first, second]);

    assert_eq!(controller.model().layout.rows.len(), 1);

    assert!(controller.pointer_down_on_handle(EventKey(0), ResizeHandle::Right, 200.0));
    let preview = controller.pointer_move(300.0, &geometry);
    assert!(matches!(preview, Some(GesturePreview::Resize(_))));

    let layout = &controller.model().layout;
    assert_eq!(layout.rows.len(), 2);
    assert_eq!(layout.find(EventKey(0)).unwrap().0, 0);
    assert_eq!(layout.find(EventKey(0)).unwrap().1.span_days, 2);
    assert_eq!(layout.find(EventKey(1)).unwrap().0, 1);

    controller.pointer_up(geometry.row_point(300.0), &geometry);
    // Until the caller applies the change the committed layout comes back
    assert_eq!(controller.model().layout.rows.len(), 1);
}

// ---- Drag ----

fn december_drag(snap: bool) -> (WeekViewController, CalendarEvent) {
    let event = draggable("foo", at(2016, 12, 8, 4), at(2016, 12, 8, 6));
    let mut controller = controller_for(date(2016, 12, 8), vec![event.clone()]);
    with_settings(
        &mut controller,
        WeekViewSettings {
            snap_dragged_events: snap,
            ..WeekViewSettings::default()
        },
    );
    (controller, event)
}

#[test]
fn test_drag_one_day_back() {
    let geometry = FakeGeometry::week();
    let (mut controller, event) = december_drag(true);
    let changes = record(&mut controller.notifications_mut().event_times_changed);

    assert!(controller.pointer_down_on_event(EventKey(0), 450.0));
    match controller.pointer_move(350.0, &geometry) {
        Some(GesturePreview::Drag(preview)) => assert_eq!(preview.pixel_offset, -100.0),
        other => panic!("expected a drag preview, got {:?}", other),
    }
    controller.pointer_up(geometry.row_point(350.0), &geometry);

    assert_eq!(
        *changes.borrow(),
        vec![EventTimesChanged {
            event,
            new_start: at(2016, 12, 7, 4),
            new_end: Some(at(2016, 12, 7, 6)),
        }]
    );
}

#[test]
fn test_unsnapped_drop_outside_calendar_emits_nothing() {
    let geometry = FakeGeometry::week();
    let (mut controller, _) = december_drag(false);
    let changes = record(&mut controller.notifications_mut().event_times_changed);

    assert!(controller.pointer_down_on_event(EventKey(0), 450.0));
    controller.pointer_move(-10.0, &geometry);
    assert!(controller.pointer_up(geometry.row_point(-10.0), &geometry).is_none());

    assert!(changes.borrow().is_empty());
    assert!(!controller.is_gesture_active());
}

#[test]
fn test_unsnapped_drag_commits_whole_days() {
    let geometry = FakeGeometry::week();
    let (mut controller, _) = december_drag(false);

    assert!(controller.pointer_down_on_event(EventKey(0), 450.0));
    match controller.pointer_move(320.0, &geometry) {
        Some(GesturePreview::Drag(preview)) => assert_eq!(preview.pixel_offset, -130.0),
        other => panic!("expected a drag preview, got {:?}", other),
    }
    let change = controller.pointer_up(geometry.row_point(320.0), &geometry).unwrap();

    assert_eq!(change.new_start, at(2016, 12, 7, 4));
    assert_eq!(change.new_end, Some(at(2016, 12, 7, 6)));
}

#[test]
fn test_non_draggable_event_does_not_move() {
    let geometry = FakeGeometry::week();
    let mut controller = controller_for(monday_june_27_2016(), vec![two_hour_monday()]);

    assert!(!controller.pointer_down_on_event(EventKey(0), 150.0));
    assert!(controller.pointer_move(50.0, &geometry).is_none());
}

// ---- External drop ----

#[test]
fn test_external_drop_on_sunday_start_week() {
    let geometry = FakeGeometry::week();
    let mut controller = controller_for(monday_june_27_2016(), Vec::new());
    let changes = record(&mut controller.notifications_mut().event_times_changed);
    let dropped = timed("dropped", june_2016(1, 9), june_2016(1, 10));

    controller.drop_external(&dropped, geometry.header_center(2), &geometry);

    assert_eq!(
        *changes.borrow(),
        vec![EventTimesChanged {
            event: dropped,
            new_start: june_2016(28, 0),
            new_end: None,
        }]
    );
}

#[test]
fn test_external_drop_on_monday_start_week() {
    let geometry = FakeGeometry::week();
    let mut controller = controller_for(monday_june_27_2016(), Vec::new());
    with_settings(
        &mut controller,
        WeekViewSettings {
            first_day_of_week: 1,
            ..WeekViewSettings::default()
        },
    );
    let dropped = timed("dropped", june_2016(1, 9), june_2016(1, 10));

    let change = controller
        .drop_external(&dropped, geometry.header_center(2), &geometry)
        .unwrap();

    assert_eq!(change.new_start, june_2016(29, 0));
    assert_eq!(change.new_end, None);
}

#[test]
fn test_external_drop_outside_headers_is_ignored() {
    let geometry = FakeGeometry::week();
    let mut controller = controller_for(monday_june_27_2016(), Vec::new());
    let dropped = timed("dropped", june_2016(1, 9), june_2016(1, 10));

    let below_headers = egui::Pos2::new(250.0, 200.0);
    assert!(controller
        .drop_external(&dropped, below_headers, &geometry)
        .is_none());
}

// ---- Hidden weekdays ----

/// Week of 2016-06-29 without Wednesday: Tuesday is column 2, Thursday column 3
fn without_wednesday(event: CalendarEvent) -> WeekViewController {
    let mut controller = controller_for(date(2016, 6, 29), vec![event]);
    with_settings(
        &mut controller,
        WeekViewSettings {
            exclude_days: vec![3],
            ..WeekViewSettings::default()
        },
    );
    controller
}

#[test]
fn test_drag_over_hidden_weekday_stays_on_grid() {
    let geometry = FakeGeometry::with_columns(6);
    let event = draggable("foo", june_2016(28, 4), june_2016(28, 6));
    let mut controller = without_wednesday(event);
    assert_eq!(controller.model().days.len(), 6);

    assert!(controller.pointer_down_on_event(EventKey(0), 250.0));
    match controller.pointer_move(350.0, &geometry) {
        Some(GesturePreview::Drag(preview)) => assert_eq!(preview.day_offset, 1),
        other => panic!("expected a drag preview, got {:?}", other),
    }
    let change = controller
        .pointer_up(geometry.row_point(350.0), &geometry)
        .unwrap();

    assert_eq!(change.new_start, june_2016(30, 4));
    assert_eq!(change.new_end, Some(june_2016(30, 6)));

    controller.events_mut()[0] = change.event.with_times(change.new_start, change.new_end);
    controller.apply_changes();
    let (_, placed) = controller.model().layout.find(EventKey(0)).unwrap();
    assert_eq!(placed.offset_days, 3);
}

#[test]
fn test_resize_over_hidden_weekday_stays_on_grid() {
    let geometry = FakeGeometry::with_columns(6);
    let event = resizable(
        "foo",
        june_2016(28, 4),
        Some(june_2016(28, 6)),
        Resizable::both(),
    );
    let mut controller = without_wednesday(event);

    assert!(controller.pointer_down_on_handle(EventKey(0), ResizeHandle::Right, 300.0));
    controller.pointer_move(400.0, &geometry);
    let (_, placed) = controller.model().layout.find(EventKey(0)).unwrap();
    assert_eq!((placed.offset_days, placed.span_days), (2, 2));

    let change = controller
        .pointer_up(geometry.row_point(400.0), &geometry)
        .unwrap();
    assert_eq!(change.new_start, june_2016(28, 4));
    assert_eq!(change.new_end, Some(june_2016(30, 6)));
}

#[test]
fn test_drag_released_below_calendar_emits_nothing() {
    let geometry = FakeGeometry::week();
    let (mut controller, _) = december_drag(true);
    let changes = record(&mut controller.notifications_mut().event_times_changed);

    assert!(controller.pointer_down_on_event(EventKey(0), 450.0));
    controller.pointer_move(350.0, &geometry);
    assert!(controller.pointer_up(geometry.below(350.0), &geometry).is_none());

    assert!(changes.borrow().is_empty());
    assert!(!controller.is_gesture_active());
}
