use std::cell::RefCell;
use std::rc::Rc;

use chrono::{Duration, Local, NaiveDate};

use crate::models::event::{CalendarEvent, EventAction, EventColor, Resizable};
use crate::models::settings::{WeekViewSettings, SATURDAY, SUNDAY};
use crate::services::settings::SettingsService;
use crate::services::week::WeekViewInputs;
use crate::ui_egui::controller::WeekViewController;
use crate::ui_egui::notifications::EventTimesChanged;
use crate::ui_egui::views::week_view::{ExternalEventPayload, WeekView};

const MIN_ROOT_WIDTH: f32 = 320.0;
const MIN_ROOT_HEIGHT: f32 = 220.0;

const DAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

pub struct CalendarApp {
    controller: WeekViewController,
    /// Changes emitted by the view, applied after the frame is drawn
    pending_changes: Rc<RefCell<Vec<EventTimesChanged>>>,
    /// Latest click notification, shown in the status bar
    status: Rc<RefCell<String>>,
    /// Events not on the calendar yet, dragged onto a day header to schedule them
    unscheduled: Vec<CalendarEvent>,
    settings: WeekViewSettings,
    settings_service: Option<SettingsService>,
}

impl eframe::App for CalendarApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.controller.set_today(Local::now().date_naive());

        egui::TopBottomPanel::top("week_navigation").show(ctx, |ui| {
            self.render_toolbar(ui);
        });

        egui::TopBottomPanel::bottom("week_status").show(ctx, |ui| {
            ui.label(self.status.borrow().as_str());
        });

        egui::SidePanel::left("unscheduled_events")
            .resizable(false)
            .default_width(180.0)
            .show(ctx, |ui| {
                self.render_unscheduled(ui);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.set_min_size(egui::vec2(MIN_ROOT_WIDTH, MIN_ROOT_HEIGHT));
            WeekView::show(ui, &mut self.controller, &self.unscheduled);
        });

        self.apply_pending_changes();
    }
}

impl CalendarApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        settings: WeekViewSettings,
        events: Vec<CalendarEvent>,
        settings_service: Option<SettingsService>,
    ) -> Self {
        let today = Local::now().date_naive();
        let mut inputs = WeekViewInputs::new(today, today);
        inputs.settings = settings.clone();
        inputs.events = events;

        let mut controller = WeekViewController::new(inputs);
        let pending_changes = Rc::new(RefCell::new(Vec::new()));
        let status = Rc::new(RefCell::new(String::from("Ready")));

        let notifications = controller.notifications_mut();
        let queue = pending_changes.clone();
        notifications
            .event_times_changed
            .subscribe(move |change| queue.borrow_mut().push(change.clone()));

        let header_status = status.clone();
        notifications.day_header_clicked.subscribe(move |click| {
            *header_status.borrow_mut() = format!("Selected {}", click.day.date.format("%A %B %-d"));
        });

        let event_status = status.clone();
        notifications.event_clicked.subscribe(move |click| {
            *event_status.borrow_mut() = format!("Clicked \"{}\"", click.event.title);
        });

        Self {
            controller,
            pending_changes,
            status,
            unscheduled: unscheduled_events(),
            settings,
            settings_service,
        }
    }

    fn render_toolbar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let view_date = self.controller.inputs().view_date;
            if ui.button("◀ Previous week").clicked() {
                self.controller.set_view_date(view_date - Duration::days(7));
            }
            if ui.button("Today").clicked() {
                self.controller.set_view_date(Local::now().date_naive());
            }
            if ui.button("Next week ▶").clicked() {
                self.controller.set_view_date(view_date + Duration::days(7));
            }

            ui.separator();
            ui.label(week_title(&self.controller));
            ui.separator();

            let mut settings = self.settings.clone();
            egui::ComboBox::from_label("Week starts on")
                .selected_text(DAY_NAMES[settings.first_day_of_week as usize % 7])
                .show_ui(ui, |ui| {
                    for (day, name) in DAY_NAMES.iter().enumerate() {
                        ui.selectable_value(&mut settings.first_day_of_week, day as u8, *name);
                    }
                });

            let mut hide_weekends = settings.exclude_days.contains(&SUNDAY)
                && settings.exclude_days.contains(&SATURDAY);
            if ui.checkbox(&mut hide_weekends, "Hide weekends").changed() {
                settings.exclude_days = if hide_weekends {
                    vec![SUNDAY, SATURDAY]
                } else {
                    Vec::new()
                };
            }
            ui.checkbox(&mut settings.snap_dragged_events, "Snap drag");
            ui.checkbox(&mut settings.snap_resized_events, "Snap resize");

            if settings != self.settings {
                self.update_settings(settings);
            }
        });
    }

    fn render_unscheduled(&mut self, ui: &mut egui::Ui) {
        ui.heading("Unscheduled");
        ui.label("Drag onto a day to schedule");
        ui.separator();

        for (index, event) in self.unscheduled.iter().enumerate() {
            let id = egui::Id::new(("unscheduled_event", index));
            ui.dnd_drag_source(id, ExternalEventPayload { index }, |ui| {
                ui.label(&event.title);
            });
        }
    }

    fn update_settings(&mut self, settings: WeekViewSettings) {
        if let Some(service) = &self.settings_service {
            if let Err(e) = service.save(&settings) {
                log::error!("Failed to save settings: {:#}", e);
            }
        }
        self.controller.set_settings(settings.clone());
        self.settings = settings;
    }

    /// Apply committed moves, resizes and drops to the event list.
    fn apply_pending_changes(&mut self) {
        let changes: Vec<EventTimesChanged> = self.pending_changes.borrow_mut().drain(..).collect();

        for change in changes {
            if let Some(existing) = self
                .controller
                .events()
                .iter()
                .position(|event| *event == change.event)
            {
                let events = self.controller.events_mut();
                events[existing] = change.event.with_times(change.new_start, change.new_end);
                log::info!("Rescheduled \"{}\" to {}", change.event.title, change.new_start);
            } else if let Some(index) = self.unscheduled.iter().position(|event| *event == change.event) {
                let event = self.unscheduled.remove(index);
                // Drops only carry a start; keep the event's length
                let new_end = change
                    .new_end
                    .or_else(|| event.duration().map(|duration| change.new_start + duration));
                let scheduled = event.with_times(change.new_start, new_end);
                log::info!("Scheduled \"{}\" on {}", scheduled.title, scheduled.start);
                self.controller.events_mut().push(scheduled);
            } else {
                log::warn!("Ignoring change for unknown event \"{}\"", change.event.title);
            }
        }
    }
}

fn week_title(controller: &WeekViewController) -> String {
    match controller.model().period {
        Some(period) => format!(
            "{} - {}",
            period.start.format("%b %-d"),
            period.end.format("%b %-d, %Y")
        ),
        None => String::from("No visible days"),
    }
}

fn unscheduled_events() -> Vec<CalendarEvent> {
    let anchor = NaiveDate::from_ymd_opt(2000, 1, 1)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .unwrap_or_default();

    vec![
        CalendarEvent::new("Team offsite", anchor, Some(anchor + Duration::days(2))),
        CalendarEvent::new("Dentist", anchor, Some(anchor + Duration::hours(1))),
    ]
}

/// Events shown when no events file is given.
pub fn demo_events(today: NaiveDate) -> Vec<CalendarEvent> {
    let at = |offset: i64, hour: u32| {
        (today + Duration::days(offset))
            .and_hms_opt(hour, 0, 0)
            .unwrap_or_default()
    };

    let mut standup = CalendarEvent::new("Standup", at(0, 9), Some(at(0, 10)));
    standup.draggable = true;
    standup.resizable = Resizable::both();
    standup.actions.push(EventAction::new("Log", |click| {
        log::info!("Action clicked on \"{}\"", click.event.title);
    }));

    let mut conference = CalendarEvent::new("Conference", at(-1, 8), Some(at(2, 17)));
    conference.draggable = true;
    conference.resizable = Resizable::both();
    conference.color = EventColor::new("#ad2121", "#FAE3E3");

    let mut review = CalendarEvent::new("Review", at(1, 14), None);
    review.draggable = true;
    review.resizable = Resizable {
        before_start: false,
        after_end: true,
    };
    review.color = EventColor::new("#e3bc08", "#FDF1BA");

    vec![standup, conference, review]
}
