use egui::{Align2, CursorIcon, FontId, Pos2, Rect, Rounding, Sense, Stroke, Vec2};

use super::palette::WeekGridPalette;
use super::utils::{event_colors, format_event_tooltip};
use crate::models::event::{CalendarEvent, EventKey};
use crate::services::layout::PlacedEvent;
use crate::ui_egui::controller::WeekViewController;
use crate::ui_egui::geometry::FrameGeometry;
use crate::ui_egui::resize::{draw_handles, HandleRects, ResizeHandle};

pub const HEADER_HEIGHT: f32 = 48.0;
pub const ROW_HEIGHT: f32 = 26.0;
const ROW_SPACING: f32 = 4.0;
/// Rows drawn even when fewer are packed, so the grid keeps a usable drop area
const MIN_ROWS: usize = 4;
const EVENT_INSET: f32 = 3.0;

/// Drag-and-drop payload for events dragged in from outside the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExternalEventPayload {
    /// Index into the external event list passed to [`WeekView::show`]
    pub index: usize,
}

/// Input gathered while painting, applied once the model is no longer borrowed.
enum ViewAction {
    ClickHeader(usize),
    ClickEvent(EventKey),
    ClickAction(EventKey, usize),
    BeginDrag(EventKey, f32),
    BeginResize(EventKey, ResizeHandle, f32),
}

pub struct WeekView;

impl WeekView {
    /// Paint the week grid and route this frame's input into `controller`.
    ///
    /// Returns the geometry the frame was laid out with.
    pub fn show(
        ui: &mut egui::Ui,
        controller: &mut WeekViewController,
        external_events: &[CalendarEvent],
    ) -> FrameGeometry {
        controller.apply_changes();
        let palette = WeekGridPalette::from_ui(ui);

        let (geometry, actions) = Self::paint(ui, controller, &palette);

        for action in actions {
            match action {
                ViewAction::ClickHeader(index) => {
                    controller.click_day_header(index);
                }
                ViewAction::ClickEvent(key) => {
                    controller.click_event(key);
                }
                ViewAction::ClickAction(key, index) => {
                    controller.click_event_action(key, index);
                }
                ViewAction::BeginDrag(key, x) => {
                    controller.pointer_down_on_event(key, x);
                }
                ViewAction::BeginResize(key, handle, x) => {
                    controller.pointer_down_on_handle(key, handle, x);
                }
            }
        }

        Self::track_gesture(ui, controller, &geometry);
        Self::handle_external_drop(ui, controller, external_events, &geometry);

        geometry
    }

    fn paint(
        ui: &mut egui::Ui,
        controller: &WeekViewController,
        palette: &WeekGridPalette,
    ) -> (FrameGeometry, Vec<ViewAction>) {
        let model = controller.model();
        let columns = model.days.len();
        let rows = model.layout.rows.len().max(MIN_ROWS);
        let height = HEADER_HEIGHT + ROW_SPACING + rows as f32 * (ROW_HEIGHT + ROW_SPACING);

        let (calendar_rect, _) =
            ui.allocate_exact_size(Vec2::new(ui.available_width(), height), Sense::hover());
        let mut geometry = FrameGeometry::for_calendar(calendar_rect, columns, HEADER_HEIGHT);
        let mut actions = Vec::new();
        let painter = ui.painter_at(calendar_rect);

        if columns == 0 {
            painter.text(
                calendar_rect.center(),
                Align2::CENTER_CENTER,
                "Every day of the week is excluded",
                FontId::proportional(14.0),
                palette.muted_text,
            );
            return (geometry, actions);
        }

        let pointer = ui.input(|i| i.pointer.hover_pos());
        let external_drag_active =
            egui::DragAndDrop::payload::<ExternalEventPayload>(ui.ctx()).is_some();

        // Day columns with their headers
        for (index, day) in model.days.iter().enumerate() {
            let Some(header_rect) = geometry.headers.get(index).copied() else {
                continue;
            };
            let column_rect = Rect::from_min_max(
                header_rect.min,
                Pos2::new(header_rect.max.x, calendar_rect.bottom()),
            )
            .shrink(1.0);

            let fill = if day.is_today {
                palette.today_bg
            } else if day.is_weekend {
                palette.weekend_bg
            } else {
                palette.day_bg
            };
            let border = if day.is_today {
                palette.today_border
            } else {
                palette.border
            };
            painter.rect_filled(column_rect, Rounding::same(4.0), fill);
            painter.rect_stroke(column_rect, Rounding::same(4.0), Stroke::new(1.0, border));

            let hovered = pointer.map_or(false, |pos| header_rect.contains(pos));
            if external_drag_active && hovered {
                painter.rect_filled(header_rect.shrink(2.0), Rounding::same(4.0), palette.drop_target);
            }

            let name_color = if day.is_past {
                palette.past_text
            } else {
                palette.text
            };
            painter.text(
                header_rect.center() - Vec2::new(0.0, 8.0),
                Align2::CENTER_CENTER,
                day.date.format("%A").to_string(),
                FontId::proportional(12.0),
                name_color,
            );
            painter.text(
                header_rect.center() + Vec2::new(0.0, 10.0),
                Align2::CENTER_CENTER,
                day.date.format("%b %-d").to_string(),
                FontId::proportional(11.0),
                palette.muted_text,
            );

            let response = ui.interact(header_rect, ui.id().with(("week_header", index)), Sense::click());
            if response.clicked() {
                actions.push(ViewAction::ClickHeader(index));
            }
        }

        // Event rows
        let drag_preview = controller.drag().preview(&geometry);

        for (row_index, row) in model.layout.rows.iter().enumerate() {
            let top = calendar_rect.top()
                + HEADER_HEIGHT
                + ROW_SPACING
                + row_index as f32 * (ROW_HEIGHT + ROW_SPACING);

            for placed in &row.entries {
                let left = calendar_rect.left() + placed.offset_days as f32 * geometry.column_width;
                let home_rect = Rect::from_min_size(
                    Pos2::new(left, top),
                    Vec2::new(placed.span_days as f32 * geometry.column_width, ROW_HEIGHT),
                )
                .shrink2(Vec2::new(EVENT_INSET, 0.0));
                geometry.events.insert(placed.key, home_rect);

                let rect = match drag_preview {
                    Some(preview) if controller.drag().is_dragging_event(placed.key) => {
                        home_rect.translate(Vec2::new(preview.pixel_offset, 0.0))
                    }
                    _ => home_rect,
                };

                Self::paint_event(ui, calendar_rect, rect, placed);

                let response = ui
                    .interact(rect, ui.id().with(("week_event", placed.key.0)), Sense::click_and_drag())
                    .on_hover_text(format_event_tooltip(&placed.event));

                let handles = HandleRects::for_placed(rect, placed);
                let hovered_handle = pointer.and_then(|pos| handles.hit_test(pos));
                let resizing = controller.resize().is_resizing_event(placed.key);
                if response.hovered() || hovered_handle.is_some() || resizing {
                    let (primary, _) = event_colors(&placed.event);
                    draw_handles(ui, &handles, hovered_handle, primary);
                }

                if let Some(handle) = hovered_handle {
                    ui.output_mut(|out| out.cursor_icon = handle.cursor_icon());
                } else if response.hovered() && placed.event.draggable {
                    ui.output_mut(|out| out.cursor_icon = CursorIcon::Grab);
                }

                if response.drag_started() {
                    if let Some(pos) = response.interact_pointer_pos() {
                        match handles.hit_test(pos) {
                            Some(handle) => {
                                actions.push(ViewAction::BeginResize(placed.key, handle, pos.x))
                            }
                            None => actions.push(ViewAction::BeginDrag(placed.key, pos.x)),
                        }
                    }
                }

                if response.clicked() {
                    actions.push(ViewAction::ClickEvent(placed.key));
                }

                if !placed.event.actions.is_empty() {
                    response.context_menu(|ui| {
                        for (index, action) in placed.event.actions.iter().enumerate() {
                            if ui.button(&action.label).clicked() {
                                actions.push(ViewAction::ClickAction(placed.key, index));
                                ui.close_menu();
                            }
                        }
                    });
                }
            }
        }

        (geometry, actions)
    }

    fn paint_event(ui: &egui::Ui, calendar_rect: Rect, rect: Rect, placed: &PlacedEvent) {
        let (primary, secondary) = event_colors(&placed.event);

        // Clipped edges are drawn square
        let left_radius = if placed.starts_before_period { 0.0 } else { 4.0 };
        let right_radius = if placed.ends_after_period { 0.0 } else { 4.0 };
        let rounding = Rounding {
            nw: left_radius,
            sw: left_radius,
            ne: right_radius,
            se: right_radius,
        };

        let painter = ui.painter_at(calendar_rect);
        painter.rect_filled(rect, rounding, secondary);
        painter.rect_stroke(rect, rounding, Stroke::new(1.0, primary));

        ui.painter_at(rect.intersect(calendar_rect).shrink2(Vec2::new(6.0, 0.0))).text(
            Pos2::new(rect.left() + 8.0, rect.center().y),
            Align2::LEFT_CENTER,
            &placed.event.title,
            FontId::proportional(12.0),
            primary,
        );
    }

    /// Feed pointer movement and release into the active gesture.
    fn track_gesture(ui: &egui::Ui, controller: &mut WeekViewController, geometry: &FrameGeometry) {
        if !controller.is_gesture_active() {
            return;
        }

        let (pointer, released, escape) = ui.input(|i| {
            (
                i.pointer.latest_pos(),
                i.pointer.primary_released(),
                i.key_pressed(egui::Key::Escape),
            )
        });

        if escape {
            controller.cancel_gesture();
            return;
        }

        let Some(pos) = pointer else {
            return;
        };
        if released {
            controller.pointer_up(pos, geometry);
        } else {
            let cursor = match controller.resize().active() {
                Some(ctx) => ctx.handle.cursor_icon(),
                None => CursorIcon::Grabbing,
            };
            controller.pointer_move(pos.x, geometry);
            ui.output_mut(|out| out.cursor_icon = cursor);
            ui.ctx().request_repaint();
        }
    }

    fn handle_external_drop(
        ui: &egui::Ui,
        controller: &mut WeekViewController,
        external_events: &[CalendarEvent],
        geometry: &FrameGeometry,
    ) {
        let Some(payload) = egui::DragAndDrop::payload::<ExternalEventPayload>(ui.ctx()) else {
            return;
        };
        let (pointer, released) =
            ui.input(|i| (i.pointer.latest_pos(), i.pointer.any_released()));
        if !released {
            return;
        }

        if let (Some(pos), Some(event)) = (pointer, external_events.get(payload.index)) {
            egui::DragAndDrop::clear_payload(ui.ctx());
            controller.drop_external(event, pos, geometry);
        }
    }
}
