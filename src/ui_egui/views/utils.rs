//! Common utility functions for the week view.
//!
//! Pure helpers for turning event data into paintable values.

use egui::Color32;

use crate::models::event::{CalendarEvent, DEFAULT_PRIMARY_COLOR, DEFAULT_SECONDARY_COLOR};

/// Parse a hex color string to Color32.
///
/// # Arguments
/// * `hex` - A hex color string, optionally prefixed with '#' (e.g., "#FF5500" or "FF5500")
///
/// # Returns
/// * `Some(Color32)` if parsing succeeds
/// * `None` if the input is empty or invalid
pub fn parse_color(hex: &str) -> Option<Color32> {
    if hex.is_empty() {
        return None;
    }

    let hex = hex.trim_start_matches('#');
    if hex.len() != 6 {
        return None;
    }

    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;

    Some(Color32::from_rgb(r, g, b))
}

/// Border/text and fill colors of an event, falling back to the defaults
/// for colors that do not parse.
pub fn event_colors(event: &CalendarEvent) -> (Color32, Color32) {
    let fallback = |hex: &str| parse_color(hex).unwrap_or(Color32::from_rgb(100, 150, 200));
    let primary = parse_color(&event.color.primary)
        .unwrap_or_else(|| fallback(DEFAULT_PRIMARY_COLOR));
    let secondary = parse_color(&event.color.secondary)
        .unwrap_or_else(|| fallback(DEFAULT_SECONDARY_COLOR));
    (primary, secondary)
}

/// Generate a tooltip string for an event.
pub fn format_event_tooltip(event: &CalendarEvent) -> String {
    let mut lines = vec![event.title.clone()];

    let start = event.start.format("%a %b %-d, %H:%M");
    match event.end {
        Some(end) if end.date() == event.start.date() => {
            lines.push(format!("{} - {}", start, end.format("%H:%M")));
        }
        Some(end) => lines.push(format!("{} - {}", start, end.format("%a %b %-d, %H:%M"))),
        None => lines.push(start.to_string()),
    }

    if event.draggable {
        lines.push("Drag to move".to_string());
    }
    if !event.actions.is_empty() {
        lines.push("Right-click for actions".to_string());
    }

    lines.join("\n")
}
