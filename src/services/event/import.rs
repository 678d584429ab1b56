// JSON event import
//
// Each record is read on its own, so one bad record never hides the others.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;
use thiserror::Error;

use crate::models::event::{CalendarEvent, EventColor, Resizable};
use crate::utils::date::start_of_day;

const DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";
const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EventImportError {
    #[error("record is not a valid event: {0}")]
    Malformed(String),
    #[error("invalid {field} timestamp {value:?}, expected YYYY-MM-DDTHH:MM:SS or YYYY-MM-DD")]
    InvalidTimestamp { field: &'static str, value: String },
}

/// A record left out of the import.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportDiagnostic {
    /// Position of the record in the JSON array
    pub index: usize,
    pub error: EventImportError,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportReport {
    pub events: Vec<CalendarEvent>,
    pub diagnostics: Vec<ImportDiagnostic>,
}

#[derive(Debug, Deserialize)]
struct RawColor {
    primary: String,
    secondary: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawResizable {
    before_start: bool,
    after_end: bool,
}

#[derive(Debug, Deserialize)]
struct RawEvent {
    #[serde(default)]
    title: String,
    start: String,
    #[serde(default)]
    end: Option<String>,
    #[serde(default)]
    color: Option<RawColor>,
    #[serde(default)]
    draggable: bool,
    #[serde(default)]
    resizable: RawResizable,
    #[serde(default)]
    css_class: Option<String>,
}

fn parse_timestamp(field: &'static str, value: &str) -> Result<NaiveDateTime, EventImportError> {
    NaiveDateTime::parse_from_str(value, DATE_TIME_FORMAT)
        .or_else(|_| NaiveDate::parse_from_str(value, DATE_FORMAT).map(start_of_day))
        .map_err(|_| EventImportError::InvalidTimestamp {
            field,
            value: value.to_string(),
        })
}

impl RawEvent {
    fn into_event(self) -> Result<CalendarEvent, EventImportError> {
        let start = parse_timestamp("start", &self.start)?;
        let end = self
            .end
            .as_deref()
            .map(|end| parse_timestamp("end", end))
            .transpose()?;

        Ok(CalendarEvent {
            title: self.title,
            start,
            end,
            color: self
                .color
                .map(|color| EventColor::new(color.primary, color.secondary))
                .unwrap_or_default(),
            draggable: self.draggable,
            resizable: Resizable {
                before_start: self.resizable.before_start,
                after_end: self.resizable.after_end,
            },
            css_class: self.css_class,
            actions: Vec::new(),
        })
    }
}

/// Import events from a JSON array of event records.
///
/// Fails only when the document itself is not a JSON array.
pub fn import_events_json(json: &str) -> Result<ImportReport> {
    let records: Vec<serde_json::Value> =
        serde_json::from_str(json).context("Failed to parse events document")?;

    let mut report = ImportReport::default();
    for (index, record) in records.into_iter().enumerate() {
        let parsed = serde_json::from_value::<RawEvent>(record)
            .map_err(|e| EventImportError::Malformed(e.to_string()))
            .and_then(RawEvent::into_event);

        match parsed {
            Ok(event) => report.events.push(event),
            Err(error) => {
                log::warn!("Skipping event record #{}: {}", index, error);
                report.diagnostics.push(ImportDiagnostic { index, error });
            }
        }
    }

    log::debug!(
        "Imported {} events ({} records skipped)",
        report.events.len(),
        report.diagnostics.len()
    );
    Ok(report)
}

pub fn load_events_from_file(path: &Path) -> Result<ImportReport> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read events file at {}", path.display()))?;
    import_events_json(&contents)
        .with_context(|| format!("Failed to import events from {}", path.display()))
}
