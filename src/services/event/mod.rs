//! Calendar event service entry point.
//! Loads week view events from JSON files, reporting records that cannot be
//! read instead of failing the whole import.

pub mod import;

pub use import::{
    import_events_json, load_events_from_file, EventImportError, ImportDiagnostic, ImportReport,
};
