mod app;
pub mod controller;
pub mod drag;
pub mod external_drop;
pub mod geometry;
pub mod notifications;
pub mod resize;
pub mod views;

pub use app::{demo_events, CalendarApp};
