mod palette;
mod utils;
pub mod week_view;

pub use utils::{event_colors, format_event_tooltip, parse_color};
