//! Pointer delta snapping.
//!
//! Converts horizontal pixel deltas into whole day or hour units of the week
//! grid. A non-positive or non-finite column width means the geometry is not
//! usable yet, and every conversion then yields zero.

use chrono::Duration;

pub const HOURS_PER_DAY: f32 = 24.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SnapMode {
    /// One unit is a whole day column
    Day,
    /// One unit is a 24th of a day column
    Hour,
}

impl SnapMode {
    pub fn unit_duration(&self) -> Duration {
        match self {
            SnapMode::Day => Duration::days(1),
            SnapMode::Hour => Duration::hours(1),
        }
    }

    pub fn unit_minutes(&self) -> i64 {
        self.unit_duration().num_minutes()
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SnapCalculator {
    column_width: f32,
}

impl SnapCalculator {
    pub fn new(column_width: f32) -> Self {
        Self { column_width }
    }

    pub fn column_width(&self) -> f32 {
        self.column_width
    }

    fn is_valid(&self) -> bool {
        self.column_width.is_finite() && self.column_width > 0.0
    }

    /// Width in pixels of one unit of `mode`, or `None` for unusable geometry.
    pub fn unit_width(&self, mode: SnapMode) -> Option<f32> {
        if !self.is_valid() {
            return None;
        }
        Some(match mode {
            SnapMode::Day => self.column_width,
            SnapMode::Hour => self.column_width / HOURS_PER_DAY,
        })
    }

    /// Visual delta for the live preview.
    ///
    /// Snapped deltas land on the nearest whole unit (halves round away from
    /// zero); unsnapped deltas pass through untouched.
    pub fn snap(&self, delta: f32, mode: SnapMode, enabled: bool) -> f32 {
        let Some(unit) = self.unit_width(mode) else {
            return 0.0;
        };
        if !delta.is_finite() {
            return 0.0;
        }
        if enabled {
            (delta / unit).round() * unit
        } else {
            delta
        }
    }

    /// Whole units to commit for `delta`, regardless of preview snapping.
    pub fn units(&self, delta: f32, mode: SnapMode) -> i64 {
        match self.unit_width(mode) {
            Some(unit) if delta.is_finite() => (delta / unit).round() as i64,
            _ => 0,
        }
    }

    /// Pixel width of `units` whole units.
    pub fn to_pixels(&self, units: i64, mode: SnapMode) -> f32 {
        self.unit_width(mode)
            .map(|unit| units as f32 * unit)
            .unwrap_or(0.0)
    }
}
