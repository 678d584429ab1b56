//! Pixel geometry of the rendered week grid.
//!
//! The gesture controllers only see the grid through [`GeometryProvider`],
//! so they can be driven by the egui front end or by a fake in tests.

use std::collections::HashMap;

use egui::{Pos2, Rect};

use crate::models::event::EventKey;

/// Element of the rendered grid whose bounding box can be queried.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ElementRef {
    /// The whole calendar surface
    Calendar,
    /// Header cell of the visible day at this index
    DayHeader(usize),
    Event(EventKey),
}

#[cfg_attr(test, mockall::automock)]
pub trait GeometryProvider {
    /// Width of one visible day column in pixels.
    fn column_width(&self) -> f32;

    /// Bounding box of a rendered element, `None` when it is not on screen.
    fn bounding_box_of(&self, element: ElementRef) -> Option<Rect>;
}

/// Index of the day header under `pointer`, checking the first `header_count` headers.
pub fn header_at(
    geometry: &dyn GeometryProvider,
    header_count: usize,
    pointer: Pos2,
) -> Option<usize> {
    (0..header_count).find(|&index| {
        geometry
            .bounding_box_of(ElementRef::DayHeader(index))
            .map_or(false, |rect| rect.contains(pointer))
    })
}

/// Geometry captured while laying out one frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameGeometry {
    pub column_width: f32,
    pub calendar: Option<Rect>,
    pub headers: Vec<Rect>,
    pub events: HashMap<EventKey, Rect>,
}

impl FrameGeometry {
    /// Evenly split `calendar` into `columns` header cells of `header_height`.
    pub fn for_calendar(calendar: Rect, columns: usize, header_height: f32) -> Self {
        let column_width = if columns == 0 {
            0.0
        } else {
            calendar.width() / columns as f32
        };
        let headers = (0..columns)
            .map(|index| {
                Rect::from_min_size(
                    Pos2::new(calendar.left() + index as f32 * column_width, calendar.top()),
                    egui::vec2(column_width, header_height),
                )
            })
            .collect();

        Self {
            column_width,
            calendar: Some(calendar),
            headers,
            events: HashMap::new(),
        }
    }
}

impl GeometryProvider for FrameGeometry {
    fn column_width(&self) -> f32 {
        self.column_width
    }

    fn bounding_box_of(&self, element: ElementRef) -> Option<Rect> {
        match element {
            ElementRef::Calendar => self.calendar,
            ElementRef::DayHeader(index) => self.headers.get(index).copied(),
            ElementRef::Event(key) => self.events.get(&key).copied(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn calendar() -> Rect {
        Rect::from_min_size(Pos2::new(0.0, 0.0), egui::vec2(700.0, 400.0))
    }

    #[test]
    fn test_frame_geometry_splits_columns() {
        let geometry = FrameGeometry::for_calendar(calendar(), 7, 40.0);
        assert_eq!(geometry.column_width(), 100.0);
        let third = geometry.bounding_box_of(ElementRef::DayHeader(2)).unwrap();
        assert_eq!(third.left(), 200.0);
        assert_eq!(third.height(), 40.0);
        assert!(geometry.bounding_box_of(ElementRef::DayHeader(7)).is_none());
    }

    #[test]
    fn test_empty_grid_has_zero_width_columns() {
        let geometry = FrameGeometry::for_calendar(calendar(), 0, 40.0);
        assert_eq!(geometry.column_width(), 0.0);
        assert!(geometry.headers.is_empty());
    }

    #[test]
    fn test_header_hit_testing() {
        let geometry = FrameGeometry::for_calendar(calendar(), 7, 40.0);
        assert_eq!(header_at(&geometry, 7, Pos2::new(250.0, 10.0)), Some(2));
        assert_eq!(header_at(&geometry, 7, Pos2::new(250.0, 100.0)), None);
        assert_eq!(header_at(&geometry, 7, Pos2::new(-5.0, 10.0)), None);
    }

    #[test]
    fn test_header_hit_testing_with_mock() {
        let mut mock = MockGeometryProvider::new();
        mock.expect_bounding_box_of().returning(|element| match element {
            ElementRef::DayHeader(1) => Some(Rect::from_min_size(
                Pos2::new(10.0, 0.0),
                egui::vec2(10.0, 10.0),
            )),
            _ => None,
        });
        assert_eq!(header_at(&mock, 3, Pos2::new(15.0, 5.0)), Some(1));
    }
}
