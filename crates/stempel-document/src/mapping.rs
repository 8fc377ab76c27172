// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Coordinate mapping between preview (display) space and document space.

use stempel_core::{Point, Rect, Size};

/// Converts geometry between the on-screen preview and the full-resolution
/// document.
///
/// Display positions are measured in the edit viewport; `preview_origin` is
/// where the preview's top-left corner sits in that viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateMapper {
    pub preview_origin: Point,
    pub scale_x: f64,
    pub scale_y: f64,
}

impl CoordinateMapper {
    pub fn new(preview_origin: Point, scale_x: f64, scale_y: f64) -> Self {
        Self {
            preview_origin,
            scale_x,
            scale_y,
        }
    }

    /// Display position → document position, truncated toward zero.
    pub fn position_to_document(&self, display: Point) -> Point {
        let rel = display - self.preview_origin;
        Point::new(
            (rel.x as f64 * self.scale_x) as i32,
            (rel.y as f64 * self.scale_y) as i32,
        )
    }

    /// Display size → document size, truncated toward zero.
    pub fn size_to_document(&self, display: Size) -> Size {
        Size::new(
            (display.width as f64 * self.scale_x) as u32,
            (display.height as f64 * self.scale_y) as u32,
        )
    }

    pub fn to_document(&self, display: Rect) -> Rect {
        Rect::new(
            self.position_to_document(display.origin),
            self.size_to_document(display.size),
        )
    }

    /// Document rectangle → display rectangle, rounded to the nearest pixel.
    pub fn to_display(&self, document: Rect) -> Rect {
        let origin = Point::new(
            (document.origin.x as f64 / self.scale_x).round() as i32,
            (document.origin.y as f64 / self.scale_y).round() as i32,
        ) + self.preview_origin;
        let size = Size::new(
            (document.size.width as f64 / self.scale_x).round() as u32,
            (document.size.height as f64 / self.scale_y).round() as u32,
        );
        Rect::new(origin, size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn within_one(a: i64, b: i64) -> bool {
        (a - b).abs() <= 1
    }

    #[test]
    fn scenario_stamp_maps_to_about_200px() {
        let mapper = CoordinateMapper::new(Point::ORIGIN, 1000.0 / 600.0, 1414.0 / 848.0);
        let size = mapper.size_to_document(Size::new(120, 120));
        assert!(within_one(size.width as i64, 200), "{size}");
        assert!(within_one(size.height as i64, 200), "{size}");
    }

    #[test]
    fn position_is_relative_to_preview_origin() {
        let mapper = CoordinateMapper::new(Point::new(50, 10), 2.0, 3.0);
        assert_eq!(mapper.position_to_document(Point::new(50, 10)), Point::ORIGIN);
        assert_eq!(mapper.position_to_document(Point::new(60, 20)), Point::new(20, 30));
    }

    #[test]
    fn left_of_preview_truncates_toward_zero() {
        let mapper = CoordinateMapper::new(Point::new(10, 10), 1.5, 1.5);
        // -3 * 1.5 = -4.5 -> -4
        assert_eq!(mapper.position_to_document(Point::new(7, 7)), Point::new(-4, -4));
    }

    #[test]
    fn round_trip_within_one_pixel() {
        let scales = [(1.0, 1.0), (1000.0 / 600.0, 1414.0 / 848.0), (4.2, 3.9), (2480.0 / 600.0, 3508.0 / 848.0)];
        let origins = [Point::ORIGIN, Point::new(37, 12), Point::new(-5, 80)];
        for &(sx, sy) in &scales {
            for &origin in &origins {
                let mapper = CoordinateMapper::new(origin, sx, sy);
                for (x, y, w, h) in [(0, 0, 1, 1), (13, 250, 120, 120), (599, 847, 33, 7), (-20, 4, 60, 24)] {
                    let display = Rect::new(origin + Point::new(x, y), Size::new(w, h));
                    let back = mapper.to_display(mapper.to_document(display));
                    assert!(within_one(back.origin.x as i64, display.origin.x as i64), "{display:?} -> {back:?}");
                    assert!(within_one(back.origin.y as i64, display.origin.y as i64), "{display:?} -> {back:?}");
                    assert!(within_one(back.size.width as i64, display.size.width as i64), "{display:?} -> {back:?}");
                    assert!(within_one(back.size.height as i64, display.size.height as i64), "{display:?} -> {back:?}");
                }
            }
        }
    }
}
