//! Screen geometry for the docked widget and its companion surfaces.
//!
//! Everything in here is pure: rectangles come in fresh from the windowing
//! host on every query and positions go back out. Nothing is cached.
//!
//! - `Rect`, `Point`, `Size` - plain value types in screen coordinates
//! - [`edge`] - nearest-edge snapping, docked positions and companion placement

pub mod edge;

use serde::{Deserialize, Serialize};

pub use edge::{
    Axis, Edge, EdgeSpec, Side, docked_position, nearest_edge, place_relative_to,
};

// ============================================================================
// Point
// ============================================================================

/// A position in screen coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Create a new point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self { Self { x, y } }

    /// Returns the coordinate on the given axis.
    #[must_use]
    pub const fn along(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => self.x,
            Axis::Vertical => self.y,
        }
    }

    /// Builds a point from a coordinate on `axis` and one on the other axis.
    #[must_use]
    pub const fn from_axes(axis: Axis, main: f64, cross: f64) -> Self {
        match axis {
            Axis::Horizontal => Self::new(main, cross),
            Axis::Vertical => Self::new(cross, main),
        }
    }

    /// Returns the point with its coordinate on `axis` replaced.
    #[must_use]
    pub const fn with_along(self, axis: Axis, value: f64) -> Self {
        Self::from_axes(axis, value, self.along(axis.cross()))
    }

    /// Replaces non-finite coordinates with zero.
    #[must_use]
    pub const fn sanitized(self) -> Self {
        Self::new(finite_or_zero(self.x), finite_or_zero(self.y))
    }

    /// Rounds both coordinates to whole pixels.
    #[must_use]
    pub fn rounded(self) -> Self { Self::new(self.x.round(), self.y.round()) }

    /// Offsets the point by a delta.
    #[must_use]
    pub fn offset(self, dx: f64, dy: f64) -> Self { Self::new(self.x + dx, self.y + dy) }
}

// ============================================================================
// Size
// ============================================================================

/// A width/height pair.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    /// Create a new size.
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self { Self { width, height } }

    /// A square of the given side.
    #[must_use]
    pub const fn square(side: f64) -> Self { Self::new(side, side) }

    /// Returns the extent on the given axis.
    #[must_use]
    pub const fn along(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => self.width,
            Axis::Vertical => self.height,
        }
    }
}

// ============================================================================
// Rect
// ============================================================================

/// A rectangle with position and size.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Create a new rectangle.
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Create a rectangle from an origin and a size.
    #[must_use]
    pub const fn from_parts(origin: Point, size: Size) -> Self {
        Self::new(origin.x, origin.y, size.width, size.height)
    }

    /// Create a zero-sized rectangle at origin.
    #[must_use]
    pub const fn zero() -> Self { Self::new(0.0, 0.0, 0.0, 0.0) }

    /// The top-left corner.
    #[must_use]
    pub const fn origin(&self) -> Point { Point::new(self.x, self.y) }

    /// The width and height.
    #[must_use]
    pub const fn size(&self) -> Size { Size::new(self.width, self.height) }

    /// Get the center point of this rectangle.
    #[must_use]
    pub fn center(&self) -> Point { Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0) }

    /// Returns the same rectangle moved to `origin`.
    #[must_use]
    pub const fn with_origin(self, origin: Point) -> Self {
        Self::from_parts(origin, self.size())
    }

    /// Near coordinate on the given axis (left or top).
    #[must_use]
    pub const fn start(&self, axis: Axis) -> f64 { self.origin().along(axis) }

    /// Extent on the given axis (width or height).
    #[must_use]
    pub const fn extent(&self, axis: Axis) -> f64 { self.size().along(axis) }

    /// Far coordinate on the given axis (right or bottom).
    #[must_use]
    pub fn end(&self, axis: Axis) -> f64 { self.start(axis) + self.extent(axis) }

    /// Top-left position that puts a `size` surface at the center of this rectangle.
    #[must_use]
    pub fn centered(&self, size: Size) -> Point {
        Point::new(
            self.x + self.width / 2.0 - size.width / 2.0,
            self.y + self.height / 2.0 - size.height / 2.0,
        )
    }

    /// Clamps a coordinate so that a span of `size` fits inside this rectangle on `axis`.
    ///
    /// When the span is larger than the rectangle the result collapses to the
    /// rectangle's near side.
    #[must_use]
    pub fn clamp_span(&self, axis: Axis, value: f64, size: f64) -> f64 {
        let low = self.start(axis);
        let high = self.end(axis) - size;
        value.min(high).max(low)
    }

    /// Clamps a top-left position so that a `size` surface stays fully inside.
    #[must_use]
    pub fn clamp_origin(&self, origin: Point, size: Size) -> Point {
        Point::new(
            self.clamp_span(Axis::Horizontal, origin.x, size.width),
            self.clamp_span(Axis::Vertical, origin.y, size.height),
        )
    }
}

const fn finite_or_zero(value: f64) -> f64 { if value.is_finite() { value } else { 0.0 } }

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_sanitized_replaces_non_finite() {
        let point = Point::new(f64::NAN, f64::INFINITY).sanitized();
        assert_eq!(point, Point::new(0.0, 0.0));

        let finite = Point::new(12.5, -3.0).sanitized();
        assert_eq!(finite, Point::new(12.5, -3.0));
    }

    #[test]
    fn test_point_rounded() {
        assert_eq!(Point::new(10.4, 10.6).rounded(), Point::new(10.0, 11.0));
    }

    #[test]
    fn test_point_axes() {
        let p = Point::from_axes(Axis::Vertical, 5.0, 7.0);
        assert_eq!(p, Point::new(7.0, 5.0));
        assert!((p.along(Axis::Vertical) - 5.0).abs() < f64::EPSILON);

        assert_eq!(p.with_along(Axis::Horizontal, 1.0), Point::new(1.0, 5.0));
        assert_eq!(p.with_along(Axis::Vertical, 1.0), Point::new(7.0, 1.0));
    }

    #[test]
    fn test_rect_center_and_centered() {
        let screen = Rect::new(0.0, 0.0, 1920.0, 1080.0);
        assert_eq!(screen.center(), Point::new(960.0, 540.0));
        assert_eq!(screen.centered(Size::new(300.0, 200.0)), Point::new(810.0, 440.0));
    }

    #[test]
    fn test_rect_clamp_origin() {
        let screen = Rect::new(0.0, 0.0, 1920.0, 1080.0);
        let size = Size::new(400.0, 300.0);

        assert_eq!(screen.clamp_origin(Point::new(-50.0, 900.0), size), Point::new(0.0, 780.0));
        assert_eq!(screen.clamp_origin(Point::new(100.0, 100.0), size), Point::new(100.0, 100.0));
    }

    #[test]
    fn test_rect_clamp_collapses_when_too_large() {
        let screen = Rect::new(0.0, 0.0, 200.0, 100.0);
        let origin = screen.clamp_origin(Point::new(50.0, 50.0), Size::new(400.0, 300.0));
        assert_eq!(origin, Point::new(0.0, 0.0));
    }

    #[test]
    fn test_rect_axis_accessors() {
        let rect = Rect::new(10.0, 20.0, 30.0, 40.0);
        assert!((rect.end(Axis::Horizontal) - 40.0).abs() < f64::EPSILON);
        assert!((rect.end(Axis::Vertical) - 60.0).abs() < f64::EPSILON);
        assert!((rect.extent(Axis::Vertical) - 40.0).abs() < f64::EPSILON);
    }
}
