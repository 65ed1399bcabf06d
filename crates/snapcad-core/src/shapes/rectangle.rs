//! Rectangle shape.

use super::{ShapeId, ShapeStyle};
use kurbo::{BezPath, Point, Rect, Shape as KurboShape, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A rectangle defined by two opposite corners.
///
/// The corners are stored unnormalized so that dragging one corner during a
/// reshape keeps a stable control-point index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    pub(crate) id: ShapeId,
    /// Anchor corner (placed first when drawing).
    pub corner: Point,
    /// Opposite corner.
    pub opposite: Point,
    /// Style properties.
    pub style: ShapeStyle,
}

impl Rectangle {
    /// Create a new rectangle from two opposite corners.
    pub fn new(corner: Point, opposite: Point) -> Self {
        Self {
            id: Uuid::new_v4(),
            corner,
            opposite,
            style: ShapeStyle::default(),
        }
    }

    /// Get the normalized kurbo Rect.
    pub fn as_rect(&self) -> Rect {
        Rect::from_points(self.corner, self.opposite)
    }

    pub fn width(&self) -> f64 {
        (self.opposite.x - self.corner.x).abs()
    }

    pub fn height(&self) -> f64 {
        (self.opposite.y - self.corner.y).abs()
    }

    pub fn bounds(&self) -> Rect {
        self.as_rect()
    }

    /// Outline-only hit test: inside the inflated rect but outside the
    /// deflated one.
    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        let rect = self.as_rect();
        let band = tolerance + self.style.stroke_width / 2.0;
        let outer = rect.inflate(band, band);
        let inner = rect.inflate(-band, -band);
        let has_interior = inner.width() > 0.0 && inner.height() > 0.0;
        outer.contains(point) && !(has_interior && inner.contains(point))
    }

    pub fn intersects_rect(&self, rect: Rect) -> bool {
        let own = self.as_rect();
        own.x1 >= rect.x0 && own.x0 <= rect.x1 && own.y1 >= rect.y0 && own.y0 <= rect.y1
    }

    pub fn translated(&self, delta: Vec2) -> Self {
        Self {
            corner: self.corner + delta,
            opposite: self.opposite + delta,
            ..self.clone()
        }
    }

    pub fn to_path(&self) -> BezPath {
        self.as_rect().to_path(0.1)
    }
}
