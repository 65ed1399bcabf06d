//! Circle shape.

use super::{ShapeId, ShapeStyle};
use kurbo::{BezPath, Circle as KurboCircle, Point, Rect, Shape as KurboShape, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A circle defined by its center and a point on its circumference.
///
/// Storing the radius point (rather than a scalar radius) keeps the control
/// points uniform with the other variants, so reshaping drags the same way.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub(crate) id: ShapeId,
    /// Center point.
    pub center: Point,
    /// A point on the circumference.
    pub edge: Point,
    /// Style properties.
    pub style: ShapeStyle,
}

impl Circle {
    /// Create a new circle from a center and a circumference point.
    pub fn new(center: Point, edge: Point) -> Self {
        Self {
            id: Uuid::new_v4(),
            center,
            edge,
            style: ShapeStyle::default(),
        }
    }

    /// Get the radius.
    pub fn radius(&self) -> f64 {
        self.center.distance(self.edge)
    }

    pub fn bounds(&self) -> Rect {
        let r = self.radius();
        Rect::new(
            self.center.x - r,
            self.center.y - r,
            self.center.x + r,
            self.center.y + r,
        )
    }

    /// Edge-only hit test against the circumference, matching stroke
    /// rendering.
    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        let dist = self.center.distance(point);
        (dist - self.radius()).abs() <= tolerance + self.style.stroke_width / 2.0
    }

    pub fn intersects_rect(&self, rect: Rect) -> bool {
        // Closest point on the rect to the center
        let closest = Point::new(
            self.center.x.clamp(rect.x0, rect.x1),
            self.center.y.clamp(rect.y0, rect.y1),
        );
        self.center.distance(closest) <= self.radius()
    }

    pub fn translated(&self, delta: Vec2) -> Self {
        Self {
            center: self.center + delta,
            edge: self.edge + delta,
            ..self.clone()
        }
    }

    pub fn to_path(&self) -> BezPath {
        KurboCircle::new(self.center, self.radius()).to_path(0.1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_radius() {
        let circle = Circle::new(Point::new(0.0, 0.0), Point::new(3.0, 4.0));
        assert!((circle.radius() - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_bounds() {
        let circle = Circle::new(Point::new(10.0, 10.0), Point::new(15.0, 10.0));
        let bounds = circle.bounds();
        assert!((bounds.x0 - 5.0).abs() < f64::EPSILON);
        assert!((bounds.y0 - 5.0).abs() < f64::EPSILON);
        assert!((bounds.x1 - 15.0).abs() < f64::EPSILON);
        assert!((bounds.y1 - 15.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_hit_test_edge_only() {
        let circle = Circle::new(Point::new(0.0, 0.0), Point::new(10.0, 0.0));
        // On the circumference
        assert!(circle.hit_test(Point::new(0.0, 10.0), 1.0));
        // Near the circumference
        assert!(circle.hit_test(Point::new(11.5, 0.0), 1.0));
        // Center is not on the stroke
        assert!(!circle.hit_test(Point::new(0.0, 0.0), 1.0));
    }

    #[test]
    fn test_intersects_rect() {
        let circle = Circle::new(Point::new(0.0, 0.0), Point::new(10.0, 0.0));
        assert!(circle.intersects_rect(Rect::new(5.0, 5.0, 20.0, 20.0)));
        assert!(!circle.intersects_rect(Rect::new(15.0, 15.0, 20.0, 20.0)));
    }
}
