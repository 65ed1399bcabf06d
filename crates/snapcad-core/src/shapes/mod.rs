//! Shape definitions for the canvas.

mod circle;
mod line;
mod polygon;
mod rectangle;

pub use circle::Circle;
pub use line::Line;
pub use polygon::{MIN_POLYGON_VERTICES, Polygon};
pub use rectangle::Rectangle;

use kurbo::{BezPath, Point, Rect, Vec2};
use peniko::Color;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for shapes.
pub type ShapeId = Uuid;

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn black() -> Self {
        Self::new(0, 0, 0, 255)
    }
}

impl From<Color> for Rgba {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<Rgba> for Color {
    fn from(color: Rgba) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// Style properties for shapes. Read-only to the engine; set by tooling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShapeStyle {
    /// Stroke color.
    pub stroke_color: Rgba,
    /// Stroke width in world units.
    pub stroke_width: f64,
}

impl ShapeStyle {
    /// Get the stroke color as a peniko Color.
    pub fn stroke(&self) -> Color {
        self.stroke_color.into()
    }
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self {
            stroke_color: Rgba::black(),
            stroke_width: 2.0,
        }
    }
}

/// Distance from a point to a line segment (a->b).
pub fn point_to_segment_dist(point: Point, a: Point, b: Point) -> f64 {
    let seg = Vec2::new(b.x - a.x, b.y - a.y);
    let pv = Vec2::new(point.x - a.x, point.y - a.y);
    let len_sq = seg.hypot2();
    if len_sq < f64::EPSILON {
        return pv.hypot();
    }
    let t = (pv.dot(seg) / len_sq).clamp(0.0, 1.0);
    let proj = Point::new(a.x + t * seg.x, a.y + t * seg.y);
    point.distance(proj)
}

/// Minimum distance from a point to a polyline (sequence of connected segments).
pub fn point_to_polyline_dist(point: Point, points: &[Point]) -> f64 {
    points
        .windows(2)
        .map(|w| point_to_segment_dist(point, w[0], w[1]))
        .fold(f64::INFINITY, f64::min)
}

/// Test if two line segments (a-b) and (c-d) intersect.
pub(crate) fn segments_intersect(a: Point, b: Point, c: Point, d: Point) -> bool {
    let cross = |o: Point, p: Point, q: Point| -> f64 {
        (p.x - o.x) * (q.y - o.y) - (p.y - o.y) * (q.x - o.x)
    };
    let d1 = cross(c, d, a);
    let d2 = cross(c, d, b);
    let d3 = cross(a, b, c);
    let d4 = cross(a, b, d);
    if ((d1 > 0.0 && d2 < 0.0) || (d1 < 0.0 && d2 > 0.0))
        && ((d3 > 0.0 && d4 < 0.0) || (d3 < 0.0 && d4 > 0.0))
    {
        return true;
    }
    // Collinear cases: check if an endpoint lies on the other segment
    let on_segment = |p: Point, q: Point, r: Point| -> bool {
        r.x >= p.x.min(q.x) && r.x <= p.x.max(q.x) && r.y >= p.y.min(q.y) && r.y <= p.y.max(q.y)
    };
    (d1.abs() < 1e-10 && on_segment(c, d, a))
        || (d2.abs() < 1e-10 && on_segment(c, d, b))
        || (d3.abs() < 1e-10 && on_segment(a, b, c))
        || (d4.abs() < 1e-10 && on_segment(a, b, d))
}

/// Test if any segment of a polyline crosses or is inside a rectangle.
pub(crate) fn polyline_intersects_rect(points: &[Point], rect: Rect) -> bool {
    if points.iter().any(|p| rect.contains(*p)) {
        return true;
    }
    let corners = [
        Point::new(rect.x0, rect.y0),
        Point::new(rect.x1, rect.y0),
        Point::new(rect.x1, rect.y1),
        Point::new(rect.x0, rect.y1),
    ];
    let edges = [
        (corners[0], corners[1]),
        (corners[1], corners[2]),
        (corners[2], corners[3]),
        (corners[3], corners[0]),
    ];
    for w in points.windows(2) {
        for &(c, d) in &edges {
            if segments_intersect(w[0], w[1], c, d) {
                return true;
            }
        }
    }
    false
}

/// Enum over all shape variants. Geometry queries dispatch on the tag;
/// mutations are expressed as immutable updates so commands can snapshot
/// shapes by value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Line(Line),
    Rectangle(Rectangle),
    Circle(Circle),
    Polygon(Polygon),
}

impl Shape {
    pub fn id(&self) -> ShapeId {
        match self {
            Shape::Line(s) => s.id,
            Shape::Rectangle(s) => s.id,
            Shape::Circle(s) => s.id,
            Shape::Polygon(s) => s.id,
        }
    }

    /// Axis-aligned bounding box in world coordinates.
    pub fn bounds(&self) -> Rect {
        match self {
            Shape::Line(s) => s.bounds(),
            Shape::Rectangle(s) => s.bounds(),
            Shape::Circle(s) => s.bounds(),
            Shape::Polygon(s) => s.bounds(),
        }
    }

    /// Edge-only hit test: shapes are stroke-rendered, so clicking near the
    /// outline selects, clicking the hollow interior does not.
    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        match self {
            Shape::Line(s) => s.hit_test(point, tolerance),
            Shape::Rectangle(s) => s.hit_test(point, tolerance),
            Shape::Circle(s) => s.hit_test(point, tolerance),
            Shape::Polygon(s) => s.hit_test(point, tolerance),
        }
    }

    /// Test intersection with a rubber-band rectangle.
    pub fn intersects_rect(&self, rect: Rect) -> bool {
        match self {
            Shape::Line(s) => s.intersects_rect(rect),
            Shape::Rectangle(s) => s.intersects_rect(rect),
            Shape::Circle(s) => s.intersects_rect(rect),
            Shape::Polygon(s) => s.intersects_rect(rect),
        }
    }

    /// The ordered control points of this shape. Semantics vary by variant:
    /// two endpoints for Line, two opposite corners for Rectangle,
    /// center then radius point for Circle, vertices for Polygon.
    pub fn control_points(&self) -> Vec<Point> {
        match self {
            Shape::Line(s) => vec![s.start, s.end],
            Shape::Rectangle(s) => vec![s.corner, s.opposite],
            Shape::Circle(s) => vec![s.center, s.edge],
            Shape::Polygon(s) => s.vertices.clone(),
        }
    }

    /// A copy with every control point offset by `delta`.
    pub fn translated(&self, delta: Vec2) -> Shape {
        match self {
            Shape::Line(s) => Shape::Line(s.translated(delta)),
            Shape::Rectangle(s) => Shape::Rectangle(s.translated(delta)),
            Shape::Circle(s) => Shape::Circle(s.translated(delta)),
            Shape::Polygon(s) => Shape::Polygon(s.translated(delta)),
        }
    }

    /// A copy with the control point at `index` replaced by `point`.
    /// An out-of-range index leaves the shape unchanged.
    pub fn with_point(&self, index: usize, point: Point) -> Shape {
        let mut shape = self.clone();
        match &mut shape {
            Shape::Line(s) => match index {
                0 => s.start = point,
                1 => s.end = point,
                _ => {}
            },
            Shape::Rectangle(s) => match index {
                0 => s.corner = point,
                1 => s.opposite = point,
                _ => {}
            },
            Shape::Circle(s) => match index {
                0 => s.center = point,
                1 => s.edge = point,
                _ => {}
            },
            Shape::Polygon(s) => {
                if let Some(v) = s.vertices.get_mut(index) {
                    *v = point;
                }
            }
        }
        shape
    }

    /// Path representation for rendering.
    pub fn to_path(&self) -> BezPath {
        match self {
            Shape::Line(s) => s.to_path(),
            Shape::Rectangle(s) => s.to_path(),
            Shape::Circle(s) => s.to_path(),
            Shape::Polygon(s) => s.to_path(),
        }
    }

    pub fn style(&self) -> &ShapeStyle {
        match self {
            Shape::Line(s) => &s.style,
            Shape::Rectangle(s) => &s.style,
            Shape::Circle(s) => &s.style,
            Shape::Polygon(s) => &s.style,
        }
    }

    pub fn style_mut(&mut self) -> &mut ShapeStyle {
        match self {
            Shape::Line(s) => &mut s.style,
            Shape::Rectangle(s) => &mut s.style,
            Shape::Circle(s) => &mut s.style,
            Shape::Polygon(s) => &mut s.style,
        }
    }
}
