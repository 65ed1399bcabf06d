//! Polygon shape.

use super::{ShapeId, ShapeStyle, point_to_polyline_dist, polyline_intersects_rect};
use kurbo::{BezPath, Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Minimum number of vertices for a finalized polygon.
pub const MIN_POLYGON_VERTICES: usize = 3;

/// A polygon built vertex by vertex.
///
/// While under construction it may hold fewer than three vertices and is
/// open; once closed it must have at least [`MIN_POLYGON_VERTICES`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    pub(crate) id: ShapeId,
    /// Ordered vertices.
    pub vertices: Vec<Point>,
    /// Whether the outline is closed (finalized).
    pub closed: bool,
    /// Style properties.
    pub style: ShapeStyle,
}

impl Polygon {
    /// Start a new open polygon from its first vertex.
    pub fn new(first: Point) -> Self {
        Self {
            id: Uuid::new_v4(),
            vertices: vec![first],
            closed: false,
            style: ShapeStyle::default(),
        }
    }

    /// Create a closed polygon from a full vertex list.
    /// Returns None for fewer than [`MIN_POLYGON_VERTICES`] vertices.
    pub fn closed_from_vertices(vertices: Vec<Point>) -> Option<Self> {
        if vertices.len() < MIN_POLYGON_VERTICES {
            return None;
        }
        Some(Self {
            id: Uuid::new_v4(),
            vertices,
            closed: true,
            style: ShapeStyle::default(),
        })
    }

    /// Append a vertex to an open polygon.
    pub fn append_vertex(&mut self, vertex: Point) {
        self.vertices.push(vertex);
    }

    /// Close the outline. Returns false (leaving the polygon open) when it
    /// has fewer than [`MIN_POLYGON_VERTICES`] vertices.
    pub fn close(&mut self) -> bool {
        if self.vertices.len() < MIN_POLYGON_VERTICES {
            return false;
        }
        self.closed = true;
        true
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Vertices with the closing segment appended when the outline is closed.
    fn outline(&self) -> Vec<Point> {
        let mut pts = self.vertices.clone();
        if self.closed && self.vertices.len() > 1 {
            pts.push(self.vertices[0]);
        }
        pts
    }

    pub fn bounds(&self) -> Rect {
        let mut iter = self.vertices.iter();
        let first = match iter.next() {
            Some(p) => *p,
            None => return Rect::ZERO,
        };
        iter.fold(Rect::from_points(first, first), |r, p| {
            r.union_pt(*p)
        })
    }

    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        let outline = self.outline();
        if outline.len() < 2 {
            return outline
                .first()
                .is_some_and(|p| p.distance(point) <= tolerance);
        }
        point_to_polyline_dist(point, &outline) <= tolerance + self.style.stroke_width / 2.0
    }

    pub fn intersects_rect(&self, rect: Rect) -> bool {
        polyline_intersects_rect(&self.outline(), rect)
    }

    pub fn translated(&self, delta: Vec2) -> Self {
        Self {
            vertices: self.vertices.iter().map(|p| *p + delta).collect(),
            ..self.clone()
        }
    }

    pub fn to_path(&self) -> BezPath {
        let mut path = BezPath::new();
        let Some(first) = self.vertices.first() else {
            return path;
        };
        path.move_to(*first);
        for p in &self.vertices[1..] {
            path.line_to(*p);
        }
        if self.closed {
            path.close_path();
        }
        path
    }
}
