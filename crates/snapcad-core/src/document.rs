//! Document storage: the live collection of shapes on the canvas.

use crate::error::Error;
use crate::shapes::{Shape, ShapeId};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A shape removed from the document, together with its prior z position.
///
/// Entries from one [`Document::remove`] call carry ascending indices, so
/// reinserting them in order restores the exact pre-removal z-order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemovedShape {
    /// Position in the z-order at removal time.
    pub index: usize,
    /// The removed shape.
    pub shape: Shape,
}

/// The mutable ground truth: an arena of shapes keyed by id, with an
/// explicit z-order sequence (back to front).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// All shapes, keyed by id.
    shapes: HashMap<ShapeId, Shape>,
    /// Draw order of shapes (back to front).
    z_order: Vec<ShapeId>,
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a shape, returning its id.
    pub fn add(&mut self, shape: Shape) -> ShapeId {
        let id = shape.id();
        debug_assert!(!self.shapes.contains_key(&id));
        self.z_order.push(id);
        self.shapes.insert(id, shape);
        id
    }

    /// Remove shapes by id, returning the removed entries in ascending
    /// z-order. Nonexistent ids are skipped, not an error.
    pub fn remove(&mut self, ids: &[ShapeId]) -> Vec<RemovedShape> {
        let mut removed = Vec::new();
        for (index, id) in self.z_order.iter().enumerate() {
            if ids.contains(id) {
                if let Some(shape) = self.shapes.get(id) {
                    removed.push(RemovedShape {
                        index,
                        shape: shape.clone(),
                    });
                }
            }
        }
        for entry in &removed {
            self.shapes.remove(&entry.shape.id());
        }
        self.z_order.retain(|id| !ids.contains(id));
        removed
    }

    /// Restore previously removed shapes at their recorded z positions.
    ///
    /// Inverse of [`Document::remove`]: reinserting one removal batch
    /// reproduces the pre-removal state exactly.
    pub fn reinsert(&mut self, mut entries: Vec<RemovedShape>) {
        entries.sort_by_key(|e| e.index);
        for entry in entries {
            let id = entry.shape.id();
            if self.shapes.contains_key(&id) {
                continue;
            }
            let index = entry.index.min(self.z_order.len());
            self.z_order.insert(index, id);
            self.shapes.insert(id, entry.shape);
        }
    }

    /// Get a shape by id.
    pub fn get(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.get(&id)
    }

    /// Get a mutable reference to a shape by id.
    pub fn get_mut(&mut self, id: ShapeId) -> Option<&mut Shape> {
        self.shapes.get_mut(&id)
    }

    /// Check whether a shape id is live.
    pub fn contains(&self, id: ShapeId) -> bool {
        self.shapes.contains_key(&id)
    }

    /// Replace a shape in place, preserving its id and z position.
    /// Returns false when the id is not present or the replacement carries a
    /// different id.
    pub fn replace(&mut self, id: ShapeId, shape: Shape) -> bool {
        if shape.id() != id || !self.shapes.contains_key(&id) {
            return false;
        }
        self.shapes.insert(id, shape);
        true
    }

    /// Iterate shapes in z-order (back to front).
    pub fn iter(&self) -> impl Iterator<Item = (ShapeId, &Shape)> {
        self.z_order
            .iter()
            .filter_map(|id| self.shapes.get(id).map(|s| (*id, s)))
    }

    /// Get the number of shapes.
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// Check if the document is empty.
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Bounding box of all shapes.
    pub fn bounds(&self) -> Option<Rect> {
        let mut result: Option<Rect> = None;
        for shape in self.shapes.values() {
            let bounds = shape.bounds();
            result = Some(match result {
                Some(r) => r.union(bounds),
                None => bounds,
            });
        }
        result
    }

    /// Find all shapes at a point, topmost first.
    pub fn shapes_at_point(&self, point: Point, tolerance: f64) -> Vec<ShapeId> {
        self.z_order
            .iter()
            .rev()
            .filter_map(|&id| {
                self.shapes
                    .get(&id)
                    .filter(|s| s.hit_test(point, tolerance))
                    .map(|_| id)
            })
            .collect()
    }

    /// Find the topmost shape at a point, if any.
    pub fn shape_at_point(&self, point: Point, tolerance: f64) -> Option<ShapeId> {
        self.z_order.iter().rev().copied().find(|&id| {
            self.shapes
                .get(&id)
                .is_some_and(|s| s.hit_test(point, tolerance))
        })
    }

    /// Find shapes intersecting a rubber-band rectangle, in z-order.
    pub fn shapes_in_rect(&self, rect: Rect) -> Vec<ShapeId> {
        self.z_order
            .iter()
            .filter_map(|&id| {
                self.shapes
                    .get(&id)
                    .filter(|s| s.intersects_rect(rect))
                    .map(|_| id)
            })
            .collect()
    }

    /// Serialize the document to JSON (external persistence surface).
    pub fn to_json(&self) -> Result<String, Error> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deserialize a document from JSON.
    pub fn from_json(json: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(json)?)
    }
}
