//! Axis-aligned bounding box over resolved vertex positions.

use crate::Point3;

/// Min/max corners of a mesh, expandable to the 8-corner form the
/// renderer consumes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    /// Component-wise minimum corner.
    pub low: Point3,
    /// Component-wise maximum corner.
    pub high: Point3,
}

impl BoundingBox {
    /// The empty box: `low` above `high` on every axis, so any
    /// [`extend`](Self::extend) replaces both corners.
    pub fn empty() -> Self {
        Self {
            low: Point3::new(f64::INFINITY, f64::INFINITY, f64::INFINITY),
            high: Point3::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    /// Create a box from explicit corners.
    pub fn new(low: Point3, high: Point3) -> Self {
        Self { low, high }
    }

    /// Whether the box contains no points.
    pub fn is_empty(&self) -> bool {
        self.low.x > self.high.x
    }

    /// Grow the box to contain `p`.
    pub fn extend(&mut self, p: &Point3) {
        self.low.x = self.low.x.min(p.x);
        self.low.y = self.low.y.min(p.y);
        self.low.z = self.low.z.min(p.z);
        self.high.x = self.high.x.max(p.x);
        self.high.y = self.high.y.max(p.y);
        self.high.z = self.high.z.max(p.z);
    }

    /// Whether `p` lies inside the box (inclusive, within `tol`).
    pub fn contains(&self, p: &Point3, tol: f64) -> bool {
        p.x >= self.low.x - tol
            && p.x <= self.high.x + tol
            && p.y >= self.low.y - tol
            && p.y <= self.high.y + tol
            && p.z >= self.low.z - tol
            && p.z <= self.high.z + tol
    }

    /// The 8 corners in the fixed renderer ordering.
    ///
    /// Corner `i` and corner `i + 4` share (x, y) and differ only in z:
    /// indices 0-3 are the top face (high z), 4-7 the bottom face
    /// (low z). Each face's perimeter is traced as `(0,2,3,1)` /
    /// `(4,6,7,5)`. Downstream edge lists are written against this
    /// exact order.
    pub fn corners(&self) -> [Point3; 8] {
        let (l, h) = (self.low, self.high);
        [
            Point3::new(l.x, l.y, h.z),
            Point3::new(l.x, h.y, h.z),
            Point3::new(h.x, l.y, h.z),
            Point3::new(h.x, h.y, h.z),
            Point3::new(l.x, l.y, l.z),
            Point3::new(l.x, h.y, l.z),
            Point3::new(h.x, l.y, l.z),
            Point3::new(h.x, h.y, l.z),
        ]
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::empty()
    }
}
