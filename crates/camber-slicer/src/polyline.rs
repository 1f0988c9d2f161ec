//! Contour polylines produced by slicing.

use camber_mesh::Point3;
use serde::{Deserialize, Serialize};

/// An ordered chain of surface points at one slicing height.
///
/// Points carry resolved coordinates (not pool indices) and are owned
/// by the caller. A closed polyline returns to its start; the duplicate
/// closing point is not stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Polyline {
    /// Points along the contour in connection order.
    pub points: Vec<Point3>,
    /// Whether the chain returned to its starting point.
    pub closed: bool,
}

impl Polyline {
    /// Create a polyline from points.
    pub fn new(points: Vec<Point3>, closed: bool) -> Self {
        Self { points, closed }
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the polyline has no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Starting point.
    pub fn start(&self) -> Option<&Point3> {
        self.points.first()
    }

    /// Ending point (the last stored point; for a closed polyline the
    /// contour continues back to [`start`](Self::start)).
    pub fn end(&self) -> Option<&Point3> {
        self.points.last()
    }

    /// Total traversal length, including the closing segment for a
    /// closed polyline.
    pub fn length(&self) -> f64 {
        if self.points.len() < 2 {
            return 0.0;
        }
        let open: f64 = self.points.windows(2).map(|w| (w[1] - w[0]).norm()).sum();
        if self.closed {
            let back = (self.points[0] - self.points[self.points.len() - 1]).norm();
            open + back
        } else {
            open
        }
    }
}
