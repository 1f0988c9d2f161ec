//! Plane-sweep slicing: intersect the triangle set with horizontal
//! planes and stitch the resulting segments into contour polylines.

use camber_mesh::{Point3, Triangulation, EPSILON};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::polyline::Polyline;

/// Band around a plane inside which a vertex counts as on it.
const PLANE_EPS: f64 = 1e-9;

/// Endpoint adjacency tolerance when stitching segments.
const STITCH_EPS: f64 = 1e-6;

/// All contours found at one slicing height.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SliceLayer {
    /// Z height of this level.
    pub z: f64,
    /// Level index (0 = first level in sweep order).
    pub index: usize,
    /// Contours in stitching discovery order.
    pub polylines: Vec<Polyline>,
}

/// A triangle resolved out of the pool, with its z range cached so
/// levels that cannot intersect it are rejected cheaply.
#[derive(Debug, Clone, Copy)]
struct SliceTriangle {
    v0: Point3,
    v1: Point3,
    v2: Point3,
    z_min: f64,
    z_max: f64,
}

/// Resolve the mesh's triangles for slicing.
///
/// Degenerate triangles (fewer than 3 distinct vertices) are dropped
/// here; the second return value is how many were dropped.
fn extract_triangles(mesh: &Triangulation) -> (Vec<SliceTriangle>, usize) {
    let mut triangles = Vec::with_capacity(mesh.triangles.len());
    let mut degenerate = 0;

    for tri in &mesh.triangles {
        let v0 = mesh.resolve(&tri.vertices[0]);
        let v1 = mesh.resolve(&tri.vertices[1]);
        let v2 = mesh.resolve(&tri.vertices[2]);

        if (v0 - v1).norm() <= EPSILON
            || (v1 - v2).norm() <= EPSILON
            || (v2 - v0).norm() <= EPSILON
        {
            degenerate += 1;
            continue;
        }

        let z_min = v0.z.min(v1.z).min(v2.z);
        let z_max = v0.z.max(v1.z).max(v2.z);
        triangles.push(SliceTriangle {
            v0,
            v1,
            v2,
            z_min,
            z_max,
        });
    }

    (triangles, degenerate)
}

/// The heights a sweep from `top` to `bottom` visits, in sweep order.
///
/// Inputs may arrive in either order; the sweep always proceeds from
/// the higher plane downward, stepping by `step` (which must be
/// positive) and including the bottom plane when the step lands on it.
pub fn level_heights(top: f64, bottom: f64, step: f64) -> Vec<f64> {
    debug_assert!(step > 0.0);
    let (hi, lo) = if top >= bottom {
        (top, bottom)
    } else {
        (bottom, top)
    };

    let mut heights = Vec::new();
    let mut z = hi;
    while z >= lo - PLANE_EPS {
        heights.push(z);
        z -= step;
    }
    heights
}

/// Slice the mesh at every height, one layer per height in order.
///
/// Layers are computed in parallel; the mesh is only read. The second
/// return value is the number of degenerate triangles skipped.
pub fn slice_levels(mesh: &Triangulation, heights: &[f64]) -> (Vec<SliceLayer>, usize) {
    let (triangles, degenerate) = extract_triangles(mesh);

    let layers = heights
        .par_iter()
        .enumerate()
        .map(|(index, &z)| SliceLayer {
            z,
            index,
            polylines: slice_triangles(&triangles, z),
        })
        .collect();

    (layers, degenerate)
}

/// Slice the mesh at a single height.
pub fn slice_at_z(mesh: &Triangulation, z: f64) -> Vec<Polyline> {
    let (triangles, _) = extract_triangles(mesh);
    slice_triangles(&triangles, z)
}

fn slice_triangles(triangles: &[SliceTriangle], z: f64) -> Vec<Polyline> {
    let mut segments: Vec<(Point3, Point3)> = Vec::new();

    for tri in triangles {
        if tri.z_max < z - PLANE_EPS || tri.z_min > z + PLANE_EPS {
            continue;
        }
        if let Some(seg) = triangle_plane_intersection(tri, z) {
            segments.push(seg);
        }
    }

    stitch_segments(segments)
}

/// Intersect one triangle with the plane at `z`.
///
/// A straddling triangle yields exactly one segment. A triangle
/// touching the plane in a single vertex, or lying entirely in the
/// plane, yields none.
fn triangle_plane_intersection(tri: &SliceTriangle, z: f64) -> Option<(Point3, Point3)> {
    let d0 = tri.v0.z - z;
    let d1 = tri.v1.z - z;
    let d2 = tri.v2.z - z;

    // Coplanar: its neighbors' edges trace the contour.
    if d0.abs() <= PLANE_EPS && d1.abs() <= PLANE_EPS && d2.abs() <= PLANE_EPS {
        return None;
    }

    if (d0 > PLANE_EPS && d1 > PLANE_EPS && d2 > PLANE_EPS)
        || (d0 < -PLANE_EPS && d1 < -PLANE_EPS && d2 < -PLANE_EPS)
    {
        return None;
    }

    let mut points: Vec<Point3> = Vec::with_capacity(2);
    let edges = [
        (tri.v0, tri.v1, d0, d1),
        (tri.v1, tri.v2, d1, d2),
        (tri.v2, tri.v0, d2, d0),
    ];

    for (va, vb, da, db) in edges {
        if (da > PLANE_EPS && db < -PLANE_EPS) || (da < -PLANE_EPS && db > PLANE_EPS) {
            let t = da / (da - db);
            points.push(Point3::new(
                va.x + t * (vb.x - va.x),
                va.y + t * (vb.y - va.y),
                z,
            ));
        } else if da.abs() <= PLANE_EPS && db.abs() > PLANE_EPS {
            // Vertex a sits on the plane; it appears for both edges
            // that meet there, deduplicated below.
            points.push(va);
        } else if db.abs() <= PLANE_EPS && da.abs() > PLANE_EPS {
            points.push(vb);
        }
    }

    points.dedup_by(|a, b| (*a - *b).norm() < STITCH_EPS);

    if points.len() >= 2 {
        Some((points[0], points[1]))
    } else {
        None
    }
}

/// Stitch segments into polylines by endpoint adjacency.
///
/// Segment order follows triangle iteration order, which says nothing
/// about connectivity, so each chain is grown by scanning the remaining
/// segments for one sharing an endpoint until no more attach. Chains
/// that return to their start become closed polylines; the rest stay
/// open.
fn stitch_segments(segments: Vec<(Point3, Point3)>) -> Vec<Polyline> {
    let mut remaining = segments;
    let mut polylines = Vec::new();

    while !remaining.is_empty() {
        let (start, end) = remaining.remove(0);
        let mut chain = vec![start, end];

        let mut changed = true;
        while changed {
            changed = false;

            let chain_start = chain[0];
            let chain_end = *chain.last().unwrap();

            let mut i = 0;
            while i < remaining.len() {
                let (a, b) = remaining[i];

                if (b - chain_end).norm() < STITCH_EPS {
                    chain.push(a);
                    remaining.remove(i);
                    changed = true;
                } else if (a - chain_end).norm() < STITCH_EPS {
                    chain.push(b);
                    remaining.remove(i);
                    changed = true;
                } else if (b - chain_start).norm() < STITCH_EPS {
                    chain.insert(0, a);
                    remaining.remove(i);
                    changed = true;
                } else if (a - chain_start).norm() < STITCH_EPS {
                    chain.insert(0, b);
                    remaining.remove(i);
                    changed = true;
                } else {
                    i += 1;
                }
            }
        }

        let mut closed = false;
        if chain.len() >= 3 {
            let gap = (chain[0] - *chain.last().unwrap()).norm();
            if gap < STITCH_EPS {
                chain.pop();
                closed = true;
            }
        }

        let chain = collapse_collinear(&chain, closed);
        if chain.len() >= 2 {
            polylines.push(Polyline::new(chain, closed));
        }
    }

    polylines
}

/// Drop points that lie on the straight line between their neighbors.
///
/// Triangulated flat faces leave segment joints in the middle of what
/// is geometrically one contour edge (every quad's diagonal crosses the
/// plane somewhere); the contour is the same without them. Endpoints of
/// open chains are always kept; closed chains wrap around, so the seam
/// point is a candidate too.
fn collapse_collinear(points: &[Point3], closed: bool) -> Vec<Point3> {
    let n = points.len();
    if n < 3 {
        return points.to_vec();
    }

    let mut kept = Vec::with_capacity(n);
    for i in 0..n {
        if !closed && (i == 0 || i == n - 1) {
            kept.push(points[i]);
            continue;
        }
        let prev = points[(i + n - 1) % n];
        let next = points[(i + 1) % n];
        let a = points[i] - prev;
        let b = next - points[i];
        if a.cross(&b).norm() > PLANE_EPS {
            kept.push(points[i]);
        }
    }

    // A closed chain needs 3 points to stay a contour.
    if closed && kept.len() < 3 {
        return points.to_vec();
    }
    kept
}
