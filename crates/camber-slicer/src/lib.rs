#![warn(missing_docs)]

//! Toolpath contour generation for the camber toolpath simulator.
//!
//! Intersects a [`Triangulation`] with a series of horizontal planes
//! between two heights and stitches the per-plane segments into
//! polylines — the contours a machining or printing tool would follow.
//! Import the mesh first, then slice; the mesh is only read here and
//! levels are processed in parallel.
//!
//! # Example
//!
//! ```
//! use camber_slicer::{slice_range, SliceSettings};
//!
//! let mesh = camber_obj::parse_obj(
//!     "v 0 0 0\nv 2 0 0\nv 0 0 2\nvn 0 1 0\nf 1//1 2//1 3//1\n",
//! )
//! .unwrap();
//! let layers = slice_range(&mesh, 2.0, 0.0, &SliceSettings::default()).unwrap();
//! assert_eq!(layers.len(), 3); // z = 2, 1, 0
//! ```

pub mod error;
pub mod polyline;
pub mod slice;

pub use error::{Result, SlicerError};
pub use polyline::Polyline;
pub use slice::{level_heights, slice_at_z, slice_levels, SliceLayer};

use camber_mesh::Triangulation;
use serde::{Deserialize, Serialize};

/// Slicing parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SliceSettings {
    /// Vertical distance between consecutive levels.
    pub step: f64,
}

impl Default for SliceSettings {
    fn default() -> Self {
        Self { step: 1.0 }
    }
}

impl SliceSettings {
    /// Validate settings.
    pub fn validate(&self) -> Result<()> {
        if !self.step.is_finite() || self.step <= 0.0 {
            return Err(SlicerError::InvalidSettings(
                "step must be positive and finite".into(),
            ));
        }
        Ok(())
    }
}

/// Statistics about one slicing run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SliceStats {
    /// Number of levels visited.
    pub layer_count: usize,
    /// Total polylines across all levels.
    pub polyline_count: usize,
    /// Degenerate triangles skipped (never fatal).
    pub degenerate_triangles: usize,
}

/// Result of a slicing run: the layers plus run statistics.
#[derive(Debug, Clone)]
pub struct SliceResult {
    /// One layer per level, in sweep order (descending z).
    pub layers: Vec<SliceLayer>,
    /// Run statistics.
    pub stats: SliceStats,
}

/// Slice `mesh` between `top` and `bottom`, returning the layers.
///
/// The arguments may arrive in either order; the sweep always runs
/// from the higher plane downward. An empty mesh, or a range that
/// misses the mesh's z extent entirely, yields an empty vector.
pub fn slice_range(
    mesh: &Triangulation,
    top: f64,
    bottom: f64,
    settings: &SliceSettings,
) -> Result<Vec<SliceLayer>> {
    slice_with_stats(mesh, top, bottom, settings).map(|r| r.layers)
}

/// Slice `mesh` between `top` and `bottom`, keeping run statistics.
pub fn slice_with_stats(
    mesh: &Triangulation,
    top: f64,
    bottom: f64,
    settings: &SliceSettings,
) -> Result<SliceResult> {
    settings.validate()?;
    if !top.is_finite() || !bottom.is_finite() {
        return Err(SlicerError::InvalidSettings(
            "sweep heights must be finite".into(),
        ));
    }

    let (hi, lo) = if top >= bottom {
        (top, bottom)
    } else {
        (bottom, top)
    };

    let bounds = mesh.bounding_box;
    if mesh.is_empty() || bounds.is_empty() || hi < bounds.low.z || lo > bounds.high.z {
        return Ok(SliceResult {
            layers: Vec::new(),
            stats: SliceStats {
                layer_count: 0,
                polyline_count: 0,
                degenerate_triangles: 0,
            },
        });
    }

    let heights = level_heights(hi, lo, settings.step);
    let (layers, degenerate_triangles) = slice_levels(mesh, &heights);

    let stats = SliceStats {
        layer_count: layers.len(),
        polyline_count: layers.iter().map(|l| l.polylines.len()).sum(),
        degenerate_triangles,
    };

    Ok(SliceResult { layers, stats })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// Unit cube: 8 vertices, 12 faces, one normal per cube face.
    const UNIT_CUBE: &str = "\
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
v 0 0 1
v 1 0 1
v 1 1 1
v 0 1 1
vn 0 0 -1
vn 0 0 1
vn 0 -1 0
vn 0 1 0
vn -1 0 0
vn 1 0 0
f 1//1 3//1 2//1
f 1//1 4//1 3//1
f 5//2 6//2 7//2
f 5//2 7//2 8//2
f 1//3 2//3 6//3
f 1//3 6//3 5//3
f 3//4 4//4 8//4
f 3//4 8//4 7//4
f 1//5 5//5 8//5
f 1//5 8//5 4//5
f 2//6 3//6 7//6
f 2//6 7//6 6//6
";

    fn cube() -> Triangulation {
        camber_obj::parse_obj(UNIT_CUBE).unwrap()
    }

    #[test]
    fn test_cube_midslice_is_one_square() {
        let mesh = cube();
        let layers = slice_range(&mesh, 0.5, 0.5, &SliceSettings::default()).unwrap();
        assert_eq!(layers.len(), 1);
        assert_relative_eq!(layers[0].z, 0.5);

        let lines = &layers[0].polylines;
        assert_eq!(lines.len(), 1);
        let square = &lines[0];
        assert!(square.closed);
        assert_eq!(square.len(), 4);

        // The four corners are the cube's x/y extent, in some rotation
        // and direction.
        let mut corners: Vec<(i64, i64)> = square
            .points
            .iter()
            .map(|p| (p.x.round() as i64, p.y.round() as i64))
            .collect();
        corners.sort_unstable();
        assert_eq!(corners, vec![(0, 0), (0, 1), (1, 0), (1, 1)]);
        for p in &square.points {
            assert_relative_eq!(p.z, 0.5);
        }
    }

    #[test]
    fn test_containment_in_bounds() {
        let mesh = cube();
        let settings = SliceSettings { step: 0.25 };
        let layers = slice_range(&mesh, 1.0, 0.0, &settings).unwrap();
        assert!(!layers.is_empty());
        for layer in &layers {
            for line in &layer.polylines {
                for p in &line.points {
                    assert_relative_eq!(p.z, layer.z, epsilon = 1e-9);
                    assert!(mesh.bounding_box.contains(p, 1e-9));
                }
            }
        }
    }

    #[test]
    fn test_completeness_between_extents() {
        let mesh = cube();
        for z in [0.1, 0.3, 0.7, 0.9] {
            let lines = slice_at_z(&mesh, z);
            assert!(!lines.is_empty(), "no contour at z={z}");
            assert!(lines.iter().any(|l| !l.is_empty()));
        }
    }

    #[test]
    fn test_emptiness_outside_extents() {
        let mesh = cube();
        assert!(slice_at_z(&mesh, 5.0).is_empty());
        assert!(slice_at_z(&mesh, -5.0).is_empty());
    }

    #[test]
    fn test_range_outside_mesh_is_ok_and_empty() {
        let mesh = cube();
        let layers = slice_range(&mesh, 30.0, 20.0, &SliceSettings::default()).unwrap();
        assert!(layers.is_empty());
    }

    #[test]
    fn test_empty_mesh_is_ok_and_empty() {
        let mesh = Triangulation::new();
        let layers = slice_range(&mesh, 1.0, -1.0, &SliceSettings::default()).unwrap();
        assert!(layers.is_empty());
    }

    #[test]
    fn test_swapped_range_normalized() {
        let mesh = cube();
        let a = slice_range(&mesh, 1.0, 0.0, &SliceSettings::default()).unwrap();
        let b = slice_range(&mesh, 0.0, 1.0, &SliceSettings::default()).unwrap();
        assert_eq!(a.len(), b.len());
        for (la, lb) in a.iter().zip(&b) {
            assert_relative_eq!(la.z, lb.z);
        }
    }

    #[test]
    fn test_layers_in_descending_sweep_order() {
        let mesh = cube();
        let settings = SliceSettings { step: 0.25 };
        let layers = slice_range(&mesh, 1.0, 0.0, &settings).unwrap();
        assert_eq!(layers.len(), 5);
        assert!(layers.windows(2).all(|w| w[0].z > w[1].z));
        for (i, layer) in layers.iter().enumerate() {
            assert_eq!(layer.index, i);
        }
    }

    #[test]
    fn test_open_contour_from_open_surface() {
        // A single vertical triangle is not a closed solid; its slice
        // is one open polyline.
        let mesh = camber_obj::parse_obj(
            "v 0 0 0\nv 2 0 0\nv 1 0 2\nvn 0 1 0\nf 1//1 2//1 3//1\n",
        )
        .unwrap();
        let lines = slice_at_z(&mesh, 1.0);
        assert_eq!(lines.len(), 1);
        assert!(!lines[0].closed);
        assert_eq!(lines[0].len(), 2);
    }

    #[test]
    fn test_degenerate_triangle_counted_not_fatal() {
        // Second face reuses one vertex twice.
        let mesh = camber_obj::parse_obj(
            "v 0 0 0\nv 2 0 0\nv 1 0 2\nvn 0 1 0\nf 1//1 2//1 3//1\nf 1//1 1//1 2//1\n",
        )
        .unwrap();
        let result = slice_with_stats(&mesh, 1.0, 1.0, &SliceSettings::default()).unwrap();
        assert_eq!(result.stats.degenerate_triangles, 1);
        assert_eq!(result.stats.layer_count, 1);
        assert_eq!(result.stats.polyline_count, 1);
    }

    #[test]
    fn test_invalid_step_rejected() {
        let mesh = cube();
        for step in [0.0, -1.0, f64::NAN] {
            let settings = SliceSettings { step };
            assert!(slice_range(&mesh, 1.0, 0.0, &settings).is_err());
        }
    }

    #[test]
    fn test_layers_serialize() {
        let mesh = cube();
        let layers = slice_range(&mesh, 0.5, 0.5, &SliceSettings::default()).unwrap();
        let json = serde_json::to_string(&layers).unwrap();
        assert!(json.contains("\"closed\":true"));
    }
}
