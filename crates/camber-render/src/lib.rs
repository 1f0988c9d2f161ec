#![warn(missing_docs)]

//! Render-buffer conversion for the camber toolpath simulator.
//!
//! The drawing widget is an external collaborator; this crate produces
//! the flat buffers it consumes: coordinate triples for vertices and
//! normals, a matching color triple per vertex, and a draw-style tag.
//! Nothing here touches a graphics API.

use camber_mesh::{Point3, Triangulation};
use camber_slicer::SliceLayer;
use serde::{Deserialize, Serialize};

/// How the renderer should interpret a vertex buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DrawStyle {
    /// Independent line segments: vertices are consumed in pairs.
    Lines,
    /// Independent triangles: vertices are consumed in threes.
    Triangles,
}

/// Flattened geometry buffers handed to the renderer.
///
/// `vertices` holds `[x0, y0, z0, x1, y1, z1, ...]`; `colors` holds one
/// RGB triple per vertex. `normals` matches `vertices` when present and
/// is empty for line data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderData {
    /// Flat vertex coordinates.
    pub vertices: Vec<f64>,
    /// Flat per-vertex normals, or empty.
    pub normals: Vec<f64>,
    /// Flat per-vertex RGB colors.
    pub colors: Vec<f64>,
    /// How to draw the vertices.
    pub draw_style: DrawStyle,
}

impl RenderData {
    fn new(draw_style: DrawStyle) -> Self {
        Self {
            vertices: Vec::new(),
            normals: Vec::new(),
            colors: Vec::new(),
            draw_style,
        }
    }

    /// Number of vertices in the buffer.
    pub fn num_vertices(&self) -> usize {
        self.vertices.len() / 3
    }

    fn push_vertex(&mut self, p: &Point3, color: [f64; 3]) {
        self.vertices.extend_from_slice(&[p.x, p.y, p.z]);
        self.colors.extend_from_slice(&color);
    }
}

/// Color used for mesh and contour display.
const DISPLAY_COLOR: [f64; 3] = [1.0, 0.0, 0.0];

/// Box edges as corner-index pairs, written against the fixed ordering
/// of [`BoundingBox::corners`](camber_mesh::BoundingBox::corners):
/// bottom face, top face, then verticals.
const BOX_EDGES: [(usize, usize); 12] = [
    (4, 6),
    (6, 7),
    (7, 5),
    (5, 4),
    (0, 2),
    (2, 3),
    (3, 1),
    (1, 0),
    (4, 0),
    (6, 2),
    (7, 3),
    (5, 1),
];

/// Convert a mesh to triangle buffers, repeating the face normal for
/// each of its three vertices.
pub fn triangulation_buffers(mesh: &Triangulation) -> RenderData {
    let mut data = RenderData::new(DrawStyle::Triangles);

    for tri in &mesh.triangles {
        let normal = mesh.resolve(&tri.normal);
        for vertex in &tri.vertices {
            let p = mesh.resolve(vertex);
            data.push_vertex(&p, DISPLAY_COLOR);
            data.normals.extend_from_slice(&[normal.x, normal.y, normal.z]);
        }
    }

    data
}

/// Convert slice layers to line-segment buffers.
///
/// Each polyline becomes consecutive vertex pairs; a closed polyline
/// gets one more pair returning to its start.
pub fn polyline_buffers(layers: &[SliceLayer]) -> RenderData {
    let mut data = RenderData::new(DrawStyle::Lines);

    for layer in layers {
        for line in &layer.polylines {
            for pair in line.points.windows(2) {
                data.push_vertex(&pair[0], DISPLAY_COLOR);
                data.push_vertex(&pair[1], DISPLAY_COLOR);
            }
            if line.closed && line.len() >= 2 {
                data.push_vertex(line.end().unwrap(), DISPLAY_COLOR);
                data.push_vertex(line.start().unwrap(), DISPLAY_COLOR);
            }
        }
    }

    data
}

/// Convert a mesh's bounding box to its 12 edges as line buffers.
///
/// An empty box yields empty buffers.
pub fn bounding_box_buffers(mesh: &Triangulation) -> RenderData {
    let mut data = RenderData::new(DrawStyle::Lines);
    if mesh.bounding_box.is_empty() {
        return data;
    }

    let corners = mesh.bounding_box.corners();
    for (start, end) in BOX_EDGES {
        data.push_vertex(&corners[start], DISPLAY_COLOR);
        data.push_vertex(&corners[end], DISPLAY_COLOR);
    }

    data
}
