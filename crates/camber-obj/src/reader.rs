//! OBJ text parsing and mesh construction.

use std::path::Path;
use std::str::SplitWhitespace;

use camber_mesh::{Point, Triangle, Triangulation};

use crate::error::{ObjError, Result};

/// Read an OBJ mesh from a file.
pub fn read_obj(path: impl AsRef<Path>) -> Result<Triangulation> {
    let text = std::fs::read_to_string(path)?;
    parse_obj(&text)
}

/// Parse an OBJ mesh from in-memory text.
pub fn parse_obj(text: &str) -> Result<Triangulation> {
    ObjReader::new().parse(text)
}

/// One face-vertex reference with its raw 1-based indices.
#[derive(Debug, Clone, Copy)]
struct FaceRef {
    vertex: i64,
    normal: Option<i64>,
}

/// A face record held until the whole file is consumed, so references
/// resolve against the complete vertex/normal lists.
#[derive(Debug, Clone, Copy)]
struct FaceRecord {
    line: usize,
    refs: [FaceRef; 3],
}

/// Accumulates file-order vertex and normal lists, then resolves face
/// references into triangles.
struct ObjReader {
    mesh: Triangulation,
    vertices: Vec<Point>,
    normals: Vec<Point>,
    faces: Vec<FaceRecord>,
}

impl ObjReader {
    fn new() -> Self {
        Self {
            mesh: Triangulation::new(),
            vertices: Vec::new(),
            normals: Vec::new(),
            faces: Vec::new(),
        }
    }

    fn parse(mut self, text: &str) -> Result<Triangulation> {
        for (idx, line) in text.lines().enumerate() {
            let lineno = idx + 1;
            let mut tokens = line.split_whitespace();
            match tokens.next() {
                Some("v") => self.vertex(lineno, tokens)?,
                Some("vn") => self.normal(lineno, tokens)?,
                Some("f") => self.face(lineno, tokens)?,
                // Everything else (comments, groups, texture
                // coordinates, blank lines) is skipped.
                _ => {}
            }
        }
        self.resolve_faces()?;
        Ok(self.mesh)
    }

    fn vertex(&mut self, line: usize, tokens: SplitWhitespace<'_>) -> Result<()> {
        let [x, y, z] = read_triple(line, tokens)?;
        let p = self.mesh.intern_point(x, y, z);
        // The box accumulates resolved values, not the raw input, so it
        // agrees exactly with what resolve() returns later.
        let resolved = self.mesh.resolve(&p);
        self.mesh.bounding_box.extend(&resolved);
        self.vertices.push(p);
        Ok(())
    }

    fn normal(&mut self, line: usize, tokens: SplitWhitespace<'_>) -> Result<()> {
        let [x, y, z] = read_triple(line, tokens)?;
        let p = self.mesh.intern_point(x, y, z);
        self.normals.push(p);
        Ok(())
    }

    fn face(&mut self, line: usize, mut tokens: SplitWhitespace<'_>) -> Result<()> {
        let mut refs = [FaceRef {
            vertex: 0,
            normal: None,
        }; 3];
        for slot in &mut refs {
            let token = tokens
                .next()
                .ok_or_else(|| ObjError::malformed(line, "face needs 3 vertex references"))?;
            *slot = parse_face_ref(line, token)?;
        }
        // References past the third are ignored, like any other extra
        // token.
        self.faces.push(FaceRecord { line, refs });
        Ok(())
    }

    fn resolve_faces(&mut self) -> Result<()> {
        for rec in &self.faces {
            let normal_id = rec.refs[0].normal.ok_or_else(|| {
                ObjError::malformed(rec.line, "face has no normal reference")
            })?;
            let normal = lookup(&self.normals, normal_id, rec.line)?;
            let v0 = lookup(&self.vertices, rec.refs[0].vertex, rec.line)?;
            let v1 = lookup(&self.vertices, rec.refs[1].vertex, rec.line)?;
            let v2 = lookup(&self.vertices, rec.refs[2].vertex, rec.line)?;
            self.mesh.triangles.push(Triangle::new(normal, v0, v1, v2));
        }
        Ok(())
    }
}

/// Parse three floating components; extra tokens are ignored.
fn read_triple(line: usize, mut tokens: SplitWhitespace<'_>) -> Result<[f64; 3]> {
    let mut out = [0.0; 3];
    for value in &mut out {
        let token = tokens
            .next()
            .ok_or_else(|| ObjError::malformed(line, "expected 3 components"))?;
        *value = token
            .parse()
            .map_err(|_| ObjError::malformed(line, format!("not a number: {token:?}")))?;
    }
    Ok(out)
}

/// Parse one `v`, `v/t`, `v/t/n`, or `v//n` reference.
///
/// The texture index is skipped unparsed. Normal indices are parsed on
/// every reference even though only the first reference's normal is
/// applied to the triangle.
fn parse_face_ref(line: usize, token: &str) -> Result<FaceRef> {
    let mut parts = token.split('/');
    let vertex = parse_index(line, parts.next().unwrap_or(""))?;
    let _texture = parts.next();
    let normal = match parts.next() {
        Some("") | None => None,
        Some(n) => Some(parse_index(line, n)?),
    };
    Ok(FaceRef { vertex, normal })
}

fn parse_index(line: usize, token: &str) -> Result<i64> {
    token
        .parse()
        .map_err(|_| ObjError::malformed(line, format!("not an index: {token:?}")))
}

/// Resolve a 1-based file index against a whole-file list.
fn lookup(list: &[Point], one_based: i64, line: usize) -> Result<Point> {
    if one_based < 1 || one_based as usize > list.len() {
        return Err(ObjError::IndexOutOfRange {
            line,
            index: one_based,
        });
    }
    Ok(list[(one_based - 1) as usize])
}

#[cfg(test)]
mod tests {
    use super::*;
    use camber_mesh::Point3;

    const SINGLE_TRIANGLE: &str = "\
v 0 0 0
v 1 0 0
v 0 1 0
vn 0 0 1
f 1/1/1 2/2/1 3/3/1
";

    #[test]
    fn test_parse_single_triangle() {
        let mesh = parse_obj(SINGLE_TRIANGLE).unwrap();
        assert_eq!(mesh.num_triangles(), 1);
        let tri = &mesh.triangles[0];
        assert_eq!(mesh.resolve(&tri.vertices[0]), Point3::new(0.0, 0.0, 0.0));
        assert_eq!(mesh.resolve(&tri.vertices[1]), Point3::new(1.0, 0.0, 0.0));
        assert_eq!(mesh.resolve(&tri.vertices[2]), Point3::new(0.0, 1.0, 0.0));
        assert_eq!(mesh.resolve(&tri.normal), Point3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn test_components_are_deduplicated() {
        // 0 and 1 are the only distinct values across all records.
        let mesh = parse_obj(SINGLE_TRIANGLE).unwrap();
        assert_eq!(mesh.pool.len(), 2);
    }

    #[test]
    fn test_distinct_components_all_stored() {
        let mesh = parse_obj("v 1.5 2.5 3.5\nv 4.5 5.5 6.5\n").unwrap();
        assert_eq!(mesh.pool.len(), 6);
    }

    #[test]
    fn test_bounding_box_from_vertices_only() {
        let mesh = parse_obj("v -1 0 2\nv 3 -4 0\nvn 100 100 100\n").unwrap();
        let b = mesh.bounding_box;
        assert_eq!(b.low, Point3::new(-1.0, -4.0, 0.0));
        assert_eq!(b.high, Point3::new(3.0, 0.0, 2.0));
    }

    #[test]
    fn test_empty_input_gives_empty_box() {
        let mesh = parse_obj("# nothing here\n").unwrap();
        assert!(mesh.is_empty());
        assert!(mesh.bounding_box.is_empty());
    }

    #[test]
    fn test_unrecognized_records_ignored() {
        let text = format!("mtllib m.mtl\ng group1\nvt 0 0\n{SINGLE_TRIANGLE}s off\n");
        let mesh = parse_obj(&text).unwrap();
        assert_eq!(mesh.num_triangles(), 1);
    }

    #[test]
    fn test_double_slash_reference() {
        let text = "v 0 0 0\nv 1 0 0\nv 0 1 0\nvn 0 0 1\nf 1//1 2//1 3//1\n";
        let mesh = parse_obj(text).unwrap();
        assert_eq!(mesh.num_triangles(), 1);
    }

    #[test]
    fn test_faces_resolve_forward_references() {
        let text = "f 1/1/1 2/2/1 3/3/1\nv 0 0 0\nv 1 0 0\nv 0 1 0\nvn 0 0 1\n";
        let mesh = parse_obj(text).unwrap();
        assert_eq!(mesh.num_triangles(), 1);
    }

    #[test]
    fn test_short_vertex_record_rejected() {
        let err = parse_obj("v 1 2\n").unwrap_err();
        assert!(matches!(err, ObjError::MalformedRecord { line: 1, .. }));
    }

    #[test]
    fn test_unparsable_number_rejected() {
        let err = parse_obj("v 1 2 x\n").unwrap_err();
        assert!(matches!(err, ObjError::MalformedRecord { line: 1, .. }));
    }

    #[test]
    fn test_face_missing_reference_rejected() {
        let err = parse_obj("v 0 0 0\nvn 0 0 1\nf 1/1/1 1/1/1\n").unwrap_err();
        assert!(matches!(err, ObjError::MalformedRecord { line: 3, .. }));
    }

    #[test]
    fn test_face_without_normal_rejected() {
        let err = parse_obj("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n").unwrap_err();
        assert!(matches!(err, ObjError::MalformedRecord { line: 4, .. }));
    }

    #[test]
    fn test_reference_out_of_range() {
        let err = parse_obj("v 0 0 0\nvn 0 0 1\nf 1/1/1 2/2/1 3/3/1\n").unwrap_err();
        assert!(matches!(
            err,
            ObjError::IndexOutOfRange { line: 3, index: 2 }
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = read_obj("/no/such/mesh.obj").unwrap_err();
        assert!(matches!(err, ObjError::Io(_)));
    }

    #[test]
    fn test_near_duplicate_values_intern_once() {
        let mesh = parse_obj("v 1.00000005 0 0\nv 1.00000012 0 0\n").unwrap();
        // 1.00000005 ~ 1.00000012 within tolerance; plus the shared 0.
        assert_eq!(mesh.pool.len(), 2);
    }
}
