#![warn(missing_docs)]

//! OBJ-subset importer for the camber toolpath simulator.
//!
//! Parses a line-oriented, whitespace-delimited mesh description into a
//! [`Triangulation`](camber_mesh::Triangulation), interning every
//! coordinate component through the mesh's scalar pool. Recognized
//! record kinds:
//!
//! - `v x y z` — vertex position
//! - `vn x y z` — normal direction
//! - `f a/ta/na b/tb/nb c/tc/nc` — face (1-based references; texture
//!   indices ignored; `a//na` accepted)
//!
//! Unrecognized record kinds are skipped without error. Import is a
//! pure function: it either returns a complete mesh or an error, never
//! a partially-built one.
//!
//! # Example
//!
//! ```
//! let mesh = camber_obj::parse_obj(
//!     "v 0 0 0\nv 1 0 0\nv 0 1 0\nvn 0 0 1\nf 1//1 2//1 3//1\n",
//! )
//! .unwrap();
//! assert_eq!(mesh.num_triangles(), 1);
//! ```

pub mod error;
pub mod reader;

pub use error::{ObjError, Result};
pub use reader::{parse_obj, read_obj};
