#![warn(missing_docs)]

//! Mesh data model for the camber toolpath simulator.
//!
//! A mesh is stored as a [`Triangulation`]: a pool of interned scalar
//! coordinate values plus triangles that reference the pool by index.
//! Coordinate components repeat heavily across a mesh (shared grid
//! coordinates, axis-aligned faces), so each distinct value is stored
//! once and triangles carry `u32` indices instead of raw floats.
//!
//! Resolved (non-interned) coordinates use the [`Point3`] / [`Vec3`]
//! aliases over nalgebra.

pub mod bbox;
pub mod pool;
pub mod tri;

pub use bbox::BoundingBox;
pub use pool::ScalarPool;
pub use tri::{Point, Triangle, Triangulation};

/// A resolved point in 3D space.
pub type Point3 = nalgebra::Point3<f64>;

/// A vector in 3D space.
pub type Vec3 = nalgebra::Vector3<f64>;

/// Interning tolerance: two scalar values within this distance are the
/// same pool entry.
pub const EPSILON: f64 = 1e-7;
