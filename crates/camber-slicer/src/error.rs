//! Error types for the slicer.

use thiserror::Error;

/// Errors that can occur during slicing.
///
/// An empty mesh or a sweep range outside the mesh is an empty result,
/// not an error; per-triangle degeneracies are skipped and counted.
#[derive(Error, Debug)]
pub enum SlicerError {
    /// Invalid slice settings.
    #[error("invalid settings: {0}")]
    InvalidSettings(String),
}

/// Result type for slicer operations.
pub type Result<T> = std::result::Result<T, SlicerError>;
