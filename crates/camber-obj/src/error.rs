//! Error types for OBJ import.

use thiserror::Error;

/// Errors that can occur while importing an OBJ mesh.
///
/// Any error aborts the whole import; no partial mesh is returned.
#[derive(Error, Debug)]
pub enum ObjError {
    /// I/O error opening or reading the file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A recognized record with the wrong arity or an unparsable field.
    #[error("Malformed record at line {line}: {message}")]
    MalformedRecord {
        /// Line number (1-indexed).
        line: usize,
        /// What was wrong with the record.
        message: String,
    },

    /// A face reference outside the vertex or normal list.
    #[error("Reference out of range at line {line}: index {index}")]
    IndexOutOfRange {
        /// Line number (1-indexed) of the face record.
        line: usize,
        /// The offending 1-based index as written in the file.
        index: i64,
    },
}

impl ObjError {
    /// Create a malformed-record error.
    pub fn malformed(line: usize, message: impl Into<String>) -> Self {
        Self::MalformedRecord {
            line,
            message: message.into(),
        }
    }
}

/// Result type for OBJ import operations.
pub type Result<T> = std::result::Result<T, ObjError>;
