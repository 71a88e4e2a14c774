//! Error types for subgrid-rs.

use thiserror::Error;

/// The main error type for subgrid-rs operations.
#[derive(Error, Debug)]
pub enum SubgridError {
    /// The polygon index stream is structurally invalid.
    #[error("malformed polygon stream at offset {offset}: {reason}")]
    MalformedPolygonStream {
        /// Offset into the stream where the problem was detected.
        offset: usize,
        /// Human-readable description of the defect.
        reason: String,
    },

    /// A polygon references a point outside the point pool.
    #[error("point index {index} out of range (point pool has {count} points)")]
    PointIndexOutOfRange { index: u32, count: usize },

    /// Data size mismatch between parallel arrays.
    #[error("data size mismatch: expected {expected}, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    /// Polygon triangulation failed.
    #[error("triangulation error: {0}")]
    TriangulationError(String),

    /// The mesh worker thread is no longer running.
    #[error("mesh worker disconnected")]
    WorkerDisconnected,

    /// I/O error.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// A specialized Result type for subgrid-rs operations.
pub type Result<T> = std::result::Result<T, SubgridError>;
