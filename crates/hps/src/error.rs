//! Errors surfaced by the estimator.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, HpsError>;

#[derive(Debug, Error)]
pub enum HpsError {
    /// Mesh file is missing or cannot be opened.
    #[error("mesh file {} not found or unreadable", path.display())]
    NotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// I/O failure after the file was opened.
    #[error("failed reading mesh file {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// A vertex record did not tokenize into three numbers.
    #[error("line {line}: {reason} in vertex record `{content}`")]
    Parse {
        line: usize,
        content: String,
        reason: String,
    },
    /// Fewer than three distinct, non-collinear hull points.
    #[error("degenerate geometry: {distinct} distinct hull vertices")]
    DegenerateGeometry { distinct: usize },
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}
