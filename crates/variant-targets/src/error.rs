//! Error types for microarchitecture database operations.

use std::path::PathBuf;

/// Errors that can occur while loading targets or detecting the host.
#[derive(Debug, thiserror::Error)]
pub enum ArchError {
    /// JSON deserialization error.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error reading target or cpuinfo files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Target file not found.
    #[error("target file not found: {}", path.display())]
    NotFound {
        /// The path that was not found.
        path: PathBuf,
    },

    /// A target lists a parent the table does not define.
    #[error("target '{target}' derives from unknown target '{parent}'")]
    UnknownParent {
        /// The target being resolved.
        target: String,
        /// The missing parent name.
        parent: String,
    },

    /// A target is (transitively) its own ancestor.
    #[error("target '{target}' is part of an ancestry cycle")]
    Cycle {
        /// A target on the cycle.
        target: String,
    },

    /// Lookup of a target name that the table does not define.
    #[error("unknown target '{0}'")]
    UnknownTarget(String),
}

/// Result type for target operations.
pub type Result<T> = std::result::Result<T, ArchError>;
