//! Error types for the frame analysis pipeline

use thiserror::Error;

/// Main error type for pipeline operations
#[derive(Error, Debug)]
pub enum FrameError {
    #[error("No geometry uploaded - provide a JSON file with a \"beams\" array")]
    MissingGeometry,

    #[error("Load {index}: selected node '{key}' does not exist in the model")]
    LoadTargetNotFound { index: usize, key: String },

    #[error("Node {0} not found in model")]
    NodeNotFound(u32),

    #[error("Solver failed: {0}")]
    Solver(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[cfg(feature = "remote")]
    #[error("Solver transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Result type for pipeline operations
pub type FrameResult<T> = Result<T, FrameError>;
