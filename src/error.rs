//! Error types for lattice-gas.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LatticeError {
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    #[error("Invalid state: {0}")]
    State(&'static str),

    #[error("Cell ({x}, {y}) is outside the {width}x{height} lattice")]
    OutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },

    #[error("Cell ({x}, {y}) is solid")]
    SolidCell { x: usize, y: usize },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, LatticeError>;
