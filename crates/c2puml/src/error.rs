//! Error types for model, transform and generation operations.
//!
//! All fallible operations return [`Result<T>`] with context-rich error
//! messages naming the offending path.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for c2puml operations.
pub type Result<T> = std::result::Result<T, ModelError>;

/// Error type covering the model/transform/generate stages.
///
/// Errors are designed to fail fast and surface as a single readable line at
/// the CLI boundary. Per-file and per-pattern problems are logged instead of
/// raised; only missing or unreadable inputs are fatal.
#[derive(Error, Debug)]
pub enum ModelError {
    /// Model file missing on disk
    #[error("Model file not found: {0}")]
    ModelNotFound(PathBuf),

    /// Configuration file missing on disk
    #[error("Configuration file not found: {0}")]
    ConfigNotFound(PathBuf),

    /// Model JSON could not be parsed
    #[error("Failed to load model from {path}: {message}")]
    ModelLoad {
        /// Path of the offending file
        path: PathBuf,
        /// Underlying decode error
        message: String,
    },

    /// Model could not be written
    #[error("Failed to save model to {path}: {message}")]
    ModelSave {
        /// Destination path
        path: PathBuf,
        /// Underlying error
        message: String,
    },

    /// Configuration JSON could not be parsed
    #[error("Failed to load configuration from {path}: {message}")]
    ConfigLoad {
        /// Path of the offending file
        path: PathBuf,
        /// Underlying decode error
        message: String,
    },

    /// File I/O error
    #[error("IO error on {0}: {1}")]
    Io(PathBuf, #[source] std::io::Error),

    /// The generate stage found neither model_transformed.json nor model.json
    #[error("No model file found for generation")]
    NoModelForGeneration,
}
