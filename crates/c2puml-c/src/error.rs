use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during project parsing.
///
/// Per-file parse problems are not represented here: a file that cannot be
/// read or decoded is logged and skipped so the rest of the project parse
/// continues. Only conditions that invalidate the whole run are errors.
#[derive(Error, Debug)]
pub enum ParserError {
    /// Failed to read a file or directory
    #[error("IO error reading {0}: {1}")]
    Io(PathBuf, #[source] std::io::Error),

    /// None of the given project roots exist
    #[error("Project root not found: {0}")]
    RootNotFound(PathBuf),

    /// Error from the model layer (saving the parse output)
    #[error(transparent)]
    Model(#[from] c2puml::ModelError),
}

/// Result type for parser operations.
pub type ParserResult<T> = Result<T, ParserError>;
