use thiserror::Error;

/// Result type for geometry operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during geometry processing
#[derive(Error, Debug)]
pub enum Error {
    #[error("Degenerate plane: {0}")]
    DegeneratePlane(String),

    #[error("Core decoder error: {0}")]
    CoreError(#[from] levelkit_core::Error),
}
