//! Error types for the optic parser.

use thiserror::Error;

/// Main error type for optic operations.
#[derive(Error, Debug)]
pub enum Error {
    /// An option registration carried an unusable source token
    #[error("Invalid option token: {0}")]
    InvalidToken(String),

    /// A raw value could not be converted to the requested type
    #[error("Cannot convert '{0}' to {1}")]
    NotConvertible(String, String),

    /// Generic error with custom message, available to custom converters
    #[error("{0}")]
    Other(String),
}

/// Result type alias for optic operations
pub type Result<T> = std::result::Result<T, Error>;
