//! Error types for kinnet core

use crate::limits::ValidationError;
use thiserror::Error;

/// Result type alias using kinnet's Error
pub type Result<T> = std::result::Result<T, Error>;

/// kinnet error types
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid argument: {0}")]
    Validation(#[from] ValidationError),

    #[error("Lookup failed: {0}")]
    Lookup(String),

    #[error("Invariant violated: {0}")]
    Invariant(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
