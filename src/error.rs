//! Error types for the Typeahead library.
//!
//! Matching itself never fails: correcting or suggesting for any string,
//! including the empty one, is a total operation. Errors only come from the
//! edges of the crate, such as loading a catalog or a configuration file.
//! All of them are represented by the [`TypeaheadError`] enum.
//!
//! # Examples
//!
//! ```
//! use typeahead::error::{TypeaheadError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(TypeaheadError::invalid_argument("Invalid input"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for Typeahead operations.
#[derive(Error, Debug)]
pub enum TypeaheadError {
    /// I/O errors (reading catalogs, writing output, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Catalog-related errors (malformed catalog files, unknown sections)
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// Configuration values that are out of range or inconsistent
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Invalid argument passed by a caller
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),
}

/// Result type alias for operations that may fail with TypeaheadError.
pub type Result<T> = std::result::Result<T, TypeaheadError>;

impl TypeaheadError {
    /// Create a new catalog error.
    pub fn catalog<S: Into<String>>(msg: S) -> Self {
        TypeaheadError::Catalog(msg.into())
    }

    /// Create a new invalid config error.
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        TypeaheadError::InvalidConfig(msg.into())
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        TypeaheadError::InvalidArgument(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        TypeaheadError::Other(msg.into())
    }
}
