// src/error.rs

//! Error types for the recipe workflow
//!
//! The four step errors are fatal: the first one aborts the remaining
//! steps of a cook. Each carries the diagnostics of the underlying tool
//! exactly as the tool printed them.

use thiserror::Error;

/// Errors produced while cooking the recipe
#[derive(Error, Debug)]
pub enum Error {
    /// Cloning the source repository failed
    #[error("Source acquisition failed: {0}")]
    AcquisitionError(String),

    /// The build tool could not be located or its configure step failed
    #[error("Build configuration failed: {0}")]
    ConfigurationError(String),

    /// Compilation failed
    #[error("Build failed: {0}")]
    BuildError(String),

    /// The install step failed
    #[error("Packaging failed: {0}")]
    PackagingError(String),

    /// A recipe, profile or setting could not be parsed
    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("I/O error: {0}")]
    IoError(String),
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::IoError(err.to_string())
    }
}

/// Result type alias using the recipe [`Error`]
pub type Result<T> = std::result::Result<T, Error>;
