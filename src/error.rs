//! Error types for HashKit
//!
//! Every fallible operation in the crate reports one of these variants.
//! Parameter and construction problems surface as [`HashError::Validation`]
//! before any data is hashed; misuse of a running computation surfaces as
//! [`HashError::StateViolation`].

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for HashKit operations
#[derive(Error, Debug)]
pub enum HashError {
    /// A parameter or configuration value lies outside its legal domain
    #[error("Validation error: {0}")]
    Validation(String),

    /// An operation is not permitted in the current computation state
    #[error("State violation: {0}")]
    StateViolation(String),

    /// An index, offset or length falls outside the addressed collection
    #[error("Index {index} is out of bounds for length {len}")]
    Bounds {
        /// The rejected index
        index: usize,
        /// Length of the collection
        len: usize,
    },

    /// A required input was absent
    #[error("Required input '{0}' was not supplied")]
    NullInput(&'static str),

    /// I/O error while reading input for hashing
    #[error("I/O error at '{path}': {source}")]
    Io {
        /// File being read
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Settings could not be parsed or written
    #[error("Configuration error: {0}")]
    Config(String),
}

impl HashError {
    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a state violation error
    pub fn state_violation(message: impl Into<String>) -> Self {
        Self::StateViolation(message.into())
    }

    /// Create a bounds error
    pub fn bounds(index: usize, len: usize) -> Self {
        Self::Bounds { index, len }
    }

    /// Create an I/O error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Check if this error is recoverable (can be retried)
    ///
    /// Digest computations are deterministic, so only I/O failures qualify.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Io { .. })
    }

    /// Get the path associated with this error, if any
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::Io { path, .. } => Some(path),
            _ => None,
        }
    }
}

/// Result type alias for HashKit operations
pub type Result<T> = std::result::Result<T, HashError>;

impl From<std::io::Error> for HashError {
    fn from(err: std::io::Error) -> Self {
        HashError::Io {
            path: PathBuf::new(),
            source: err,
        }
    }
}

impl From<serde_json::Error> for HashError {
    fn from(err: serde_json::Error) -> Self {
        HashError::Config(err.to_string())
    }
}

/// Extension trait for adding path context to std::io::Result
pub trait IoResultExt<T> {
    /// Add path context to an I/O error
    fn with_path(self, path: impl Into<PathBuf>) -> Result<T>;
}

impl<T> IoResultExt<T> for std::io::Result<T> {
    fn with_path(self, path: impl Into<PathBuf>) -> Result<T> {
        self.map_err(|e| HashError::io(path, e))
    }
}

/// Resolve `offset..offset + len` against `data`, rejecting ranges that overrun it.
pub fn checked_range(data: &[u8], offset: usize, len: usize) -> Result<&[u8]> {
    let end = offset
        .checked_add(len)
        .ok_or_else(|| HashError::bounds(offset, data.len()))?;
    if offset > data.len() {
        return Err(HashError::bounds(offset, data.len()));
    }
    if end > data.len() {
        return Err(HashError::bounds(end, data.len()));
    }
    Ok(&data[offset..end])
}
