//! Catalog Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};

/// A catalog error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for catalog operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    /// Blank names, or an id that doesn't belong to this catalog.
    #[display("invalid argument: {_0}")]
    InvalidArgument(#[error(not(source))] String),
    /// A franchise of that name is already filed under another type.
    #[display("franchise '{franchise}' belongs to type '{existing}', not '{requested}'")]
    TaxonomyConflict { franchise: String, existing: String, requested: String },
    /// The franchise already uses the highest possible index.
    #[display("franchise '{_0}' has no index left after {}", u32::MAX)]
    IndexExhausted(#[error(not(source))] String),
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        false
    }
}
