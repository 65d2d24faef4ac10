//! Codec Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};

/// A codec error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for codec operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The file name does not follow the naming convention the caller asked
    /// for. Rename the file by hand; retrying won't help.
    #[display("'{name}' is not in the expected format: {reason}")]
    Format {
        /// The offending file name.
        name: String,
        /// Which part of the convention was violated.
        reason: &'static str,
    },
}
impl ErrorKind {
    pub(crate) fn format(name: impl Into<String>, reason: &'static str) -> Self {
        Self::Format { name: name.into(), reason }
    }

    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        // A name either follows the convention or it doesn't.
        false
    }
}
