//! Library Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction. Each operation raises its own kind
//! on top of whatever failed underneath, so the error tree reads from "what
//! was being done" down to "what broke".

use derive_more::{Display, Error};
use wallman_catalog::{Root, StoredFile};

/// A library error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for library operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    /// The operation needs a root directory that isn't configured.
    #[display("no {_0} directory configured")]
    NotConfigured(#[error(not(source))] Root),
    /// A storage backend operation failed.
    #[display("storage operation failed")]
    Storage,
    /// A file would be moved or copied onto an existing one.
    #[display("{_0} already exists")]
    Occupied(#[error(not(source))] StoredFile),
    /// A wallpaper refers to a franchise or type the catalog doesn't know.
    #[display("catalog is inconsistent: {_0}")]
    Inconsistent(#[error(not(source))] String),
    /// A wallpaper couldn't be built from its file.
    #[display("could not build wallpaper")]
    Build,
    #[display("full scan failed")]
    Scan,
    #[display("sorting in new wallpapers failed")]
    SortIn,
    #[display("fixing indexes failed")]
    Reconcile,
    #[display("sorting out orphaned originals failed")]
    Orphans,
    #[display("merging wallpapers failed")]
    Merge,
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        false
    }
}
