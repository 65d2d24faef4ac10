//! Index Reconciler Error Types

use derive_more::{Display, Error};
use wallman_catalog::StoredFile;

/// A reconciler error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for reconciler operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    /// A new file name is taken by a file the plan doesn't move away. Raised
    /// before anything is renamed.
    #[display("{_0} is in the way of the corrected file names")]
    Collision(#[error(not(source))] StoredFile),
    /// A rename failed partway through. Renames before it have been applied,
    /// in memory and on disk.
    #[display("renaming {wallpaper} from {from} to {to} failed")]
    RenameFailed { wallpaper: String, from: StoredFile, to: StoredFile },
    /// Checking for collisions failed.
    #[display("storage operation failed")]
    Storage,
    /// A wallpaper refers to a franchise the catalog doesn't know.
    #[display("catalog is inconsistent: {_0}")]
    Inconsistent(#[error(not(source))] String),
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        false
    }
}
