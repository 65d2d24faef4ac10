//! Error types for the [`build`](super) module.
//!
//! Uses [`exn`] for automatic location tracking and error tree construction.

use derive_more::{Display, Error};
use std::path::PathBuf;
use wallman_catalog::Rollback;
use wallman_catalog::error::{Error as CatalogError, ErrorKind as CatalogErrorKind};
use wallman_codec::error::Error as CodecError;

/// A build error with automatic location tracking via [`exn::Exn`].
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for build operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Why a file couldn't become a wallpaper.
///
/// Every kind except [`ErrorKind::UserAborted`] means the file (or the
/// collection) needs fixing before trying again. A user abort is a decision,
/// batch operations skip the file and carry on.
#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    /// Blank names, or a file that isn't where its naming scheme expects it.
    #[display("invalid argument: {_0}")]
    InvalidArgument(#[error(not(source))] String),
    #[display("not an image: {}", _0.display())]
    NotAnImage(#[error(not(source))] PathBuf),
    #[display("file not found: {}", _0.display())]
    FileNotFound(#[error(not(source))] PathBuf),
    /// The directory the original should be looked up in is gone.
    #[display("directory not found: {}", _0.display())]
    DirectoryNotFound(#[error(not(source))] PathBuf),
    /// The file name doesn't follow the naming scheme the mode requires.
    #[display("{_0}")]
    Format(#[error(not(source))] String),
    #[display("franchise '{franchise}' belongs to type '{existing}', not '{requested}'")]
    TaxonomyConflict { franchise: String, existing: String, requested: String },
    /// The user declined a confirmation. `rollback` lists the taxonomy nodes
    /// this attempt had created; they are already removed from the catalog.
    #[display("aborted by user: {reason} ({rollback})")]
    UserAborted { reason: String, rollback: Rollback },
    /// Checking, reading or renaming a file failed.
    #[display("I/O failure")]
    Io,
}

impl ErrorKind {
    /// Re-raise a catalog error as the equivalent build error, keeping the
    /// catalog's frame as a child in the error tree.
    #[track_caller]
    pub(crate) fn catalog(err: CatalogError) -> Error {
        let kind = match &*err {
            CatalogErrorKind::InvalidArgument(message) => Self::InvalidArgument(message.clone()),
            CatalogErrorKind::TaxonomyConflict { franchise, existing, requested } => Self::TaxonomyConflict {
                franchise: franchise.clone(),
                existing: existing.clone(),
                requested: requested.clone(),
            },
            CatalogErrorKind::IndexExhausted(_) => Self::InvalidArgument((*err).to_string()),
        };
        err.raise(kind)
    }

    #[track_caller]
    pub(crate) fn codec(err: CodecError) -> Error {
        let message = (*err).to_string();
        err.raise(Self::Format(message))
    }

    pub fn is_user_abort(&self) -> bool {
        matches!(self, Self::UserAborted { .. })
    }

    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        false
    }
}
