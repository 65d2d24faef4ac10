//! Errors raised by the storage backends.
//!
//! Every variant that is about a single file carries its path relative to the
//! backend root, so callers can tell the user which wallpaper was affected.

use derive_more::{Display, Error};
use std::io::Error as IoError;
use std::path::{Path, PathBuf};

pub type Error = exn::Exn<ErrorKind>;
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    #[display("not found: {}", _0.display())]
    NotFound(#[error(not(source))] PathBuf),
    #[display("permission denied: {}", _0.display())]
    PermissionDenied(#[error(not(source))] PathBuf),
    /// Destination already exists; renames and copies never overwrite
    #[display("file already exists: {}", _0.display())]
    AlreadyExists(#[error(not(source))] PathBuf),
    #[display("I/O error: {_0}")]
    Io(IoError),
    /// Path that cannot be resolved inside the backend root
    #[display("invalid path: {}", _0.display())]
    InvalidPath(#[error(not(source))] PathBuf),
    /// Failure with no I/O error behind it, such as an injected mock failure
    #[display("backend error: {_0}")]
    BackendError(#[error(not(source))] String),
}
impl From<IoError> for ErrorKind {
    fn from(err: IoError) -> Self {
        Self::Io(err)
    }
}
impl ErrorKind {
    /// Maps an I/O error onto the categories callers act on, keeping the
    /// path that caused it.
    pub fn from_io(err: IoError, path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        match err.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound(path),
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied(path),
            std::io::ErrorKind::AlreadyExists => Self::AlreadyExists(path),
            _ => Self::Io(err),
        }
    }

    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Io(_) | Self::BackendError(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_io_keeps_path() {
        let err = IoError::new(std::io::ErrorKind::NotFound, "gone");
        let kind = ErrorKind::from_io(err, "Action/Zelda#1.png");
        assert!(matches!(&kind, ErrorKind::NotFound(p) if p == Path::new("Action/Zelda#1.png")));
        assert_eq!(kind.to_string(), "not found: Action/Zelda#1.png");
        assert!(!kind.is_retryable());
    }

    #[test]
    fn test_other_io_is_retryable() {
        let err = IoError::other("disk on fire");
        let kind = ErrorKind::from_io(err, "Action/Zelda#1.png");
        assert!(matches!(kind, ErrorKind::Io(_)));
        assert!(kind.is_retryable());
    }
}
