//! Storage models.

use std::path::PathBuf;

/// File metadata returned by storage backends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileInfo {
    /// Relative path from storage root
    pub path: PathBuf,
    /// File size in bytes
    pub size: u64,
}
impl FileInfo {
    pub fn new(path: impl Into<PathBuf>, size: u64) -> Self {
        Self { path: path.into(), size }
    }
}

/// A direct child of a directory, as returned by
/// [`list_dir`](crate::StorageBackend::list_dir).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    File(FileInfo),
    Dir(PathBuf),
}
impl Entry {
    pub fn path(&self) -> &PathBuf {
        match self {
            Self::File(info) => &info.path,
            Self::Dir(path) => path,
        }
    }
}
