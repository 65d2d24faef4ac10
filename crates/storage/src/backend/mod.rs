//! Storage backend trait and implementations.
//!
//! This module defines the [`StorageBackend`] trait, a small synchronous
//! interface over one root directory of the collection. Everything the
//! catalog does on disk goes through it, so tests can swap the filesystem for
//! the in-memory [`MockBackend`] (feature `mock`).

mod local;
#[cfg(feature = "mock")]
mod mock;

pub use self::local::LocalBackend;
#[cfg(feature = "mock")]
pub use self::mock::MockBackend;
use crate::error::Result;
use crate::models::{Entry, FileInfo};
use std::path::Path;

/// Unified interface for storage backends.
///
/// Operations are blocking and run one at a time; the collection has exactly
/// one user.
///
/// # Path Handling
/// All paths are relative to the storage root and validated with
/// [`validate_path`](crate::validate_path) before use. Implementations must
/// enforce this validation.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use wallman_storage::{StorageBackend, error::Result};
///
/// fn has_original(backend: &dyn StorageBackend, franchise: &str, index: u32) -> Result<bool> {
///     for ext in ["png", "jpg"] {
///         let path = format!("Action/{franchise}#o{index}.{ext}");
///         if backend.exists(Path::new(&path))? {
///             return Ok(true);
///         }
///     }
///     Ok(false)
/// }
/// ```
pub trait StorageBackend: Send + Sync {
    /// Name of the configured root (`wallpapers`, `originals`...). Used for
    /// logging only.
    fn name(&self) -> &str;

    /// List every file below an optional prefix, recursively, sorted by path.
    ///
    /// A prefix that doesn't exist yields an empty list rather than an error.
    fn list(&self, prefix: Option<&Path>) -> Result<Vec<FileInfo>>;

    /// List the direct children of a directory (`None` for the root), sorted
    /// by path. A directory that doesn't exist yields an empty list.
    fn list_dir(&self, dir: Option<&Path>) -> Result<Vec<Entry>>;

    /// Check if a file exists. Directories don't count.
    fn exists(&self, path: &Path) -> Result<bool>;

    /// Check if a directory exists.
    fn is_dir(&self, path: &Path) -> Result<bool>;

    /// Read file contents.
    ///
    /// Returns [`NotFound`](crate::error::ErrorKind::NotFound) if the file
    /// does not exist.
    fn read(&self, path: &Path) -> Result<Vec<u8>>;

    /// Write file contents, creating parent directories as needed and
    /// replacing any existing file.
    fn write(&self, path: &Path, data: &[u8]) -> Result<()>;

    /// Copy a file within this backend. Never overwrites: an occupied
    /// destination is [`AlreadyExists`](crate::error::ErrorKind::AlreadyExists).
    fn copy(&self, from: &Path, to: &Path) -> Result<()> {
        if self.exists(to)? {
            exn::bail!(crate::error::ErrorKind::AlreadyExists(to.to_path_buf()));
        }
        let data = self.read(from)?;
        self.write(to, &data)
    }

    /// Delete a file.
    fn delete(&self, path: &Path) -> Result<()>;

    /// Rename (move) a file within this backend, creating the destination's
    /// parent directories. Never overwrites: an occupied destination is
    /// [`AlreadyExists`](crate::error::ErrorKind::AlreadyExists).
    fn rename(&self, from: &Path, to: &Path) -> Result<()>;
}
