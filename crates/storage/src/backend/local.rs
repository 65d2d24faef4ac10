//! Local filesystem storage backend.
//!
//! Files are stored in a configured directory and accessed using `std::fs`.

use crate::error::{ErrorKind, Result};
use crate::models::{Entry, FileInfo};
use crate::{StorageBackend, path::validate as validate_path};
use exn::ResultExt;
use std::fs::{self, DirEntry};
use std::path::{Path, PathBuf};

/// Local filesystem storage backend.
///
/// All paths are relative to the configured root directory.
///
/// # Examples
///
/// ```no_run
/// use wallman_storage::backend::LocalBackend;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let wallpapers = LocalBackend::new("wallpapers", "/home/me/Pictures/Wallpapers/Desktop")?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct LocalBackend {
    name: String,
    /// Root directory of this part of the collection
    root: PathBuf,
}
impl LocalBackend {
    /// Open a root directory of the collection.
    ///
    /// The root must be absolute and must already exist as a directory:
    /// a typo in the configuration shouldn't silently create an empty
    /// collection somewhere.
    pub fn new(name: impl Into<String>, root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        if !root.is_absolute() {
            exn::bail!(ErrorKind::InvalidPath(root));
        }
        if !root.is_dir() {
            exn::bail!(ErrorKind::NotFound(root));
        }
        Ok(Self { name: name.into(), root })
    }

    /// Absolute directory this backend works in.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get the absolute path for a relative storage path.
    fn absolute_path(&self, path: impl AsRef<Path>) -> Result<PathBuf> {
        let validated = validate_path(path.as_ref())?;
        Ok(self.root.join(validated))
    }

    /// Absolute directory to walk for an optional relative directory.
    fn absolute_dir(&self, dir: Option<&Path>) -> Result<PathBuf> {
        dir.map(|d| self.absolute_path(d)).unwrap_or_else(|| Ok(self.root.clone()))
    }

    /// Convert an absolute path back to a relative storage path.
    fn relative_path(&self, absolute: impl AsRef<Path>) -> Result<PathBuf> {
        let absolute = absolute.as_ref();
        let relative = absolute.strip_prefix(&self.root).or_raise(|| {
            ErrorKind::BackendError(format!("path `{:?}` is not within root `{:?}`", absolute, self.root))
        })?;
        validate_path(relative)
    }

    fn entry(&self, entry: DirEntry) -> Result<Option<Entry>> {
        let path = entry.path();
        let metadata = entry.metadata().map_err(|e| ErrorKind::from_io(e, &path))?;
        let relative = self.relative_path(&path)?;
        Ok(if metadata.is_dir() {
            Some(Entry::Dir(relative))
        } else if metadata.is_file() {
            Some(Entry::File(FileInfo::new(relative, metadata.len())))
        } else {
            // Most likely a broken symlink.
            None
        })
    }

    fn read_entries(&self, dir: &Path) -> Result<Vec<Entry>> {
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(vec![]),
            Err(e) => exn::bail!(ErrorKind::from_io(e, dir)),
        };
        let mut children = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| ErrorKind::from_io(e, dir))?;
            if let Some(child) = self.entry(entry)? {
                children.push(child);
            }
        }
        children.sort_by(|a, b| a.path().cmp(b.path()));
        Ok(children)
    }
}

impl StorageBackend for LocalBackend {
    fn name(&self) -> &str {
        &self.name
    }

    fn list(&self, prefix: Option<&Path>) -> Result<Vec<FileInfo>> {
        let mut stack = vec![self.absolute_dir(prefix)?];
        let mut files = Vec::new();
        while let Some(current) = stack.pop() {
            for entry in self.read_entries(&current)? {
                match entry {
                    Entry::File(info) => files.push(info),
                    Entry::Dir(dir) => stack.push(self.root.join(dir)),
                }
            }
        }
        files.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(files)
    }

    fn list_dir(&self, dir: Option<&Path>) -> Result<Vec<Entry>> {
        self.read_entries(&self.absolute_dir(dir)?)
    }

    fn exists(&self, path: &Path) -> Result<bool> {
        Ok(self.absolute_path(path)?.is_file())
    }

    fn is_dir(&self, path: &Path) -> Result<bool> {
        Ok(self.absolute_path(path)?.is_dir())
    }

    fn read(&self, path: &Path) -> Result<Vec<u8>> {
        let abs_path = self.absolute_path(path)?;
        Ok(fs::read(&abs_path).map_err(|e| ErrorKind::from_io(e, path))?)
    }

    fn write(&self, path: &Path, data: &[u8]) -> Result<()> {
        let abs_path = self.absolute_path(path)?;
        if let Some(parent) = abs_path.parent() {
            fs::create_dir_all(parent).map_err(|e| ErrorKind::from_io(e, path))?;
        }
        Ok(fs::write(&abs_path, data).map_err(|e| ErrorKind::from_io(e, path))?)
    }

    fn copy(&self, from: &Path, to: &Path) -> Result<()> {
        let from_path = self.absolute_path(from)?;
        let to_path = self.absolute_path(to)?;
        if to_path.exists() {
            exn::bail!(ErrorKind::AlreadyExists(to.to_path_buf()));
        }
        if let Some(parent) = to_path.parent() {
            fs::create_dir_all(parent).map_err(|e| ErrorKind::from_io(e, to))?;
        }
        fs::copy(&from_path, &to_path).map_err(|e| ErrorKind::from_io(e, from))?;
        Ok(())
    }

    fn delete(&self, path: &Path) -> Result<()> {
        let abs_path = self.absolute_path(path)?;
        tracing::debug!(backend = %self.name, path = %path.display(), "deleting file");
        Ok(fs::remove_file(&abs_path).map_err(|e| ErrorKind::from_io(e, path))?)
    }

    fn rename(&self, from: &Path, to: &Path) -> Result<()> {
        let from_path = self.absolute_path(from)?;
        let to_path = self.absolute_path(to)?;
        // `fs::rename` silently replaces the destination on Unix.
        if to_path.exists() {
            exn::bail!(ErrorKind::AlreadyExists(to.to_path_buf()));
        }
        if let Some(parent) = to_path.parent() {
            fs::create_dir_all(parent).map_err(|e| ErrorKind::from_io(e, to))?;
        }
        tracing::debug!(backend = %self.name, from = %from.display(), to = %to.display(), "renaming file");
        Ok(fs::rename(&from_path, &to_path).map_err(|e| ErrorKind::from_io(e, from))?)
    }
}
