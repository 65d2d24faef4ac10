//! In-memory storage backend for testing.

use crate::StorageBackend;
use crate::error::{ErrorKind, Result};
use crate::models::{Entry, FileInfo};
use crate::path::validate as validate_path;
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError, RwLock};

/// In-memory storage backend for testing.
///
/// Files are stored in a `BTreeMap` behind a [`RwLock`], so all trait methods
/// can operate on `&self` and listings come out sorted. Directories exist only
/// through the files below them.
///
/// # Examples
///
/// ```
/// use wallman_storage::backend::{MockBackend, StorageBackend};
/// use std::path::Path;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let backend = MockBackend::with_files([
///     ("Action/Zelda#1.png", b"pixels"),
/// ]);
/// assert!(backend.exists(Path::new("Action/Zelda#1.png"))?);
/// assert!(backend.is_dir(Path::new("Action"))?);
///
/// backend.write(Path::new("Action/Zelda#2.jpg"), b"pixels")?;
/// assert!(backend.exists(Path::new("Action/Zelda#2.jpg"))?);
/// # Ok(())
/// # }
/// ```
pub struct MockBackend {
    name: String,
    storage: RwLock<BTreeMap<PathBuf, Vec<u8>>>,
    failing_renames: Mutex<HashSet<PathBuf>>,
}

impl MockBackend {
    /// Create a mock backend pre-populated with files.
    ///
    /// Panics if any path fails validation (e.g. path traversal). If test
    /// setup is wrong, then test should not pass.
    ///
    /// # Example
    ///
    /// ```
    /// use wallman_storage::backend::MockBackend;
    ///
    /// let backend = MockBackend::with_files([
    ///     ("Action/Zelda#1.png", b"data file 1"),
    ///     ("RPG/Chrono#1.jpg", b"data file 2"),
    /// ]);
    /// ```
    pub fn with_files(files: impl IntoIterator<Item = (impl Into<PathBuf>, impl Into<Vec<u8>>)>) -> Self {
        let mut map = BTreeMap::new();
        for (path, data) in files {
            map.insert(Self::validated("with_files", path.into()), data.into());
        }
        Self {
            name: "mock".to_string(),
            storage: RwLock::new(map),
            failing_renames: Mutex::new(HashSet::new()),
        }
    }

    /// Change the name of the mock backend.
    ///
    /// # Example
    ///
    /// ```
    /// use wallman_storage::backend::MockBackend;
    ///
    /// let backend = MockBackend::default().with_name("originals");
    /// ```
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Make every future rename of `from` fail with a backend error.
    pub fn fail_rename(&self, from: impl Into<PathBuf>) {
        let from = Self::validated("fail_rename", from.into());
        self.failing_renames.lock().unwrap_or_else(PoisonError::into_inner).insert(from);
    }

    /// Every file currently stored, sorted.
    pub fn paths(&self) -> Vec<PathBuf> {
        self.files().keys().cloned().collect()
    }

    fn validated(caller: &str, path: PathBuf) -> PathBuf {
        let Ok(validated) = validate_path(&path) else {
            // Broken test setup, not a storage error.
            panic!("MockBackend::{caller}: invalid path {}", path.display());
        };
        validated
    }

    fn files(&self) -> std::sync::RwLockReadGuard<'_, BTreeMap<PathBuf, Vec<u8>>> {
        self.storage.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn files_mut(&self) -> std::sync::RwLockWriteGuard<'_, BTreeMap<PathBuf, Vec<u8>>> {
        self.storage.write().unwrap_or_else(PoisonError::into_inner)
    }
}
impl Default for MockBackend {
    fn default() -> Self {
        let files: [(&str, &str); 0] = [];
        Self::with_files(files)
    }
}

impl StorageBackend for MockBackend {
    fn name(&self) -> &str {
        &self.name
    }

    fn list(&self, prefix: Option<&Path>) -> Result<Vec<FileInfo>> {
        let prefix = prefix.map(validate_path).transpose()?;
        Ok(self
            .files()
            .iter()
            .filter(|(path, _)| prefix.as_ref().is_none_or(|pfx| path.starts_with(pfx) && *path != pfx))
            .map(|(path, data)| FileInfo::new(path.clone(), data.len() as u64))
            .collect())
    }

    fn list_dir(&self, dir: Option<&Path>) -> Result<Vec<Entry>> {
        let dir = dir.map(validate_path).transpose()?.unwrap_or_default();
        let mut children = BTreeMap::new();
        for (path, data) in self.files().iter() {
            let Ok(relative) = path.strip_prefix(&dir) else {
                continue;
            };
            let Some(first) = relative.components().next() else {
                continue;
            };
            let child = dir.join(first);
            let entry = match child == *path {
                true => Entry::File(FileInfo::new(child.clone(), data.len() as u64)),
                false => Entry::Dir(child.clone()),
            };
            children.insert(child, entry);
        }
        Ok(children.into_values().collect())
    }

    fn exists(&self, path: &Path) -> Result<bool> {
        let path = validate_path(path)?;
        Ok(self.files().contains_key(&path))
    }

    fn is_dir(&self, path: &Path) -> Result<bool> {
        let path = validate_path(path)?;
        Ok(self.files().keys().any(|file| file.starts_with(&path) && *file != path))
    }

    fn read(&self, path: &Path) -> Result<Vec<u8>> {
        let path = validate_path(path)?;
        let data = self.files().get(&path).cloned().ok_or_else(|| exn::Exn::from(ErrorKind::NotFound(path)))?;
        Ok(data)
    }

    fn write(&self, path: &Path, data: &[u8]) -> Result<()> {
        let path = validate_path(path)?;
        self.files_mut().insert(path, data.to_vec());
        Ok(())
    }

    fn delete(&self, path: &Path) -> Result<()> {
        let path = validate_path(path)?;
        self.files_mut().remove(&path).map(|_| ()).ok_or_else(|| exn::Exn::from(ErrorKind::NotFound(path)))
    }

    fn rename(&self, from: &Path, to: &Path) -> Result<()> {
        let from = validate_path(from)?;
        let to = validate_path(to)?;
        if self.failing_renames.lock().unwrap_or_else(PoisonError::into_inner).contains(&from) {
            exn::bail!(ErrorKind::BackendError(format!("injected rename failure for {}", from.display())));
        }
        let mut guard = self.files_mut();
        if guard.contains_key(&to) {
            exn::bail!(ErrorKind::AlreadyExists(to));
        }
        let data = guard.remove(&from).ok_or_else(|| exn::Exn::from(ErrorKind::NotFound(from)))?;
        guard.insert(to, data);
        Ok(())
    }
}
