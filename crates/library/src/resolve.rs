//! Locating the original of a wallpaper.

use std::path::{Path, PathBuf};
use wallman_storage::StorageBackend;
use wallman_storage::error::Result as StorageResult;

/// First candidate file name that exists in `dir`, as a path relative to the
/// backend root.
///
/// `None` isn't an error: a wallpaper without an original is unusual but
/// valid.
pub fn resolve_original(
    backend: &dyn StorageBackend,
    dir: &Path,
    candidates: &[String],
) -> StorageResult<Option<PathBuf>> {
    for candidate in candidates {
        let path = dir.join(candidate);
        if backend.exists(&path)? {
            return Ok(Some(path));
        }
    }
    Ok(None)
}
