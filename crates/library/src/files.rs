//! File classification on disk.

use crate::context::Context;
use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use std::path::{Path, PathBuf};
use wallman_catalog::StoredFile;
use wallman_codec::ImageFormat;
use wallman_storage::StorageBackend;
use wallman_storage::error::Result as StorageResult;

/// An image file, at its canonical path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    pub path: PathBuf,
    pub format: ImageFormat,
}

/// Decide whether `path` is an image, normalizing its extension on disk.
///
/// **Not a pure predicate**: a `.jpeg` file gets renamed to `.jpg` as a side
/// effect, and the returned path is the renamed one. Callers must use it
/// from here on.
pub fn classify(backend: &dyn StorageBackend, path: &Path) -> StorageResult<Option<ImageFile>> {
    let Some(image) = wallman_storage::file_name(path).ok().and_then(wallman_codec::classify) else {
        return Ok(None);
    };
    let path = match image.rename_to {
        Some(name) => {
            let renamed = path.with_file_name(name);
            backend.rename(path, &renamed)?;
            tracing::info!(
                backend = backend.name(),
                from = %path.display(),
                to = %renamed.display(),
                "normalized image file extension"
            );
            renamed
        },
        None => path.to_path_buf(),
    };
    Ok(Some(ImageFile { path, format: image.format }))
}

/// Move a file between (or within) roots. Never overwrites.
///
/// Within one root this is a rename; across roots the contents are written
/// to the destination before the source is deleted.
pub fn move_file(ctx: &Context, from: &StoredFile, to: &StoredFile) -> Result<()> {
    let source = ctx.backend(from.root)?;
    if from.root == to.root {
        source.rename(&from.path, &to.path).or_raise(|| ErrorKind::Storage)?;
    } else {
        copy_file(ctx, from, to)?;
        source.delete(&from.path).or_raise(|| ErrorKind::Storage)?;
    }
    tracing::debug!(from = %from, to = %to, "moved file");
    Ok(())
}

/// Copy a file between (or within) roots. Never overwrites.
pub fn copy_file(ctx: &Context, from: &StoredFile, to: &StoredFile) -> Result<()> {
    let source = ctx.backend(from.root)?;
    if from.root == to.root {
        return source.copy(&from.path, &to.path).or_raise(|| ErrorKind::Storage);
    }
    let target = ctx.backend(to.root)?;
    if target.exists(&to.path).or_raise(|| ErrorKind::Storage)? {
        exn::bail!(ErrorKind::Occupied(to.clone()));
    }
    let data = source.read(&from.path).or_raise(|| ErrorKind::Storage)?;
    target.write(&to.path, &data).or_raise(|| ErrorKind::Storage)
}

/// Whether a file exists in its root.
pub fn exists(ctx: &Context, file: &StoredFile) -> Result<bool> {
    ctx.backend(file.root)?.exists(&file.path).or_raise(|| ErrorKind::Storage)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Fixture, mock};
    use wallman_catalog::Root;
    use wallman_storage::backend::MockBackend;

    #[test]
    fn test_jpeg_is_renamed() {
        let backend = MockBackend::with_files([("Action/Zelda#1.jpeg", b"x")]);
        let image = classify(&backend, Path::new("Action/Zelda#1.jpeg")).unwrap().unwrap();
        assert_eq!(image.path, Path::new("Action/Zelda#1.jpg"));
        assert_eq!(image.format, ImageFormat::Jpeg);
        assert_eq!(backend.paths(), vec![PathBuf::from("Action/Zelda#1.jpg")]);
    }

    #[test]
    fn test_canonical_image_untouched() {
        let backend = MockBackend::with_files([("Action/Zelda#1.png", b"x")]);
        let image = classify(&backend, Path::new("Action/Zelda#1.png")).unwrap().unwrap();
        assert_eq!(image.path, Path::new("Action/Zelda#1.png"));
        assert_eq!(image.format, ImageFormat::Png);
    }

    #[test]
    fn test_not_an_image() {
        let backend = MockBackend::with_files([("Action/notes.txt", b"x")]);
        assert_eq!(classify(&backend, Path::new("Action/notes.txt")).unwrap(), None);
        assert_eq!(backend.paths(), vec![PathBuf::from("Action/notes.txt")]);
    }

    #[test]
    fn test_rename_collision_is_an_error() {
        let backend = MockBackend::with_files([("Action/Zelda#1.jpeg", b"x"), ("Action/Zelda#1.jpg", b"y")]);
        assert!(classify(&backend, Path::new("Action/Zelda#1.jpeg")).is_err());
    }

    #[test]
    fn test_move_across_roots() {
        let fx = Fixture::new(mock("wallpapers", []), mock("originals", []), mock("staging", ["Action/Zelda.png"]));
        let from = StoredFile::new(Root::Staging, "Action/Zelda.png");
        let to = StoredFile::new(Root::Wallpapers, "Action/Zelda#1.png");
        move_file(&fx.ctx, &from, &to).unwrap();
        assert!(fx.staging.paths().is_empty());
        assert_eq!(fx.wallpapers.paths(), vec![PathBuf::from("Action/Zelda#1.png")]);
    }

    #[test]
    fn test_move_never_overwrites() {
        let fx = Fixture::new(
            mock("wallpapers", ["Action/Zelda#1.png"]),
            mock("originals", []),
            mock("staging", ["Action/Zelda.png"]),
        );
        let from = StoredFile::new(Root::Staging, "Action/Zelda.png");
        let to = StoredFile::new(Root::Wallpapers, "Action/Zelda#1.png");
        let err = move_file(&fx.ctx, &from, &to).unwrap_err();
        assert!(matches!(&*err, ErrorKind::Occupied(file) if *file == to));
        // The source is still there.
        assert_eq!(fx.staging.paths(), vec![PathBuf::from("Action/Zelda.png")]);
    }

    #[test]
    fn test_move_within_root() {
        let fx = Fixture::new(mock("wallpapers", ["Action/Zelda#3.png"]), mock("originals", []), mock("staging", []));
        let from = StoredFile::new(Root::Wallpapers, "Action/Zelda#3.png");
        move_file(&fx.ctx, &from, &from.with_file_name("Zelda#1.png")).unwrap();
        assert_eq!(fx.wallpapers.paths(), vec![PathBuf::from("Action/Zelda#1.png")]);
    }
}
