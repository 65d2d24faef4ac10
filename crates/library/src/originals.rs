//! Sorting out originals whose edited wallpaper is gone.

use crate::context::Context;
use crate::error::{ErrorKind, Result};
use crate::files;
use exn::ResultExt;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use wallman_catalog::{Catalog, Root, StoredFile};
use wallman_codec::{candidates, edited_stem_of};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct OrphanReport {
    /// Orphaned originals, relative to the originals root.
    pub orphans: Vec<PathBuf>,
    /// Whether they were moved to the trash root.
    pub moved: bool,
}

/// Find originals (`#o` files in the originals root) with no cataloged
/// wallpaper under the same type, and with `apply` move them to the trash
/// root.
#[tracing::instrument(level = "debug", skip_all, fields(apply = apply))]
pub fn sort_out_originals(ctx: &Context, catalog: &Catalog, apply: bool) -> Result<OrphanReport> {
    sort_out_inner(ctx, catalog, apply).or_raise(|| ErrorKind::Orphans)
}

fn sort_out_inner(ctx: &Context, catalog: &Catalog, apply: bool) -> Result<OrphanReport> {
    let cataloged: HashSet<&Path> = catalog
        .wallpapers()
        .iter()
        .filter(|w| w.file.root == Root::Wallpapers)
        .map(|w| w.file.path.as_path())
        .collect();
    let originals = ctx.originals();
    let mut report = OrphanReport::default();

    for info in originals.list(None).or_raise(|| ErrorKind::Storage)? {
        let Some(image) = files::classify(originals.as_ref(), &info.path).or_raise(|| ErrorKind::Storage)? else {
            continue;
        };
        let Some(stem) = wallman_storage::file_name(&image.path).ok().and_then(edited_stem_of) else {
            continue;
        };
        let dir = image.path.parent().unwrap_or(Path::new(""));
        if candidates(&stem).iter().any(|name| cataloged.contains(dir.join(name).as_path())) {
            continue;
        }
        tracing::info!(path = %image.path.display(), "orphaned original");
        report.orphans.push(image.path);
    }

    if apply && !report.orphans.is_empty() {
        for path in &report.orphans {
            let name = wallman_storage::file_name(path).or_raise(|| ErrorKind::Storage)?;
            let from = StoredFile::new(Root::Originals, path.clone());
            files::move_file(ctx, &from, &StoredFile::new(Root::Trash, name))?;
        }
        report.moved = true;
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::{ScanOptions, scan};
    use crate::testing::{Answers, Fixture, mock};

    fn fixture() -> Fixture {
        Fixture::new(
            mock("wallpapers", ["Action/Zelda#1.png", "Puzzle/Tetris#2.jpg"]),
            mock(
                "originals",
                [
                    "Action/Zelda#o1.jpg",
                    "Action/Zelda#o2.png",
                    "Action/Metroid#o1.jpeg",
                    "Action/notes.txt",
                    "Puzzle/Tetris#o2.png",
                    "Puzzle/IMG_0042.png",
                ],
            ),
            mock("staging", []),
        )
    }

    fn scanned(fx: &Fixture) -> Catalog {
        let mut catalog = Catalog::new();
        scan(&fx.ctx, &mut catalog, &mut Answers::always(false), ScanOptions::default()).unwrap();
        catalog
    }

    #[test]
    fn test_list_orphans() {
        let fx = fixture();
        let catalog = scanned(&fx);
        let report = sort_out_originals(&fx.ctx, &catalog, false).unwrap();
        assert_eq!(report.orphans, vec![PathBuf::from("Action/Metroid#o1.jpg"), PathBuf::from("Action/Zelda#o2.png")]);
        assert!(!report.moved);
        assert!(fx.trash.paths().is_empty());
    }

    #[test]
    fn test_move_orphans_to_trash() {
        let fx = fixture();
        let catalog = scanned(&fx);
        let report = sort_out_originals(&fx.ctx, &catalog, true).unwrap();
        assert!(report.moved);
        assert_eq!(fx.trash.paths(), vec![PathBuf::from("Metroid#o1.jpg"), PathBuf::from("Zelda#o2.png")]);
        assert_eq!(
            fx.originals.paths(),
            vec![
                PathBuf::from("Action/Zelda#o1.jpg"),
                PathBuf::from("Action/notes.txt"),
                PathBuf::from("Puzzle/IMG_0042.png"),
                PathBuf::from("Puzzle/Tetris#o2.png"),
            ]
        );
    }
}
