//! Sorting newly named files from the staging root into the collection.
//!
//! Staging is laid out by type:
//! - `staging/<Type>/<Franchise>.ext` (optionally `<Franchise>#<token>.ext`)
//!   is built in [`Mode::New`], next to an original `<Franchise>#o<token>.ext`.
//! - `staging/<Type>/<Franchise>/<stem>_cut.ext` is built in
//!   [`Mode::NewInSubFolder`], next to an original `<stem>.ext`.
//!
//! Every built wallpaper gets the next free index of its franchise and is
//! moved to `wallpapers/<Type>/<Franchise>#<N>.ext`, its original to
//! `originals/<Type>/<Franchise>#o<N>.ext`. Anything else is left in place.

use crate::build::{self, Mode, Policy};
use crate::context::Context;
use crate::error::{ErrorKind, Result};
use crate::files;
use crate::prompt::Confirm;
use exn::{OptionExt, ResultExt};
use std::path::{Path, PathBuf};
use wallman_catalog::{Catalog, Rollback, Root, StoredFile};
use wallman_codec::{GroupedName, edited_file_name, is_original, original_file_name};
use wallman_storage::Entry;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SortInReport {
    /// Labels of the wallpapers that were added.
    pub added: Vec<String>,
    /// Staging files the user declined to add.
    pub skipped: Vec<PathBuf>,
}

/// Add every named file in staging to the collection.
///
/// Declined files stay in staging and are reported; any other failure stops
/// the run, keeping the files sorted in so far.
#[tracing::instrument(level = "debug", skip_all)]
pub fn sort_in(ctx: &Context, catalog: &mut Catalog, confirm: &mut dyn Confirm) -> Result<SortInReport> {
    sort_in_inner(ctx, catalog, confirm).or_raise(|| ErrorKind::SortIn)
}

fn sort_in_inner(ctx: &Context, catalog: &mut Catalog, confirm: &mut dyn Confirm) -> Result<SortInReport> {
    let staging = ctx.staging();
    let mut report = SortInReport::default();

    // `.jpeg` files get their final names up front, so an original listed
    // after its edited file is still found under the name the lookup expects.
    for info in staging.list(None).or_raise(|| ErrorKind::Storage)? {
        files::classify(staging.as_ref(), &info.path).or_raise(|| ErrorKind::Storage)?;
    }

    for entry in staging.list_dir(None).or_raise(|| ErrorKind::Storage)? {
        let type_dir = match entry {
            Entry::Dir(dir) => dir,
            Entry::File(info) => {
                tracing::debug!(path = %info.path.display(), "not inside a type folder, leaving it");
                continue;
            },
        };
        let mut groups = Vec::new();
        for entry in staging.list_dir(Some(&type_dir)).or_raise(|| ErrorKind::Storage)? {
            match entry {
                Entry::Dir(dir) => groups.push(dir),
                Entry::File(info) => sort_in_file(ctx, catalog, confirm, &info.path, Mode::New, &mut report)?,
            }
        }
        for dir in groups {
            for entry in staging.list_dir(Some(&dir)).or_raise(|| ErrorKind::Storage)? {
                if let Entry::File(info) = entry {
                    sort_in_file(ctx, catalog, confirm, &info.path, Mode::NewInSubFolder, &mut report)?;
                }
            }
        }
    }

    tracing::info!(added = report.added.len(), skipped = report.skipped.len(), "sort-in complete");
    Ok(report)
}

fn sort_in_file(
    ctx: &Context,
    catalog: &mut Catalog,
    confirm: &mut dyn Confirm,
    path: &Path,
    mode: Mode,
    report: &mut SortInReport,
) -> Result<()> {
    let Some(image) = files::classify(ctx.staging().as_ref(), path).or_raise(|| ErrorKind::Storage)? else {
        return Ok(());
    };
    let file_name = wallman_storage::file_name(&image.path).or_raise(|| ErrorKind::Storage)?;
    // Originals travel with their edited file.
    let is_edited = match mode {
        Mode::NewInSubFolder => GroupedName::parse(file_name).is_some(),
        _ => !is_original(file_name),
    };
    if !is_edited {
        return Ok(());
    }

    let file = StoredFile::new(Root::Staging, image.path);
    let (position, created) = match build::build_with_rollback(ctx, catalog, confirm, &file, &Policy::from(mode)) {
        Ok(built) => built,
        Err(err) if err.is_user_abort() => {
            tracing::warn!(file = %file, "skipped by user");
            report.skipped.push(file.path);
            return Ok(());
        },
        Err(err) => return Err(err).or_raise(|| ErrorKind::Build),
    };
    file_in(ctx, catalog, position, &created)?;
    report.added.push(catalog.label(&catalog.wallpapers()[position]));
    Ok(())
}

/// Move a freshly built wallpaper and its original to their place in the
/// collection.
///
/// Both targets are checked before anything moves; if either is taken the
/// wallpaper and the taxonomy its build `created` are removed from the
/// catalog again.
fn file_in(ctx: &Context, catalog: &mut Catalog, position: usize, created: &Rollback) -> Result<()> {
    let wallpaper = catalog.wallpapers()[position].clone();
    let (type_name, franchise) = catalog
        .names(wallpaper.franchise)
        .map(|(t, f)| (t.to_string(), f.to_string()))
        .ok_or_raise(|| ErrorKind::Inconsistent(format!("unknown {}", wallpaper.franchise)))?;

    let ext = wallpaper.file.extension().unwrap_or_default();
    let target = StoredFile::new(
        Root::Wallpapers,
        Path::new(&type_name).join(edited_file_name(&franchise, wallpaper.index, ext)),
    );
    // The original keeps its own extension.
    let original = wallpaper.original.as_ref().map(|original| {
        let ext = original.extension().unwrap_or_default();
        let to = StoredFile::new(
            Root::Originals,
            Path::new(&type_name).join(original_file_name(&franchise, wallpaper.index, ext)),
        );
        (original, to)
    });

    let targets = std::iter::once(&target).chain(original.as_ref().map(|(_, to)| to));
    for to in targets {
        if files::exists(ctx, to)? {
            catalog.remove_wallpaper(position);
            catalog.apply(created);
            exn::bail!(ErrorKind::Occupied(to.clone()));
        }
    }

    files::move_file(ctx, &wallpaper.file, &target)?;
    if let Some(w) = catalog.wallpaper_mut(position) {
        w.file = target;
    }
    if let Some((from, to)) = original {
        files::move_file(ctx, from, &to)?;
        if let Some(w) = catalog.wallpaper_mut(position) {
            w.original = Some(to);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::{ScanOptions, scan};
    use crate::testing::{Answers, Fixture, mock};

    fn fixture() -> Fixture {
        Fixture::new(
            mock("wallpapers", ["Action/Metroid#1.png"]),
            mock("originals", ["Action/Metroid#o1.png"]),
            mock(
                "staging",
                [
                    "Action/Metroid.png",
                    "Action/Metroid#o.jpg",
                    "Action/Zelda/IMG_1_cut.png",
                    "Action/Zelda/IMG_1.jpg",
                    "Puzzle/Tetris.png",
                    "readme.txt",
                ],
            ),
        )
    }

    fn scanned(fx: &Fixture) -> Catalog {
        let mut catalog = Catalog::new();
        scan(&fx.ctx, &mut catalog, &mut Answers::always(false), ScanOptions::default()).unwrap();
        catalog
    }

    #[test]
    fn test_sort_in() {
        let fx = fixture();
        let mut catalog = scanned(&fx);
        let mut answers = Answers::always(true);
        let report = sort_in(&fx.ctx, &mut catalog, &mut answers).unwrap();

        assert_eq!(report.added, vec!["Action/Metroid#2", "Action/Zelda#1", "Puzzle/Tetris#1"]);
        assert!(report.skipped.is_empty());
        // Zelda franchise, then Puzzle type, Tetris franchise and its missing original.
        assert_eq!(answers.questions.len(), 4);

        assert_eq!(
            fx.wallpapers.paths(),
            vec![
                PathBuf::from("Action/Metroid#1.png"),
                PathBuf::from("Action/Metroid#2.png"),
                PathBuf::from("Action/Zelda#1.png"),
                PathBuf::from("Puzzle/Tetris#1.png"),
            ]
        );
        assert_eq!(
            fx.originals.paths(),
            vec![
                PathBuf::from("Action/Metroid#o1.png"),
                PathBuf::from("Action/Metroid#o2.jpg"),
                PathBuf::from("Action/Zelda#o1.jpg"),
            ]
        );
        assert_eq!(fx.staging.paths(), vec![PathBuf::from("readme.txt")]);

        let metroid = &catalog.wallpapers()[1];
        assert_eq!(metroid.file, StoredFile::new(Root::Wallpapers, "Action/Metroid#2.png"));
        assert_eq!(metroid.original, Some(StoredFile::new(Root::Originals, "Action/Metroid#o2.jpg")));
    }

    #[test]
    fn test_declined_files_stay_in_staging() {
        let fx = fixture();
        let mut catalog = scanned(&fx);
        // Create Zelda, decline the Puzzle type.
        let mut answers = Answers::script([true, false]);
        let report = sort_in(&fx.ctx, &mut catalog, &mut answers).unwrap();
        assert_eq!(report.added, vec!["Action/Metroid#2", "Action/Zelda#1"]);
        assert_eq!(report.skipped, vec![PathBuf::from("Puzzle/Tetris.png")]);
        assert_eq!(fx.staging.paths(), vec![PathBuf::from("Puzzle/Tetris.png"), PathBuf::from("readme.txt")]);
        assert!(catalog.try_get_type("Puzzle").unwrap().is_none());
    }

    #[test]
    fn test_occupied_target() {
        let fx = Fixture::new(
            mock("wallpapers", ["Action/Metroid#1.png"]),
            mock("originals", []),
            mock("staging", ["Action/Metroid.png"]),
        );
        // Not scanned, so the catalog hands out index 1 again.
        let mut catalog = Catalog::new();
        let err = sort_in(&fx.ctx, &mut catalog, &mut Answers::always(true)).unwrap_err();
        assert!(matches!(&*err, ErrorKind::SortIn));
        assert!(catalog.wallpapers().is_empty());
        assert_eq!(catalog.types().count(), 0);
        assert_eq!(catalog.franchises().count(), 0);
        assert_eq!(fx.staging.paths(), vec![PathBuf::from("Action/Metroid.png")]);
    }

    #[test]
    fn test_occupied_target_keeps_existing_taxonomy() {
        let fx = Fixture::new(
            mock("wallpapers", ["Action/Metroid#1.png", "Puzzle/Tetris#1.png"]),
            mock("originals", ["Action/Metroid#o1.png"]),
            mock("staging", ["Puzzle/Tetris.png"]),
        );
        // Tetris#1 has no original and is declined while scanning.
        let mut catalog = scanned(&fx);
        assert_eq!(catalog.wallpapers().len(), 1);

        let mut answers = Answers::always(true);
        let err = sort_in(&fx.ctx, &mut catalog, &mut answers).unwrap_err();
        assert!(matches!(&*err, ErrorKind::SortIn));
        assert_eq!(answers.questions.len(), 3);
        assert_eq!(catalog.types().map(|t| t.name.as_str()).collect::<Vec<_>>(), vec!["Action"]);
        assert_eq!(catalog.try_get_franchise("Tetris").unwrap(), None);
        assert_eq!(catalog.wallpapers().len(), 1);
        assert_eq!(fx.wallpapers.paths().len(), 2);
        assert_eq!(fx.staging.paths(), vec![PathBuf::from("Puzzle/Tetris.png")]);
    }

    #[test]
    fn test_jpeg_original_listed_after_its_wallpaper() {
        let fx = Fixture::new(
            mock("wallpapers", ["Action/Metroid#1.png"]),
            mock("originals", ["Action/Metroid#o1.png"]),
            mock("staging", ["Action/Metroid#2.png", "Action/Metroid#o2.jpeg"]),
        );
        let mut catalog = scanned(&fx);
        let mut answers = Answers::always(false);
        let report = sort_in(&fx.ctx, &mut catalog, &mut answers).unwrap();
        assert_eq!(report.added, vec!["Action/Metroid#2"]);
        assert!(answers.questions.is_empty());
        assert_eq!(
            fx.originals.paths(),
            vec![PathBuf::from("Action/Metroid#o1.png"), PathBuf::from("Action/Metroid#o2.jpg")]
        );
        assert!(fx.staging.paths().is_empty());
    }

    #[test]
    fn test_sort_in_on_disk() {
        use crate::reconcile::fix_indexes;
        use std::fs;
        use std::sync::Arc;
        use wallman_storage::BackendHandle;
        use wallman_storage::backend::LocalBackend;

        let dir = tempfile::tempdir().unwrap();
        let touch = |path: &str| {
            let path = dir.path().join(path);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, b"image").unwrap();
        };
        touch("Desktop/Action/Zelda#1.png");
        touch("Desktop/Action/Zelda#4.png");
        touch("Original/Action/Zelda#o4.jpg");
        touch("named/Action/Zelda.jpeg");
        touch("named/Action/Zelda#o.png");

        let open = |name: &str| -> BackendHandle { Arc::new(LocalBackend::new(name, dir.path().join(name)).unwrap()) };
        let ctx = Context::new(open("Desktop"), open("Original"), open("named"));
        let mut catalog = Catalog::new();
        let options = ScanOptions { reset: true, ignore_missing_originals: true };
        scan(&ctx, &mut catalog, &mut Answers::always(false), options).unwrap();

        let report = sort_in(&ctx, &mut catalog, &mut Answers::always(false)).unwrap();
        assert_eq!(report.added, vec!["Action/Zelda#5"]);
        assert!(dir.path().join("Desktop/Action/Zelda#5.jpg").is_file());
        assert!(dir.path().join("Original/Action/Zelda#o5.png").is_file());

        let report = fix_indexes(&ctx, &mut catalog).unwrap();
        assert_eq!(report.unchanged, 1);
        assert_eq!(report.corrected.len(), 2);
        for name in ["Zelda#1.png", "Zelda#2.png", "Zelda#3.jpg"] {
            assert!(dir.path().join("Desktop/Action").join(name).is_file(), "{name}");
        }
        for name in ["Zelda#o2.jpg", "Zelda#o3.png"] {
            assert!(dir.path().join("Original/Action").join(name).is_file(), "{name}");
        }
    }
}
