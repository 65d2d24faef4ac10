//! Full scan of the wallpapers root.
//!
//! Every image under `wallpapers/` is built in [`Mode::Scan`], paired with its
//! original under `originals/<Type>/`, and the catalog is sorted afterwards.
//! Originals that ended up in the wallpapers root and files that aren't
//! images are passed over.

use crate::build::{self, Mode, Policy};
use crate::context::Context;
use crate::error::{ErrorKind, Result};
use crate::files;
use crate::prompt::Confirm;
use exn::ResultExt;
use std::path::PathBuf;
use wallman_catalog::{Catalog, Root, StoredFile};
use wallman_codec::is_original;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScanOptions {
    /// Empty the catalog before scanning.
    pub reset: bool,
    /// Accept wallpapers without an original without asking.
    pub ignore_missing_originals: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ScanReport {
    /// Wallpapers in the catalog after the scan.
    pub wallpapers: usize,
    pub with_original: usize,
    /// Files the user declined to catalog.
    pub skipped: Vec<PathBuf>,
    /// Files that aren't images, or are originals in the wrong root.
    pub ignored: Vec<PathBuf>,
}

/// Rebuild the catalog from the wallpapers root.
///
/// A file the user declines (a missing original that isn't intentional) is
/// skipped and reported; any other failure aborts the scan.
#[tracing::instrument(level = "debug", skip_all, fields(reset = options.reset))]
pub fn scan(ctx: &Context, catalog: &mut Catalog, confirm: &mut dyn Confirm, options: ScanOptions) -> Result<ScanReport> {
    scan_inner(ctx, catalog, confirm, options).or_raise(|| ErrorKind::Scan)
}

fn scan_inner(ctx: &Context, catalog: &mut Catalog, confirm: &mut dyn Confirm, options: ScanOptions) -> Result<ScanReport> {
    if options.reset {
        catalog.clear();
    }
    let policy = Policy::from(Mode::Scan).ignore_missing(options.ignore_missing_originals);
    let backend = ctx.wallpapers();
    let mut report = ScanReport::default();

    for info in backend.list(None).or_raise(|| ErrorKind::Storage)? {
        let Some(image) = files::classify(backend.as_ref(), &info.path).or_raise(|| ErrorKind::Storage)? else {
            tracing::debug!(path = %info.path.display(), "not an image, ignoring");
            report.ignored.push(info.path);
            continue;
        };
        if wallman_storage::file_name(&image.path).is_ok_and(is_original) {
            tracing::warn!(path = %image.path.display(), "original file in the wallpapers directory, ignoring");
            report.ignored.push(image.path);
            continue;
        }
        let file = StoredFile::new(Root::Wallpapers, image.path);
        match build::build(ctx, catalog, confirm, &file, &policy) {
            Ok(_) => {},
            Err(err) if err.is_user_abort() => {
                tracing::warn!(file = %file, "skipped by user");
                report.skipped.push(file.path);
            },
            Err(err) => return Err(err).or_raise(|| ErrorKind::Build),
        }
    }

    catalog.sort_wallpapers();
    report.wallpapers = catalog.wallpapers().len();
    report.with_original = catalog.wallpapers().iter().filter(|w| w.has_original()).count();
    tracing::info!(
        wallpapers = report.wallpapers,
        with_original = report.with_original,
        skipped = report.skipped.len(),
        "scan complete"
    );
    Ok(report)
}
