//! Flat copy of the collection into the merge root.

use crate::context::Context;
use crate::error::{ErrorKind, Result};
use crate::files;
use exn::ResultExt;
use wallman_catalog::{Catalog, Root, StoredFile};
use wallman_storage::Entry;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MergeReport {
    /// Images removed from the top level of the merge root.
    pub deleted: usize,
    pub copied: usize,
}

/// Replace the images at the top level of the merge root with a copy of
/// every cataloged wallpaper, leaving out the types named in `exclude_types`.
///
/// Only top-level images are deleted; subfolders and other files in the
/// merge root stay.
#[tracing::instrument(level = "debug", skip_all)]
pub fn merge(ctx: &Context, catalog: &Catalog, exclude_types: &[String]) -> Result<MergeReport> {
    merge_inner(ctx, catalog, exclude_types).or_raise(|| ErrorKind::Merge)
}

fn merge_inner(ctx: &Context, catalog: &Catalog, exclude_types: &[String]) -> Result<MergeReport> {
    let target = ctx.backend(Root::Merge)?;
    let mut report = MergeReport::default();

    for entry in target.list_dir(None).or_raise(|| ErrorKind::Storage)? {
        let Entry::File(info) = entry else {
            continue;
        };
        if wallman_storage::file_name(&info.path).ok().and_then(wallman_codec::classify).is_some() {
            target.delete(&info.path).or_raise(|| ErrorKind::Storage)?;
            report.deleted += 1;
        }
    }
    tracing::debug!(deleted = report.deleted, "cleared merge directory");

    for wallpaper in catalog.wallpapers() {
        let excluded = catalog.type_of(wallpaper.franchise).is_some_and(|t| exclude_types.contains(&t.name));
        if excluded {
            continue;
        }
        let Some(name) = wallpaper.file.file_name() else {
            continue;
        };
        files::copy_file(ctx, &wallpaper.file, &StoredFile::new(Root::Merge, name))?;
        report.copied += 1;
    }

    tracing::info!(deleted = report.deleted, copied = report.copied, "merge complete");
    Ok(report)
}
