//! Index reconciliation: renumbering every franchise to `1..=n`.
//!
//! The catalog is sorted (type, franchise, index, file name) and each
//! franchise's run renumbered from 1. Files whose index changes are renamed
//! together with their originals:
//!
//! 1. **Plan**: every rename is computed up front ([`plan()`]).
//! 2. **Pre-flight**: no new name (and no temporary name) may be taken by a
//!    file the plan doesn't move away, otherwise [`ErrorKind::Collision`] is
//!    raised and nothing is touched.
//! 3. **Apply**, in two phases: every source to `<name>.reconcile`, then every
//!    temporary to its final name. Swapping `Zelda#1` and `Zelda#2` can never
//!    overwrite a sibling this way.
//!
//! There is no rollback. The catalog is updated after every single rename,
//! so when one fails ([`ErrorKind::RenameFailed`]) memory still matches what
//! is on disk and the error says where to pick up.

pub mod error;
mod plan;

pub use self::plan::{Move, Plan, Renumber, STAGED_SUFFIX, plan};
use self::error::{ErrorKind, Result};
use crate::context::Context;
use exn::ResultExt;
use std::collections::HashSet;
use wallman_catalog::{Catalog, StoredFile, Wallpaper};

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Correction {
    pub before: String,
    pub after: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ReconcileReport {
    pub unchanged: usize,
    pub corrected: Vec<Correction>,
}

/// Renumber every franchise and rename the files to match.
#[tracing::instrument(level = "debug", skip_all)]
pub fn fix_indexes(ctx: &Context, catalog: &mut Catalog) -> crate::error::Result<ReconcileReport> {
    reconcile(ctx, catalog).or_raise(|| crate::error::ErrorKind::Reconcile)
}

fn reconcile(ctx: &Context, catalog: &mut Catalog) -> Result<ReconcileReport> {
    catalog.sort_wallpapers();
    let plan = plan(catalog)?;
    preflight(ctx, &plan)?;

    for renumber in &plan.renumbers {
        let staged = renumber.file.staged();
        rename(ctx, catalog, renumber, &renumber.file.from, &staged, |w, to| w.file = to)?;
        if let Some(original) = &renumber.original {
            let staged = original.staged();
            rename(ctx, catalog, renumber, &original.from, &staged, |w, to| w.original = Some(to))?;
        }
    }
    let mut report = ReconcileReport { unchanged: plan.unchanged, corrected: Vec::new() };
    for renumber in &plan.renumbers {
        let staged = renumber.file.staged();
        rename(ctx, catalog, renumber, &staged, &renumber.file.to, |w, to| {
            w.file = to;
            w.index = renumber.index;
        })?;
        if let Some(original) = &renumber.original {
            rename(ctx, catalog, renumber, &original.staged(), &original.to, |w, to| w.original = Some(to))?;
        }
        let after = catalog.label(&catalog.wallpapers()[renumber.position]);
        tracing::info!(before = %renumber.label, after = %after, "corrected index");
        report.corrected.push(Correction { before: renumber.label.clone(), after });
    }

    tracing::info!(unchanged = report.unchanged, corrected = report.corrected.len(), "indexes fixed");
    Ok(report)
}

/// Every new name and every temporary name has to be free, unless the file
/// there is itself moved away by the plan.
fn preflight(ctx: &Context, plan: &Plan) -> Result<()> {
    let sources: HashSet<&StoredFile> = plan.moves().map(|m| &m.from).collect();
    for step in plan.moves() {
        for target in [step.to.clone(), step.staged()] {
            if sources.contains(&target) {
                continue;
            }
            let backend = ctx.backend(target.root).or_raise(|| ErrorKind::Storage)?;
            if backend.exists(&target.path).or_raise(|| ErrorKind::Storage)? {
                exn::bail!(ErrorKind::Collision(target));
            }
        }
    }
    Ok(())
}

fn rename(
    ctx: &Context,
    catalog: &mut Catalog,
    renumber: &Renumber,
    from: &StoredFile,
    to: &StoredFile,
    update: impl FnOnce(&mut Wallpaper, StoredFile),
) -> Result<()> {
    let failed = || ErrorKind::RenameFailed { wallpaper: renumber.label.clone(), from: from.clone(), to: to.clone() };
    let backend = ctx.backend(from.root).or_raise(failed)?;
    backend.rename(&from.path, &to.path).or_raise(failed)?;
    tracing::debug!(from = %from, to = %to, "renamed");
    if let Some(wallpaper) = catalog.wallpaper_mut(renumber.position) {
        update(wallpaper, to.clone());
    }
    Ok(())
}
