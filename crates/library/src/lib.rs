//! Operations on a wallpaper collection.
//!
//! A collection is spread over a few root directories (see [`Context`]):
//! edited wallpapers and their originals, each filed in one folder per type,
//! plus a staging area for new files. The [`Catalog`](wallman_catalog::Catalog)
//! is rebuilt from these by a [full scan](scan::scan) and everything else
//! works from it:
//!
//! - [`sort_in`](sort_in::sort_in) files new wallpapers from staging,
//! - [`fix_indexes`](reconcile::fix_indexes) renumbers franchises to `1..=n`,
//! - [`stats`](stats::stats) summarizes the collection,
//! - [`sort_out_originals`](originals::sort_out_originals) finds originals
//!   whose wallpaper is gone,
//! - [`merge`](merge::merge) copies the collection into one flat folder.
//!
//! Anything that needs the user's say-so goes through [`Confirm`].

pub mod build;
mod context;
pub mod error;
pub mod files;
pub mod merge;
pub mod originals;
mod prompt;
pub mod reconcile;
mod resolve;
pub mod scan;
pub mod sort_in;
pub mod stats;
#[cfg(test)]
mod testing;

pub use crate::context::Context;
pub use crate::prompt::Confirm;
pub use crate::resolve::resolve_original;
