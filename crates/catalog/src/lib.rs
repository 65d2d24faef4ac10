//! In-memory catalog of a wallpaper collection.
//!
//! The [`Catalog`] is rebuilt from disk by every full scan; the files and
//! their names are the source of truth. It owns three collections:
//! - **Types**: top-level categories, one folder per type on disk.
//! - **Franchises**: sub-categories, each filed under exactly one type.
//! - **Wallpapers**: edited images, each belonging to a franchise and
//!   carrying an index that is unique within that franchise.
//!
//! Taxonomy nodes created speculatively can be undone through a
//! [`Rollback`] of [`Compensation`]s.

mod catalog;
pub mod error;
mod models;
mod rollback;

pub use crate::catalog::Catalog;
pub use crate::models::{Franchise, FranchiseId, Root, StoredFile, Type, TypeId, Wallpaper};
pub use crate::rollback::{Compensation, Rollback};
