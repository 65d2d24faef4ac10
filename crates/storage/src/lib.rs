//! Storage backends for a wallpaper collection.
//!
//! A collection spans several root directories (wallpapers, originals, the
//! staging area...). Each one is opened as its own [`StorageBackend`] and all
//! paths handed to a backend are relative to its root.

pub mod backend;
pub mod error;
mod models;
mod path;

pub use crate::backend::StorageBackend;
pub use crate::models::{Entry, FileInfo};
pub use crate::path::{ancestor_name, file_name, validate as validate_path};
use std::sync::Arc;

pub type BackendHandle = Arc<dyn StorageBackend + Send + Sync>;
