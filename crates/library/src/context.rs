use crate::error::{ErrorKind, Result};
use std::fmt;
use wallman_catalog::Root;
use wallman_storage::BackendHandle;

/// The storage backends of a collection, one per configured root.
#[derive(Clone)]
pub struct Context {
    wallpapers: BackendHandle,
    originals: BackendHandle,
    staging: BackendHandle,
    trash: Option<BackendHandle>,
    merge: Option<BackendHandle>,
}
impl Context {
    pub fn new(wallpapers: BackendHandle, originals: BackendHandle, staging: BackendHandle) -> Self {
        Self { wallpapers, originals, staging, trash: None, merge: None }
    }

    pub fn with_trash(mut self, trash: BackendHandle) -> Self {
        self.trash = Some(trash);
        self
    }

    pub fn with_merge(mut self, merge: BackendHandle) -> Self {
        self.merge = Some(merge);
        self
    }

    pub fn wallpapers(&self) -> &BackendHandle {
        &self.wallpapers
    }

    pub fn originals(&self) -> &BackendHandle {
        &self.originals
    }

    pub fn staging(&self) -> &BackendHandle {
        &self.staging
    }

    /// The backend of a root, or [`ErrorKind::NotConfigured`] for an optional
    /// root that was left out.
    pub fn backend(&self, root: Root) -> Result<&BackendHandle> {
        let backend = match root {
            Root::Wallpapers => Some(&self.wallpapers),
            Root::Originals => Some(&self.originals),
            Root::Staging => Some(&self.staging),
            Root::Trash => self.trash.as_ref(),
            Root::Merge => self.merge.as_ref(),
        };
        match backend {
            Some(backend) => Ok(backend),
            None => exn::bail!(ErrorKind::NotConfigured(root)),
        }
    }
}

/// Backends aren't `Debug`; their names are enough to tell roots apart.
impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("wallpapers", &self.wallpapers.name())
            .field("originals", &self.originals.name())
            .field("staging", &self.staging.name())
            .field("trash", &self.trash.as_ref().map(|b| b.name()))
            .field("merge", &self.merge.as_ref().map(|b| b.name()))
            .finish()
    }
}
