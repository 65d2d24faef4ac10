use derive_more::Display;
use std::path::{Path, PathBuf};

/// The configured directories a collection is spread over.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Root {
    /// Edited wallpapers, `Type/Franchise#Index.ext`.
    #[display("wallpapers")]
    Wallpapers,
    /// Unedited originals, `Type/Franchise#oIndex.ext`.
    #[display("originals")]
    Originals,
    /// Newly named files waiting to be sorted in.
    #[display("staging")]
    Staging,
    /// Where orphaned originals are moved to.
    #[display("trash")]
    Trash,
    /// Flat copy of every wallpaper.
    #[display("merge")]
    Merge,
}

/// A file located by the root it lives in and a path relative to that root.
#[derive(Debug, Display, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[display("{root}:{}", path.display())]
pub struct StoredFile {
    pub root: Root,
    pub path: PathBuf,
}
impl StoredFile {
    pub fn new(root: Root, path: impl Into<PathBuf>) -> Self {
        Self { root, path: path.into() }
    }

    pub fn file_name(&self) -> Option<&str> {
        self.path.file_name().and_then(|n| n.to_str())
    }

    /// Extension without the dot, as found on disk.
    pub fn extension(&self) -> Option<&str> {
        self.path.extension().and_then(|e| e.to_str())
    }

    /// The same root, a sibling file name.
    pub fn with_file_name(&self, name: impl AsRef<Path>) -> Self {
        Self { root: self.root, path: self.path.with_file_name(name.as_ref()) }
    }
}
