use super::{FranchiseId, StoredFile};

/// A cataloged edited image.
///
/// `(franchise, index)` is unique among all wallpapers whenever the catalog
/// is at rest; sort-in can break that temporarily until the indexes are
/// reconciled.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Wallpaper {
    pub file: StoredFile,
    pub original: Option<StoredFile>,
    pub franchise: FranchiseId,
    /// 1-based, also part of the file names on disk.
    pub index: u32,
}
impl Wallpaper {
    pub fn new(file: StoredFile, original: Option<StoredFile>, franchise: FranchiseId, index: u32) -> Self {
        Self { file, original, franchise, index }
    }

    pub fn has_original(&self) -> bool {
        self.original.is_some()
    }
}
