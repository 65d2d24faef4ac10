/// How strictly a file name is read, and where the index comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Naming {
    /// `Type/Franchise#Index.ext`, the index is taken from the name.
    Strict,
    /// `Type/Franchise[#Token].ext`, the next free index is assigned.
    Loose,
    /// `Type/Franchise/<original>_cut.ext`, the next free index is assigned.
    Grouped,
}

/// Where the original of a file is searched for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup {
    /// `originals/<Type>/`. A type without an originals folder simply has no
    /// originals.
    OriginalsByType,
    /// The folder the file itself is in, which has to exist.
    OwnDirectory,
}

/// Everything that differs between the ways a wallpaper gets built. One
/// build algorithm runs over all of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Policy {
    pub naming: Naming,
    /// Ask before creating a type or franchise, instead of creating silently.
    pub confirm_creation: bool,
    /// Accept a missing original without asking.
    pub ignore_missing: bool,
    pub lookup: Lookup,
}
impl Policy {
    pub fn ignore_missing(mut self, ignore_missing: bool) -> Self {
        self.ignore_missing = ignore_missing;
        self
    }
}

/// The three ways files enter the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Files already in the collection; trusted and normalized.
    Scan,
    /// Loose files directly inside a staging `Type/` folder.
    New,
    /// Edited files inside a staging `Type/Franchise/` folder.
    NewInSubFolder,
}
impl Mode {
    pub fn policy(self) -> Policy {
        match self {
            Self::Scan => Policy {
                naming: Naming::Strict,
                confirm_creation: false,
                ignore_missing: false,
                lookup: Lookup::OriginalsByType,
            },
            Self::New => Policy {
                naming: Naming::Loose,
                confirm_creation: true,
                ignore_missing: false,
                lookup: Lookup::OwnDirectory,
            },
            Self::NewInSubFolder => Policy {
                naming: Naming::Grouped,
                confirm_creation: true,
                ignore_missing: false,
                lookup: Lookup::OwnDirectory,
            },
        }
    }
}
impl From<Mode> for Policy {
    fn from(mode: Mode) -> Self {
        mode.policy()
    }
}
