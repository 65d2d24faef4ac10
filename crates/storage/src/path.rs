//! Path validation and inspection.
//!
//! Backends address files relative to their root directory. Anything that
//! would resolve outside of that root is rejected before it reaches the
//! filesystem.

use crate::error::{ErrorKind, Result};
use exn::OptionExt;
use std::path::{Component, Path, PathBuf};

/// Validates a storage path and returns it normalized.
///
/// `.` components and duplicate separators disappear, `..` is resolved as
/// long as it never climbs above the root. Empty results, null bytes and
/// Windows prefixes are [`InvalidPath`](ErrorKind::InvalidPath).
///
/// ```
/// use std::path::Path;
/// use wallman_storage::validate_path;
/// assert!(validate_path("Action/Zelda#1.png").is_ok());
/// assert!(validate_path("Action/../Zelda#1.png").is_ok());
/// assert!(validate_path("../Original/Action/Zelda#o1.png").is_err());
/// assert_eq!(validate_path("Action//./Zelda#1.png").unwrap(), Path::new("Action/Zelda#1.png"));
/// ```
pub fn validate(path: impl AsRef<Path>) -> Result<PathBuf> {
    let path = path.as_ref();
    let invalid = || ErrorKind::InvalidPath(path.to_path_buf());
    let mut components = Vec::new();
    for component in path.components() {
        match component {
            Component::Normal(s) if s.as_encoded_bytes().contains(&0) => exn::bail!(invalid()),
            Component::Normal(s) => components.push(s),
            Component::CurDir | Component::RootDir => {},
            Component::Prefix(_) => exn::bail!(invalid()),
            Component::ParentDir => {
                components.pop().ok_or_raise(invalid)?;
            },
        }
    }
    if components.is_empty() {
        exn::bail!(invalid());
    }
    Ok(components.into_iter().collect())
}

/// The final component of `path` as UTF-8. File names in the collection
/// carry franchise names, so non-UTF-8 names can't be cataloged anyway.
pub fn file_name(path: &Path) -> Result<&str> {
    path.file_name().and_then(|n| n.to_str()).ok_or_raise(|| ErrorKind::InvalidPath(path.to_path_buf()))
}

/// Name of the directory `levels` above the file: `1` is the containing
/// directory, `2` its parent. `Action/Zelda/shot_cut.png` has `Zelda` at
/// level 1 and `Action` at level 2.
pub fn ancestor_name(path: &Path, levels: usize) -> Result<&str> {
    let invalid = || ErrorKind::InvalidPath(path.to_path_buf());
    let ancestor = path.ancestors().nth(levels).ok_or_raise(invalid)?;
    ancestor.file_name().and_then(|n| n.to_str()).ok_or_raise(invalid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_paths() {
        assert_eq!(validate("Action/Zelda#1.png").unwrap(), Path::new("Action/Zelda#1.png"));
        assert_eq!(validate("Zelda#1.png").unwrap(), Path::new("Zelda#1.png"));
        assert_eq!(validate("/Action/Zelda#1.png").unwrap(), Path::new("Action/Zelda#1.png"));
    }

    #[test]
    fn test_normalization() {
        assert_eq!(validate("Action//Zelda#1.png").unwrap(), Path::new("Action/Zelda#1.png"));
        assert_eq!(validate("./Action/./Zelda#1.png").unwrap(), Path::new("Action/Zelda#1.png"));
        assert_eq!(validate("Action/Zelda/..").unwrap(), Path::new("Action"));
        assert_eq!(validate("Action///").unwrap(), Path::new("Action"));
    }

    #[test]
    fn test_traversal_rejected() {
        assert!(validate("../Original/Zelda#o1.png").is_err());
        assert!(validate("Action/../../Zelda#1.png").is_err());
        assert!(validate("..").is_err());
    }

    #[test]
    fn test_empty_and_null_rejected() {
        assert!(validate("").is_err());
        assert!(validate(".").is_err());
        assert!(validate("//").is_err());
        assert!(validate("Zel\0da#1.png").is_err());
    }

    #[test]
    fn test_ancestor_names() {
        let path = Path::new("Action/Zelda/shot_cut.png");
        assert_eq!(file_name(path).unwrap(), "shot_cut.png");
        assert_eq!(ancestor_name(path, 1).unwrap(), "Zelda");
        assert_eq!(ancestor_name(path, 2).unwrap(), "Action");
        // There is nothing above the backend root.
        assert!(ancestor_name(path, 3).is_err());
        assert!(ancestor_name(Path::new("Zelda#1.png"), 1).is_err());
    }
}
