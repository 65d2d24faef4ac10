//! Parsing and formatting of the on-disk naming convention.
//!
//! | Form     | Example                   | Used for                                  |
//! |----------|---------------------------|-------------------------------------------|
//! | strict   | `Zelda#3.png`             | files already in the collection           |
//! | original | `Zelda#o3.png`            | the unedited source of `Zelda#3`          |
//! | loose    | `Zelda.png`, `Zelda#12.jpg` | newly named files waiting to be sorted in |
//! | grouped  | `IMG_0042_cut_new.png`    | edited files in a `Type/Franchise/` folder  |

use crate::consts::{EDIT_SUFFIX_REGEX, ORIGINAL_EXTENSIONS, ORIGINAL_MARKER, SEPARATOR, STRICT_STEM_REGEX};
use crate::error::{ErrorKind, Result};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::path::Path;

fn stem(file_name: &str) -> &str {
    Path::new(file_name).file_stem().and_then(|s| s.to_str()).unwrap_or(file_name)
}

/// Lists `<stem>.png` then `<stem>.jpg`, the order originals are looked up in.
pub fn candidates(stem: impl AsRef<str>) -> Vec<String> {
    ORIGINAL_EXTENSIONS.iter().map(|ext| format!("{}.{ext}", stem.as_ref())).collect()
}

/// Whether the file name denotes an original (contains the `#o` marker).
pub fn is_original(file_name: impl AsRef<str>) -> bool {
    file_name.as_ref().contains(ORIGINAL_MARKER)
}

/// `Franchise#Index.ext`. The extension may be given with or without its dot.
pub fn edited_file_name(franchise: impl AsRef<str>, index: u32, ext: impl AsRef<str>) -> String {
    format!("{}{SEPARATOR}{index}.{}", franchise.as_ref(), ext.as_ref().trim().trim_matches('.'))
}

/// `Franchise#oIndex.ext`. The extension may be given with or without its dot.
pub fn original_file_name(franchise: impl AsRef<str>, index: u32, ext: impl AsRef<str>) -> String {
    format!("{}{ORIGINAL_MARKER}{index}.{}", franchise.as_ref(), ext.as_ref().trim().trim_matches('.'))
}

/// The stem an edited file would have if `original` (`Zelda#o3.png`) had
/// one: `Zelda#3`. Returns `None` when the name isn't an original.
pub fn edited_stem_of(original: impl AsRef<str>) -> Option<String> {
    let original = original.as_ref();
    is_original(original).then(|| stem(original).replacen(ORIGINAL_MARKER, &SEPARATOR.to_string(), 1))
}

/// Identity recovered from a normalized, strict file name: `Franchise#Index.ext`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EditedName {
    pub franchise: String,
    pub index: u32,
}
impl EditedName {
    /// Parses a strict file name (directory excluded).
    ///
    /// Originals are rejected, as is anything that isn't exactly one
    /// franchise name, one `#`, and a run of digits.
    pub fn parse(file_name: impl AsRef<str>) -> Result<Self> {
        let file_name = file_name.as_ref();
        if is_original(file_name) {
            exn::bail!(ErrorKind::format(file_name, "is an original file"));
        }
        let Some(captures) = STRICT_STEM_REGEX.captures(stem(file_name)) else {
            exn::bail!(ErrorKind::format(file_name, "expected '<franchise>#<digits>'"));
        };
        let index = captures[2].parse().map_err(|_| ErrorKind::format(file_name, "index out of range"))?;
        Ok(Self { franchise: captures[1].to_string(), index })
    }

    pub fn file_name(&self, ext: impl AsRef<str>) -> String {
        edited_file_name(&self.franchise, self.index, ext)
    }

    /// `Franchise#oIndex.png` and `Franchise#oIndex.jpg`.
    pub fn original_candidates(&self) -> Vec<String> {
        candidates(format!("{}{ORIGINAL_MARKER}{}", self.franchise, self.index))
    }
}
impl Display for EditedName {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}{SEPARATOR}{}", self.franchise, self.index)
    }
}

/// Identity recovered from a loosely named file waiting to be sorted in:
/// `Franchise.ext` or `Franchise#Token.ext`.
///
/// The token is only a temporary index chosen by whoever named the file; it
/// pairs the file with its original but the final index is assigned later.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LooseName {
    pub franchise: String,
    pub index_token: Option<String>,
}
impl LooseName {
    pub fn parse(file_name: impl AsRef<str>) -> Result<Self> {
        let file_name = file_name.as_ref();
        let mut parts = stem(file_name).split(SEPARATOR);
        // `split` always yields at least one item.
        let franchise = parts.next().unwrap_or_default().to_string();
        let index_token = parts.next().map(str::to_string);
        if parts.next().is_some() {
            exn::bail!(ErrorKind::format(file_name, "more than one '#' separator"));
        }
        if let Some(token) = &index_token
            && token.trim().parse::<i32>().is_err()
        {
            exn::bail!(ErrorKind::format(file_name, "index is not a number"));
        }
        Ok(Self { franchise, index_token })
    }

    /// `Franchise#o<token>.png` and `.jpg`. Without a token, that's
    /// `Franchise#o.png`.
    pub fn original_candidates(&self) -> Vec<String> {
        candidates(format!("{}{ORIGINAL_MARKER}{}", self.franchise, self.index_token.as_deref().unwrap_or_default()))
    }
}

/// An edited file inside a grouped `Type/Franchise/` folder. The name of the
/// original is recovered by cutting off the edit suffixes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupedName {
    pub original_stem: String,
}
impl GroupedName {
    /// Returns `None` when the name carries no `_cut`/`_new` suffix, meaning
    /// the file isn't an edited variant (most likely it's the original).
    pub fn parse(file_name: impl AsRef<str>) -> Option<Self> {
        let file_name = file_name.as_ref();
        let suffix = EDIT_SUFFIX_REGEX.find(file_name)?;
        let original_stem = &file_name[..suffix.start()];
        (!original_stem.is_empty()).then(|| Self { original_stem: original_stem.to_string() })
    }

    pub fn original_candidates(&self) -> Vec<String> {
        candidates(&self.original_stem)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Zelda#1.png", "Zelda", 1)]
    #[case("Zelda#12.jpg", "Zelda", 12)]
    #[case("Final Fantasy#3.png", "Final Fantasy", 3)]
    #[case("Zelda#007.png", "Zelda", 7)]
    #[case("Half-Life 2#10.PNG", "Half-Life 2", 10)]
    fn test_parse_strict(#[case] name: &str, #[case] franchise: &str, #[case] index: u32) {
        let parsed = EditedName::parse(name).unwrap();
        assert_eq!(parsed.franchise, franchise);
        assert_eq!(parsed.index, index);
    }

    #[rstest]
    #[case("Zelda.png")]
    #[case("Zelda#.png")]
    #[case("#3.png")]
    #[case("Zelda #3.png")]
    #[case("Zelda#3a.png")]
    #[case("Zelda#1#2.png")]
    #[case("Zelda#o3.png")]
    #[case("Zelda#99999999999.png")]
    fn test_parse_strict_rejects(#[case] name: &str) {
        let err = EditedName::parse(name).unwrap_err();
        assert!(matches!(&*err, ErrorKind::Format { .. }));
    }

    #[rstest]
    #[case("Zelda", 1, "png")]
    #[case("Final Fantasy", 42, ".jpg")]
    #[case("Nier: Automata", 3, "png")]
    fn test_strict_round_trip(#[case] franchise: &str, #[case] index: u32, #[case] ext: &str) {
        let name = edited_file_name(franchise, index, ext);
        let parsed = EditedName::parse(&name).unwrap();
        assert_eq!(parsed, EditedName { franchise: franchise.to_string(), index });
        assert_eq!(parsed.file_name(ext), name);
    }

    #[test]
    fn test_strict_original_candidates() {
        let parsed = EditedName::parse("Zelda#3.jpg").unwrap();
        assert_eq!(parsed.original_candidates(), vec!["Zelda#o3.png", "Zelda#o3.jpg"]);
        assert_eq!(parsed.to_string(), "Zelda#3");
    }

    #[rstest]
    #[case("Metroid.jpg", "Metroid", None)]
    #[case("Metroid#2.jpg", "Metroid", Some("2"))]
    #[case("Super Metroid#-1.png", "Super Metroid", Some("-1"))]
    fn test_parse_loose(#[case] name: &str, #[case] franchise: &str, #[case] token: Option<&str>) {
        let parsed = LooseName::parse(name).unwrap();
        assert_eq!(parsed.franchise, franchise);
        assert_eq!(parsed.index_token.as_deref(), token);
    }

    #[rstest]
    #[case("Metroid#1#2.jpg")]
    #[case("Metroid#two.jpg")]
    #[case("Metroid#.jpg")]
    fn test_parse_loose_rejects(#[case] name: &str) {
        let err = LooseName::parse(name).unwrap_err();
        assert!(matches!(&*err, ErrorKind::Format { .. }));
    }

    #[test]
    fn test_loose_original_candidates() {
        let with_token = LooseName::parse("Metroid#2.jpg").unwrap();
        assert_eq!(with_token.original_candidates(), vec!["Metroid#o2.png", "Metroid#o2.jpg"]);
        let without_token = LooseName::parse("Metroid.jpg").unwrap();
        assert_eq!(without_token.original_candidates(), vec!["Metroid#o.png", "Metroid#o.jpg"]);
    }

    #[rstest]
    #[case("IMG_0042_cut.png", Some("IMG_0042"))]
    #[case("IMG_0042_new.jpg", Some("IMG_0042"))]
    #[case("IMG_0042_cut_new.png", Some("IMG_0042"))]
    #[case("IMG_0042_new_cut_cut.JPG", Some("IMG_0042"))]
    #[case("IMG_0042.png", None)]
    #[case("IMG_0042_cut.gif", None)]
    #[case("IMG_cut_0042.png", None)]
    #[case("_cut.png", None)]
    fn test_parse_grouped(#[case] name: &str, #[case] stem: Option<&str>) {
        assert_eq!(GroupedName::parse(name).map(|g| g.original_stem).as_deref(), stem);
    }

    #[test]
    fn test_grouped_original_candidates() {
        let grouped = GroupedName::parse("shot_cut_new.png").unwrap();
        assert_eq!(grouped.original_candidates(), vec!["shot.png", "shot.jpg"]);
    }

    #[rstest]
    #[case("Zelda#o3.png", Some("Zelda#3"))]
    #[case("Zelda#o12.jpg", Some("Zelda#12"))]
    #[case("Zelda#3.png", None)]
    fn test_edited_stem_of(#[case] original: &str, #[case] expected: Option<&str>) {
        assert_eq!(edited_stem_of(original).as_deref(), expected);
    }

    #[test]
    fn test_original_file_name() {
        assert_eq!(original_file_name("Zelda", 4, ".png"), "Zelda#o4.png");
        assert!(is_original("Zelda#o4.png"));
        assert!(!is_original("Zelda#4.png"));
    }
}
