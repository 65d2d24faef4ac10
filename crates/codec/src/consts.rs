use regex::Regex;
use std::sync::LazyLock;

macro_rules! regex {
    ($name:ident, $regex:expr) => {
        pub(crate) static $name: LazyLock<Regex> = LazyLock::new(|| Regex::new($regex).unwrap());
    };
}

/// Separates the franchise name from the index in every persisted file name.
pub const SEPARATOR: char = '#';
/// Marks a file as the unedited original: `Franchise#o3.png`.
pub const ORIGINAL_MARKER: &str = "#o";
/// Extensions tried, in order, when looking for an original.
pub const ORIGINAL_EXTENSIONS: [&str; 2] = ["png", "jpg"];

// Normalized stem: a franchise name (no '#', must not end in whitespace) and a
// run of digits. Only one separator is allowed.
regex!(STRICT_STEM_REGEX, r"^([^#]*[^#\s])#(\d+)$");
// One or more edit suffixes glued together, right before the image extension.
regex!(EDIT_SUFFIX_REGEX, r"(?:_cut|_new)+\.(?i:png|jpg)$");
