//! Filename conventions of a wallpaper collection.
//!
//! Everything in this crate is pure: it looks at file names and never touches
//! the filesystem. Classifying a file as an image is paired with a
//! normalization hint ([`Image::rename_to`]) which callers apply on disk, so
//! in practice the "is this an image" check of the library is *not* a pure
//! predicate.

mod consts;
pub mod error;
mod image;
mod name;

pub use crate::consts::{ORIGINAL_MARKER, SEPARATOR};
pub use crate::image::{Image, ImageFormat, classify};
pub use crate::name::{
    EditedName, GroupedName, LooseName, candidates, edited_file_name, edited_stem_of, is_original, original_file_name,
};
