use std::fmt::{Display, Formatter, Result as FmtResult};
use std::path::Path;

/// Image formats the collection accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    Png,
    Jpeg,
}
impl ImageFormat {
    /// Case-insensitive lookup; `jpg` and `jpeg` are both [`ImageFormat::Jpeg`].
    pub fn from_extension(ext: impl AsRef<str>) -> Option<Self> {
        let ext = ext.as_ref().trim_start_matches('.');
        if ext.eq_ignore_ascii_case("png") {
            Some(Self::Png)
        } else if ext.eq_ignore_ascii_case("jpg") || ext.eq_ignore_ascii_case("jpeg") {
            Some(Self::Jpeg)
        } else {
            None
        }
    }

    pub fn from_path(path: impl AsRef<Path>) -> Option<Self> {
        path.as_ref().extension().and_then(|e| e.to_str()).and_then(Self::from_extension)
    }

    /// The extension this format is persisted with (no leading dot).
    pub fn canonical_extension(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
        }
    }
}
impl Display for ImageFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.canonical_extension())
    }
}

/// Outcome of looking at a file name and deciding it is an image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    pub format: ImageFormat,
    /// Set when the extension isn't canonical (`.jpeg`); holds the file name
    /// the file should be renamed to.
    pub rename_to: Option<String>,
}

/// Classifies a file name (no directory) as an image or not.
///
/// This is the pure half of the "is this an image" check. The caller is
/// expected to perform the rename in [`Image::rename_to`] so that `.jpeg`
/// files never linger in the collection.
pub fn classify(file_name: impl AsRef<str>) -> Option<Image> {
    let file_name = file_name.as_ref();
    let path = Path::new(file_name);
    let ext = path.extension().and_then(|e| e.to_str())?;
    let format = ImageFormat::from_extension(ext)?;
    let rename_to = match ext.eq_ignore_ascii_case("jpeg") {
        true => {
            let stem = &file_name[..file_name.len() - ext.len() - 1];
            Some(format!("{stem}.{}", format.canonical_extension()))
        },
        false => None,
    };
    Some(Image { format, rename_to })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Zelda#1.png", Some(ImageFormat::Png))]
    #[case("Zelda#1.PNG", Some(ImageFormat::Png))]
    #[case("Zelda#1.jpg", Some(ImageFormat::Jpeg))]
    #[case("Zelda#1.jpeg", Some(ImageFormat::Jpeg))]
    #[case("Zelda#1.gif", None)]
    #[case("notes.txt", None)]
    #[case("no-extension", None)]
    fn test_format_from_path(#[case] name: &str, #[case] expected: Option<ImageFormat>) {
        assert_eq!(ImageFormat::from_path(name), expected);
    }

    #[rstest]
    #[case("Zelda#1.jpeg", Some("Zelda#1.jpg"))]
    #[case("Zelda#1.JPEG", Some("Zelda#1.jpg"))]
    #[case("Zelda.wallpaper.jpeg", Some("Zelda.wallpaper.jpg"))]
    #[case("Zelda#1.jpg", None)]
    #[case("Zelda#1.png", None)]
    fn test_classify_normalizes_jpeg(#[case] name: &str, #[case] rename_to: Option<&str>) {
        let image = classify(name).unwrap();
        assert_eq!(Some(image.format), ImageFormat::from_path(name));
        assert_eq!(image.rename_to.as_deref(), rename_to);
    }

    #[test]
    fn test_classify_rejects_non_images() {
        assert!(classify("Zelda#1.webp").is_none());
        assert!(classify("Zelda").is_none());
        assert!(classify(".png").is_none());
    }
}
