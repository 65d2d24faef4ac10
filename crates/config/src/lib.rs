//! Configuration for wallman.
//!
//! Settings are layered, later sources winning:
//! 1. built-in defaults (under the user's picture directory),
//! 2. a configuration file (`config.toml` in the platform config directory
//!    unless a path is given; YAML and JSON are recognised by extension),
//! 3. `WALLMAN_` environment variables, nested keys separated by `__`
//!    (`WALLMAN_SCAN__IGNORE_MISSING_ORIGINALS=true`).

pub mod error;

use crate::error::{ErrorKind, Result};
use directories::{ProjectDirs, UserDirs};
use exn::ResultExt;
use figment::Figment;
use figment::providers::{Env, Format, Json, Serialized, Toml, Yaml};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const ENV_PREFIX: &str = "WALLMAN_";
const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub library: LibraryConfig,
    pub scan: ScanConfig,
    pub merge: MergeConfig,
}

/// Where the collection lives. Every directory has to be absolute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LibraryConfig {
    /// Edited wallpapers, one folder per type.
    pub wallpapers: PathBuf,
    /// Originals, one folder per type.
    pub originals: PathBuf,
    /// Named files waiting to be sorted in.
    pub staging: PathBuf,
    /// Orphaned originals get moved here.
    pub trash: Option<PathBuf>,
    /// Flat copy of all wallpapers. Top-level images in here get deleted!
    pub merge: Option<PathBuf>,
}
impl Default for LibraryConfig {
    fn default() -> Self {
        let base = UserDirs::new()
            .map(|dirs| dirs.picture_dir().unwrap_or(dirs.home_dir()).to_path_buf())
            .unwrap_or_default()
            .join("Wallpapers");
        Self {
            wallpapers: base.join("Desktop"),
            originals: base.join("Original"),
            staging: base.join("Workspace").join("named"),
            trash: base.is_absolute().then(|| base.join("Sorted out")),
            merge: base.is_absolute().then(|| base.join("Desktop-Merge")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Accept wallpapers without an original without asking.
    pub ignore_missing_originals: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeConfig {
    /// Types left out of the merged folder.
    pub exclude_types: Vec<String>,
}
impl Default for MergeConfig {
    fn default() -> Self {
        Self { exclude_types: vec!["X-MAS".to_string()] }
    }
}

impl Config {
    /// Default location of the configuration file, if the platform has a
    /// config directory.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "wallman").map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }

    /// Layered sources without environment variables.
    fn file_figment(path: Option<&Path>) -> Result<Figment> {
        let mut figment = Figment::from(Serialized::defaults(Config::default()));
        let path = match path {
            Some(path) if !path.is_file() => {
                exn::bail!(ErrorKind::Invalid(format!("config file {} does not exist", path.display())));
            },
            Some(path) => Some(path.to_path_buf()),
            None => Self::default_path(),
        };
        if let Some(path) = path {
            tracing::debug!(path = %path.display(), "reading configuration file");
            figment = match path.extension().and_then(|e| e.to_str()) {
                Some("yaml" | "yml") => figment.merge(Yaml::file(path)),
                Some("json") => figment.merge(Json::file(path)),
                _ => figment.merge(Toml::file(path)),
            };
        }
        Ok(figment)
    }

    /// Load and validate the configuration.
    ///
    /// A missing file at the default location is fine, a missing file at an
    /// explicit `path` is not.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let figment = Self::file_figment(path)?.merge(Env::prefixed(ENV_PREFIX).split("__"));
        Self::extract(figment)
    }

    fn extract(figment: Figment) -> Result<Self> {
        let config: Self = figment.extract().or_raise(|| ErrorKind::Load)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every configured directory is absolute and that the three
    /// required roots are distinct.
    pub fn validate(&self) -> Result<()> {
        let library = &self.library;
        let required = [
            ("library.wallpapers", Some(&library.wallpapers)),
            ("library.originals", Some(&library.originals)),
            ("library.staging", Some(&library.staging)),
            ("library.trash", library.trash.as_ref()),
            ("library.merge", library.merge.as_ref()),
        ];
        for (key, path) in required {
            if let Some(path) = path
                && !path.is_absolute()
            {
                exn::bail!(ErrorKind::Invalid(format!("{key} must be an absolute path, got '{}'", path.display())));
            }
        }
        if library.wallpapers == library.originals
            || library.wallpapers == library.staging
            || library.originals == library.staging
        {
            exn::bail!(ErrorKind::Invalid("library.wallpapers, library.originals and library.staging must differ".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::fs;

    fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[rstest]
    #[case(
        "config.toml",
        "[library]\nwallpapers = \"/w/Desktop\"\noriginals = \"/w/Original\"\nstaging = \"/w/named\"\n\n[scan]\nignore_missing_originals = true\n"
    )]
    #[case(
        "config.yaml",
        "library:\n  wallpapers: /w/Desktop\n  originals: /w/Original\n  staging: /w/named\nscan:\n  ignore_missing_originals: true\n"
    )]
    #[case(
        "config.json",
        r#"{"library": {"wallpapers": "/w/Desktop", "originals": "/w/Original", "staging": "/w/named"}, "scan": {"ignore_missing_originals": true}}"#
    )]
    fn test_file_formats(#[case] name: &str, #[case] contents: &str) {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), name, contents);
        let config = Config::extract(Config::file_figment(Some(&path)).unwrap()).unwrap();
        assert_eq!(config.library.wallpapers, Path::new("/w/Desktop"));
        assert_eq!(config.library.originals, Path::new("/w/Original"));
        assert_eq!(config.library.staging, Path::new("/w/named"));
        assert!(config.scan.ignore_missing_originals);
        // Untouched sections keep their defaults.
        assert_eq!(config.merge.exclude_types, vec!["X-MAS".to_string()]);
    }

    #[test]
    fn test_missing_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(Some(&dir.path().join("nope.toml"))).unwrap_err();
        assert!(matches!(&*err, ErrorKind::Invalid(_)));
    }

    #[test]
    fn test_relative_paths_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            dir.path(),
            "config.toml",
            "[library]\nwallpapers = \"Desktop\"\noriginals = \"/w/Original\"\nstaging = \"/w/named\"\n",
        );
        let err = Config::extract(Config::file_figment(Some(&path)).unwrap()).unwrap_err();
        assert_eq!(
            (*err).to_string(),
            "invalid configuration: library.wallpapers must be an absolute path, got 'Desktop'"
        );
    }

    #[test]
    fn test_roots_must_differ() {
        let mut config = Config::default();
        config.library.wallpapers = PathBuf::from("/w/same");
        config.library.originals = PathBuf::from("/w/same");
        config.library.staging = PathBuf::from("/w/named");
        config.library.trash = None;
        config.library.merge = None;
        assert!(matches!(&*config.validate().unwrap_err(), ErrorKind::Invalid(_)));
    }

    #[test]
    fn test_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "config.toml", "[scan]\nignore_missing_originals = \"sometimes\"\n");
        let err = Config::extract(Config::file_figment(Some(&path)).unwrap()).unwrap_err();
        assert!(matches!(&*err, ErrorKind::Load));
    }
}
