//! Config file parsing.
//!
//! A `qmlprov.toml` records where Qt lives and what is being built, so the
//! command line only has to name the QML files:
//!
//! ```toml
//! [qt]
//! scanner = "/opt/qt/libexec/qmlimportscanner"
//! import_path = "/opt/qt/qml"
//! lib_dir = "/opt/qt/lib"
//!
//! [target]
//! os = ["linux", "unix"]
//! toolchain = ["gcc"]
//! variant = "release"
//! ```
//!
//! Every key is optional.

use qmlprov_schema::{BuildVariant, OsTags, ToolchainTags};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Error, Result};
use crate::prl::LinkOptions;

/// Scanner name used when neither config nor command line gives one.
pub const DEFAULT_SCANNER: &str = "qmlimportscanner";

/// Top-level config parsed from a `qmlprov.toml` file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// The `[qt]` section.
    #[serde(default)]
    pub qt: QtSection,
    /// The `[target]` section.
    #[serde(default)]
    pub target: TargetSection,
}

/// Locations inside the Qt installation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QtSection {
    /// `qmlimportscanner` executable.
    pub scanner: Option<String>,
    /// QML import directory handed to the scanner.
    pub import_path: Option<String>,
    /// Qt library directory.
    pub lib_dir: Option<String>,
}

/// Description of the product being built.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TargetSection {
    /// Target platform tags; the host's when absent.
    pub os: Option<OsTags>,
    /// Toolchain tags.
    pub toolchain: Option<ToolchainTags>,
    /// Build variant.
    pub variant: Option<BuildVariant>,
}

impl Config {
    /// Load and parse a `Config` from the given file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if its contents are not
    /// valid TOML conforming to the config schema.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        toml::from_str(&content).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Like [`Config::load`], but a missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load(path)
    }

    /// Scanner executable, falling back to [`DEFAULT_SCANNER`].
    pub fn scanner(&self) -> &str {
        self.qt.scanner.as_deref().unwrap_or(DEFAULT_SCANNER)
    }

    /// Link options with defaults filled in for every unset key.
    pub fn link_options(&self) -> LinkOptions {
        LinkOptions {
            variant: self.target.variant.unwrap_or_default(),
            target_os: self.target.os.clone().unwrap_or_default(),
            toolchain: self.target.toolchain.clone().unwrap_or_default(),
            qt_lib_dir: self.qt.lib_dir.clone().unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_config() {
        let config: Config = toml::from_str(
            r#"
            [qt]
            scanner = "/opt/qt/libexec/qmlimportscanner"
            import_path = "/opt/qt/qml"
            lib_dir = "/opt/qt/lib"

            [target]
            os = ["windows"]
            toolchain = ["clang-cl", "msvc"]
            variant = "debug"
            "#,
        )
        .unwrap();

        assert_eq!(config.scanner(), "/opt/qt/libexec/qmlimportscanner");
        let options = config.link_options();
        assert!(options.target_os.is_windows());
        assert!(options.toolchain.is_msvc());
        assert!(options.variant.is_debug());
        assert_eq!(options.qt_lib_dir, "/opt/qt/lib");
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.scanner(), DEFAULT_SCANNER);
        let options = config.link_options();
        assert_eq!(options.target_os, OsTags::host());
        assert_eq!(options.toolchain, ToolchainTags::default());
        assert_eq!(options.variant, BuildVariant::Release);
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(toml::from_str::<Config>("[qt]\nqml_dir = \"/x\"\n").is_err());
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_default(&dir.path().join("qmlprov.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(&dir.path().join("qmlprov.toml")).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }

    #[test]
    fn test_load_reports_bad_toml_with_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("qmlprov.toml");
        std::fs::write(&path, "[target]\nvariant = \"fast\"\n").unwrap();

        let err = Config::load(&path).unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
        assert!(err.to_string().contains("qmlprov.toml"));
    }
}
