//! Command modules - one file per CLI command

pub mod import_plugins;
pub mod link;
pub mod prl;
pub mod scan;

use anyhow::{Context, Result};
use qmlprov_core::{Config, ImportScanner, LinkOptions, default_config_path};
use qmlprov_schema::OsTags;
use serde_json::Value;
use std::path::Path;

use crate::{LinkArgs, ScanArgs};

/// Load the config named on the command line, or `./qmlprov.toml` if it exists.
///
/// # Errors
///
/// Fails if an explicitly named file is missing, or any config is unreadable.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => Config::load_or_default(&default_config_path()).context("Failed to load config"),
    }
}

/// Scanner invocation with flags and config merged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanSettings {
    /// Scanner executable.
    pub scanner: String,
    /// QML import directory.
    pub import_path: String,
    /// Host OS tags.
    pub host_os: OsTags,
    /// Files to scan.
    pub files: Vec<String>,
}

impl ScanSettings {
    /// Merge `args` over `config`.
    ///
    /// # Errors
    ///
    /// Fails if neither gives an import path.
    pub fn resolve(args: &ScanArgs, config: &Config) -> Result<Self> {
        let import_path = args
            .import_path
            .clone()
            .or_else(|| config.qt.import_path.clone())
            .context("No QML import path given. Pass --import-path or set qt.import_path in qmlprov.toml")?;

        let files = args
            .files
            .iter()
            .map(|f| {
                f.to_str()
                    .map(str::to_string)
                    .with_context(|| format!("QML file path is not valid UTF-8: {}", f.display()))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            scanner: args
                .scanner
                .clone()
                .unwrap_or_else(|| config.scanner().to_string()),
            import_path,
            host_os: args.host_os.clone().unwrap_or_else(OsTags::host),
            files,
        })
    }

    /// Run the scanner.
    ///
    /// # Errors
    ///
    /// Propagates scanner failures.
    pub fn scan(&self) -> Result<Value> {
        tracing::debug!(scanner = %self.scanner, files = self.files.len(), "scanning");
        ImportScanner::new(self.scanner.as_str())
            .scan(&self.files, &self.import_path, &self.host_os)
            .context("QML import scan failed")
    }
}

/// Link options with flags merged over `config`.
pub fn link_options(args: &LinkArgs, config: &Config) -> LinkOptions {
    let mut options = config.link_options();
    if let Some(target_os) = &args.target_os {
        options.target_os = target_os.clone();
    }
    if let Some(toolchain) = &args.toolchain {
        options.toolchain = toolchain.clone();
    }
    if let Some(variant) = args.variant {
        options.variant = variant;
    }
    if let Some(qt_lib_dir) = &args.qt_lib_dir {
        options.qt_lib_dir.clone_from(qt_lib_dir);
    }
    options
}
