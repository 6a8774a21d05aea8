//! Import-plugins command

use anyhow::{Context, Result};
use qmlprov_core::Config;
use qmlprov_core::plugins::{import_plugins_source, plugins_from_scan};
use std::path::Path;

use super::ScanSettings;
use crate::ScanArgs;

/// Scan, then write the `Q_IMPORT_PLUGIN` source to `output` or stdout.
///
/// # Errors
///
/// Fails if the scan fails or the output file cannot be written.
pub fn import_plugins(scan: &ScanArgs, output: Option<&Path>, config: &Config) -> Result<()> {
    let settings = ScanSettings::resolve(scan, config)?;
    let plugins = plugins_from_scan(&settings.scan()?);
    let source = import_plugins_source(&plugins);

    match output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
            std::fs::write(path, source)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!(path = %path.display(), plugins = plugins.len(), "wrote plugin imports");
        }
        None => print!("{source}"),
    }
    Ok(())
}
