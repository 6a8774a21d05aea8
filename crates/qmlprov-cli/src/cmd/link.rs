//! Link command

use anyhow::Result;
use qmlprov_core::Config;
use qmlprov_core::plugins::{link_lines, plugins_from_scan};

use super::{ScanSettings, link_options};
use crate::{LinkArgs, ScanArgs};

/// Scan, then print one link line per imported plugin.
///
/// # Errors
///
/// Fails if the scan fails or a plugin's `.prl` file is malformed.
pub fn link(scan: &ScanArgs, link: &LinkArgs, config: &Config) -> Result<()> {
    let settings = ScanSettings::resolve(scan, config)?;
    let plugins = plugins_from_scan(&settings.scan()?);
    tracing::debug!(plugins = plugins.len(), "collected plugins");

    for line in link_lines(&plugins, &link_options(link, config))? {
        println!("{}", line.trim_end());
    }
    Ok(())
}
