//! Prl command

use anyhow::{Context, Result};
use qmlprov_core::{Config, libs_for_plugin};
use qmlprov_schema::PluginDescriptor;

use super::link_options;
use crate::LinkArgs;

/// Print the link line for a single plugin.
///
/// Nothing is printed when the plugin has no path or no `.prl` file.
///
/// # Errors
///
/// Fails if the `.prl` file is malformed or unreadable.
pub fn prl(plugin: &str, path: Option<&str>, link: &LinkArgs, config: &Config) -> Result<()> {
    let mut descriptor = PluginDescriptor::new(plugin);
    descriptor.path = path.map(str::to_string);

    let options = link_options(link, config);
    let line = libs_for_plugin(&descriptor, &options)
        .with_context(|| format!("Failed to read link flags of plugin '{plugin}'"))?;

    if !line.is_empty() {
        println!("{}", line.trim_end());
    }
    Ok(())
}
