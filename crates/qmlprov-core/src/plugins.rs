//! Turning a scan into link inputs.
//!
//! A scan lists every import of the application. The ones that are modules
//! backed by a C++ plugin have to be linked in (see [`link_lines`]) and
//! registered at startup through `Q_IMPORT_PLUGIN` (see
//! [`import_plugins_source`]).

use std::collections::HashSet;
use std::fmt::Write as _;

use qmlprov_schema::PluginDescriptor;
use serde_json::Value;

use crate::error::Result;
use crate::prl::{LinkOptions, libs_for_plugin};

/// Plugins referenced by a scanner result, in scan order, without duplicates.
///
/// Records that are not of type `module`, or carry no `plugin` name, are
/// skipped. A non-array result has no plugins.
pub fn plugins_from_scan(scan: &Value) -> Vec<PluginDescriptor> {
    let Some(records) = scan.as_array() else {
        return Vec::new();
    };

    let mut seen = HashSet::new();
    records
        .iter()
        .filter(|r| r.get("type").and_then(Value::as_str) == Some("module"))
        .filter_map(|r| serde_json::from_value::<PluginDescriptor>(r.clone()).ok())
        .filter(|p| !p.plugin.is_empty())
        .filter(|p| seen.insert(p.plugin.clone()))
        .collect()
}

/// Link line for every plugin that has one.
///
/// # Errors
///
/// Stops at the first plugin whose `.prl` file is malformed or unreadable.
pub fn link_lines(plugins: &[PluginDescriptor], options: &LinkOptions) -> Result<Vec<String>> {
    let mut lines = Vec::with_capacity(plugins.len());
    for plugin in plugins {
        let line = libs_for_plugin(plugin, options)?;
        if !line.is_empty() {
            lines.push(line);
        }
    }
    Ok(lines)
}

/// C++ source registering every plugin with a class name.
pub fn import_plugins_source(plugins: &[PluginDescriptor]) -> String {
    let mut source = String::from(
        "// This file is autogenerated by qmlprov. Do not edit.\n\
         #include <QtPlugin>\n\n",
    );

    let mut seen = HashSet::new();
    for classname in plugins.iter().filter_map(|p| p.classname.as_deref()) {
        if classname.is_empty() || !seen.insert(classname) {
            continue;
        }
        // Writing to a String cannot fail.
        let _ = writeln!(source, "Q_IMPORT_PLUGIN({classname})");
    }
    source
}
