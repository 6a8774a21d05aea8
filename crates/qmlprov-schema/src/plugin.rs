//! QML plugin description.
//!
//! `qmlimportscanner` reports one JSON record per import. Module imports
//! backed by a C++ plugin look like this:
//!
//! ```json
//! {
//!     "name": "QtQuick",
//!     "type": "module",
//!     "path": "/opt/qt/qml/QtQuick",
//!     "plugin": "qtquick2plugin",
//!     "classname": "QtQuick2Plugin"
//! }
//! ```
//!
//! [`PluginDescriptor`] keeps the three fields the link step needs and
//! ignores the rest.

use serde::{Deserialize, Serialize};

/// A QML plugin to be linked statically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginDescriptor {
    /// Plugin base name, without `lib` prefix or any suffix.
    pub plugin: String,
    /// Directory the plugin and its `.prl` file are installed in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// C++ class name registered with `Q_IMPORT_PLUGIN`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classname: Option<String>,
}

impl PluginDescriptor {
    /// Describe a plugin by name only.
    pub fn new(plugin: impl Into<String>) -> Self {
        Self {
            plugin: plugin.into(),
            path: None,
            classname: None,
        }
    }

    /// Set the install directory.
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Set the plugin class name.
    pub fn with_classname(mut self, classname: impl Into<String>) -> Self {
        self.classname = Some(classname.into());
        self
    }

    /// The install directory, treating an empty string as absent.
    pub fn install_path(&self) -> Option<&str> {
        self.path.as_deref().filter(|p| !p.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_scanner_record() {
        let record = r#"{
            "name": "QtQuick",
            "type": "module",
            "path": "/opt/qt/qml/QtQuick",
            "plugin": "qtquick2plugin",
            "classname": "QtQuick2Plugin",
            "relativePath": "QtQuick"
        }"#;
        let plugin: PluginDescriptor = serde_json::from_str(record).unwrap();
        assert_eq!(
            plugin,
            PluginDescriptor::new("qtquick2plugin")
                .with_path("/opt/qt/qml/QtQuick")
                .with_classname("QtQuick2Plugin")
        );
    }

    #[test]
    fn test_empty_path_is_absent() {
        let plugin = PluginDescriptor::new("foo").with_path("");
        assert_eq!(plugin.install_path(), None);
        assert_eq!(PluginDescriptor::new("foo").install_path(), None);
    }
}
