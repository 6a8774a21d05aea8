//! Helpers for providing Qt QML modules to a build.
//!
//! - [`scanner`] runs `qmlimportscanner` over a set of QML files.
//! - [`prl`] reads a plugin's `.prl` file into a linker argument string.
//! - [`plugins`] connects the two: plugins found by a scan, their link
//!   lines, and the `Q_IMPORT_PLUGIN` source registering them.
//!
//! Everything is synchronous and stateless.

pub mod config;
pub mod error;
pub mod paths;
pub mod plugins;
pub mod prl;
pub mod process;
pub mod scanner;

pub use config::Config;
pub use error::{Error, Result};
pub use paths::*;
pub use prl::{LinkOptions, libs_for_plugin};
pub use process::{SystemRunner, ToolRunner};
pub use scanner::{ImportScanner, scanner_data};
