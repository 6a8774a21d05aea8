//! qmlprov - QML module provider helpers
//!
//! Command-line front end for `qmlprov-core`: scan QML files for imports,
//! read plugin `.prl` files, and produce what a static Qt build needs to
//! link its QML plugins.
//!
//! Settings come from, in increasing priority: built-in defaults, a
//! `qmlprov.toml` config file, and command-line flags.

pub mod cmd;

use clap::{Args, Parser, Subcommand};
use qmlprov_schema::{BuildVariant, OsTags, ToolchainTags};
use std::path::PathBuf;

/// Top-level command line.
#[derive(Debug, Parser)]
#[command(name = "qmlprov")]
#[command(author, version = env!("QMLPROV_VERSION"), about = "qmlprov - QML import scanning and static plugin link lines")]
pub struct Cli {
    /// Config file (defaults to ./qmlprov.toml when present)
    #[arg(long, global = true, env = "QMLPROV_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log what is being run
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Command to run.
    #[command(subcommand)]
    pub command: Commands,
}

/// Subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run qmlimportscanner and print its JSON output
    Scan {
        /// Scanner options
        #[command(flatten)]
        scan: ScanArgs,
    },
    /// Print the link line for one plugin from its .prl file
    Prl {
        /// Plugin base name (e.g. qtquick2plugin)
        plugin: String,
        /// Directory containing the plugin and its .prl file
        #[arg(long)]
        path: Option<String>,
        /// Target options
        #[command(flatten)]
        link: LinkArgs,
    },
    /// Scan QML files and print the link line of every plugin they import
    Link {
        /// Scanner options
        #[command(flatten)]
        scan: ScanArgs,
        /// Target options
        #[command(flatten)]
        link: LinkArgs,
    },
    /// Scan QML files and generate the static plugin import source for them
    ImportPlugins {
        /// Scanner options
        #[command(flatten)]
        scan: ScanArgs,
        /// Write the source here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Options shared by every command that runs the scanner.
#[derive(Debug, Clone, Args)]
pub struct ScanArgs {
    /// QML files to scan
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// qmlimportscanner executable
    #[arg(long)]
    pub scanner: Option<String>,

    /// QML import directory of the Qt installation
    #[arg(long)]
    pub import_path: Option<String>,

    /// Host OS tags, comma separated (defaults to the running host)
    #[arg(long)]
    pub host_os: Option<OsTags>,
}

/// Options describing the product being linked.
#[derive(Debug, Clone, Default, Args)]
pub struct LinkArgs {
    /// Target OS tags, comma separated (e.g. windows or linux,unix)
    #[arg(long)]
    pub target_os: Option<OsTags>,

    /// Toolchain tags, comma separated (e.g. msvc)
    #[arg(long)]
    pub toolchain: Option<ToolchainTags>,

    /// Build variant: debug, release or profile
    #[arg(long)]
    pub variant: Option<BuildVariant>,

    /// Qt library directory
    #[arg(long, long_help = "Qt library directory, substituted for $$[QT_INSTALL_LIBS] in .prl files")]
    pub qt_lib_dir: Option<String>,
}
