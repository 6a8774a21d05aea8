//! Error type shared by every qmlprov operation.

use std::path::PathBuf;
use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Failures raised by the scanner invoker, the prl parser and config loading.
#[derive(Error, Debug)]
pub enum Error {
    /// The tool could not be started at all.
    #[error("Error running '{program}': {source}")]
    Spawn {
        /// Program as given by the caller.
        program: String,
        /// Underlying spawn failure.
        #[source]
        source: std::io::Error,
    },

    /// The tool ran but did not exit cleanly.
    #[error("Process '{command}' {status}.{output}")]
    ExitStatus {
        /// Program and arguments, space separated.
        command: String,
        /// "finished with exit code N" or "was terminated by a signal".
        status: String,
        /// Captured stdout/stderr, already formatted for display.
        output: String,
    },

    /// The scanner printed something that is not JSON.
    #[error("Invalid output from '{program}': {source}")]
    ScannerOutput {
        /// Scanner program.
        program: String,
        /// JSON decoding failure.
        #[source]
        source: serde_json::Error,
    },

    /// Opening or reading a file failed.
    #[error("Unable to read file '{}': {source}", .path.display())]
    Io {
        /// File being accessed.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// A `.prl` file without a usable `QMAKE_PRL_TARGET` entry.
    #[error("Malformed prl file '{path}'.")]
    MalformedPrl {
        /// Full path of the offending file.
        path: String,
    },

    /// The config file is not valid TOML for [`crate::config::Config`].
    #[error("Failed to parse config '{}': {source}", .path.display())]
    Config {
        /// Config file.
        path: PathBuf,
        /// TOML decoding failure.
        #[source]
        source: toml::de::Error,
    },
}

impl Error {
    /// Wrap an I/O failure with the file it happened on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
