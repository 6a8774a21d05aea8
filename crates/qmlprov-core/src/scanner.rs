//! `qmlimportscanner` invocation.
//!
//! The scanner is called as
//!
//! ```text
//! qmlimportscanner -qmlFiles <file>... -importPath <dir>
//! ```
//!
//! and prints a single JSON document describing every import it found.
//!
//! ## Windows command lines
//!
//! `CreateProcess` caps a command line at 32767 UTF-16 code units, which a
//! large project's file list easily exceeds. On Windows hosts the file list
//! is therefore split into chunks of roughly [`MAX_CHUNK_LENGTH`] units, the
//! scanner runs once per chunk, and the per-chunk results are concatenated.
//!
//! ## Limitations
//!
//! Invocations block until the scanner exits. There is no timeout: a scanner
//! that hangs blocks the caller indefinitely.

use qmlprov_schema::OsTags;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::process::{SystemRunner, ToolRunner};

/// File-list length, in UTF-16 code units, at which a chunk is closed.
///
/// Checked *before* each file is added, so the file that reaches the bound
/// still belongs to the chunk it overflows.
pub const MAX_CHUNK_LENGTH: usize = 30_000;

/// Drives `qmlimportscanner` through a [`ToolRunner`].
#[derive(Debug, Clone)]
pub struct ImportScanner<R = SystemRunner> {
    program: String,
    runner: R,
}

impl ImportScanner<SystemRunner> {
    /// Scanner at `program`, run as a real child process.
    pub fn new(program: impl Into<String>) -> Self {
        Self::with_runner(program, SystemRunner)
    }
}

impl<R: ToolRunner> ImportScanner<R> {
    /// Scanner at `program`, run through `runner`.
    pub fn with_runner(program: impl Into<String>, runner: R) -> Self {
        Self {
            program: program.into(),
            runner,
        }
    }

    /// Path or name of the scanner executable.
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Scan `qml_files` and return the decoded scanner output.
    ///
    /// On non-Windows hosts the scanner runs once and its JSON value is
    /// returned unchanged. On Windows hosts it runs once per chunk (see
    /// [`chunk_files`]) and the result is always an array: array responses
    /// contribute their elements, any other value is appended as one element.
    ///
    /// # Errors
    ///
    /// Returns the runner's error if the scanner cannot be started or exits
    /// unsuccessfully, and [`Error::ScannerOutput`] if its output is not
    /// JSON. Nothing is returned for chunks that succeeded before a failure.
    pub fn scan(&self, qml_files: &[String], import_path: &str, host_os: &OsTags) -> Result<Value> {
        if !host_os.is_windows() {
            return self.invoke(qml_files, import_path);
        }

        let chunks = chunk_files(qml_files);
        tracing::debug!(
            files = qml_files.len(),
            chunks = chunks.len(),
            "scanning in chunks"
        );

        let mut data = Vec::new();
        for chunk in chunks {
            match self.invoke(chunk, import_path)? {
                Value::Array(items) => data.extend(items),
                other => data.push(other),
            }
        }
        Ok(Value::Array(data))
    }

    fn invoke(&self, files: &[String], import_path: &str) -> Result<Value> {
        let args = scanner_args(files, import_path);
        let stdout = self.runner.run(&self.program, &args)?;
        serde_json::from_str(&stdout).map_err(|source| Error::ScannerOutput {
            program: self.program.clone(),
            source,
        })
    }
}

/// Run the scanner at `program` as a child process.
///
/// Shorthand for [`ImportScanner::new`] followed by [`ImportScanner::scan`].
///
/// # Errors
///
/// See [`ImportScanner::scan`].
pub fn scanner_data(
    program: &str,
    qml_files: &[String],
    import_path: &str,
    host_os: &OsTags,
) -> Result<Value> {
    ImportScanner::new(program).scan(qml_files, import_path, host_os)
}

/// Arguments for one scanner invocation.
pub fn scanner_args(files: &[String], import_path: &str) -> Vec<String> {
    let mut args = Vec::with_capacity(files.len() + 3);
    args.push("-qmlFiles".to_string());
    args.extend(files.iter().cloned());
    args.push("-importPath".to_string());
    args.push(import_path.to_string());
    args
}

/// Split `files` into consecutive chunks for length-limited command lines.
///
/// A file is added to the current chunk while the chunk's running length is
/// below [`MAX_CHUNK_LENGTH`]; every chunk holds at least one file.
pub fn chunk_files(files: &[String]) -> Vec<&[String]> {
    let mut chunks = Vec::new();
    let mut start = 0;
    while start < files.len() {
        let mut end = start;
        let mut length = 0;
        while end < files.len() && length < MAX_CHUNK_LENGTH {
            length += files[end].encode_utf16().count();
            end += 1;
        }
        chunks.push(&files[start..end]);
        start = end;
    }
    chunks
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    /// Records every invocation and answers with a canned response.
    struct RecordingRunner {
        calls: RefCell<Vec<Vec<String>>>,
        respond: Box<dyn Fn(&[String]) -> Result<String>>,
    }

    impl RecordingRunner {
        fn new(respond: impl Fn(&[String]) -> Result<String> + 'static) -> Self {
            Self {
                calls: RefCell::new(Vec::new()),
                respond: Box::new(respond),
            }
        }

        /// Answers each call with one record per scanned file.
        fn echoing() -> Self {
            Self::new(|args| {
                let files: Vec<_> = args[1..args.len() - 2]
                    .iter()
                    .map(|f| serde_json::json!({ "file": f }))
                    .collect();
                Ok(Value::Array(files).to_string())
            })
        }

        fn calls(&self) -> Vec<Vec<String>> {
            self.calls.borrow().clone()
        }
    }

    impl ToolRunner for RecordingRunner {
        fn run(&self, program: &str, args: &[String]) -> Result<String> {
            assert_eq!(program, "qmlimportscanner");
            self.calls.borrow_mut().push(args.to_vec());
            (self.respond)(args)
        }
    }

    fn files(lengths: &[usize]) -> Vec<String> {
        lengths
            .iter()
            .enumerate()
            .map(|(i, len)| {
                let name = format!("{i}.qml");
                format!("{}{name}", "a".repeat(len - name.len()))
            })
            .collect()
    }

    fn linux() -> OsTags {
        OsTags::new(["linux", "unix"])
    }

    fn windows() -> OsTags {
        OsTags::new(["windows"])
    }

    #[test]
    fn test_single_invocation_off_windows() {
        let runner = RecordingRunner::echoing();
        let scanner = ImportScanner::with_runner("qmlimportscanner", &runner);
        let qml = vec!["main.qml".to_string(), "Page.qml".to_string()];

        let data = scanner.scan(&qml, "/opt/qt/qml", &linux()).unwrap();

        assert_eq!(
            runner.calls(),
            vec![vec![
                "-qmlFiles".to_string(),
                "main.qml".to_string(),
                "Page.qml".to_string(),
                "-importPath".to_string(),
                "/opt/qt/qml".to_string(),
            ]]
        );
        assert_eq!(data.as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_off_windows_ignores_length() {
        let runner = RecordingRunner::echoing();
        let scanner = ImportScanner::with_runner("qmlimportscanner", &runner);
        let qml = files(&[20_000, 20_000, 20_000]);

        scanner.scan(&qml, "/qml", &linux()).unwrap();
        assert_eq!(runner.calls().len(), 1);
    }

    #[test]
    fn test_windows_matches_unix_below_threshold() {
        let qml = vec!["a.qml".to_string(), "b.qml".to_string()];

        let unix_runner = RecordingRunner::echoing();
        let unix = ImportScanner::with_runner("qmlimportscanner", &unix_runner)
            .scan(&qml, "/qml", &linux())
            .unwrap();

        let win_runner = RecordingRunner::echoing();
        let win = ImportScanner::with_runner("qmlimportscanner", &win_runner)
            .scan(&qml, "/qml", &windows())
            .unwrap();

        assert_eq!(unix, win);
        assert_eq!(win_runner.calls().len(), 1);
    }

    #[test]
    fn test_windows_concatenates_chunks_in_order() {
        let runner = RecordingRunner::echoing();
        let scanner = ImportScanner::with_runner("qmlimportscanner", &runner);
        let qml = files(&[20_000, 20_000, 20_000]);

        let data = scanner.scan(&qml, "C:/Qt/qml", &windows()).unwrap();

        let calls = runner.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0][1..3], qml[0..2]);
        assert_eq!(calls[1][1], qml[2]);
        assert_eq!(calls[1][calls[1].len() - 1], "C:/Qt/qml");

        let scanned: Vec<_> = data
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v["file"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(scanned, qml);
    }

    #[test]
    fn test_windows_appends_non_array_responses() {
        let runner = RecordingRunner::new(|_| Ok(r#"{"name": "QtQuick"}"#.to_string()));
        let scanner = ImportScanner::with_runner("qmlimportscanner", &runner);
        let qml = files(&[30_000, 10]);

        let data = scanner.scan(&qml, "/qml", &windows()).unwrap();
        assert_eq!(
            data,
            serde_json::json!([{ "name": "QtQuick" }, { "name": "QtQuick" }])
        );
    }

    #[test]
    fn test_non_array_passes_through_off_windows() {
        let runner = RecordingRunner::new(|_| Ok(r#"{"name": "QtQuick"}"#.to_string()));
        let scanner = ImportScanner::with_runner("qmlimportscanner", &runner);

        let data = scanner.scan(&["a.qml".to_string()], "/qml", &linux()).unwrap();
        assert_eq!(data, serde_json::json!({ "name": "QtQuick" }));
    }

    #[test]
    fn test_invalid_json_is_scanner_output_error() {
        let runner = RecordingRunner::new(|_| Ok("qmlimportscanner: oops".to_string()));
        let scanner = ImportScanner::with_runner("qmlimportscanner", &runner);

        let err = scanner
            .scan(&["a.qml".to_string()], "/qml", &linux())
            .unwrap_err();
        assert!(matches!(err, Error::ScannerOutput { .. }));
    }

    #[test]
    fn test_failed_chunk_stops_the_scan() {
        let runner = RecordingRunner::new(|_| {
            Err(Error::ExitStatus {
                command: "qmlimportscanner".to_string(),
                status: "finished with exit code 1".to_string(),
                output: String::new(),
            })
        });
        let scanner = ImportScanner::with_runner("qmlimportscanner", &runner);
        let qml = files(&[30_000, 30_000]);

        let err = scanner.scan(&qml, "/qml", &windows()).unwrap_err();
        assert!(matches!(err, Error::ExitStatus { .. }));
        assert_eq!(runner.calls().len(), 1);
    }

    #[test]
    fn test_chunk_closes_once_bound_is_reached() {
        let qml = files(&[10_000, 10_000, 10_000, 10_000]);
        let chunks = chunk_files(&qml);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].len(), 3);
        assert_eq!(chunks[1].len(), 1);
    }

    #[test]
    fn test_chunk_takes_file_that_crosses_bound() {
        let qml = files(&[29_999, 2, 5]);
        let chunks = chunk_files(&qml);
        assert_eq!(chunks, vec![&qml[0..2], &qml[2..3]]);
    }

    #[test]
    fn test_oversized_file_is_alone() {
        let qml = files(&[40_000, 10, 10]);
        let chunks = chunk_files(&qml);
        assert_eq!(chunks, vec![&qml[0..1], &qml[1..3]]);
    }

    #[test]
    fn test_chunks_below_bound_before_last_file() {
        let qml = files(&[7_000; 20]);
        let chunks = chunk_files(&qml);
        assert!(chunks.len() >= 2);
        for chunk in &chunks {
            let before_last: usize = chunk[..chunk.len() - 1].iter().map(String::len).sum();
            assert!(before_last < MAX_CHUNK_LENGTH);
        }
        assert_eq!(chunks.concat(), qml);
    }

    #[test]
    fn test_length_counts_utf16_units() {
        // "é" is two UTF-8 bytes but one UTF-16 unit.
        let wide = "é".repeat(14_000);
        let qml = vec![wide.clone(), wide, "x.qml".to_string()];
        let chunks = chunk_files(&qml);
        assert_eq!(chunks.len(), 1);
    }

    #[test]
    fn test_empty_list_has_no_chunks() {
        assert!(chunk_files(&[]).is_empty());
    }
}
