//! Running external tools.
//!
//! Tools are run to completion with stdin closed and both output streams
//! captured. A non-zero exit is an error carrying everything the tool
//! printed, so the caller never has to dig through a build log.

use crate::error::{Error, Result};
use std::path::PathBuf;
use std::process::{Command, Stdio};

/// Runs an external program and hands back its standard output.
///
/// This is the seam between the scanner logic and the operating system;
/// tests substitute a recording implementation.
pub trait ToolRunner {
    /// Run `program` with `args`, block until it exits, and return stdout.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Spawn`] if the program cannot be started and
    /// [`Error::ExitStatus`] if it exits unsuccessfully.
    fn run(&self, program: &str, args: &[String]) -> Result<String>;
}

impl<T: ToolRunner + ?Sized> ToolRunner for &T {
    fn run(&self, program: &str, args: &[String]) -> Result<String> {
        (**self).run(program, args)
    }
}

/// [`ToolRunner`] backed by [`std::process::Command`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl SystemRunner {
    /// Resolve `program` through `PATH`; paths and unknown names are used as given.
    fn resolve(program: &str) -> PathBuf {
        which::which(program).unwrap_or_else(|_| PathBuf::from(program))
    }
}

impl ToolRunner for SystemRunner {
    fn run(&self, program: &str, args: &[String]) -> Result<String> {
        let resolved = Self::resolve(program);
        tracing::debug!(program = %resolved.display(), args = args.len(), "running tool");

        let output = Command::new(&resolved)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| Error::Spawn {
                program: program.to_string(),
                source,
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let status = match output.status.code() {
                Some(code) => format!("finished with exit code {code}"),
                None => "was terminated by a signal".to_string(),
            };
            return Err(Error::ExitStatus {
                command: command_line(program, args),
                status,
                output: captured_output(&stdout, &stderr),
            });
        }

        Ok(stdout)
    }
}

fn command_line(program: &str, args: &[String]) -> String {
    std::iter::once(program)
        .chain(args.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join(" ")
}

fn captured_output(stdout: &str, stderr: &str) -> String {
    let mut text = String::new();
    if !stdout.is_empty() {
        text.push_str(" The standard output was:\n");
        text.push_str(stdout);
    }
    if !stderr.is_empty() {
        text.push_str(" The standard error output was:\n");
        text.push_str(stderr);
    }
    text
}
