//! Reading qmake `.prl` (prelink) files.
//!
//! A static Qt plugin ships a `.prl` file next to its library describing
//! what else has to be linked with it:
//!
//! ```text
//! QMAKE_PRL_BUILD_DIR = /home/qt/work/qtdeclarative/src/imports/qtquick2
//! QMAKE_PRL_TARGET = libqtquick2plugin.a
//! QMAKE_PRL_CONFIG = lex yacc depend_includepath static ...
//! QMAKE_PRL_LIBS = -L$$[QT_INSTALL_LIBS] -lQt6Quick -lQt6Qml -lpthread
//! ```
//!
//! Only `QMAKE_PRL_TARGET` and `QMAKE_PRL_LIBS` matter here. The result is a
//! single string ready to be spliced into a linker command line.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::sync::LazyLock;

use qmlprov_schema::{BuildVariant, OsTags, PluginDescriptor, ToolchainTags};
use regex::Regex;

use crate::error::{Error, Result};
use crate::paths::join_paths;

const TARGET_KEY: &str = "QMAKE_PRL_TARGET";
const LIBS_KEY: &str = "QMAKE_PRL_LIBS = ";
const QT_INSTALL_LIBS: &str = "$$[QT_INSTALL_LIBS]";

/// `-lfoo` as passed to GNU-style linkers.
static LIB_FLAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-l([^ ]+)").expect("valid lib flag pattern"));

/// Everything the prl lookup needs to know about the product being linked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkOptions {
    /// Build variant of the product.
    pub variant: BuildVariant,
    /// Target platform tags.
    pub target_os: OsTags,
    /// Toolchain tags; `msvc` switches flag syntax.
    pub toolchain: ToolchainTags,
    /// Qt library directory substituted for `$$[QT_INSTALL_LIBS]`.
    pub qt_lib_dir: String,
}

/// The two entries of a `.prl` file we care about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrlRecord {
    /// The plugin library itself, joined with the plugin directory.
    pub target_lib: String,
    /// Additional link flags, one line per `QMAKE_PRL_LIBS` entry, each
    /// starting with a space and ending with a newline.
    pub other_libs: String,
}

impl PrlRecord {
    /// `target_lib`, a space, then `other_libs`.
    pub fn link_line(&self) -> String {
        format!("{} {}", self.target_lib, self.other_libs)
    }
}

/// File name of a plugin's `.prl` file.
///
/// ```
/// use qmlprov_core::prl::prl_file_name;
/// use qmlprov_schema::{BuildVariant, OsTags};
///
/// let windows = OsTags::new(["windows"]);
/// let linux = OsTags::new(["linux", "unix"]);
/// assert_eq!(prl_file_name("foo", BuildVariant::Debug, &windows), "food.prl");
/// assert_eq!(prl_file_name("foo", BuildVariant::Debug, &linux), "libfoo.prl");
/// ```
pub fn prl_file_name(plugin: &str, variant: BuildVariant, target_os: &OsTags) -> String {
    let windows = target_os.is_windows();
    let mut name = String::new();
    if !windows {
        name.push_str("lib");
    }
    name.push_str(plugin);
    if variant.is_debug() && windows {
        name.push('d');
    }
    name.push_str(".prl");
    name
}

/// Linker arguments for `plugin`, read from its `.prl` file.
///
/// Returns an empty string, without touching the filesystem, when the
/// plugin has no install path. A missing `.prl` file is logged as a warning
/// and also yields an empty string.
///
/// # Errors
///
/// Returns [`Error::MalformedPrl`] if the file has no `QMAKE_PRL_TARGET`
/// entry and [`Error::Io`] if it exists but cannot be read.
pub fn libs_for_plugin(plugin: &PluginDescriptor, options: &LinkOptions) -> Result<String> {
    let Some(dir) = plugin.install_path() else {
        return Ok(String::new());
    };

    let file_name = prl_file_name(&plugin.plugin, options.variant, &options.target_os);
    let prl_path = join_paths(&[dir, &file_name]);

    let file = match File::open(&prl_path) {
        Ok(f) => f,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::warn!(
                "prl file for QML plugin '{}' not present at '{prl_path}'. Linking may fail.",
                plugin.plugin
            );
            return Ok(String::new());
        }
        Err(e) => return Err(Error::io(&prl_path, e)),
    };

    let record = parse_prl(
        BufReader::new(file),
        dir,
        &prl_path,
        &options.toolchain,
        &options.qt_lib_dir,
    )?;
    Ok(record.link_line())
}

/// Parse `.prl` content from `reader`.
///
/// `plugin_dir` is prepended to the target library; `prl_path` only names
/// the file in errors.
///
/// # Errors
///
/// Returns [`Error::MalformedPrl`] if no `QMAKE_PRL_TARGET` value is found
/// and [`Error::Io`] if reading fails. Bytes that are not valid UTF-8 are
/// replaced rather than rejected.
pub fn parse_prl<R: BufRead>(
    mut reader: R,
    plugin_dir: &str,
    prl_path: &str,
    toolchain: &ToolchainTags,
    qt_lib_dir: &str,
) -> Result<PrlRecord> {
    let rewriter = LibsRewriter::new(toolchain, qt_lib_dir);
    let malformed = || Error::MalformedPrl {
        path: prl_path.to_string(),
    };

    let mut target_lib = None;
    let mut other_libs = String::new();

    let mut buf = Vec::new();
    loop {
        buf.clear();
        let read = reader
            .read_until(b'\n', &mut buf)
            .map_err(|e| Error::io(prl_path, e))?;
        if read == 0 {
            break;
        }
        let line = String::from_utf8_lossy(&buf);
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if line.starts_with(TARGET_KEY) {
            let rhs = rhs(line).ok_or_else(malformed)?;
            target_lib = Some(join_paths(&[plugin_dir, rhs]));
        }
        if line.starts_with(LIBS_KEY) {
            let rhs = rhs(line).ok_or_else(malformed)?;
            other_libs.push_str(&rewriter.rewrite(rhs));
            other_libs.push('\n');
        }
    }

    let target_lib = target_lib.ok_or_else(malformed)?;
    Ok(PrlRecord {
        target_lib,
        other_libs,
    })
}

/// Text between the first and second `=`, trimmed.
fn rhs(line: &str) -> Option<&str> {
    line.split('=').nth(1).map(str::trim)
}

/// Rewrites one `QMAKE_PRL_LIBS` value for the active toolchain.
struct LibsRewriter<'a> {
    msvc: bool,
    qt_lib_dir: &'a str,
}

impl<'a> LibsRewriter<'a> {
    fn new(toolchain: &ToolchainTags, qt_lib_dir: &'a str) -> Self {
        Self {
            msvc: toolchain.is_msvc(),
            qt_lib_dir,
        }
    }

    fn rewrite(&self, libs: &str) -> String {
        let mut line = format!(" {libs}");
        if self.msvc {
            line = line.replace(" -L", " /LIBPATH:");
            line = LIB_FLAG.replace_all(&line, "${1}.lib").into_owned();
        }
        line.replace(QT_INSTALL_LIBS, self.qt_lib_dir)
    }
}
