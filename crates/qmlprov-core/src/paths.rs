//! Filesystem locations and path joining.

use std::path::PathBuf;

/// Name of the config file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "qmlprov.toml";

/// Default config location: ./qmlprov.toml
pub fn default_config_path() -> PathBuf {
    PathBuf::from(CONFIG_FILE_NAME)
}

/// Join path fragments the way build scripts do.
///
/// Empty fragments are skipped, the rest are joined with `/`, and runs of
/// `/` collapse into one. No fragment is treated as absolute.
///
/// ```
/// use qmlprov_core::join_paths;
///
/// assert_eq!(join_paths(&["/opt/qt/", "/lib"]), "/opt/qt/lib");
/// assert_eq!(join_paths(&["", "libfoo.a"]), "libfoo.a");
/// ```
pub fn join_paths(parts: &[&str]) -> String {
    let joined = parts
        .iter()
        .filter(|p| !p.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join("/");

    let mut out = String::with_capacity(joined.len());
    for c in joined.chars() {
        if c == '/' && out.ends_with('/') {
            continue;
        }
        out.push(c);
    }
    out
}
