//! Platform tag sets.
//!
//! The build system describes platforms and toolchains as ordered lists of
//! tags (`["macos", "darwin", "bsd", "unix"]`, `["clang-cl", "msvc"]`).
//! Consumers only ever ask whether a list *contains* a given tag, so both
//! sets below are thin wrappers around a `Vec<String>` with a membership
//! check.
//!
//! # Example
//!
//! ```
//! use qmlprov_schema::OsTags;
//!
//! let tags: OsTags = "linux,unix".parse().unwrap();
//! assert!(tags.contains("unix"));
//! assert!(!tags.is_windows());
//! ```

use crate::ParseError;

/// Operating system tags for a host or target platform.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct OsTags(Vec<String>);

impl OsTags {
    /// Build a tag set from any list of tags.
    pub fn new<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(tags.into_iter().map(Into::into).collect())
    }

    /// Tags describing the machine this process runs on.
    pub fn host() -> Self {
        Self::for_os(std::env::consts::OS)
    }

    /// Tags for a Rust `target_os` name, in the order the build system
    /// reports them (most specific first).
    pub fn for_os(os: &str) -> Self {
        let tags: &[&str] = match os {
            "windows" => &["windows"],
            "macos" => &["macos", "darwin", "bsd", "unix"],
            "ios" => &["ios", "darwin", "bsd", "unix"],
            "linux" => &["linux", "unix"],
            "android" => &["android", "linux", "unix"],
            "freebsd" => &["freebsd", "bsd", "unix"],
            "netbsd" => &["netbsd", "bsd", "unix"],
            "openbsd" => &["openbsd", "bsd", "unix"],
            "solaris" | "illumos" => &["solaris", "unix"],
            other => return Self::new([other, "unix"]),
        };
        Self::new(tags.iter().copied())
    }

    /// Whether `tag` is part of this set.
    pub fn contains(&self, tag: &str) -> bool {
        self.0.iter().any(|t| t == tag)
    }

    /// Shorthand for `contains("windows")`.
    pub fn is_windows(&self) -> bool {
        self.contains("windows")
    }

    /// The tags in order.
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

impl Default for OsTags {
    fn default() -> Self {
        Self::host()
    }
}

impl std::fmt::Display for OsTags {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.join(","))
    }
}

impl std::str::FromStr for OsTags {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        split_tags(s).map(Self)
    }
}

/// Compiler/linker family tags (`gcc`, `clang`, `msvc`, `clang-cl`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct ToolchainTags(Vec<String>);

impl ToolchainTags {
    /// Build a tag set from any list of tags.
    pub fn new<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(tags.into_iter().map(Into::into).collect())
    }

    /// Whether `tag` is part of this set.
    pub fn contains(&self, tag: &str) -> bool {
        self.0.iter().any(|t| t == tag)
    }

    /// Whether the linker expects MSVC-style flags (`/LIBPATH:`, `foo.lib`).
    pub fn is_msvc(&self) -> bool {
        self.contains("msvc")
    }

    /// The tags in order.
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

impl Default for ToolchainTags {
    fn default() -> Self {
        Self::new(["gcc"])
    }
}

impl std::fmt::Display for ToolchainTags {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.join(","))
    }
}

impl std::str::FromStr for ToolchainTags {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        split_tags(s).map(Self)
    }
}

/// Split a comma separated list, dropping blanks.
fn split_tags(s: &str) -> Result<Vec<String>, ParseError> {
    let tags: Vec<String> = s
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
        .collect();
    if tags.is_empty() {
        return Err(ParseError::EmptyTags);
    }
    Ok(tags)
}
