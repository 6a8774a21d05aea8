//! Build variant.

use crate::ParseError;

/// Build variant of the product being linked.
///
/// Only [`BuildVariant::Debug`] changes behavior: Windows debug builds of Qt
/// plugins carry a `d` suffix on their file names.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum BuildVariant {
    /// Unoptimized build with debug runtime libraries.
    Debug,
    /// Optimized build.
    #[default]
    Release,
    /// Optimized build with debug info.
    Profile,
}

impl BuildVariant {
    /// Convert to string representation
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Release => "release",
            Self::Profile => "profile",
        }
    }

    /// Whether this is the debug variant.
    pub fn is_debug(self) -> bool {
        matches!(self, Self::Debug)
    }
}

impl std::fmt::Display for BuildVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for BuildVariant {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "debug" => Ok(Self::Debug),
            "release" => Ok(Self::Release),
            "profile" => Ok(Self::Profile),
            _ => Err(ParseError::UnknownVariant(s.to_string())),
        }
    }
}
