//! Shared types for the qmlprov crates.
//!
//! Everything here is plain data: platform tag sets as the build system
//! hands them over, the build variant, and the description of a QML plugin
//! as reported by `qmlimportscanner`.

pub mod plugin;
pub mod tags;
pub mod variant;

// Re-exports
pub use plugin::PluginDescriptor;
pub use tags::{OsTags, ToolchainTags};
pub use variant::BuildVariant;

/// Error returned when a platform value cannot be parsed from text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// A tag list contained no usable tags.
    #[error("Empty tag list")]
    EmptyTags,

    /// The build variant is not one of the known names.
    #[error("Unknown build variant: {0}")]
    UnknownVariant(String),
}
