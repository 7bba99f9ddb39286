//! Error types for promptsync-transform.

use thiserror::Error;

/// All errors that can arise from content transformation.
///
/// Parse failures keep the underlying parser's message so the activity log
/// can show what was wrong with the source file.
#[derive(Debug, Error)]
pub enum TransformError {
    /// The Format A source was not valid TOML.
    #[error("Invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),

    /// The Format B front matter header was not valid YAML.
    #[error("Invalid Markdown: {0}")]
    Markdown(#[from] serde_yaml::Error),

    /// Serializing the converted record back to TOML failed.
    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}
