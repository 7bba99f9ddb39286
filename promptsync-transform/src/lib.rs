//! # promptsync-transform
//!
//! Pure content transformers between the two synced formats:
//!
//! - Format A: TOML command files with `description` and `prompt` string
//!   fields, where `prompt` may contain the template token `{{args}}`.
//! - Format B: Markdown workflow documents with a YAML front matter header
//!   holding `description`, where the body may contain the placeholder
//!   token `[INPUT]`.
//!
//! Both directions apply a literal token substitution and nothing else.
//! Neither function touches the filesystem.

pub mod convert;
pub mod error;
pub mod frontmatter;

pub use convert::{markdown_to_toml, toml_to_markdown, PLACEHOLDER_TOKEN, TEMPLATE_TOKEN};
pub use error::TransformError;
