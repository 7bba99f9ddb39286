//! The two directional transformers.
//!
//! Token substitution is `str::replace`: every literal occurrence,
//! left-to-right, non-overlapping, no recursion and no escaping. A literal
//! occurrence of the *target* token already present in source content is
//! left alone, so repeated round-trips of such content drift. That is the
//! documented wire format, not a bug to fix here.

use serde::Serialize;

use crate::error::TransformError;
use crate::frontmatter::{self, Document};

/// Template token used inside Format A `prompt` fields.
pub const TEMPLATE_TOKEN: &str = "{{args}}";

/// Placeholder token used inside Format B bodies.
pub const PLACEHOLDER_TOKEN: &str = "[INPUT]";

/// Serialized shape of a Format A command file. Field order matters for
/// stable output: `description` first, then `prompt`.
#[derive(Debug, Serialize)]
struct CommandFile<'a> {
    description: &'a str,
    prompt: &'a str,
}

/// Convert Format A (TOML command) text to Format B (Markdown workflow).
///
/// `description` and `prompt` each default to the empty string when absent
/// or not a string. Fails only when the source is not syntactically valid
/// TOML.
pub fn toml_to_markdown(source: &str) -> Result<String, TransformError> {
    let value: toml::Value = toml::from_str(source)?;
    let description = string_field(&value, "description");
    let prompt = string_field(&value, "prompt");

    let body = prompt.replace(TEMPLATE_TOKEN, PLACEHOLDER_TOKEN);

    frontmatter::render(&Document {
        description: description.to_owned(),
        body,
    })
}

/// Convert Format B (Markdown workflow) text to Format A (TOML command).
///
/// Forgiving of missing or empty front matter: empty input produces a
/// command file with empty `description` and empty `prompt`. The body is
/// trimmed of surrounding whitespace before substitution.
pub fn markdown_to_toml(source: &str) -> Result<String, TransformError> {
    let doc = frontmatter::parse(source)?;
    let prompt = doc.body.trim().replace(PLACEHOLDER_TOKEN, TEMPLATE_TOKEN);

    let record = CommandFile {
        description: &doc.description,
        prompt: &prompt,
    };
    Ok(toml::to_string(&record)?)
}

fn string_field<'a>(value: &'a toml::Value, key: &str) -> &'a str {
    value
        .get(key)
        .and_then(toml::Value::as_str)
        .unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toml_to_markdown_substitutes_template_token() {
        let out = toml_to_markdown("description = \"d\"\nprompt = \"hi {{args}}\"\n").unwrap();
        assert_eq!(out, "---\ndescription: d\n---\nhi [INPUT]\n");
    }

    #[test]
    fn toml_to_markdown_replaces_every_occurrence() {
        let out =
            toml_to_markdown("prompt = \"{{args}} and {{args}} and {{args}}\"\n").unwrap();
        assert_eq!(out.matches(PLACEHOLDER_TOKEN).count(), 3);
        assert!(!out.contains(TEMPLATE_TOKEN));
    }

    #[test]
    fn toml_to_markdown_without_token_leaves_prompt_unchanged() {
        let out = toml_to_markdown("description = \"d\"\nprompt = \"plain text\"\n").unwrap();
        assert_eq!(out, "---\ndescription: d\n---\nplain text\n");
    }

    #[test]
    fn toml_to_markdown_defaults_missing_fields_to_empty() {
        let out = toml_to_markdown("").unwrap();
        assert!(out.starts_with("---\ndescription: "));
        let doc = frontmatter::parse(&out).unwrap();
        assert_eq!(doc.description, "");
        assert_eq!(doc.body.trim(), "");
    }

    #[test]
    fn toml_to_markdown_rejects_malformed_source() {
        let err = toml_to_markdown("key = value = value").unwrap_err();
        assert!(err.to_string().contains("Invalid TOML"));
    }

    #[test]
    fn markdown_to_toml_substitutes_placeholder_token() {
        let out =
            markdown_to_toml("---\ndescription: d\n---\nhi [INPUT] again\n").unwrap();
        assert_eq!(out, "description = \"d\"\nprompt = \"hi {{args}} again\"\n");
    }

    #[test]
    fn markdown_to_toml_without_token_is_a_noop_substitution() {
        let out = markdown_to_toml("---\ndescription: d\n---\nnothing to swap\n").unwrap();
        assert_eq!(out, "description = \"d\"\nprompt = \"nothing to swap\"\n");
    }

    #[test]
    fn markdown_to_toml_accepts_empty_input() {
        let out = markdown_to_toml("").unwrap();
        assert_eq!(out, "description = \"\"\nprompt = \"\"\n");
    }

    #[test]
    fn markdown_to_toml_trims_body_whitespace() {
        let out = markdown_to_toml("---\ndescription: d\n---\n\n  spaced out  \n\n").unwrap();
        assert_eq!(out, "description = \"d\"\nprompt = \"spaced out\"\n");
    }

    #[test]
    fn roundtrip_preserves_description_and_prompt() {
        let source = "description = \"deploy\"\nprompt = \"ship {{args}} now\"\n";
        let md = toml_to_markdown(source).unwrap();
        let back = markdown_to_toml(&md).unwrap();
        assert_eq!(back, source);
    }

    #[test]
    fn roundtrip_without_tokens_is_identity() {
        let source = "description = \"plain\"\nprompt = \"no tokens here\"\n";
        let md = toml_to_markdown(source).unwrap();
        let back = markdown_to_toml(&md).unwrap();
        assert_eq!(back, source);
    }

    #[test]
    fn literal_placeholder_in_prompt_drifts_on_roundtrip() {
        // A prompt already containing the opposite token is not escaped, so
        // it comes back as the template token. Inherited wire format.
        let source = "description = \"d\"\nprompt = \"literal [INPUT] here\"\n";
        let md = toml_to_markdown(source).unwrap();
        let back = markdown_to_toml(&md).unwrap();
        assert_eq!(back, "description = \"d\"\nprompt = \"literal {{args}} here\"\n");
    }

    #[test]
    fn multiline_prompt_survives_conversion() {
        let md = "---\ndescription: steps\n---\nfirst [INPUT]\nthen more\n";
        let out = markdown_to_toml(md).unwrap();
        let value: toml::Value = toml::from_str(&out).unwrap();
        assert_eq!(
            value.get("prompt").and_then(toml::Value::as_str),
            Some("first {{args}}\nthen more")
        );
    }
}
