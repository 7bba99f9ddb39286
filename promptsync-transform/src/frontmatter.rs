//! YAML front matter codec for Format B documents.
//!
//! A document is an optional header block delimited by `---` lines, holding
//! a `description` string, followed by a free-text body. Parsing is
//! deliberately forgiving: no header, an empty header, an unterminated
//! header, or a non-string `description` all degrade to an empty
//! description rather than failing — empty or headerless input must never
//! crash the watcher. Only a genuinely malformed YAML header is an error.

use crate::error::TransformError;

/// A parsed Format B document: metadata plus raw body.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Document {
    pub description: String,
    pub body: String,
}

/// Parse a Format B document into header metadata and body.
pub fn parse(input: &str) -> Result<Document, TransformError> {
    let mut lines = input.split_inclusive('\n');

    let Some(first) = lines.next() else {
        return Ok(Document::default());
    };
    if first.trim_end() != "---" {
        return Ok(Document {
            description: String::new(),
            body: input.to_owned(),
        });
    }

    let mut header = String::new();
    let mut terminated = false;
    for line in lines.by_ref() {
        if line.trim_end() == "---" {
            terminated = true;
            break;
        }
        header.push_str(line);
    }

    // Unterminated header: treat the whole input as body.
    if !terminated {
        return Ok(Document {
            description: String::new(),
            body: input.to_owned(),
        });
    }

    let body: String = lines.collect();
    let description = parse_description(&header)?;
    Ok(Document { description, body })
}

fn parse_description(header: &str) -> Result<String, TransformError> {
    if header.trim().is_empty() {
        return Ok(String::new());
    }
    let meta: serde_yaml::Value = serde_yaml::from_str(header)?;
    Ok(meta
        .get("description")
        .and_then(serde_yaml::Value::as_str)
        .unwrap_or_default()
        .to_owned())
}

/// Serialize a [`Document`] back to Format B text.
///
/// Always emits a header (even for an empty description) and guarantees a
/// single trailing newline after the body.
pub fn render(doc: &Document) -> Result<String, TransformError> {
    let mut meta = serde_yaml::Mapping::new();
    meta.insert(
        serde_yaml::Value::from("description"),
        serde_yaml::Value::from(doc.description.as_str()),
    );
    let header = serde_yaml::to_string(&meta)?;

    let mut out = format!("---\n{header}---\n{}", doc.body);
    if !out.ends_with('\n') {
        out.push('\n');
    }
    Ok(out)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_header_and_body() {
        let doc = parse("---\ndescription: deploy helper\n---\nrun the thing\n").unwrap();
        assert_eq!(doc.description, "deploy helper");
        assert_eq!(doc.body, "run the thing\n");
    }

    #[test]
    fn empty_input_yields_empty_document() {
        let doc = parse("").unwrap();
        assert_eq!(doc.description, "");
        assert_eq!(doc.body, "");
    }

    #[test]
    fn input_without_header_is_all_body() {
        let doc = parse("just a body\nwith two lines\n").unwrap();
        assert_eq!(doc.description, "");
        assert_eq!(doc.body, "just a body\nwith two lines\n");
    }

    #[test]
    fn unterminated_header_is_treated_as_body() {
        let input = "---\ndescription: dangling\nno closing fence";
        let doc = parse(input).unwrap();
        assert_eq!(doc.description, "");
        assert_eq!(doc.body, input);
    }

    #[test]
    fn empty_header_block_is_not_an_error() {
        let doc = parse("---\n---\nbody\n").unwrap();
        assert_eq!(doc.description, "");
        assert_eq!(doc.body, "body\n");
    }

    #[test]
    fn non_string_description_degrades_to_empty() {
        let doc = parse("---\ndescription: 42\n---\nbody\n").unwrap();
        assert_eq!(doc.description, "");
    }

    #[test]
    fn malformed_header_yaml_is_an_error() {
        let err = parse("---\ndescription: [unclosed\n---\nbody\n").unwrap_err();
        assert!(err.to_string().starts_with("Invalid Markdown:"));
    }

    #[test]
    fn render_emits_header_and_trailing_newline() {
        let doc = Document {
            description: "d".to_string(),
            body: "hi there".to_string(),
        };
        let out = render(&doc).unwrap();
        assert_eq!(out, "---\ndescription: d\n---\nhi there\n");
    }

    #[test]
    fn render_parse_roundtrip() {
        let doc = Document {
            description: "a: tricky description".to_string(),
            body: "line one\nline two".to_string(),
        };
        let rendered = render(&doc).unwrap();
        let reparsed = parse(&rendered).unwrap();
        assert_eq!(reparsed.description, doc.description);
        assert_eq!(reparsed.body.trim_end(), doc.body);
    }
}
