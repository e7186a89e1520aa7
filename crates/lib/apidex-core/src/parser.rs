//! Tolerant OpenAPI document parsing.
//!
//! OpenAPI documents are conventionally YAML but frequently distributed as
//! JSON, often from URLs with no telling extension. Parsing picks a primary
//! format from the caller's hint or a cheap content sniff, then falls back to
//! the other format exactly once before giving up.

use std::{error::Error, fmt};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Serialization format of an OpenAPI document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Yaml,
    Json,
}

impl DocumentFormat {
    /// Maps a file extension to the format it indicates.
    ///
    /// Anything that is not a YAML-like extension is treated as JSON.
    #[must_use]
    pub fn from_extension(extension: &str) -> Self {
        if extension.eq_ignore_ascii_case("yaml") || extension.eq_ignore_ascii_case("yml") {
            Self::Yaml
        } else {
            Self::Json
        }
    }

    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::Yaml => Self::Json,
            Self::Json => Self::Yaml,
        }
    }

    const fn label(self) -> &'static str {
        match self {
            Self::Yaml => "YAML",
            Self::Json => "JSON",
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Weakly-typed OpenAPI document, typed only for the fields the index
/// consumes.
///
/// `paths` keeps document key order (via `serde_json`'s `preserve_order`
/// feature) so flattening order matches the source document. Everything else
/// is carried verbatim in `rest` so the raw schema can be served back
/// unmodified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paths: Option<Map<String, Value>>,
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

/// Error raised when a document is valid in neither attempted format.
///
/// Keeps the diagnostic from every attempt, primary format first.
#[derive(Debug)]
pub struct ParseError {
    attempts: Vec<(DocumentFormat, String)>,
}

impl ParseError {
    /// Formats and diagnostics of the failed attempts, in attempt order.
    #[must_use]
    pub fn attempts(&self) -> &[(DocumentFormat, String)] {
        &self.attempts
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "document parsed as neither format")?;
        for (format, message) in &self.attempts {
            write!(f, "; {format}: {message}")?;
        }
        Ok(())
    }
}

impl Error for ParseError {}

/// Parses an OpenAPI document, trying the primary format and then the other
/// one.
///
/// The primary format is the hint when one is given; without a hint, content
/// whose trimmed text starts with `openapi:` is treated as YAML, everything
/// else as JSON. This is a best-effort heuristic, not a validating parse:
/// content that parses but carries no `paths` simply contributes nothing to
/// the index later.
///
/// # Errors
/// Returns [`ParseError`] only when both format attempts fail.
pub fn parse_document(
    content: &str,
    hint: Option<DocumentFormat>,
) -> Result<ParsedDocument, ParseError> {
    let primary = hint.unwrap_or_else(|| sniff_format(content));
    let mut attempts = Vec::with_capacity(2);

    for format in [primary, primary.other()] {
        match parse_as(content, format) {
            Ok(document) => return Ok(document),
            Err(message) => attempts.push((format, message)),
        }
    }

    Err(ParseError { attempts })
}

fn sniff_format(content: &str) -> DocumentFormat {
    if content.trim_start().starts_with("openapi:") {
        DocumentFormat::Yaml
    } else {
        DocumentFormat::Json
    }
}

fn parse_as(content: &str, format: DocumentFormat) -> Result<ParsedDocument, String> {
    match format {
        DocumentFormat::Yaml => serde_yaml::from_str(content).map_err(|err| err.to_string()),
        DocumentFormat::Json => serde_json::from_str(content).map_err(|err| err.to_string()),
    }
}
