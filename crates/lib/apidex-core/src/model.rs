//! Data model for the endpoint index.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::parser::ParsedDocument;

/// Names one API service and where its OpenAPI document comes from.
///
/// Supplied by configuration and read-only afterwards. Exactly one of the
/// two source fields is expected to be set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceDescriptor {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub openapi_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub openapi_file_path: Option<PathBuf>,
}

impl ServiceDescriptor {
    /// Creates a descriptor backed by a remote URL.
    #[must_use]
    pub fn from_url(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            openapi_url: Some(url.into()),
            openapi_file_path: None,
        }
    }

    /// Creates a descriptor backed by a local file.
    #[must_use]
    pub fn from_file(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            openapi_url: None,
            openapi_file_path: Some(path.into()),
        }
    }

    /// Resolves the configured document source.
    ///
    /// The URL wins when both fields happen to be set. Returns `None` when
    /// neither field is configured; the loader reports that as a
    /// missing-source failure for this entry.
    #[must_use]
    pub fn source(&self) -> Option<DocumentSource<'_>> {
        if let Some(url) = self.openapi_url.as_deref() {
            return Some(DocumentSource::Url(url));
        }
        self.openapi_file_path.as_deref().map(DocumentSource::File)
    }
}

/// Borrowed view of a descriptor's document source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentSource<'a> {
    Url(&'a str),
    File(&'a Path),
}

/// One flattened (service, path, method, description) entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointRecord {
    pub service: String,
    pub path: String,
    /// Upper-cased HTTP method name.
    pub method: String,
    /// Operation `summary` if non-empty, else `description`, else empty.
    pub description: String,
}

/// Raw parsed document retained for a successfully ingested service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceSchema {
    pub service: String,
    pub document: ParsedDocument,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_wins_when_both_sources_are_set() {
        let descriptor = ServiceDescriptor {
            name: "petstore".to_string(),
            openapi_url: Some("https://example.com/openapi.json".to_string()),
            openapi_file_path: Some(PathBuf::from("/tmp/openapi.yaml")),
        };

        assert_eq!(
            descriptor.source(),
            Some(DocumentSource::Url("https://example.com/openapi.json"))
        );
    }

    #[test]
    fn descriptor_without_sources_resolves_to_none() {
        let descriptor = ServiceDescriptor {
            name: "petstore".to_string(),
            openapi_url: None,
            openapi_file_path: None,
        };

        assert!(descriptor.source().is_none());
    }
}
