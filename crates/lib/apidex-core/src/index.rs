//! Builds the flat endpoint index from configured services.

use futures::future;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::loader::DocumentLoader;
use crate::model::{DocumentSource, EndpointRecord, ServiceDescriptor, ServiceSchema};
use crate::parser::{self, DocumentFormat, ParsedDocument};

/// Ordered collection of endpoint records plus the raw schemas they came
/// from.
///
/// Records are insertion-ordered by service, then path key, then method key
/// as encountered during flattening. Duplicates are permitted and preserved;
/// the index only ever changes by full rebuild.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EndpointIndex {
    records: Vec<EndpointRecord>,
    schemas: Vec<ServiceSchema>,
}

impl EndpointIndex {
    #[must_use]
    pub fn records(&self) -> &[EndpointRecord] {
        &self.records
    }

    #[must_use]
    pub fn schemas(&self) -> &[ServiceSchema] {
        &self.schemas
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn push_contribution(&mut self, contribution: ServiceContribution) {
        self.records.extend(contribution.records);
        self.schemas.push(contribution.schema);
    }
}

struct ServiceContribution {
    schema: ServiceSchema,
    records: Vec<EndpointRecord>,
}

/// Constructs [`EndpointIndex`] values from descriptor lists.
#[derive(Debug, Clone)]
pub struct IndexBuilder {
    loader: DocumentLoader,
}

impl IndexBuilder {
    #[must_use]
    pub const fn new(loader: DocumentLoader) -> Self {
        Self { loader }
    }

    /// Builds a fresh index over every descriptor.
    ///
    /// Descriptors are fetched in parallel; `join_all` keeps the results in
    /// descriptor order, so the output ordering is deterministic. A
    /// descriptor whose load or parse fails contributes zero records and
    /// never blocks its siblings, so the worst case is an empty index.
    pub async fn build(&self, descriptors: &[ServiceDescriptor]) -> EndpointIndex {
        let contributions =
            future::join_all(descriptors.iter().map(|descriptor| self.ingest(descriptor))).await;

        let mut index = EndpointIndex::default();
        for contribution in contributions.into_iter().flatten() {
            index.push_contribution(contribution);
        }
        debug!(
            services = index.schemas.len(),
            endpoints = index.records.len(),
            "endpoint index built"
        );
        index
    }

    async fn ingest(&self, descriptor: &ServiceDescriptor) -> Option<ServiceContribution> {
        let content = match self.loader.load(descriptor).await {
            Ok(content) => content,
            Err(err) => {
                warn!(service = %descriptor.name, error = %err, "skipping service: document unavailable");
                return None;
            }
        };

        let document = match parser::parse_document(&content, format_hint(descriptor)) {
            Ok(document) => document,
            Err(err) => {
                warn!(service = %descriptor.name, error = %err, "skipping service: document did not parse");
                return None;
            }
        };

        let records = flatten_document(&descriptor.name, &document);
        Some(ServiceContribution {
            schema: ServiceSchema {
                service: descriptor.name.clone(),
                document,
            },
            records,
        })
    }
}

/// Format hint derived from a file source's extension. URL sources carry no
/// hint and rely on content sniffing.
fn format_hint(descriptor: &ServiceDescriptor) -> Option<DocumentFormat> {
    match descriptor.source() {
        Some(DocumentSource::File(path)) => path
            .extension()
            .and_then(|extension| extension.to_str())
            .map(DocumentFormat::from_extension),
        _ => None,
    }
}

/// Operation fields consumed by the index.
#[derive(Debug, Clone, Default, Deserialize)]
struct Operation {
    #[serde(default)]
    summary: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

impl Operation {
    fn describe(&self) -> String {
        non_empty(self.summary.as_deref())
            .or_else(|| non_empty(self.description.as_deref()))
            .unwrap_or_default()
            .to_string()
    }
}

fn non_empty(text: Option<&str>) -> Option<&str> {
    text.filter(|text| !text.is_empty())
}

/// Flattens a parsed document's path/method tree into endpoint records.
///
/// A document without `paths` yields no records, which is not an error.
/// Malformed entries are isolated: a path item or operation value that is
/// not an object is skipped while its siblings still contribute.
fn flatten_document(service: &str, document: &ParsedDocument) -> Vec<EndpointRecord> {
    let Some(paths) = document.paths.as_ref() else {
        return Vec::new();
    };

    let mut records = Vec::new();
    for (path, item) in paths {
        let Some(methods) = item.as_object() else {
            warn!(service, path = %path, "skipping path entry that is not an object");
            continue;
        };
        for (method, value) in methods {
            if !value.is_object() {
                warn!(
                    service,
                    path = %path,
                    method = %method,
                    "skipping operation entry that is not an object"
                );
                continue;
            }
            let operation: Operation =
                serde_json::from_value(value.clone()).unwrap_or_default();
            records.push(EndpointRecord {
                service: service.to_string(),
                path: path.clone(),
                method: method.to_uppercase(),
                description: operation.describe(),
            });
        }
    }
    records
}
