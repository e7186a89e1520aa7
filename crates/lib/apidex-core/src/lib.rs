//! Core ingestion pipeline for apidex.
//!
//! Resolves OpenAPI documents from configured services, parses them with a
//! tolerant YAML/JSON fallback, and flattens them into a searchable index of
//! endpoint records.

pub mod catalog;
pub mod index;
pub mod loader;
pub mod model;
pub mod parser;
pub mod query;

pub use catalog::ApiCatalog;
pub use index::{EndpointIndex, IndexBuilder};
pub use loader::{DocumentLoader, LoadError};
pub use model::{DocumentSource, EndpointRecord, ServiceDescriptor, ServiceSchema};
pub use parser::{DocumentFormat, ParseError, ParsedDocument};
pub use query::NoMatch;
