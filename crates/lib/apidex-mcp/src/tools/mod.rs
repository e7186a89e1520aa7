//! MCP tool modules.
//!
//! Tools are grouped by domain: suggestion queries over the endpoint index,
//! and contextual help for callers.

pub mod suggest;
mod context;
