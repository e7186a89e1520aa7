//! MCP server implementation for apidex.
//!
//! This crate wires the endpoint catalog into rmcp tool handlers and exposes
//! the MCP-facing API surface for suggestion queries and schema access.

mod helpers;
mod tools;
pub mod server;

use std::sync::Arc;

use apidex_core::catalog::ApiCatalog;
use rmcp::{
    ErrorData,
    ServerHandler,
    handler::server::tool::ToolRouter,
    model::{
        AnnotateAble,
        CallToolResult,
        Content,
        ListResourcesResult,
        PaginatedRequestParams,
        RawResource,
        ReadResourceRequestParams,
        ReadResourceResult,
        ResourceContents,
        ServerCapabilities,
        ServerInfo,
    },
    service::{RequestContext, RoleServer},
    tool,
    tool_handler,
    tool_router,
};

const SERVER_INSTRUCTIONS: &str = r"apidex suggests API endpoints from ingested OpenAPI documents.

Workflow:
1. Call `suggest_api` with a `purpose` string describing what you want to do.
   Matching is a literal substring check against endpoint descriptions, so
   prefer short fragments ('user', 'order') over full sentences.
2. Each suggestion carries `service`, `path`, `method`, and `description`.
3. For the unflattened structure, call `suggest_schema` or read the
   `openapi://{service}` resources, which serve each ingested document as
   parsed.
4. `list_services` shows the configured services and their document sources.
5. `rebuild_index` re-fetches every source and swaps in a fresh index; a
   service whose document cannot be fetched or parsed is skipped, never
   fatal.

Notes:
- Descriptions come from each operation's `summary`, falling back to
  `description`, and may be empty.
- Use `help` for the command list. `health` returns `ok`.";

/// Scheme prefix for the per-service schema resources.
const RESOURCE_SCHEME: &str = "openapi://";

/// MCP server wrapper around the API catalog and tool routers.
#[derive(Clone)]
pub struct ApidexMcp {
    tool_router: ToolRouter<Self>,
    catalog: Arc<ApiCatalog>,
}

impl ApidexMcp {
    /// Creates a new server using a catalog by value.
    #[must_use]
    pub fn new(catalog: ApiCatalog) -> Self {
        Self::with_catalog(Arc::new(catalog))
    }

    /// Creates a new server using a shared catalog handle.
    #[must_use]
    pub fn with_catalog(catalog: Arc<ApiCatalog>) -> Self {
        let tool_router =
            Self::tool_router_core() + Self::tool_router_suggest() + Self::tool_router_context();
        Self {
            tool_router,
            catalog,
        }
    }

    pub(crate) fn catalog(&self) -> &ApiCatalog {
        &self.catalog
    }
}

#[tool_router(router = tool_router_core, vis = "pub")]
impl ApidexMcp {
    #[tool(description = "Health check. Returns 'ok'.")]
    async fn health(&self) -> Result<CallToolResult, ErrorData> {
        Ok(CallToolResult::success(vec![Content::text("ok")]))
    }
}

#[tool_handler]
impl ServerHandler for ApidexMcp {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(SERVER_INSTRUCTIONS.to_string()),
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_resources()
                .build(),
            ..Default::default()
        }
    }

    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, ErrorData> {
        let index = self.catalog.index().await;
        let resources = index
            .schemas()
            .iter()
            .map(|schema| {
                let mut resource = RawResource::new(
                    format!("{RESOURCE_SCHEME}{}", schema.service),
                    schema.service.clone(),
                );
                resource.description = Some(format!(
                    "Parsed OpenAPI document for service {}",
                    schema.service
                ));
                resource.mime_type = Some("application/json".to_string());
                resource.no_annotation()
            })
            .collect();
        Ok(ListResourcesResult {
            resources,
            next_cursor: None,
            meta: None,
        })
    }

    async fn read_resource(
        &self,
        request: ReadResourceRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, ErrorData> {
        let service = request
            .uri
            .strip_prefix(RESOURCE_SCHEME)
            .unwrap_or(request.uri.as_str());
        let index = self.catalog.index().await;
        let schema = index
            .schemas()
            .iter()
            .find(|schema| schema.service == service)
            .ok_or_else(|| {
                helpers::mcp_err(
                    rmcp::model::ErrorCode::RESOURCE_NOT_FOUND,
                    format!("no ingested schema for service: {service}"),
                )
            })?;
        let text = serde_json::to_string_pretty(&schema.document)
            .map_err(|err| helpers::internal_err(err.to_string()))?;
        Ok(ReadResourceResult {
            contents: vec![ResourceContents::text(text, request.uri)],
        })
    }
}
