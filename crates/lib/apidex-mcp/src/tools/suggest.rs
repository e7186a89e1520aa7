use apidex_core::model::DocumentSource;
use rmcp::{
    ErrorData,
    handler::server::wrapper::Parameters,
    model::{CallToolResult, Content},
    schemars,
    tool,
    tool_router,
};
use serde::{Deserialize, Serialize};

use crate::{ApidexMcp, helpers};

/// Parameters for suggesting API endpoints by purpose.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct SuggestApiParams {
    /// Free-text purpose matched as a literal substring of endpoint
    /// descriptions.
    pub purpose: String,
}

/// Summary of one configured service and where its document comes from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceSummary {
    pub name: String,
    pub source: Option<String>,
    pub ingested: bool,
}

/// Counts reported after an index rebuild.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RebuildReport {
    pub services: usize,
    pub endpoints: usize,
}

#[tool_router(router = tool_router_suggest, vis = "pub")]
impl ApidexMcp {
    #[tool(
        description = "Suggest API endpoints whose description contains the given purpose string."
    )]
    async fn suggest_api(
        &self,
        Parameters(params): Parameters<SuggestApiParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let index = self.catalog().index().await;
        let suggestions = index
            .suggest(&params.purpose)
            .map_err(|err| helpers::map_no_match(&err))?;
        Ok(CallToolResult::success(vec![Content::json(suggestions)?]))
    }

    #[tool(description = "Return the raw parsed OpenAPI documents for all ingested services.")]
    async fn suggest_schema(&self) -> Result<CallToolResult, ErrorData> {
        let index = self.catalog().index().await;
        Ok(CallToolResult::success(vec![Content::json(
            index.schemas(),
        )?]))
    }

    #[tool(description = "List configured services and their document sources.")]
    async fn list_services(&self) -> Result<CallToolResult, ErrorData> {
        let index = self.catalog().index().await;
        let summaries: Vec<ServiceSummary> = self
            .catalog()
            .descriptors()
            .iter()
            .map(|descriptor| ServiceSummary {
                name: descriptor.name.clone(),
                source: descriptor.source().map(|source| match source {
                    DocumentSource::Url(url) => url.to_string(),
                    DocumentSource::File(path) => path.display().to_string(),
                }),
                ingested: index
                    .schemas()
                    .iter()
                    .any(|schema| schema.service == descriptor.name),
            })
            .collect();
        Ok(CallToolResult::success(vec![Content::json(summaries)?]))
    }

    #[tool(
        description = "Re-fetch every configured OpenAPI source and swap in a freshly built index."
    )]
    async fn rebuild_index(&self) -> Result<CallToolResult, ErrorData> {
        let index = self.catalog().rebuild().await;
        let report = RebuildReport {
            services: index.schemas().len(),
            endpoints: index.len(),
        };
        Ok(CallToolResult::success(vec![Content::json(report)?]))
    }
}
