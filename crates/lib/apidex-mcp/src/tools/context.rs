use rmcp::{
    ErrorData,
    model::{CallToolResult, Content},
    tool,
    tool_router,
};
use serde::{Deserialize, Serialize};

use crate::ApidexMcp;

/// Payload listing the MCP commands this server exposes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HelpCommands {
    pub commands: Vec<String>,
}

impl Default for HelpCommands {
    fn default() -> Self {
        Self {
            commands: vec![
                "help - List the MCP commands this server exposes.".to_string(),
                "suggest_api - Suggest API endpoints whose description contains a purpose string."
                    .to_string(),
                "suggest_schema - Return the raw parsed OpenAPI documents for all ingested services."
                    .to_string(),
                "list_services - List configured services and their document sources.".to_string(),
                "rebuild_index - Re-fetch every OpenAPI source and swap in a fresh index."
                    .to_string(),
                "health - Health check, returns 'ok'.".to_string(),
            ],
        }
    }
}

#[tool_router(router = tool_router_context, vis = "pub")]
impl ApidexMcp {
    #[tool(description = "List the MCP commands this server exposes.")]
    async fn help(&self) -> Result<CallToolResult, ErrorData> {
        Ok(CallToolResult::success(vec![Content::json(
            HelpCommands::default(),
        )?]))
    }
}
