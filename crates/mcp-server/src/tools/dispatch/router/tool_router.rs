use super::super::tool_router_hints::ToolRouterWithParamHints;
use super::super::{AuggieService, CallToolResult, McpError};
use crate::tools::schemas::query_codebase::QueryCodebaseRequest;

use rmcp::handler::server::wrapper::Parameters;
use rmcp::{tool, tool_router};

pub(in crate::tools::dispatch) fn build_tool_router_with_param_hints(
) -> ToolRouterWithParamHints<AuggieService> {
    ToolRouterWithParamHints::new(AuggieService::tool_router())
}

#[tool_router]
impl AuggieService {
    /// Answer a question about a codebase via the Auggie CLI.
    #[tool(
        description = "Query a codebase using Augment's context engine via Auggie CLI. This tool provides intelligent answers about code structure, functionality, and implementation details by leveraging Augment's advanced context retrieval."
    )]
    pub async fn query_codebase(
        &self,
        Parameters(request): Parameters<QueryCodebaseRequest>,
    ) -> Result<CallToolResult, McpError> {
        super::query_codebase::query_codebase(self, request).await
    }
}
