//! MCP tool dispatch for Auggie MCP
//!
//! Decodes `query_codebase` calls, hands them to the [`Bridge`], and renders every outcome as a
//! normal call result (`isError` for failures). Only unknown tools surface as protocol errors.

mod router;
mod service;
mod tool_router_hints;

use auggie_bridge::Bridge;
use rmcp::model::{CallToolResult, Content};
use rmcp::ErrorData as McpError;

/// Auggie MCP Service
#[derive(Clone)]
pub struct AuggieService {
    /// Invocation bridge (stateless, shared by all calls)
    bridge: Bridge,
    /// Tool router
    tool_router: tool_router_hints::ToolRouterWithParamHints<AuggieService>,
}
