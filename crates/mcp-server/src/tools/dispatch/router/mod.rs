// Per-tool dispatch functions used by the MCP tool router.

pub(super) mod error;
pub(super) mod query_codebase;
mod tool_router;

pub(super) use tool_router::build_tool_router_with_param_hints;
