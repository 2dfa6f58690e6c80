use serde_json::json;

pub(crate) const SERVER_NAME: &str = "auggie-mcp";

#[derive(Clone, Copy, Debug)]
pub(crate) struct ToolDescriptor {
    pub(crate) name: &'static str,
    pub(crate) summary: &'static str,
}

pub(crate) const TOOL_CATALOG: &[ToolDescriptor] = &[ToolDescriptor {
    name: "query_codebase",
    summary: "Ask a natural-language question about a codebase (answered by the Auggie CLI).",
}];

pub(crate) fn tool_instructions() -> String {
    let mut lines = vec![
        "Auggie MCP answers questions about a codebase by running the Auggie CLI.".to_string(),
        "Pass an absolute workspace_root when the server was not started inside the repository."
            .to_string(),
        "Tools:".to_string(),
    ];
    for tool in TOOL_CATALOG {
        lines.push(format!("- {}: {}", tool.name, tool.summary));
    }
    lines.join("\n")
}

pub(crate) fn tool_inventory_json(version: &str) -> serde_json::Value {
    let tools: Vec<serde_json::Value> = TOOL_CATALOG
        .iter()
        .map(|tool| json!({ "name": tool.name, "summary": tool.summary }))
        .collect();

    json!({
        "binary": SERVER_NAME,
        "version": version,
        "count": tools.len(),
        "tools": tools,
    })
}
