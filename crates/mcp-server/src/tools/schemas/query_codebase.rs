use auggie_bridge::{OutputFormat, QueryRequest, RequestError};
use rmcp::schemars;
use serde::Deserialize;

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct QueryCodebaseRequest {
    /// Natural-language question about the codebase
    #[schemars(description = "The question or query about the codebase")]
    pub query: String,

    /// Repository root the CLI should index and run in
    #[schemars(
        description = "Absolute path to the workspace/repository root. Defaults to current directory."
    )]
    pub workspace_root: Option<String>,

    #[schemars(
        description = "Model ID to use (optional). Example: 'claude-3-5-sonnet-20241022'"
    )]
    pub model: Option<String>,

    #[schemars(description = "Path to additional rules file (optional)")]
    pub rules_path: Option<String>,

    /// Deadline in whole seconds (default: 240)
    #[serde(alias = "timeout_seconds")]
    #[schemars(description = "Query timeout in seconds. Default: 240", extend("default" = 240))]
    pub timeout_sec: Option<u64>,

    #[schemars(description = "Output format. Default: text", extend("default" = "text"))]
    pub output_format: Option<OutputFormat>,
}

impl QueryCodebaseRequest {
    /// Validate and convert into the bridge request. Empty optional fields count as absent.
    pub fn into_query_request(self) -> Result<QueryRequest, RequestError> {
        Ok(QueryRequest::new(self.query)?
            .with_workspace_root(self.workspace_root)
            .with_model(self.model)
            .with_rules_path(self.rules_path)
            .with_timeout_secs(self.timeout_sec)
            .with_output_format(self.output_format))
    }
}
