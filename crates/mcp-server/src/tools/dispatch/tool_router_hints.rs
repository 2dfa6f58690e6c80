use rmcp::handler::server::tool::{ToolCallContext, ToolRouter};
use rmcp::model::{CallToolResult, ErrorCode, JsonObject, Tool};
use rmcp::ErrorData;
use serde_json::{json, Map, Value};

use super::router::error::invalid_request;
use super::AuggieService;

/// Wraps the generated router so argument decode failures for a known tool come back as
/// `isError` call results (with a schema hint) instead of JSON-RPC errors.
#[derive(Clone)]
pub(super) struct ToolRouterWithParamHints<S> {
    inner: ToolRouter<S>,
}

impl<S> ToolRouterWithParamHints<S>
where
    S: Send + Sync + 'static,
{
    pub(super) fn new(inner: ToolRouter<S>) -> Self {
        Self { inner }
    }

    pub(super) fn list_all(&self) -> Vec<Tool> {
        self.inner.list_all()
    }
}

impl ToolRouterWithParamHints<AuggieService> {
    pub(super) async fn call(
        &self,
        context: ToolCallContext<'_, AuggieService>,
    ) -> Result<CallToolResult, ErrorData> {
        let tool_name = context.name.to_string();
        let args = context.arguments.clone();

        match self.inner.call(context).await {
            Ok(result) => Ok(result),
            Err(err)
                if err.code == ErrorCode::INVALID_PARAMS
                    && self.inner.map.contains_key(tool_name.as_str()) =>
            {
                log::debug!("Rejected arguments for '{tool_name}': {}", err.message);
                Ok(invalid_request(describe_invalid_params(
                    &self.inner,
                    &tool_name,
                    args.as_ref(),
                    &err,
                )))
            }
            Err(err) => Err(err),
        }
    }
}

fn describe_invalid_params<S>(
    router: &ToolRouter<S>,
    tool_name: &str,
    args: Option<&JsonObject>,
    err: &ErrorData,
) -> String {
    let schema = router
        .map
        .get(tool_name)
        .map(|route| route.attr.input_schema.as_ref());

    let missing_query = extract_serde_field(&err.message, "missing field `").as_deref()
        == Some("query")
        || args
            .and_then(|a| a.get("query"))
            .is_some_and(|q| !q.is_string());

    let mut message = if missing_query {
        "'query' argument is required and must be a string".to_string()
    } else {
        format!("Invalid parameters for tool '{tool_name}': {}", err.message)
    };
    if let Some(hint) = schema.and_then(|schema| build_schema_hint(schema, args)) {
        message.push_str(". Hint: ");
        message.push_str(&hint);
    }
    if message.len() > 900 {
        let mut cut = 900;
        while !message.is_char_boundary(cut) {
            cut -= 1;
        }
        message.truncate(cut);
        message.push('…');
    }
    message
}

fn build_schema_hint(schema: &Map<String, Value>, args: Option<&JsonObject>) -> Option<String> {
    let required: Vec<&str> = schema
        .get("required")
        .and_then(Value::as_array)?
        .iter()
        .filter_map(Value::as_str)
        .collect();
    if required.is_empty() {
        return None;
    }

    let mut out = format!("Required: {}.", required.join(", "));
    if required.contains(&"query") {
        let example = json!({ "query": query_placeholder(args) });
        out.push_str(&format!(" Example: {example}"));
    }
    Some(out)
}

fn extract_serde_field(message: &str, prefix: &str) -> Option<String> {
    let start = message.find(prefix)? + prefix.len();
    let rest = &message[start..];
    let end = rest.find('`')?;
    let field = rest[..end].trim();
    if field.is_empty() {
        None
    } else {
        Some(field.to_string())
    }
}

fn query_placeholder(args: Option<&JsonObject>) -> String {
    // Common slip: the question was sent under another name.
    args.and_then(|a| a.get("question").or_else(|| a.get("prompt")))
        .and_then(Value::as_str)
        .filter(|v| !v.trim().is_empty())
        .unwrap_or("What does the auth module do?")
        .to_string()
}
