use super::super::{CallToolResult, Content};
use auggie_bridge::InvocationError;
use serde::Serialize;
use serde_json::json;

/// Machine-readable twin of the `Error: ...` text, attached as structured content.
#[derive(Debug, Serialize)]
pub(in crate::tools::dispatch) struct ErrorEnvelope {
    pub code: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<&'static str>,
}

pub(in crate::tools::dispatch) fn tool_error_envelope(error: ErrorEnvelope) -> CallToolResult {
    let mut result =
        CallToolResult::error(vec![Content::text(format!("Error: {}", error.message))]);
    result.structured_content = Some(json!({ "error": error }));
    result
}

pub(in crate::tools::dispatch) fn invalid_request(message: impl Into<String>) -> CallToolResult {
    tool_error_envelope(ErrorEnvelope {
        code: "invalid_request",
        message: message.into(),
        details: None,
        hint: None,
    })
}

pub(in crate::tools::dispatch) fn invocation_error(error: &InvocationError) -> CallToolResult {
    let (details, hint) = match error {
        InvocationError::ProcessFailure {
            exit_code, signal, ..
        } => (
            json!({ "exit_code": exit_code, "signal": signal }),
            "Check the query and workspace_root; the CLI output above explains the failure.",
        ),
        InvocationError::Timeout {
            budget_secs,
            elapsed,
            ..
        } => (
            json!({ "timeout_sec": budget_secs, "elapsed_seconds": elapsed.as_secs_f64() }),
            "Retry with a larger timeout_sec or a narrower question.",
        ),
        InvocationError::Spawn { program, .. } => (
            json!({ "program": program }),
            "Make sure the Auggie CLI is installed and workspace_root exists.",
        ),
    };

    tool_error_envelope(ErrorEnvelope {
        code: error.kind(),
        message: error.to_string(),
        details: Some(details),
        hint: Some(hint),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn text(result: &CallToolResult) -> &str {
        result
            .content
            .first()
            .and_then(|c| c.as_text())
            .map(|t| t.text.as_str())
            .unwrap_or_default()
    }

    #[test]
    fn invalid_request_is_prefixed_and_flagged() {
        let result = invalid_request("'query' argument is required and must be a string");
        assert_eq!(result.is_error, Some(true));
        assert_eq!(
            text(&result),
            "Error: 'query' argument is required and must be a string"
        );
    }

    #[test]
    fn timeout_renders_message_and_details() {
        let err = InvocationError::Timeout {
            budget_secs: 1,
            elapsed: Duration::from_millis(1_500),
            stdout: String::new(),
            stderr: String::new(),
        };
        let result = invocation_error(&err);

        assert_eq!(result.is_error, Some(true));
        assert_eq!(text(&result), "Error: Query timed out after 1 seconds");
        let structured = result.structured_content.expect("structured error");
        assert_eq!(structured["error"]["code"], "timeout");
        assert_eq!(structured["error"]["details"]["timeout_sec"], 1);
        assert_eq!(structured["error"]["details"]["elapsed_seconds"], 1.5);
    }

    #[test]
    fn process_failure_text_includes_streams() {
        let err = InvocationError::ProcessFailure {
            exit_code: Some(1),
            signal: None,
            stdout: String::new(),
            stderr: "boom".to_string(),
        };
        let result = invocation_error(&err);
        assert_eq!(
            text(&result),
            "Error: Auggie CLI failed with exit code 1\nSTDERR: boom\nSTDOUT: <empty>"
        );
    }
}
