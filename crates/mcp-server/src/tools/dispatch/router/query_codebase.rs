use super::super::{AuggieService, CallToolResult, Content, McpError};
use super::error::{invalid_request, invocation_error};
use crate::tools::schemas::query_codebase::QueryCodebaseRequest;

pub(in crate::tools::dispatch) async fn query_codebase(
    service: &AuggieService,
    request: QueryCodebaseRequest,
) -> Result<CallToolResult, McpError> {
    let request = match request.into_query_request() {
        Ok(request) => request,
        Err(err) => return Ok(invalid_request(err.to_string())),
    };

    match service.bridge().invoke(&request).await {
        Ok(result) => Ok(CallToolResult::success(vec![Content::text(result.answer)])),
        Err(err) => Ok(invocation_error(&err)),
    }
}
