use std::ffi::OsString;

use crate::request::{OutputFormat, QueryRequest};

/// Build the CLI argument vector for `request`.
///
/// Order is fixed: `--print --quiet`, then the optional flags in the order
/// workspace root, model, rules, output format, then the query as the last positional.
pub fn build_args(request: &QueryRequest) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec!["--print".into(), "--quiet".into()];

    if let Some(root) = request.workspace_root.as_deref() {
        args.push("--workspace-root".into());
        args.push(root.as_os_str().to_os_string());
    }
    if let Some(model) = request.model.as_deref() {
        args.push("--model".into());
        args.push(model.into());
    }
    if let Some(rules) = request.rules_path.as_deref() {
        args.push("--rules".into());
        args.push(rules.as_os_str().to_os_string());
    }
    if request.output_format == OutputFormat::Json {
        args.push("--output-format".into());
        args.push("json".into());
    }

    args.push(request.query().into());
    args
}
