use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::RequestError;

/// Output format requested from the CLI.
///
/// `text` is the CLI default and adds no flag; `json` appends `--output-format json`.
#[derive(Debug, Default, Deserialize, Serialize, JsonSchema, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// One question about a codebase, consumed by a single [`crate::Bridge::invoke`] call.
///
/// The query is only reachable through [`QueryRequest::new`], so an empty query can never
/// reach the spawn path. Optional fields follow "absent or falsy means default": empty
/// strings and a zero timeout are dropped by the builder methods.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryRequest {
    query: String,
    pub workspace_root: Option<PathBuf>,
    pub model: Option<String>,
    pub rules_path: Option<PathBuf>,
    pub timeout_secs: Option<u64>,
    pub output_format: OutputFormat,
}

impl QueryRequest {
    pub fn new(query: impl Into<String>) -> Result<Self, RequestError> {
        let query = query.into();
        if query.is_empty() {
            return Err(RequestError::EmptyQuery);
        }
        Ok(Self {
            query,
            workspace_root: None,
            model: None,
            rules_path: None,
            timeout_secs: None,
            output_format: OutputFormat::Text,
        })
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn with_workspace_root(mut self, root: Option<impl Into<PathBuf>>) -> Self {
        self.workspace_root = root.map(Into::into).filter(|p| !p.as_os_str().is_empty());
        self
    }

    pub fn with_model(mut self, model: Option<impl Into<String>>) -> Self {
        self.model = model.map(Into::into).filter(|m| !m.is_empty());
        self
    }

    pub fn with_rules_path(mut self, rules: Option<impl Into<PathBuf>>) -> Self {
        self.rules_path = rules.map(Into::into).filter(|p| !p.as_os_str().is_empty());
        self
    }

    pub fn with_timeout_secs(mut self, secs: Option<u64>) -> Self {
        self.timeout_secs = secs.filter(|s| *s > 0);
        self
    }

    pub fn with_output_format(mut self, format: Option<OutputFormat>) -> Self {
        self.output_format = format.unwrap_or_default();
        self
    }

    /// Deadline for this request, falling back to `default_secs` when none was given.
    pub fn deadline(&self, default_secs: u64) -> Duration {
        Duration::from_secs(self.timeout_secs.unwrap_or(default_secs))
    }

    /// Working directory for the child: the workspace root when given, else `fallback`.
    pub fn working_dir<'a>(&'a self, fallback: &'a Path) -> &'a Path {
        self.workspace_root.as_deref().unwrap_or(fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_the_empty_query_is_rejected() {
        assert_eq!(QueryRequest::new(""), Err(RequestError::EmptyQuery));

        // Whitespace is still a query; the CLI decides what to make of it.
        let request = QueryRequest::new("  \n\t").unwrap();
        assert_eq!(request.query(), "  \n\t");
    }

    #[test]
    fn falsy_optional_fields_are_treated_as_absent() {
        let request = QueryRequest::new("what is this?")
            .unwrap()
            .with_workspace_root(Some(""))
            .with_model(Some(""))
            .with_rules_path(Some(""))
            .with_timeout_secs(Some(0))
            .with_output_format(None);

        assert_eq!(request.workspace_root, None);
        assert_eq!(request.model, None);
        assert_eq!(request.rules_path, None);
        assert_eq!(request.timeout_secs, None);
        assert_eq!(request.output_format, OutputFormat::Text);
    }

    #[test]
    fn deadline_and_working_dir_fall_back_to_defaults() {
        let fallback = Path::new("/srv/default");
        let request = QueryRequest::new("q").unwrap();
        assert_eq!(request.deadline(240), Duration::from_secs(240));
        assert_eq!(request.working_dir(fallback), fallback);

        let request = request
            .with_timeout_secs(Some(5))
            .with_workspace_root(Some("/srv/repo"));
        assert_eq!(request.deadline(240), Duration::from_secs(5));
        assert_eq!(request.working_dir(fallback), Path::new("/srv/repo"));
    }

    #[test]
    fn output_format_uses_snake_case_on_the_wire() {
        let parsed: OutputFormat = serde_json::from_str("\"json\"").unwrap();
        assert_eq!(parsed, OutputFormat::Json);
        assert!(serde_json::from_str::<OutputFormat>("\"yaml\"").is_err());
    }
}
