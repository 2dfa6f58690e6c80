use serde::Serialize;
use std::io;
use std::time::Duration;
use thiserror::Error;

/// Answer produced by a CLI run that exited 0 before its deadline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryResult {
    /// Captured stdout with surrounding whitespace removed.
    pub answer: String,
    /// Wall-clock time from dispatch to completion.
    pub duration_ms: u64,
}

/// Every way one invocation can fail. Exactly one of these, or a [`QueryResult`], is produced
/// per call.
#[derive(Error, Debug)]
pub enum InvocationError {
    /// The CLI ran to completion and exited non-zero (or was killed by a signal it did not
    /// receive from us). Streams are trimmed; an empty stream stays an empty string.
    #[error(
        "{}\nSTDERR: {}\nSTDOUT: {}",
        describe_exit(.exit_code, .signal),
        or_empty(.stderr),
        or_empty(.stdout)
    )]
    ProcessFailure {
        exit_code: Option<i32>,
        signal: Option<i32>,
        stdout: String,
        stderr: String,
    },

    /// The deadline fired first and the child was terminated. Output captured up to that
    /// point is kept for diagnostics.
    #[error("Query timed out after {budget_secs} seconds")]
    Timeout {
        budget_secs: u64,
        elapsed: Duration,
        stdout: String,
        stderr: String,
    },

    /// The CLI could not be started at all.
    #[error("Failed to spawn Auggie CLI ({program}): {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
}

impl InvocationError {
    /// Stable machine-readable name of the failure kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ProcessFailure { .. } => "process_failure",
            Self::Timeout { .. } => "timeout",
            Self::Spawn { .. } => "spawn_error",
        }
    }

    /// Seconds elapsed before the deadline fired, for [`InvocationError::Timeout`].
    pub fn elapsed_seconds(&self) -> Option<f64> {
        match self {
            Self::Timeout { elapsed, .. } => Some(elapsed.as_secs_f64()),
            _ => None,
        }
    }
}

/// Result of one [`crate::Bridge::invoke`] call.
pub type InvocationOutcome = Result<QueryResult, InvocationError>;

fn describe_exit(exit_code: &Option<i32>, signal: &Option<i32>) -> String {
    match (exit_code, signal) {
        (Some(code), _) => format!("Auggie CLI failed with exit code {code}"),
        (None, Some(signal)) => format!("Auggie CLI was terminated by signal {signal}"),
        (None, None) => "Auggie CLI failed without an exit code".to_string(),
    }
}

fn or_empty(text: &str) -> &str {
    if text.is_empty() {
        "<empty>"
    } else {
        text
    }
}
