use std::process::Stdio;
use std::sync::Arc;
use tokio::process::Command;

use crate::args::build_args;
use crate::config::BridgeConfig;
use crate::outcome::{InvocationError, InvocationOutcome, QueryResult};
use crate::request::QueryRequest;
use crate::supervisor::{self, Captured, Limits, Terminal};

/// Stateless front door to the CLI. Cheap to clone; concurrent `invoke` calls share nothing
/// but the read-only config.
#[derive(Debug, Clone)]
pub struct Bridge {
    config: Arc<BridgeConfig>,
}

impl Bridge {
    pub fn new(config: BridgeConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    /// Run the CLI once for `request` and classify what happened.
    pub async fn invoke(&self, request: &QueryRequest) -> InvocationOutcome {
        let budget_secs = request
            .timeout_secs
            .unwrap_or(self.config.default_timeout_secs);
        let limits = Limits {
            deadline: request.deadline(self.config.default_timeout_secs),
            kill_grace: self.config.kill_grace,
        };

        let command = self.command_for(request);
        log::debug!(
            "Dispatching query to {} (deadline {budget_secs}s)",
            self.config.program_display()
        );

        let captured = supervisor::run(command, limits)
            .await
            .map_err(|source| InvocationError::Spawn {
                program: self.config.program_display(),
                source,
            })?;

        let outcome = classify(captured, budget_secs, &self.config.program_display());
        match &outcome {
            Ok(result) => log::info!("Query answered in {}ms", result.duration_ms),
            Err(err) => log::warn!("Query failed ({}): {}", err.kind(), first_line(&err.to_string())),
        }
        outcome
    }

    fn command_for(&self, request: &QueryRequest) -> Command {
        let mut command = Command::new(&self.config.program);
        command
            .args(build_args(request))
            .env_clear()
            .envs(self.config.env.iter().map(|(k, v)| (k, v)))
            .current_dir(request.working_dir(self.config.working_dir()))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        command
    }
}

fn classify(captured: Captured, budget_secs: u64, program: &str) -> InvocationOutcome {
    let Captured {
        terminal,
        stdout,
        stderr,
        elapsed,
    } = captured;
    let stdout = String::from_utf8_lossy(&stdout).trim().to_string();
    let stderr = String::from_utf8_lossy(&stderr).trim().to_string();

    match terminal {
        Terminal::Exited(status) if status.success() => Ok(QueryResult {
            answer: stdout,
            duration_ms: u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
        }),
        Terminal::Exited(status) => Err(InvocationError::ProcessFailure {
            exit_code: status.code(),
            signal: exit_signal(&status),
            stdout,
            stderr,
        }),
        Terminal::DeadlineElapsed => Err(InvocationError::Timeout {
            budget_secs,
            elapsed,
            stdout,
            stderr,
        }),
        Terminal::WaitFailed(source) => Err(InvocationError::Spawn {
            program: program.to_string(),
            source,
        }),
    }
}

#[cfg(unix)]
fn exit_signal(status: &std::process::ExitStatus) -> Option<i32> {
    use std::os::unix::process::ExitStatusExt;
    status.signal()
}

#[cfg(not(unix))]
fn exit_signal(_status: &std::process::ExitStatus) -> Option<i32> {
    None
}

fn first_line(text: &str) -> &str {
    text.lines().next().unwrap_or_default()
}
