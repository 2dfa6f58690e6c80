//! Startup checks. These run once, before the server accepts calls; any failure is fatal.

use std::process::Stdio;
use tokio::process::Command;

use crate::config::{BridgeConfig, AUTH_ENV};
use crate::error::PreflightError;

/// Verify the CLI starts and reports a non-empty version. Returns the trimmed version string.
pub async fn check_cli(config: &BridgeConfig) -> Result<String, PreflightError> {
    let mut command = Command::new(&config.program);
    command
        .arg("--version")
        .env_clear()
        .envs(config.env.iter().map(|(k, v)| (k, v)))
        .current_dir(config.working_dir())
        .stdin(Stdio::null())
        .kill_on_drop(true);

    let output = match tokio::time::timeout(config.preflight_timeout, command.output()).await {
        Ok(Ok(output)) => output,
        Ok(Err(err)) => {
            return Err(PreflightError::CliUnavailable {
                cause: err.to_string(),
            })
        }
        Err(_) => {
            return Err(PreflightError::CliUnavailable {
                cause: format!(
                    "`{} --version` did not finish within {}s",
                    config.program_display(),
                    config.preflight_timeout.as_secs()
                ),
            })
        }
    };

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        return Err(PreflightError::CliUnavailable {
            cause: format!(
                "`{} --version` exited with {}: {}",
                config.program_display(),
                output.status,
                if stderr.is_empty() { "<empty>" } else { &stderr }
            ),
        });
    }

    let version = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if version.is_empty() {
        return Err(PreflightError::EmptyVersion);
    }
    Ok(version)
}

/// Verify the session credential is present (and non-empty) in the captured environment.
pub fn check_auth(config: &BridgeConfig) -> Result<(), PreflightError> {
    match config.env_var(AUTH_ENV) {
        Some(token) if !token.is_empty() => Ok(()),
        _ => Err(PreflightError::MissingAuth { var: AUTH_ENV }),
    }
}
