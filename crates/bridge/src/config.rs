use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Program invoked when `AUGGIE_MCP_BIN` is not set.
pub const DEFAULT_PROGRAM: &str = "auggie";
/// Credential the CLI needs; checked at startup and passed through to every child.
pub const AUTH_ENV: &str = "AUGMENT_SESSION_AUTH";
pub const DEFAULT_QUERY_TIMEOUT_SECS: u64 = 240;
pub const DEFAULT_KILL_GRACE: Duration = Duration::from_millis(2_000);
pub const DEFAULT_PREFLIGHT_TIMEOUT: Duration = Duration::from_secs(15);

const PROGRAM_ENV: &str = "AUGGIE_MCP_BIN";
const DEFAULT_TIMEOUT_ENV: &str = "AUGGIE_MCP_DEFAULT_TIMEOUT_SEC";
const KILL_GRACE_ENV: &str = "AUGGIE_MCP_KILL_GRACE_MS";
const PREFLIGHT_TIMEOUT_ENV: &str = "AUGGIE_MCP_PREFLIGHT_TIMEOUT_SEC";

/// Everything the bridge reads from the process: program, environment snapshot, working
/// directory and timing knobs.
///
/// The environment is captured once and handed verbatim to every child, so the bridge never
/// reads (or writes) the live process environment after construction.
#[derive(Debug, Clone)]
pub struct BridgeConfig {
    pub program: OsString,
    pub env: Vec<(OsString, OsString)>,
    pub working_dir: PathBuf,
    pub default_timeout_secs: u64,
    pub kill_grace: Duration,
    pub preflight_timeout: Duration,
}

impl BridgeConfig {
    /// Snapshot the current process environment and working directory.
    pub fn from_env() -> std::io::Result<Self> {
        let working_dir = std::env::current_dir()?;
        Ok(Self::from_parts(std::env::vars_os().collect(), working_dir))
    }

    /// Build a config from an explicit environment, applying `AUGGIE_MCP_*` overrides found in it.
    pub fn from_parts(env: Vec<(OsString, OsString)>, working_dir: PathBuf) -> Self {
        let mut config = Self {
            program: OsString::from(DEFAULT_PROGRAM),
            env,
            working_dir,
            default_timeout_secs: DEFAULT_QUERY_TIMEOUT_SECS,
            kill_grace: DEFAULT_KILL_GRACE,
            preflight_timeout: DEFAULT_PREFLIGHT_TIMEOUT,
        };

        if let Some(program) = config.env_str(PROGRAM_ENV) {
            config.program = OsString::from(program);
        }
        if let Some(secs) = config.env_u64(DEFAULT_TIMEOUT_ENV) {
            config.default_timeout_secs = secs;
        }
        if let Some(ms) = config.env_u64(KILL_GRACE_ENV) {
            config.kill_grace = Duration::from_millis(ms);
        }
        if let Some(secs) = config.env_u64(PREFLIGHT_TIMEOUT_ENV) {
            config.preflight_timeout = Duration::from_secs(secs);
        }
        config
    }

    pub fn with_program(mut self, program: impl Into<OsString>) -> Self {
        self.program = program.into();
        self
    }

    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = dir.into();
        self
    }

    pub fn with_default_timeout_secs(mut self, secs: u64) -> Self {
        self.default_timeout_secs = secs;
        self
    }

    pub fn with_kill_grace(mut self, grace: Duration) -> Self {
        self.kill_grace = grace;
        self
    }

    pub fn with_preflight_timeout(mut self, timeout: Duration) -> Self {
        self.preflight_timeout = timeout;
        self
    }

    /// Set (or replace) one variable in the child environment.
    pub fn with_env_var(mut self, key: impl Into<OsString>, value: impl Into<OsString>) -> Self {
        let key = key.into();
        self.env.retain(|(k, _)| *k != key);
        self.env.push((key, value.into()));
        self
    }

    pub fn without_env_var(mut self, key: impl AsRef<OsStr>) -> Self {
        let key = key.as_ref();
        self.env.retain(|(k, _)| k != key);
        self
    }

    pub fn env_var(&self, key: &str) -> Option<&OsStr> {
        self.env
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_os_str())
    }

    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    pub fn program_display(&self) -> String {
        self.program.to_string_lossy().into_owned()
    }

    fn env_str(&self, key: &str) -> Option<String> {
        self.env_var(key)
            .map(|v| v.to_string_lossy().trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn env_u64(&self, key: &str) -> Option<u64> {
        let raw = self.env_str(key)?;
        match raw.parse::<u64>() {
            Ok(value) if value > 0 => Some(value),
            _ => {
                log::warn!("Ignoring invalid {key}='{raw}'; using the default");
                None
            }
        }
    }
}
