#![cfg(unix)]
#![allow(dead_code)]

use anyhow::{Context, Result};
use rmcp::service::{RunningService, ServiceExt};
use rmcp::transport::TokioChildProcess;
use rmcp::RoleClient;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::time::Duration;
use tokio::process::Command;

/// Stand-in for the Auggie CLI. Behaviour is picked by `FAKE_AUGGIE_MODE`.
const FAKE_AUGGIE: &str = r#"#!/bin/sh
if [ "$1" = "--version" ]; then
  if [ "$FAKE_AUGGIE_MODE" = "no-version" ]; then exit 0; fi
  echo "auggie 0.0.0-test"
  exit 0
fi
case "$FAKE_AUGGIE_MODE" in
  answer) printf '\n  The auth module handles...  \n' ;;
  args) for arg in "$@"; do printf '[%s]' "$arg"; done ;;
  fail) echo "workspace not indexed" >&2; exit 3 ;;
  sleep) exec sleep 5 ;;
  *) echo "unknown mode: $FAKE_AUGGIE_MODE" >&2; exit 64 ;;
esac
"#;

pub fn locate_auggie_mcp_bin() -> Result<PathBuf> {
    if let Some(path) = option_env!("CARGO_BIN_EXE_auggie-mcp") {
        return Ok(PathBuf::from(path));
    }

    // `.../target/{debug|release}/deps/<test>` → `.../target/{debug|release}/auggie-mcp`
    if let Ok(exe) = std::env::current_exe() {
        if let Some(target_profile_dir) = exe.parent().and_then(|p| p.parent()) {
            let candidate = target_profile_dir.join("auggie-mcp");
            if candidate.exists() {
                return Ok(candidate);
            }
        }
    }

    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let repo_root = manifest_dir
        .ancestors()
        .nth(2)
        .context("failed to resolve repo root from CARGO_MANIFEST_DIR")?;
    for rel in ["target/debug/auggie-mcp", "target/release/auggie-mcp"] {
        let candidate = repo_root.join(rel);
        if candidate.exists() {
            return Ok(candidate);
        }
    }

    anyhow::bail!("failed to locate auggie-mcp binary; build with: cargo build -p auggie-mcp")
}

/// Install the fake CLI once per test binary, before anything is spawned.
pub fn fake_auggie() -> &'static Path {
    static SCRIPT: OnceLock<PathBuf> = OnceLock::new();
    SCRIPT.get_or_init(|| {
        use std::os::unix::fs::PermissionsExt;

        let dir = PathBuf::from(env!("CARGO_TARGET_TMPDIR"));
        let name = format!("mcp-fake-auggie-{}.sh", std::process::id());
        let path = dir.join(&name);
        let staging = dir.join(format!("{name}.tmp"));
        std::fs::write(&staging, FAKE_AUGGIE).expect("write fake auggie");
        std::fs::set_permissions(&staging, std::fs::Permissions::from_mode(0o755))
            .expect("chmod fake auggie");
        std::fs::rename(&staging, &path).expect("install fake auggie");
        path
    })
}

/// Server command wired to the fake CLI in `mode`, with a session token set.
pub fn server_command(mode: &str) -> Result<Command> {
    let script = fake_auggie();
    let mut cmd = Command::new(locate_auggie_mcp_bin()?);
    cmd.env("AUGGIE_MCP_BIN", script);
    cmd.env("AUGMENT_SESSION_AUTH", "test-token");
    cmd.env("FAKE_AUGGIE_MODE", mode);
    cmd.env("AUGGIE_MCP_KILL_GRACE_MS", "200");
    cmd.env("RUST_LOG", "warn");
    Ok(cmd)
}

pub async fn start_server(cmd: Command) -> Result<RunningService<RoleClient, ()>> {
    let transport = TokioChildProcess::new(cmd).context("spawn mcp server")?;
    tokio::time::timeout(Duration::from_secs(10), ().serve(transport))
        .await
        .context("timeout starting MCP server")?
        .context("start MCP server")
}
