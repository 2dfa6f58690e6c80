//! Auggie MCP Server
//!
//! Exposes the Auggie CLI to AI agents as a single MCP tool over stdio.
//!
//! ## Tools
//!
//! - `query_codebase` - Ask a natural-language question about a codebase
//!
//! ## Usage
//!
//! Add to your MCP client configuration:
//! ```json
//! {
//!   "mcpServers": {
//!     "auggie": {
//!       "command": "auggie-mcp",
//!       "env": { "AUGMENT_SESSION_AUTH": "<token from `auggie token print`>" }
//!     }
//!   }
//! }
//! ```

use anyhow::{Context, Result};
use auggie_bridge::{preflight, Bridge, BridgeConfig};
use rmcp::transport::stdio;
use rmcp::ServiceExt;

mod tools;

pub use tools::{AuggieService, QueryCodebaseRequest};

/// Used when `RUST_LOG` is unset. Per-call outcomes are logged by the bridge crate.
const DEFAULT_LOG_FILTER: &str = "warn,auggie_mcp=info,auggie_bridge=info";

/// Process entry point: preflight checks, then serve MCP over stdio until the client leaves.
///
/// `--print-tools` prints the tool inventory as JSON and exits without any checks.
pub async fn main_entry() -> Result<()> {
    if std::env::args().skip(1).any(|arg| arg == "--print-tools") {
        let inventory = tools::catalog::tool_inventory_json(env!("CARGO_PKG_VERSION"));
        println!("{}", serde_json::to_string_pretty(&inventory)?);
        return Ok(());
    }

    // Configure logging to stderr only (stdout is for MCP protocol)
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(DEFAULT_LOG_FILTER),
    )
    .target(env_logger::Target::Stderr)
    .init();

    let config = BridgeConfig::from_env().context("failed to resolve the working directory")?;

    log::info!("Checking Auggie CLI availability...");
    let version = preflight::check_cli(&config).await?;
    log::info!("Found Auggie CLI {version}");

    log::info!("Checking authentication...");
    preflight::check_auth(&config)?;

    log::info!("Starting MCP server...");
    let service = AuggieService::new(Bridge::new(config));
    let server = service.serve(stdio()).await?;
    log::info!("Auggie MCP server running on stdio");

    // Wait for shutdown
    server.waiting().await?;

    log::info!("Auggie MCP server stopped");
    Ok(())
}
