use super::router;
use super::AuggieService;
use crate::tools::catalog::{self, SERVER_NAME};
use auggie_bridge::Bridge;
use rmcp::model::{Implementation, ServerCapabilities, ServerInfo};
use rmcp::{tool_handler, ServerHandler};

impl AuggieService {
    pub fn new(bridge: Bridge) -> Self {
        Self {
            bridge,
            tool_router: router::build_tool_router_with_param_hints(),
        }
    }

    pub fn bridge(&self) -> &Bridge {
        &self.bridge
    }
}

#[tool_handler]
impl ServerHandler for AuggieService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(catalog::tool_instructions()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: SERVER_NAME.to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Implementation::from_build_env()
            },
            ..Default::default()
        }
    }
}
