use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    auggie_mcp::main_entry().await
}
