use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    doctrace_cli::main_entry().await
}
