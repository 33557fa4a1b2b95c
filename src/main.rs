use clap::Parser;
use colored::*;
use dev_dashboard::cli::Cli;
use dev_dashboard::error::Result;
use dev_dashboard::server::{start_server, AppState};
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,dev_dashboard=debug"))
        )
        .init();

    let cli = Cli::parse();
    let config = cli.to_config();

    println!("{}", "Developer Dashboard Server".bold().green());
    println!("{}\n", "=".repeat(50).dimmed());

    // Resolved once; handlers only ever see this value
    let credential = cli.credential_chain().resolve_blocking().await;
    if credential.is_some() {
        println!("✅ GitHub token retrieved");
    } else {
        println!("{}", "⚠️  No GitHub token found. GitHub API calls will fail.".yellow());
    }

    let state = AppState::new(&config, credential)?;
    println!("🤖 Chat model: {}", state.chat.model());

    if state.tools.is_enabled() {
        let tools = state.tools.clone();
        tokio::spawn(async move {
            if let Err(e) = tools.connect().await {
                warn!("Documentation tool chain not available: {}", e);
            }
        });
    } else {
        println!("{}", "Documentation tool chain disabled".dimmed());
    }

    println!("📡 Serving on http://{}", config.bind_address());
    println!("\nPress Ctrl+C to stop the server\n");

    start_server(state, &config).await?;

    println!("✅ Server stopped");
    Ok(())
}
