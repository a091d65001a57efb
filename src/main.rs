use anyhow::Result;
use gemini_agent::{config, server};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Logging depends on the config, so report load failures on stderr
    let config = match config::load().await {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    let rust_log = std::env::var("RUST_LOG").ok();
    let filter = match config.server.logs.env_filter(rust_log.as_deref()) {
        Ok(filter) => filter,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    let directives = filter.to_string();
    tracing_subscriber::fmt().with_env_filter(filter).json().init();

    info!("Starting Gemini agent server with log filter: {}", directives);

    server::run(config).await?;

    Ok(())
}
