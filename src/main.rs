//! txdesk main entry point

use anyhow::Context;
use clap::Parser;
use log::{info, warn};
use std::path::PathBuf;
use std::sync::Arc;
use txdesk_api::start_server;
use txdesk_config::{Config, ConfigError};
use txdesk_core::Desk;
use txdesk_graphql::{ApiRef, HttpGraphqlClient, InMemoryApi, RetryPolicy};

#[derive(Parser, Debug)]
#[command(name = "txdesk")]
#[command(author = "txdesk Contributors")]
#[command(version = "0.1.0")]
#[command(about = "Admin web interface for transactions served from a GraphQL API", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,

    /// Print the default configuration and exit
    #[arg(long)]
    print_default_config: bool,

    /// Serve built-in sample data instead of calling the GraphQL API
    #[arg(long)]
    demo: bool,
}

fn load_config(args: &Args) -> anyhow::Result<Config> {
    match Config::load(&args.config) {
        Ok(config) => Ok(config),
        Err(ConfigError::FileNotFound { path }) => {
            eprintln!("[WARN] Config file {} not found, using defaults", path);
            Ok(Config::default())
        }
        Err(e) => {
            eprintln!("{}", e.to_details());
            Err(e).with_context(|| format!("failed to load {}", args.config.display()))
        }
    }
}

fn build_api(config: &Config, demo: bool) -> anyhow::Result<ApiRef> {
    if demo {
        warn!("Demo mode: serving in-memory sample data");
        return Ok(Arc::new(InMemoryApi::with_demo_data()));
    }

    let retry = RetryPolicy {
        max_attempts: config.retry.max_attempts,
        base_delay: std::time::Duration::from_millis(config.retry.base_delay_ms),
    };
    let client = HttpGraphqlClient::new(config.api.endpoint.trim(), config.api.timeout(), retry)
        .context("failed to build the GraphQL client")?;
    info!("Using GraphQL endpoint {}", client.endpoint());
    Ok(Arc::new(client))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.print_default_config {
        print!("{}", Config::generate_default());
        return Ok(());
    }

    let config = load_config(&args)?;

    // RUST_LOG wins over the configured level
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(config.logging.level.as_str())).init();

    let api = build_api(&config, args.demo)?;
    let desk = Arc::new(Desk::new(api, config.display.numeral_mode));

    start_server(config, desk).await
}
