//! Commit log HTTP server binary entry point.

use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use commitlog::AppendLog;
use commitlog::server::{CliArgs, LogServer, LogServerConfig};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = CliArgs::parse();

    let log_config = args.to_log_config();
    let server_config = LogServerConfig::from(&args);

    tracing::info!("Creating log with config: {:?}", log_config);
    let log = Arc::new(AppendLog::with_config(log_config));

    let server = LogServer::new(log, server_config);
    if let Err(e) = server.run().await {
        tracing::error!("Server failed: {}", e);
        std::process::exit(1);
    }
}
