//! Command-line configuration for the commit log server.

use clap::Parser;

use crate::config::Config;

/// CLI arguments for the server.
#[derive(Parser, Debug, Clone)]
#[command(name = "commitlog")]
#[command(about = "In-memory append-only commit log served over HTTP")]
pub struct CliArgs {
    /// Port to listen on.
    #[arg(short, long, default_value = "8080", env = "COMMITLOG_PORT")]
    pub port: u16,

    /// Maximum number of records to hold. Unbounded when not set.
    #[arg(long, env = "COMMITLOG_CAPACITY")]
    pub capacity: Option<usize>,
}

impl CliArgs {
    /// Build the log configuration from the CLI arguments.
    pub fn to_log_config(&self) -> Config {
        Config {
            capacity: self.capacity,
        }
    }
}

/// Configuration for the HTTP server.
#[derive(Debug, Clone)]
pub struct LogServerConfig {
    /// Port to listen on.
    pub port: u16,
}

impl Default for LogServerConfig {
    fn default() -> Self {
        Self { port: 8080 }
    }
}

impl From<&CliArgs> for LogServerConfig {
    fn from(args: &CliArgs) -> Self {
        Self { port: args.port }
    }
}
