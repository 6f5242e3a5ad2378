//! xmldict
//!
//! Converts JSON object trees to type-annotated XML and back.

mod commands;
mod config;

use clap::Parser;
use config::CliConfig;
use tracing::debug;

/// Initializes logging on stderr so stdout stays free for converted output.
fn init_logging(level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let level = level.to_ascii_lowercase();
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("helios_xmldict={},xmldict={}", level, level)));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();
    init_logging(&config.log_level);

    if let Err(errors) = config.validate() {
        for error in &errors {
            eprintln!("Configuration error: {}", error);
        }
        std::process::exit(2);
    }

    debug!(max_depth = config.max_depth, command = ?config.command, "Starting xmldict");
    commands::run(&config)
}
