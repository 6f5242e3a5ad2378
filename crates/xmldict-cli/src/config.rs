//! Command line configuration for the `xmldict` converter.
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `XMLDICT_LOG_LEVEL` | warn | Log level |
//! | `XMLDICT_MAX_DEPTH` | 256 | Maximum nesting depth |
//! | `XMLDICT_CLASSIFICATOR` | - | Classificator book (JSON) used by `encode` |
//! | `XMLDICT_INDENT` | 2 | Spaces per level in XML output |
//!
//! `RUST_LOG` takes precedence over `XMLDICT_LOG_LEVEL` when set.

use clap::{Args, Parser, Subcommand};
use helios_xmldict::DEFAULT_MAX_DEPTH;
use std::path::PathBuf;

const LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

/// Largest accepted `--indent`.
const MAX_INDENT: usize = 16;

/// Converter configuration.
#[derive(Debug, Clone, Parser)]
#[command(name = "xmldict")]
#[command(about = "Convert JSON object trees to type-annotated XML and back")]
pub struct CliConfig {
    #[command(subcommand)]
    pub command: Command,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, global = true, env = "XMLDICT_LOG_LEVEL", default_value = "warn")]
    pub log_level: String,

    /// Maximum mapping/list nesting depth.
    #[arg(long, global = true, env = "XMLDICT_MAX_DEPTH", default_value_t = DEFAULT_MAX_DEPTH)]
    pub max_depth: usize,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Encode a JSON object with exactly one top-level key as annotated XML.
    Encode(EncodeArgs),
    /// Decode an annotated XML document to JSON.
    Decode(DecodeArgs),
}

#[derive(Debug, Clone, Args)]
pub struct EncodeArgs {
    /// Input JSON file (stdin when omitted).
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Output XML file (stdout when omitted).
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// JSON object mapping element names to classificator labels.
    #[arg(long, env = "XMLDICT_CLASSIFICATOR")]
    pub classificator: Option<PathBuf>,

    /// Spaces per nesting level.
    #[arg(long, env = "XMLDICT_INDENT", default_value = "2")]
    pub indent: usize,

    /// Write the whole document on one line.
    #[arg(long)]
    pub compact: bool,

    /// Omit the XML declaration.
    #[arg(long)]
    pub no_declaration: bool,
}

#[derive(Debug, Clone, Args)]
pub struct DecodeArgs {
    /// Input XML file (stdin when omitted).
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Output JSON file (stdout when omitted).
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Write JSON without indentation.
    #[arg(long)]
    pub compact: bool,
}

impl CliConfig {
    /// Validates the configuration and returns errors if any.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if !LOG_LEVELS.contains(&self.log_level.to_ascii_lowercase().as_str()) {
            errors.push(format!(
                "Log level must be one of {}, got '{}'",
                LOG_LEVELS.join(", "),
                self.log_level
            ));
        }

        if self.max_depth == 0 {
            errors.push("Max depth cannot be 0".to_string());
        }

        if let Command::Encode(args) = &self.command {
            if args.indent > MAX_INDENT {
                errors.push(format!("Indent cannot exceed {}", MAX_INDENT));
            }
            if let Some(path) = &args.classificator {
                if !path.is_file() {
                    errors.push(format!("Classificator file not found: {}", path.display()));
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
