//! Subcommand implementations.

use crate::config::{CliConfig, Command, DecodeArgs, EncodeArgs};
use anyhow::Context;
use helios_xmldict::xml::WriteOptions;
use helios_xmldict::{ClassificatorBook, DecodeOptions, EncodeOptions, XmlDocument, json};
use std::io::{Read, Write};
use std::path::Path;
use tracing::info;

/// Runs the configured subcommand.
pub fn run(config: &CliConfig) -> anyhow::Result<()> {
    match &config.command {
        Command::Encode(args) => encode(args, config.max_depth),
        Command::Decode(args) => decode(args, config.max_depth),
    }
}

fn encode(args: &EncodeArgs, max_depth: usize) -> anyhow::Result<()> {
    let input = read_input(args.input.as_deref())?;

    let classificator = match &args.classificator {
        Some(path) => ClassificatorBook::from_json_file(path)
            .with_context(|| format!("Failed to load classificator {}", path.display()))?,
        None => ClassificatorBook::default(),
    };
    let options = EncodeOptions {
        classificator,
        max_depth,
    };
    let write_options = WriteOptions {
        indent: (!args.compact).then_some(args.indent),
        declaration: !args.no_declaration,
    };

    let xml = encode_document(&input, &options, &write_options)?;
    write_output(args.output.as_deref(), xml.as_bytes())?;
    info!(bytes = xml.len(), "Encoded JSON document to XML");
    Ok(())
}

fn decode(args: &DecodeArgs, max_depth: usize) -> anyhow::Result<()> {
    let input = read_input(args.input.as_deref())?;
    let json = decode_document(&input, &DecodeOptions { max_depth }, args.compact)?;
    write_output(args.output.as_deref(), json.as_bytes())?;
    info!(bytes = json.len(), "Decoded XML document to JSON");
    Ok(())
}

/// JSON text with a single top-level key → annotated XML text.
pub fn encode_document(
    input: &str,
    options: &EncodeOptions,
    write_options: &WriteOptions,
) -> anyhow::Result<String> {
    let value = json::from_json_str(input).context("Input is not valid JSON")?;
    let document =
        XmlDocument::from_value(&value, options).context("Failed to encode JSON document")?;
    let mut out = Vec::new();
    document.write_to(&mut out, write_options)?;
    Ok(String::from_utf8(out)?)
}

/// Annotated XML text → JSON text of the whole single-root mapping.
pub fn decode_document(
    input: &str,
    options: &DecodeOptions,
    compact: bool,
) -> anyhow::Result<String> {
    let document = XmlDocument::from_str(input).context("Input is not valid XML")?;
    let value = document
        .to_value_with(options)
        .context("Failed to decode XML document")?;
    let mut json = if compact {
        json::to_json_string(&value)?
    } else {
        json::to_json_string_pretty(&value)?
    };
    json.push('\n');
    Ok(json)
}

fn read_input(path: Option<&Path>) -> anyhow::Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut input = String::new();
            std::io::stdin()
                .read_to_string(&mut input)
                .context("Failed to read stdin")?;
            Ok(input)
        }
    }
}

fn write_output(path: Option<&Path>, content: &[u8]) -> anyhow::Result<()> {
    match path {
        Some(path) => std::fs::write(path, content)
            .with_context(|| format!("Failed to write {}", path.display())),
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(content)?;
            stdout.flush()?;
            Ok(())
        }
    }
}
