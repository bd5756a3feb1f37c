//! `doctree` CLI: convert, describe, and query JSON and property-list files.
//!
//! ## Usage
//!
//! ```sh
//! # Pretty-print JSON (stdin → stdout)
//! echo '{"name":"Alice","tags":["a"]}' | doctree convert
//!
//! # Property list to compact JSON, file to file
//! doctree convert --from plist --to json --compact -i Info.plist -o info.json
//!
//! # Describe a document with long strings cut short
//! doctree describe --truncate -i data.json
//!
//! # Print the value at a dotted key path
//! doctree get albums.0.title -i library.json
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use doctree_core::{Format, KeyPath, ParsePathError, Value};
use std::io::{self, Read, Write};

#[derive(Parser)]
#[command(
    name = "doctree",
    version,
    about = "Convert, describe, and query JSON and property-list documents"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log diagnostics to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Re-serialize a document, optionally into another format
    Convert {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Input format: json or plist
        #[arg(long, default_value = "json")]
        from: Format,
        /// Output format: json or plist
        #[arg(long, default_value = "json")]
        to: Format,
        /// Write compact JSON instead of the indented layout
        #[arg(long)]
        compact: bool,
    },
    /// Print the description of a document
    Describe {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Input format: json or plist
        #[arg(long, default_value = "json")]
        from: Format,
        /// Single-line output
        #[arg(long)]
        compact: bool,
        /// Cut strings longer than 80 characters
        #[arg(long)]
        truncate: bool,
    },
    /// Print the value at a dotted key path such as `items.0.name`
    Get {
        /// Dotted key path; digit-only segments are indices, not field names
        #[arg(value_parser = parse_key_path)]
        path: KeyPath,
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Input format: json or plist
        #[arg(long, default_value = "json")]
        from: Format,
        /// Single-line output
        #[arg(long)]
        compact: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(if cli.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Warn
        })
        .init();

    match cli.command {
        Commands::Convert {
            input,
            output,
            from,
            to,
            compact,
        } => {
            let value = read_document(input.as_deref(), from)?;
            let bytes = to
                .serialize(&value, !compact)
                .with_context(|| format!("Failed to write {to} output"))?;
            write_output(output.as_deref(), &bytes)?;
        }
        Commands::Describe {
            input,
            from,
            compact,
            truncate,
        } => {
            let value = read_document(input.as_deref(), from)?;
            println!("{}", value.description(0, !compact, truncate));
        }
        Commands::Get {
            path,
            input,
            from,
            compact,
        } => {
            let value = read_document(input.as_deref(), from)?;
            let found = value.at(&path);
            if !found.has_value() {
                anyhow::bail!("No value at key path: {}", path);
            }
            println!("{}", found.description(0, !compact, false));
        }
    }

    Ok(())
}

/// `KeyPath: From<String>` would take the whole argument as one field name,
/// so parse the dotted form explicitly.
fn parse_key_path(raw: &str) -> std::result::Result<KeyPath, ParsePathError> {
    raw.parse()
}

/// Read and parse a document, failing loudly on malformed input.
fn read_document(path: Option<&str>, format: Format) -> Result<Value> {
    let bytes = read_input(path)?;
    format
        .try_parse(&bytes)
        .with_context(|| format!("Failed to parse {format} input"))
}

fn read_input(path: Option<&str>) -> Result<Vec<u8>> {
    match path {
        Some(path) => std::fs::read(path).with_context(|| format!("Failed to read file: {}", path)),
        None => {
            let mut buf = Vec::new();
            io::stdin()
                .read_to_end(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &[u8]) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            io::stdout()
                .write_all(content)
                .context("Failed to write to stdout")?;
        }
    }
    Ok(())
}
