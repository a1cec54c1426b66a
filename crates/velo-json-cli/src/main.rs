//! `velo-json` CLI — check, inspect, and decode updater JSON from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Check that a document parses (comments allowed)
//! velo-json check -i manifest.json
//!
//! # Print an outline of the parsed tree
//! echo '{"a": [1, true]}' | velo-json tree
//!
//! # Decode an update manifest, as text or re-emitted JSON
//! velo-json update-info -i update.json
//! velo-json update-info -i update.json --json
//!
//! # Decode a single asset record
//! velo-json asset -i asset.json
//!
//! # Summarize newline-delimited progress events
//! updater download | velo-json progress
//!
//! # Reject trailing garbage, cap nesting
//! velo-json --strict --max-depth 16 check -i manifest.json
//! ```
//!
//! Set `RUST_LOG=velo_json=trace` to see parser tracing on stderr.

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use std::fmt::{self, Write as _};
use std::io::{self, Read};
use tracing::debug;
use tracing_subscriber::EnvFilter;
use velo_json::{
    Node, ParseOptions, ProgressEvent, UpdateInfo, VelopackAsset, DEFAULT_MAX_DEPTH,
};

#[derive(Parser)]
#[command(
    name = "velo-json",
    version,
    about = "Check and decode updater manifests and progress events"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Maximum array/object nesting depth
    #[arg(long, global = true, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Fail if anything but whitespace or comments follows the document
    #[arg(long, global = true)]
    strict: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a document and report its root kind
    Check {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
    /// Print an indented outline of the parsed tree
    Tree {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
    /// Decode an update manifest (UpdateInfo)
    UpdateInfo {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Re-emit the decoded record as pretty JSON
        #[arg(long)]
        json: bool,
    },
    /// Decode a single asset record (VelopackAsset)
    Asset {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Re-emit the decoded record as pretty JSON
        #[arg(long)]
        json: bool,
    },
    /// Summarize newline-delimited progress events
    Progress {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let options = ParseOptions::default()
        .max_depth(cli.max_depth)
        .reject_trailing(cli.strict);
    debug!(?options, "parse options");

    match cli.command {
        Commands::Check { input } => {
            let text = read_input(input.as_deref())?;
            let node = parse_document(&text, &options)?;
            println!("ok: {}", node.kind());
        }
        Commands::Tree { input } => {
            let text = read_input(input.as_deref())?;
            let node = parse_document(&text, &options)?;
            let mut out = String::new();
            write_tree(&node, 0, &mut out)?;
            print!("{}", out);
        }
        Commands::UpdateInfo { input, json } => {
            let text = read_input(input.as_deref())?;
            let node = parse_document(&text, &options)?;
            let info = UpdateInfo::from_node(&node).context("Failed to decode update manifest")?;
            if json {
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("Downgrade:  {}", info.is_downgrade);
                match &info.target_full_release {
                    Some(asset) => print!("{}", describe_asset(asset)),
                    None => println!("No target release"),
                }
            }
        }
        Commands::Asset { input, json } => {
            let text = read_input(input.as_deref())?;
            let node = parse_document(&text, &options)?;
            let asset = VelopackAsset::from_node(&node).context("Failed to decode asset")?;
            if json {
                println!("{}", serde_json::to_string_pretty(&asset)?);
            } else {
                print!("{}", describe_asset(&asset));
            }
        }
        Commands::Progress { input } => {
            let text = read_input(input.as_deref())?;
            for (idx, line) in text.lines().enumerate() {
                if line.trim().is_empty() {
                    continue;
                }
                let node = parse_document(line, &options)
                    .with_context(|| format!("Invalid progress event on line {}", idx + 1))?;
                let event = ProgressEvent::from_node(&node)
                    .with_context(|| format!("Invalid progress event on line {}", idx + 1))?;
                println!("{}", describe_progress(&event));
            }
        }
    }

    Ok(())
}

/// Log to stderr, filtered by `RUST_LOG` (default: warnings only).
fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

/// Parse `text`, reporting failures with a 1-based line and column.
fn parse_document(text: &str, options: &ParseOptions) -> Result<Node> {
    velo_json::parse_with(text, options).map_err(|err| {
        let (line, column) = err.line_col(text);
        anyhow!("line {}, column {}: {}", line, column, err)
    })
}

/// Append an outline of `node` to `out`. Object keys are sorted.
fn write_tree(node: &Node, indent: usize, out: &mut String) -> fmt::Result {
    match node {
        Node::Array(items) => {
            writeln!(out, "array ({})", items.len())?;
            for item in items {
                write!(out, "{}- ", "  ".repeat(indent + 1))?;
                write_tree(item, indent + 1, out)?;
            }
        }
        Node::Object(entries) => {
            writeln!(out, "object ({})", entries.len())?;
            let mut keys: Vec<&String> = entries.keys().collect();
            keys.sort();
            for key in keys {
                write!(out, "{}{:?}: ", "  ".repeat(indent + 1), key)?;
                write_tree(&entries[key], indent + 1, out)?;
            }
        }
        scalar => writeln!(out, "{}", describe_scalar(scalar))?,
    }
    Ok(())
}

fn describe_scalar(node: &Node) -> String {
    match node {
        Node::Null => "null".to_string(),
        Node::Bool(b) => format!("bool {}", b),
        Node::Number(n) => format!("number {}", n),
        Node::String(s) => format!("string {:?}", s),
        Node::Array(_) | Node::Object(_) => node.kind().to_string(),
    }
}

fn describe_asset(asset: &VelopackAsset) -> String {
    let mut out = format!(
        "Package:    {}\nVersion:    {}\nType:       {:?}\nFile:       {}\nSHA1:       {}\nSize:       {} bytes\n",
        asset.package_id, asset.version, asset.asset_type, asset.file_name, asset.sha1, asset.size,
    );
    if !asset.notes_markdown.is_empty() {
        out.push_str(&format!(
            "Notes:      {} chars of markdown\n",
            asset.notes_markdown.chars().count()
        ));
    }
    out
}

fn describe_progress(event: &ProgressEvent) -> String {
    let mut line = format!("{:>3}% {}", event.progress, event.file);
    if event.complete {
        line.push_str(" (complete)");
    }
    if event.is_error() {
        line.push_str(&format!(" error: {}", event.error));
    }
    line
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}
