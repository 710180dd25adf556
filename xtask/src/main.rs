//! Fixture generation and payload conversion tasks

use std::{
    error::Error,
    fs,
    path::{Path, PathBuf},
};

use clap::{Parser, Subcommand};
use libsymdex::{Entry, load_path};
use serde_json::{Value, json};

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Development tasks for symdex")]
/// Command-line interface entry point for the `xtask` binary.
struct Cli {
    /// Subcommand dispatched by the CLI.
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
/// Supported automation commands.
enum Commands {
    /// Generate a synthetic JSON payload for benchmarking and tests
    GenFixture {
        /// Number of entries to generate
        #[arg(short, long, default_value_t = 10_000)]
        entries: usize,
        /// Write the payload to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Convert a Doxygen search/ directory into a JSON payload
    Convert {
        /// The Doxygen search/ directory
        dir: PathBuf,
        /// Write the payload to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Run the CLI and dispatch to the selected subcommand.
fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::GenFixture { entries, output } => emit(&generate_fixture(entries), output.as_deref()),
        Commands::Convert { dir, output } => emit(&convert(&dir)?, output.as_deref()),
    }
}

/// Verb halves of generated symbol names.
const VERBS: &[&str] = &[
    "get", "set", "read", "write", "open", "close", "parse", "find", "copy", "erase",
];

/// Noun halves of generated symbol names.
const NOUNS: &[&str] = &[
    "Value", "Key", "Tag", "Image", "Block", "Entry", "Byte", "Date", "Comment", "Preview",
];

/// Scopes generated occurrences are attributed to.
const SCOPES: &[&str] = &[
    "Exiv2::BasicIo",
    "Exiv2::Image",
    "Exiv2::ExifData",
    "Exiv2::IptcKey",
    "Exiv2::Internal::TiffVisitor",
];

/// Build a deterministic payload of `count` entries with one to three occurrences each.
fn generate_fixture(count: usize) -> Value {
    let entries: Vec<Value> = (0..count)
        .map(|i| {
            let verb = VERBS[i % VERBS.len()];
            let noun = NOUNS[(i / VERBS.len()) % NOUNS.len()];
            let label = format!("{verb}{noun}{}", i / (VERBS.len() * NOUNS.len()));
            let occurrences: Vec<Value> = (0..=i % 3)
                .map(|n| {
                    let scope = SCOPES[(i + n) % SCOPES.len()];
                    json!([format!("{}.html#{label}", scope.replace("::", "_1_1")), scope])
                })
                .collect();
            json!([format!("{}_{i}", label.to_lowercase()), [label, occurrences]])
        })
        .collect();
    Value::Array(entries)
}

/// Load a Doxygen search directory and re-emit it as a plain JSON payload.
///
/// Keys are written decoded, so the payload loads with plain key handling.
fn convert(dir: &Path) -> Result<Value, Box<dyn Error>> {
    let index = load_path(dir)?;
    let entries = index.entries().iter().map(entry_to_json).collect();
    Ok(Value::Array(entries))
}

/// Serialize one entry as a payload tuple.
fn entry_to_json(entry: &Entry) -> Value {
    let id = match entry.ordinal {
        Some(ordinal) => format!("{}_{ordinal}", entry.key),
        None => entry.key.clone(),
    };
    let occurrences: Vec<Value> = entry
        .occurrences
        .iter()
        .map(|occurrence| {
            json!([
                occurrence.reference,
                u8::from(occurrence.opens_in_parent),
                occurrence.scope_label
            ])
        })
        .collect();
    json!([id, [entry.label, occurrences]])
}

/// Write pretty JSON to `output`, or to stdout.
fn emit(payload: &Value, output: Option<&Path>) -> Result<(), Box<dyn Error>> {
    let rendered = serde_json::to_string_pretty(payload)?;
    match output {
        Some(path) => {
            fs::write(path, rendered + "\n")?;
            eprintln!("Wrote {}", path.display());
        }
        None => println!("{rendered}"),
    }
    Ok(())
}
