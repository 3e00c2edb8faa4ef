// SPDX-License-Identifier: MIT OR Apache-2.0
//! dotpath CLI binary - convert between nested JSON and dotted-key maps

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use dotpath_cli::{parse_literal, read_json, render, write_output};
use dotpath_flat::{
    DEFAULT_MAX_DEPTH, DEFAULT_MAX_INDEX, FlattenOptions, WriteOptions, copy_all_if_not_null,
    flatten_with, unflatten_value, write_with,
};
use serde_json::{Map, Value};
use std::io;
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "dotpath")]
#[command(version, about, long_about = None)]
struct Args {
    /// Output file (default: stdout)
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    /// Compact output
    #[arg(short = 'c', long = "compact", global = true)]
    compact: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Subcommands for dotpath CLI
#[derive(Subcommand)]
enum Commands {
    /// Flatten nested JSON into an object of dotted keys
    Flatten {
        /// Input file (reads from stdin if not provided)
        #[arg(value_name = "FILE")]
        input: Option<PathBuf>,

        /// Maximum container nesting depth
        #[arg(long = "max-depth", default_value_t = DEFAULT_MAX_DEPTH)]
        max_depth: usize,
    },
    /// Rebuild nested JSON from an object of dotted keys
    Unflatten {
        /// Input file (reads from stdin if not provided)
        #[arg(value_name = "FILE")]
        input: Option<PathBuf>,

        /// Largest list index a key may address
        #[arg(long = "max-index", default_value_t = DEFAULT_MAX_INDEX)]
        max_index: usize,

        /// Maximum number of segments in a key
        #[arg(long = "max-depth", default_value_t = DEFAULT_MAX_DEPTH)]
        max_depth: usize,
    },
    /// Write a single value at a dotted path
    Set {
        /// Input file (reads from stdin if not provided)
        #[arg(value_name = "FILE")]
        input: Option<PathBuf>,

        /// Dotted path to write
        #[arg(short, long)]
        path: String,

        /// Value to write (JSON, or a plain string)
        #[arg(short = 'v', long)]
        value: String,

        /// Largest list index the path may address
        #[arg(long = "max-index", default_value_t = DEFAULT_MAX_INDEX)]
        max_index: usize,

        /// Maximum number of segments in the path
        #[arg(long = "max-depth", default_value_t = DEFAULT_MAX_DEPTH)]
        max_depth: usize,
    },
    /// Copy the named non-null properties of an object into a new object
    Pick {
        /// Input file (reads from stdin if not provided)
        #[arg(short, long, value_name = "FILE")]
        input: Option<PathBuf>,

        /// Property names to copy
        #[arg(required = true)]
        keys: Vec<String>,
    },
}

fn main() {
    init_tracing();

    if let Err(e) = run(&Args::parse()) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn run(args: &Args) -> anyhow::Result<()> {
    let result = match &args.command {
        Commands::Flatten { input, max_depth } => {
            let doc = read_json(input.as_deref())?;
            let options = FlattenOptions::default().with_max_depth(*max_depth);
            Value::Object(flatten_with(&doc, &options).context("failed to flatten input")?)
        }
        Commands::Unflatten {
            input,
            max_index,
            max_depth,
        } => {
            let flat = read_json(input.as_deref())?;
            let options = WriteOptions::default()
                .with_max_index(*max_index)
                .with_max_depth(*max_depth);
            unflatten_value(flat, &options).context("failed to unflatten input")?
        }
        Commands::Set {
            input,
            path,
            value,
            max_index,
            max_depth,
        } => {
            let mut doc = read_json(input.as_deref())?;
            let options = WriteOptions::default()
                .with_max_index(*max_index)
                .with_max_depth(*max_depth);
            write_with(&mut doc, path, parse_literal(value), &options)
                .with_context(|| format!("failed to write '{path}'"))?;
            doc
        }
        Commands::Pick { input, keys } => {
            let Value::Object(source) = read_json(input.as_deref())? else {
                bail!("pick expects a JSON object");
            };
            let mut target = Map::new();
            let copied = copy_all_if_not_null(&source, &mut target, keys);
            debug!(copied, requested = keys.len(), "picked properties");
            Value::Object(target)
        }
    };

    let text = render(&result, args.compact)?;
    write_output(&text, args.output.as_deref())
}
