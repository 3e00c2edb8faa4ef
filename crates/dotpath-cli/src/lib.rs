// SPDX-License-Identifier: MIT OR Apache-2.0
//! # dotpath-cli
//!
//! Command-line interface for dotpath - convert between nested JSON and flat
//! maps of dotted keys.
//!
//! ## Usage
//!
//! ```bash
//! # Nested JSON to dotted keys
//! dotpath flatten data.json
//!
//! # Dotted keys back to nested JSON
//! dotpath unflatten flat.json
//!
//! # Assign a single value by path
//! dotpath set data.json --path users.0.name --value '"Alice"'
//!
//! # Keep only the named, non-null properties of an object
//! dotpath pick --input props.json id name
//! ```
//!
//! ## Subcommands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `flatten` | Nested JSON to a flat object of dotted keys |
//! | `unflatten` | Flat object of dotted keys to nested JSON |
//! | `set` | Write one value at a dotted path |
//! | `pick` | Copy named non-null properties into a new object |
//!
//! Logging goes to stderr and is controlled with `RUST_LOG`.

#![warn(missing_docs)]

use anyhow::Context;
use serde_json::Value;
use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

/// Re-export of dotpath-flat for the conversion operations.
pub use dotpath_flat as flat;

/// Re-export of dotpath-core for core types.
pub use dotpath_core as core;

/// Interpret a command-line value: valid JSON is taken as-is, anything else
/// becomes a JSON string.
#[must_use]
pub fn parse_literal(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_owned()))
}

/// Read and parse a JSON document from `path`, or from stdin when `None`.
///
/// # Errors
/// Fails if the input cannot be read or is not valid JSON.
pub fn read_json(path: Option<&Path>) -> anyhow::Result<Value> {
    let (text, source) = if let Some(p) = path {
        let text =
            fs::read_to_string(p).with_context(|| format!("failed to read {}", p.display()))?;
        (text, p.display().to_string())
    } else {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("failed to read stdin")?;
        (text, "stdin".to_string())
    };
    serde_json::from_str(&text).with_context(|| format!("invalid JSON in {source}"))
}

/// Serialize `value` as pretty or compact JSON.
///
/// # Errors
/// Fails only if serialization fails.
pub fn render(value: &Value, compact: bool) -> anyhow::Result<String> {
    let text = if compact {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    Ok(text)
}

/// Write `text` plus a trailing newline to `path`, or to stdout when `None`.
///
/// # Errors
/// Fails if the destination cannot be written.
pub fn write_output(text: &str, path: Option<&Path>) -> anyhow::Result<()> {
    if let Some(p) = path {
        fs::write(p, format!("{text}\n"))
            .with_context(|| format!("failed to write {}", p.display()))?;
    } else {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        handle.write_all(text.as_bytes())?;
        handle.write_all(b"\n")?;
    }
    Ok(())
}
