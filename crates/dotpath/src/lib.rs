// SPDX-License-Identifier: MIT OR Apache-2.0
//! # dotpath
//!
//! Convert between nested JSON values and flat maps keyed by dotted paths.
//!
//! ```
//! use dotpath::{flatten, unflatten};
//! use serde_json::json;
//!
//! let doc = json!({"items": [10, 20], "owner": {"name": "x", "note": ""}});
//! let flat = flatten(&doc).unwrap();
//! assert_eq!(
//!     serde_json::Value::Object(flat.clone()),
//!     json!({"items.0": 10, "items.1": 20, "owner.name": "x"})
//! );
//!
//! // The empty note was dropped while flattening.
//! assert_eq!(
//!     unflatten(&flat).unwrap(),
//!     json!({"items": [10, 20], "owner": {"name": "x"}})
//! );
//! ```
//!
//! This umbrella crate re-exports:
//!
//! - [`core`] - errors, path parsing, node kinds
//! - [`flat`] - flatten, write, unflatten, conditional copy

#![warn(missing_docs)]

/// Re-export of dotpath-core.
pub use dotpath_core as core;

/// Re-export of dotpath-flat.
pub use dotpath_flat as flat;

pub use dotpath_core::{DotPath, DotpathError, FlatMap, NodeKind, Result, Segment, is_truthy};
pub use dotpath_flat::{
    FlattenOptions, WriteOptions, copy_all_if_not_null, copy_if_not_null, flatten, flatten_with,
    unflatten, unflatten_entries, unflatten_value, unflatten_with, write, write_path, write_with,
};
