// SPDX-License-Identifier: MIT OR Apache-2.0
//! # Flatten / unflatten for nested JSON
//!
//! Converts between nested `serde_json::Value` trees and flat maps keyed by
//! dotted paths.
//!
//! ## Flatten
//! Walk a nested value and emit one entry per truthy scalar leaf:
//!
//! ```text
//! {"items": [10, 20], "owner": {"name": "x", "note": ""}}
//!   => {"items.0": 10, "items.1": 20, "owner.name": "x"}
//! ```
//!
//! Falsy leaves (`null`, `false`, `0`, `""`) and empty containers are
//! dropped.
//!
//! ## Write / unflatten
//! Assign a value at a dotted path, creating lists for index segments and
//! maps for everything else. Writing every entry of a flattened map into an
//! empty map rebuilds the original structure, provided it had only truthy
//! leaves and no empty containers.
//!
//! ## Conditional copy
//! Copy a single property between maps unless it is null.

mod copy;
mod flatten;
mod write;

pub use copy::{copy_all_if_not_null, copy_if_not_null};
pub use dotpath_core::{DotPath, DotpathError, FlatMap, Result};
pub use flatten::{DEFAULT_MAX_DEPTH, FlattenOptions, flatten, flatten_with};
pub use write::{
    DEFAULT_MAX_INDEX, WriteOptions, unflatten, unflatten_entries, unflatten_value, unflatten_with,
    write, write_path, write_with,
};
