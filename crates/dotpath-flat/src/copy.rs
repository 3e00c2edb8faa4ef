// SPDX-License-Identifier: MIT OR Apache-2.0
//! Conditional property copy
//!
//! Only `null` blocks a copy. Zero, `false`, and the empty string are all
//! copied, unlike the truthiness filter applied while flattening.

use serde_json::{Map, Value};
use tracing::trace;

/// Copy `source[key]` into `target[key]` when the source value is present
/// and not null. Returns whether a copy happened.
///
/// A key missing from `source` is treated like a null value.
pub fn copy_if_not_null(
    source: &Map<String, Value>,
    target: &mut Map<String, Value>,
    key: &str,
) -> bool {
    match source.get(key) {
        Some(value) if !value.is_null() => {
            target.insert(key.to_owned(), value.clone());
            true
        }
        _ => {
            trace!(key, "skipping null or missing property");
            false
        }
    }
}

/// Apply [`copy_if_not_null`] for each key, returning the number copied.
pub fn copy_all_if_not_null<I, K>(
    source: &Map<String, Value>,
    target: &mut Map<String, Value>,
    keys: I,
) -> usize
where
    I: IntoIterator<Item = K>,
    K: AsRef<str>,
{
    keys.into_iter()
        .filter(|key| copy_if_not_null(source, target, key.as_ref()))
        .count()
}
