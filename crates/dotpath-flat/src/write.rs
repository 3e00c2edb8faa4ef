// SPDX-License-Identifier: MIT OR Apache-2.0
//! Path-based assignment into a nested value, and bulk unflattening
//!
//! Missing intermediate containers are created on the way down. The kind of
//! each new container is chosen by looking at the segment that follows it:
//! an index segment (`0`, `12`) makes a list, anything else makes a map.
//! Existing containers must already be of the kind that would have been
//! created, otherwise the write fails with [`DotpathError::TypeMismatch`]
//! and the target is left untouched.
//!
//! `null` counts as absent: a null slot along the path is replaced by a new
//! container, and writing past the end of a list pads it with nulls.

use crate::flatten::DEFAULT_MAX_DEPTH;
use dotpath_core::{DotPath, DotpathError, FlatMap, NodeKind, Result, Segment, kind_of};
use serde_json::{Map, Value};
use std::alloc::Layout;
use tracing::{debug, trace};

/// Default ceiling on list indices accepted by the writer
pub const DEFAULT_MAX_INDEX: usize = 65_535;

const ROOT: &str = "(root)";

/// Options for [`write_with`] and [`unflatten_with`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteOptions {
    /// Largest list index a path may address. Writing index `n` grows a
    /// list to `n + 1` slots, so this bounds allocation per write.
    pub max_index: usize,
    /// Largest number of segments a path may have. Each segment can add a
    /// level of nesting, so this bounds the depth a single write creates.
    pub max_depth: usize,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            max_index: DEFAULT_MAX_INDEX,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl WriteOptions {
    /// Set the list index ceiling
    #[must_use]
    pub const fn with_max_index(mut self, max_index: usize) -> Self {
        self.max_index = max_index;
        self
    }

    /// Set the path segment ceiling
    #[must_use]
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

/// Write `value` at the dotted `path` inside `root`, with default options.
///
/// ```
/// use dotpath_flat::write;
/// use serde_json::json;
///
/// let mut root = json!({});
/// write(&mut root, "a.0.b", json!(5)).unwrap();
/// assert_eq!(root, json!({"a": [{"b": 5}]}));
/// ```
///
/// # Errors
/// See [`write_path`].
pub fn write(root: &mut Value, path: &str, value: Value) -> Result<()> {
    write_with(root, path, value, &WriteOptions::default())
}

/// Write `value` at the dotted `path` inside `root`.
///
/// # Errors
/// Returns [`DotpathError::InvalidPath`] for an empty path or empty
/// segment, otherwise see [`write_path`].
pub fn write_with(
    root: &mut Value,
    path: &str,
    value: Value,
    options: &WriteOptions,
) -> Result<()> {
    let path = DotPath::parse(path)?;
    write_path(root, &path, value, options)
}

/// Write `value` at a pre-parsed `path` inside `root`.
///
/// A map root accepts any first segment as a key. A list root requires an
/// index. A null root is replaced by the container the first segment calls
/// for.
///
/// # Errors
/// - [`DotpathError::TypeMismatch`] if a scalar sits where a container is
///   needed, a list is addressed with a key, or an existing container is
///   the other kind from what the following segment requires.
/// - [`DotpathError::IndexTooLarge`] if a list index exceeds
///   `options.max_index` or the list cannot grow to reach it.
/// - [`DotpathError::DepthExceeded`] if the path has more than
///   `options.max_depth` segments.
///
/// On error `root` is not modified.
pub fn write_path(
    root: &mut Value,
    path: &DotPath<'_>,
    value: Value,
    options: &WriteOptions,
) -> Result<()> {
    if path.len() > options.max_depth {
        return Err(DotpathError::DepthExceeded {
            max_depth: options.max_depth,
        });
    }
    let list_root = root.is_array() || (root.is_null() && path.segment(0).is_index());
    check_indices(path, list_root, options)?;
    if root.is_null() {
        *root = empty_container(path.segment(0));
    }

    let last = path.len() - 1;
    let mut cursor = root;
    for i in 0..last {
        let slot = child_slot(cursor, path, i, options)?;
        let wanted = container_kind(path.segment(i + 1));
        if slot.is_null() {
            trace!(path = path.prefix(i), kind = %wanted, "creating container");
            *slot = empty_container(path.segment(i + 1));
        } else if kind_of(slot) != wanted {
            return Err(DotpathError::TypeMismatch {
                path: path.prefix(i).to_owned(),
                expected: wanted.name(),
                found: kind_of(slot).name(),
            });
        }
        cursor = slot;
    }

    *child_slot(cursor, path, last, options)? = value;
    Ok(())
}

/// Rebuild a nested value from a flat map, with default options.
///
/// Entries are written in iteration order into an initially empty map.
///
/// # Errors
/// Fails on the first entry whose key cannot be written; see [`write_path`].
pub fn unflatten(flat: &FlatMap) -> Result<Value> {
    unflatten_with(flat, &WriteOptions::default())
}

/// Rebuild a nested value from a flat map.
///
/// # Errors
/// Fails on the first entry whose key cannot be written; see [`write_path`].
pub fn unflatten_with(flat: &FlatMap, options: &WriteOptions) -> Result<Value> {
    unflatten_entries(flat.iter().map(|(k, v)| (k, v.clone())), options)
}

/// Rebuild a nested value from a JSON value that must be an object of
/// dotted keys.
///
/// # Errors
/// Returns [`DotpathError::NotAnObject`] for any non-object input,
/// otherwise see [`unflatten_with`].
pub fn unflatten_value(flat: Value, options: &WriteOptions) -> Result<Value> {
    match flat {
        Value::Object(map) => unflatten_entries(map, options),
        other => Err(DotpathError::NotAnObject {
            found: kind_of(&other).name(),
        }),
    }
}

/// Rebuild a nested value from `(path, value)` pairs.
///
/// # Errors
/// Fails on the first entry whose key cannot be written; see [`write_path`].
pub fn unflatten_entries<I, K>(entries: I, options: &WriteOptions) -> Result<Value>
where
    I: IntoIterator<Item = (K, Value)>,
    K: AsRef<str>,
{
    let mut root = Value::Object(Map::new());
    let mut written = 0usize;
    for (key, value) in entries {
        write_with(&mut root, key.as_ref(), value, options)?;
        written += 1;
    }
    debug!(entries = written, "unflattened value");
    Ok(root)
}

const fn container_kind(next: Segment<'_>) -> NodeKind {
    match next {
        Segment::Index(_) => NodeKind::List,
        Segment::Key(_) => NodeKind::Map,
    }
}

fn empty_container(next: Segment<'_>) -> Value {
    match next {
        Segment::Index(_) => Value::Array(Vec::new()),
        Segment::Key(_) => Value::Object(Map::new()),
    }
}

fn parent_path<'a>(path: &DotPath<'a>, i: usize) -> &'a str {
    if i == 0 { ROOT } else { path.prefix(i - 1) }
}

// Every index segment past the first addresses a list, because a map child
// followed by an index segment is rejected. The first segment is an index
// only when the root is a list. An index whose list could never be
// allocated is refused here so the failure happens before any mutation.
fn check_indices(path: &DotPath<'_>, list_root: bool, options: &WriteOptions) -> Result<()> {
    for (i, segment) in path.segments().enumerate() {
        if let Segment::Index(index) = segment
            && (i > 0 || list_root)
            && (index > options.max_index
                || Layout::array::<Value>(index.saturating_add(1)).is_err())
        {
            return Err(DotpathError::IndexTooLarge {
                path: path.prefix(i).to_owned(),
                index,
                max: options.max_index,
            });
        }
    }
    Ok(())
}

// Borrow the slot for segment `i` under `parent`, inserting a null
// placeholder when absent.
fn child_slot<'v>(
    parent: &'v mut Value,
    path: &DotPath<'_>,
    i: usize,
    options: &WriteOptions,
) -> Result<&'v mut Value> {
    match parent {
        Value::Object(map) => Ok(map.entry(path.raw_segment(i)).or_insert(Value::Null)),
        Value::Array(items) => match path.segment(i) {
            Segment::Index(index) => {
                if index >= items.len() {
                    let grown = index
                        .checked_add(1)
                        .filter(|len| items.try_reserve(len - items.len()).is_ok())
                        .ok_or_else(|| DotpathError::IndexTooLarge {
                            path: path.prefix(i).to_owned(),
                            index,
                            max: options.max_index,
                        })?;
                    items.resize(grown, Value::Null);
                }
                Ok(&mut items[index])
            }
            Segment::Key(_) => Err(DotpathError::TypeMismatch {
                path: parent_path(path, i).to_owned(),
                expected: NodeKind::Map.name(),
                found: NodeKind::List.name(),
            }),
        },
        other => Err(DotpathError::TypeMismatch {
            path: parent_path(path, i).to_owned(),
            expected: container_kind(path.segment(i)).name(),
            found: kind_of(other).name(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_write_creates_list_then_map() {
        let mut root = json!({});
        write(&mut root, "a.0.b", json!(5)).unwrap();
        assert_eq!(root, json!({"a": [{"b": 5}]}));
    }

    #[test]
    fn test_write_overwrites_leaf() {
        let mut root = json!({});
        write(&mut root, "x.y", json!(1)).unwrap();
        write(&mut root, "x.y", json!(2)).unwrap();
        assert_eq!(root["x"]["y"], json!(2));
    }

    #[test]
    fn test_write_single_segment() {
        let mut root = json!({"keep": true});
        write(&mut root, "name", json!("Alice")).unwrap();
        assert_eq!(root, json!({"keep": true, "name": "Alice"}));
    }

    #[test]
    fn test_write_reuses_existing_containers() {
        let mut root = json!({"a": {"b": 1}});
        write(&mut root, "a.c", json!(2)).unwrap();
        assert_eq!(root, json!({"a": {"b": 1, "c": 2}}));

        let mut root = json!({"xs": [1]});
        write(&mut root, "xs.1", json!(2)).unwrap();
        assert_eq!(root, json!({"xs": [1, 2]}));
    }

    #[test]
    fn test_write_pads_lists_with_null() {
        let mut root = json!({});
        write(&mut root, "xs.2", json!("c")).unwrap();
        assert_eq!(root, json!({"xs": [null, null, "c"]}));

        write(&mut root, "xs.0", json!("a")).unwrap();
        assert_eq!(root, json!({"xs": ["a", null, "c"]}));
    }

    #[test]
    fn test_write_fills_null_padding_with_container() {
        let mut root = json!({});
        write(&mut root, "xs.1.id", json!(2)).unwrap();
        write(&mut root, "xs.0.id", json!(1)).unwrap();
        assert_eq!(root, json!({"xs": [{"id": 1}, {"id": 2}]}));
    }

    #[test]
    fn test_write_replaces_null_intermediate() {
        let mut root = json!({"a": null});
        write(&mut root, "a.b", json!(1)).unwrap();
        assert_eq!(root, json!({"a": {"b": 1}}));
    }

    #[test]
    fn test_write_leaf_replaces_container() {
        let mut root = json!({"a": {"b": 1}});
        write(&mut root, "a", json!("flat")).unwrap();
        assert_eq!(root, json!({"a": "flat"}));
    }

    #[test]
    fn test_write_non_canonical_index_is_key() {
        let mut root = json!({});
        write(&mut root, "a.01", json!(1)).unwrap();
        write(&mut root, "b.-1", json!(2)).unwrap();
        assert_eq!(root, json!({"a": {"01": 1}, "b": {"-1": 2}}));
    }

    #[test]
    fn test_write_numeric_key_on_map_root() {
        let mut root = json!({});
        write(&mut root, "0.a", json!(1)).unwrap();
        assert_eq!(root, json!({"0": {"a": 1}}));
    }

    #[test]
    fn test_write_list_root() {
        let mut root = json!([]);
        write(&mut root, "1.name", json!("b")).unwrap();
        assert_eq!(root, json!([null, {"name": "b"}]));
    }

    #[test]
    fn test_write_null_root_becomes_container() {
        let mut root = Value::Null;
        write(&mut root, "a", json!(1)).unwrap();
        assert_eq!(root, json!({"a": 1}));

        let mut root = Value::Null;
        write(&mut root, "0", json!(1)).unwrap();
        assert_eq!(root, json!([1]));
    }

    #[test]
    fn test_write_expected_list_found_map() {
        let mut root = json!({"a": {"x": 1}});
        let err = write(&mut root, "a.0", json!(1)).unwrap_err();
        assert!(matches!(
            err,
            DotpathError::TypeMismatch {
                ref path,
                expected: "list",
                found: "map",
            } if path == "a"
        ));
        assert_eq!(root, json!({"a": {"x": 1}}));
    }

    #[test]
    fn test_write_expected_map_found_list() {
        let mut root = json!({"a": [1]});
        let err = write(&mut root, "a.b", json!(1)).unwrap_err();
        assert!(matches!(
            err,
            DotpathError::TypeMismatch {
                expected: "map",
                found: "list",
                ..
            }
        ));
    }

    #[test]
    fn test_write_through_scalar_fails() {
        let mut root = json!({"a": 1});
        let err = write(&mut root, "a.b", json!(2)).unwrap_err();
        assert!(matches!(
            err,
            DotpathError::TypeMismatch {
                ref path,
                expected: "map",
                found: "scalar",
            } if path == "a"
        ));
        assert_eq!(root, json!({"a": 1}));
    }

    #[test]
    fn test_write_into_scalar_root_fails() {
        let mut root = json!("text");
        let err = write(&mut root, "a", json!(1)).unwrap_err();
        assert!(matches!(
            err,
            DotpathError::TypeMismatch { ref path, .. } if path == ROOT
        ));
    }

    #[test]
    fn test_write_key_into_list_root_fails() {
        let mut root = json!([]);
        assert!(matches!(
            write(&mut root, "name", json!(1)),
            Err(DotpathError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_write_invalid_paths() {
        let mut root = json!({});
        for bad in ["", ".a", "a.", "a..b"] {
            assert!(
                matches!(
                    write(&mut root, bad, json!(1)),
                    Err(DotpathError::InvalidPath { .. })
                ),
                "{bad:?} should be rejected"
            );
        }
        assert_eq!(root, json!({}));
    }

    #[test]
    fn test_write_index_too_large_leaves_root_untouched() {
        let mut root = json!({});
        let opts = WriteOptions::default().with_max_index(10);
        let err = write_with(&mut root, "a.11.b", json!(1), &opts).unwrap_err();
        assert!(matches!(
            err,
            DotpathError::IndexTooLarge {
                index: 11,
                max: 10,
                ..
            }
        ));
        assert_eq!(root, json!({}));

        write_with(&mut root, "a.10", json!(1), &opts).unwrap();
        assert_eq!(root["a"].as_array().map(Vec::len), Some(11));
    }

    #[test]
    fn test_write_index_past_allocation_limit_fails_cleanly() {
        let opts = WriteOptions::default().with_max_index(usize::MAX);
        for path in ["a.99999999999999999999999", "a.9223372036854775806"] {
            let mut root = json!({});
            let err = write_with(&mut root, path, json!(1), &opts).unwrap_err();
            assert!(
                matches!(err, DotpathError::IndexTooLarge { .. }),
                "{path}: {err}"
            );
            assert_eq!(root, json!({}));
        }
    }

    #[test]
    fn test_write_depth_limit() {
        let opts = WriteOptions::default().with_max_depth(3);
        let mut root = json!({});
        write_with(&mut root, "a.b.c", json!(1), &opts).unwrap();
        assert_eq!(root, json!({"a": {"b": {"c": 1}}}));

        let err = write_with(&mut root, "a.b.c.d", json!(2), &opts).unwrap_err();
        assert!(matches!(err, DotpathError::DepthExceeded { max_depth: 3 }));
        assert_eq!(root, json!({"a": {"b": {"c": 1}}}));
    }

    #[test]
    fn test_unflatten_rejects_very_long_keys() {
        let key = vec!["a"; DEFAULT_MAX_DEPTH + 1].join(".");
        let mut flat = FlatMap::new();
        flat.insert(key, json!(1));
        assert!(matches!(
            unflatten(&flat),
            Err(DotpathError::DepthExceeded { .. })
        ));

        let key = vec!["a"; DEFAULT_MAX_DEPTH].join(".");
        let mut flat = FlatMap::new();
        flat.insert(key, json!(1));
        let rebuilt = unflatten(&flat).unwrap();
        assert_eq!(crate::flatten(&rebuilt).unwrap(), flat);
    }

    #[test]
    fn test_large_numeric_key_on_map_root_is_allowed() {
        let mut root = json!({});
        let opts = WriteOptions::default().with_max_index(10);
        write_with(&mut root, "999", json!(1), &opts).unwrap();
        assert_eq!(root, json!({"999": 1}));
    }

    #[test]
    fn test_unflatten() {
        let flat = json!({
            "users.0.name": "Alice",
            "users.0.tags.0": "admin",
            "users.1.name": "Bob",
            "meta.count": 2
        });
        let Value::Object(flat) = flat else {
            unreachable!()
        };
        assert_eq!(
            unflatten(&flat).unwrap(),
            json!({
                "users": [
                    {"name": "Alice", "tags": ["admin"]},
                    {"name": "Bob"}
                ],
                "meta": {"count": 2}
            })
        );
    }

    #[test]
    fn test_unflatten_empty() {
        assert_eq!(unflatten(&FlatMap::new()).unwrap(), json!({}));
    }

    #[test]
    fn test_unflatten_conflicting_keys_fail() {
        let Value::Object(flat) = json!({"a": 1, "a.b": 2}) else {
            unreachable!()
        };
        assert!(matches!(
            unflatten(&flat),
            Err(DotpathError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_unflatten_value_requires_object() {
        let err = unflatten_value(json!([1, 2]), &WriteOptions::default()).unwrap_err();
        assert!(matches!(err, DotpathError::NotAnObject { found: "list" }));

        assert_eq!(
            unflatten_value(json!({"a.b": 1}), &WriteOptions::default()).unwrap(),
            json!({"a": {"b": 1}})
        );
    }

    #[test]
    fn test_unflatten_entries_from_pairs() {
        let pairs = vec![("x.0", json!(1)), ("x.1", json!(2))];
        assert_eq!(
            unflatten_entries(pairs, &WriteOptions::default()).unwrap(),
            json!({"x": [1, 2]})
        );
    }
}
