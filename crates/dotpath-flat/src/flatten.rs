// SPDX-License-Identifier: MIT OR Apache-2.0
//! Nested value to flat dotted-key map
//!
//! Maps and lists are walked in their natural iteration order. Each truthy
//! scalar leaf becomes one entry keyed by its dotted path; list positions are
//! rendered as decimal indices. Falsy leaves (`null`, `false`, zero, `""`)
//! are dropped, as are empty containers, so the output is a lossy
//! compression of the input.

use dotpath_core::{DotpathError, FlatMap, Result, SEPARATOR, is_truthy, kind_of};
use serde_json::Value;
use tracing::{debug, trace};

/// Default limit on container nesting during flattening
pub const DEFAULT_MAX_DEPTH: usize = 1000;

/// Options for [`flatten_with`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlattenOptions {
    /// Maximum number of nested containers entered before failing with
    /// [`DotpathError::DepthExceeded`]. The root container counts as one.
    pub max_depth: usize,
}

impl Default for FlattenOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl FlattenOptions {
    /// Options with the depth guard disabled
    #[must_use]
    pub const fn unbounded() -> Self {
        Self {
            max_depth: usize::MAX,
        }
    }

    /// Set the depth limit
    #[must_use]
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

/// Flatten `value` with default options.
///
/// # Errors
/// Returns [`DotpathError::DepthExceeded`] if nesting exceeds
/// [`DEFAULT_MAX_DEPTH`].
pub fn flatten(value: &Value) -> Result<FlatMap> {
    flatten_with(value, &FlattenOptions::default())
}

/// Flatten `value` into a new flat map.
///
/// A scalar (or null) root has no path to key it under and yields an empty
/// map.
///
/// # Errors
/// Returns [`DotpathError::DepthExceeded`] if nesting exceeds
/// `options.max_depth`.
pub fn flatten_with(value: &Value, options: &FlattenOptions) -> Result<FlatMap> {
    let mut flattener = Flattener {
        out: FlatMap::new(),
        max_depth: options.max_depth,
        prefix: String::with_capacity(64),
    };

    if kind_of(value).is_container() {
        flattener.visit(value, 0)?;
    } else {
        trace!("scalar root has no addressable leaves");
    }

    debug!(entries = flattener.out.len(), "flattened value");
    Ok(flattener.out)
}

struct Flattener {
    out: FlatMap,
    max_depth: usize,
    // Shared path buffer, truncated back after each child.
    prefix: String,
}

impl Flattener {
    fn visit(&mut self, node: &Value, depth: usize) -> Result<()> {
        match node {
            Value::Object(map) => {
                let depth = self.enter(depth)?;
                for (key, child) in map {
                    let mark = self.push_segment(key, depth);
                    self.visit(child, depth)?;
                    self.prefix.truncate(mark);
                }
            }
            Value::Array(items) => {
                let depth = self.enter(depth)?;
                let mut index = itoa::Buffer::new();
                for (i, child) in items.iter().enumerate() {
                    let mark = self.push_segment(index.format(i), depth);
                    self.visit(child, depth)?;
                    self.prefix.truncate(mark);
                }
            }
            leaf if is_truthy(leaf) => {
                self.out.insert(self.prefix.clone(), leaf.clone());
            }
            _ => trace!(path = %self.prefix, "omitting falsy leaf"),
        }
        Ok(())
    }

    const fn enter(&self, depth: usize) -> Result<usize> {
        if depth >= self.max_depth {
            return Err(DotpathError::DepthExceeded {
                max_depth: self.max_depth,
            });
        }
        Ok(depth + 1)
    }

    // `depth` is that of the container owning `segment`; only the root's
    // children start without a separator.
    fn push_segment(&mut self, segment: &str, depth: usize) -> usize {
        let mark = self.prefix.len();
        if depth > 1 {
            self.prefix.push(SEPARATOR);
        }
        self.prefix.push_str(segment);
        mark
    }
}
