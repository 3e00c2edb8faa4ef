// SPDX-License-Identifier: MIT OR Apache-2.0
//! Node classification over [`serde_json::Value`]
//!
//! Nested structures are plain `serde_json::Value` trees: objects are maps,
//! arrays are lists, everything else is a scalar leaf.

use serde_json::{Map, Value};
use std::fmt;

/// A flat mapping from dotted path to scalar leaf value, in insertion order.
pub type FlatMap = Map<String, Value>;

/// Structural kind of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Object node
    Map,
    /// Array node
    List,
    /// Null leaf
    Null,
    /// Boolean, number, or string leaf
    Scalar,
}

impl NodeKind {
    /// Human readable name used in error messages
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Map => "map",
            Self::List => "list",
            Self::Null => "null",
            Self::Scalar => "scalar",
        }
    }

    /// Whether nodes of this kind can hold children
    #[must_use]
    pub const fn is_container(self) -> bool {
        matches!(self, Self::Map | Self::List)
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Classify a node.
#[must_use]
pub const fn kind_of(value: &Value) -> NodeKind {
    match value {
        Value::Object(_) => NodeKind::Map,
        Value::Array(_) => NodeKind::List,
        Value::Null => NodeKind::Null,
        Value::Bool(_) | Value::Number(_) | Value::String(_) => NodeKind::Scalar,
    }
}

/// Truthiness of a scalar leaf.
///
/// Falsy leaves are `null`, `false`, any numeric zero, and the empty
/// string. Everything else, containers included, is truthy.
#[must_use]
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                i != 0
            } else if let Some(u) = n.as_u64() {
                u != 0
            } else {
                n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan())
            }
        }
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
