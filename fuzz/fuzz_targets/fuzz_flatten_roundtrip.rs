#![no_main]
// SPDX-License-Identifier: MIT OR Apache-2.0
//! libFuzzer target for flatten -> unflatten
//!
//! Tests:
//! - flatten on arbitrary JSON documents
//! - Every flattened key is a valid path whose leaf is truthy
//! - Re-flattening the rebuilt value is stable

use dotpath_core::is_truthy;
use dotpath_flat::{FlattenOptions, flatten, flatten_with, unflatten};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 100_000 {
        return;
    }

    let Ok(doc) = serde_json::from_slice::<serde_json::Value>(data) else {
        return;
    };

    let Ok(flat) = flatten(&doc) else {
        return;
    };

    for (key, value) in &flat {
        assert!(is_truthy(value), "falsy leaf emitted at {key:?}");
        assert!(!value.is_object() && !value.is_array(), "container emitted at {key:?}");
    }

    // Keys containing dots or empty keys are not round-trippable, and
    // numeric-looking keys may collide with list paths; both surface as errors.
    if let Ok(rebuilt) = unflatten(&flat) {
        // Dotted keys rebuild as nested containers, so the rebuilt depth
        // follows segment counts rather than the input's nesting.
        let again = flatten_with(&rebuilt, &FlattenOptions::unbounded())
            .expect("rebuilt value should flatten");
        assert!(
            again.values().all(is_truthy),
            "re-flattened leaves should stay truthy"
        );
    }
});
