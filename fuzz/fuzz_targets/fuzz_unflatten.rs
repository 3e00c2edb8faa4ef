#![no_main]
// SPDX-License-Identifier: MIT OR Apache-2.0
//! libFuzzer target for unflattening
//!
//! Tests:
//! - unflatten_value on arbitrary JSON input
//! - No panics on malformed or conflicting keys
//! - Successful results flatten without error when depth is unbounded

use dotpath_flat::{FlattenOptions, WriteOptions, flatten_with, unflatten_value};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Long dotted keys nest one level per segment; keep recursion shallow
    if data.len() > 10_000 {
        return;
    }

    let Ok(flat) = serde_json::from_slice::<serde_json::Value>(data) else {
        return;
    };

    // Keep list padding small so the target exercises structure, not allocation
    let options = WriteOptions::default().with_max_index(1024);

    // === Test: unflatten_value should not panic ===
    // Conflicting keys and bad paths must come back as errors
    if let Ok(nested) = unflatten_value(flat, &options) {
        // === Contract: the root is always a map ===
        assert!(nested.is_object(), "unflatten should produce an object root");

        // === Contract: rebuilt value flattens cleanly ===
        assert!(
            flatten_with(&nested, &FlattenOptions::unbounded()).is_ok(),
            "rebuilt value should flatten"
        );
    }
});
