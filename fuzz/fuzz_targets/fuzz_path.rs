#![no_main]
// SPDX-License-Identifier: MIT OR Apache-2.0
//! libFuzzer target for dotted path parsing
//!
//! Verifies DotPath agrees with a plain split on the separator and that
//! segment prefixes line up with the source string.

use dotpath_core::{DotPath, Segment, is_index};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };

    let naive: Vec<&str> = input.split('.').collect();
    let valid = !input.is_empty() && naive.iter().all(|s| !s.is_empty());

    match DotPath::parse(input) {
        Ok(path) => {
            assert!(valid, "accepted invalid path {input:?}");
            assert_eq!(path.raw_segments().collect::<Vec<_>>(), naive);
            assert_eq!(path.prefix(path.len() - 1), input);

            for (i, raw) in naive.iter().enumerate() {
                match path.segment(i) {
                    Segment::Index(n) => {
                        assert!(is_index(raw));
                        if raw.len() < 19 {
                            assert_eq!(raw.parse::<usize>().ok(), Some(n));
                        }
                    }
                    Segment::Key(k) => {
                        assert!(!is_index(raw));
                        assert_eq!(k, *raw);
                    }
                }
            }
        }
        Err(_) => assert!(!valid, "rejected valid path {input:?}"),
    }
});
