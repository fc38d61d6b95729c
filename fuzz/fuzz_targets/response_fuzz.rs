//! Fuzz model response decoding.
//!
//! Run with: cargo +nightly fuzz run response_fuzz -- -max_total_time=60

#![no_main]

use libfuzzer_sys::fuzz_target;
use surco_strategy::{parse_strategy, strip_code_fence};

fuzz_target!(|data: &[u8]| {
    if let Ok(raw) = std::str::from_utf8(data) {
        let stripped = strip_code_fence(raw);
        assert!(stripped.len() <= raw.len());

        // Decoding either succeeds or reports the raw text; it never panics.
        if let Err(e) = parse_strategy(raw) {
            assert!(e.to_string().contains(raw.trim()));
        }
    }
});
