//! Fuzz the sector document section extractor.
//!
//! Run with: cargo +nightly fuzz run section_fuzz -- -max_total_time=60

#![no_main]

use libfuzzer_sys::fuzz_target;
use surco_context::{
    cycles_excerpt, month_excerpt, stats_excerpt, CYCLES_MAX_LINES, GENERIC_SECTOR_PLACEHOLDER,
    STATS_MAX_LINES,
};

fuzz_target!(|data: &[u8]| {
    let Some((&month, rest)) = data.split_first() else {
        return;
    };
    let Ok(document) = std::str::from_utf8(rest) else {
        return;
    };
    let month = u32::from(month % 14);

    let excerpt = month_excerpt(document, month);
    if !(1..=12).contains(&month) {
        assert!(excerpt.is_empty(), "invalid month must yield nothing");
    } else if excerpt != GENERIC_SECTOR_PLACEHOLDER {
        for line in excerpt.lines() {
            assert!(document.contains(line), "excerpt line not in document");
        }
    }

    assert!(stats_excerpt(document).lines().count() <= STATS_MAX_LINES);
    assert!(cycles_excerpt(document).lines().count() <= CYCLES_MAX_LINES);
});
