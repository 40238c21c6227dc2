//! Fuzz target: sysfs millidegree parser
//!
//! Feeds arbitrary bytes (as lossy UTF-8) to `parse_millidegrees` and checks:
//! - No panics on any input
//! - Accepted input is exactly an optional `-` and ASCII digits once trimmed
//! - Accepted values are finite
//!
//! cargo fuzz run fuzz_temperature_parse

#![no_main]

use fanctl::sensors::temperature::parse_millidegrees;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let text = String::from_utf8_lossy(data);

    if let Ok(t) = parse_millidegrees(&text) {
        let trimmed = text.trim();
        let digits = trimmed.strip_prefix('-').unwrap_or(trimmed);
        assert!(!digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()));
        assert!(t.celsius().is_finite());
    }
});
