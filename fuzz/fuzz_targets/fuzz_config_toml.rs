#![no_main]

use libfuzzer_sys::fuzz_target;
use std::path::Path;

fuzz_target!(|data: &[u8]| {
    if let Ok(content) = std::str::from_utf8(data) {
        // Config parsing with unknown-key collection must never panic
        let _ = launchd_activate::config::parse_with_warnings(content, Path::new("fuzz.toml"));
    }
});
