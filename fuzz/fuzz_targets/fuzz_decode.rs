#![no_main]

use argon2_engine::derivation::{decode, encode};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    // Parsing must never panic, and whatever parses must re-encode to itself
    if let Ok(hash) = decode(data) {
        assert_eq!(encode(&hash), data);
    }
});
