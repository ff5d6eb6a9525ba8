#![no_main]

use libfuzzer_sys::fuzz_target;
use paper_mentions::pipeline::normalize;

fuzz_target!(|data: &str| {
    // The normalizer must never panic on arbitrary text
    let tokens = normalize(data);
    for token in tokens {
        assert!(!token.starts_with('@'));
        assert!(!token.starts_with('#'));
    }
});
