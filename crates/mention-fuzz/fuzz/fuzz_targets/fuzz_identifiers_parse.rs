#![no_main]

use libfuzzer_sys::fuzz_target;
use paper_mentions::models::PaperIdentifiers;

fuzz_target!(|data: &[u8]| {
    // Try to parse arbitrary bytes as paper identifiers
    let _ = serde_json::from_slice::<PaperIdentifiers>(data);
});
