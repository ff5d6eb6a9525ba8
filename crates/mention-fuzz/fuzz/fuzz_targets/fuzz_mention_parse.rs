#![no_main]

use libfuzzer_sys::fuzz_target;
use paper_mentions::models::RawMention;

fuzz_target!(|data: &[u8]| {
    // Try to parse arbitrary bytes as a RawMention
    let _ = serde_json::from_slice::<RawMention>(data);
});
