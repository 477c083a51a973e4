#![no_main]

use fixassert::string_at;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }

    // Use the first byte to determine the split point between selector and body.
    let split = data[0] as usize % data.len().max(1);
    let (selector_bytes, body_bytes) = data.split_at(split.min(data.len()));

    let selector = String::from_utf8_lossy(selector_bytes);

    if let Ok(body) = serde_json::from_slice::<serde_json::Value>(body_bytes) {
        let _ = string_at(&body, &selector);
    }
});
