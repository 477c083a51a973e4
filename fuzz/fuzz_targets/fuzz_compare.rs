#![no_main]

use fixassert::compare_values;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }

    // Use the first byte to determine the split point between the two trees.
    let split = data[0] as usize % data.len().max(1);
    let (expected_bytes, actual_bytes) = data.split_at(split.min(data.len()));

    let expected = match serde_json::from_slice::<serde_json::Value>(expected_bytes) {
        Ok(v) => v,
        Err(_) => return,
    };

    // Any tree compares clean against itself, sentinel leaves included.
    let diffs = compare_values(&expected, &expected);
    if !diffs.is_empty() {
        panic!(
            "Self-comparison produced differences.\nValue: {:?}\nDifferences: {:?}",
            expected, diffs
        );
    }

    if let Ok(actual) = serde_json::from_slice::<serde_json::Value>(actual_bytes) {
        let _ = compare_values(&expected, &actual);
        let _ = compare_values(&actual, &expected);
    }
});
