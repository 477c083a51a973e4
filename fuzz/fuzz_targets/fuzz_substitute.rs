#![no_main]

use fixassert::{VarMap, resolve_placeholders};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }

    // Use the first byte to determine the split point between vars and template.
    let split = data[0] as usize % data.len().max(1);
    let (vars_bytes, template_bytes) = data.split_at(split.min(data.len()));

    let template = match serde_json::from_slice::<serde_json::Value>(template_bytes) {
        Ok(v) => v,
        Err(_) => return,
    };

    // Resolution with no variables is the identity transform.
    let untouched = resolve_placeholders(&template, &VarMap::new());
    if untouched != template {
        panic!(
            "Empty-vars resolution changed the tree.\nBefore: {:?}\nAfter: {:?}",
            template, untouched
        );
    }

    if let Ok(serde_json::Value::Object(map)) =
        serde_json::from_slice::<serde_json::Value>(vars_bytes)
    {
        let vars: VarMap = map.into_iter().collect();
        let _ = resolve_placeholders(&template, &vars);
    }
});
