#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Store responses must decode or fail cleanly
    let _ = serde_json::from_slice::<Vec<passdeck::credentials::Credential>>(data);
    if let Ok(body) = std::str::from_utf8(data) {
        let _ = passdeck::remote::error_message(body);
    }
});
