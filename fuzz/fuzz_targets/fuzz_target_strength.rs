#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|password: &str| {
    let s = passdeck::passwords::check_password_strength(password);
    assert!(s.score <= 6);
    assert!(!s.feedback.is_empty());
});
