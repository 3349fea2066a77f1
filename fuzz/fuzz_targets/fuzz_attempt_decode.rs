#![no_main]

use libfuzzer_sys::fuzz_target;

// Stored attempt records are decoded from disk; malformed bytes must never panic.
fuzz_target!(|data: &[u8]| {
    let _ = bincode::deserialize::<vigil_types::ScoredAttempt>(data);
    let _ = bincode::deserialize::<vigil_types::VoteAttempt>(data);
    let _ = bincode::deserialize::<vigil_types::Timestamp>(data);
});
