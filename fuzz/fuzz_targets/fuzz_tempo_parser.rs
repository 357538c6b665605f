#![no_main]

use libfuzzer_sys::fuzz_target;
use tempocue::tempo::{TempoEngine, TempoSpec};

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(spec) = TempoSpec::parse(input) else {
        return;
    };

    // Canonical form must parse back to the same spec
    assert_eq!(TempoSpec::parse(&spec.to_string()).ok(), Some(spec));

    let mut engine = TempoEngine::new(spec);
    engine.start();
    for _ in 0..64 {
        engine.tick();
    }
    engine.reset();
});
