#![no_main]

use std::path::Path;

use libfuzzer_sys::fuzz_target;
use tempocue::config::PlanLoader;

fuzz_target!(|data: &[u8]| {
    if let Ok(yaml) = std::str::from_utf8(data) {
        let _ = PlanLoader::default().load_from_str(yaml, Path::new("fuzz.yaml"));
    }
});
