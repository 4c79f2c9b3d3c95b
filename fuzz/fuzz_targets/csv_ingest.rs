#![no_main]

use adsight::loader::DataLoader;
use adsight::schema::DriftMode;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Any byte string either loads or fails with an IngestError, never panics
    for mode in [DriftMode::Fail, DriftMode::Warn] {
        if let Ok(loaded) = DataLoader::new(mode).load_bytes("fuzz.csv", data) {
            let _ = adsight::summary::summarize(&loaded.dataset);
            let _ = adsight::insight::generate_candidates(&loaded.dataset);
        }
    }
});
