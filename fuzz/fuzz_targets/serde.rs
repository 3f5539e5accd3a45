#![no_main]

use hyperminhash::HyperMinHash;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(mut sketch) = serde_json::from_slice::<HyperMinHash>(data) {
        sketch.insert(&1);
        assert!(sketch.estimate() > 0);
    }
});
