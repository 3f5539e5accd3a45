#![no_main]

use hyperminhash::HyperMinHash;
use libfuzzer_sys::fuzz_target;
use wyhash::wyhash;

fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }

    let split_index = wyhash(data, 0) as usize % data.len();
    let (first_half, second_half) = data.split_at(split_index);

    let mut sketch1: HyperMinHash = HyperMinHash::new();
    for chunk in first_half.chunks(4) {
        sketch1.insert(chunk);
        assert!(sketch1.estimate() > 0);
    }

    let mut sketch2: HyperMinHash = HyperMinHash::new();
    for chunk in second_half.chunks(4) {
        sketch2.insert(chunk);
        assert!(sketch2.estimate() > 0);
    }

    let similarity = sketch1.similarity(&sketch2);
    assert!(similarity.is_finite());
    assert!(similarity <= 1.0);

    let intersection = sketch1.intersection(&sketch2);

    let mut union = sketch1.clone();
    union.merge(&sketch2);
    let mut reversed = sketch2.clone();
    reversed.merge(&sketch1);
    assert_eq!(union, reversed);
    assert!(intersection <= union.estimate());
});
