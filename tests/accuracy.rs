use std::collections::HashSet;

use hyperminhash::HyperMinHash;
use rand::distributions::Alphanumeric;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn relative_error(actual: u64, expected: u64) -> f64 {
    (actual as f64 - expected as f64).abs() / expected as f64
}

fn random_string(rng: &mut StdRng) -> String {
    let len = rng.gen_range(4..32);
    (0..len)
        .map(|_| char::from(rng.sample(Alphanumeric)))
        .collect()
}

#[test]
fn test_cardinality_random_strings() {
    let mut rng = StdRng::seed_from_u64(12345);
    let mut sketch: HyperMinHash = HyperMinHash::new();
    let mut unique = HashSet::new();

    let mut checkpoint = 10_000;
    while unique.len() < 1_000_000 {
        let item = random_string(&mut rng);
        sketch.insert(item.as_bytes());
        unique.insert(item);

        if unique.len() == checkpoint {
            let estimate = sketch.estimate();
            let err = relative_error(estimate, checkpoint as u64);
            assert!(
                err < 0.02,
                "exact {}, got {} which is {:.2}% error",
                checkpoint,
                estimate,
                100.0 * err
            );
            checkpoint *= 10;
        }
    }

    let estimate = sketch.estimate();
    let err = relative_error(estimate, 1_000_000);
    assert!(err < 0.02, "got {} which is {:.2}% error", estimate, 100.0 * err);
}

#[test]
fn test_union_random_strings() {
    let mut rng = StdRng::seed_from_u64(67890);
    let mut lhs: HyperMinHash = HyperMinHash::new();
    let mut rhs: HyperMinHash = HyperMinHash::new();
    let mut unique = HashSet::new();

    while unique.len() < 3_500_000 {
        let item = random_string(&mut rng);
        // a third of the items land in both sketches
        match unique.len() % 3 {
            0 => lhs.insert(item.as_bytes()),
            1 => rhs.insert(item.as_bytes()),
            _ => {
                lhs.insert(item.as_bytes());
                rhs.insert(item.as_bytes());
            }
        }
        unique.insert(item);
    }

    let mut union = lhs.clone();
    union.merge(&rhs);
    let exact = unique.len() as u64;
    let estimate = union.estimate();
    let err = relative_error(estimate, exact);
    assert!(
        err < 0.02,
        "exact {}, got {} which is {:.2}% error",
        exact,
        estimate,
        100.0 * err
    );

    // merging again changes nothing
    let before = union.clone();
    union.merge(&rhs);
    assert_eq!(union, before);
    assert_eq!(union.estimate(), estimate);
}

#[test]
fn test_disjoint_sets() {
    let lhs: HyperMinHash = (0..1_000_000u64).collect();
    let rhs: HyperMinHash = (1_000_000..2_000_000u64).collect();

    let similarity = lhs.similarity(&rhs);
    let intersection = lhs.intersection(&rhs);
    // only chance register collisions remain, and the collision correction cancels them
    assert!(similarity.abs() < 0.001, "similarity = {}", similarity);
    assert_eq!(intersection, 0);
}

#[test]
fn test_overlap_sweep() {
    const N: u64 = 1_000_000;
    const STEPS: u64 = 20;

    let lhs: HyperMinHash = (0..N).collect();

    // rhs for step j covers [k, 2N): build it as the union of the tail [N, 2N)
    // and every chunk [N * i / 20, N * (i + 1) / 20) with i >= j
    let bound = |j: u64| (N * j + STEPS / 2) / STEPS;
    let mut rhs: HyperMinHash = (N..2 * N).collect();

    for j in (1..=STEPS).rev() {
        let k = bound(j);
        if j < STEPS {
            rhs.merge(&(k..bound(j + 1)).collect::<HyperMinHash>());
        }

        let expected = N - k;
        let actual = lhs.intersection(&rhs);
        if expected == 0 {
            assert_eq!(actual, 0, "j = {}", j);
            continue;
        }

        let err = relative_error(actual, expected);
        assert!(
            err < 0.1,
            "j = {}, expected {}, got {} which is {:.2}% error",
            j,
            expected,
            actual,
            100.0 * err
        );
    }
}

#[test]
fn test_shard_then_merge() {
    // shards written independently combine into exactly the single-writer sketch
    let items: Vec<u64> = (0..200_000).collect();
    let merged = std::thread::scope(|s| {
        let handles: Vec<_> = items
            .chunks(50_000)
            .map(|chunk| s.spawn(move || chunk.iter().collect::<HyperMinHash>()))
            .collect();
        handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .fold(HyperMinHash::<wyhash::WyHash>::new(), |mut acc, shard| {
                acc.merge(&shard);
                acc
            })
    });

    let direct: HyperMinHash = items.iter().collect();
    assert_eq!(merged, direct);
}
