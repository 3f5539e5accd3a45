use hyperminhash::HyperMinHash;
use rand::Rng;

/// Prints a markdown table comparing exact set sizes with sketch estimates
/// for random pairs of overlapping integer ranges.
fn main() {
    let max_cardinality: u64 = std::env::args()
        .nth(1)
        .and_then(|v| v.parse().ok())
        .unwrap_or(10_000_000);
    let iterations = 20;
    let mut rng = rand::thread_rng();

    println!("| Set1 | HLL1 | Set2 | HLL2 | S1 ∪ S2 | HLL1 ∪ HLL2 | S1 ∩ S2 | HLL1 ∩ HLL2 |");
    println!("|---|---|---|---|---|---|---|---|");

    for _ in 0..iterations {
        let size1 = rng.gen_range(1..max_cardinality);
        let size2 = rng.gen_range(1..max_cardinality);
        let overlap = rng.gen_range(0..size1.min(size2));

        let mut sketch1: HyperMinHash = HyperMinHash::new();
        for i in 0..size1 {
            sketch1.insert(i.to_string().as_bytes());
        }

        let mut sketch2: HyperMinHash = HyperMinHash::new();
        for i in size1 - overlap..size1 - overlap + size2 {
            sketch2.insert(i.to_string().as_bytes());
        }

        let union = size1 + size2 - overlap;
        let intersection = sketch1.intersection(&sketch2);
        let (estimate1, estimate2) = (sketch1.estimate(), sketch2.estimate());
        sketch1.merge(&sketch2);
        let union_estimate = sketch1.estimate();

        println!(
            "| {} | {} | {} | {} | {} | {} | **{}** ({:.2}%) | **{}** ({:.2}%) |",
            size1,
            estimate1,
            size2,
            estimate2,
            union,
            union_estimate,
            overlap,
            100.0 * overlap as f64 / union as f64,
            intersection,
            100.0 * intersection as f64 / union_estimate as f64,
        );
    }
}
