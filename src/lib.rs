//! `hyperminhash` is a Rust crate designed to estimate the number of distinct elements in a stream,
//! as well as the Jaccard similarity and intersection size of two streams, in fixed memory.
//!
//! This library uses HyperMinHash: HyperLogLog registers extended with a short MinHash signature,
//! with LogLog-Beta bias correction for cardinality and an expected-collision correction for similarity.
mod beta;
mod collision;
pub mod register;
#[cfg(feature = "with_serde")]
mod serde;
pub mod sketch;

pub use register::Register;
pub use sketch::{HyperMinHash, SketchError};

/// Number of bits of the first hash used to select a register.
pub const P: usize = 14;
/// Number of bits used to store the LogLog rank (`lz`) of a register.
pub const Q: usize = 6;
/// Number of bits used to store the MinHash signature (`sig`) of a register.
pub const R: usize = 10;
/// Number of registers in a sketch.
pub const M: usize = 1 << P;
