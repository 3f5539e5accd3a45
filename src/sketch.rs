//! HyperMinHash sketch allows to estimate number of distinct elements in the stream or dataset,
//! as well as Jaccard similarity and intersection size of two streams, without storing elements.
//!
//! # Data-structure design rationale
//!
//! ## Fixed memory footprint
//! A sketch is always `M` = 2^14 registers of 16 bits, i.e. 32 KiB allocated once in `new`,
//! regardless of how many elements are inserted.
//!
//! ## Register update
//! Every item is hashed into two independent 64-bit values `(x, y)`:
//! - top `P` bits of `x` select the register,
//! - number of leading zeros of the remaining `64 - P` bits of `x`, plus one, is the LogLog rank `lz`,
//! - lowest `R` bits of `y` are the MinHash signature `sig`.
//!
//! The register keeps the highest rank seen, and on equal rank the smallest signature.
//! The same rule is used for merges, so merging is commutative, associative and idempotent.
//!
//! ## Estimates
//! - Cardinality uses the harmonic mean of register ranks with LogLog-Beta bias correction.
//! - Similarity counts registers holding identical non-empty values in both sketches,
//!   subtracts the number of matches expected between independent sketches of the same sizes,
//!   and divides by the number of registers non-empty in either sketch.
//! - Intersection is similarity multiplied by the cardinality of the union.
//!
//! All estimates scan the registers on every call, nothing is cached.

use std::fmt::{Debug, Display, Formatter};
use std::hash::{BuildHasher, BuildHasherDefault, Hash, Hasher};
use std::mem::{size_of, size_of_val};

use wyhash::WyHash;

use crate::beta::beta_horner;
use crate::collision::approx_expected_collisions;
use crate::register::Register;
use crate::{M, P, R};

/// Fills the low `P` bits vacated by shifting out the register index,
/// which caps the rank at `64 - P + 1`.
const SENTINEL: u64 = (1 << P) - 1;
/// Mask used for retrieving signature from the second hash.
const SIG_MASK: u64 = (1 << R) - 1;
/// Salt written ahead of the item to derive the second, independent hash.
const SIG_SALT: u64 = 0x9e37_79b9_7f4a_7c15;

/// HyperMinHash sketch with `M` registers.
///
/// `H` is the hasher used by `insert`, both hashes of an item are derived from it.
pub struct HyperMinHash<H: Hasher + Default = WyHash> {
    /// Register array, always `M` long
    registers: Box<[Register]>,
    /// Zero-sized build hasher
    build_hasher: BuildHasherDefault<H>,
}

/// Error returned when rebuilding a sketch from raw registers
#[derive(Debug, PartialEq, Eq)]
pub enum SketchError {
    /// Number of registers differs from `M`
    InvalidLength { expected: usize, actual: usize },
    /// Register value which can not be produced by inserts or merges
    InvalidRegister { index: usize, value: u16 },
}

impl Display for SketchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SketchError::InvalidLength { expected, actual } => {
                write!(f, "expected {} registers, got {}", expected, actual)
            }
            SketchError::InvalidRegister { index, value } => {
                write!(f, "invalid register {:#06x} at index {}", value, index)
            }
        }
    }
}

impl std::error::Error for SketchError {}

impl<H: Hasher + Default> HyperMinHash<H> {
    /// Creates new empty `HyperMinHash`
    #[inline]
    pub fn new() -> Self {
        Self {
            registers: vec![Register::EMPTY; M].into_boxed_slice(),
            build_hasher: BuildHasherDefault::default(),
        }
    }

    /// Insert a hashable item into `HyperMinHash`
    #[inline]
    pub fn insert<T: Hash + ?Sized>(&mut self, item: &T) {
        let (x, y) = self.hash_pair(item);
        self.insert_hash(x, y);
    }

    /// Insert pair of independent 64-bit hashes into `HyperMinHash`.
    /// Returns whether any register changed.
    #[inline]
    pub fn insert_hash(&mut self, x: u64, y: u64) -> bool {
        let (idx, reg) = Self::encode_hash(x, y);
        // SAFETY: `idx` is the top `P` bits of `x`, so it is always below `M`.
        let slot = unsafe { self.registers.get_unchecked_mut(idx) };
        if reg.outranks(*slot) {
            *slot = reg;
            return true;
        }
        false
    }

    /// Return register index and register value for the given hashes
    #[inline]
    fn encode_hash(x: u64, y: u64) -> (usize, Register) {
        let idx = (x >> (64 - P)) as usize;
        let lz = ((x << P) ^ SENTINEL).leading_zeros() + 1;
        let sig = y & SIG_MASK;
        (idx, Register::new(lz as u8, sig as u16))
    }

    /// Hash item twice: once plain, once behind a fixed salt
    #[inline]
    fn hash_pair<T: Hash + ?Sized>(&self, item: &T) -> (u64, u64) {
        let mut hasher = self.build_hasher.build_hasher();
        item.hash(&mut hasher);
        let x = hasher.finish();

        let mut hasher = self.build_hasher.build_hasher();
        hasher.write_u64(SIG_SALT);
        item.hash(&mut hasher);
        (x, hasher.finish())
    }

    /// Return cardinality estimate
    #[inline]
    pub fn estimate(&self) -> u64 {
        Self::estimate_registers(self.registers.iter().copied())
    }

    /// Return LogLog-Beta cardinality estimate of the given registers
    fn estimate_registers(registers: impl Iterator<Item = Register>) -> u64 {
        let mut zeros = 0u32;
        let mut sum = 0.0;
        for reg in registers {
            let lz = reg.lz();
            zeros += u32::from(lz == 0);
            sum += 2f64.powi(-i32::from(lz));
        }

        let m = M as f64;
        let zeros = f64::from(zeros);
        let estimate = alpha(M) * m * (m - zeros) / (sum + beta_horner(zeros));
        // negative or NaN estimates saturate to zero
        (estimate + 0.5) as u64
    }

    /// Merge `rhs` into `self`, turning `self` into the union sketch
    #[inline]
    pub fn merge(&mut self, rhs: &Self) {
        for (reg, &other) in self.registers.iter_mut().zip(rhs.registers.iter()) {
            if other.outranks(*reg) {
                *reg = other;
            }
        }
    }

    /// Return Jaccard similarity estimate of `self` and `rhs`.
    ///
    /// The result is not clamped: sets with little or no overlap may yield slightly negative values.
    pub fn similarity(&self, rhs: &Self) -> f64 {
        let mut matches = 0u32;
        let mut non_empty = 0u32;
        for (&reg, &other) in self.registers.iter().zip(rhs.registers.iter()) {
            matches += u32::from(!reg.is_empty() && reg == other);
            non_empty += u32::from(!reg.is_empty() || !other.is_empty());
        }

        if matches == 0 {
            return 0.0;
        }

        let ec = approx_expected_collisions(self.estimate() as f64, rhs.estimate() as f64);
        (f64::from(matches) - ec) / f64::from(non_empty)
    }

    /// Return estimated number of elements present in both `self` and `rhs`
    pub fn intersection(&self, rhs: &Self) -> u64 {
        let similarity = self.similarity(rhs);
        let union = Self::estimate_registers(
            self.registers
                .iter()
                .zip(rhs.registers.iter())
                .map(|(&reg, &other)| if other.outranks(reg) { other } else { reg }),
        );
        (similarity * union as f64).round().max(0.0) as u64
    }

    /// Return registers of `HyperMinHash`
    #[inline]
    pub fn registers(&self) -> &[Register] {
        &self.registers
    }

    /// Return memory size of `HyperMinHash`
    pub fn size_of(&self) -> usize {
        size_of::<Self>() + size_of_val(&*self.registers)
    }
}

/// Parameter for bias correction
#[inline]
fn alpha(m: usize) -> f64 {
    0.7213 / (1.0 + 1.079 / (m as f64))
}

impl<H: Hasher + Default> Default for HyperMinHash<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: Hasher + Default> Clone for HyperMinHash<H> {
    fn clone(&self) -> Self {
        Self {
            registers: self.registers.clone(),
            build_hasher: BuildHasherDefault::default(),
        }
    }
}

impl<H: Hasher + Default> PartialEq for HyperMinHash<H> {
    /// Compare registers of sketches
    fn eq(&self, rhs: &Self) -> bool {
        self.registers == rhs.registers
    }
}

impl<H: Hasher + Default> Eq for HyperMinHash<H> {}

impl<H: Hasher + Default> Debug for HyperMinHash<H> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{{ estimate: {}, size: {} }}",
            self.estimate(),
            self.size_of()
        )
    }
}

impl<H: Hasher + Default, T: Hash> FromIterator<T> for HyperMinHash<H> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut sketch = Self::new();
        for item in iter {
            sketch.insert(&item);
        }
        sketch
    }
}

impl<H: Hasher + Default> TryFrom<Vec<u16>> for HyperMinHash<H> {
    type Error = SketchError;

    /// Rebuild sketch from raw register values
    fn try_from(values: Vec<u16>) -> Result<Self, Self::Error> {
        if values.len() != M {
            return Err(SketchError::InvalidLength {
                expected: M,
                actual: values.len(),
            });
        }

        let registers = values
            .into_iter()
            .enumerate()
            .map(|(index, value)| {
                let reg = Register::from_bits(value);
                if reg.is_valid() {
                    Ok(reg)
                } else {
                    Err(SketchError::InvalidRegister { index, value })
                }
            })
            .collect::<Result<Box<[Register]>, _>>()?;

        Ok(Self {
            registers,
            build_hasher: BuildHasherDefault::default(),
        })
    }
}
