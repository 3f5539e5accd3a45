//! ## Register encoding
//! Each HyperMinHash register is a single `u16`:
//! - 10..15 bits   - store LogLog rank `lz` (`Q` = 6 bits, `0` means the register is empty)
//! - 0..9 bits     - store MinHash signature `sig` (`R` = 10 bits)
//!
//! Registers are ordered by the winner rule used both for inserts and merges:
//! higher `lz` wins, and on equal `lz` the smaller `sig` wins.

use std::fmt::{Debug, Formatter};

use crate::{P, Q, R};

/// Mask used for retrieving signature stored in lowest `R` bits.
const SIG_MASK: u16 = (1 << R) - 1;
/// Largest rank a register can hold: all `64 - P` remainder bits are zero.
pub(crate) const MAX_LZ: u8 = (64 - P + 1) as u8;

// rank must fit into `Q` bits
const _: () = assert!(MAX_LZ < (1 << Q));

/// Packed HyperMinHash register
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Register(u16);

impl Register {
    /// Register which was never written to
    pub const EMPTY: Register = Register(0);

    /// Pack rank and signature into a register.
    ///
    /// `lz` must be below `2^Q` and `sig` below `2^R`; extra signature bits are dropped.
    #[inline]
    pub fn new(lz: u8, sig: u16) -> Self {
        debug_assert!(usize::from(lz) < 1 << Q);
        Self((u16::from(lz) << R) | (sig & SIG_MASK))
    }

    /// Return LogLog rank
    #[inline]
    pub fn lz(self) -> u8 {
        (self.0 >> R) as u8
    }

    /// Return MinHash signature
    #[inline]
    pub fn sig(self) -> u16 {
        self.0 & SIG_MASK
    }

    /// Return whether register was never written to
    #[inline]
    pub fn is_empty(self) -> bool {
        self.lz() == 0
    }

    /// Return whether `self` replaces `other` when both land in the same register.
    #[inline]
    pub fn outranks(self, other: Register) -> bool {
        let (lz, other_lz) = (self.lz(), other.lz());
        lz > other_lz || (lz == other_lz && self.sig() < other.sig())
    }

    /// Return raw packed value
    #[inline]
    pub fn to_bits(self) -> u16 {
        self.0
    }

    /// Create register from raw packed value without validation
    #[inline]
    pub(crate) fn from_bits(bits: u16) -> Self {
        Self(bits)
    }

    /// Return whether raw value could have been produced by inserts or merges
    #[inline]
    pub(crate) fn is_valid(self) -> bool {
        self.lz() <= MAX_LZ && (!self.is_empty() || self.sig() == 0)
    }
}

impl Debug for Register {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Register {{ lz: {}, sig: {} }}", self.lz(), self.sig())
    }
}
