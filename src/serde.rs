//! # Serde module for HyperMinHash
//!
//! This module provides serde-based (serialization and deserialization) features for
//! `HyperMinHash`. The sketch is serialized as a sequence of `M` raw `u16` register values.
//!
//! During deserialization the sequence goes through the same validation as
//! `HyperMinHash::try_from`, so only register arrays which inserts and merges could have
//! produced are accepted.
//!
//! Refer to the serde documentation for more details on custom serialization and deserialization:
//! - [Serialization](https://serde.rs/impl-serialize.html)
//! - [Deserialization](https://serde.rs/impl-deserialize.html)
use std::hash::Hasher;

use serde::de::Error;
use serde::ser::SerializeSeq;
use serde::{Deserialize, Serialize};

use crate::sketch::HyperMinHash;

impl<H: Hasher + Default> Serialize for HyperMinHash<H> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let registers = self.registers();
        let mut seq = serializer.serialize_seq(Some(registers.len()))?;
        for reg in registers {
            seq.serialize_element(&reg.to_bits())?;
        }
        seq.end()
    }
}

impl<'de, H: Hasher + Default> Deserialize<'de> for HyperMinHash<H> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let values: Vec<u16> = Deserialize::deserialize(deserializer)?;
        HyperMinHash::try_from(values).map_err(Error::custom)
    }
}
