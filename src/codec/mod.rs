//! Hashing and bit-level primitives shared by the archive decoders.
//!
//! - [`jenkins`]: lookup3 hash used to derive name lookup keys
//! - [`bits`]: LSB-first bit reader for bit-packed payload codecs

pub mod bits;
pub mod jenkins;

pub use bits::{BitReader, MAX_BITS};
pub use jenkins::{HashKey, hash, hash_default};
