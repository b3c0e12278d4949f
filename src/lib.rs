/*
 * SPDX-FileCopyrightText: 2024 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

/*!

Probabilistic sketches for streams of keys: approximate membership
([`BloomFilter`](filter::BloomFilter),
[`CountingBloomFilter`](filter::CountingBloomFilter)), distinct-count
estimation ([`HyperLogLog`](count::HyperLogLog)), and adaptive equi-join
size estimation ([`JoinSizeEstimator`](join::JoinSizeEstimator)).

All structures share a few design rules:

- storage is packed into `u64` words with explicit shift/mask arithmetic
  (see the [`bits`] module);
- every hash draw comes from the seeded, deterministic family in [`hash`],
  reduced modulo the capacity of the owning structure, so indices never go
  out of range;
- capacities are fixed at construction, validated eagerly, and never
  resized; updates are monotonic (bits only turn on, counters saturate,
  registers only grow);
- input streams are [rewindable lenders](utils::RewindableIoLender), so
  structures that need a second pass over their input can ask for one
  instead of buffering keys.

*/

pub mod bits;
pub mod count;
pub mod filter;
pub mod hash;
pub mod join;
pub mod utils;

/// Errors raised when a structure is built with invalid parameters.
///
/// Parameters are never clamped or silently corrected: a sketch that has
/// already consumed part of a stream cannot be cheaply repaired, so all
/// validation happens at construction, before any key is read.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Capacity must be at least 1")]
    /// A bit-array or counter-array capacity of zero.
    ZeroCapacity,
    #[error("Number of hash functions must be at least 1")]
    /// A hash-function count of zero.
    ZeroHashes,
    #[error("Counter width must be between 1 and 64 bits")]
    /// A counter bit width of zero, or wider than a word.
    CounterWidth,
    #[error("HyperLogLog precision must be between 1 and 30")]
    /// A register-count exponent outside the supported range.
    Precision,
}

pub mod prelude {
    pub use crate::bits::*;
    pub use crate::count::*;
    pub use crate::filter::*;
    pub use crate::hash::*;
    pub use crate::join::*;
    pub use crate::utils::*;
    pub use crate::ConfigError;
}
