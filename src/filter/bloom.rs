/*
 * SPDX-FileCopyrightText: 2024 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! A classic Bloom filter over a packed bit array.

use crate::bits::BitVec;
use crate::hash::ToHash;
use crate::ConfigError;

/// A Bloom filter of `n` bits probed by `k` seeded hash functions.
///
/// Inserting a key sets the `k` bits at indices `to_hash(key, seed) mod n`
/// for seeds `0..k`; a membership query answers true iff all `k` bits are
/// set. There are no false negatives, and false positives become more
/// likely as the filter fills up.
#[derive(Debug, Clone)]
pub struct BloomFilter {
    bits: BitVec,
    num_hashes: usize,
}

impl BloomFilter {
    /// Create a new empty Bloom filter of `n` bits with `k` hash functions.
    pub fn new(n: usize, k: usize) -> Result<Self, ConfigError> {
        if n == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        if k == 0 {
            return Err(ConfigError::ZeroHashes);
        }
        Ok(Self {
            bits: BitVec::new(n),
            num_hashes: k,
        })
    }

    /// Return the number of bits in the filter.
    #[inline(always)]
    pub fn num_bits(&self) -> usize {
        self.bits.len()
    }

    /// Return the number of hash functions.
    #[inline(always)]
    pub fn num_hashes(&self) -> usize {
        self.num_hashes
    }

    /// Insert a key.
    pub fn put<T: ToHash + ?Sized>(&mut self, key: &T) {
        let n = self.bits.len() as u64;
        for seed in 0..self.num_hashes as u64 {
            let index = (T::to_hash(key, seed) % n) as usize;
            self.bits.set(index, true);
        }
    }

    /// Return whether a key might have been inserted.
    ///
    /// A false answer is always correct; a true answer may be a false
    /// positive.
    pub fn get<T: ToHash + ?Sized>(&self, key: &T) -> bool {
        let n = self.bits.len() as u64;
        (0..self.num_hashes as u64).all(|seed| {
            let index = (T::to_hash(key, seed) % n) as usize;
            self.bits.get(index)
        })
    }

    /// Estimate the number of insertions performed so far as the number of
    /// set bits divided by the number of hash functions.
    ///
    /// The estimate undercounts once distinct insertions start colliding on
    /// bits, and tops out at `n / k` when the filter is full.
    pub fn estimate_count(&self) -> f64 {
        self.bits.count_ones() as f64 / self.num_hashes as f64
    }
}
