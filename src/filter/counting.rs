/*
 * SPDX-FileCopyrightText: 2024 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! A counting Bloom filter over packed saturating counters.

use crate::bits::CounterVec;
use crate::hash::ToHash;
use crate::ConfigError;

/// A counting Bloom filter of `n` counters of `bit_width` bits, probed by
/// `k` seeded hash functions.
///
/// Insertion increments the `k` counters at indices `to_hash(key, seed)
/// mod n` for seeds `0..k`, saturating at `2^bit_width - 1`; a membership
/// query answers true iff all `k` counters are nonzero. Like the plain
/// [`BloomFilter`](crate::filter::BloomFilter) it admits no false
/// negatives, and it additionally retains enough per-slot information to
/// estimate total insertion counts.
#[derive(Debug, Clone)]
pub struct CountingBloomFilter {
    counters: CounterVec,
    num_hashes: usize,
}

impl CountingBloomFilter {
    /// Create a new empty counting Bloom filter of `n` counters of
    /// `bit_width` bits with `k` hash functions.
    pub fn new(n: usize, k: usize, bit_width: usize) -> Result<Self, ConfigError> {
        if n == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        if k == 0 {
            return Err(ConfigError::ZeroHashes);
        }
        Ok(Self {
            counters: CounterVec::new(bit_width, n)?,
            num_hashes: k,
        })
    }

    /// Return the number of counters in the filter.
    #[inline(always)]
    pub fn num_counters(&self) -> usize {
        self.counters.len()
    }

    /// Return the number of hash functions.
    #[inline(always)]
    pub fn num_hashes(&self) -> usize {
        self.num_hashes
    }

    /// Return the saturation value of each counter.
    #[inline(always)]
    pub fn max_count(&self) -> u64 {
        self.counters.max_value()
    }

    /// Insert a key, incrementing its `k` counters with saturation.
    pub fn put<T: ToHash + ?Sized>(&mut self, key: &T) {
        let n = self.counters.len() as u64;
        for seed in 0..self.num_hashes as u64 {
            let index = (T::to_hash(key, seed) % n) as usize;
            self.counters.saturating_inc(index);
        }
    }

    /// Return whether a key might have been inserted.
    pub fn get<T: ToHash + ?Sized>(&self, key: &T) -> bool {
        let n = self.counters.len() as u64;
        (0..self.num_hashes as u64).all(|seed| {
            let index = (T::to_hash(key, seed) % n) as usize;
            self.counters.get(index) != 0
        })
    }

    /// Return the smallest of the `k` counters a key maps to.
    ///
    /// This upper-bounds the number of times the key was inserted, up to
    /// counter saturation.
    pub fn count<T: ToHash + ?Sized>(&self, key: &T) -> u64 {
        let n = self.counters.len() as u64;
        (0..self.num_hashes as u64)
            .map(|seed| {
                let index = (T::to_hash(key, seed) % n) as usize;
                self.counters.get(index)
            })
            .min()
            .unwrap_or(0)
    }

    /// Estimate the number of insertions performed so far as the sum of all
    /// counters divided by the number of hash functions.
    ///
    /// Saturated counters make the estimate undercount; until any counter
    /// saturates it is exact.
    pub fn estimate_count(&self) -> f64 {
        self.counters.total() as f64 / self.num_hashes as f64
    }
}
