/*
 * SPDX-FileCopyrightText: 2024 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Approximate membership filters: a classic [Bloom filter](`mod@bloom`)
//! over a packed bit array and a [counting variant](`mod@counting`) over
//! packed saturating counters.
//!
//! Both guarantee no false negatives: once a key has been inserted,
//! membership queries for it answer true forever. False positives are
//! possible, with probability growing with the load factor
//! `inserted · k / n`.

pub mod bloom;
pub use bloom::*;

pub mod counting;
pub use counting::*;

use crate::hash::ToHash;

/// Either membership filter, behind one dispatch point.
///
/// The [join estimator](crate::join::JoinSizeEstimator) selects the flavor
/// from its configured counter width: a width of one bit is a plain Bloom
/// filter, anything wider a counting filter.
#[derive(Debug, Clone)]
pub enum MembershipFilter {
    Bloom(BloomFilter),
    Counting(CountingBloomFilter),
}

impl MembershipFilter {
    pub fn put<T: ToHash + ?Sized>(&mut self, key: &T) {
        match self {
            MembershipFilter::Bloom(filter) => filter.put(key),
            MembershipFilter::Counting(filter) => filter.put(key),
        }
    }

    pub fn get<T: ToHash + ?Sized>(&self, key: &T) -> bool {
        match self {
            MembershipFilter::Bloom(filter) => filter.get(key),
            MembershipFilter::Counting(filter) => filter.get(key),
        }
    }

    pub fn estimate_count(&self) -> f64 {
        match self {
            MembershipFilter::Bloom(filter) => filter.estimate_count(),
            MembershipFilter::Counting(filter) => filter.estimate_count(),
        }
    }
}
