/*
 * SPDX-FileCopyrightText: 2024 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Equi-join cardinality estimation over two key streams.
//!
//! A [`JoinSizeEstimator`] sketches both streams with one [membership
//! filter](crate::filter), one [HyperLogLog counter](crate::count) and one
//! hashed frequency table per side, then picks one of three outcomes:
//! an exact count when both sides are small enough to materialize, an
//! approximate count otherwise, or the [`ExceedsThreshold`
//! sentinel](JoinEstimate::ExceedsThreshold) when the running estimate
//! grows past a configured cap. The sentinel is an expected outcome, not
//! an error: it bounds the work spent on very large or adversarial joins.
//!
//! Streams are consumed through
//! [`RewindableIoLender`](crate::utils::RewindableIoLender)s, since both
//! the exact and the approximate path must read an input a second time.

use std::collections::HashMap;
use std::hash::Hash;

use log::{debug, info};

use crate::count::HyperLogLog;
use crate::filter::{BloomFilter, CountingBloomFilter, MembershipFilter};
use crate::hash::ToHash;
use crate::utils::RewindableIoLender;
use crate::ConfigError;

/// The seed of the frequency tables.
///
/// Distinct from the `0..k` filter seeds and from the HyperLogLog seed, so
/// frequency slots are assigned independently of filter and register
/// indices.
const FREQ_SEED: u64 = 0x9E37_79B9_7F4A_7C15;

/// Configuration of a [`JoinSizeEstimator`].
///
/// All parameters are validated eagerly by
/// [`JoinSizeEstimator::new`], before any stream is consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JoinConfig {
    /// Number of filter slots and frequency-table slots per side.
    pub n: usize,
    /// Number of hash functions of the membership filters.
    pub k: usize,
    /// Bit width of the filter counters; a width of 1 selects a plain
    /// Bloom filter, anything wider a counting Bloom filter.
    pub cap: usize,
    /// HyperLogLog precision; each side gets `2^b` registers.
    pub b: usize,
    /// Take the exact path when both estimated distinct counts are at most
    /// this value.
    pub exactness_threshold: u64,
    /// Return [`JoinEstimate::ExceedsThreshold`] as soon as the running
    /// approximate estimate exceeds this value.
    pub large_join_threshold: u64,
}

impl Default for JoinConfig {
    fn default() -> Self {
        Self {
            n: 1 << 20,
            k: 4,
            cap: 4,
            b: 12,
            exactness_threshold: 1_000_000,
            large_join_threshold: 10_000_000,
        }
    }
}

/// The result of a join-size estimation.
///
/// [`ExceedsThreshold`](JoinEstimate::ExceedsThreshold) is a valid,
/// expected outcome that callers must handle alongside the numeric
/// variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinEstimate {
    /// Both sides were small enough to count exactly; this is the true
    /// multiplicity-weighted join size.
    Exact(u64),
    /// A sketch-based estimate of the join size.
    Approximate(u64),
    /// The running estimate exceeded the configured large-join threshold.
    ExceedsThreshold,
}

/// A fixed-width hashed table of per-key frequency counters.
///
/// This is a count-min sketch of depth one: colliding keys share a slot,
/// so per-key reads overestimate, never underestimate, the true frequency
/// (up to `u64` saturation).
#[derive(Debug, Clone)]
struct FreqTable {
    counts: Vec<u64>,
}

impl FreqTable {
    fn new(n: usize) -> Self {
        Self {
            counts: vec![0; n],
        }
    }

    #[inline(always)]
    fn slot<T: ToHash + ?Sized>(&self, key: &T) -> usize {
        (T::to_hash(key, FREQ_SEED) % self.counts.len() as u64) as usize
    }

    fn add<T: ToHash + ?Sized>(&mut self, key: &T) {
        let slot = self.slot(key);
        self.counts[slot] = self.counts[slot].saturating_add(1);
    }

    fn get<T: ToHash + ?Sized>(&self, key: &T) -> u64 {
        self.counts[self.slot(key)]
    }
}

/// The sketches kept for one input stream.
#[derive(Debug, Clone)]
struct SideSketch {
    filter: MembershipFilter,
    distinct: HyperLogLog,
    freq: FreqTable,
}

impl SideSketch {
    fn new(config: &JoinConfig) -> Result<Self, ConfigError> {
        let filter = if config.cap == 1 {
            MembershipFilter::Bloom(BloomFilter::new(config.n, config.k)?)
        } else {
            MembershipFilter::Counting(CountingBloomFilter::new(config.n, config.k, config.cap)?)
        };
        Ok(Self {
            filter,
            distinct: HyperLogLog::new(config.b)?,
            freq: FreqTable::new(config.n),
        })
    }

    fn put<T: ToHash + ?Sized>(&mut self, key: &T) {
        self.filter.put(key);
        self.distinct.put(key);
        self.freq.add(key);
    }
}

/// An estimator of the multiplicity-weighted equi-join size of two key
/// streams.
///
/// The estimator is single-use:
/// [`estimate_join_size`](JoinSizeEstimator::estimate_join_size) consumes
/// it together with both streams. All sketches are allocated at
/// construction, so an invalid configuration is reported before any input
/// is read.
#[derive(Debug)]
pub struct JoinSizeEstimator {
    config: JoinConfig,
    lhs: SideSketch,
    rhs: SideSketch,
}

impl JoinSizeEstimator {
    /// Create a new estimator, allocating the per-side sketches.
    pub fn new(config: JoinConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            lhs: SideSketch::new(&config)?,
            rhs: SideSketch::new(&config)?,
            config,
        })
    }

    /// Estimate the equi-join size of two key streams.
    ///
    /// Both streams are sketched once. If both HyperLogLog estimates are at
    /// most the configured exactness threshold, both streams are rewound
    /// and counted exactly; otherwise the first stream is rewound and
    /// probed against the second stream's filter, accumulating the product
    /// of the two per-key frequency estimates for each positive probe. The
    /// approximate path returns [`JoinEstimate::ExceedsThreshold`] as soon
    /// as the accumulator passes the large-join threshold.
    ///
    /// Stream read errors are fatal for the call and propagate to the
    /// caller.
    pub fn estimate_join_size<T, L1, L2>(
        mut self,
        mut lhs: L1,
        mut rhs: L2,
    ) -> anyhow::Result<JoinEstimate>
    where
        T: ToHash + ToOwned + ?Sized,
        T::Owned: Hash + Eq,
        L1: RewindableIoLender<T>,
        L2: RewindableIoLender<T>,
    {
        while let Some(result) = lhs.next() {
            match result {
                Ok(key) => self.lhs.put(key),
                Err(e) => return Err(e.into()),
            }
        }
        while let Some(result) = rhs.next() {
            match result {
                Ok(key) => self.rhs.put(key),
                Err(e) => return Err(e.into()),
            }
        }

        let lhs_distinct = self.lhs.distinct.estimate();
        let rhs_distinct = self.rhs.distinct.estimate();
        debug!(
            "Estimated distinct counts: {:.0} and {:.0}",
            lhs_distinct, rhs_distinct
        );

        let threshold = self.config.exactness_threshold as f64;
        if lhs_distinct <= threshold && rhs_distinct <= threshold {
            info!("Both sides below exactness threshold, counting exactly");
            let lhs_counts = exact_counts(lhs.rewind().map_err(Into::into)?)?;
            let rhs_counts = exact_counts(rhs.rewind().map_err(Into::into)?)?;
            let mut join_size = 0u64;
            for (key, &count) in &lhs_counts {
                if let Some(&other) = rhs_counts.get::<T::Owned>(key) {
                    join_size = join_size.saturating_add(count.saturating_mul(other));
                }
            }
            return Ok(JoinEstimate::Exact(join_size));
        }

        info!("Estimating approximately");
        lhs = lhs.rewind().map_err(Into::into)?;
        let mut estimate = 0u64;
        while let Some(result) = lhs.next() {
            match result {
                Ok(key) => {
                    if self.rhs.filter.get(key) {
                        let product = self.lhs.freq.get(key).saturating_mul(self.rhs.freq.get(key));
                        estimate = estimate.saturating_add(product);
                        if estimate > self.config.large_join_threshold {
                            info!(
                                "Running estimate exceeds {}, returning early",
                                self.config.large_join_threshold
                            );
                            return Ok(JoinEstimate::ExceedsThreshold);
                        }
                    }
                }
                Err(e) => return Err(e.into()),
            }
        }
        Ok(JoinEstimate::Approximate(estimate))
    }
}

/// Materialize exact per-key multiplicities from a stream.
fn exact_counts<T, L>(mut lender: L) -> anyhow::Result<HashMap<T::Owned, u64>>
where
    T: ToOwned + ?Sized,
    T::Owned: Hash + Eq,
    L: RewindableIoLender<T>,
{
    let mut counts = HashMap::new();
    while let Some(result) = lender.next() {
        match result {
            Ok(key) => *counts.entry(key.to_owned()).or_insert(0) += 1,
            Err(e) => return Err(e.into()),
        }
    }
    Ok(counts)
}
