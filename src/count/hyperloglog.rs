/*
 * SPDX-FileCopyrightText: 2024 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! A HyperLogLog cardinality estimator over a packed register array.
//!
//! This is the estimator of Flajolet, Fusy, Gandouet, and Meunier,
//! “HyperLogLog: the analysis of a near-optimal cardinality estimation
//! algorithm”, with the original small-range (linear counting) and
//! large-range corrections, computed over 32-bit hash values.

use crate::bits::CounterVec;
use crate::hash::ToHash;
use crate::ConfigError;

/// Number of bits per register.
///
/// Over 32-bit hashes the largest possible rank is `32 - b + 1 <= 32`,
/// which fits comfortably in six bits.
const REG_BITS: usize = 6;

/// The seed used to derive register indices and ranks.
///
/// Kept distinct from the `0..k` seed range of the membership filters so
/// that the two structures probe independent hash functions.
const HLL_SEED: u64 = u64::MAX;

/// A HyperLogLog counter with `2^b` six-bit registers.
///
/// Insertion hashes the key to 32 bits, routes it to the register selected
/// by the top `b` bits, and records the maximum rank (position of the
/// leftmost one, one-based) seen in the remaining `32 - b` bits.
/// [`estimate`](HyperLogLog::estimate) combines the registers with the
/// bias-corrected harmonic mean.
///
/// The relative standard error is about `1.04 / sqrt(2^b)`.
#[derive(Debug, Clone)]
pub struct HyperLogLog {
    registers: CounterVec,
    precision: usize,
}

impl HyperLogLog {
    /// Create a new empty counter with `2^precision` registers.
    ///
    /// `precision` must be between 1 and 30: at least one bit must be left
    /// for the rank, and the register array must stay addressable.
    pub fn new(precision: usize) -> Result<Self, ConfigError> {
        if !(1..=30).contains(&precision) {
            return Err(ConfigError::Precision);
        }
        Ok(Self {
            registers: CounterVec::new(REG_BITS, 1 << precision)?,
            precision,
        })
    }

    /// Return the number of registers, `2^precision`.
    #[inline(always)]
    pub fn num_registers(&self) -> usize {
        self.registers.len()
    }

    /// Return the precision `b` this counter was created with.
    #[inline(always)]
    pub fn precision(&self) -> usize {
        self.precision
    }

    /// Insert a key.
    ///
    /// Inserting the same key again never changes the state, so the
    /// estimate depends only on the set of distinct keys seen.
    pub fn put<T: ToHash + ?Sized>(&mut self, key: &T) {
        let b = self.precision;
        let hash = T::to_hash(key, HLL_SEED) as u32;
        let index = (hash >> (32 - b)) as usize;
        // The remaining 32 - b bits, left-aligned; a rank of 32 - b + 1 is
        // assigned when they are all zero.
        let rest = hash << b;
        let rank = if rest == 0 {
            (32 - b + 1) as u64
        } else {
            (rest.leading_zeros() + 1) as u64
        };
        if rank > self.registers.get(index) {
            self.registers.set(index, rank);
        }
    }

    /// Estimate the number of distinct keys inserted so far.
    pub fn estimate(&self) -> f64 {
        let m = self.registers.len() as f64;
        let mut harmonic_sum = 0.0;
        let mut zero_registers = 0u64;
        for register in self.registers.iter() {
            harmonic_sum += 1.0 / (1u64 << register) as f64;
            if register == 0 {
                zero_registers += 1;
            }
        }
        let raw = alpha(self.registers.len()) * m * m / harmonic_sum;

        if raw <= 2.5 * m {
            // Small-range correction: fall back to linear counting while
            // some registers are still untouched.
            if zero_registers != 0 {
                m * (m / zero_registers as f64).ln()
            } else {
                raw
            }
        } else if raw > (1u64 << 32) as f64 / 30.0 {
            // Large-range correction for hash collisions in 32-bit space.
            let two_pow_32 = (1u64 << 32) as f64;
            -two_pow_32 * (1.0 - raw / two_pow_32).ln()
        } else {
            raw
        }
    }
}

/// The bias-correction constant `alpha_m`.
fn alpha(num_registers: usize) -> f64 {
    match num_registers {
        16 => 0.673,
        32 => 0.697,
        64 => 0.709,
        _ => 0.7213 / (1.0 + 1.079 / num_registers as f64),
    }
}
