/*
 * SPDX-FileCopyrightText: 2024 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! A fixed-length vector of saturating counters of fixed bit width.
//!
//! Counters are packed word-aligned: `64 / bit_width` counters share one
//! `u64`, and a counter never straddles a word boundary. Compared with a
//! fully dense layout this wastes up to `64 % bit_width` bits per word, but
//! every counter can be read and written with a single shift/mask on one
//! word, and the layout would survive the addition of a decrement
//! operation without reformatting.
//!
//! Increments saturate at `2^bit_width - 1`; further increments are
//! silently absorbed, never wrapped.

use crate::bits::bit_vec::panic_if_out_of_bounds;
use crate::ConfigError;

/// A fixed-length array of `bit_width`-bit saturating counters packed into
/// `u64` words.
#[derive(Debug, Clone)]
pub struct CounterVec {
    data: Vec<u64>,
    bit_width: usize,
    /// `64 / bit_width`; the word-aligned layout guarantees
    /// `bit_width * counters_per_word <= 64`.
    counters_per_word: usize,
    /// Mask with the lowest `bit_width` bits set; also the saturation value.
    mask: u64,
    len: usize,
}

impl CounterVec {
    /// Create a new counter vector of `len` counters of `bit_width` bits,
    /// all zero.
    ///
    /// `bit_width` must be between 1 and 64 bits.
    pub fn new(bit_width: usize, len: usize) -> Result<Self, ConfigError> {
        if !(1..=64).contains(&bit_width) {
            return Err(ConfigError::CounterWidth);
        }
        let counters_per_word = 64 / bit_width;
        let n_of_words = len.div_ceil(counters_per_word);
        Ok(Self {
            data: vec![0; n_of_words],
            bit_width,
            counters_per_word,
            mask: u64::MAX >> (64 - bit_width),
            len,
        })
    }

    /// Return the number of counters in this vector.
    #[inline(always)]
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Return the number of bits of each counter.
    #[inline(always)]
    pub fn bit_width(&self) -> usize {
        self.bit_width
    }

    /// Return the saturation value, `2^bit_width - 1`.
    #[inline(always)]
    pub fn max_value(&self) -> u64 {
        self.mask
    }

    /// Return the word index and in-word bit offset of counter `index`.
    #[inline(always)]
    fn word_and_offset(&self, index: usize) -> (usize, usize) {
        (
            index / self.counters_per_word,
            (index % self.counters_per_word) * self.bit_width,
        )
    }

    pub fn get(&self, index: usize) -> u64 {
        panic_if_out_of_bounds!(index, self.len);
        let (word_index, bit_offset) = self.word_and_offset(index);
        (self.data[word_index] >> bit_offset) & self.mask
    }

    /// Set counter `index` to `value`, which must fit in `bit_width` bits.
    pub fn set(&mut self, index: usize, value: u64) {
        panic_if_out_of_bounds!(index, self.len);
        debug_assert!(value <= self.mask);
        let (word_index, bit_offset) = self.word_and_offset(index);
        let word = self.data[word_index] & !(self.mask << bit_offset);
        self.data[word_index] = word | (value << bit_offset);
    }

    /// Increment counter `index` by one, saturating at
    /// [`max_value`](CounterVec::max_value).
    ///
    /// Returns the value of the counter before the increment.
    pub fn saturating_inc(&mut self, index: usize) -> u64 {
        panic_if_out_of_bounds!(index, self.len);
        let (word_index, bit_offset) = self.word_and_offset(index);
        let current = (self.data[word_index] >> bit_offset) & self.mask;
        if current < self.mask {
            // no carry can escape the field, so a plain add suffices
            self.data[word_index] += 1 << bit_offset;
        }
        current
    }

    /// Return an iterator over all counter values.
    pub fn iter(&self) -> impl Iterator<Item = u64> + '_ {
        (0..self.len).map(|index| {
            let (word_index, bit_offset) = self.word_and_offset(index);
            (self.data[word_index] >> bit_offset) & self.mask
        })
    }

    /// Return the sum of all counters.
    pub fn total(&self) -> u64 {
        self.iter().sum()
    }
}
