/*
 * SPDX-FileCopyrightText: 2024 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! A fixed-length bit vector over a `Vec<u64>`.
//!
//! Bits are packed 64 to a word and addressed with shift/mask arithmetic.
//! The length is fixed at construction; callers are expected to reduce
//! their indices modulo [`BitVec::len`], and out-of-range accesses panic.

/// A fixed-length bit vector with a `Vec<u64>` as underlying storage.
#[derive(Debug, Clone)]
pub struct BitVec {
    data: Vec<u64>,
    len: usize,
}

macro_rules! panic_if_out_of_bounds {
    ($index: expr, $len: expr) => {
        if $index >= $len {
            panic!("Bit index out of bounds: {} >= {}", $index, $len)
        }
    };
}

pub(crate) use panic_if_out_of_bounds;

impl BitVec {
    /// Create a new bit vector of length `len`, all bits unset.
    pub fn new(len: usize) -> Self {
        let n_of_words = len.div_ceil(64);
        Self {
            data: vec![0; n_of_words],
            len,
        }
    }

    /// Return the number of bits in this bit vector.
    #[inline(always)]
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn get(&self, index: usize) -> bool {
        panic_if_out_of_bounds!(index, self.len);
        unsafe { self.get_unchecked(index) }
    }

    pub fn set(&mut self, index: usize, value: bool) {
        panic_if_out_of_bounds!(index, self.len);
        unsafe { self.set_unchecked(index, value) }
    }

    /// # Safety
    ///
    /// `index` must be between 0 (included) and [`BitVec::len`] (excluded).
    #[inline(always)]
    pub unsafe fn get_unchecked(&self, index: usize) -> bool {
        let word_index = index / 64;
        let word = self.data.get_unchecked(word_index);
        (word >> (index % 64)) & 1 != 0
    }

    /// # Safety
    ///
    /// `index` must be between 0 (included) and [`BitVec::len`] (excluded).
    #[inline(always)]
    pub unsafe fn set_unchecked(&mut self, index: usize, value: bool) {
        let word_index = index / 64;
        let bit_index = index % 64;

        // For constant values, this should be inlined with no test.
        if value {
            *self.data.get_unchecked_mut(word_index) |= 1 << bit_index;
        } else {
            *self.data.get_unchecked_mut(word_index) &= !(1 << bit_index);
        }
    }

    /// Return the number of bits set to 1 in this bit vector.
    pub fn count_ones(&self) -> usize {
        self.data.iter().map(|x| x.count_ones() as usize).sum()
    }
}
