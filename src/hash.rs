/*
 * SPDX-FileCopyrightText: 2024 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Seed-parameterized hashing of keys.
//!
//! Every structure in this crate draws its hash values from the same
//! family: [`ToHash::to_hash`] maps a key and a 64-bit seed to a 64-bit
//! value via [`xxh3::xxh3_64_with_seed`]. The mapping is deterministic
//! across calls and processes (no per-run randomization), statistically
//! uniform, and approximately independent across distinct seeds, so a
//! structure needing `k` hash functions uses seeds `0..k`.
//!
//! We provide implementations for `str`, `String`, byte slices, and the
//! unsigned primitive types, the latter hashed through their native-endian
//! byte representation; for this reason the primitive implementations are
//! not endianness-independent.

use xxhash_rust::xxh3;

/// Trait for key types that can be hashed with a seed.
pub trait ToHash {
    fn to_hash(key: &Self, seed: u64) -> u64;
}

impl ToHash for str {
    #[inline(always)]
    fn to_hash(key: &Self, seed: u64) -> u64 {
        xxh3::xxh3_64_with_seed(key.as_bytes(), seed)
    }
}

impl ToHash for String {
    #[inline(always)]
    fn to_hash(key: &Self, seed: u64) -> u64 {
        xxh3::xxh3_64_with_seed(key.as_bytes(), seed)
    }
}

impl ToHash for &str {
    #[inline(always)]
    fn to_hash(key: &Self, seed: u64) -> u64 {
        xxh3::xxh3_64_with_seed(key.as_bytes(), seed)
    }
}

impl ToHash for &String {
    #[inline(always)]
    fn to_hash(key: &Self, seed: u64) -> u64 {
        xxh3::xxh3_64_with_seed(key.as_bytes(), seed)
    }
}

impl ToHash for [u8] {
    #[inline(always)]
    fn to_hash(key: &Self, seed: u64) -> u64 {
        xxh3::xxh3_64_with_seed(key, seed)
    }
}

impl ToHash for Vec<u8> {
    #[inline(always)]
    fn to_hash(key: &Self, seed: u64) -> u64 {
        xxh3::xxh3_64_with_seed(key, seed)
    }
}

macro_rules! impl_to_hash_prim {
    ($($ty:ty),*) => {$(
        impl ToHash for $ty {
            #[inline(always)]
            fn to_hash(key: &Self, seed: u64) -> u64 {
                xxh3::xxh3_64_with_seed(&key.to_ne_bytes(), seed)
            }
        }
    )*};
}

impl_to_hash_prim!(u8, u16, u32, u64, u128, usize);
