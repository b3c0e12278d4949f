/*
 * SPDX-FileCopyrightText: 2024 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Reproducible key-stream generation for tests and benchmarks.

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;

/// Generate `n` distinct pseudorandom keys of 32 hexadecimal characters.
///
/// The result is a deterministic function of `seed`.
pub fn uniq_keys(seed: u64, n: usize) -> Vec<String> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut seen = HashSet::with_capacity(n);
    let mut keys = Vec::with_capacity(n);
    while keys.len() < n {
        let key = format!("{:032x}", rng.random::<u128>());
        if seen.insert(key.clone()) {
            keys.push(key);
        }
    }
    keys
}

/// Generate a key stream from a frequency pattern.
///
/// For each `(n_keys, n_records)` pair in `pattern`, `n_keys` distinct keys
/// are each repeated `n_records` times. Key names are `key0`, `key1`, ...,
/// numbered consecutively across groups, so two streams generated from
/// overlapping patterns share keys by construction. With `shuffle` the
/// records are permuted with an rng seeded with `seed`; otherwise `seed` is
/// unused and the stream is grouped by key.
pub fn grouped_keys(seed: u64, pattern: &[(usize, usize)], shuffle: bool) -> Vec<String> {
    let mut keys = Vec::new();
    let mut num = 0;
    for &(n_keys, n_records) in pattern {
        for i in 0..n_keys {
            let key = format!("key{}", num + i);
            for _ in 0..n_records {
                keys.push(key.clone());
            }
        }
        num += n_keys;
    }
    if shuffle {
        let mut rng = SmallRng::seed_from_u64(seed);
        keys.shuffle(&mut rng);
    }
    keys
}
