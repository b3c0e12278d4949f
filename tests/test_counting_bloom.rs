/*
 * SPDX-FileCopyrightText: 2024 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use anyhow::Result;

use joinest::prelude::*;

#[test]
fn test_no_false_negatives() -> Result<()> {
    for cap in [2, 4, 8] {
        let mut filter = CountingBloomFilter::new(10_000, 4, cap)?;
        let keys = uniq_keys(0, 1000);
        for key in &keys {
            filter.put(key.as_str());
        }
        for key in &keys {
            assert!(filter.get(key.as_str()));
        }
    }
    Ok(())
}

#[test]
fn test_count_upper_bounds_frequency() -> Result<()> {
    let mut filter = CountingBloomFilter::new(10_000, 4, 8)?;
    let keys = uniq_keys(0, 100);
    for (i, key) in keys.iter().enumerate() {
        for _ in 0..=i {
            filter.put(key.as_str());
        }
    }
    for (i, key) in keys.iter().enumerate() {
        let count = filter.count(key.as_str());
        assert!(
            count >= (i + 1) as u64,
            "count {} below true frequency {}",
            count,
            i + 1
        );
    }
    Ok(())
}

#[test]
fn test_saturation() -> Result<()> {
    let mut filter = CountingBloomFilter::new(1000, 2, 3)?;
    assert_eq!(filter.max_count(), 7);
    for _ in 0..1000 {
        filter.put("foo");
    }
    // saturated, never wrapped
    assert_eq!(filter.count("foo"), 7);
    assert!(filter.get("foo"));
    Ok(())
}

#[test]
fn test_estimate_count_exact_until_saturation() -> Result<()> {
    // With 16-bit counters and 1000 insertions no counter can saturate,
    // so the total is exactly insertions * k
    let mut filter = CountingBloomFilter::new(10_000, 4, 16)?;
    for key in uniq_keys(0, 1000) {
        filter.put(key.as_str());
    }
    assert_eq!(filter.estimate_count(), 1000.0);
    Ok(())
}

#[test]
fn test_invalid_config() {
    assert_eq!(
        CountingBloomFilter::new(0, 4, 4).unwrap_err(),
        ConfigError::ZeroCapacity
    );
    assert_eq!(
        CountingBloomFilter::new(1000, 0, 4).unwrap_err(),
        ConfigError::ZeroHashes
    );
    assert_eq!(
        CountingBloomFilter::new(1000, 4, 0).unwrap_err(),
        ConfigError::CounterWidth
    );
    assert_eq!(
        CountingBloomFilter::new(1000, 4, 65).unwrap_err(),
        ConfigError::CounterWidth
    );
}
