/*
 * SPDX-FileCopyrightText: 2024 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use anyhow::Result;

use joinest::prelude::*;

#[test]
fn test_no_false_negatives() -> Result<()> {
    for k in [1, 2, 4, 8] {
        let mut filter = BloomFilter::new(10_000, k)?;
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
fn test_empty() -> Result<()> {
    let filter = BloomFilter::new(1000, 4)?;
    for key in uniq_keys(0, 1000) {
        assert!(!filter.get(key.as_str()));
    }
    assert_eq!(filter.estimate_count(), 0.0);
    Ok(())
}

#[test]
fn test_false_positive_rate() -> Result<()> {
    // With n = 1024 bits, k = 1 and 500 inserted keys the expected
    // false-positive rate is 1 - (1 - 1/1024)^500, about 0.39
    let mut filter = BloomFilter::new(1024, 1)?;
    let keys = uniq_keys(0, 1000);
    let (inserted, probed) = keys.split_at(500);
    for key in inserted {
        filter.put(key.as_str());
    }
    for key in inserted {
        assert!(filter.get(key.as_str()));
    }

    let false_positives = probed
        .iter()
        .filter(|key| filter.get(key.as_str()))
        .count();
    let rate = false_positives as f64 / probed.len() as f64;
    let expected = 1.0 - (1.0 - 1.0 / 1024.0f64).powi(500);
    println!("{:.4} vs {:.4}", rate, expected);
    assert!((rate - expected).abs() < 0.08);

    Ok(())
}

#[test]
fn test_false_positive_rate_multiple_hashes() -> Result<()> {
    // Expected rate (1 - e^{-km/n})^k with n = 10000, k = 4, m = 1000,
    // about 0.012
    let mut filter = BloomFilter::new(10_000, 4)?;
    for key in uniq_keys(0, 1000) {
        filter.put(key.as_str());
    }

    let probes = uniq_keys(1, 10_000);
    let false_positives = probes
        .iter()
        .filter(|key| filter.get(key.as_str()))
        .count();
    let rate = false_positives as f64 / probes.len() as f64;
    let expected = (1.0 - (-4.0 * 1000.0 / 10_000.0f64).exp()).powi(4);
    println!("{:.4} vs {:.4}", rate, expected);
    assert!((rate - expected).abs() < 0.006);

    Ok(())
}

#[test]
fn test_estimate_count() -> Result<()> {
    // At low load collisions are rare and the estimate tracks the number
    // of insertions closely
    let mut filter = BloomFilter::new(100_000, 4)?;
    for key in uniq_keys(0, 1000) {
        filter.put(key.as_str());
    }
    let estimate = filter.estimate_count();
    assert!((estimate - 1000.0).abs() < 50.0, "estimate: {}", estimate);
    Ok(())
}

#[test]
fn test_duplicate_puts_are_idempotent() -> Result<()> {
    let mut filter = BloomFilter::new(1000, 4)?;
    filter.put("foo");
    let estimate = filter.estimate_count();
    for _ in 0..100 {
        filter.put("foo");
    }
    assert_eq!(filter.estimate_count(), estimate);
    Ok(())
}

#[test]
fn test_invalid_config() {
    assert_eq!(
        BloomFilter::new(0, 4).unwrap_err(),
        ConfigError::ZeroCapacity
    );
    assert_eq!(
        BloomFilter::new(1000, 0).unwrap_err(),
        ConfigError::ZeroHashes
    );
}
