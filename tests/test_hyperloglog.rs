/*
 * SPDX-FileCopyrightText: 2024 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use anyhow::Result;

use joinest::prelude::*;

#[test]
fn test_hyperloglog() -> Result<()> {
    for end in [
        5, 10, 50, 100, 500, 1_000, 5_000, 10_000, 50_000, 100_000, 500_000, 1_000_000,
    ] {
        let mut hll = HyperLogLog::new(10)?;
        for i in 0..end as u64 {
            hll.put(&i);
        }
        let estimate = hll.estimate();
        let approx_ratio = (1.0 - end as f64 / estimate).abs();
        println!("{:.4} {}: {}", approx_ratio, end, estimate);
        assert!(approx_ratio < 0.3);
    }

    Ok(())
}

#[test]
fn test_empty() -> Result<()> {
    let hll = HyperLogLog::new(10)?;
    assert_eq!(hll.estimate(), 0.0);
    Ok(())
}

#[test]
fn test_idempotent_puts() -> Result<()> {
    let mut hll = HyperLogLog::new(10)?;
    for key in uniq_keys(0, 1000) {
        hll.put(key.as_str());
    }
    let estimate = hll.estimate();
    // re-inserting the same keys must not move the estimate
    for key in uniq_keys(0, 1000) {
        hll.put(key.as_str());
    }
    assert_eq!(hll.estimate(), estimate);
    Ok(())
}

#[test]
fn test_small_range_accuracy() -> Result<()> {
    // With many more registers than keys the linear-counting regime is
    // nearly exact
    let mut hll = HyperLogLog::new(14)?;
    for key in uniq_keys(0, 100) {
        hll.put(key.as_str());
    }
    let estimate = hll.estimate();
    assert!((estimate - 100.0).abs() < 5.0, "estimate: {}", estimate);
    Ok(())
}

#[test]
fn test_precision_sweep() -> Result<()> {
    // Error shrinks as 1.04 / sqrt(2^b); allow four standard errors
    for b in [6, 8, 10, 12] {
        let mut hll = HyperLogLog::new(b)?;
        let n = 100_000;
        for key in uniq_keys(42, n) {
            hll.put(key.as_str());
        }
        let estimate = hll.estimate();
        let rel_err = (estimate - n as f64).abs() / n as f64;
        let std_err = 1.04 / ((1u64 << b) as f64).sqrt();
        println!("b = {}: {:.4} (std err {:.4})", b, rel_err, std_err);
        assert!(rel_err < 4.0 * std_err);
    }
    Ok(())
}

#[test]
fn test_corrections_never_raise() -> Result<()> {
    // With 16 registers the small-range branch runs out of zero registers
    // quickly; whatever regime applies, the estimate must stay finite and
    // positive
    for n in 1..=500u64 {
        let mut hll = HyperLogLog::new(4)?;
        for i in 0..n {
            hll.put(&i);
        }
        let estimate = hll.estimate();
        assert!(estimate.is_finite() && estimate > 0.0, "n = {}: {}", n, estimate);
    }
    Ok(())
}

#[test]
fn test_invalid_precision() {
    assert_eq!(HyperLogLog::new(0).unwrap_err(), ConfigError::Precision);
    assert_eq!(HyperLogLog::new(31).unwrap_err(), ConfigError::Precision);
}
