/*
 * SPDX-FileCopyrightText: 2024 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Cardinality estimation with [HyperLogLog counters](`mod@hyperloglog`).

pub mod hyperloglog;
pub use hyperloglog::*;
