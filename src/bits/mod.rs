/*
 * SPDX-FileCopyrightText: 2024 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Packed register arrays: [bit vectors](`mod@bit_vec`) and
//! [vectors of saturating counters of fixed bit width](`mod@counter_vec`).

pub mod bit_vec;
pub use bit_vec::*;

pub mod counter_vec;
pub use counter_vec::*;
