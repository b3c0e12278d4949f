/*
 * SPDX-FileCopyrightText: 2024 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Utility traits and implementations: [rewindable I/O
//! lenders](`mod@lenders`) and [reproducible key generation](`mod@key_gen`).

pub mod lenders;
pub use lenders::*;

pub mod key_gen;
pub use key_gen::*;
