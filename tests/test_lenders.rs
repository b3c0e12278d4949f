/*
 * SPDX-FileCopyrightText: 2024 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use std::io::Cursor;

use anyhow::{bail, ensure, Context, Result};

use joinest::utils::lenders::*;

fn test_lender<T: ?Sized + AsRef<str>, L: RewindableIoLender<T>>(mut lender: L) -> Result<()>
where
    L::Error: std::error::Error + Send + Sync + 'static,
{
    for pass in 0..5 {
        for i in 0..3 {
            match lender.next() {
                Some(Ok(got)) => {
                    let got = got.as_ref();
                    let expected = ["foo", "bar", "baz"][i];
                    ensure!(
                        got == expected,
                        "Mismatch of item {i} of pass {pass}: expected {expected:?}, got {got:?}"
                    );
                }
                Some(Err(e)) => bail!("Could not read item {i} of pass {pass}: {e:?}"),
                None => bail!("Found only {i} items at pass {pass}"),
            }
        }
        if let Some(extra) = lender.next().map(Result::unwrap) {
            bail!("Found extra item after pass {pass}: {}", extra.as_ref());
        }

        lender = lender.rewind().context("Could not rewind")?;
    }

    Ok(())
}

#[test]
fn test_linelender() -> Result<()> {
    let buf = Cursor::new(b"foo\nbar\nbaz\n");
    test_lender(LineLender::new(buf))
}

#[test]
fn test_linelender_crlf_and_missing_final_newline() -> Result<()> {
    let buf = Cursor::new(b"foo\r\nbar\r\nbaz");
    test_lender(LineLender::new(buf))
}

#[test]
fn test_from_slice() -> Result<()> {
    test_lender(FromSlice::new(&["foo", "bar", "baz"]))
}

#[test]
fn test_from_into_iterator() -> Result<()> {
    test_lender(FromIntoIterator::from(["foo", "bar", "baz"]))
}

#[test]
fn test_take() -> Result<()> {
    use lender::Lender;
    test_lender(FromSlice::new(&["foo", "bar", "baz", "qux"]).take(3))
}
