/*
 * SPDX-FileCopyrightText: 2024 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Support for [rewindable I/O lenders](RewindableIoLender).
//!
//! The [join estimator](crate::join::JoinSizeEstimator) has some
//! requirements in common with other sketch-building code:
//! - it must be able to read each input stream more than once (once to
//!   sketch, possibly again to count);
//! - the input might come lazily from a source that can generate errors,
//!   such as a file;
//! - it does not store the keys it reads, but only derived data such as
//!   filter bits and registers, so forcing owned items would be wasteful.
//!
//! For this kind of input we use the [`RewindableIoLender`] trait, a
//! [`Lender`] that can be rewound to the beginning and whose items are
//! [`Result`]s. Rewindability solves the first problem, [`Result`]s the
//! second, and lending the third.
//!
//! The basic implementation for strings is [`LineLender`], which lends
//! lines from a [`BufRead`] as `&str`, reusing an internal buffer rather
//! than allocating a new string per line. Convenience constructors are
//! provided for [`File`](LineLender::from_file) and
//! [`Path`](LineLender::from_path).
//!
//! Two infallible adapters simplify tests and in-memory use: [`FromSlice`]
//! lends the items of a slice, and [`FromIntoIterator`] lends the items of
//! a clonable [`IntoIterator`], rewinding by cloning it.

use io::{BufRead, BufReader};
use lender::*;
use std::{
    fs::File,
    io::{self, Seek},
    path::Path,
};

/// The main trait: a [`Lender`] that can be rewound to the beginning, and
/// whose returned items are [`Result`]s.
///
/// Additionally, this trait is implemented on [`lender::Take`], so you can
/// call `take` on a rewindable lender and obtain again a rewindable lender.
///
/// Note that [`rewind`](RewindableIoLender::rewind) consumes `self` and
/// returns it. This slightly inconvenient behavior is necessary to handle
/// cleanly implementations that must rebuild their underlying reader.
pub trait RewindableIoLender<T: ?Sized>:
    Sized + Lender + for<'lend> Lending<'lend, Lend = Result<&'lend T, Self::Error>>
{
    type Error: Into<anyhow::Error> + Send + Sync + 'static;
    /// Rewind the lender to the beginning.
    ///
    /// This method consumes `self` and returns it.
    fn rewind(self) -> Result<Self, Self::Error>;
}

// Common next function for all line lenders
fn next<'a>(buf: &mut impl BufRead, line: &'a mut String) -> Option<io::Result<&'a str>> {
    line.clear();
    match buf.read_line(line) {
        Err(e) => Some(Err(e)),
        Ok(0) => None,
        Ok(_) => {
            if line.ends_with('\n') {
                line.pop();
                if line.ends_with('\r') {
                    line.pop();
                }
            }
            Some(Ok(line))
        }
    }
}

/// A structure lending the lines coming from a [`BufRead`] as `&str`.
///
/// The lines are read into a reusable internal string buffer that grows as
/// needed.
pub struct LineLender<B> {
    buf: B,
    line: String,
}

impl<B> LineLender<B> {
    pub fn new(buf: B) -> Self {
        LineLender {
            buf,
            line: String::with_capacity(128),
        }
    }
}

impl LineLender<BufReader<File>> {
    pub fn from_path(path: impl AsRef<Path>) -> io::Result<LineLender<BufReader<File>>> {
        Ok(LineLender::new(BufReader::new(File::open(path)?)))
    }

    pub fn from_file(file: File) -> LineLender<BufReader<File>> {
        LineLender::new(BufReader::new(file))
    }
}

impl<'lend, B: BufRead> Lending<'lend> for LineLender<B> {
    type Lend = io::Result<&'lend str>;
}

impl<B: BufRead> Lender for LineLender<B> {
    fn next(&mut self) -> Option<Lend<'_, Self>> {
        next(&mut self.buf, &mut self.line)
    }
}

impl<B: BufRead + Seek> RewindableIoLender<str> for LineLender<B> {
    type Error = io::Error;
    fn rewind(mut self) -> io::Result<Self> {
        self.buf.rewind()?;
        Ok(self)
    }
}

/// An infallible adapter lending the items of a slice.
///
/// Useful for vectors, slices, etc.
pub struct FromSlice<'a, T> {
    slice: &'a [T],
    iter: std::slice::Iter<'a, T>,
}

impl<'a, T> FromSlice<'a, T> {
    pub fn new(slice: &'a [T]) -> Self {
        FromSlice {
            slice,
            iter: slice.iter(),
        }
    }
}

impl<'a, 'lend, T> Lending<'lend> for FromSlice<'a, T> {
    type Lend = Result<&'lend T, core::convert::Infallible>;
}

impl<'a, 'lend, T> Lender for FromSlice<'a, T> {
    fn next(&mut self) -> Option<Lend<'_, Self>> {
        self.iter.next().map(Ok)
    }
}

impl<'a, T> RewindableIoLender<T> for FromSlice<'a, T> {
    type Error = core::convert::Infallible;
    fn rewind(mut self) -> Result<Self, Self::Error> {
        self.iter = self.slice.iter();
        Ok(self)
    }
}

/// An adapter lending the items of a clonable [`IntoIterator`].
///
/// Mainly useful for ranges and similar small-footprint types, as rewinding
/// is implemented by cloning the iterator.
pub struct FromIntoIterator<I: IntoIterator> {
    into_iter: I,
    iter: I::IntoIter,
    item: Option<I::Item>,
}

impl<I: IntoIterator + Clone> FromIntoIterator<I> {
    pub fn new(into_iter: I) -> Self {
        FromIntoIterator {
            into_iter: into_iter.clone(),
            iter: into_iter.into_iter(),
            item: None,
        }
    }
}

impl<'lend, T: 'lend, I: IntoIterator<Item = T> + Clone> Lending<'lend> for FromIntoIterator<I> {
    type Lend = Result<&'lend T, core::convert::Infallible>;
}

impl<T: 'static, I: IntoIterator<Item = T> + Clone> Lender for FromIntoIterator<I> {
    fn next(&mut self) -> Option<Lend<'_, Self>> {
        self.item = self.iter.next();
        self.item.as_ref().map(Ok)
    }
}

impl<T: 'static, I: IntoIterator<Item = T> + Clone> RewindableIoLender<T> for FromIntoIterator<I> {
    type Error = core::convert::Infallible;
    fn rewind(mut self) -> Result<Self, Self::Error> {
        self.iter = self.into_iter.clone().into_iter();
        Ok(self)
    }
}

impl<T: 'static, I: IntoIterator<Item = T> + Clone> From<I> for FromIntoIterator<I> {
    fn from(into_iter: I) -> Self {
        FromIntoIterator::new(into_iter)
    }
}

impl<T: ?Sized, L: RewindableIoLender<T>> RewindableIoLender<T> for lender::Take<L> {
    type Error = L::Error;

    fn rewind(self) -> Result<Self, Self::Error> {
        let (lender, n) = self.into_parts();
        lender.rewind().map(|lender| lender.take(n))
    }
}
