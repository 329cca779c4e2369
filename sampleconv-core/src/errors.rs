// Sampleconv
// Copyright (c) 2024 The Sampleconv Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The `errors` module defines the common error type.
//!
//! Conversions of individual samples never fail. Only the sequence forms of the conversion
//! functions, which require the caller to pass index-aligned source and destination slices, report
//! errors.

use std::error;
use std::fmt;
use std::result;

/// `Error` provides an enumeration of all possible errors reported by Sampleconv.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// The source and destination slices of a sequence conversion differ in length.
    LengthMismatch {
        /// The number of source samples.
        src: usize,
        /// The number of destination samples.
        dst: usize,
    },
    /// The requested number of samples to convert exceeds the length of the source or destination
    /// slice.
    OutOfBounds {
        /// The requested number of samples.
        len: usize,
        /// The number of source samples.
        src: usize,
        /// The number of destination samples.
        dst: usize,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Error::LengthMismatch { src, dst } => {
                write!(f, "length mismatch: {} source samples, {} destination samples", src, dst)
            }
            Error::OutOfBounds { len, src, dst } => {
                write!(
                    f,
                    "out of bounds: {} samples requested, {} source samples, {} destination samples",
                    len, src, dst
                )
            }
        }
    }
}

impl error::Error for Error {}

pub type Result<T> = result::Result<T, Error>;

/// Convenience function to create a length mismatch error.
pub fn length_mismatch_error<T>(src: usize, dst: usize) -> Result<T> {
    Err(Error::LengthMismatch { src, dst })
}

/// Convenience function to create an out-of-bounds error.
pub fn out_of_bounds_error<T>(len: usize, src: usize, dst: usize) -> Result<T> {
    Err(Error::OutOfBounds { len, src, dst })
}
