// Sampleconv
// Copyright (c) 2024 The Sampleconv Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The `sample` module defines the core audio sample traits and any non-primitive sample data
//! types.

use std::fmt;

use num_traits::{AsPrimitive, Float};

use crate::util::clamp::{clamp_f32, clamp_f64, clamp_i24, clamp_u24};

/// SampleFormat describes the data encoding for an audio sample.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SampleFormat {
    /// Unsigned 8-bit integer.
    U8,
    /// Unsigned 16-bit integer.
    U16,
    /// Unsigned 24-bit integer.
    U24,
    /// Unsigned 32-bit integer.
    U32,
    /// Signed 8-bit integer.
    S8,
    /// Signed 16-bit integer.
    S16,
    /// Signed 24-bit integer.
    S24,
    /// Signed 32-bit integer.
    S32,
    /// Single precision (32-bit) floating point.
    F32,
    /// Double precision (64-bit) floating point.
    F64,
}

/// `Sample` provides a common interface for manipulating samples regardless of the underlying data
/// type.
pub trait Sample:
    'static + Copy + Clone + Default + PartialOrd + PartialEq + fmt::Debug + Send + Sync + Sized
{
    /// A unique enum value representing the sample format. This constant may be used to dynamically
    /// choose how to process the sample at runtime.
    const FORMAT: SampleFormat;

    /// The effective number of bits of the valid (clamped) sample range. Quantifies the dynamic
    /// range of the sample format in bits.
    const EFF_BITS: u32;

    /// The zero point of the sample format. A sample set to this value is silent.
    ///
    /// For signed fixed-point and floating-point formats this is 0. For an unsigned W-bit
    /// fixed-point format this is `2^(W-1)`, the midpoint of the unsigned range.
    const MID: Self;

    /// If the sample format does not use the full range of the underlying data type, returns the
    /// sample clamped to the valid range. Otherwise, returns the sample unchanged.
    fn clamped(self) -> Self;
}

/// `IntSample` is a fixed-point sample code of a fixed bit width and signedness.
pub trait IntSample: Sample + Ord {
    /// `true` if the code is a signed (two's complement) integer.
    const SIGNED: bool;

    /// The smallest representable code.
    const MIN: Self;

    /// The largest representable code.
    const MAX: Self;
}

/// `FloatSample` is a normalized floating-point sample nominally within [-1.0, 1.0].
pub trait FloatSample: Sample + Float {
    /// One half, the tie point of rounding.
    const HALF: Self;
}

/// An unsigned 24-bit integer sample with an internal unsigned 32-bit integer representation.
///
/// There are **no** guarantees the sample is within the valid range 24-bit range. Use the
/// [`Sample::clamped`] function to clamp the sample to the valid range.
#[allow(non_camel_case_types)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
pub struct u24(pub u32);

/// A signed 24-bit integer sample with an internal signed 32-bit integer representation.
///
/// There are **no** guarantees the sample is within the valid range 24-bit range. Use the
/// [`Sample::clamped`] function to clamp the sample to the valid range.
#[allow(non_camel_case_types)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
pub struct i24(pub i32);

impl Sample for u8 {
    const FORMAT: SampleFormat = SampleFormat::U8;
    const EFF_BITS: u32 = 8;
    const MID: u8 = 128;

    #[inline(always)]
    fn clamped(self) -> Self {
        self
    }
}

impl Sample for i8 {
    const FORMAT: SampleFormat = SampleFormat::S8;
    const EFF_BITS: u32 = 8;
    const MID: i8 = 0;

    #[inline(always)]
    fn clamped(self) -> Self {
        self
    }
}

impl Sample for u16 {
    const FORMAT: SampleFormat = SampleFormat::U16;
    const EFF_BITS: u32 = 16;
    const MID: u16 = 32_768;

    #[inline(always)]
    fn clamped(self) -> Self {
        self
    }
}

impl Sample for i16 {
    const FORMAT: SampleFormat = SampleFormat::S16;
    const EFF_BITS: u32 = 16;
    const MID: i16 = 0;

    #[inline(always)]
    fn clamped(self) -> Self {
        self
    }
}

impl Sample for u24 {
    const FORMAT: SampleFormat = SampleFormat::U24;
    const EFF_BITS: u32 = 24;
    const MID: u24 = u24(8_388_608);

    #[inline(always)]
    fn clamped(self) -> Self {
        u24(clamp_u24(self.0))
    }
}

impl Sample for i24 {
    const FORMAT: SampleFormat = SampleFormat::S24;
    const EFF_BITS: u32 = 24;
    const MID: i24 = i24(0);

    #[inline(always)]
    fn clamped(self) -> Self {
        i24(clamp_i24(self.0))
    }
}

impl Sample for u32 {
    const FORMAT: SampleFormat = SampleFormat::U32;
    const EFF_BITS: u32 = 32;
    const MID: u32 = 2_147_483_648;

    #[inline(always)]
    fn clamped(self) -> Self {
        self
    }
}

impl Sample for i32 {
    const FORMAT: SampleFormat = SampleFormat::S32;
    const EFF_BITS: u32 = 32;
    const MID: i32 = 0;

    #[inline(always)]
    fn clamped(self) -> Self {
        self
    }
}

impl Sample for f32 {
    const FORMAT: SampleFormat = SampleFormat::F32;
    const EFF_BITS: u32 = 24;
    const MID: f32 = 0.0;

    #[inline(always)]
    fn clamped(self) -> Self {
        clamp_f32(self)
    }
}

impl Sample for f64 {
    const FORMAT: SampleFormat = SampleFormat::F64;
    const EFF_BITS: u32 = 53;
    const MID: f64 = 0.0;

    #[inline(always)]
    fn clamped(self) -> Self {
        clamp_f64(self)
    }
}

macro_rules! impl_int_sample {
    ($t:ty, $signed:expr) => {
        impl IntSample for $t {
            const SIGNED: bool = $signed;
            const MIN: $t = <$t>::MIN;
            const MAX: $t = <$t>::MAX;
        }
    };
}

impl_int_sample!(u8, false);
impl_int_sample!(u16, false);
impl_int_sample!(u24, false);
impl_int_sample!(u32, false);
impl_int_sample!(i8, true);
impl_int_sample!(i16, true);
impl_int_sample!(i24, true);
impl_int_sample!(i32, true);

impl FloatSample for f32 {
    const HALF: f32 = 0.5;
}

impl FloatSample for f64 {
    const HALF: f64 = 0.5;
}

// Implementation for i24

impl i24 {
    /// The largest value that can be represented by this integer type.
    pub const MAX: i24 = i24(8_388_607);
    /// The smallest value that can be represented by this integer type.
    pub const MIN: i24 = i24(-8_388_608);
}

impl fmt::Display for i24 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i32> for i24 {
    fn from(val: i32) -> Self {
        i24(clamp_i24(val))
    }
}

impl From<i16> for i24 {
    fn from(val: i16) -> Self {
        i24(i32::from(val))
    }
}

impl From<i8> for i24 {
    fn from(val: i8) -> Self {
        i24(i32::from(val))
    }
}

// Implementation for u24

impl u24 {
    /// The largest value that can be represented by this integer type.
    pub const MAX: u24 = u24(16_777_215);
    /// The smallest value that can be represented by this integer type.
    pub const MIN: u24 = u24(0);
}

impl fmt::Display for u24 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for u24 {
    fn from(val: u32) -> Self {
        u24(clamp_u24(val))
    }
}

impl From<u16> for u24 {
    fn from(val: u16) -> Self {
        u24(u32::from(val))
    }
}

impl From<u8> for u24 {
    fn from(val: u8) -> Self {
        u24(u32::from(val))
    }
}

// Primitive casts for the 24-bit types.
//
// Casting out of a 24-bit type reads the clamped inner value. Casting into a 24-bit type first
// performs the primitive `as` cast to the 32-bit backing type, which saturates for floats, then
// clamps to the 24-bit range.

macro_rules! impl_as_primitive_from_24 {
    ($t:ident, $($to:ty),*) => {
        $(
            impl AsPrimitive<$to> for $t {
                #[inline(always)]
                fn as_(self) -> $to {
                    self.clamped().0 as $to
                }
            }
        )*
    };
}

macro_rules! impl_as_primitive_into_24 {
    ($t:ident, $inner:ty, $($from:ty),*) => {
        $(
            impl AsPrimitive<$t> for $from {
                #[inline(always)]
                fn as_(self) -> $t {
                    $t::from(self as $inner)
                }
            }
        )*
    };
}

impl_as_primitive_from_24!(i24, f32, f64, i64);
impl_as_primitive_from_24!(u24, f32, f64, i64);

impl_as_primitive_into_24!(i24, i32, f32, f64, i64);
impl_as_primitive_into_24!(u24, u32, f32, f64, i64);

#[cfg(test)]
mod tests {
    use super::{i24, u24, IntSample, Sample, SampleFormat};
    use num_traits::AsPrimitive;

    #[test]
    fn verify_zero_points() {
        assert_eq!(<u8 as Sample>::MID, 128);
        assert_eq!(<u16 as Sample>::MID, 32_768);
        assert_eq!(<u24 as Sample>::MID, u24(8_388_608));
        assert_eq!(<u32 as Sample>::MID, 2_147_483_648);

        assert_eq!(<i8 as Sample>::MID, 0);
        assert_eq!(<i16 as Sample>::MID, 0);
        assert_eq!(<i24 as Sample>::MID, i24(0));
        assert_eq!(<i32 as Sample>::MID, 0);

        assert_eq!(<f32 as Sample>::MID, 0.0);
        assert_eq!(<f64 as Sample>::MID, 0.0);
    }

    #[test]
    fn verify_int_sample_limits() {
        assert!(!<u8 as IntSample>::SIGNED);
        assert!(!<u24 as IntSample>::SIGNED);
        assert!(<i16 as IntSample>::SIGNED);
        assert!(<i24 as IntSample>::SIGNED);

        assert_eq!(<u8 as IntSample>::MAX, 255);
        assert_eq!(<i16 as IntSample>::MIN, -32_768);
        assert_eq!(<i24 as IntSample>::MIN, i24(-8_388_608));
        assert_eq!(<i24 as IntSample>::MAX, i24(8_388_607));
        assert_eq!(<u24 as IntSample>::MAX, u24(16_777_215));
        assert_eq!(<i32 as IntSample>::MAX, i32::MAX);

        // The unsigned zero point is one above the halfway point of the range.
        assert_eq!(<u8 as IntSample>::MAX / 2 + 1, <u8 as Sample>::MID);
        assert_eq!(<u32 as IntSample>::MAX / 2 + 1, <u32 as Sample>::MID);
    }

    #[test]
    fn verify_24bit_construction_clamps() {
        assert_eq!(i24::from(9_000_000i32), i24::MAX);
        assert_eq!(i24::from(-9_000_000i32), i24::MIN);
        assert_eq!(i24::from(-1i8), i24(-1));
        assert_eq!(u24::from(u32::MAX), u24::MAX);
        assert_eq!(u24::from(255u8), u24(255));

        assert_eq!(i24(9_000_000).clamped(), i24::MAX);
        assert_eq!(u24(20_000_000).clamped(), u24::MAX);
    }

    #[test]
    fn verify_24bit_casts() {
        let code: i24 = 8_388_607.9f32.as_();
        assert_eq!(code, i24::MAX);

        let code: i24 = 1.0e12f64.as_();
        assert_eq!(code, i24::MAX);

        let code: u24 = (-3.0f64).as_();
        assert_eq!(code, u24::MIN);

        let code: u24 = 1_234i64.as_();
        assert_eq!(code, u24(1_234));

        let val: f64 = i24(9_000_000).as_();
        assert_eq!(val, 8_388_607.0);

        let val: i64 = u24::MAX.as_();
        assert_eq!(val, 16_777_215);
    }

    #[test]
    fn verify_sample_format() {
        assert_eq!(<u8 as Sample>::FORMAT, SampleFormat::U8);
        assert_eq!(<u32 as Sample>::FORMAT, SampleFormat::U32);
        assert_eq!(<i24 as Sample>::FORMAT, SampleFormat::S24);
        assert_eq!(<f64 as Sample>::FORMAT, SampleFormat::F64);
    }
}
