// Sampleconv
// Copyright (c) 2024 The Sampleconv Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The `conv` module provides methods to convert samples between normalized floating-point and
//! fixed-point sample formats.
//!
//! A normalized floating-point sample nominally lies within [-1.0, 1.0]. A fixed-point sample is
//! an integer code of a fixed width and signedness whose zero point (silence) is 0 for signed
//! formats and `2^(W-1)` for unsigned W-bit formats. Quantization (float to code) is lossy,
//! whereas reconstructing a code and quantizing it again yields the same code, provided the
//! floating-point type represents every code of the format exactly.
use log::debug;
use num_traits::AsPrimitive;

use crate::errors::{length_mismatch_error, out_of_bounds_error, Result};
use crate::sample::{i24, u24, FloatSample, IntSample, Sample};

/// Returns the zero point (silence) of the sample type `S`.
///
/// This is 0 for signed fixed-point and all floating-point types, and `2^(W-1)` for unsigned
/// W-bit fixed-point types.
#[inline(always)]
pub fn zero_point<S: Sample>() -> S {
    S::MID
}

/// Clips a floating-point sample to the [-1.0, 1.0] range.
///
/// A value within range is returned unchanged, otherwise the nearer bound is returned.
#[inline(always)]
pub fn clip<F: FloatSample>(value: F) -> F {
    value.clamped()
}

/// Clips a floating-point sample to the [-1.0, 1.0] range in-place.
#[inline(always)]
pub fn clip_in_place<F: FloatSample>(value: &mut F) {
    *value = clip(*value);
}

/// Clips every sample of a slice to the [-1.0, 1.0] range in-place.
pub fn clip_slice<F: FloatSample>(values: &mut [F]) {
    values.iter_mut().for_each(clip_in_place);
}

/// Rounds a floating-point value to the nearest integer. Ties are rounded to the even neighbour.
///
/// The value is first truncated towards zero. If the magnitude of the discarded remainder exceeds
/// one half, the truncated value is moved one unit away from zero. If the remainder is exactly one
/// half, it is moved away from zero only if that neighbour is even.
///
/// ```
/// use sampleconv_core::conv::round;
///
/// assert_eq!(round(2.5f64), 2.0);
/// assert_eq!(round(3.5f64), 4.0);
/// assert_eq!(round(-2.5f64), -2.0);
/// assert_eq!(round(-2.7f64), -3.0);
/// ```
#[inline]
pub fn round<F: FloatSample>(value: F) -> F {
    let truncated = value.trunc();
    let remainder = (value - truncated).abs();

    // The neighbour of the truncated value that lies further from zero.
    let away = truncated.abs() + F::one();
    let two = F::one() + F::one();

    let round_away =
        remainder > F::HALF || (remainder == F::HALF && away % two == F::zero());

    if !round_away {
        truncated
    }
    else if value < F::zero() {
        truncated - F::one()
    }
    else {
        truncated + F::one()
    }
}

/// Rounds every sample of a slice in-place. See [`round`].
pub fn round_slice<F: FloatSample>(values: &mut [F]) {
    for value in values.iter_mut() {
        *value = round(*value);
    }
}

/// Quantizes a normalized floating-point sample to a fixed-point code of type `I`.
///
/// The value is not clipped. An out-of-range value saturates to the limits of `I`. Exact silence
/// and NaN quantize to the zero point of `I`.
/// Otherwise, for signed codes, negative values
/// are scaled by the magnitude of `I::MIN` and non-negative values by `I::MAX`, and rounded with
/// [`round`]. For unsigned codes, negative values are scaled into `[0, MID]` and rounded, whereas
/// positive values are scaled into `[MID, MAX]` and truncated.
#[inline]
pub fn float_to_int<F, I>(value: F) -> I
where
    F: FloatSample + AsPrimitive<I>,
    I: IntSample + AsPrimitive<F>,
{
    if value == F::zero() || value.is_nan() {
        return I::MID;
    }

    // Note: A `<float> as <integer>` cast saturates to the bounds of the integer. The final cast of
    // each branch below is therefore always a valid code of `I`.
    if !I::SIGNED {
        let mid: F = I::MID.as_();

        if value < F::zero() {
            round(mid + value * mid).as_()
        }
        else {
            (value * (mid - F::one()) + mid).as_()
        }
    }
    else if value < F::zero() {
        let min: F = I::MIN.as_();
        round(-value * min).as_()
    }
    else {
        let max: F = I::MAX.as_();
        round(value * max).as_()
    }
}

/// Reconstructs a normalized floating-point sample from a fixed-point code of type `I`.
///
/// The zero point of `I` reconstructs to exactly 0.0. Codes below the zero point are scaled by the
/// distance from the zero point to `I::MIN`, and codes above it by the distance to `I::MAX`, such
/// that `I::MIN` maps to -1.0 and `I::MAX` maps to 1.0.
#[inline]
pub fn int_to_float<I, F>(value: I) -> F
where
    I: IntSample + AsPrimitive<F>,
    F: FloatSample,
{
    if value == I::MID {
        return F::zero();
    }

    let code: F = value.as_();

    if !I::SIGNED {
        let mid: F = I::MID.as_();

        if value < I::MID {
            (code - mid) / mid
        }
        else {
            (code - mid) / (mid - F::one())
        }
    }
    else if value < I::MID {
        let min: F = I::MIN.as_();
        code / -min
    }
    else {
        let max: F = I::MAX.as_();
        code / max
    }
}

fn convert_into<S, D, C>(src: &[S], dst: &mut [D], conv: C) -> Result<()>
where
    S: Copy,
    C: Fn(S) -> D,
{
    if src.len() != dst.len() {
        debug!("sequence length mismatch: src={}, dst={}", src.len(), dst.len());
        return length_mismatch_error(src.len(), dst.len());
    }

    for (d, &s) in dst.iter_mut().zip(src) {
        *d = conv(s);
    }

    Ok(())
}

fn convert_into_n<S, D, C>(src: &[S], dst: &mut [D], len: usize, conv: C) -> Result<()>
where
    S: Copy,
    C: Fn(S) -> D,
{
    if len > src.len() || len > dst.len() {
        debug!("sequence length out of bounds: len={}, src={}, dst={}", len, src.len(), dst.len());
        return out_of_bounds_error(len, src.len(), dst.len());
    }

    convert_into(&src[..len], &mut dst[..len], conv)
}

/// Quantizes a slice of floating-point samples into a new vector of fixed-point codes.
pub fn float_to_int_vec<F, I>(src: &[F]) -> Vec<I>
where
    F: FloatSample + AsPrimitive<I>,
    I: IntSample + AsPrimitive<F>,
{
    src.iter().map(|&s| float_to_int(s)).collect()
}

/// Quantizes a slice of floating-point samples into an equal-length slice of fixed-point codes.
///
/// Returns an error, and leaves `dst` untouched, if the slices differ in length.
pub fn float_to_int_slice<F, I>(src: &[F], dst: &mut [I]) -> Result<()>
where
    F: FloatSample + AsPrimitive<I>,
    I: IntSample + AsPrimitive<F>,
{
    convert_into(src, dst, float_to_int)
}

/// Quantizes the first `len` floating-point samples of `src` into the first `len` codes of `dst`.
///
/// Returns an error, and leaves `dst` untouched, if `len` exceeds the length of either slice.
pub fn float_to_int_slice_n<F, I>(src: &[F], dst: &mut [I], len: usize) -> Result<()>
where
    F: FloatSample + AsPrimitive<I>,
    I: IntSample + AsPrimitive<F>,
{
    convert_into_n(src, dst, len, float_to_int)
}

/// Reconstructs a slice of fixed-point codes into a new vector of floating-point samples.
pub fn int_to_float_vec<I, F>(src: &[I]) -> Vec<F>
where
    I: IntSample + AsPrimitive<F>,
    F: FloatSample,
{
    src.iter().map(|&s| int_to_float(s)).collect()
}

/// Reconstructs a slice of fixed-point codes into an equal-length slice of floating-point samples.
///
/// Returns an error, and leaves `dst` untouched, if the slices differ in length.
pub fn int_to_float_slice<I, F>(src: &[I], dst: &mut [F]) -> Result<()>
where
    I: IntSample + AsPrimitive<F>,
    F: FloatSample,
{
    convert_into(src, dst, int_to_float)
}

/// Reconstructs the first `len` codes of `src` into the first `len` samples of `dst`.
///
/// Returns an error, and leaves `dst` untouched, if `len` exceeds the length of either slice.
pub fn int_to_float_slice_n<I, F>(src: &[I], dst: &mut [F], len: usize) -> Result<()>
where
    I: IntSample + AsPrimitive<F>,
    F: FloatSample,
{
    convert_into_n(src, dst, len, int_to_float)
}

/// `FromSample` implements a conversion from `Sample` type `F` to `Self`.
///
/// Conversions from floating-point to fixed-point samples are lossy. No dithering is applied.
pub trait FromSample<F> {
    fn from_sample(val: F) -> Self;
}

macro_rules! impl_convert {
    ($from:ty, $to:ty, $sample:ident, $func:expr) => {
        impl FromSample<$from> for $to {
            #[inline(always)]
            fn from_sample($sample: $from) -> Self {
                $func
            }
        }
    };
}

macro_rules! impl_convert_float_int {
    ($float:ty, $($int:ty),*) => {
        $(
            impl_convert!($float, $int, s, float_to_int(s));
            impl_convert!($int, $float, s, int_to_float(s));
        )*
    };
}

impl_convert_float_int!(f32, u8, u16, u24, u32, i8, i16, i24, i32);
impl_convert_float_int!(f64, u8, u16, u24, u32, i8, i16, i24, i32);

/// `IntoSample` implements a conversion from `Self` to `Sample` type `T`.
///
/// Conversions from floating-point to fixed-point samples are lossy. No dithering is applied.
pub trait IntoSample<T> {
    fn into_sample(self) -> T;
}

impl<F, T: FromSample<F>> IntoSample<T> for F {
    #[inline]
    fn into_sample(self) -> T {
        T::from_sample(self)
    }
}

/// `ReversibleSample` is implemented for every fixed-point `Sample` type that converts to and from
/// the floating-point `Sample` type `F`.
pub trait ReversibleSample<F>: IntSample + FromSample<F> + IntoSample<F> {}
impl<F, T> ReversibleSample<F> for T where T: IntSample + FromSample<F> + IntoSample<F> {}
