// Sampleconv
// Copyright (c) 2024 The Sampleconv Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The `util` module provides a repository of commonly used utility functions sorted into distinct
//! categories.

pub mod clamp {
    //! Utilities for clamping numeric values to a defined range.

    /// Clamps the given value to the [0, 16_777_215] range.
    #[inline]
    pub fn clamp_u24(val: u32) -> u32 {
        if val & !0x00ff_ffff == 0 { val } else { 0x00ff_ffff }
    }

    /// Clamps the given value to the [-8_388_608, 8_388_607] range.
    #[inline]
    pub fn clamp_i24(val: i32) -> i32 {
        // Offset the value by 2^23 so that the valid range maps to [0, 2^24). A valid value then has
        // no bits set above the 24th bit. If the offset wraps, the value is still far outside the
        // valid range and the test still fails.
        if val.wrapping_add(0x0080_0000) & !0x00ff_ffff == 0 {
            val
        }
        else {
            // The sign bit selects the limit: 0x007f_ffff ^ 0x0000_0000 = 8_388_607, and
            // 0x007f_ffff ^ 0xffff_ffff = -8_388_608.
            0x007f_ffff ^ val.wrapping_shr(31)
        }
    }

    /// Clamps the given value to the [-1.0, 1.0] range.
    ///
    /// NaN is returned unchanged.
    #[inline]
    pub fn clamp_f32(val: f32) -> f32 {
        let mut clamped = val;
        clamped = if clamped > 1.0 { 1.0 } else { clamped };
        clamped = if clamped < -1.0 { -1.0 } else { clamped };
        clamped
    }

    /// Clamps the given value to the [-1.0, 1.0] range.
    ///
    /// NaN is returned unchanged.
    #[inline]
    pub fn clamp_f64(val: f64) -> f64 {
        let mut clamped = val;
        clamped = if clamped > 1.0 { 1.0 } else { clamped };
        clamped = if clamped < -1.0 { -1.0 } else { clamped };
        clamped
    }

}
