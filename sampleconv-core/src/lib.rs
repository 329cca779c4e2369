// Sampleconv
// Copyright (c) 2024 The Sampleconv Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Bit-exact conversion between normalized floating-point samples and fixed-point integer sample
//! codes.
//!
//! The [`conv`] module contains the sample converter. The [`sample`] module defines the traits
//! that describe the supported sample types, and the 24-bit sample types.

pub mod conv;
pub mod errors;
pub mod sample;
pub mod util;
