// Sampleconv Check Tool
// Copyright (c) 2024 The Sampleconv Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::fmt;

use log::{info, warn};
use num_traits::AsPrimitive;

use sampleconv_core::conv::{float_to_int, float_to_int_slice, int_to_float_slice};
use sampleconv_core::errors::Result;
use sampleconv_core::sample::{FloatSample, IntSample};

/// The number of codes converted per call to the sequence converters.
const CHUNK_LEN: usize = 4096;

/// The default stride through the codes of formats 32 bits or wider. Visits roughly 2^16 codes.
const DEFAULT_WIDE_STEP: usize = 65_537;

pub struct CheckOptions {
    /// The maximum allowable round-trip deviation in codes.
    pub tolerance: u64,
    /// The stride through the codes of the format. If `None`, every code is visited for formats
    /// narrower than 32 bits.
    pub step: Option<usize>,
    /// The number of intervals the [-1.0, 1.0] range is divided into for the monotonicity sweep.
    pub sweep: u32,
    pub is_quiet: bool,
    pub is_per_sample: bool,
    pub stop_after_fail: bool,
}

impl Default for CheckOptions {
    fn default() -> Self {
        CheckOptions {
            tolerance: 1,
            step: None,
            sweep: 100_000,
            is_quiet: false,
            is_per_sample: false,
            stop_after_fail: false,
        }
    }
}

#[derive(Default)]
pub struct CheckResult {
    pub n_codes: u64,
    pub n_deviating_codes: u64,
    pub n_failed_codes: u64,
    pub abs_max_delta: u64,
    pub n_probes: u64,
    pub n_inversions: u64,
}

impl CheckResult {
    pub fn is_pass(&self) -> bool {
        self.n_failed_codes == 0 && self.n_inversions == 0
    }
}

/// Reconstructs each visited code of `I` to `F`, quantizes it back to `I`, and accounts for the
/// deviation from the original code.
pub fn run_round_trip<I, F>(opts: &CheckOptions, acct: &mut CheckResult) -> Result<()>
where
    I: IntSample + AsPrimitive<F> + AsPrimitive<i64> + fmt::Display,
    F: FloatSample + AsPrimitive<I> + fmt::Display,
    i64: AsPrimitive<I>,
{
    let lo = AsPrimitive::<i64>::as_(I::MIN);
    let hi = AsPrimitive::<i64>::as_(I::MAX);

    let step = opts.step.unwrap_or(if I::EFF_BITS >= 32 { DEFAULT_WIDE_STEP } else { 1 }).max(1);

    // The stride may skip over the largest code. Always visit it.
    let tail = if (hi - lo).unsigned_abs() % step as u64 != 0 { Some(hi) } else { None };

    let mut code_iter = (lo..=hi).step_by(step).chain(tail).map(AsPrimitive::<I>::as_);

    info!("round-trip: {:?} through {:?}, stride={}", I::FORMAT, F::FORMAT, step);

    let mut codes: Vec<I> = Vec::with_capacity(CHUNK_LEN);
    let mut floats = vec![F::zero(); CHUNK_LEN];
    let mut requantized = vec![I::MID; CHUNK_LEN];

    loop {
        codes.clear();
        codes.extend(code_iter.by_ref().take(CHUNK_LEN));

        if codes.is_empty() {
            break;
        }

        let n = codes.len();

        int_to_float_slice(&codes, &mut floats[..n])?;
        float_to_int_slice(&floats[..n], &mut requantized[..n])?;

        for ((&code, &val), &back) in codes.iter().zip(&floats[..n]).zip(&requantized[..n]) {
            let code_num = AsPrimitive::<i64>::as_(code);
            let back_num = AsPrimitive::<i64>::as_(back);

            let delta = code_num.abs_diff(back_num);

            if delta > 0 {
                acct.n_deviating_codes += 1;
            }

            if delta > opts.tolerance {
                // Print per-sample or only the first failure based on selected options.
                if !opts.is_quiet && (opts.is_per_sample || acct.n_failed_codes == 0) {
                    println!(
                        "[FAIL] code={:>12}, float={:+.12}, back={:>12} ({:+})",
                        code,
                        val,
                        back,
                        back_num - code_num
                    );
                }

                acct.n_failed_codes += 1;
            }

            acct.abs_max_delta = acct.abs_max_delta.max(delta);
            acct.n_codes += 1;
        }

        if opts.stop_after_fail && acct.n_failed_codes > 0 {
            warn!("round-trip: stopping after first failed chunk");
            break;
        }
    }

    info!("round-trip: visited {} codes", acct.n_codes);

    Ok(())
}

/// Quantizes an ascending sweep of probe points over [-1.0, 1.0] and counts every probe whose code
/// is less than the code of the probe before it.
pub fn run_monotonic<I, F>(opts: &CheckOptions, acct: &mut CheckResult)
where
    I: IntSample + AsPrimitive<F> + fmt::Display,
    F: FloatSample + AsPrimitive<I> + fmt::Display,
    u32: AsPrimitive<F>,
{
    let n_intervals = opts.sweep.max(1);

    info!("monotonicity: {:?} from {:?}, probes={}", I::FORMAT, F::FORMAT, u64::from(n_intervals) + 1);

    let two = F::one() + F::one();
    let scale = two / AsPrimitive::<F>::as_(n_intervals);

    let mut prev: Option<(F, I)> = None;

    for k in 0..=n_intervals {
        let val = AsPrimitive::<F>::as_(k) * scale - F::one();
        let code: I = float_to_int(val);

        if let Some((prev_val, prev_code)) = prev {
            if code < prev_code {
                if !opts.is_quiet && (opts.is_per_sample || acct.n_inversions == 0) {
                    println!(
                        "[FAIL] float={:+.12} -> {:>12}, but float={:+.12} -> {:>12}",
                        prev_val, prev_code, val, code
                    );
                }

                acct.n_inversions += 1;
            }
        }

        prev = Some((val, code));
        acct.n_probes += 1;

        if opts.stop_after_fail && acct.n_inversions > 0 {
            warn!("monotonicity: stopping after first inversion");
            break;
        }
    }
}

/// Runs all checks for the format pair.
pub fn run_check<I, F>(opts: &CheckOptions, acct: &mut CheckResult) -> Result<()>
where
    I: IntSample + AsPrimitive<F> + AsPrimitive<i64> + fmt::Display,
    F: FloatSample + AsPrimitive<I> + fmt::Display,
    i64: AsPrimitive<I>,
    u32: AsPrimitive<F>,
{
    run_round_trip::<I, F>(opts, acct)?;

    if !(opts.stop_after_fail && acct.n_failed_codes > 0) {
        run_monotonic::<I, F>(opts, acct);
    }

    Ok(())
}
