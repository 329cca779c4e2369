// Sampleconv Check Tool
// Copyright (c) 2024 The Sampleconv Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

#![warn(rust_2018_idioms)]
#![forbid(unsafe_code)]

mod check;

use sampleconv_core::errors::Result;
use sampleconv_core::sample::{i24, u24, SampleFormat};

use clap::{value_parser, Arg, ArgAction};
use log::info;

use check::{run_check, CheckOptions, CheckResult};

/// Instantiates the checks for the fixed-point format with the floating-point type `$float`.
macro_rules! dispatch {
    ($format:expr, $float:ty, $opts:expr, $res:expr) => {
        match $format {
            SampleFormat::U8 => run_check::<u8, $float>($opts, $res),
            SampleFormat::U16 => run_check::<u16, $float>($opts, $res),
            SampleFormat::U24 => run_check::<u24, $float>($opts, $res),
            SampleFormat::U32 => run_check::<u32, $float>($opts, $res),
            SampleFormat::S8 => run_check::<i8, $float>($opts, $res),
            SampleFormat::S16 => run_check::<i16, $float>($opts, $res),
            SampleFormat::S24 => run_check::<i24, $float>($opts, $res),
            SampleFormat::S32 => run_check::<i32, $float>($opts, $res),
            // Not offered as a possible value.
            SampleFormat::F32 | SampleFormat::F64 => unreachable!(),
        }
    };
}

fn parse_format(name: &str) -> Option<SampleFormat> {
    match name {
        "u8" => Some(SampleFormat::U8),
        "u16" => Some(SampleFormat::U16),
        "u24" => Some(SampleFormat::U24),
        "u32" => Some(SampleFormat::U32),
        "s8" => Some(SampleFormat::S8),
        "s16" => Some(SampleFormat::S16),
        "s24" => Some(SampleFormat::S24),
        "s32" => Some(SampleFormat::S32),
        _ => None,
    }
}

/// Converts a user-supplied code stride to `usize`. Returns `None` if it does not fit.
fn code_stride(step: u64) -> Option<usize> {
    usize::try_from(step).ok()
}

fn run_test(format: SampleFormat, float: SampleFormat, opts: &CheckOptions, res: &mut CheckResult) -> Result<()> {
    info!("checking {:?} through {:?}", format, float);

    match float {
        SampleFormat::F64 => dispatch!(format, f64, opts, res),
        _ => dispatch!(format, f32, opts, res),
    }
}

fn main() {
    pretty_env_logger::init();

    let matches = clap::Command::new("Sampleconv Check")
        .version("1.0")
        .about("Check the sample converter round-trips and quantizes monotonically")
        .arg(
            Arg::new("format")
                .long("format")
                .value_parser(["u8", "u16", "u24", "u32", "s8", "s16", "s24", "s32"])
                .default_value("s16")
                .help("The fixed-point sample format to check"),
        )
        .arg(
            Arg::new("float")
                .long("float")
                .value_parser(["f32", "f64"])
                .default_value("f32")
                .help("The floating-point sample format to reconstruct to"),
        )
        .arg(
            Arg::new("tolerance")
                .long("tolerance")
                .value_parser(value_parser!(u64))
                .default_value("1")
                .help("The maximum allowable round-trip deviation in codes"),
        )
        .arg(
            Arg::new("step")
                .long("step")
                .value_parser(value_parser!(u64).range(1..))
                .help("Check every N-th code (default: 1, or 65537 for 32-bit formats)"),
        )
        .arg(
            Arg::new("sweep")
                .long("sweep")
                .value_parser(value_parser!(u32).range(1..))
                .default_value("100000")
                .help("The number of intervals in the monotonicity sweep"),
        )
        .arg(
            Arg::new("samples")
                .long("samples")
                .action(ArgAction::SetTrue)
                .help("Print failures per sample"),
        )
        .arg(
            Arg::new("stop-after-fail")
                .long("first-fail")
                .short('f')
                .action(ArgAction::SetTrue)
                .help("Stop testing after the first failure"),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .short('q')
                .action(ArgAction::SetTrue)
                .help("Only print test results"),
        )
        .get_matches();

    let format = match matches.get_one::<String>("format").and_then(|name| parse_format(name)) {
        Some(format) => format,
        None => {
            eprintln!("Unsupported sample format");
            std::process::exit(2);
        }
    };

    let float = match matches.get_one::<String>("float").map(String::as_str) {
        Some("f64") => SampleFormat::F64,
        _ => SampleFormat::F32,
    };

    let step = match matches.get_one::<u64>("step").copied().map(code_stride) {
        Some(Some(step)) => Some(step),
        Some(None) => {
            eprintln!("Step is too large for this platform");
            std::process::exit(2);
        }
        None => None,
    };

    let opts = CheckOptions {
        tolerance: matches.get_one::<u64>("tolerance").copied().unwrap_or(1),
        step,
        sweep: matches.get_one::<u32>("sweep").copied().unwrap_or(100_000),
        is_per_sample: matches.get_flag("samples"),
        is_quiet: matches.get_flag("quiet"),
        stop_after_fail: matches.get_flag("stop-after-fail"),
    };

    let mut res: CheckResult = Default::default();

    println!("Format: {:?} through {:?}", format, float);
    println!();

    if let Err(err) = run_test(format, float, &opts, &mut res) {
        eprintln!("Test interrupted by error: {}", err);
        std::process::exit(2);
    }

    if !opts.is_quiet {
        println!();
    }

    println!("Test Results");
    println!("=================================================");
    println!();
    println!("  Failed/Total Codes:    {:>12}/{:>12}", res.n_failed_codes, res.n_codes);
    println!("  Deviating Codes:       {:>12}", res.n_deviating_codes);
    println!("  Inversions/Probes:     {:>12}/{:>12}", res.n_inversions, res.n_probes);
    println!();
    println!("  Absolute Maximum Code Delta:         {}", res.abs_max_delta);
    println!();

    let ret = if res.is_pass() {
        println!("PASS");
        0
    }
    else {
        println!("FAIL");
        1
    };
    println!();

    std::process::exit(ret);
}
