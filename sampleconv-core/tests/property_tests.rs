use num_traits::AsPrimitive;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use sampleconv_core::conv::{
    clip, clip_slice, float_to_int, float_to_int_slice, float_to_int_slice_n, float_to_int_vec,
    int_to_float, int_to_float_slice, int_to_float_slice_n, int_to_float_vec, round, round_slice,
};
use sampleconv_core::sample::{i24, u24, FloatSample, IntSample};

/// Ascending probe points over [-1.0, 1.0]: a uniform grid, a seeded random sample, and points
/// hugging zero and the limits.
fn probe_points(seed: u64) -> Vec<f64> {
    let mut points: Vec<f64> = (0..=20_000i32).map(|i| -1.0 + f64::from(i) / 10_000.0).collect();

    let mut rng = SmallRng::seed_from_u64(seed);
    points.extend((0..20_000).map(|_| rng.random_range(-1.0..=1.0)));

    for tiny in [1.0e-300, f64::MIN_POSITIVE, 1.0e-12, 1.0e-7, f64::EPSILON] {
        points.push(tiny);
        points.push(-tiny);
        points.push(1.0 - tiny);
        points.push(-1.0 + tiny);
    }

    points.retain(|p| p.abs() <= 1.0);
    points.sort_by(|a, b| a.total_cmp(b));
    points
}

fn check_monotonic<F, I>(points: &[F])
where
    F: FloatSample + AsPrimitive<I>,
    I: IntSample + AsPrimitive<F>,
{
    let codes: Vec<I> = float_to_int_vec(points);

    for (p, c) in points.windows(2).zip(codes.windows(2)) {
        assert!(c[0] <= c[1], "{:?} -> {:?}, but {:?} -> {:?}", p[0], c[0], p[1], c[1]);
    }
}

fn check_monotonic_all<F>(points: &[F])
where
    F: FloatSample
        + AsPrimitive<u8>
        + AsPrimitive<u16>
        + AsPrimitive<u24>
        + AsPrimitive<u32>
        + AsPrimitive<i8>
        + AsPrimitive<i16>
        + AsPrimitive<i24>
        + AsPrimitive<i32>,
    u8: AsPrimitive<F>,
    u16: AsPrimitive<F>,
    u24: AsPrimitive<F>,
    u32: AsPrimitive<F>,
    i8: AsPrimitive<F>,
    i16: AsPrimitive<F>,
    i24: AsPrimitive<F>,
    i32: AsPrimitive<F>,
{
    check_monotonic::<F, u8>(points);
    check_monotonic::<F, u16>(points);
    check_monotonic::<F, u24>(points);
    check_monotonic::<F, u32>(points);
    check_monotonic::<F, i8>(points);
    check_monotonic::<F, i16>(points);
    check_monotonic::<F, i24>(points);
    check_monotonic::<F, i32>(points);
}

#[test]
fn verify_quantization_is_monotonic() {
    let points = probe_points(0x0bad_cafe);
    check_monotonic_all::<f64>(&points);

    // Narrowing to f32 preserves the (non-strict) ordering.
    let points: Vec<f32> = points.iter().map(|&p| p as f32).collect();
    check_monotonic_all::<f32>(&points);
}

/// Random floats within [-1.0, 1.0] of a random length in 0..=1000.
fn random_floats<F>(rng: &mut SmallRng) -> Vec<F>
where
    f64: AsPrimitive<F>,
    F: FloatSample,
{
    let len = rng.random_range(0..=1000usize);
    (0..len).map(|_| AsPrimitive::<F>::as_(rng.random_range(-1.0f64..=1.0))).collect()
}

/// Random codes of a random length in 0..=1000.
fn random_codes<I>(rng: &mut SmallRng) -> Vec<I>
where
    I: IntSample + AsPrimitive<i64>,
    i64: AsPrimitive<I>,
{
    let lo: i64 = I::MIN.as_();
    let hi: i64 = I::MAX.as_();
    let len = rng.random_range(0..=1000usize);
    (0..len).map(|_| AsPrimitive::<I>::as_(rng.random_range(lo..=hi))).collect()
}

fn check_sequence_equivalence<F, I>(rng: &mut SmallRng)
where
    F: FloatSample + AsPrimitive<I>,
    I: IntSample + AsPrimitive<F> + AsPrimitive<i64>,
    f64: AsPrimitive<F>,
    i64: AsPrimitive<I>,
{
    // Quantization.
    let floats: Vec<F> = random_floats(rng);
    let expected: Vec<I> = floats.iter().map(|&s| float_to_int(s)).collect();

    assert_eq!(float_to_int_vec::<F, I>(&floats), expected);

    let mut codes = vec![I::MID; floats.len()];
    float_to_int_slice(&floats, &mut codes).unwrap();
    assert_eq!(codes, expected);

    let n = rng.random_range(0..=floats.len());
    let mut codes = vec![I::MID; floats.len() + 3];
    float_to_int_slice_n(&floats, &mut codes, n).unwrap();
    assert_eq!(codes[..n], expected[..n]);
    assert!(codes[n..].iter().all(|&c| c == I::MID));

    // Reconstruction.
    let codes: Vec<I> = random_codes(rng);
    let expected: Vec<F> = codes.iter().map(|&c| int_to_float(c)).collect();

    assert_eq!(int_to_float_vec::<I, F>(&codes), expected);

    let mut floats = vec![F::zero(); codes.len()];
    int_to_float_slice(&codes, &mut floats).unwrap();
    assert_eq!(floats, expected);

    let n = rng.random_range(0..=codes.len());
    let mut floats = vec![F::zero(); codes.len()];
    int_to_float_slice_n(&codes, &mut floats, n).unwrap();
    assert_eq!(floats[..n], expected[..n]);
    assert!(floats[n..].iter().all(|&f| f == F::zero()));
}

#[test]
fn verify_sequence_matches_scalar() {
    let mut rng = SmallRng::seed_from_u64(0x7e57_5eed);

    for _ in 0..16 {
        check_sequence_equivalence::<f32, u8>(&mut rng);
        check_sequence_equivalence::<f32, i16>(&mut rng);
        check_sequence_equivalence::<f32, i24>(&mut rng);
        check_sequence_equivalence::<f32, i32>(&mut rng);
        check_sequence_equivalence::<f64, u8>(&mut rng);
        check_sequence_equivalence::<f64, u16>(&mut rng);
        check_sequence_equivalence::<f64, u24>(&mut rng);
        check_sequence_equivalence::<f64, i16>(&mut rng);
        check_sequence_equivalence::<f64, i32>(&mut rng);
        check_sequence_equivalence::<f64, u32>(&mut rng);
    }
}

#[test]
fn verify_in_place_sequences_match_scalar() {
    let mut rng = SmallRng::seed_from_u64(0x1234_5678);

    for _ in 0..16 {
        let len = rng.random_range(0..=1000usize);
        let values: Vec<f64> = (0..len).map(|_| rng.random_range(-4.0..=4.0) * 1000.0).collect();

        let mut clipped = values.clone();
        clip_slice(&mut clipped);
        assert_eq!(clipped, values.iter().map(|&v| clip(v)).collect::<Vec<_>>());
        assert!(clipped.iter().all(|v| v.abs() <= 1.0));

        let mut rounded = values.clone();
        round_slice(&mut rounded);
        assert_eq!(rounded, values.iter().map(|&v| round(v)).collect::<Vec<_>>());
        assert!(rounded.iter().all(|v| v.fract() == 0.0));
    }
}

#[test]
fn verify_round_is_nearest() {
    let mut rng = SmallRng::seed_from_u64(0xfeed_f00d);

    for _ in 0..100_000 {
        let value: f64 = rng.random_range(-100_000.0..=100_000.0);
        let rounded = round(value);

        // Never further than one half from the input, and ties land on an even integer.
        assert!((rounded - value).abs() <= 0.5, "value={}, rounded={}", value, rounded);
        if (rounded - value).abs() == 0.5 {
            assert_eq!(rounded % 2.0, 0.0, "value={}, rounded={}", value, rounded);
        }
    }

    for i in -1000i32..=1000 {
        let tie = f64::from(i) + 0.5;
        let rounded = round(tie);
        assert_eq!(rounded % 2.0, 0.0, "tie={}", tie);
        assert_eq!((rounded - tie).abs(), 0.5);
    }
}
