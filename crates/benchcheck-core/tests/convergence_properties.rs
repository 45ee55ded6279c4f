//! Reflexivity and monotonicity of the convergence test.

use benchcheck_core::{error_percentage, normalize_samples, ConvergenceTest, ConvergenceTolerance};

const W: u32 = 32;
const H: u32 = 24;

/// Deterministic pseudo-random RGB8 image (LCG, no rand dep).
fn noise_image(seed: u64) -> Vec<u8> {
    let mut state = seed;
    (0..(W * H * 3))
        .map(|_| {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
            (state >> 33) as u8
        })
        .collect()
}

/// Invert the first `count` pixels in a fixed scattered order.
fn perturb(base: &[u8], count: usize) -> Vec<u8> {
    let pixels = (W * H) as usize;
    let mut out = base.to_vec();
    for i in 0..count {
        let px = (i * 7919) % pixels;
        for c in 0..3 {
            out[px * 3 + c] = 255 - out[px * 3 + c];
        }
    }
    out
}

fn diff_count(reference: &[u8], candidate: &[u8]) -> usize {
    let mut conv = ConvergenceTest::new(W, H);
    conv.test(&normalize_samples(reference)).unwrap();
    conv.test(&normalize_samples(candidate)).unwrap()
}

#[test]
fn identical_images_are_reflexive() {
    for seed in [1, 42, 0xDEAD_BEEF] {
        let image = noise_image(seed);
        let diff = diff_count(&image, &image);
        assert_eq!(diff, 0);
        assert_eq!(
            format!("{:.2}", error_percentage(diff, (W * H) as usize)),
            "0.00"
        );
    }
}

#[test]
fn solid_black_and_white_are_reflexive() {
    for value in [0u8, 255] {
        let image = vec![value; (W * H * 3) as usize];
        assert_eq!(diff_count(&image, &image), 0);
    }
}

#[test]
fn more_perturbed_pixels_never_lower_the_count() {
    let base = noise_image(7);
    let mut previous = 0;
    for count in [0, 1, 2, 5, 10, 50, 100, 300, 768] {
        let diff = diff_count(&base, &perturb(&base, count));
        assert!(
            diff >= previous,
            "diff dropped from {previous} to {diff} at {count} perturbed pixels"
        );
        assert!(diff <= count);
        previous = diff;
    }
}

#[test]
fn comparison_is_against_first_image() {
    let reference = vec![64u8; (W * H * 3) as usize];
    let candidate = vec![250u8; (W * H * 3) as usize];
    assert_eq!(diff_count(&reference, &candidate), (W * H) as usize);
}

#[test]
fn looser_color_tolerance_never_counts_more() {
    let base = noise_image(99);
    let candidate = perturb(&base, 200);

    let count_with = |tolerance: ConvergenceTolerance| {
        let mut conv = ConvergenceTest::with_tolerance(W, H, tolerance);
        conv.test(&normalize_samples(&base)).unwrap();
        conv.test(&normalize_samples(&candidate)).unwrap()
    };

    let strict = count_with(ConvergenceTolerance {
        color_tolerance: 2.0,
        ..ConvergenceTolerance::default()
    });
    let loose = count_with(ConvergenceTolerance {
        color_tolerance: 80.0,
        ..ConvergenceTolerance::default()
    });
    assert!(loose <= strict);
}
