//! End-to-end realisation tests: model evaluation, amplitude draws,
//! Hermitian enforcement and the inverse transform together.

use num_complex::Complex64;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use skewer_core::fft::fftn;
use skewer_core::Units;
use skewer_realise::{imaginary_residual, is_hermitian, real_part, GaussianFieldGenerator};
use skewer_test_utils::{assert_close, box_grid, inverse_square_model, unit_grid, white_noise_model};

#[test]
fn four_cubed_box_has_zero_mean_mode() {
    let grid = unit_grid(4);
    let generator = GaussianFieldGenerator::builder().seed(11).build();
    let mut rng = ChaCha8Rng::seed_from_u64(11);
    let amps = generator
        .fourier_amplitudes(&inverse_square_model(), &grid, &mut rng)
        .unwrap();
    assert_eq!(amps[[0, 0, 0]], Complex64::new(0.0, 0.0));

    let field = generator.realise(&inverse_square_model(), &grid, 0).unwrap();
    let mean = real_part(&field).mean().unwrap();
    assert!(mean.abs() < 1e-14, "mean {mean}");
}

#[test]
fn realised_field_is_real() {
    let generator = GaussianFieldGenerator::builder().seed(5).build();
    for shape in [[4, 4, 4], [5, 6, 7], [8, 3, 1]] {
        let field = generator
            .realise(&inverse_square_model(), &box_grid(shape), 2)
            .unwrap();
        let residual = imaginary_residual(&field);
        assert!(residual < 1e-10, "shape {shape:?}: residual {residual}");
        assert!(is_hermitian(&fftn(&field), 1e-9));
    }
}

#[test]
fn determinism_same_seed_same_field() {
    let grid = unit_grid(6);
    let model = inverse_square_model();
    let a = GaussianFieldGenerator::builder().seed(99).build();
    let b = GaussianFieldGenerator::builder().seed(99).build();
    assert_eq!(a.realise(&model, &grid, 3).unwrap(), b.realise(&model, &grid, 3).unwrap());
    assert_ne!(a.realise(&model, &grid, 3).unwrap(), a.realise(&model, &grid, 4).unwrap());
}

#[test]
fn caller_rng_matches_derived_stream() {
    let grid = unit_grid(4);
    let model = inverse_square_model();
    let generator = GaussianFieldGenerator::builder().seed(0b1010).build();
    let mut rng = ChaCha8Rng::seed_from_u64(0b1010 ^ 0b0110);
    let explicit = generator.realise_with_rng(&model, &grid, &mut rng).unwrap();
    assert_eq!(explicit, generator.realise(&model, &grid, 0b0110).unwrap());
}

#[test]
fn white_noise_power_is_recovered() {
    let amplitude = 2.0;
    let grid = unit_grid(16);
    let generator = GaussianFieldGenerator::builder()
        .seed(2024)
        .units(Units::Length)
        .build();
    let field = generator.realise(&white_noise_model(amplitude), &grid, 0).unwrap();
    let spectrum = fftn(&field);
    let (sum, count) = spectrum
        .indexed_iter()
        .filter(|(idx, _)| *idx != (0, 0, 0))
        .fold((0.0, 0usize), |(s, c), (_, v)| (s + v.norm_sqr(), c + 1));
    let mean_power = sum / count as f64;
    assert!(
        (mean_power / amplitude - 1.0).abs() < 0.1,
        "mean power {mean_power}"
    );
}

#[test]
fn pre_evaluated_power_matches_model_path() {
    let grid = unit_grid(4);
    let generator = GaussianFieldGenerator::builder().build();
    let power = ndarray::Array3::from_elem((4, 4, 4), 3.0);
    let mut a = ChaCha8Rng::seed_from_u64(8);
    let mut b = ChaCha8Rng::seed_from_u64(8);
    let from_power = generator.realise_from_power(&power, &grid, &mut a).unwrap();
    let from_model = generator
        .realise_with_rng(&white_noise_model(3.0), &grid, &mut b)
        .unwrap();
    for (x, y) in from_power.iter().zip(from_model.iter()) {
        assert_close(x.re, y.re, 1e-12);
        assert_close(x.im, y.im, 1e-12);
    }
}
