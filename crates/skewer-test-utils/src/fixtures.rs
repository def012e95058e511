//! Reusable grids, fields and models.

use ndarray::{Array2, Array3};
use num_complex::Complex64;
use skewer_core::{ComplexField, Grid, RealField};
use skewer_spectrum::{PowerLaw, PowerSpectrumModel};
use std::f64::consts::TAU;

/// Cubic grid with unit spacing in both unit systems.
pub fn unit_grid(n: usize) -> Grid {
    Grid::new([n, n, n], [1.0; 3]).unwrap()
}

/// Grid with unit spacing and an arbitrary shape.
pub fn box_grid(shape: [usize; 3]) -> Grid {
    Grid::new(shape, [1.0; 3]).unwrap()
}

/// Unit-amplitude complex plane wave `exp(2πi m·x / N)`.
///
/// Its unnormalised transform is `N_voxels` at index `mode` and zero
/// elsewhere.
pub fn plane_wave(shape: [usize; 3], mode: [usize; 3]) -> ComplexField {
    Array3::from_shape_fn((shape[0], shape[1], shape[2]), |(i, j, l)| {
        let phase = TAU
            * (mode[0] as f64 * i as f64 / shape[0] as f64
                + mode[1] as f64 * j as f64 / shape[1] as f64
                + mode[2] as f64 * l as f64 / shape[2] as f64);
        Complex64::from_polar(1.0, phase)
    })
}

/// Real cosine wave `amplitude * cos(2π m·x / N)`.
pub fn cosine_wave(shape: [usize; 3], mode: [usize; 3], amplitude: f64) -> RealField {
    plane_wave(shape, mode).mapv(|v| amplitude * v.re)
}

/// Constant real field.
pub fn constant_field(shape: [usize; 3], value: f64) -> RealField {
    Array3::from_elem((shape[0], shape[1], shape[2]), value)
}

/// Lines where line `i` holds `i + 1` at every sample: distinct and
/// deterministic, for checking line selection.
pub fn numbered_lines(lines: usize, samples: usize) -> Array2<Complex64> {
    Array2::from_shape_fn((lines, samples), |(i, s)| {
        Complex64::new((i + 1) as f64 * (1.0 + s as f64 * 0.25), 0.0)
    })
}

/// `P(k) = 1 / k^2` with pivot 1.
pub fn inverse_square_model() -> PowerSpectrumModel {
    PowerSpectrumModel::isotropic(PowerLaw::new(-2.0, 1.0, 1.0).unwrap())
}

/// Scale-free white-noise model `P(k) = amplitude`.
pub fn white_noise_model(amplitude: f64) -> PowerSpectrumModel {
    PowerSpectrumModel::isotropic(PowerLaw::new(0.0, 1.0, amplitude).unwrap())
}
