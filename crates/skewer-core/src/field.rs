//! Dense field arrays.
//!
//! Fields are plain `ndarray` arrays indexed `[x, y, z]`, with `z` the
//! line-of-sight axis. Every transformation in the workspace returns a new
//! array; inputs are never mutated.

use ndarray::{Array3, Dimension};
use num_complex::Complex64;

/// Real-valued field sampled on a grid.
pub type RealField = Array3<f64>;

/// Complex-valued field sampled on a grid (Fourier amplitudes, or a
/// realisation before its real part is taken).
pub type ComplexField = Array3<Complex64>;

/// Promote a real field to a complex one with zero imaginary part.
pub fn to_complex(field: &RealField) -> ComplexField {
    field.mapv(|v| Complex64::new(v, 0.0))
}

/// Shape of a 3D array as a fixed-size array.
pub fn shape3<T>(field: &Array3<T>) -> [usize; 3] {
    let (nx, ny, nz) = field.dim();
    [nx, ny, nz]
}

/// Squared modulus `|a|^2` of every element.
pub fn squared_modulus<D: Dimension>(field: &ndarray::Array<Complex64, D>) -> ndarray::Array<f64, D> {
    field.mapv(|a| a.norm_sqr())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn to_complex_keeps_values() {
        let real = Array3::from_shape_fn((2, 2, 2), |(i, j, k)| (i + j + k) as f64);
        let c = to_complex(&real);
        assert_eq!(c[[1, 1, 1]], Complex64::new(3.0, 0.0));
        assert_eq!(shape3(&c), [2, 2, 2]);
    }

    #[test]
    fn squared_modulus_is_norm_sqr() {
        let c = Array3::from_elem((1, 1, 2), Complex64::new(3.0, -4.0));
        let p = squared_modulus(&c);
        assert_eq!(p[[0, 0, 1]], 25.0);
    }
}
