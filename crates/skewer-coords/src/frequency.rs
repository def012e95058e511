//! Discrete Fourier frequency layouts.

use ndarray::Array1;
use std::f64::consts::TAU;

/// Signed angular wavenumbers of an `n`-point transform with sample spacing
/// `spacing`.
///
/// Ordering: `0, 1, ..., ceil(n/2) - 1, -floor(n/2), ..., -1`, each times
/// `2π / (n * spacing)`. For even `n` the Nyquist entry is negative.
///
/// ```
/// use skewer_coords::angular_frequencies;
/// use std::f64::consts::TAU;
///
/// let k = angular_frequencies(4, 1.0);
/// let expected = [0.0, 0.25, -0.5, -0.25].map(|f| f * TAU);
/// assert_eq!(k.to_vec(), expected.to_vec());
/// ```
pub fn angular_frequencies(n: usize, spacing: f64) -> Array1<f64> {
    let step = TAU / (n as f64 * spacing);
    let positive = n.div_ceil(2);
    Array1::from_shape_fn(n, |i| {
        let m = if i < positive {
            i as f64
        } else {
            i as f64 - n as f64
        };
        m * step
    })
}

/// Non-negative angular wavenumbers of an `n`-point real-input transform:
/// `n / 2 + 1` entries `0, 1, ..., n/2`, each times `2π / (n * spacing)`.
pub fn one_sided_angular_frequencies(n: usize, spacing: f64) -> Array1<f64> {
    let step = TAU / (n as f64 * spacing);
    Array1::from_shape_fn(n / 2 + 1, |i| i as f64 * step)
}

/// Index of the negated frequency: `(n - i) mod n`.
///
/// Index 0 always maps to itself; for even `n` so does the Nyquist index
/// `n / 2`.
pub fn reflect_index(i: usize, n: usize) -> usize {
    (n - i % n) % n
}
