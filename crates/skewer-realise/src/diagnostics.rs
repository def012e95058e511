//! Checks on realised fields.

use skewer_core::{ComplexField, RealField};

/// Real part of a realisation: the physical field.
pub fn real_part(field: &ComplexField) -> RealField {
    field.mapv(|v| v.re)
}

/// Largest imaginary magnitude relative to the largest real magnitude.
///
/// A realisation from Hermitian amplitudes has a residual at the level of
/// floating-point round-off (well below 1e-10). An all-zero field has
/// residual 0.
pub fn imaginary_residual(field: &ComplexField) -> f64 {
    let (max_re, max_im) = field.iter().fold((0.0f64, 0.0f64), |(re, im), v| {
        (re.max(v.re.abs()), im.max(v.im.abs()))
    });
    if max_re > 0.0 {
        max_im / max_re
    } else {
        max_im
    }
}
