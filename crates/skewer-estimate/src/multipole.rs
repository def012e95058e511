//! Legendre multipole projection of (|k|, μ) rows.

use crate::binning::AngularRow;
use ndarray::Array1;
use skewer_core::EstimateError;
use skewer_spectrum::legendre;

/// Samples a row needs for trapezoidal integration.
const MIN_SAMPLES: usize = 2;

/// Multipole power per |k| row.
#[derive(Clone, Debug, PartialEq)]
pub struct Multipoles {
    /// Legendre degree ℓ.
    pub degree: usize,
    /// `P_ℓ` per row.
    pub power: Array1<f64>,
    /// Mean |k| per row.
    pub k: Array1<f64>,
}

/// Project each row onto the Legendre polynomial of degree `degree`:
/// `P_ℓ = (2ℓ + 1) / 2 ∫ P(μ) L_ℓ(μ) dμ`, with the integral taken by the
/// trapezoidal rule over the row's sorted μ samples.
///
/// The integral runs over the μ span the row actually covers, not over
/// `[-1, 1]`. Rows from a real grid whose samples stop short of ±1 (high
/// |k| rows reaching into the box corners, or rows holding the one-sided
/// Nyquist plane of an even axis) therefore do not project isotropic power
/// onto exactly `P` at ℓ = 0 and zero above it. Check
/// [`AngularRow::mu_range`] before reading such rows that way.
///
/// # Errors
///
/// [`EstimateError::ShapeMismatch`] if a row's vectors differ in length,
/// [`EstimateError::InsufficientSamples`] if a row holds fewer than two
/// samples.
pub fn multipole(rows: &[AngularRow], degree: usize) -> Result<Multipoles, EstimateError> {
    let weight = (2.0 * degree as f64 + 1.0) / 2.0;
    let mut power = Array1::zeros(rows.len());
    let mut k = Array1::zeros(rows.len());
    for (bin, row) in rows.iter().enumerate() {
        if row.len() < MIN_SAMPLES {
            return Err(EstimateError::InsufficientSamples {
                bin,
                samples: row.len(),
                required: MIN_SAMPLES,
            });
        }
        if row.power.len() != row.len() || row.k.len() != row.len() {
            return Err(EstimateError::ShapeMismatch {
                what: "angular row",
                expected: vec![row.len(); 3],
                actual: vec![row.mu.len(), row.power.len(), row.k.len()],
            });
        }
        let integrand: Vec<f64> = row
            .power
            .iter()
            .zip(&row.mu)
            .map(|(p, &m)| p * legendre(degree, m))
            .collect();
        power[bin] = weight * trapezoid(&integrand, &row.mu);
        k[bin] = row.k.iter().sum::<f64>() / row.len() as f64;
    }
    Ok(Multipoles { degree, power, k })
}

fn trapezoid(y: &[f64], x: &[f64]) -> f64 {
    y.windows(2)
        .zip(x.windows(2))
        .map(|(y, x)| 0.5 * (x[1] - x[0]) * (y[0] + y[1]))
        .sum()
}
