//! Legendre-series angular dependence.

use crate::legendre::legendre;
use ndarray::Array3;
use skewer_core::ModelError;
use smallvec::SmallVec;

/// Multiplicative angular factor `1 + Σ_ℓ c_ℓ L_ℓ(μ)`.
///
/// `coefficients[ℓ]` multiplies the Legendre polynomial of degree ℓ, so a
/// pure quadrupole is `[0.0, 0.0, c2]`.
#[derive(Clone, Debug, PartialEq)]
pub struct Anisotropy {
    coefficients: SmallVec<[f64; 4]>,
}

impl Anisotropy {
    /// Build from per-degree coefficients. All must be finite.
    pub fn new(coefficients: &[f64]) -> Result<Self, ModelError> {
        if let Some((degree, c)) = coefficients
            .iter()
            .enumerate()
            .find(|(_, c)| !c.is_finite())
        {
            return Err(ModelError::InvalidParameter {
                reason: format!("anisotropy coefficient for degree {degree} is {c}"),
            });
        }
        Ok(Self {
            coefficients: SmallVec::from_slice(coefficients),
        })
    }

    /// Coefficients indexed by Legendre degree.
    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    /// Factor at one angle cosine.
    pub fn factor(&self, mu: f64) -> f64 {
        self.coefficients
            .iter()
            .enumerate()
            .fold(1.0, |acc, (degree, c)| acc + c * legendre(degree, mu))
    }

    /// Factor at every voxel; undefined μ stays undefined.
    pub fn factor_field(&self, mu: &Array3<Option<f64>>) -> Array3<Option<f64>> {
        mu.map(|m| m.map(|v| self.factor(v)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_series_is_unity() {
        let a = Anisotropy::new(&[]).unwrap();
        assert_eq!(a.factor(0.3), 1.0);
    }

    #[test]
    fn quadrupole_factor() {
        let a = Anisotropy::new(&[0.0, 0.0, 0.4]).unwrap();
        let mu: f64 = 0.5;
        let expected = 1.0 + 0.4 * 0.5 * (3.0 * mu * mu - 1.0);
        assert!((a.factor(mu) - expected).abs() < 1e-14);
    }

    #[test]
    fn field_keeps_sentinel() {
        let a = Anisotropy::new(&[0.0, 1.0]).unwrap();
        let mut mu = Array3::from_elem((2, 1, 1), Some(0.5));
        mu[[0, 0, 0]] = None;
        let f = a.factor_field(&mu);
        assert_eq!(f[[0, 0, 0]], None);
        assert_eq!(f[[1, 0, 0]], Some(1.5));
    }

    #[test]
    fn rejects_non_finite() {
        let err = Anisotropy::new(&[0.0, f64::INFINITY]).unwrap_err();
        assert!(err.to_string().contains("degree 1"));
    }
}
