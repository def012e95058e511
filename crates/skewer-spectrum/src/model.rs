//! The `PowerSpectrum` trait and the anisotropic model wrapper.

use crate::anisotropy::Anisotropy;
use ndarray::Array3;
use skewer_core::field::shape3;
use skewer_core::ModelError;
use std::fmt;

/// An isotropic power spectrum P(|k|).
///
/// # Contract
///
/// `evaluate` never returns a negative value. `k` is a wavenumber
/// magnitude; implementations reject negative or NaN input with
/// [`ModelError::InvalidParameter`].
pub trait PowerSpectrum: fmt::Debug + Send + Sync {
    /// Short human-readable name, used in log messages.
    fn name(&self) -> &str;

    /// Power at wavenumber magnitude `k`.
    fn evaluate(&self, k: f64) -> Result<f64, ModelError>;
}

/// Reject negative or NaN wavenumber magnitudes.
pub(crate) fn check_magnitude(k: f64) -> Result<(), ModelError> {
    if k >= 0.0 {
        Ok(())
    } else {
        Err(ModelError::InvalidParameter {
            reason: format!("wavenumber magnitude must be non-negative, got {k}"),
        })
    }
}

/// A power spectrum with an optional angular dependence.
///
/// Evaluates `P(k) [1 + Σ c_ℓ L_ℓ(μ)]`. Without anisotropy μ is ignored;
/// with anisotropy an undefined μ (`None`, the k = 0 voxel) yields an
/// undefined power rather than a substituted value.
///
/// # Examples
///
/// ```
/// use skewer_spectrum::{Anisotropy, PowerLaw, PowerSpectrumModel};
///
/// let law = PowerLaw::new(-2.0, 1.0, 1.0).unwrap();
/// let model = PowerSpectrumModel::anisotropic(law, Anisotropy::new(&[0.0, 0.0, 0.5]).unwrap());
///
/// // At μ = 1, L_2 = 1, so the factor is 1.5.
/// let p = model.evaluate(2.0, Some(1.0)).unwrap().unwrap();
/// assert!((p - 0.25 * 1.5).abs() < 1e-12);
/// assert_eq!(model.evaluate(2.0, None).unwrap(), None);
/// ```
#[derive(Debug)]
pub struct PowerSpectrumModel {
    spectrum: Box<dyn PowerSpectrum>,
    anisotropy: Option<Anisotropy>,
}

impl PowerSpectrumModel {
    /// A model with no angular dependence.
    pub fn isotropic(spectrum: impl PowerSpectrum + 'static) -> Self {
        Self {
            spectrum: Box::new(spectrum),
            anisotropy: None,
        }
    }

    /// A model multiplied by a Legendre series in μ.
    pub fn anisotropic(spectrum: impl PowerSpectrum + 'static, anisotropy: Anisotropy) -> Self {
        Self {
            spectrum: Box::new(spectrum),
            anisotropy: Some(anisotropy),
        }
    }

    /// The isotropic part of the model.
    pub fn spectrum(&self) -> &dyn PowerSpectrum {
        self.spectrum.as_ref()
    }

    /// The angular factor, if any.
    pub fn anisotropy(&self) -> Option<&Anisotropy> {
        self.anisotropy.as_ref()
    }

    /// Whether evaluation depends on μ.
    pub fn is_anisotropic(&self) -> bool {
        self.anisotropy.is_some()
    }

    /// Power at one (k, μ) point.
    pub fn evaluate(&self, k: f64, mu: Option<f64>) -> Result<Option<f64>, ModelError> {
        let power = self.spectrum.evaluate(k)?;
        Ok(match &self.anisotropy {
            None => Some(power),
            Some(a) => mu.map(|m| power * a.factor(m)),
        })
    }

    /// Isotropic power at every voxel of a |k| array.
    ///
    /// The angular factor, if configured, is not applied.
    pub fn evaluate_isotropic_field(&self, k: &Array3<f64>) -> Result<Array3<f64>, ModelError> {
        let mut out = Array3::zeros(k.dim());
        for (slot, &kv) in out.iter_mut().zip(k.iter()) {
            *slot = self.spectrum.evaluate(kv)?;
        }
        Ok(out)
    }

    /// Full model at every voxel of aligned |k| and μ arrays.
    pub fn evaluate_field(
        &self,
        k: &Array3<f64>,
        mu: &Array3<Option<f64>>,
    ) -> Result<Array3<Option<f64>>, ModelError> {
        if k.dim() != mu.dim() {
            return Err(ModelError::ShapeMismatch {
                k: shape3(k),
                mu: shape3(mu),
            });
        }
        let mut out = Array3::from_elem(k.dim(), None);
        for ((slot, &kv), &m) in out.iter_mut().zip(k.iter()).zip(mu.iter()) {
            *slot = self.evaluate(kv, m)?;
        }
        tracing::trace!(
            spectrum = self.spectrum.name(),
            voxels = out.len(),
            anisotropic = self.is_anisotropic(),
            "evaluated power field"
        );
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PowerLaw;
    use skewer_coords::GridCoordinates;
    use skewer_core::{Grid, Units};

    #[test]
    fn isotropic_ignores_mu() {
        let model = PowerSpectrumModel::isotropic(PowerLaw::new(1.0, 1.0, 2.0).unwrap());
        assert!(!model.is_anisotropic());
        let without = model.evaluate(3.0, None).unwrap().unwrap();
        let with = model.evaluate(3.0, Some(0.2)).unwrap().unwrap();
        assert!((without - 6.0).abs() < 1e-12);
        assert_eq!(without, with);
    }

    #[test]
    fn field_propagates_undefined_mu() {
        let grid = Grid::new([4, 4, 4], [1.0; 3]).unwrap();
        let coords = GridCoordinates::new(&grid, Units::Length);
        let k = coords.magnitude_field();
        let mu = coords.angle_cosine_field();
        let model = PowerSpectrumModel::anisotropic(
            PowerLaw::new(-2.0, 1.0, 1.0).unwrap(),
            Anisotropy::new(&[0.0, 0.0, 1.0]).unwrap(),
        );
        let p = model.evaluate_field(&k, &mu).unwrap();
        assert_eq!(p[[0, 0, 0]], None);
        assert_eq!(p.iter().filter(|v| v.is_none()).count(), 1);
        assert!(p.iter().flatten().all(|&v| v >= 0.0));
    }

    #[test]
    fn field_shape_mismatch() {
        let model = PowerSpectrumModel::isotropic(PowerLaw::new(-2.0, 1.0, 1.0).unwrap());
        let k = Array3::from_elem((2, 2, 2), 1.0);
        let mu = Array3::from_elem((2, 2, 3), Some(0.0));
        let err = model.evaluate_field(&k, &mu).unwrap_err();
        assert_eq!(
            err,
            ModelError::ShapeMismatch {
                k: [2, 2, 2],
                mu: [2, 2, 3]
            }
        );
    }

    #[test]
    fn isotropic_field_matches_pointwise() {
        let model = PowerSpectrumModel::isotropic(PowerLaw::new(-1.0, 2.0, 3.0).unwrap());
        let k = Array3::from_shape_fn((2, 3, 4), |(i, j, l)| (i + j + l) as f64);
        let p = model.evaluate_isotropic_field(&k).unwrap();
        for (pv, kv) in p.iter().zip(k.iter()) {
            assert_eq!(Some(*pv), model.evaluate(*kv, None).unwrap());
        }
    }
}
