//! Analytic power-law spectrum.

use crate::model::{check_magnitude, PowerSpectrum};
use skewer_core::ModelError;

/// `P(k) = amplitude * (k / pivot)^index` for k > 0.
///
/// At k = 0 the law is singular for negative indices; it evaluates to a
/// configurable floor instead (zero by default).
#[derive(Clone, Debug, PartialEq)]
pub struct PowerLaw {
    index: f64,
    pivot: f64,
    amplitude: f64,
    floor: f64,
}

impl PowerLaw {
    /// Create a power law.
    ///
    /// Returns `Err(ModelError::InvalidParameter)` if `index` is not
    /// finite, `pivot` is not finite and positive, or `amplitude` is not
    /// finite and non-negative.
    pub fn new(index: f64, pivot: f64, amplitude: f64) -> Result<Self, ModelError> {
        if !index.is_finite() {
            return Err(ModelError::InvalidParameter {
                reason: format!("power-law index must be finite, got {index}"),
            });
        }
        if !pivot.is_finite() || pivot <= 0.0 {
            return Err(ModelError::InvalidParameter {
                reason: format!("power-law pivot must be finite and positive, got {pivot}"),
            });
        }
        if !amplitude.is_finite() || amplitude < 0.0 {
            return Err(ModelError::InvalidParameter {
                reason: format!("power-law amplitude must be finite and >= 0, got {amplitude}"),
            });
        }
        Ok(Self {
            index,
            pivot,
            amplitude,
            floor: 0.0,
        })
    }

    /// Set the value returned at k = 0 (default 0). Must be finite and >= 0.
    pub fn with_floor(mut self, floor: f64) -> Result<Self, ModelError> {
        if !floor.is_finite() || floor < 0.0 {
            return Err(ModelError::InvalidParameter {
                reason: format!("power-law floor must be finite and >= 0, got {floor}"),
            });
        }
        self.floor = floor;
        Ok(self)
    }

    /// Spectral index.
    pub fn index(&self) -> f64 {
        self.index
    }

    /// Pivot wavenumber.
    pub fn pivot(&self) -> f64 {
        self.pivot
    }

    /// Amplitude at the pivot.
    pub fn amplitude(&self) -> f64 {
        self.amplitude
    }

    /// Value at k = 0.
    pub fn floor(&self) -> f64 {
        self.floor
    }
}

impl PowerSpectrum for PowerLaw {
    fn name(&self) -> &str {
        "PowerLaw"
    }

    fn evaluate(&self, k: f64) -> Result<f64, ModelError> {
        check_magnitude(k)?;
        if k == 0.0 {
            return Ok(self.floor);
        }
        Ok(self.amplitude * (k / self.pivot).powf(self.index))
    }
}
