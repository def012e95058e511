//! Converting raw fields into fluctuations.

use ndarray::{Array, Dimension};
use skewer_core::EstimateError;

/// `x / mean(x) - 1`.
///
/// # Errors
///
/// [`EstimateError::InvalidConfig`] for an empty field or one whose mean is
/// zero or not finite.
pub fn overdensity<D: Dimension>(field: &Array<f64, D>) -> Result<Array<f64, D>, EstimateError> {
    let mean = checked_mean(field, "field")?;
    Ok(field.mapv(|x| x / mean - 1.0))
}

/// Flux contrast `exp(-scale τ) / F̄ - 1` from optical depth.
///
/// `mean_flux` is the mean transmitted flux F̄; when `None` it is measured
/// from the field itself.
///
/// # Errors
///
/// [`EstimateError::InvalidConfig`] for a non-finite `scale`, a mean flux
/// that is not positive and finite, or an empty field.
pub fn flux_contrast<D: Dimension>(
    tau: &Array<f64, D>,
    scale: f64,
    mean_flux: Option<f64>,
) -> Result<Array<f64, D>, EstimateError> {
    if !scale.is_finite() {
        return Err(EstimateError::InvalidConfig {
            reason: format!("optical depth scale must be finite, got {scale}"),
        });
    }
    let flux = tau.mapv(|t| (-scale * t).exp());
    let mean = match mean_flux {
        Some(f) if f > 0.0 && f.is_finite() => f,
        Some(f) => {
            return Err(EstimateError::InvalidConfig {
                reason: format!("mean flux must be positive and finite, got {f}"),
            })
        }
        None => checked_mean(&flux, "flux")?,
    };
    Ok(flux.mapv(|f| f / mean - 1.0))
}

fn checked_mean<D: Dimension>(field: &Array<f64, D>, what: &str) -> Result<f64, EstimateError> {
    match field.mean() {
        Some(m) if m != 0.0 && m.is_finite() => Ok(m),
        Some(m) => Err(EstimateError::InvalidConfig {
            reason: format!("{what} mean is {m}, cannot form a contrast"),
        }),
        None => Err(EstimateError::InvalidConfig {
            reason: format!("{what} is empty"),
        }),
    }
}
