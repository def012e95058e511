//! Power spectrum interpolated from a (k, P) table.

use crate::model::{check_magnitude, PowerSpectrum};
use skewer_core::ModelError;

/// Interpolation scheme in log(P) versus log(k).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Interpolation {
    /// Piecewise linear (order 1).
    #[default]
    Linear,
    /// Natural cubic spline (order 3).
    CubicSpline,
}

impl Interpolation {
    /// Map an interpolation order to a scheme. Supported orders are 1 and 3.
    pub fn from_order(order: usize) -> Result<Self, ModelError> {
        match order {
            1 => Ok(Self::Linear),
            3 => Ok(Self::CubicSpline),
            _ => Err(ModelError::InvalidParameter {
                reason: format!("interpolation order {order} unsupported (expected 1 or 3)"),
            }),
        }
    }

    /// Polynomial order of the scheme.
    pub fn order(self) -> usize {
        match self {
            Self::Linear => 1,
            Self::CubicSpline => 3,
        }
    }
}

/// What to do with a query outside the tabulated k range.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Extrapolation {
    /// Return [`ModelError::OutOfRange`].
    #[default]
    Fail,
    /// Return the power at the nearest table edge.
    Clamp,
}

/// A tabulated spectrum, interpolated in log-log space.
///
/// k = 0 evaluates to zero: the mean mode carries no fluctuation power
/// and is never part of a log-spaced table.
///
/// # Examples
///
/// ```
/// use skewer_spectrum::{Extrapolation, Interpolation, PowerSpectrum, Tabulated};
///
/// let table = [(0.1, 100.0), (1.0, 1.0), (10.0, 0.01)];
/// let spectrum = Tabulated::new(&table, Interpolation::Linear, Extrapolation::Fail).unwrap();
///
/// // Halfway in log k between the first two rows is halfway in log P.
/// let p = spectrum.evaluate(0.1f64.sqrt()).unwrap();
/// assert!((p - 10.0).abs() < 1e-9);
/// assert!(spectrum.evaluate(20.0).is_err());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Tabulated {
    k_min: f64,
    k_max: f64,
    log_k: Vec<f64>,
    log_p: Vec<f64>,
    /// Second derivatives of log P at the knots; all zero for `Linear`.
    curvature: Vec<f64>,
    interpolation: Interpolation,
    extrapolation: Extrapolation,
}

impl Tabulated {
    /// Build from `(k, P)` pairs.
    ///
    /// # Errors
    ///
    /// Returns `Err(ModelError::InvalidTable)` if:
    /// - the table has fewer than 2 rows
    /// - any k or P is non-finite or not strictly positive
    /// - k is not strictly increasing
    pub fn new(
        table: &[(f64, f64)],
        interpolation: Interpolation,
        extrapolation: Extrapolation,
    ) -> Result<Self, ModelError> {
        if table.len() < 2 {
            return Err(ModelError::InvalidTable {
                reason: format!("need at least 2 rows, got {}", table.len()),
            });
        }
        for (row, &(k, p)) in table.iter().enumerate() {
            if !k.is_finite() || k <= 0.0 || !p.is_finite() || p <= 0.0 {
                return Err(ModelError::InvalidTable {
                    reason: format!(
                        "row {row} = ({k}, {p}): k and P must be finite and positive"
                    ),
                });
            }
        }
        if let Some(row) = table.windows(2).position(|w| w[1].0 <= w[0].0) {
            return Err(ModelError::InvalidTable {
                reason: format!(
                    "k not strictly increasing at row {}: {} after {}",
                    row + 1,
                    table[row + 1].0,
                    table[row].0
                ),
            });
        }

        let log_k: Vec<f64> = table.iter().map(|&(k, _)| k.ln()).collect();
        let log_p: Vec<f64> = table.iter().map(|&(_, p)| p.ln()).collect();
        let curvature = match interpolation {
            Interpolation::Linear => vec![0.0; log_k.len()],
            Interpolation::CubicSpline => natural_spline_curvature(&log_k, &log_p),
        };

        tracing::debug!(
            rows = table.len(),
            k_min = table[0].0,
            k_max = table[table.len() - 1].0,
            order = interpolation.order(),
            "tabulated spectrum loaded"
        );

        Ok(Self {
            k_min: table[0].0,
            k_max: table[table.len() - 1].0,
            log_k,
            log_p,
            curvature,
            interpolation,
            extrapolation,
        })
    }

    /// Smallest and largest tabulated wavenumber.
    pub fn k_range(&self) -> (f64, f64) {
        (self.k_min, self.k_max)
    }

    /// Number of table rows.
    pub fn len(&self) -> usize {
        self.log_k.len()
    }

    /// Always returns `false`: construction rejects short tables.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Interpolation scheme.
    pub fn interpolation(&self) -> Interpolation {
        self.interpolation
    }

    /// Extrapolation policy.
    pub fn extrapolation(&self) -> Extrapolation {
        self.extrapolation
    }

    /// Interpolated log P at log k, which must lie within the table.
    fn interpolate(&self, x: f64) -> f64 {
        let n = self.log_k.len();
        let hi = self
            .log_k
            .partition_point(|&knot| knot <= x)
            .clamp(1, n - 1);
        let lo = hi - 1;
        let h = self.log_k[hi] - self.log_k[lo];
        let a = (self.log_k[hi] - x) / h;
        let b = (x - self.log_k[lo]) / h;
        let linear = a * self.log_p[lo] + b * self.log_p[hi];
        match self.interpolation {
            Interpolation::Linear => linear,
            Interpolation::CubicSpline => {
                linear
                    + ((a * a * a - a) * self.curvature[lo] + (b * b * b - b) * self.curvature[hi])
                        * h
                        * h
                        / 6.0
            }
        }
    }
}

impl PowerSpectrum for Tabulated {
    fn name(&self) -> &str {
        "Tabulated"
    }

    fn evaluate(&self, k: f64) -> Result<f64, ModelError> {
        check_magnitude(k)?;
        if k == 0.0 {
            return Ok(0.0);
        }
        if k < self.k_min || k > self.k_max {
            return match self.extrapolation {
                Extrapolation::Fail => Err(ModelError::OutOfRange {
                    k,
                    min: self.k_min,
                    max: self.k_max,
                }),
                Extrapolation::Clamp => {
                    let edge = if k < self.k_min { 0 } else { self.log_p.len() - 1 };
                    Ok(self.log_p[edge].exp())
                }
            };
        }
        Ok(self.interpolate(k.ln()).exp())
    }
}

/// Second derivatives of a natural cubic spline through `(x, y)`.
///
/// Tridiagonal sweep with zero curvature at both ends.
fn natural_spline_curvature(x: &[f64], y: &[f64]) -> Vec<f64> {
    let n = x.len();
    let mut y2 = vec![0.0; n];
    let mut u = vec![0.0; n];
    for i in 1..n - 1 {
        let sig = (x[i] - x[i - 1]) / (x[i + 1] - x[i - 1]);
        let p = sig * y2[i - 1] + 2.0;
        y2[i] = (sig - 1.0) / p;
        let slope_diff = (y[i + 1] - y[i]) / (x[i + 1] - x[i]) - (y[i] - y[i - 1]) / (x[i] - x[i - 1]);
        u[i] = (6.0 * slope_diff / (x[i + 1] - x[i - 1]) - sig * u[i - 1]) / p;
    }
    y2[n - 1] = 0.0;
    for i in (0..n - 1).rev() {
        y2[i] = y2[i] * y2[i + 1] + u[i];
    }
    y2
}
