//! Line-of-sight (1D) power estimator.
//!
//! Each selected line is transformed along its samples and the squared
//! modulus is averaged across lines, giving one value per DFT mode in the
//! standard ordering (zero, positive, negative frequencies).
//!
//! Constructed via the builder pattern: [`LineOfSightEstimator::builder`].

use crate::selection::{masked_lines, sample_lines};
use ndarray::{Array1, Array2, Axis};
use num_complex::Complex64;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use skewer_core::fft::fft_axis;
use skewer_core::{ComplexField, EstimateError};

/// A reproducible 1D power estimator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LineOfSightEstimator {
    lines: Option<usize>,
    seed: u64,
}

/// Builder for [`LineOfSightEstimator`].
#[derive(Clone, Debug)]
pub struct LineOfSightEstimatorBuilder {
    lines: Option<usize>,
    seed: u64,
}

impl LineOfSightEstimator {
    /// Create a builder that uses every line, seed 0.
    pub fn builder() -> LineOfSightEstimatorBuilder {
        LineOfSightEstimatorBuilder {
            lines: None,
            seed: 0,
        }
    }

    /// Number of lines drawn, or `None` for every line.
    pub fn lines(&self) -> Option<usize> {
        self.lines
    }

    /// Seed of the line selection.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Mean 1D power over lines given as rows of `(lines, samples)`.
    ///
    /// # Errors
    ///
    /// [`EstimateError::InvalidConfig`] if more lines are requested than
    /// `lines` holds.
    pub fn estimate(&self, lines: &Array2<Complex64>) -> Result<Array1<f64>, EstimateError> {
        let population: Vec<usize> = (0..lines.nrows()).collect();
        self.estimate_among(lines, &population)
    }

    /// Like [`estimate`](Self::estimate), drawing only from lines whose
    /// mask entry is `true`.
    ///
    /// # Errors
    ///
    /// [`EstimateError::MaskMismatch`] if the mask length differs from the
    /// number of lines, [`EstimateError::InvalidConfig`] if the mask keeps
    /// no lines or fewer than requested.
    pub fn estimate_masked(
        &self,
        lines: &Array2<Complex64>,
        mask: &[bool],
    ) -> Result<Array1<f64>, EstimateError> {
        if mask.len() != lines.nrows() {
            return Err(EstimateError::MaskMismatch {
                lines: lines.nrows(),
                entries: mask.len(),
            });
        }
        let population = masked_lines(mask);
        if population.is_empty() {
            return Err(EstimateError::InvalidConfig {
                reason: "line mask keeps no lines".to_string(),
            });
        }
        self.estimate_among(lines, &population)
    }

    /// Estimate from a box, treating each `(i, j)` column along z as a line.
    pub fn estimate_box(&self, field: &ComplexField) -> Result<Array1<f64>, EstimateError> {
        self.estimate(&box_lines(field))
    }

    /// Masked estimate from a box; `mask` is indexed like the box's lines,
    /// `i * ny + j`.
    pub fn estimate_box_masked(
        &self,
        field: &ComplexField,
        mask: &[bool],
    ) -> Result<Array1<f64>, EstimateError> {
        self.estimate_masked(&box_lines(field), mask)
    }

    fn estimate_among(
        &self,
        lines: &Array2<Complex64>,
        population: &[usize],
    ) -> Result<Array1<f64>, EstimateError> {
        let count = self.lines.unwrap_or(population.len());
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        let chosen: Vec<usize> = sample_lines(population.len(), count, &mut rng)?
            .into_iter()
            .map(|i| population[i])
            .collect();
        tracing::debug!(
            selected = chosen.len(),
            population = population.len(),
            samples = lines.ncols(),
            "estimating line-of-sight power"
        );

        let selected = lines.select(Axis(0), &chosen);
        let transformed = fft_axis(&selected, 1);
        let power = transformed.mapv(|v| v.norm_sqr());
        power
            .mean_axis(Axis(0))
            .ok_or_else(|| EstimateError::InvalidConfig {
                reason: "no lines selected".to_string(),
            })
    }
}

impl LineOfSightEstimatorBuilder {
    /// Draw `lines` lines at random instead of using all of them.
    pub fn lines(mut self, lines: usize) -> Self {
        self.lines = Some(lines);
        self
    }

    /// Set the selection seed (default: 0).
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Build the estimator.
    ///
    /// # Errors
    ///
    /// [`EstimateError::InvalidConfig`] if `lines` was set to zero.
    pub fn build(self) -> Result<LineOfSightEstimator, EstimateError> {
        if self.lines == Some(0) {
            return Err(EstimateError::InvalidConfig {
                reason: "line-of-sight estimator needs at least one line".to_string(),
            });
        }
        Ok(LineOfSightEstimator {
            lines: self.lines,
            seed: self.seed,
        })
    }
}

fn box_lines(field: &ComplexField) -> Array2<Complex64> {
    let (_, ny, nz) = field.dim();
    let count = field.len_of(Axis(0)) * ny;
    Array2::from_shape_fn((count, nz), |(line, s)| field[[line / ny, line % ny, s]])
}
