//! Choosing which lines of sight enter an estimate.
//!
//! A box of shape `(nx, ny, nz)` holds `nx * ny` lines along z, numbered
//! row-major: line `i * ny + j` is `field[[i, j, ..]]`.

use ndarray::s;
use num_complex::Complex64;
use rand::Rng;
use skewer_core::{ComplexField, EstimateError};

/// How the 3D estimator thins the box before transforming it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Sampling {
    /// Every line.
    #[default]
    Full,
    /// Keep every `x_step`-th line along x and every `y_step`-th along y,
    /// shrinking the transverse shape.
    RegularStride {
        /// Step along x. Must be at least 1.
        x_step: usize,
        /// Step along y. Must be at least 1.
        y_step: usize,
    },
    /// Keep `lines` randomly chosen lines and zero the rest.
    RandomSubset {
        /// Number of lines kept. Must be at least 1.
        lines: usize,
    },
}

impl Sampling {
    /// Check the parameters that do not depend on the box.
    pub fn validate(&self) -> Result<(), EstimateError> {
        match *self {
            Sampling::Full => Ok(()),
            Sampling::RegularStride { x_step, y_step } if x_step == 0 || y_step == 0 => {
                Err(EstimateError::InvalidConfig {
                    reason: format!("stride steps must be >= 1, got ({x_step}, {y_step})"),
                })
            }
            Sampling::RegularStride { .. } => Ok(()),
            Sampling::RandomSubset { lines: 0 } => Err(EstimateError::InvalidConfig {
                reason: "random subset must keep at least one line".to_string(),
            }),
            Sampling::RandomSubset { .. } => Ok(()),
        }
    }

    /// Apply the sampling to `field`, returning a fresh array.
    ///
    /// # Errors
    ///
    /// Returns [`EstimateError::InvalidConfig`] for invalid parameters or a
    /// subset larger than the number of lines in the box.
    pub fn apply<R: Rng + ?Sized>(
        &self,
        field: &ComplexField,
        rng: &mut R,
    ) -> Result<ComplexField, EstimateError> {
        self.validate()?;
        match *self {
            Sampling::Full => Ok(field.clone()),
            Sampling::RegularStride { x_step, y_step } => {
                let (xs, ys) = (x_step as isize, y_step as isize);
                Ok(field.slice(s![..;xs, ..;ys, ..]).to_owned())
            }
            Sampling::RandomSubset { lines } => {
                let (nx, ny, _) = field.dim();
                let kept = sample_lines(nx * ny, lines, rng)?;
                let mut keep = vec![false; nx * ny];
                for line in kept {
                    keep[line] = true;
                }
                let mut out = field.clone();
                for ((i, j, _), v) in out.indexed_iter_mut() {
                    if !keep[i * ny + j] {
                        *v = Complex64::new(0.0, 0.0);
                    }
                }
                Ok(out)
            }
        }
    }
}

/// Draw `count` distinct line indices from `0..population`.
///
/// When `count == population` every line is returned in ascending order
/// and `rng` is not consumed.
///
/// # Errors
///
/// Returns [`EstimateError::InvalidConfig`] if `count` is zero or exceeds
/// `population`.
pub fn sample_lines<R: Rng + ?Sized>(
    population: usize,
    count: usize,
    rng: &mut R,
) -> Result<Vec<usize>, EstimateError> {
    if count == 0 || count > population {
        return Err(EstimateError::InvalidConfig {
            reason: format!("cannot select {count} lines out of {population}"),
        });
    }
    if count == population {
        return Ok((0..population).collect());
    }
    Ok(rand::seq::index::sample(rng, population, count).into_vec())
}

/// Indices of the lines a mask keeps, ascending.
pub fn masked_lines(mask: &[bool]) -> Vec<usize> {
    mask.iter()
        .enumerate()
        .filter_map(|(i, &keep)| keep.then_some(i))
        .collect()
}
