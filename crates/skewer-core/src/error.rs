//! Error types for the skewer toolkit.
//!
//! Organized by pipeline stage: grid construction and coordinate generation,
//! power-spectrum model evaluation, field realisation, and estimation
//! (transform, selection and binning). Every `Display` message names its
//! stage and the offending values.

use crate::grid::{Axis, Units};
use std::error::Error;
use std::fmt;

/// Errors from grid construction and coordinate generation.
#[derive(Clone, Debug, PartialEq)]
pub enum GridError {
    /// An axis was declared with zero samples.
    EmptyAxis {
        /// The empty axis.
        axis: Axis,
    },
    /// A voxel spacing is zero, negative, NaN or infinite.
    InvalidSpacing {
        /// Axis carrying the bad spacing.
        axis: Axis,
        /// Unit system the spacing belongs to.
        units: Units,
        /// The rejected value.
        value: f64,
    },
    /// A cosmological parameter is outside its physical range.
    InvalidCosmology {
        /// Which parameter was rejected, and why.
        reason: String,
    },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyAxis { axis } => {
                write!(f, "coordinates: axis {axis} has zero samples")
            }
            Self::InvalidSpacing { axis, units, value } => write!(
                f,
                "coordinates: {units} spacing on axis {axis} must be finite and positive, got {value}"
            ),
            Self::InvalidCosmology { reason } => write!(f, "coordinates: {reason}"),
        }
    }
}

impl Error for GridError {}

/// Errors from power-spectrum model construction and evaluation.
#[derive(Clone, Debug, PartialEq)]
pub enum ModelError {
    /// A tabulated spectrum is malformed.
    InvalidTable {
        /// What is wrong with the table.
        reason: String,
    },
    /// A query wavenumber lies outside the table and extrapolation is
    /// disabled.
    OutOfRange {
        /// The offending wavenumber.
        k: f64,
        /// Smallest tabulated wavenumber.
        min: f64,
        /// Largest tabulated wavenumber.
        max: f64,
    },
    /// A model parameter is invalid.
    InvalidParameter {
        /// Which parameter was rejected, and why.
        reason: String,
    },
    /// Wavenumber and angle-cosine arrays are not voxel-aligned.
    ShapeMismatch {
        /// Shape of the |k| array.
        k: [usize; 3],
        /// Shape of the μ array.
        mu: [usize; 3],
    },
}

impl fmt::Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidTable { reason } => write!(f, "model evaluation: invalid table: {reason}"),
            Self::OutOfRange { k, min, max } => write!(
                f,
                "model evaluation: k = {k} outside tabulated range [{min}, {max}]"
            ),
            Self::InvalidParameter { reason } => {
                write!(f, "model evaluation: invalid parameter: {reason}")
            }
            Self::ShapeMismatch { k, mu } => write!(
                f,
                "model evaluation: |k| shape {k:?} does not match μ shape {mu:?}"
            ),
        }
    }
}

impl Error for ModelError {}

/// Errors from Gaussian field realisation.
#[derive(Clone, Debug, PartialEq)]
pub enum RealiseError {
    /// The evaluated power array does not match the grid's sample counts.
    ShapeMismatch {
        /// Shape declared by the grid.
        expected: [usize; 3],
        /// Shape of the supplied array.
        actual: [usize; 3],
    },
    /// The model returned no power at a voxel with non-zero |k|.
    UndefinedPower {
        /// Voxel index of the undefined value.
        index: [usize; 3],
    },
    /// The power at a voxel is negative or not finite, so it cannot be a
    /// variance.
    InvalidPower {
        /// Voxel index of the offending value.
        index: [usize; 3],
        /// The offending value.
        value: f64,
    },
    /// The power-spectrum model failed.
    Model(ModelError),
    /// Coordinate generation failed.
    Grid(GridError),
}

impl fmt::Display for RealiseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ShapeMismatch { expected, actual } => write!(
                f,
                "field realisation: power shape {actual:?} does not match grid shape {expected:?}"
            ),
            Self::UndefinedPower { index } => {
                write!(f, "field realisation: power undefined at voxel {index:?}")
            }
            Self::InvalidPower { index, value } => write!(
                f,
                "field realisation: power {value} at voxel {index:?} is not a valid variance"
            ),
            Self::Model(e) => write!(f, "field realisation: {e}"),
            Self::Grid(e) => write!(f, "field realisation: {e}"),
        }
    }
}

impl Error for RealiseError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Model(e) => Some(e),
            Self::Grid(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ModelError> for RealiseError {
    fn from(e: ModelError) -> Self {
        Self::Model(e)
    }
}

impl From<GridError> for RealiseError {
    fn from(e: GridError) -> Self {
        Self::Grid(e)
    }
}

/// Errors from the power-spectrum estimators and the binning pipeline.
#[derive(Clone, Debug, PartialEq)]
pub enum EstimateError {
    /// Two arrays that must be aligned voxel-for-voxel disagree in shape.
    ShapeMismatch {
        /// Name of the offending input.
        what: &'static str,
        /// Shape required by the other inputs.
        expected: Vec<usize>,
        /// Shape actually supplied.
        actual: Vec<usize>,
    },
    /// A line mask does not have one entry per line.
    MaskMismatch {
        /// Number of lines in the input.
        lines: usize,
        /// Number of mask entries supplied.
        entries: usize,
    },
    /// A requested bin received no samples.
    EmptyBin {
        /// Index of the empty bin.
        bin: usize,
        /// Number of bins requested.
        n_bins: usize,
    },
    /// A bin holds too few angle samples for trapezoidal integration.
    InsufficientSamples {
        /// Index of the under-populated bin.
        bin: usize,
        /// Number of samples present.
        samples: usize,
        /// Minimum number of samples required.
        required: usize,
    },
    /// The estimator or binning configuration is invalid.
    InvalidConfig {
        /// What is wrong with the configuration.
        reason: String,
    },
}

impl fmt::Display for EstimateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ShapeMismatch {
                what,
                expected,
                actual,
            } => write!(
                f,
                "binning: {what} has shape {actual:?}, expected {expected:?}"
            ),
            Self::MaskMismatch { lines, entries } => write!(
                f,
                "line selection: mask has {entries} entries for {lines} lines"
            ),
            Self::EmptyBin { bin, n_bins } => {
                write!(f, "binning: bin {bin} of {n_bins} received no samples")
            }
            Self::InsufficientSamples {
                bin,
                samples,
                required,
            } => write!(
                f,
                "binning: bin {bin} holds {samples} angle samples, multipole integration needs at least {required}"
            ),
            Self::InvalidConfig { reason } => write!(f, "estimator config: {reason}"),
        }
    }
}

impl Error for EstimateError {}
