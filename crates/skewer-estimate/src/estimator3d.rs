//! Full-box (3D) power estimator.
//!
//! The box is optionally thinned by a [`Sampling`] mode, transformed over
//! all three axes, divided by the [`Normalization`] factor, and squared.
//! The binning entry points below take |k| (and μ) arrays that match the
//! sampled box; with [`Sampling::RegularStride`] that is the coordinate
//! grid of the strided box, see [`BoxEstimator::sampled_shape`].
//!
//! Constructed via the builder pattern: [`BoxEstimator::builder`].

use crate::binning::{bin_by_magnitude_and_angle, bin_by_unique, bin_sorted, BinnedSpectrum};
use crate::histogram::{histogram, Histogram2d};
use crate::multipole::{multipole, Multipoles};
use crate::selection::Sampling;
use ndarray::Array3;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use skewer_core::fft::fftn;
use skewer_core::field::squared_modulus;
use skewer_core::{ComplexField, EstimateError, RealField};

/// Factor dividing the forward transform.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Normalization {
    /// Divide by the number of voxels in the (sampled) box, so a
    /// unit-amplitude plane wave has power 1 at its mode.
    #[default]
    VoxelCount,
    /// Raw transform.
    Unnormalized,
}

/// Transform and power of a sampled box.
#[derive(Clone, Debug, PartialEq)]
pub struct BoxPower {
    /// `|F|^2` per voxel.
    pub power: RealField,
    /// Normalised Fourier amplitudes `F`.
    pub amplitudes: ComplexField,
}

/// A reproducible 3D power estimator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoxEstimator {
    sampling: Sampling,
    normalization: Normalization,
    seed: u64,
}

/// Builder for [`BoxEstimator`].
#[derive(Clone, Debug)]
pub struct BoxEstimatorBuilder {
    sampling: Sampling,
    normalization: Normalization,
    seed: u64,
}

impl BoxEstimator {
    /// Create a builder: full sampling, voxel-count normalisation, seed 0.
    pub fn builder() -> BoxEstimatorBuilder {
        BoxEstimatorBuilder {
            sampling: Sampling::default(),
            normalization: Normalization::default(),
            seed: 0,
        }
    }

    /// Configured sampling mode.
    pub fn sampling(&self) -> Sampling {
        self.sampling
    }

    /// Configured normalisation.
    pub fn normalization(&self) -> Normalization {
        self.normalization
    }

    /// Seed for [`Sampling::RandomSubset`].
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Shape of the box after sampling a box of `shape`.
    pub fn sampled_shape(&self, shape: [usize; 3]) -> [usize; 3] {
        match self.sampling {
            Sampling::RegularStride { x_step, y_step } => {
                [shape[0].div_ceil(x_step), shape[1].div_ceil(y_step), shape[2]]
            }
            _ => shape,
        }
    }

    /// The sampled copy of `field` that the estimator transforms.
    pub fn sample(&self, field: &ComplexField) -> Result<ComplexField, EstimateError> {
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        self.sampling.apply(field, &mut rng)
    }

    /// Power per voxel of the sampled box, with its amplitudes.
    pub fn estimate(&self, field: &ComplexField) -> Result<BoxPower, EstimateError> {
        let sampled = self.sample(field)?;
        let norm = match self.normalization {
            Normalization::VoxelCount => sampled.len() as f64,
            Normalization::Unnormalized => 1.0,
        };
        tracing::debug!(
            norm,
            sampling = ?self.sampling,
            shape = ?sampled.dim(),
            "estimating 3D power"
        );
        let amplitudes = fftn(&sampled).mapv(|v| v / norm);
        let power = squared_modulus(&amplitudes);
        Ok(BoxPower { power, amplitudes })
    }

    /// Mean power per distinct |k|.
    pub fn power_by_unique_k(
        &self,
        field: &ComplexField,
        k: &Array3<f64>,
    ) -> Result<BinnedSpectrum, EstimateError> {
        bin_by_unique(&self.estimate(field)?.power, k)
    }

    /// Mean power in `n_bins` sorted |k| chunks.
    pub fn power_binned(
        &self,
        field: &ComplexField,
        k: &Array3<f64>,
        n_bins: usize,
    ) -> Result<BinnedSpectrum, EstimateError> {
        bin_sorted(&self.estimate(field)?.power, k, n_bins)
    }

    /// Legendre multipole of degree `degree` in `n_bins` |k| rows.
    pub fn power_multipole(
        &self,
        field: &ComplexField,
        k: &Array3<f64>,
        mu: &Array3<Option<f64>>,
        n_bins: usize,
        degree: usize,
    ) -> Result<Multipoles, EstimateError> {
        let power = self.estimate(field)?.power;
        let rows = bin_by_magnitude_and_angle(&power, k, mu, n_bins)?;
        multipole(&rows, degree)
    }

    /// Mean power on explicit (|k|, |μ|) edges.
    pub fn power_histogram(
        &self,
        field: &ComplexField,
        k: &Array3<f64>,
        mu: &Array3<Option<f64>>,
        k_edges: &[f64],
        mu_edges: &[f64],
        allow_empty: bool,
    ) -> Result<Histogram2d, EstimateError> {
        let power = self.estimate(field)?.power;
        histogram(&power, k, mu, k_edges, mu_edges, allow_empty)
    }
}

impl BoxEstimatorBuilder {
    /// Set the sampling mode (default: full).
    pub fn sampling(mut self, sampling: Sampling) -> Self {
        self.sampling = sampling;
        self
    }

    /// Set the normalisation (default: voxel count).
    pub fn normalization(mut self, normalization: Normalization) -> Self {
        self.normalization = normalization;
        self
    }

    /// Set the seed for random line subsets (default: 0).
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Build the estimator, validating the sampling parameters.
    pub fn build(self) -> Result<BoxEstimator, EstimateError> {
        self.sampling.validate()?;
        Ok(BoxEstimator {
            sampling: self.sampling,
            normalization: self.normalization,
            seed: self.seed,
        })
    }
}
