//! Fourier power-spectrum estimation for the skewer toolkit.
//!
//! Two estimators share the binning pipeline:
//!
//! - [`LineOfSightEstimator`] averages the 1D power of a reproducible
//!   random subset of lines of sight (optionally restricted by a mask).
//! - [`BoxEstimator`] transforms the whole (optionally subsampled) box and
//!   returns |F|^2 per voxel.
//!
//! Measured power is then reduced with [`binning`] (unique |k|, sorted
//! chunks, (|k|, μ) rows), projected onto Legendre [`multipole`]s, or
//! histogrammed on explicit edges ([`histogram`]). [`contrast`] converts
//! raw fields into fluctuations before estimation.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

pub mod binning;
pub mod contrast;
pub mod estimator1d;
pub mod estimator3d;
pub mod histogram;
pub mod multipole;
pub mod selection;

pub use binning::{
    bin_by_magnitude_and_angle, bin_by_unique, bin_sorted, AngularRow, Bin, BinnedSpectrum,
};
pub use contrast::{flux_contrast, overdensity};
pub use estimator1d::{LineOfSightEstimator, LineOfSightEstimatorBuilder};
pub use estimator3d::{BoxEstimator, BoxEstimatorBuilder, BoxPower, Normalization};
pub use histogram::{histogram, log_spaced_edges, Histogram2d};
pub use multipole::{multipole, Multipoles};
pub use selection::{masked_lines, sample_lines, Sampling};
