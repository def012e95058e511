//! Skewer: power spectra and Gaussian random fields on boxes of sightlines.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all skewer sub-crates. For most users, adding `skewer` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use skewer::prelude::*;
//!
//! // A 16^3 box with unit spacing and a power-law target spectrum.
//! let grid = Grid::new([16, 16, 16], [1.0; 3]).unwrap();
//! let model = PowerSpectrumModel::isotropic(PowerLaw::new(-1.5, 1.0, 1.0).unwrap());
//!
//! // Realise a field and measure its power in 8 |k| bins.
//! let generator = GaussianFieldGenerator::builder().seed(42).build();
//! let field = generator.realise(&model, &grid, 0).unwrap();
//!
//! let k = GridCoordinates::new(&grid, Units::Velocity).magnitude_field();
//! let estimator = BoxEstimator::builder()
//!     .normalization(Normalization::Unnormalized)
//!     .build()
//!     .unwrap();
//! let spectrum = estimator.power_binned(&field, &k, 8).unwrap();
//! assert_eq!(spectrum.len(), 8);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `skewer-core` | Grid, units, cosmology, field types, FFT, errors |
//! | [`coords`] | `skewer-coords` | Wavenumber and real-space coordinate arrays |
//! | [`spectrum`] | `skewer-spectrum` | Power-law and tabulated models, anisotropy |
//! | [`realise`] | `skewer-realise` | Gaussian random field generator |
//! | [`estimate`] | `skewer-estimate` | 1D/3D estimators, binning, multipoles |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Box geometry, cosmology, field types, FFT and errors (`skewer-core`).
pub use skewer_core as types;

/// Coordinate arrays (`skewer-coords`).
///
/// [`coords::GridCoordinates`] binds a grid to a unit system and produces
/// |k|, μ, cylindrical and real-space arrays.
pub use skewer_coords as coords;

/// Power-spectrum models (`skewer-spectrum`).
pub use skewer_spectrum as spectrum;

/// Gaussian random field realisation (`skewer-realise`).
pub use skewer_realise as realise;

/// Power-spectrum estimators and binning (`skewer-estimate`).
///
/// [`estimate::LineOfSightEstimator`] for 1D power along sightlines,
/// [`estimate::BoxEstimator`] for the full 3D transform.
pub use skewer_estimate as estimate;

/// Common imports for typical skewer usage.
///
/// ```rust
/// use skewer::prelude::*;
/// ```
pub mod prelude {
    // Geometry and fields
    pub use skewer_core::{Axis, ComplexField, Cosmology, Grid, RealField, Units};

    // Errors
    pub use skewer_core::{EstimateError, GridError, ModelError, RealiseError};

    // Coordinates
    pub use skewer_coords::GridCoordinates;

    // Models
    pub use skewer_spectrum::{
        Anisotropy, Extrapolation, Interpolation, PowerLaw, PowerSpectrum, PowerSpectrumModel,
        Tabulated,
    };

    // Realisation
    pub use skewer_realise::GaussianFieldGenerator;

    // Estimation
    pub use skewer_estimate::{
        BinnedSpectrum, BoxEstimator, LineOfSightEstimator, Multipoles, Normalization, Sampling,
    };
}
