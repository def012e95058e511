//! Core types for the skewer power-spectrum toolkit.
//!
//! This is the leaf crate of the workspace. It defines the box geometry
//! ([`Grid`], [`Axis`], [`Units`]), the background [`Cosmology`] used to turn
//! comoving voxel lengths into velocity spacing, the dense field array types,
//! the multi-dimensional FFT wrapper, and the per-stage error enums.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod cosmology;
pub mod error;
pub mod fft;
pub mod field;
pub mod grid;

pub use cosmology::Cosmology;
pub use error::{EstimateError, GridError, ModelError, RealiseError};
pub use field::{ComplexField, RealField};
pub use grid::{Axis, Grid, Units};
