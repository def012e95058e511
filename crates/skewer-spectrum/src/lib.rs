//! Power-spectrum models for the skewer toolkit.
//!
//! A model evaluates P(|k|) through the [`PowerSpectrum`] trait and
//! optionally multiplies it by a Legendre series in the angle cosine μ
//! ([`Anisotropy`]). [`PowerSpectrumModel`] combines the two and evaluates
//! whole coordinate arrays.
//!
//! # Spectra
//!
//! - [`PowerLaw`]: `A (k / k_p)^n`, with a configurable value at k = 0
//! - [`Tabulated`]: log-log interpolation of a (k, P) table with an explicit
//!   [`Extrapolation`] policy

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod anisotropy;
pub mod legendre;
pub mod model;
pub mod power_law;
pub mod tabulated;

pub use anisotropy::Anisotropy;
pub use legendre::legendre;
pub use model::{PowerSpectrum, PowerSpectrumModel};
pub use power_law::PowerLaw;
pub use tabulated::{Extrapolation, Interpolation, Tabulated};
