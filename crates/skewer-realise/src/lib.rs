//! Gaussian random field realisations for the skewer toolkit.
//!
//! [`GaussianFieldGenerator`] draws Fourier amplitudes whose variance
//! follows a [`PowerSpectrumModel`](skewer_spectrum::PowerSpectrumModel),
//! zeroes the mean mode, enforces Hermitian symmetry ([`make_hermitian`])
//! and inverse-transforms to configuration space.
//!
//! Realisations are deterministic: the ChaCha8 stream is seeded from
//! `seed XOR realisation`, or supplied by the caller.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod diagnostics;
pub mod generator;
pub mod hermitian;

pub use diagnostics::{imaginary_residual, real_part};
pub use generator::{GaussianFieldGenerator, GaussianFieldGeneratorBuilder};
pub use hermitian::{is_hermitian, make_hermitian};
