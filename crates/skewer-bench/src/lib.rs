//! Benchmark profiles for the skewer toolkit.
//!
//! - [`reference_grid`]: 32^3 box with unit spacing
//! - [`reference_model`]: anisotropic power law on that box
//! - [`reference_field`]: a seeded realisation of the model

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use skewer_core::{ComplexField, Grid};
use skewer_realise::GaussianFieldGenerator;
use skewer_spectrum::{Anisotropy, PowerLaw, PowerSpectrumModel};

/// Samples per axis of the reference box.
pub const REFERENCE_SIDE: usize = 32;

/// 32^3 box with unit spacing in both unit systems.
pub fn reference_grid() -> Grid {
    Grid::new([REFERENCE_SIDE; 3], [1.0; 3]).unwrap()
}

/// `P(k) = k^-1.5 (1 + 0.5 L2(μ))`.
pub fn reference_model() -> PowerSpectrumModel {
    PowerSpectrumModel::anisotropic(
        PowerLaw::new(-1.5, 1.0, 1.0).unwrap(),
        Anisotropy::new(&[0.0, 0.0, 0.5]).unwrap(),
    )
}

/// Deterministic realisation of [`reference_model`] on [`reference_grid`].
pub fn reference_field(seed: u64) -> ComplexField {
    GaussianFieldGenerator::builder()
        .seed(seed)
        .build()
        .realise(&reference_model(), &reference_grid(), 0)
        .unwrap()
}
