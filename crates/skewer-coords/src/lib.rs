//! Coordinate arrays for skewer grids.
//!
//! [`GridCoordinates`] derives per-axis angular wavenumbers and their dense
//! 3D combinations (|k|, μ, cylindrical components) from a
//! [`Grid`](skewer_core::Grid), together with the matching
//! configuration-space arrays. The unit system is fixed per coordinate view
//! at construction.
//!
//! The free functions [`angular_frequencies`] and
//! [`one_sided_angular_frequencies`] follow numpy's `fftfreq` / `rfftfreq`
//! ordering, scaled by 2π ("cosmologist's k").

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod coordinates;
pub mod frequency;

pub use coordinates::GridCoordinates;
pub use frequency::{angular_frequencies, one_sided_angular_frequencies, reflect_index};
