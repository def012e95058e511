//! Test utilities and analytic fixtures for skewer development.
//!
//! Provides small grids, closed-form fields whose spectra are known
//! exactly (single Fourier modes, constants), and reference power models.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::*;

/// Assert `|a - b| <= tol`, with both values in the failure message.
#[track_caller]
pub fn assert_close(a: f64, b: f64, tol: f64) {
    assert!(
        (a - b).abs() <= tol,
        "expected {b}, got {a} (|diff| = {} > {tol})",
        (a - b).abs()
    );
}
