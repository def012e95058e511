//! Power binned on explicit (|k|, |μ|) edges.

use crate::binning::check_aligned;
use ndarray::{Array2, Array3};
use skewer_core::EstimateError;

/// Mean power and mean |k| per (|k|, |μ|) cell, with voxel counts.
#[derive(Clone, Debug, PartialEq)]
pub struct Histogram2d {
    /// |k| edges, strictly increasing.
    pub k_edges: Vec<f64>,
    /// |μ| edges, strictly increasing.
    pub mu_edges: Vec<f64>,
    /// Mean power, indexed `[k_bin, mu_bin]`; `None` for an empty cell.
    pub power: Array2<Option<f64>>,
    /// Mean |k| of the voxels in each cell; `None` for an empty cell.
    pub k: Array2<Option<f64>>,
    /// Voxels per cell.
    pub counts: Array2<usize>,
}

/// Bin `power` by |k| and |μ| on the given edges.
///
/// Bins are half-open `[lo, hi)` except the last bin on each axis, which
/// also takes values equal to its upper edge. Voxels outside the edges or
/// with undefined μ are ignored.
///
/// # Errors
///
/// [`EstimateError::InvalidConfig`] for fewer than two edges or edges that
/// are not strictly increasing; [`EstimateError::EmptyBin`] for an empty
/// cell unless `allow_empty` is set. The reported bin is the flat index
/// `k_bin * n_mu_bins + mu_bin`.
pub fn histogram(
    power: &Array3<f64>,
    k: &Array3<f64>,
    mu: &Array3<Option<f64>>,
    k_edges: &[f64],
    mu_edges: &[f64],
    allow_empty: bool,
) -> Result<Histogram2d, EstimateError> {
    check_aligned("k", power.shape(), k.shape())?;
    check_aligned("mu", power.shape(), mu.shape())?;
    check_edges("k", k_edges)?;
    check_edges("mu", mu_edges)?;

    let shape = (k_edges.len() - 1, mu_edges.len() - 1);
    let mut sums = Array2::<f64>::zeros(shape);
    let mut k_sums = Array2::<f64>::zeros(shape);
    let mut counts = Array2::<usize>::zeros(shape);
    for ((&p, &kv), m) in power.iter().zip(k.iter()).zip(mu.iter()) {
        let Some(m) = m else { continue };
        if let (Some(a), Some(b)) = (locate(k_edges, kv), locate(mu_edges, m.abs())) {
            sums[[a, b]] += p;
            k_sums[[a, b]] += kv;
            counts[[a, b]] += 1;
        }
    }

    let mut cells = Array2::from_elem(shape, None);
    let mut k_means = Array2::from_elem(shape, None);
    for ((a, b), &count) in counts.indexed_iter() {
        if count > 0 {
            cells[[a, b]] = Some(sums[[a, b]] / count as f64);
            k_means[[a, b]] = Some(k_sums[[a, b]] / count as f64);
        } else if !allow_empty {
            return Err(EstimateError::EmptyBin {
                bin: a * shape.1 + b,
                n_bins: shape.0 * shape.1,
            });
        }
    }
    tracing::debug!(
        k_bins = shape.0,
        mu_bins = shape.1,
        "histogrammed power on (|k|, |mu|) edges"
    );
    Ok(Histogram2d {
        k_edges: k_edges.to_vec(),
        mu_edges: mu_edges.to_vec(),
        power: cells,
        k: k_means,
        counts,
    })
}

/// `n_bins + 1` logarithmically spaced edges: `k_min` at the bottom,
/// `k_max` as the lower edge of the last bin, and the top edge one
/// logarithmic step above `k_max` so that `k_max` itself is binned.
///
/// # Errors
///
/// [`EstimateError::InvalidConfig`] unless `0 < k_min < k_max` (both
/// finite) and `n_bins >= 2`.
pub fn log_spaced_edges(k_min: f64, k_max: f64, n_bins: usize) -> Result<Vec<f64>, EstimateError> {
    if !(k_min > 0.0 && k_max > k_min && k_max.is_finite()) {
        return Err(EstimateError::InvalidConfig {
            reason: format!("log edges need 0 < k_min < k_max, got {k_min} and {k_max}"),
        });
    }
    if n_bins < 2 {
        return Err(EstimateError::InvalidConfig {
            reason: format!("log edges need at least 2 bins, got {n_bins}"),
        });
    }
    let (lo, hi) = (k_min.ln(), k_max.ln());
    let step = (hi - lo) / (n_bins - 1) as f64;
    let mut edges: Vec<f64> = (0..n_bins)
        .map(|i| (lo + i as f64 * step).exp())
        .collect();
    // Pin the endpoints so they do not drift through exp(ln x).
    edges[0] = k_min;
    edges[n_bins - 1] = k_max;
    edges.push((hi + step).exp());
    Ok(edges)
}

fn check_edges(axis: &str, edges: &[f64]) -> Result<(), EstimateError> {
    if edges.len() < 2 {
        return Err(EstimateError::InvalidConfig {
            reason: format!("{axis} edges need at least 2 entries, got {}", edges.len()),
        });
    }
    if edges.windows(2).any(|w| !(w[1] > w[0])) {
        return Err(EstimateError::InvalidConfig {
            reason: format!("{axis} edges must be strictly increasing"),
        });
    }
    Ok(())
}

fn locate(edges: &[f64], x: f64) -> Option<usize> {
    let last = edges.len() - 1;
    if !(x >= edges[0] && x <= edges[last]) {
        return None;
    }
    if x == edges[last] {
        return Some(last - 1);
    }
    Some(edges.partition_point(|&e| e <= x) - 1)
}
