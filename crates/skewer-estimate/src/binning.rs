//! Reducing per-voxel power to binned spectra.
//!
//! All reductions visit samples in a fixed order, so the same input gives
//! bit-identical output. Chunking follows numpy's `array_split`: `len`
//! samples split into `n_bins` contiguous chunks, the first `len % n_bins`
//! of which hold one extra sample.

use indexmap::IndexMap;
use ndarray::{Array1, Array3};
use skewer_core::EstimateError;
use std::ops::Range;

/// One bin of a spectrum.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bin {
    /// Representative |k| (the group value or the mean over the bin).
    pub center: f64,
    /// Mean power over the bin.
    pub estimate: f64,
    /// Number of voxels averaged, when the reduction tracks it.
    pub count: Option<usize>,
}

/// Bins ordered by ascending |k|.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BinnedSpectrum {
    bins: Vec<Bin>,
}

impl BinnedSpectrum {
    /// Wrap bins that are already in ascending order.
    pub fn new(bins: Vec<Bin>) -> Self {
        Self { bins }
    }

    /// The bins.
    pub fn bins(&self) -> &[Bin] {
        &self.bins
    }

    /// Number of bins.
    pub fn len(&self) -> usize {
        self.bins.len()
    }

    /// Whether there are no bins.
    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    /// Bin centres as an array.
    pub fn centers(&self) -> Array1<f64> {
        self.bins.iter().map(|b| b.center).collect()
    }

    /// Power estimates as an array.
    pub fn estimates(&self) -> Array1<f64> {
        self.bins.iter().map(|b| b.estimate).collect()
    }

    /// Iterate over the bins.
    pub fn iter(&self) -> std::slice::Iter<'_, Bin> {
        self.bins.iter()
    }
}

impl<'a> IntoIterator for &'a BinnedSpectrum {
    type Item = &'a Bin;
    type IntoIter = std::slice::Iter<'a, Bin>;

    fn into_iter(self) -> Self::IntoIter {
        self.bins.iter()
    }
}

/// One |k| chunk of the (|k|, μ) arrangement, ordered by ascending μ.
///
/// The three vectors are aligned sample for sample.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AngularRow {
    /// Power per sample.
    pub power: Vec<f64>,
    /// |k| per sample.
    pub k: Vec<f64>,
    /// Angle cosine per sample, non-decreasing.
    pub mu: Vec<f64>,
}

impl AngularRow {
    /// Number of samples in the row.
    pub fn len(&self) -> usize {
        self.mu.len()
    }

    /// Whether the row holds no samples.
    pub fn is_empty(&self) -> bool {
        self.mu.is_empty()
    }

    /// Mean |k| of the row, `None` when the row is empty.
    pub fn mean_k(&self) -> Option<f64> {
        (!self.k.is_empty()).then(|| mean(self.k.iter().copied(), self.k.len()))
    }

    /// Smallest and largest μ in the row.
    ///
    /// Rows near the box corners, and rows holding the one-sided Nyquist
    /// plane of an even axis, do not reach both ends of `[-1, 1]`.
    pub fn mu_range(&self) -> Option<(f64, f64)> {
        Some((*self.mu.first()?, *self.mu.last()?))
    }
}

// ── Reductions ─────────────────────────────────────────────────────

/// Mean power per distinct |k| value (exact floating-point match),
/// ascending in |k|, with voxel counts.
pub fn bin_by_unique(power: &Array3<f64>, k: &Array3<f64>) -> Result<BinnedSpectrum, EstimateError> {
    check_aligned("k", power.shape(), k.shape())?;
    let mut groups: IndexMap<u64, (f64, f64, usize)> = IndexMap::new();
    for (&p, &kv) in power.iter().zip(k.iter()) {
        // -0.0 + 0.0 == +0.0, so both zeros share a group.
        let key = (kv + 0.0).to_bits();
        let entry = groups.entry(key).or_insert((kv + 0.0, 0.0, 0));
        entry.1 += p;
        entry.2 += 1;
    }
    let mut bins: Vec<Bin> = groups
        .into_values()
        .map(|(center, sum, count)| Bin {
            center,
            estimate: sum / count as f64,
            count: Some(count),
        })
        .collect();
    bins.sort_by(|a, b| a.center.total_cmp(&b.center));
    tracing::debug!(groups = bins.len(), voxels = power.len(), "binned power by unique |k|");
    Ok(BinnedSpectrum::new(bins))
}

/// Sort voxels by |k| (stable) and average power and |k| over `n_bins`
/// contiguous chunks.
pub fn bin_sorted(
    power: &Array3<f64>,
    k: &Array3<f64>,
    n_bins: usize,
) -> Result<BinnedSpectrum, EstimateError> {
    check_aligned("k", power.shape(), k.shape())?;
    let (power_sorted, k_sorted) = sort_by_magnitude(power, k);
    let bins = chunk_bounds(power_sorted.len(), n_bins)?
        .into_iter()
        .map(|range| Bin {
            center: mean(k_sorted[range.clone()].iter().copied(), range.len()),
            estimate: mean(power_sorted[range.clone()].iter().copied(), range.len()),
            count: Some(range.len()),
        })
        .collect::<Vec<_>>();
    tracing::debug!(n_bins, voxels = power.len(), "binned sorted power");
    Ok(BinnedSpectrum::new(bins))
}

/// Arrange voxels into `n_bins` |k| chunks (as [`bin_sorted`]) and order
/// each chunk by μ.
///
/// Chunk boundaries are computed over every voxel; voxels with undefined μ
/// are then dropped from their chunk before the stable sort by μ.
///
/// # Errors
///
/// [`EstimateError::EmptyBin`] when a chunk holds no voxel with defined μ,
/// as the chunk holding only the k = 0 mode does.
pub fn bin_by_magnitude_and_angle(
    power: &Array3<f64>,
    k: &Array3<f64>,
    mu: &Array3<Option<f64>>,
    n_bins: usize,
) -> Result<Vec<AngularRow>, EstimateError> {
    check_aligned("k", power.shape(), k.shape())?;
    check_aligned("mu", power.shape(), mu.shape())?;
    let order = magnitude_order(k);
    let power: Vec<f64> = power.iter().copied().collect();
    let k: Vec<f64> = k.iter().copied().collect();
    let mu: Vec<Option<f64>> = mu.iter().copied().collect();

    let mut rows = Vec::with_capacity(n_bins);
    for (bin, range) in chunk_bounds(order.len(), n_bins)?.into_iter().enumerate() {
        let mut samples: Vec<(f64, f64, f64)> = order[range]
            .iter()
            .filter_map(|&i| mu[i].map(|m| (m, power[i], k[i])))
            .collect();
        if samples.is_empty() {
            return Err(EstimateError::EmptyBin { bin, n_bins });
        }
        samples.sort_by(|a, b| a.0.total_cmp(&b.0));
        let mut row = AngularRow::default();
        for (m, p, kv) in samples {
            row.mu.push(m);
            row.power.push(p);
            row.k.push(kv);
        }
        rows.push(row);
    }
    tracing::debug!(n_bins, "arranged power in (|k|, mu) rows");
    Ok(rows)
}

// ── Helpers ────────────────────────────────────────────────────────

/// Power and |k| in ascending-|k| order.
pub fn sort_by_magnitude(power: &Array3<f64>, k: &Array3<f64>) -> (Vec<f64>, Vec<f64>) {
    let power: Vec<f64> = power.iter().copied().collect();
    let k: Vec<f64> = k.iter().copied().collect();
    magnitude_order_slice(&k)
        .into_iter()
        .map(|i| (power[i], k[i]))
        .unzip()
}

/// Index ranges splitting `len` samples into `n_bins` near-equal chunks.
///
/// # Errors
///
/// [`EstimateError::InvalidConfig`] when `n_bins` is zero, and
/// [`EstimateError::EmptyBin`] when there are fewer samples than bins.
pub fn chunk_bounds(len: usize, n_bins: usize) -> Result<Vec<Range<usize>>, EstimateError> {
    if n_bins == 0 {
        return Err(EstimateError::InvalidConfig {
            reason: "number of bins must be >= 1".to_string(),
        });
    }
    if len < n_bins {
        return Err(EstimateError::EmptyBin { bin: len, n_bins });
    }
    let (base, extra) = (len / n_bins, len % n_bins);
    let mut start = 0;
    Ok((0..n_bins)
        .map(|b| {
            let size = base + usize::from(b < extra);
            let range = start..start + size;
            start += size;
            range
        })
        .collect())
}

fn magnitude_order(k: &Array3<f64>) -> Vec<usize> {
    let k: Vec<f64> = k.iter().copied().collect();
    magnitude_order_slice(&k)
}

fn magnitude_order_slice(k: &[f64]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..k.len()).collect();
    order.sort_by(|&a, &b| k[a].total_cmp(&k[b]));
    order
}

fn mean(values: impl Iterator<Item = f64>, len: usize) -> f64 {
    values.sum::<f64>() / len as f64
}

pub(crate) fn check_aligned(
    what: &'static str,
    expected: &[usize],
    actual: &[usize],
) -> Result<(), EstimateError> {
    if expected == actual {
        Ok(())
    } else {
        Err(EstimateError::ShapeMismatch {
            what,
            expected: expected.to_vec(),
            actual: actual.to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use skewer_coords::GridCoordinates;
    use skewer_core::{Grid, Units};

    fn line(values: &[f64]) -> Array3<f64> {
        Array3::from_shape_vec((1, 1, values.len()), values.to_vec()).unwrap()
    }

    #[test]
    fn chunks_follow_array_split() {
        let sizes: Vec<usize> = chunk_bounds(10, 3).unwrap().iter().map(|r| r.len()).collect();
        assert_eq!(sizes, vec![4, 3, 3]);
        assert_eq!(chunk_bounds(4, 4).unwrap(), vec![0..1, 1..2, 2..3, 3..4]);
    }

    #[test]
    fn too_many_bins_is_an_empty_bin() {
        assert_eq!(
            chunk_bounds(3, 5).unwrap_err(),
            EstimateError::EmptyBin { bin: 3, n_bins: 5 }
        );
        assert!(matches!(
            chunk_bounds(3, 0),
            Err(EstimateError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn unique_groups_are_ascending_with_counts() {
        let k = line(&[2.0, 1.0, 2.0, 0.0, -0.0]);
        let p = line(&[4.0, 1.0, 6.0, 9.0, 7.0]);
        let binned = bin_by_unique(&p, &k).unwrap();
        let got: Vec<(f64, f64, Option<usize>)> =
            binned.iter().map(|b| (b.center, b.estimate, b.count)).collect();
        assert_eq!(
            got,
            vec![(0.0, 8.0, Some(2)), (1.0, 1.0, Some(1)), (2.0, 5.0, Some(2))]
        );
    }

    #[test]
    fn single_bin_is_global_mean() {
        let k = line(&[3.0, 1.0, 2.0, 5.0]);
        let p = line(&[1.0, 2.0, 3.0, 6.0]);
        let binned = bin_sorted(&p, &k, 1).unwrap();
        assert_eq!(binned.len(), 1);
        assert_eq!(binned.bins()[0].estimate, 3.0);
        assert_eq!(binned.bins()[0].center, 2.75);
        assert_eq!(binned.bins()[0].count, Some(4));
    }

    #[test]
    fn sorted_bins_average_contiguous_chunks() {
        let k = line(&[5.0, 4.0, 3.0, 2.0, 1.0]);
        let p = line(&[50.0, 40.0, 30.0, 20.0, 10.0]);
        let binned = bin_sorted(&p, &k, 2).unwrap();
        assert_eq!(binned.estimates().to_vec(), vec![20.0, 45.0]);
        assert_eq!(binned.centers().to_vec(), vec![2.0, 4.5]);
    }

    #[test]
    fn angular_rows_drop_undefined_mu_and_sort() {
        let k = line(&[0.0, 1.0, 1.0, 2.0]);
        let p = line(&[9.0, 1.0, 2.0, 3.0]);
        let mu = Array3::from_shape_vec((1, 1, 4), vec![None, Some(0.5), Some(-0.5), Some(1.0)])
            .unwrap();
        let rows = bin_by_magnitude_and_angle(&p, &k, &mu, 2).unwrap();
        assert_eq!(rows[0].mu, vec![0.5]);
        assert_eq!(rows[0].power, vec![1.0]);
        assert_eq!(rows[1].mu, vec![-0.5, 1.0]);
        assert_eq!(rows[1].power, vec![2.0, 3.0]);
        assert_eq!(rows[1].mean_k(), Some(1.5));
        assert_eq!(rows[1].mu_range(), Some((-0.5, 1.0)));
        assert_eq!(AngularRow::default().mean_k(), None);
    }

    #[test]
    fn row_of_only_the_mean_mode_is_an_empty_bin() {
        // 8 voxels in 8 chunks: the first chunk holds only k = 0.
        let grid = Grid::new([2, 2, 2], [1.0; 3]).unwrap();
        let coords = GridCoordinates::new(&grid, Units::Length);
        let k = coords.magnitude_field();
        let mu = coords.angle_cosine_field();
        let p = Array3::from_elem((2, 2, 2), 1.0);
        assert_eq!(
            bin_by_magnitude_and_angle(&p, &k, &mu, 8).unwrap_err(),
            EstimateError::EmptyBin { bin: 0, n_bins: 8 }
        );
        assert_eq!(bin_by_magnitude_and_angle(&p, &k, &mu, 7).unwrap().len(), 7);
    }

    #[test]
    fn misaligned_inputs_are_rejected() {
        let err = bin_sorted(&line(&[1.0, 2.0]), &line(&[1.0]), 1).unwrap_err();
        assert_eq!(
            err,
            EstimateError::ShapeMismatch {
                what: "k",
                expected: vec![1, 1, 2],
                actual: vec![1, 1, 1],
            }
        );
    }

    proptest! {
        #[test]
        fn chunks_cover_everything(len in 1usize..200, n in 1usize..50) {
            prop_assume!(n <= len);
            let ranges = chunk_bounds(len, n).unwrap();
            prop_assert_eq!(ranges.len(), n);
            prop_assert_eq!(ranges[0].start, 0);
            prop_assert_eq!(ranges[n - 1].end, len);
            for w in ranges.windows(2) {
                prop_assert_eq!(w[0].end, w[1].start);
                prop_assert!(w[0].len() >= w[1].len());
                prop_assert!(w[0].len() - w[1].len() <= 1);
            }
        }
    }
}
