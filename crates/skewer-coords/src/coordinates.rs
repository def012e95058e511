//! Dense coordinate arrays for a grid in one unit system.

use crate::frequency::{angular_frequencies, one_sided_angular_frequencies};
use ndarray::{Array1, Array3};
use skewer_core::{Axis, Grid, Units};

/// Coordinate generator bound to a grid and a unit system.
///
/// Cheap to construct; every array is recomputed on demand. The z axis is
/// the line of sight: angle cosines are measured against it and the
/// one-sided frequency variant applies to it.
///
/// # Examples
///
/// ```
/// use skewer_coords::GridCoordinates;
/// use skewer_core::{Grid, Units};
///
/// let grid = Grid::new([4, 4, 4], [1.0; 3]).unwrap();
/// let coords = GridCoordinates::new(&grid, Units::Length);
///
/// let k = coords.magnitude_field();
/// assert_eq!(k[[0, 0, 0]], 0.0);
///
/// let mu = coords.angle_cosine_field();
/// assert_eq!(mu[[0, 0, 0]], None);
/// assert_eq!(mu[[0, 0, 1]], Some(1.0));
/// ```
#[derive(Clone, Copy, Debug)]
pub struct GridCoordinates<'g> {
    grid: &'g Grid,
    units: Units,
}

impl<'g> GridCoordinates<'g> {
    /// Bind a grid to the unit system used for its spacing.
    pub fn new(grid: &'g Grid, units: Units) -> Self {
        Self { grid, units }
    }

    /// The underlying grid.
    pub fn grid(&self) -> &'g Grid {
        self.grid
    }

    /// The unit system of every array produced by this view.
    pub fn units(&self) -> Units {
        self.units
    }

    fn spacing(&self, axis: Axis) -> f64 {
        self.grid.axis_spacing(axis, self.units)
    }

    // ── Fourier space ───────────────────────────────────────────

    /// Signed angular wavenumbers along `axis`, in transform order.
    pub fn axis_frequencies(&self, axis: Axis) -> Array1<f64> {
        angular_frequencies(self.grid.samples(axis), self.spacing(axis))
    }

    /// Non-negative wavenumbers along the line of sight, `Nz / 2 + 1` long.
    pub fn one_sided_frequencies(&self) -> Array1<f64> {
        one_sided_angular_frequencies(self.grid.samples(Axis::Z), self.spacing(Axis::Z))
    }

    /// |k| at every voxel.
    pub fn magnitude_field(&self) -> Array3<f64> {
        self.broadcast_frequencies(|kx, ky, kz| (kx * kx + ky * ky + kz * kz).sqrt())
    }

    /// μ = k_z / |k| at every voxel; `None` where |k| = 0.
    pub fn angle_cosine_field(&self) -> Array3<Option<f64>> {
        self.broadcast_frequencies(|kx, ky, kz| {
            let k = (kx * kx + ky * ky + kz * kz).sqrt();
            (k > 0.0).then(|| kz / k)
        })
    }

    /// |k_z| broadcast over the box (cylindrical parallel component).
    pub fn parallel_magnitude_field(&self) -> Array3<f64> {
        self.broadcast_frequencies(|_, _, kz| kz.abs())
    }

    /// sqrt(k_x² + k_y²) broadcast over the box (cylindrical perpendicular
    /// component).
    pub fn perpendicular_magnitude_field(&self) -> Array3<f64> {
        self.broadcast_frequencies(|kx, ky, _| (kx * kx + ky * ky).sqrt())
    }

    fn broadcast_frequencies<T>(&self, f: impl Fn(f64, f64, f64) -> T) -> Array3<T> {
        broadcast(
            &self.axis_frequencies(Axis::X),
            &self.axis_frequencies(Axis::Y),
            &self.axis_frequencies(Axis::Z),
            f,
        )
    }

    // ── Configuration space ─────────────────────────────────────

    /// Sample positions `index * spacing` along `axis`.
    pub fn real_space_coordinate(&self, axis: Axis) -> Array1<f64> {
        let spacing = self.spacing(axis);
        Array1::from_shape_fn(self.grid.samples(axis), |i| i as f64 * spacing)
    }

    /// Distance of every voxel from the origin voxel.
    pub fn real_space_magnitude_field(&self) -> Array3<f64> {
        self.broadcast_positions(|x, y, z| (x * x + y * y + z * z).sqrt())
    }

    /// z / r at every voxel; `None` at the origin voxel.
    pub fn real_space_angle_cosine_field(&self) -> Array3<Option<f64>> {
        self.broadcast_positions(|x, y, z| {
            let r = (x * x + y * y + z * z).sqrt();
            (r > 0.0).then(|| z / r)
        })
    }

    fn broadcast_positions<T>(&self, f: impl Fn(f64, f64, f64) -> T) -> Array3<T> {
        broadcast(
            &self.real_space_coordinate(Axis::X),
            &self.real_space_coordinate(Axis::Y),
            &self.real_space_coordinate(Axis::Z),
            f,
        )
    }
}

/// Outer combination of three per-axis arrays into a dense 3D array.
fn broadcast<T>(
    x: &Array1<f64>,
    y: &Array1<f64>,
    z: &Array1<f64>,
    f: impl Fn(f64, f64, f64) -> T,
) -> Array3<T> {
    Array3::from_shape_fn((x.len(), y.len(), z.len()), |(i, j, k)| f(x[i], y[j], z[k]))
}
