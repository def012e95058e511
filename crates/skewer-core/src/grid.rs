//! Box geometry: sample counts and per-axis voxel spacing.

use crate::cosmology::Cosmology;
use crate::error::GridError;
use std::fmt;

/// One of the three box axes. `Z` is the line-of-sight (spectral) axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Axis {
    /// First transverse axis.
    X,
    /// Second transverse axis.
    Y,
    /// Line-of-sight axis; real-valued input is one-sided along it.
    Z,
}

impl Axis {
    /// All axes in array order.
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Position of this axis in a `[_; 3]` shape or an `Array3` index.
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
        };
        f.write_str(name)
    }
}

/// Unit system for voxel spacing.
///
/// Every coordinate array is built from exactly one of these; callers pick
/// it per call rather than toggling shared state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Units {
    /// Velocity spacing (km/s for spectra).
    #[default]
    Velocity,
    /// Comoving length spacing (Mpc).
    Length,
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Units::Velocity => f.write_str("velocity"),
            Units::Length => f.write_str("length"),
        }
    }
}

/// An immutable regular 3D sampling of a box.
///
/// Holds the sample count of each axis and the voxel spacing in both
/// length and velocity units.
///
/// # Examples
///
/// ```
/// use skewer_core::{Axis, Grid, Units};
///
/// let grid = Grid::new([4, 4, 8], [1.0, 1.0, 0.5]).unwrap();
/// assert_eq!(grid.voxel_count(), 128);
/// assert_eq!(grid.line_count(), 16);
/// assert_eq!(grid.axis_spacing(Axis::Z, Units::Length), 0.5);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    shape: [usize; 3],
    length_spacing: [f64; 3],
    velocity_spacing: [f64; 3],
}

impl Grid {
    /// A grid whose spacing is the same in both unit systems.
    ///
    /// Useful for dimensionless synthetic boxes where the unit choice is
    /// irrelevant.
    pub fn new(shape: [usize; 3], spacing: [f64; 3]) -> Result<Self, GridError> {
        Self::with_spacings(shape, spacing, spacing)
    }

    /// A grid with distinct length and velocity spacing.
    pub fn with_spacings(
        shape: [usize; 3],
        length_spacing: [f64; 3],
        velocity_spacing: [f64; 3],
    ) -> Result<Self, GridError> {
        for axis in Axis::ALL {
            let i = axis.index();
            if shape[i] == 0 {
                return Err(GridError::EmptyAxis { axis });
            }
            check_spacing(axis, Units::Length, length_spacing[i])?;
            check_spacing(axis, Units::Velocity, velocity_spacing[i])?;
        }
        Ok(Self {
            shape,
            length_spacing,
            velocity_spacing,
        })
    }

    /// A grid spanning a comoving box of the given `extent` (Mpc per axis).
    ///
    /// The first and last samples sit on the box faces, so the length
    /// spacing is `extent / (N - 1)`. Velocity spacing is the length spacing
    /// times `H(z) a`. Single-sample axes have no defined spacing and are
    /// rejected.
    pub fn from_box_extent(
        shape: [usize; 3],
        extent: [f64; 3],
        cosmology: &Cosmology,
    ) -> Result<Self, GridError> {
        let to_velocity = cosmology.velocity_per_length();
        let mut length_spacing = [0.0; 3];
        let mut velocity_spacing = [0.0; 3];
        for axis in Axis::ALL {
            let i = axis.index();
            if shape[i] == 0 {
                return Err(GridError::EmptyAxis { axis });
            }
            length_spacing[i] = extent[i] / (shape[i] as f64 - 1.0);
            velocity_spacing[i] = length_spacing[i] * to_velocity;
        }
        Self::with_spacings(shape, length_spacing, velocity_spacing)
    }

    /// Sample counts `[Nx, Ny, Nz]`.
    pub fn shape(&self) -> [usize; 3] {
        self.shape
    }

    /// Sample count along one axis.
    pub fn samples(&self, axis: Axis) -> usize {
        self.shape[axis.index()]
    }

    /// Total number of voxels.
    pub fn voxel_count(&self) -> usize {
        self.shape.iter().product()
    }

    /// Number of lines of sight (`Nx * Ny`).
    pub fn line_count(&self) -> usize {
        self.shape[0] * self.shape[1]
    }

    /// Voxel spacing of all three axes in the requested units.
    pub fn spacing(&self, units: Units) -> [f64; 3] {
        match units {
            Units::Length => self.length_spacing,
            Units::Velocity => self.velocity_spacing,
        }
    }

    /// Voxel spacing of one axis in the requested units.
    pub fn axis_spacing(&self, axis: Axis, units: Units) -> f64 {
        self.spacing(units)[axis.index()]
    }
}

fn check_spacing(axis: Axis, units: Units, value: f64) -> Result<(), GridError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(GridError::InvalidSpacing { axis, units, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_uses_same_spacing_for_both_units() {
        let grid = Grid::new([2, 3, 4], [1.0, 2.0, 3.0]).unwrap();
        assert_eq!(grid.spacing(Units::Length), grid.spacing(Units::Velocity));
        assert_eq!(grid.samples(Axis::Y), 3);
        assert_eq!(grid.voxel_count(), 24);
        assert_eq!(grid.line_count(), 6);
    }

    #[test]
    fn zero_samples_rejected() {
        let result = Grid::new([4, 0, 4], [1.0; 3]);
        assert_eq!(result, Err(GridError::EmptyAxis { axis: Axis::Y }));
    }

    #[test]
    fn non_positive_spacing_rejected() {
        let result = Grid::new([4, 4, 4], [1.0, 1.0, 0.0]);
        assert!(matches!(
            result,
            Err(GridError::InvalidSpacing { axis: Axis::Z, .. })
        ));
        let result = Grid::with_spacings([4, 4, 4], [1.0; 3], [1.0, f64::NAN, 1.0]);
        assert!(matches!(
            result,
            Err(GridError::InvalidSpacing {
                axis: Axis::Y,
                units: Units::Velocity,
                ..
            })
        ));
    }

    #[test]
    fn box_extent_spacing_counts_intervals() {
        let cosmology = Cosmology::new(0.0, 70.0, 1.0).unwrap();
        let grid = Grid::from_box_extent([11, 11, 21], [10.0, 10.0, 10.0], &cosmology).unwrap();
        assert!((grid.axis_spacing(Axis::X, Units::Length) - 1.0).abs() < 1e-12);
        assert!((grid.axis_spacing(Axis::Z, Units::Length) - 0.5).abs() < 1e-12);
        // z = 0: a = 1 and H = H0.
        assert!((grid.axis_spacing(Axis::X, Units::Velocity) - 70.0).abs() < 1e-9);
    }

    #[test]
    fn box_extent_rejects_single_sample_axis() {
        let cosmology = Cosmology::new(2.0, 70.0, 0.3).unwrap();
        let result = Grid::from_box_extent([1, 4, 4], [10.0; 3], &cosmology);
        assert!(matches!(
            result,
            Err(GridError::InvalidSpacing { axis: Axis::X, .. })
        ));
    }
}
