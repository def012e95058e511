//! Gaussian random field generator.
//!
//! A realisation draws, at every voxel, a complex amplitude
//! `sqrt(P / 2) (n1 + i n2)` with `n1`, `n2` independent standard normals,
//! so that `E|F(k)|^2 = P(k)`. The mean mode is zeroed, the amplitudes are
//! made Hermitian, and the inverse FFT (normalised by the voxel count)
//! gives the configuration-space field.
//!
//! Respects the determinism contract: [`GaussianFieldGenerator::realise`]
//! seeds a ChaCha8 RNG from `seed XOR realisation`, so identical seeds
//! produce identical fields. Callers that manage their own stream use
//! [`GaussianFieldGenerator::realise_with_rng`].
//!
//! Constructed via the builder pattern: [`GaussianFieldGenerator::builder`].

use crate::hermitian::make_hermitian;
use ndarray::Array3;
use num_complex::Complex64;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use skewer_coords::GridCoordinates;
use skewer_core::fft::ifftn;
use skewer_core::field::shape3;
use skewer_core::{ComplexField, Grid, RealField, RealiseError, Units};
use skewer_spectrum::PowerSpectrumModel;

/// A deterministic Gaussian random field generator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GaussianFieldGenerator {
    seed: u64,
    units: Units,
}

/// Builder for [`GaussianFieldGenerator`].
///
/// Every setting has a default; [`build`](Self::build) cannot fail.
#[derive(Clone, Debug)]
pub struct GaussianFieldGeneratorBuilder {
    seed: u64,
    units: Units,
}

impl GaussianFieldGenerator {
    /// Create a new builder (seed 0, velocity units).
    pub fn builder() -> GaussianFieldGeneratorBuilder {
        GaussianFieldGeneratorBuilder {
            seed: 0,
            units: Units::default(),
        }
    }

    /// Base seed of the generator.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Unit system used to evaluate |k| for the model.
    pub fn units(&self) -> Units {
        self.units
    }

    /// Realisation number `realisation` of `model` on `grid`.
    ///
    /// # Errors
    ///
    /// Propagates model evaluation failures, and reports voxels whose power
    /// is undefined (no μ away from the origin) or not a valid variance.
    pub fn realise(
        &self,
        model: &PowerSpectrumModel,
        grid: &Grid,
        realisation: u64,
    ) -> Result<ComplexField, RealiseError> {
        tracing::debug!(
            seed = self.seed,
            realisation,
            shape = ?grid.shape(),
            "realising Gaussian field"
        );
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed ^ realisation);
        self.realise_with_rng(model, grid, &mut rng)
    }

    /// Like [`realise`](Self::realise), drawing from a caller-supplied RNG.
    pub fn realise_with_rng<R: Rng + ?Sized>(
        &self,
        model: &PowerSpectrumModel,
        grid: &Grid,
        rng: &mut R,
    ) -> Result<ComplexField, RealiseError> {
        let amplitudes = self.fourier_amplitudes(model, grid, rng)?;
        Ok(ifftn(&amplitudes))
    }

    /// Realise a field from power already evaluated on the grid.
    ///
    /// # Errors
    ///
    /// Returns [`RealiseError::ShapeMismatch`] if `power` does not have the
    /// grid's shape, or [`RealiseError::InvalidPower`] for a negative or
    /// non-finite entry.
    pub fn realise_from_power<R: Rng + ?Sized>(
        &self,
        power: &RealField,
        grid: &Grid,
        rng: &mut R,
    ) -> Result<ComplexField, RealiseError> {
        let amplitudes = self.amplitudes_from_power(power, grid, rng)?;
        Ok(ifftn(&amplitudes))
    }

    /// Hermitian Fourier amplitudes for `model` on `grid`, before the
    /// inverse transform.
    pub fn fourier_amplitudes<R: Rng + ?Sized>(
        &self,
        model: &PowerSpectrumModel,
        grid: &Grid,
        rng: &mut R,
    ) -> Result<ComplexField, RealiseError> {
        let coords = GridCoordinates::new(grid, self.units);
        let k = coords.magnitude_field();
        let mu = coords.angle_cosine_field();
        let evaluated = model.evaluate_field(&k, &mu)?;

        let mut power = Array3::zeros(k.dim());
        for (((i, j, l), p), &kv) in evaluated.indexed_iter().zip(k.iter()) {
            power[[i, j, l]] = match p {
                Some(v) => *v,
                // Only the mean mode lacks an angle; it is zeroed anyway.
                None if kv == 0.0 => 0.0,
                None => return Err(RealiseError::UndefinedPower { index: [i, j, l] }),
            };
        }
        self.draw(&power, &k, rng)
    }

    /// Hermitian Fourier amplitudes for a pre-evaluated power array.
    pub fn amplitudes_from_power<R: Rng + ?Sized>(
        &self,
        power: &RealField,
        grid: &Grid,
        rng: &mut R,
    ) -> Result<ComplexField, RealiseError> {
        if shape3(power) != grid.shape() {
            return Err(RealiseError::ShapeMismatch {
                expected: grid.shape(),
                actual: shape3(power),
            });
        }
        let k = GridCoordinates::new(grid, self.units).magnitude_field();
        self.draw(power, &k, rng)
    }

    fn draw<R: Rng + ?Sized>(
        &self,
        power: &RealField,
        k: &RealField,
        rng: &mut R,
    ) -> Result<ComplexField, RealiseError> {
        if let Some(((i, j, l), &value)) = power
            .indexed_iter()
            .find(|(_, v)| !v.is_finite() || **v < 0.0)
        {
            return Err(RealiseError::InvalidPower {
                index: [i, j, l],
                value,
            });
        }

        // Both normal arrays are drawn in full, real then imaginary, so the
        // stream layout does not depend on the power values.
        let n1 = Array3::from_shape_simple_fn(power.dim(), || standard_normal(rng));
        let n2 = Array3::from_shape_simple_fn(power.dim(), || standard_normal(rng));

        let mut amplitudes: ComplexField = Array3::zeros(power.dim());
        for ((((slot, &p), &kv), &a), &b) in amplitudes
            .iter_mut()
            .zip(power.iter())
            .zip(k.iter())
            .zip(n1.iter())
            .zip(n2.iter())
        {
            if kv != 0.0 {
                *slot = Complex64::new(a, b) * (0.5 * p).sqrt();
            }
        }
        Ok(make_hermitian(&amplitudes))
    }
}

impl GaussianFieldGeneratorBuilder {
    /// Set the base seed (default: 0).
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the unit system for |k| (default: velocity).
    pub fn units(mut self, units: Units) -> Self {
        self.units = units;
        self
    }

    /// Build the generator.
    pub fn build(self) -> GaussianFieldGenerator {
        GaussianFieldGenerator {
            seed: self.seed,
            units: self.units,
        }
    }
}

/// Standard normal sample via the Box-Muller transform.
fn standard_normal<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    let u1: f64 = rng.random::<f64>().max(1e-300); // avoid ln(0)
    let u2: f64 = rng.random();
    (-2.0 * u1.ln()).sqrt() * (std::f64::consts::TAU * u2).cos()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hermitian::is_hermitian;
    use skewer_spectrum::{Anisotropy, PowerLaw};

    fn grid(n: usize) -> Grid {
        Grid::new([n, n, n], [1.0; 3]).unwrap()
    }

    fn generator() -> GaussianFieldGenerator {
        GaussianFieldGenerator::builder().seed(42).build()
    }

    #[test]
    fn builder_defaults() {
        let g = GaussianFieldGenerator::builder().build();
        assert_eq!(g.seed(), 0);
        assert_eq!(g.units(), Units::Velocity);
        let g = GaussianFieldGenerator::builder()
            .seed(7)
            .units(Units::Length)
            .build();
        assert_eq!((g.seed(), g.units()), (7, Units::Length));
    }

    #[test]
    fn box_muller_moments() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let n = 20_000;
        let samples: Vec<f64> = (0..n).map(|_| standard_normal(&mut rng)).collect();
        let mean = samples.iter().sum::<f64>() / n as f64;
        let var = samples.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / n as f64;
        assert!(mean.abs() < 0.05, "mean {mean}");
        assert!((var - 1.0).abs() < 0.05, "variance {var}");
    }

    #[test]
    fn mean_mode_is_zero_and_amplitudes_hermitian() {
        let model = PowerSpectrumModel::isotropic(PowerLaw::new(-2.0, 1.0, 1.0).unwrap());
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let amps = generator().fourier_amplitudes(&model, &grid(4), &mut rng).unwrap();
        assert_eq!(amps[[0, 0, 0]], Complex64::new(0.0, 0.0));
        assert!(is_hermitian(&amps, 0.0));
    }

    #[test]
    fn anisotropic_model_maps_origin_to_zero() {
        let model = PowerSpectrumModel::anisotropic(
            PowerLaw::new(0.0, 1.0, 1.0).unwrap(),
            Anisotropy::new(&[0.0, 0.0, 0.5]).unwrap(),
        );
        let field = generator().realise(&model, &grid(4), 0).unwrap();
        assert_eq!(field.dim(), (4, 4, 4));
    }

    #[test]
    fn negative_power_is_rejected() {
        // 1 - 5 L2(1) = -4 along the line of sight.
        let model = PowerSpectrumModel::anisotropic(
            PowerLaw::new(0.0, 1.0, 1.0).unwrap(),
            Anisotropy::new(&[0.0, 0.0, -5.0]).unwrap(),
        );
        let err = generator().realise(&model, &grid(4), 0).unwrap_err();
        assert!(matches!(err, RealiseError::InvalidPower { value, .. } if value < 0.0));
    }

    #[test]
    fn power_shape_must_match_grid() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let power = Array3::from_elem((4, 4, 3), 1.0);
        let err = generator()
            .realise_from_power(&power, &grid(4), &mut rng)
            .unwrap_err();
        assert_eq!(
            err,
            RealiseError::ShapeMismatch {
                expected: [4, 4, 4],
                actual: [4, 4, 3],
            }
        );
    }

    #[test]
    fn model_errors_propagate() {
        let model = PowerSpectrumModel::isotropic(
            skewer_spectrum::Tabulated::new(
                &[(0.5, 1.0), (1.0, 2.0)],
                Default::default(),
                Default::default(),
            )
            .unwrap(),
        );
        let err = generator().realise(&model, &grid(4), 0).unwrap_err();
        assert!(matches!(err, RealiseError::Model(_)));
    }
}
