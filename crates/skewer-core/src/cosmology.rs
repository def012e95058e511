//! Background cosmology for converting comoving lengths to velocities.

use crate::error::GridError;

/// Flat ΛCDM background parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cosmology {
    redshift: f64,
    h0: f64,
    omega_m: f64,
}

impl Cosmology {
    /// Create a background cosmology.
    ///
    /// `h0` is the Hubble constant in km/s/Mpc; `omega_m` the matter density
    /// parameter, with Ω_Λ = 1 − Ω_m.
    pub fn new(redshift: f64, h0: f64, omega_m: f64) -> Result<Self, GridError> {
        if !redshift.is_finite() || redshift <= -1.0 {
            return Err(GridError::InvalidCosmology {
                reason: format!("redshift must be finite and > -1, got {redshift}"),
            });
        }
        if !h0.is_finite() || h0 <= 0.0 {
            return Err(GridError::InvalidCosmology {
                reason: format!("H0 must be finite and positive, got {h0}"),
            });
        }
        if !(0.0..=1.0).contains(&omega_m) {
            return Err(GridError::InvalidCosmology {
                reason: format!("omega_m must lie in [0, 1], got {omega_m}"),
            });
        }
        Ok(Self {
            redshift,
            h0,
            omega_m,
        })
    }

    /// Redshift of the box.
    pub fn redshift(&self) -> f64 {
        self.redshift
    }

    /// Hubble constant in km/s/Mpc.
    pub fn h0(&self) -> f64 {
        self.h0
    }

    /// Matter density parameter.
    pub fn omega_m(&self) -> f64 {
        self.omega_m
    }

    /// Scale factor `a = 1 / (1 + z)`.
    pub fn scale_factor(&self) -> f64 {
        1.0 / (1.0 + self.redshift)
    }

    /// Hubble parameter at the box redshift, km/s/Mpc.
    pub fn hubble(&self) -> f64 {
        let zp1 = 1.0 + self.redshift;
        self.h0 * (self.omega_m * zp1.powi(3) + 1.0 - self.omega_m).sqrt()
    }

    /// Factor converting comoving Mpc to km/s: `H(z) a`.
    pub fn velocity_per_length(&self) -> f64 {
        self.hubble() * self.scale_factor()
    }
}
