//! Weak-lensing helpers built on the emulator's flat-geometry assumptions.
//!
//! The lens efficiency follows `q(chi) = int_chi^chi_lim n(chi') (1 - chi / chi') dchi'`
//! (Kilbinger 2015, eq. 24).

use crate::numerics::{
    NaturalCubicSpline, RombergError, SplineError, ln_gamma, romberg_uniform,
};

pub const DEFAULT_LENS_PRECISION: u32 = 12;

/// Ratio between the requested mean redshift and the distribution scale `z0`.
const Z_MEAN_TO_Z0: f64 = 1.412;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LensingError {
    #[error("source distribution '{field}' must be finite and > 0, index {index} got {value}")]
    NonPositiveSample {
        field: &'static str,
        index: usize,
        value: f64,
    },
    #[error("comoving distance must be finite and > 0, got {value}")]
    NonPositiveDistance { value: f64 },
    #[error("galaxy distribution parameter '{field}' must be finite and > 0, got {value}")]
    InvalidShape { field: &'static str, value: f64 },
    #[error(transparent)]
    Spline(#[from] SplineError),
    #[error(transparent)]
    Integration(#[from] RombergError),
}

/// Tabulated source distribution `n(chi)` over comoving distance.
///
/// Interpolated with a cubic spline in `log10 chi -> log10 n`.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceDistribution {
    log_spline: NaturalCubicSpline,
}

impl SourceDistribution {
    pub fn new(chi: &[f64], n: &[f64]) -> Result<Self, LensingError> {
        for (field, values) in [("chi", chi), ("n", n)] {
            if let Some((index, value)) = values
                .iter()
                .copied()
                .enumerate()
                .find(|(_, value)| !value.is_finite() || *value <= 0.0)
            {
                return Err(LensingError::NonPositiveSample {
                    field,
                    index,
                    value,
                });
            }
        }

        let log_chi: Vec<f64> = chi.iter().map(|value| value.log10()).collect();
        let log_n: Vec<f64> = n.iter().map(|value| value.log10()).collect();
        let log_spline = NaturalCubicSpline::new(&log_chi, &log_n)?;

        Ok(Self { log_spline })
    }

    pub fn density(&self, chi: f64) -> f64 {
        10.0_f64.powf(self.log_spline.evaluate(chi.log10()))
    }

    /// Lens efficiency at `chi`, integrated up to `chi_lim` on `2^precision + 1` samples.
    pub fn lens_efficiency(
        &self,
        chi: f64,
        chi_lim: f64,
        precision: u32,
    ) -> Result<f64, LensingError> {
        for value in [chi, chi_lim] {
            if !value.is_finite() || value <= 0.0 {
                return Err(LensingError::NonPositiveDistance { value });
            }
        }

        let integrand = |chi_prime: f64| self.density(chi_prime) * (1.0 - chi / chi_prime);
        Ok(romberg_uniform(integrand, chi, chi_lim, precision)?)
    }

    pub fn lens_efficiency_many(
        &self,
        distances: &[f64],
        chi_lim: f64,
        precision: u32,
    ) -> Result<Vec<f64>, LensingError> {
        distances
            .iter()
            .map(|chi| self.lens_efficiency(*chi, chi_lim, precision))
            .collect()
    }
}

/// Galaxy redshift distribution `p(z) ∝ (z / z0)^alpha exp(-(z / z0)^beta)` with
/// `z0 = z_mean / 1.412`, normalized to unit integral over `[0, inf)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GalaxyRedshiftDistribution {
    alpha: f64,
    beta: f64,
    z_mean: f64,
}

impl Default for GalaxyRedshiftDistribution {
    fn default() -> Self {
        Self {
            alpha: 2.0,
            beta: 1.5,
            z_mean: 0.9,
        }
    }
}

impl GalaxyRedshiftDistribution {
    pub fn new(alpha: f64, beta: f64, z_mean: f64) -> Result<Self, LensingError> {
        for (field, value) in [("alpha", alpha), ("beta", beta), ("z_mean", z_mean)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(LensingError::InvalidShape { field, value });
            }
        }
        Ok(Self {
            alpha,
            beta,
            z_mean,
        })
    }

    /// Same shape, different mean redshift.
    pub fn with_mean(&self, z_mean: f64) -> Result<Self, LensingError> {
        Self::new(self.alpha, self.beta, z_mean)
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn beta(&self) -> f64 {
        self.beta
    }

    pub fn z_mean(&self) -> f64 {
        self.z_mean
    }

    pub fn z0(&self) -> f64 {
        self.z_mean / Z_MEAN_TO_Z0
    }

    pub fn normalization(&self) -> f64 {
        self.z0() * ln_gamma((self.alpha + 1.0) / self.beta).exp() / self.beta
    }

    pub fn probability_density(&self, z: f64) -> f64 {
        if z <= 0.0 {
            return 0.0;
        }
        let scaled = z / self.z0();
        scaled.powf(self.alpha) * (-scaled.powf(self.beta)).exp() / self.normalization()
    }
}
