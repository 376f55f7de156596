pub mod errors;

pub use errors::{EmuError, EmuErrorCategory, EmuResult};

use crate::common::constants::{
    COSMOLOGY_PARAMETER_COUNT, MAX_REDSHIFT, MIN_POSITIONAL_VALUES, PARAMETER_NAMES,
};
use std::fmt::{Display, Formatter};

/// The six cosmological parameters in the emulator's fixed input order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CosmologyParameters {
    pub omega_b: f64,
    pub omega_m: f64,
    pub n_s: f64,
    pub h: f64,
    pub w_0: f64,
    pub sigma_8: f64,
}

impl CosmologyParameters {
    pub fn new(omega_b: f64, omega_m: f64, n_s: f64, h: f64, w_0: f64, sigma_8: f64) -> Self {
        Self {
            omega_b,
            omega_m,
            n_s,
            h,
            w_0,
            sigma_8,
        }
    }

    pub fn from_array(values: [f64; COSMOLOGY_PARAMETER_COUNT]) -> Self {
        let [omega_b, omega_m, n_s, h, w_0, sigma_8] = values;
        Self::new(omega_b, omega_m, n_s, h, w_0, sigma_8)
    }

    pub fn as_array(&self) -> [f64; COSMOLOGY_PARAMETER_COUNT] {
        [
            self.omega_b,
            self.omega_m,
            self.n_s,
            self.h,
            self.w_0,
            self.sigma_8,
        ]
    }

    pub fn ensure_finite(&self) -> EmuResult<()> {
        for (name, value) in PARAMETER_NAMES.iter().zip(self.as_array()) {
            if !value.is_finite() {
                return Err(EmuError::domain(
                    "DOMAIN.PARAMETER_NOT_FINITE",
                    format!("cosmological parameter '{name}' must be finite, got {value}"),
                ));
            }
        }
        Ok(())
    }
}

/// Non-empty list of requested redshifts, each at most [`MAX_REDSHIFT`].
#[derive(Debug, Clone, PartialEq)]
pub struct RedshiftList {
    values: Vec<f64>,
}

impl RedshiftList {
    pub fn new(values: Vec<f64>) -> EmuResult<Self> {
        if values.is_empty() {
            return Err(EmuError::usage(
                "INPUT.NO_REDSHIFT",
                "at least one redshift value is required",
            ));
        }

        for (index, z) in values.iter().copied().enumerate() {
            if !z.is_finite() {
                return Err(EmuError::domain(
                    "DOMAIN.REDSHIFT_NOT_FINITE",
                    format!("redshift at index {index} must be finite, got {z}"),
                ));
            }
            if z > MAX_REDSHIFT {
                return Err(EmuError::domain(
                    "DOMAIN.REDSHIFT",
                    format!("redshift {z} at index {index} exceeds the supported maximum {MAX_REDSHIFT}"),
                ));
            }
        }

        Ok(Self { values })
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Parsed positional input: `omega_b omega_m n_s h w_0 sigma_8 z1 [z2 ... zN]`.
#[derive(Debug, Clone, PartialEq)]
pub struct BoostRequest {
    pub cosmology: CosmologyParameters,
    pub redshifts: RedshiftList,
}

impl BoostRequest {
    pub fn from_positional(values: &[f64]) -> EmuResult<Self> {
        if values.len() < MIN_POSITIONAL_VALUES {
            return Err(EmuError::usage(
                "INPUT.CLI_USAGE",
                format!(
                    "expected 6 cosmological parameters followed by at least one redshift ({} values), got {}",
                    MIN_POSITIONAL_VALUES,
                    values.len()
                ),
            ));
        }

        let (parameters, redshifts) = values.split_at(COSMOLOGY_PARAMETER_COUNT);
        let mut fixed = [0.0; COSMOLOGY_PARAMETER_COUNT];
        fixed.copy_from_slice(parameters);

        Ok(Self {
            cosmology: CosmologyParameters::from_array(fixed),
            redshifts: RedshiftList::new(redshifts.to_vec())?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmulatorVersion {
    pub major: u32,
    pub minor: u32,
}

impl Display for EmulatorVersion {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// Raw emulator output before the length cross-check.
///
/// `boost_length` is the per-redshift boost count the emulator reports; it must
/// agree with `k_values.len()`.
#[derive(Debug, Clone, PartialEq)]
pub struct EmulatorOutput {
    pub k_values: Vec<f64>,
    pub boost: Vec<f64>,
    pub boost_length: usize,
}

/// Checked boost spectra laid out redshift-major: `boost[i * M + j]`.
#[derive(Debug, Clone, PartialEq)]
pub struct EmulatorResult {
    k_values: Vec<f64>,
    boost: Vec<f64>,
    redshift_count: usize,
}

impl EmulatorResult {
    pub fn from_output(output: EmulatorOutput, redshift_count: usize) -> EmuResult<Self> {
        let k_count = output.k_values.len();
        if output.boost_length != k_count {
            return Err(EmuError::integrity(
                "INTEGRITY.LENGTH_MISMATCH",
                format!(
                    "emulator reported {} boost values per redshift but {} wavenumbers",
                    output.boost_length, k_count
                ),
            ));
        }
        if k_count == 0 {
            return Err(EmuError::integrity(
                "INTEGRITY.EMPTY_SPECTRUM",
                "emulator returned no wavenumbers",
            ));
        }
        let expected = redshift_count * k_count;
        if output.boost.len() != expected {
            return Err(EmuError::integrity(
                "INTEGRITY.BOOST_SIZE",
                format!(
                    "emulator returned {} boost values, expected {} ({} redshifts x {} wavenumbers)",
                    output.boost.len(),
                    expected,
                    redshift_count,
                    k_count
                ),
            ));
        }

        Ok(Self {
            k_values: output.k_values,
            boost: output.boost,
            redshift_count,
        })
    }

    pub fn k_values(&self) -> &[f64] {
        &self.k_values
    }

    pub fn boost(&self) -> &[f64] {
        &self.boost
    }

    pub fn k_count(&self) -> usize {
        self.k_values.len()
    }

    pub fn redshift_count(&self) -> usize {
        self.redshift_count
    }

    pub fn boost_for_redshift(&self, index: usize) -> Option<&[f64]> {
        self.blocks().nth(index)
    }

    /// One boost slice per requested redshift, in request order.
    pub fn blocks(&self) -> std::slice::ChunksExact<'_, f64> {
        self.boost.chunks_exact(self.k_values.len())
    }
}
