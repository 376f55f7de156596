//! Physical and emulator-wide constants.
//!
//! The radiation density and the redshift ceiling were fixed when the emulator
//! was trained and must be used unchanged wherever its outputs are consumed.

pub const PI: f64 = std::f64::consts::PI;

/// Physical radiation density `omega_rad = Omega_rad h^2` for a CMB temperature of 2.755 K.
pub const OMEGA_RAD: f64 = 4.183_709_411_969_527e-5;

/// CMB temperature in Kelvin matching [`OMEGA_RAD`].
pub const T_CMB_KELVIN: f64 = 2.755;

/// Largest redshift the emulator accepts.
pub const MAX_REDSHIFT: f64 = 5.0;

pub const COSMOLOGY_PARAMETER_COUNT: usize = 6;

/// Six cosmological parameters plus at least one redshift.
pub const MIN_POSITIONAL_VALUES: usize = COSMOLOGY_PARAMETER_COUNT + 1;

pub const EMULATOR_NAME: &str = "EuclidEmulator";
pub const EMULATOR_VERSION_MAJOR: u32 = 1;
pub const EMULATOR_VERSION_MINOR: u32 = 1;

pub const PARAMETER_NAMES: [&str; COSMOLOGY_PARAMETER_COUNT] =
    ["omega_b", "omega_m", "n_s", "h", "w_0", "sigma_8"];
