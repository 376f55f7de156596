pub mod model;
pub mod pce;

pub use model::{ModelVersion, PceModel, PceTerm, PrincipalComponent};
pub use pce::PceEmulator;

use crate::domain::{
    BoostRequest, CosmologyParameters, EmuResult, EmulatorOutput, EmulatorResult, EmulatorVersion,
    RedshiftList,
};

/// Produces boost spectra for a cosmology at a list of redshifts.
///
/// Implementations return every requested redshift in one call, laid out
/// redshift-major, and report the per-redshift boost length alongside the
/// wavenumbers so callers can cross-check the two.
pub trait BoostEmulator {
    fn name(&self) -> &str;

    fn version(&self) -> EmulatorVersion;

    fn evaluate(
        &self,
        cosmology: &CosmologyParameters,
        redshifts: &RedshiftList,
    ) -> EmuResult<EmulatorOutput>;
}

/// Single emulator call for the whole request followed by the length integrity check.
pub fn run_emulator<E>(emulator: &E, request: &BoostRequest) -> EmuResult<EmulatorResult>
where
    E: BoostEmulator + ?Sized,
{
    tracing::debug!(
        emulator = emulator.name(),
        version = %emulator.version(),
        redshift_count = request.redshifts.len(),
        "invoking emulator"
    );
    let output = emulator.evaluate(&request.cosmology, &request.redshifts)?;
    EmulatorResult::from_output(output, request.redshifts.len())
}
