use super::CliError;
use super::helpers::write_all_flushed;
use eucemu_core::cosmology::DensityParameters;
use eucemu_core::domain::BoostRequest;
use eucemu_core::emulator::{BoostEmulator, PceEmulator, run_emulator};
use eucemu_core::serialization::render_boost_table;
use std::io::Write;
use std::path::PathBuf;

#[derive(clap::Args)]
pub(super) struct BoostArgs {
    /// Trained emulator model (JSON)
    #[arg(long, default_value = "ee_model.json")]
    model: PathBuf,

    /// omega_b omega_m n_s h w_0 sigma_8 followed by one or more redshifts (z <= 5).
    /// Any token after the first value is read as a number, so options go first.
    #[arg(
        value_name = "VALUE",
        required = true,
        num_args = 1..,
        allow_hyphen_values = true
    )]
    values: Vec<f64>,
}

pub(super) fn run_boost_command(args: BoostArgs) -> Result<i32, CliError> {
    let request = BoostRequest::from_positional(&args.values).map_err(CliError::Run)?;
    let densities = DensityParameters::from_cosmology(&request.cosmology);
    eprint!("{}", densities.render_diagnostic_block());

    let emulator = PceEmulator::from_path(&args.model).map_err(CliError::Run)?;
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    emit_boost_table(&emulator, &request, &mut handle)?;

    eprintln!("Done!");
    Ok(0)
}

/// Evaluates the emulator once and writes the full table only after every check passed.
pub(super) fn emit_boost_table<E, W>(
    emulator: &E,
    request: &BoostRequest,
    out: &mut W,
) -> Result<(), CliError>
where
    E: BoostEmulator + ?Sized,
    W: Write,
{
    let result = run_emulator(emulator, request).map_err(CliError::Run)?;
    let table = render_boost_table(&result);
    write_all_flushed(out, &table)?;

    tracing::info!(
        emulator = emulator.name(),
        redshift_count = result.redshift_count(),
        k_count = result.k_count(),
        "boost table written"
    );
    Ok(())
}
