mod commands;
mod helpers;

use clap::Parser;
use eucemu_core::domain::EmuError;
use eucemu_core::serialization::banner_line;

pub fn run_from_env() -> i32 {
    helpers::init_tracing();
    let args: Vec<String> = std::env::args().skip(1).collect();

    match run(args) {
        Ok(code) => code,
        Err(error) => {
            let run_error = error.as_emu_error();
            tracing::debug!(category = run_error.category().as_str(), "run failed");
            eprintln!("{}", run_error.diagnostic_line());
            eprintln!("{}", run_error.fatal_exit_line());
            run_error.exit_code()
        }
    }
}

pub fn run<I, S>(args: I) -> Result<i32, CliError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let full_args = std::iter::once("eucemu".to_string())
        .chain(args.into_iter().map(Into::into))
        .collect::<Vec<_>>();
    parse_and_dispatch(full_args)
}

fn parse_and_dispatch(args: Vec<String>) -> Result<i32, CliError> {
    eprintln!("{}", banner_line());

    match Cli::try_parse_from(&args) {
        Ok(cli) => commands::run_boost_command(cli.boost),
        Err(err) => match err.kind() {
            clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => {
                print!("{}", err);
                Ok(0)
            }
            _ => Err(CliError::Usage(err.to_string().trim_end().to_string())),
        },
    }
}

#[derive(Parser)]
#[command(
    name = "eucemu",
    version,
    about = "Non-linear matter power spectrum boost factors from the EuclidEmulator"
)]
struct Cli {
    #[command(flatten)]
    boost: commands::BoostArgs,
}

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{0}")]
    Usage(String),
    #[error("{0}")]
    Run(EmuError),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl CliError {
    fn as_emu_error(&self) -> EmuError {
        match self {
            Self::Usage(message) => EmuError::usage("INPUT.CLI_USAGE", message.clone()),
            Self::Run(error) => error.clone(),
            Self::Internal(error) => EmuError::io_system("IO.CLI", format!("{error:#}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{CliError, run};
    use eucemu_core::domain::EmuErrorCategory;

    #[test]
    fn non_numeric_tokens_are_usage_errors() {
        let error = run(["0.05", "0.3", "0.96", "0.7", "-1.0", "0.8", "zero"])
            .expect_err("non-numeric redshift should fail");
        assert!(matches!(error, CliError::Usage(_)));
        assert_eq!(error.as_emu_error().category(), EmuErrorCategory::UsageError);
    }

    #[test]
    fn missing_positionals_are_usage_errors() {
        let error = run(Vec::<String>::new()).expect_err("no values should fail");
        assert_eq!(error.as_emu_error().exit_code(), 2);
    }

    #[test]
    fn too_few_values_fail_before_the_model_is_loaded() {
        let error = run(["--model", "does-not-exist.json", "0.05", "0.3", "0.96"])
            .expect_err("three values should fail");
        let run_error = error.as_emu_error();
        assert_eq!(run_error.category(), EmuErrorCategory::UsageError);
        assert_eq!(run_error.code(), "INPUT.CLI_USAGE");
    }

    #[test]
    fn leading_dot_negatives_reach_the_model_loader() {
        let error = run([
            "--model",
            "does-not-exist.json",
            "0.05",
            "0.3",
            "0.96",
            "0.7",
            "-.9",
            "0.8",
            "-.5",
        ])
        .expect_err("missing model should fail after parsing");
        assert_eq!(error.as_emu_error().code(), "IO.MODEL_READ");
    }

    #[test]
    fn redshift_bound_fails_before_the_model_is_loaded() {
        let error = run([
            "--model",
            "does-not-exist.json",
            "0.05",
            "0.3",
            "0.96",
            "0.7",
            "-1.0",
            "0.8",
            "5.5",
        ])
        .expect_err("z > 5 should fail");
        assert_eq!(error.as_emu_error().code(), "DOMAIN.REDSHIFT");
    }
}
