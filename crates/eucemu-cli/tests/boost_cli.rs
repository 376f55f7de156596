use eucemu_core::emulator::{ModelVersion, PceModel, PceTerm, PrincipalComponent};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

const REFERENCE_PARAMETERS: [&str; 6] = ["0.05", "0.3", "0.96", "0.7", "-1.0", "0.8"];

fn fixture_model() -> PceModel {
    PceModel {
        name: "EuclidEmulator".to_string(),
        version: ModelVersion { major: 1, minor: 1 },
        parameter_bounds: [
            [0.01, 0.1],
            [0.1, 0.5],
            [0.9, 1.0],
            [0.6, 0.8],
            [-1.5, -0.5],
            [0.7, 0.9],
        ],
        k_values: vec![0.01, 0.1, 1.0],
        redshift_nodes: vec![0.0, 2.5, 5.0],
        mean_log_boost: vec![
            vec![0.0, 0.1, 0.2],
            vec![0.0, 0.05, 0.1],
            vec![0.0, 0.0, 0.0],
        ],
        principal_components: vec![PrincipalComponent {
            basis: vec![vec![0.0, 0.0, 0.01]; 3],
            terms: vec![PceTerm {
                degrees: [0, 0, 0, 0, 0, 1],
                coefficient: 0.0,
            }],
        }],
    }
}

fn write_model(temp: &TempDir) -> PathBuf {
    let path = temp.path().join("ee_model.json");
    fs::write(
        &path,
        serde_json::to_string_pretty(&fixture_model()).expect("model should serialize"),
    )
    .expect("model should be written");
    path
}

fn run_eucemu(model: &Path, values: &[&str]) -> Output {
    let binary_path = env!("CARGO_BIN_EXE_eucemu");
    let mut command = Command::new(binary_path);
    command.arg("--model").arg(model).args(values);
    command.env_remove("RUST_LOG");
    command.output().expect("eucemu should run")
}

fn with_redshifts(redshifts: &[&'static str]) -> Vec<&'static str> {
    REFERENCE_PARAMETERS
        .iter()
        .copied()
        .chain(redshifts.iter().copied())
        .collect()
}

fn blocks(stdout: &str) -> Vec<Vec<String>> {
    let mut blocks: Vec<Vec<String>> = Vec::new();
    for line in stdout.lines() {
        if line == "Next redshift" {
            blocks.push(Vec::new());
        } else {
            blocks
                .last_mut()
                .expect("data line must follow a block marker")
                .push(line.to_string());
        }
    }
    blocks
}

#[test]
fn prints_one_block_per_redshift_with_every_wavenumber() {
    let temp = TempDir::new().expect("tempdir should be created");
    let model = write_model(&temp);

    let output = run_eucemu(&model, &with_redshifts(&["0.0", "1.0", "5.0"]));
    assert!(
        output.status.success(),
        "command should succeed, stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    let parsed = blocks(&stdout);
    assert_eq!(parsed.len(), 3);
    assert!(parsed.iter().all(|block| block.len() == 3));
    assert_eq!(
        parsed[0],
        vec![
            "0.010000\t1.000000",
            "0.100000\t1.258925",
            "1.000000\t1.584893"
        ]
    );
    assert_eq!(
        parsed[2],
        vec![
            "0.010000\t1.000000",
            "0.100000\t1.000000",
            "1.000000\t1.000000"
        ]
    );
}

#[test]
fn stderr_reports_banner_cosmology_and_completion() {
    let temp = TempDir::new().expect("tempdir should be created");
    let model = write_model(&temp);

    let output = run_eucemu(&model, &with_redshifts(&["0.0", "1.0"]));
    assert!(output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.starts_with("# EuclidEmulator Version 1.1\n"));
    assert!(stderr.contains(
        "#\n# Cosmology:\n#\tdOmega0: 0.61224490\n#\tdOmegaRad: 0.00008538\n#\tdOmegaDE: 0.38766972\n\n"
    ));
    assert!(stderr.trim_end().ends_with("Done!"));
}

#[test]
fn block_order_follows_input_order() {
    let temp = TempDir::new().expect("tempdir should be created");
    let model = write_model(&temp);

    let forward = run_eucemu(&model, &with_redshifts(&["0.0", "5.0"]));
    let reversed = run_eucemu(&model, &with_redshifts(&["5.0", "0.0"]));
    assert!(forward.status.success() && reversed.status.success());

    let forward_blocks = blocks(&String::from_utf8_lossy(&forward.stdout));
    let reversed_blocks = blocks(&String::from_utf8_lossy(&reversed.stdout));
    assert_ne!(forward_blocks[0], forward_blocks[1]);
    assert_eq!(forward_blocks[0], reversed_blocks[1]);
    assert_eq!(forward_blocks[1], reversed_blocks[0]);
}

#[test]
fn repeated_runs_are_byte_identical() {
    let temp = TempDir::new().expect("tempdir should be created");
    let model = write_model(&temp);
    let values = with_redshifts(&["0.3", "2.2", "4.9"]);

    let first = run_eucemu(&model, &values);
    let second = run_eucemu(&model, &values);
    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);
    assert_eq!(first.stderr, second.stderr);
}

#[test]
fn leading_dot_negative_values_are_parsed_as_numbers() {
    let temp = TempDir::new().expect("tempdir should be created");
    let model = write_model(&temp);

    let output = run_eucemu(&model, &["0.05", "0.3", "0.96", "0.7", "-.9", "0.8", "-.5"]);
    assert!(
        output.status.success(),
        "command should succeed, stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let parsed = blocks(&String::from_utf8_lossy(&output.stdout));
    assert_eq!(parsed.len(), 1);
    assert_eq!(parsed[0].len(), 3);
    assert!(parsed[0][0].starts_with("0.010000\t"));
}

#[test]
fn banner_is_printed_even_when_arguments_do_not_parse() {
    let temp = TempDir::new().expect("tempdir should be created");
    let model = write_model(&temp);

    for values in [
        Vec::new(),
        vec!["0.05", "0.3", "0.96", "0.7", "-1.0", "0.8", "zero"],
    ] {
        let output = run_eucemu(&model, &values);
        assert_eq!(output.status.code(), Some(2));
        assert!(output.stdout.is_empty());

        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.starts_with("# EuclidEmulator Version 1.1\n"), "stderr: {stderr}");
        assert!(stderr.contains("ERROR: [INPUT.CLI_USAGE]"));
    }
}

#[test]
fn redshift_above_five_aborts_without_stdout() {
    let temp = TempDir::new().expect("tempdir should be created");
    let model = write_model(&temp);

    let output = run_eucemu(&model, &with_redshifts(&["0.0", "5.01"]));
    assert_eq!(output.status.code(), Some(3));
    assert!(output.stdout.is_empty());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERROR: [DOMAIN.REDSHIFT]"));
    assert!(stderr.contains("FATAL EXIT CODE: 3"));
    assert!(!stderr.contains("Done!"));
}

#[test]
fn fewer_than_seven_values_aborts_without_stdout() {
    let temp = TempDir::new().expect("tempdir should be created");
    let model = write_model(&temp);

    let output = run_eucemu(&model, &REFERENCE_PARAMETERS);
    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("ERROR: [INPUT.CLI_USAGE]"));

    let output = run_eucemu(&model, &[]);
    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());
}

#[test]
fn missing_model_is_an_io_failure() {
    let temp = TempDir::new().expect("tempdir should be created");
    let missing = temp.path().join("absent.json");

    let output = run_eucemu(&missing, &with_redshifts(&["1.0"]));
    assert_eq!(output.status.code(), Some(4));
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("ERROR: [IO.MODEL_READ]"));
}

#[test]
fn parameters_outside_model_range_are_rejected() {
    let temp = TempDir::new().expect("tempdir should be created");
    let model = write_model(&temp);

    let output = run_eucemu(
        &model,
        &["0.05", "0.3", "0.96", "0.95", "-1.0", "0.8", "1.0"],
    );
    assert_eq!(output.status.code(), Some(3));
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("DOMAIN.PARAMETER_BOUNDS"));
}
