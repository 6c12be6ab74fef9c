//! Integration tests for CLI functionality and norm-file configuration

use std::fs;

use tempfile::TempDir;
use teprosif::diagnosis::{Category, ClassTotals, NormTable};
use teprosif::inventory::TestMode;
use teprosif::Error;

const CUSTOM_NORMS: &str = r#"{
  "full": [
    { "age": 3, "normal_max": 5, "risk_max": 8,
      "stats": {
        "total": { "mean": 4.0, "sd": 2.0 },
        "structure": { "mean": 2.0, "sd": 1.0 },
        "assimilation": { "mean": 1.0, "sd": 1.0 },
        "substitution": { "mean": 1.0, "sd": 1.0 }
      } }
  ],
  "short": [
    { "age": 4, "normal_max": 2, "risk_max": 3 }
  ]
}"#;

#[test]
fn test_load_norms_from_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("norms.json");
    fs::write(&path, CUSTOM_NORMS).unwrap();

    let table = NormTable::from_json_path(&path).unwrap();
    assert_eq!(table.classify(6, 3, TestMode::Full), Some(Category::Risk));
    assert_eq!(table.classify(4, 4, TestMode::Short), Some(Category::Deficit));

    // No age-5 band in this table
    let diagnosis = table.diagnose(ClassTotals::new(1, 0, 0), 5, TestMode::Full);
    assert!(diagnosis.category().is_none());

    let diagnosis = table.diagnose(ClassTotals::new(5, 0, 1), 3, TestMode::Full);
    let assessment = diagnosis.assessment().unwrap();
    assert!((assessment.z_score.unwrap() - 1.0).abs() < 1e-9);
    assert!(assessment.structure_predominant);
}

#[test]
fn test_written_builtin_norms_load_back() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("builtin.json");
    fs::write(&path, NormTable::builtin().to_json().unwrap()).unwrap();

    let table = NormTable::from_json_path(&path).unwrap();
    for age in 3..=6 {
        for mode in [TestMode::Full, TestMode::Short] {
            for total in [0, 10, 20, 40, 60] {
                assert_eq!(
                    table.classify(total, age, mode),
                    NormTable::builtin().classify(total, age, mode)
                );
            }
        }
    }
}

#[test]
fn test_invalid_norm_files() {
    let temp_dir = TempDir::new().unwrap();

    let garbage = temp_dir.path().join("garbage.json");
    fs::write(&garbage, "{ not json").unwrap();
    assert!(matches!(
        NormTable::from_json_path(&garbage),
        Err(Error::NormFormat(_))
    ));

    let inverted = temp_dir.path().join("inverted.json");
    fs::write(
        &inverted,
        r#"{"full": [], "short": [{"age": 3, "normal_max": 9, "risk_max": 1}]}"#,
    )
    .unwrap();
    assert!(matches!(
        NormTable::from_json_path(&inverted),
        Err(Error::InvalidNormTable(_))
    ));

    let missing = temp_dir.path().join("missing.json");
    assert!(matches!(
        NormTable::from_json_path(&missing),
        Err(Error::NormFileIo { .. })
    ));
}

#[cfg(feature = "cli")]
mod cli_integration_tests {
    use super::*;
    use clap::Parser;
    use teprosif::cli::{commands, Cli};

    fn run(args: &[&str]) -> anyhow::Result<()> {
        let mut argv = vec!["teprosif"];
        argv.extend_from_slice(args);
        commands::execute(Cli::try_parse_from(argv)?)
    }

    #[test]
    fn test_commands_succeed() {
        run(&["normalize", "guitarra", "helicóptero"]).unwrap();
        run(&["syllabify", "mariposa"]).unwrap();
        run(&["analyze", "33", "kitara"]).unwrap();
        run(&["--json", "compare", "tren", "ten"]).unwrap();
        run(&["diagnose", "--age", "4", "-e", "5", "-A", "3", "-s", "2"]).unwrap();
        run(&["diagnose", "--birth", "2020-02-10", "--evaluated", "2024-08-01"]).unwrap();
        run(&["items", "--mode", "short"]).unwrap();
        run(&["norms"]).unwrap();
    }

    #[test]
    fn test_custom_norms_flag() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("norms.json");
        fs::write(&path, CUSTOM_NORMS).unwrap();
        let path = path.to_str().unwrap();

        run(&["--norms", path, "diagnose", "--age", "3", "-e", "2"]).unwrap();
        // age 5 has no band: reported, not an error
        run(&["--norms", path, "diagnose", "--age", "5"]).unwrap();
    }

    #[test]
    fn test_json_diagnose_from_dates_is_pure_json() {
        let output = std::process::Command::new(env!("CARGO_BIN_EXE_teprosif"))
            .args([
                "--json",
                "diagnose",
                "--birth",
                "2020-03-15",
                "--evaluated",
                "2024-10-01",
                "-e",
                "3",
            ])
            .output()
            .unwrap();
        assert!(output.status.success());

        let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(value["outcome"], "scored");
        assert_eq!(value["age_band"], 4);
        assert_eq!(value["mode"], "full");
    }

    #[test]
    fn test_bad_norms_flag_fails() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("absent.json");
        let err = run(&["--norms", path.to_str().unwrap(), "norms"]).unwrap_err();
        assert!(err.to_string().contains("Failed to load norms"));
    }
}
