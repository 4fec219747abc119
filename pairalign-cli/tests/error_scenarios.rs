mod common;

use anyhow::Result;
use predicates::prelude::*;

use common::*;

#[test]
fn test_missing_second_sequence() {
    let mut cmd = pairalign_cmd();
    cmd.arg("align").arg("ACGT");

    cmd.assert()
        .failure()
        .code(4)
        .stderr(predicate::str::contains("Error"))
        .stderr(predicate::str::contains("missing second sequence"));
}

#[test]
fn test_too_many_sequences() {
    let mut cmd = pairalign_cmd();
    cmd.arg("align").arg("A").arg("C").arg("G");

    cmd.assert()
        .failure()
        .code(4)
        .stderr(predicate::str::contains("too many sequences"));
}

#[test]
fn test_missing_sequence_file() -> Result<()> {
    let env = TestEnvironment::new()?;

    let mut cmd = pairalign_cmd();
    cmd.arg("align")
        .arg("--x-file")
        .arg(env.path("absent.fa"))
        .arg("ACGT");

    cmd.assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("IO error"));

    Ok(())
}

#[test]
fn test_non_ascii_gap_symbol() {
    let mut cmd = pairalign_cmd();
    cmd.arg("align").arg("AC").arg("AG").arg("--gap").arg("é");

    cmd.assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("gap symbol"));
}

#[test]
fn test_corrupted_config_file() -> Result<()> {
    let env = TestEnvironment::new()?;
    let config = env.create_file("broken.toml", "[scoring\nmatch_score = ")?;

    let mut cmd = pairalign_cmd();
    cmd.arg("align").arg("AC").arg("AG").arg("--config").arg(&config);

    cmd.assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Failed to parse config"));

    Ok(())
}

#[test]
fn test_zero_parallel_threshold_in_config() -> Result<()> {
    let env = TestEnvironment::new()?;
    let config = env.create_file("zero.toml", "[performance]\nmin_parallel_cells = 0\n")?;

    let mut cmd = pairalign_cmd();
    cmd.arg("config").arg("show").arg("--config").arg(&config);

    cmd.assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("min_parallel_cells"));

    Ok(())
}

#[test]
fn test_config_init_does_not_overwrite() -> Result<()> {
    let env = TestEnvironment::new()?;
    let path = env.create_file("existing.toml", "# keep me\n")?;

    let mut cmd = pairalign_cmd();
    cmd.arg("config").arg("init").arg(&path);

    cmd.assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("already exists"));
    assert_eq!(std::fs::read_to_string(&path)?, "# keep me\n");

    Ok(())
}

#[test]
fn test_unknown_algorithm_is_usage_error() {
    let mut cmd = pairalign_cmd();
    cmd.arg("align")
        .arg("AC")
        .arg("AG")
        .arg("--algorithm")
        .arg("smith-waterman");

    // Rejected by argument parsing, never a panic
    cmd.assert().failure().code(predicate::ne(101));
}
