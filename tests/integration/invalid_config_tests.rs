//! These tests are for testing some invalid config-file-specific options.

use assert_cmd::prelude::*;
use predicates::prelude::*;

use crate::util::ifstats_command;

fn config_command(config: &str) -> std::process::Command {
    let mut cmd = ifstats_command(&["-C", config]);
    cmd.args(["-n", "1"]);

    cmd
}

#[test]
fn test_toml_mismatch_type() {
    config_command("./tests/invalid_configs/toml_mismatch_type.toml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration file error"));
}

#[test]
fn test_invalid_toml() {
    config_command("./tests/invalid_configs/invalid_toml.toml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration file error"));
}

#[test]
fn test_invalid_rate() {
    config_command("./tests/invalid_configs/invalid_rate.toml")
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "'rate' was set with an invalid value",
        ));
}

#[test]
fn test_small_rate() {
    config_command("./tests/invalid_configs/small_rate.toml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("'rate' must be greater"));
}

#[test]
fn test_invalid_link_speed() {
    config_command("./tests/invalid_configs/invalid_link_speed.toml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration file error"));
}

#[test]
fn test_invalid_cache_duration() {
    config_command("./tests/invalid_configs/invalid_cache_duration.toml")
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "'duration' was set with an invalid value",
        ));
}

#[test]
fn test_args_still_validated_with_config() {
    config_command("./tests/valid_configs/eth0.toml")
        .args(["-r", "10"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("'--rate' must be greater"));
}
