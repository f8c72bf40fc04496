//! These tests are mostly here just to ensure that invalid results will be
//! caught when passing arguments.

use assert_cmd::prelude::*;
use predicates::prelude::*;

use crate::util::{ifstats_command, no_cfg_ifstats_command};

#[test]
fn test_small_rate() {
    ifstats_command(&["-C", "./tests/valid_configs/empty_config.toml"])
        .args(["-i", "eth0", "-r", "249"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("'--rate' must be greater"));
}

#[test]
fn test_invalid_rate() {
    no_cfg_ifstats_command()
        .args(["-i", "eth0", "-r", "soon"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "'--rate' was set with an invalid value",
        ));
}

#[test]
fn test_invalid_cache_duration() {
    no_cfg_ifstats_command()
        .args(["-i", "eth0", "--cache_duration", "later"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "'--cache_duration' was set with an invalid value",
        ));
}

#[test]
fn test_missing_interface() {
    no_cfg_ifstats_command()
        .assert()
        .failure()
        .stderr(predicate::str::contains("no interface was given"));
}

#[test]
fn test_invalid_link_speed() {
    no_cfg_ifstats_command()
        .args(["-i", "eth0", "--link_speed", "fast"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value 'fast'"));
}

#[test]
fn test_invalid_count() {
    no_cfg_ifstats_command()
        .args(["-i", "eth0", "-n", "-1"])
        .assert()
        .failure();
}

#[test]
fn test_zero_count() {
    no_cfg_ifstats_command()
        .args(["-i", "eth0", "-n", "0"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("invalid value '0'"));
}

#[test]
fn test_version() {
    ifstats_command(&["--version"])
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}
