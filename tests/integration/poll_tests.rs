//! Polls fixture tables through the binary.

use std::{
    fs,
    io::{BufRead, BufReader, Read},
    process::Stdio,
};

use assert_cmd::prelude::*;
use predicates::prelude::*;

use crate::util::{fixture_ifstats_command, ifstats_command, FIXTURE_TABLE};

#[test]
fn test_reads_row() {
    fixture_ifstats_command("eth0")
        .assert()
        .success()
        .stdout(predicate::str::diff(
            "eth0 rx_bytes=987654321 rx_packets=654321 tx_bytes=123456789 tx_packets=321654 \
             bit_rate=4200000\n",
        ));
}

#[test]
fn test_reads_loopback() {
    fixture_ifstats_command("lo")
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "lo rx_bytes=1845233 rx_packets=18212 tx_bytes=1845233 tx_packets=18212",
        ));
}

#[test]
fn test_wrapped_and_hex_counters() {
    fixture_ifstats_command("wlan0")
        .assert()
        .success()
        .stdout(predicate::str::contains("rx_bytes=4294967295 rx_packets=77 tx_bytes=16 tx_packets=2"));
}

#[test]
fn test_no_prefix_match() {
    fixture_ifstats_command("eth1")
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Interface 'eth1' was not found"));
}

#[test]
fn test_empty_interface() {
    fixture_ifstats_command("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid argument"));
}

#[test]
fn test_missing_table() {
    ifstats_command(&[
        "-C",
        "./tests/valid_configs/empty_config.toml",
        "--table",
        "./tests/fixtures/does_not_exist",
        "-i",
        "eth0",
        "-n",
        "1",
    ])
    .assert()
    .failure()
    .stderr(predicate::str::contains("Resource unavailable"));
}

#[test]
fn test_config_file() {
    ifstats_command(&["-C", "./tests/valid_configs/eth0.toml", "-n", "2"])
        .assert()
        .success()
        .stdout(predicate::str::diff(
            "eth0 rx_bytes=987654321 rx_packets=654321 tx_bytes=123456789 tx_packets=321654 \
             bit_rate=4200000\n"
                .repeat(2),
        ));
}

/// Polls `table` twice a second apart, deleting it right after the first poll
/// prints. Returns the exit status, stdout, and stderr.
fn poll_then_delete_table(extra_args: &[&str]) -> (bool, String, String) {
    let dir = tempfile::tempdir().unwrap();
    let table = dir.path().join("net_dev");
    fs::copy(FIXTURE_TABLE, &table).unwrap();

    let mut child = ifstats_command(&["-C", "./tests/valid_configs/empty_config.toml"])
        .arg("--table")
        .arg(&table)
        .args(["-i", "eth0", "-n", "2", "-r", "1s"])
        .args(extra_args)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();

    let mut stdout = BufReader::new(child.stdout.take().unwrap());
    let mut first = String::new();
    stdout.read_line(&mut first).unwrap();

    fs::remove_file(&table).unwrap();

    let mut rest = String::new();
    stdout.read_to_string(&mut rest).unwrap();

    let output = child.wait_with_output().unwrap();

    (
        output.status.success(),
        first + &rest,
        String::from_utf8(output.stderr).unwrap(),
    )
}

#[test]
fn test_cached_reading_survives_table_changes() {
    let (success, stdout, _) = poll_then_delete_table(&["--cache_duration", "1h"]);

    // Once the table is gone, only the cache can answer the second poll.
    assert!(success);
    assert_eq!(stdout.lines().count(), 2);
    assert!(stdout.lines().all(|line| line.contains("rx_bytes=987654321")));
}

#[test]
fn test_no_cache_rereads_table() {
    let (success, stdout, stderr) = poll_then_delete_table(&["--no_cache"]);

    assert!(!success);
    assert_eq!(stdout.lines().count(), 1);
    assert!(stderr.contains("Resource unavailable"));
}

#[test]
fn test_creates_missing_config() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("ifstats").join("ifstats.toml");

    ifstats_command(&[])
        .arg("-C")
        .arg(&config)
        .args(["--table", FIXTURE_TABLE, "-i", "eth0", "-n", "1"])
        .assert()
        .success();

    assert!(config.exists());
}
