use std::{collections::HashMap, env, ffi::OsString, path::Path, process::Command};

pub fn abs_path(path: &str) -> OsString {
    let path = Path::new(path);

    if path.exists() {
        path.canonicalize().unwrap().into_os_string()
    } else {
        // We are going to trust that the path given is valid...
        path.to_owned().into_os_string()
    }
}

/// Returns a QEMU runner target given an architecture.
fn get_qemu_target(arch: &str) -> &str {
    match arch {
        "armv7" => "arm",
        "i686" => "i386",
        "powerpc" => "ppc",
        "powerpc64le" => "ppc64le",
        _ => arch,
    }
}

/// Running binary tests via cross needs the right runner, which we find by
/// looking for env variables that only show up while using cross.
fn cross_runner() -> Option<String> {
    const TARGET_RUNNER: &str = "CARGO_TARGET_RUNNER";
    const CROSS_RUNNER: &str = "CROSS_RUNNER";

    let env_mapping = env::vars_os()
        .filter_map(|(k, v)| {
            let (k, v) = (k.to_string_lossy(), v.to_string_lossy());

            if k.starts_with("CARGO_TARGET_") && k.ends_with("_RUNNER") && !v.is_empty() {
                Some((TARGET_RUNNER.to_string(), v.to_string()))
            } else if k == CROSS_RUNNER && !v.is_empty() {
                Some((k.to_string(), v.to_string()))
            } else {
                None
            }
        })
        .collect::<HashMap<_, _>>();

    if let Some(cross_runner) = env_mapping.get(CROSS_RUNNER) {
        if cross_runner == "qemu-user" {
            env_mapping.get(TARGET_RUNNER).map(|target_runner| {
                format!(
                    "qemu-{}",
                    get_qemu_target(target_runner.split_ascii_whitespace().last().unwrap())
                )
            })
        } else {
            None
        }
    } else {
        env_mapping.get(TARGET_RUNNER).cloned()
    }
}

const IFSTATS_EXE_PATH: &str = env!("CARGO_BIN_EXE_ifstats");
pub const FIXTURE_TABLE: &str = "./tests/fixtures/net_dev";
const DEFAULT_CFG: [&str; 2] = ["-C", "./tests/valid_configs/empty_config.toml"];

/// Returns the [`Command`] of a binary invocation of ifstats. Paths given to
/// `-C` and `--table` are made absolute.
pub fn ifstats_command(args: &[&str]) -> Command {
    let mut cmd = match cross_runner() {
        None => Command::new(IFSTATS_EXE_PATH),
        Some(runner) => {
            let mut cmd = Command::new(runner);
            cmd.arg(IFSTATS_EXE_PATH);
            cmd
        }
    };

    let mut prev = "";
    for arg in args.iter() {
        if prev == "-C" || prev == "--table" {
            cmd.arg(abs_path(arg));
        } else {
            cmd.arg(arg);
        }

        prev = arg;
    }

    cmd
}

/// Returns the [`Command`] of a binary invocation of ifstats with the empty
/// config file, so the user's own config is never read.
pub fn no_cfg_ifstats_command() -> Command {
    ifstats_command(&DEFAULT_CFG)
}

/// Like [`no_cfg_ifstats_command`], but polling the fixture table once.
pub fn fixture_ifstats_command(interface: &str) -> Command {
    let mut cmd = ifstats_command(&[
        DEFAULT_CFG[0],
        DEFAULT_CFG[1],
        "--table",
        FIXTURE_TABLE,
        "--link_speed",
        "none",
        "-n",
        "1",
    ]);
    cmd.arg("-i").arg(interface);

    cmd
}
