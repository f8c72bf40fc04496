//! Argument parsing via clap.

use std::path::PathBuf;

use clap::*;
use indoc::indoc;

use super::config::{ClockKind, LinkSpeed};

const TEMPLATE: &str = indoc! {
    "{name} {version}

    {about}

    {usage-heading} {usage}

    {all-args}"
};

const USAGE: &str = "ifstats [OPTIONS]";

/// Returns the parsed arguments.
pub fn get_args() -> Args {
    Args::parse()
}

/// The arguments for ifstats.
#[derive(Parser, Debug, Default)]
#[command(
    name = crate_name!(),
    version = crate_version!(),
    about = crate_description!(),
    color = ColorChoice::Auto,
    help_template = TEMPLATE,
    override_usage = USAGE,
)]
pub struct Args {
    #[command(flatten)]
    pub general_args: GeneralArgs,

    #[command(flatten)]
    pub cache_args: CacheArgs,

    #[command(flatten)]
    pub other_args: OtherArgs,
}

#[derive(Args, Clone, Debug, Default)]
#[command(next_help_heading = "General Options")]
pub struct GeneralArgs {
    #[arg(
        short = 'C',
        long,
        value_name = "PATH",
        help = "Sets the location of the config file.",
        long_help = "Sets the location of the config file. Expects a config file in the TOML format. \
                    If it doesn't exist, a default config file is created at the path."
    )]
    pub config_location: Option<PathBuf>,

    #[arg(
        short = 'i',
        long,
        value_name = "NAME",
        help = "The interface to poll.",
        long_help = "The interface to poll, as it is named in the statistics table (e.g. eth0). \
                    Aliases are not resolved."
    )]
    pub interface: Option<String>,

    #[arg(
        short = 'r',
        long,
        value_name = "TIME",
        help = "Sets how often the interface is polled.",
        long_help = "Sets how often the interface is polled. Takes a number in milliseconds or a \
                    human duration (e.g. 5s). The minimum is 250ms, and the default is 1s."
    )]
    pub rate: Option<String>,

    #[arg(
        short = 'n',
        long,
        value_name = "COUNT",
        value_parser = clap::value_parser!(u64).range(1..),
        help = "Stops after this many polls.",
        long_help = "Stops after this many polls. If the last poll failed, ifstats exits with a \
                    non-zero status. Polls until interrupted if not set."
    )]
    pub count: Option<u64>,

    #[arg(
        long,
        value_name = "PATH",
        help = "Where to read the statistics table from.",
        long_help = "Where to read the statistics table from. Defaults to /proc/net/dev on Linux. \
                    Pass 'sysinfo' to build the table from the OS's network APIs instead, which \
                    is the default elsewhere."
    )]
    pub table: Option<String>,

    #[arg(
        long,
        value_enum,
        value_name = "SOURCE",
        help = "Where to look up link speeds.",
        long_help = "Where to look up link speeds. 'auto' uses whatever this build supports, \
                    'sysfs' reads /sys/class/net/<interface>/speed, and 'wireless' asks the \
                    wireless extensions (needs the 'wireless' feature). Unknown speeds are \
                    reported as 4200000."
    )]
    pub link_speed: Option<LinkSpeed>,
}

#[derive(Args, Clone, Debug, Default)]
#[command(next_help_heading = "Cache Options")]
pub struct CacheArgs {
    #[arg(
        long,
        help = "Always reads the statistics table.",
        long_help = "Always reads the statistics table, instead of reusing a recent successful reading."
    )]
    pub no_cache: bool,

    #[arg(
        long,
        value_name = "TIME",
        help = "How long a successful reading is reused for.",
        long_help = "How long a successful reading is reused for. Takes a number in milliseconds \
                    or a human duration (e.g. 2s). The default is 2s."
    )]
    pub cache_duration: Option<String>,

    #[arg(
        long,
        value_enum,
        value_name = "CLOCK",
        help = "The clock used to age cached readings."
    )]
    pub cache_clock: Option<ClockKind>,
}

#[derive(Args, Clone, Debug, Default)]
#[command(next_help_heading = "Other Options")]
pub struct OtherArgs {
    #[cfg(feature = "logging")]
    #[arg(
        long,
        value_name = "PATH",
        help = "Writes debug logs to a file."
    )]
    pub debug_log: Option<PathBuf>,
}
