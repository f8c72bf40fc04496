use std::time::Duration;

/// The default interval between polls.
pub const DEFAULT_REFRESH_RATE: Duration = Duration::from_millis(1000);

/// The smallest allowed interval between polls.
pub const MIN_REFRESH_RATE: Duration = Duration::from_millis(250);

/// How long a successful reading is reused by default.
pub const DEFAULT_CACHE_DURATION: Duration = Duration::from_secs(2);

/// The config file's location, relative to the user's config directory.
pub const DEFAULT_CONFIG_FILE_LOCATION: &str = "ifstats/ifstats.toml";

/// Written out when no config file exists yet.
pub const DEFAULT_CONFIG_CONTENT: &str = indoc::indoc! {r##"
    # This is a default config file for ifstats. All of the settings are commented
    # out by default; if you wish to change them, uncomment and modify as you see
    # fit. Command-line arguments take precedence over these.

    # The interface to poll, as named in the statistics table.
    #interface = "eth0"

    # Where to read the statistics table from. Either a path, or "sysinfo".
    #table = "/proc/net/dev"

    # How often to poll. Either a number of milliseconds or a human duration.
    #rate = "1s"

    # Where to look up link speeds: "auto", "none", "sysfs", or "wireless".
    #link_speed = "auto"

    #[cache]
    # Reuse a successful reading instead of reading the table again.
    #enabled = true
    # How long a reading is reused for.
    #duration = "2s"
    # The clock used to age readings: "system" or "monotonic".
    #clock = "system"
"##};
