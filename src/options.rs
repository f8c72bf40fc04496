//! How arguments and the config file turn into a configured [`StatsReader`].
//!
//! Arguments always take precedence over the config file, which takes
//! precedence over the defaults in [`constants`](crate::constants).

pub mod args;
pub mod config;
mod error;

use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

pub use self::{
    args::Args,
    config::{ClockKind, Config, LinkSpeed},
    error::{OptionError, OptionResult},
};
use self::{
    args::{CacheArgs, GeneralArgs},
    config::StringOrNum,
};
use crate::{
    collection::network::{
        default_bit_rate_source, BitRateSource, MonotonicClock, ProcNetDev, StatsCache,
        StatsReader, SysinfoTable, SystemClock, TableSource,
    },
    constants::*,
};

/// The value of `--table` that selects [`SysinfoTable`].
const SYSINFO_TABLE: &str = "sysinfo";

/// Where the statistics table is read from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TableLocation {
    Path(PathBuf),
    Sysinfo,
}

impl Default for TableLocation {
    fn default() -> Self {
        if cfg!(target_os = "linux") {
            TableLocation::Path(PathBuf::from(ProcNetDev::DEFAULT_PATH))
        } else {
            TableLocation::Sysinfo
        }
    }
}

impl From<&str> for TableLocation {
    fn from(value: &str) -> Self {
        if value == SYSINFO_TABLE {
            TableLocation::Sysinfo
        } else {
            TableLocation::Path(PathBuf::from(value))
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CacheOptions {
    pub duration: Duration,
    pub clock: ClockKind,
}

/// Everything the poller needs to run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PollerOptions {
    pub interface: String,
    pub rate: Duration,
    pub count: Option<u64>,
    pub table: TableLocation,
    /// [`None`] if caching is disabled.
    pub cache: Option<CacheOptions>,
    pub link_speed: LinkSpeed,
}

impl PollerOptions {
    /// Builds a [`StatsReader`] with these options.
    pub fn build_reader(&self) -> OptionResult<StatsReader> {
        let table: Box<dyn TableSource> = match &self.table {
            TableLocation::Path(path) => Box::new(ProcNetDev::new(path)),
            TableLocation::Sysinfo => Box::new(SysinfoTable),
        };

        let mut reader = StatsReader::new(table);

        if let Some(cache) = &self.cache {
            let stats_cache = StatsCache::new(cache.duration);
            reader = match cache.clock {
                ClockKind::System => reader.with_cache(stats_cache, SystemClock),
                ClockKind::Monotonic => reader.with_cache(stats_cache, MonotonicClock::default()),
            };
        }

        if let Some(source) = get_bit_rate_source(self.link_speed)? {
            reader = reader.with_bit_rate_source(source);
        }

        Ok(reader)
    }
}

/// Returns the config file path: the given location if there is one, otherwise
/// the default location in the user's config directory.
pub fn get_config_path(config_location: Option<&Path>) -> Option<PathBuf> {
    match config_location {
        Some(location) => Some(location.to_path_buf()),
        None => dirs::config_dir().map(|dir| dir.join(DEFAULT_CONFIG_FILE_LOCATION)),
    }
}

/// Reads the config file at `config_path`. If it doesn't exist, a default one
/// is written there and the defaults are used.
pub fn get_or_create_config(config_path: Option<&Path>) -> OptionResult<Config> {
    let Some(path) = config_path else {
        return Ok(Config::default());
    };

    if path.exists() {
        let contents = fs::read_to_string(path)?;
        Ok(toml_edit::de::from_str(&contents)?)
    } else {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, DEFAULT_CONFIG_CONTENT)?;

        Ok(Config::default())
    }
}

/// Loads the config file and merges it with `args`.
pub fn init(args: &Args) -> OptionResult<PollerOptions> {
    let config_path = get_config_path(args.general_args.config_location.as_deref());
    let config = get_or_create_config(config_path.as_deref())?;

    get_poller_options(args, &config)
}

/// Merges `args` and `config` into [`PollerOptions`].
pub fn get_poller_options(args: &Args, config: &Config) -> OptionResult<PollerOptions> {
    let general = &args.general_args;

    let interface = general
        .interface
        .clone()
        .or_else(|| config.interface.clone())
        .ok_or_else(|| {
            OptionError::other(
                "no interface was given, please set '--interface' or 'interface' in your config file.",
            )
        })?;

    let table = general
        .table
        .as_deref()
        .or(config.table.as_deref())
        .map(TableLocation::from)
        .unwrap_or_default();

    Ok(PollerOptions {
        interface,
        rate: get_rate(general, config)?,
        count: general.count,
        table,
        cache: get_cache(&args.cache_args, config)?,
        link_speed: general.link_speed.or(config.link_speed).unwrap_or_default(),
    })
}

/// Parses a number of milliseconds, or a human duration like `5s`.
fn try_parse_duration(value: &str) -> Option<Duration> {
    match value.parse::<u64>() {
        Ok(ms) => Some(Duration::from_millis(ms)),
        Err(_) => humantime::parse_duration(value).ok(),
    }
}

fn config_duration(value: &StringOrNum) -> Option<Duration> {
    match value {
        StringOrNum::Num(ms) => Some(Duration::from_millis(*ms)),
        StringOrNum::String(value) => try_parse_duration(value),
    }
}

fn get_rate(args: &GeneralArgs, config: &Config) -> OptionResult<Duration> {
    if let Some(rate) = &args.rate {
        let rate = try_parse_duration(rate).ok_or_else(|| OptionError::invalid_arg_value("rate"))?;
        if rate < MIN_REFRESH_RATE {
            return Err(OptionError::arg("'--rate' must be greater than 250ms."));
        }

        Ok(rate)
    } else if let Some(rate) = &config.rate {
        let rate = config_duration(rate).ok_or_else(|| OptionError::invalid_config_value("rate"))?;
        if rate < MIN_REFRESH_RATE {
            return Err(OptionError::config("'rate' must be greater than 250ms."));
        }

        Ok(rate)
    } else {
        Ok(DEFAULT_REFRESH_RATE)
    }
}

fn get_cache(args: &CacheArgs, config: &Config) -> OptionResult<Option<CacheOptions>> {
    let enabled = config.cache.enabled.unwrap_or(true) || args.cache_duration.is_some();
    if args.no_cache || !enabled {
        return Ok(None);
    }

    let duration = if let Some(duration) = &args.cache_duration {
        try_parse_duration(duration).ok_or_else(|| OptionError::invalid_arg_value("cache_duration"))?
    } else if let Some(duration) = &config.cache.duration {
        config_duration(duration).ok_or_else(|| OptionError::invalid_config_value("duration"))?
    } else {
        DEFAULT_CACHE_DURATION
    };

    let clock = args
        .cache_clock
        .or(config.cache.clock)
        .unwrap_or_default();

    Ok(Some(CacheOptions { duration, clock }))
}

fn get_bit_rate_source(link_speed: LinkSpeed) -> OptionResult<Option<Box<dyn BitRateSource>>> {
    match link_speed {
        LinkSpeed::Auto => Ok(Some(default_bit_rate_source())),
        LinkSpeed::Disabled => Ok(None),
        LinkSpeed::Sysfs => sysfs_bit_rate_source().map(Some),
        LinkSpeed::Wireless => wireless_bit_rate_source().map(Some),
    }
}

cfg_if::cfg_if! {
    if #[cfg(target_os = "linux")] {
        fn sysfs_bit_rate_source() -> OptionResult<Box<dyn BitRateSource>> {
            use crate::collection::network::bit_rate::SysfsBitRate;

            Ok(Box::new(SysfsBitRate::default()))
        }
    } else {
        fn sysfs_bit_rate_source() -> OptionResult<Box<dyn BitRateSource>> {
            Err(OptionError::other("'sysfs' link speeds are only supported on Linux."))
        }
    }
}

cfg_if::cfg_if! {
    if #[cfg(all(target_os = "linux", feature = "wireless"))] {
        fn wireless_bit_rate_source() -> OptionResult<Box<dyn BitRateSource>> {
            use crate::collection::network::bit_rate::WirelessBitRate;

            Ok(Box::new(WirelessBitRate))
        }
    } else {
        fn wireless_bit_rate_source() -> OptionResult<Box<dyn BitRateSource>> {
            Err(OptionError::other(
                "'wireless' link speeds need Linux and ifstats built with the 'wireless' feature.",
            ))
        }
    }
}
