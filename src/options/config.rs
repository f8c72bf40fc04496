use serde::Deserialize;

/// The config file.
#[derive(Clone, Debug, Default, Deserialize)]
#[cfg_attr(test, serde(deny_unknown_fields), derive(PartialEq, Eq))]
pub struct Config {
    /// The interface to poll.
    pub(crate) interface: Option<String>,
    /// A path to the statistics table, or "sysinfo".
    pub(crate) table: Option<String>,
    /// The polling rate, in milliseconds or as a human duration.
    pub(crate) rate: Option<StringOrNum>,
    pub(crate) link_speed: Option<LinkSpeed>,
    #[serde(default)]
    pub(crate) cache: CacheConfig,
}

/// Cache configuration.
#[derive(Clone, Debug, Default, Deserialize)]
#[cfg_attr(test, serde(deny_unknown_fields), derive(PartialEq, Eq))]
pub(crate) struct CacheConfig {
    pub(crate) enabled: Option<bool>,
    pub(crate) duration: Option<StringOrNum>,
    pub(crate) clock: Option<ClockKind>,
}

#[derive(Clone, Debug, Deserialize)]
#[cfg_attr(test, derive(PartialEq, Eq))]
#[serde(untagged)]
pub(crate) enum StringOrNum {
    String(String),
    Num(u64),
}

impl From<String> for StringOrNum {
    fn from(value: String) -> Self {
        StringOrNum::String(value)
    }
}

impl From<u64> for StringOrNum {
    fn from(value: u64) -> Self {
        StringOrNum::Num(value)
    }
}

/// Where link speeds come from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LinkSpeed {
    /// Whatever this build supports, which is usually nothing.
    #[default]
    Auto,
    /// Always report the default speed.
    #[serde(rename = "none")]
    #[value(name = "none")]
    Disabled,
    /// `/sys/class/net/<interface>/speed` (Linux).
    Sysfs,
    /// `SIOCGIWRATE` (Linux, with the `wireless` feature).
    Wireless,
}

/// The clock used to age cached readings.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ClockKind {
    /// Wall-clock time.
    #[default]
    System,
    /// Time that never goes backwards.
    Monotonic,
}
