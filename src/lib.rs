//! A library for reading per-interface network traffic counters, meant for
//! periodic polling.
//!
//! The core is [`StatsReader`](collection::network::StatsReader), which scans a
//! `/proc/net/dev`-style statistics table for one interface. The `ifstats`
//! binary is a small poller built on top of it.

pub mod utils {
    pub mod cancellation_token;
    pub mod logging;
}
pub mod collection;
pub mod constants;
pub mod options;

pub use collection::{
    error::{CollectionError, LookupFailure},
    network::{InterfaceStats, StatsReader},
};
