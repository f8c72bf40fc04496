//! Data collection for per-interface network counters.

pub mod bit_rate;
pub mod cache;
pub mod parse;
pub mod reader;
pub mod sysinfo;
pub mod table;

pub use self::{
    bit_rate::{default_bit_rate_source, BitRateSource, NoBitRate},
    cache::{Clock, MonotonicClock, StatsCache, SystemClock},
    parse::{parse_unsigned, Counter},
    reader::StatsReader,
    sysinfo::SysinfoTable,
    table::{InMemoryTable, ProcNetDev, TableSource},
};

/// The bit rate reported when nothing better is known, in bits per second.
pub const DEFAULT_BIT_RATE: u64 = 4_200_000;

/// Traffic counters for a single interface.
///
/// The counters are either all taken from one row of the statistics table,
/// or all zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InterfaceStats {
    pub received_bytes: u64,
    pub received_packets: u64,
    pub sent_bytes: u64,
    pub sent_packets: u64,
    /// In bits per second.
    pub bit_rate: u64,
}

impl Default for InterfaceStats {
    fn default() -> Self {
        Self {
            received_bytes: 0,
            received_packets: 0,
            sent_bytes: 0,
            sent_packets: 0,
            bit_rate: DEFAULT_BIT_RATE,
        }
    }
}

impl std::fmt::Display for InterfaceStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "rx_bytes={} rx_packets={} tx_bytes={} tx_packets={} bit_rate={}",
            self.received_bytes,
            self.received_packets,
            self.sent_bytes,
            self.sent_packets,
            self.bit_rate
        )
    }
}
