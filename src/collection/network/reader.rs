//! Looks up the counters for a single interface.

use std::io::BufRead;

use log::{debug, error, warn};

use super::{
    cache::{Clock, StatsCache},
    table::find_interface,
    BitRateSource, InterfaceStats, ProcNetDev, TableSource, DEFAULT_BIT_RATE,
};
use crate::collection::error::{CollectionError, CollectionResult, LookupFailure};

impl<T: TableSource + ?Sized> TableSource for Box<T> {
    fn open(&self) -> std::io::Result<Box<dyn BufRead + '_>> {
        (**self).open()
    }
}

impl<C: Clock + ?Sized> Clock for Box<C> {
    fn now(&self) -> CollectionResult<std::time::Duration> {
        (**self).now()
    }
}

impl<B: BitRateSource + ?Sized> BitRateSource for Box<B> {
    fn bit_rate(&self, interface: &str) -> CollectionResult<u64> {
        (**self).bit_rate(interface)
    }
}

struct CachePolicy {
    cache: StatsCache,
    clock: Box<dyn Clock>,
}

/// Reads interface counters out of a statistics table, optionally reusing the
/// last result for a while and asking a separate source for the link speed.
///
/// ```
/// use ifstats::collection::network::{InMemoryTable, StatsReader, DEFAULT_BIT_RATE};
///
/// let table = InMemoryTable::new("a\nb\neth0: 100 2 0 0 0 0 0 0 300 4 0 0 0 0 0 0\n");
/// let stats = StatsReader::new(table).read("eth0").unwrap();
///
/// assert_eq!(stats.received_bytes, 100);
/// assert_eq!(stats.sent_packets, 4);
/// assert_eq!(stats.bit_rate, DEFAULT_BIT_RATE);
/// ```
pub struct StatsReader {
    table: Box<dyn TableSource>,
    cache: Option<CachePolicy>,
    bit_rate: Option<Box<dyn BitRateSource>>,
}

impl Default for StatsReader {
    fn default() -> Self {
        Self::new(ProcNetDev::default())
    }
}

impl StatsReader {
    /// Creates a reader over `table`, with no caching and no bit rate source.
    pub fn new<T: TableSource + 'static>(table: T) -> Self {
        Self {
            table: Box::new(table),
            cache: None,
            bit_rate: None,
        }
    }

    /// Reuses successful results while `cache` considers them fresh according
    /// to `clock`.
    pub fn with_cache<C: Clock + 'static>(mut self, cache: StatsCache, clock: C) -> Self {
        self.cache = Some(CachePolicy {
            cache,
            clock: Box::new(clock),
        });
        self
    }

    /// Asks `source` for the link speed of matched interfaces.
    pub fn with_bit_rate_source<B: BitRateSource + 'static>(mut self, source: B) -> Self {
        self.bit_rate = Some(Box::new(source));
        self
    }

    /// The cache, if caching is enabled.
    pub fn cache(&self) -> Option<&StatsCache> {
        self.cache.as_ref().map(|policy| &policy.cache)
    }

    /// Returns the counters for `interface`.
    ///
    /// On failure, [`LookupFailure::stats`] still holds zeroed counters and the
    /// default bit rate. Clock and bit rate source errors never fail a lookup.
    pub fn read(&self, interface: &str) -> Result<InterfaceStats, LookupFailure> {
        if interface.is_empty() {
            return Err(LookupFailure::new(CollectionError::InvalidArgument));
        }

        let Some(policy) = &self.cache else {
            return self.read_table(interface);
        };

        // Held until the end so the check and the update can't interleave with
        // another caller.
        let mut slot = policy.cache.lock();

        let now = match policy.clock.now() {
            Ok(now) => now,
            Err(err) => {
                warn!("not using the stats cache for '{interface}': {err}");
                drop(slot);

                return self.read_table(interface);
            }
        };

        if let Some(stats) = slot.fresh(now) {
            debug!("using cached stats for '{interface}'");
            return Ok(stats);
        }

        let stats = self.read_table(interface)?;
        slot.store(now, stats);

        Ok(stats)
    }

    fn read_table(&self, interface: &str) -> Result<InterfaceStats, LookupFailure> {
        let found = {
            let mut reader = self.table.open().map_err(|err| {
                error!("cannot open the statistics table: {err}");
                LookupFailure::new(CollectionError::ResourceUnavailable(err))
            })?;

            find_interface(&mut reader, interface)
        };

        let Some(mut stats) = found else {
            return Err(LookupFailure::new(CollectionError::NotFound(
                interface.to_string(),
            )));
        };

        if let Some(source) = &self.bit_rate {
            if stats.bit_rate == DEFAULT_BIT_RATE {
                match source.bit_rate(interface) {
                    Ok(bit_rate) => stats.bit_rate = bit_rate,
                    Err(err) => debug!("keeping the default bit rate for '{interface}': {err}"),
                }
            }
        }

        Ok(stats)
    }
}
