//! Sources for, and scanning of, the network statistics table.
//!
//! On Linux this is `/proc/net/dev`, which looks like:
//!
//! ```text
//! Inter-|   Receive                                                |  Transmit
//!  face |bytes    packets errs drop fifo frame compressed multicast|bytes    packets errs drop fifo colls carrier compressed
//!     lo:  123456     789    0    0    0     0          0         0   123456     789    0    0    0     0       0          0
//!   eth0: 9876543    4321    0    0    0     0          0         0  1234567    2345    0    0    0     0       0          0
//! ```
//!
//! See <https://www.kernel.org/doc/html/latest/networking/statistics.html>.

use std::{
    fs::File,
    io::{self, BufRead, BufReader, Cursor},
    path::PathBuf,
};

use super::{parse_unsigned, InterfaceStats};

/// The columns between received packets and sent bytes that we don't model
/// (errs, drop, fifo, frame, compressed, multicast).
const SKIPPED_COLUMNS: usize = 6;

/// The number of header lines before the first interface row.
const HEADER_LINES: usize = 2;

/// Something that can hand out the current contents of the statistics table.
pub trait TableSource: Send + Sync {
    /// Opens the table for reading. The returned reader is dropped (and
    /// anything it holds released) once a lookup is done with it.
    fn open(&self) -> io::Result<Box<dyn BufRead + '_>>;
}

/// The statistics table as a file, `/proc/net/dev` by default.
#[derive(Clone, Debug)]
pub struct ProcNetDev {
    path: PathBuf,
}

impl ProcNetDev {
    pub const DEFAULT_PATH: &'static str = "/proc/net/dev";

    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }
}

impl Default for ProcNetDev {
    fn default() -> Self {
        Self::new(Self::DEFAULT_PATH)
    }
}

impl TableSource for ProcNetDev {
    fn open(&self) -> io::Result<Box<dyn BufRead + '_>> {
        let file = File::open(&self.path).map_err(|err| {
            io::Error::new(err.kind(), format!("cannot open {}: {err}", self.path.display()))
        })?;

        Ok(Box::new(BufReader::new(file)))
    }
}

/// A fixed table held in memory.
#[derive(Clone, Debug, Default)]
pub struct InMemoryTable {
    contents: String,
}

impl InMemoryTable {
    pub fn new<S: Into<String>>(contents: S) -> Self {
        Self {
            contents: contents.into(),
        }
    }
}

impl TableSource for InMemoryTable {
    fn open(&self) -> io::Result<Box<dyn BufRead + '_>> {
        Ok(Box::new(Cursor::new(self.contents.as_bytes())))
    }
}

/// Only spaces pad and separate fields; the kernel never emits tabs.
#[inline]
fn is_blank(byte: &u8) -> bool {
    *byte == b' '
}

#[inline]
fn skip_blanks(line: &[u8]) -> &[u8] {
    let blanks = line.iter().take_while(|b| is_blank(b)).count();
    &line[blanks..]
}

/// Skips one blank-delimited field, along with the blanks before it.
#[inline]
fn skip_field(line: &[u8]) -> &[u8] {
    let line = skip_blanks(line);
    let field = line.iter().take_while(|b| !is_blank(b)).count();
    &line[field..]
}

/// Parses the next counter, advancing `line` past whatever was consumed.
/// A malformed field just yields a partial (or zero) value.
fn next_counter(line: &mut &[u8]) -> u64 {
    let rest = skip_blanks(line);
    let (value, consumed) = parse_unsigned(rest, 0);
    *line = &rest[consumed..];

    u64::from(value)
}

/// Returns the rest of `line` after `<blanks><interface>:`, or [`None`] if the
/// row is for some other interface. Prefixes don't count, so `eth1` won't
/// match a row for `eth10`.
fn strip_interface<'a>(line: &'a [u8], interface: &[u8]) -> Option<&'a [u8]> {
    skip_blanks(line)
        .strip_prefix(interface)?
        .strip_prefix(b":")
}

/// Decodes the counters from the remainder of a matched row.
///
/// Truncated rows aren't rejected; missing fields read as zero.
fn parse_row(mut line: &[u8]) -> InterfaceStats {
    let received_bytes = next_counter(&mut line);
    let received_packets = next_counter(&mut line);

    for _ in 0..SKIPPED_COLUMNS {
        line = skip_field(line);
    }

    let sent_bytes = next_counter(&mut line);
    let sent_packets = next_counter(&mut line);

    InterfaceStats {
        received_bytes,
        received_packets,
        sent_bytes,
        sent_packets,
        ..Default::default()
    }
}

/// Scans a statistics table for the first row matching `interface`.
///
/// The header lines are discarded; a table that is too short for them is
/// tolerated and simply has no rows. A read error part way through is
/// treated as the end of the table.
pub(crate) fn find_interface(reader: &mut dyn BufRead, interface: &str) -> Option<InterfaceStats> {
    let interface = interface.as_bytes();
    let mut line = Vec::new();

    for _ in 0..HEADER_LINES {
        match reader.read_until(b'\n', &mut line) {
            Ok(0) | Err(_) => {
                log::warn!("the statistics table ended before its header lines did");
                return None;
            }
            Ok(_) => line.clear(),
        }
    }

    // This saves us from doing a string allocation on each iteration compared to
    // `lines()`.
    while let Ok(bytes) = reader.read_until(b'\n', &mut line) {
        if bytes == 0 {
            break;
        }

        if let Some(rest) = strip_interface(&line, interface) {
            return Some(parse_row(rest));
        }

        line.clear();
    }

    None
}
