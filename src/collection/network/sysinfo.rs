//! Gets the statistics table via sysinfo, for platforms without `/proc/net/dev`.
//!
//! sysinfo's totals are rendered into the same layout as `/proc/net/dev` so they
//! go through the exact same scanning as the real thing.

use std::{
    fmt::Write,
    io::{self, BufRead, Cursor},
};

use sysinfo::Networks;

use super::TableSource;

const HEADER: &str = concat!(
    "Inter-|   Receive                                                |  Transmit\n",
    " face |bytes    packets errs drop fifo frame compressed multicast|bytes    packets errs drop fifo colls carrier compressed\n",
);

/// The totals for one interface that sysinfo can tell us about.
#[derive(Clone, Copy, Debug, Default)]
struct Row {
    received_bytes: u64,
    received_packets: u64,
    received_errors: u64,
    sent_bytes: u64,
    sent_packets: u64,
    sent_errors: u64,
}

fn render<'a>(rows: impl IntoIterator<Item = (&'a str, Row)>) -> String {
    let mut table = String::from(HEADER);

    for (name, row) in rows {
        // Writing to a `String` can't fail.
        let _ = writeln!(
            table,
            "{name:>6}: {} {} {} 0 0 0 0 0 {} {} {} 0 0 0 0 0",
            row.received_bytes,
            row.received_packets,
            row.received_errors,
            row.sent_bytes,
            row.sent_packets,
            row.sent_errors,
        );
    }

    table
}

/// A statistics table synthesized from sysinfo's network totals.
#[derive(Clone, Copy, Debug, Default)]
pub struct SysinfoTable;

impl TableSource for SysinfoTable {
    fn open(&self) -> io::Result<Box<dyn BufRead + '_>> {
        let networks = Networks::new_with_refreshed_list();
        let table = render(networks.iter().map(|(name, network)| {
            (
                name.as_str(),
                Row {
                    received_bytes: network.total_received(),
                    received_packets: network.total_packets_received(),
                    received_errors: network.total_errors_on_received(),
                    sent_bytes: network.total_transmitted(),
                    sent_packets: network.total_packets_transmitted(),
                    sent_errors: network.total_errors_on_transmitted(),
                },
            )
        }));

        Ok(Box::new(Cursor::new(table.into_bytes())))
    }
}
