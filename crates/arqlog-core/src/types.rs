//! Core types for arqlog-core.
//!
//! A [`LogEntry`] is one `(sequence number, timestamp)` pair lifted out of a
//! server or client log line. A [`TimeSeries`] is the ordered list of entries
//! for one file, in the order the lines appeared.

use chrono::NaiveDateTime;

/// One packet event extracted from a log line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    /// Sequence number exactly as captured. Compared as an opaque string.
    pub sn: String,
    /// Event time with nanosecond precision. Log timestamps carry no zone,
    /// so they are kept naive; RFC 3339 input is normalised to UTC.
    pub ts: NaiveDateTime,
}

impl LogEntry {
    pub fn new(sn: impl Into<String>, ts: NaiveDateTime) -> Self {
        Self { sn: sn.into(), ts }
    }
}

impl std::fmt::Display for LogEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SN: {}, Timestamp: {}", self.sn, self.ts.format("%Y-%m-%d %H:%M:%S%.9f"))
    }
}

/// Entries in file order. No ordering or uniqueness is imposed on `sn`.
pub type TimeSeries = Vec<LogEntry>;

/// Which side of the benchmark produced a log file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// Packet admitted to the input buffer (IB).
    Server,
    /// Packet pushed to the output buffer (OB).
    Client,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Server => write!(f, "server"),
            Side::Client => write!(f, "client"),
        }
    }
}
