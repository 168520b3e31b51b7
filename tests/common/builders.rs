//! Test builders: ergonomic constructors for `LogEntry` and `TimeSeries`.
//!
//! These builders are designed for readability in test assertions, not for
//! production use. They panic on invalid input rather than returning `Result`.

use arqlog_core::{LogEntry, TimeSeries};
use chrono::{Duration, NaiveDate, NaiveDateTime};

/// 2024-11-27 19:16:12, the start of every synthetic run.
pub fn base_time() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 11, 27)
        .unwrap()
        .and_hms_opt(19, 16, 12)
        .unwrap()
}

/// Entry at `base_time() + us` microseconds.
pub fn entry_us(sn: &str, us: i64) -> LogEntry {
    LogEntry::new(sn, base_time() + Duration::microseconds(us))
}

// ---------------------------------------------------------------------------
// SeriesBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for a [`TimeSeries`].
///
/// ```rust
/// let server = SeriesBuilder::new().packet("1", 0).packet("2", 1_000).build();
/// ```
#[derive(Default)]
pub struct SeriesBuilder {
    entries: TimeSeries,
}

impl SeriesBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a packet logged `us` microseconds after [`base_time`].
    pub fn packet(mut self, sn: &str, us: i64) -> Self {
        self.entries.push(entry_us(sn, us));
        self
    }

    pub fn build(self) -> TimeSeries {
        self.entries
    }
}

/// Server and client series for `sns`, sent 1 ms apart, each delayed by
/// `delay_us`.
pub fn matched_pair(sns: &[&str], delay_us: i64) -> (TimeSeries, TimeSeries) {
    sns.iter()
        .enumerate()
        .map(|(i, sn)| {
            let sent = i as i64 * 1_000;
            (entry_us(sn, sent), entry_us(sn, sent + delay_us))
        })
        .unzip()
}
