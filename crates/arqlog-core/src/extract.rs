//! Line extractor: turns a log file into a [`TimeSeries`].
//!
//! Each line is tested against two independent regexes from a [`MatchSpec`]:
//! one captures the sequence number, the other the timestamp text. A line
//! only yields a [`LogEntry`] when both match and the timestamp parses.
//! Everything else is skipped without an error, because most lines in an
//! ARQ benchmark log are unrelated chatter.
//!
//! Lines whose two patterns both match but whose timestamp text cannot be
//! parsed are counted as `malformed` in [`ExtractStats`] and logged at
//! `debug`. They are still skipped, so the resulting series is the same
//! whether or not the caller looks at the stats.

use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::Path,
};

use chrono::{DateTime, NaiveDateTime};
use regex::Regex;

use crate::{
    config::Config,
    error::{ArqlogError, Result},
    types::{LogEntry, Side, TimeSeries},
};

// ---------------------------------------------------------------------------
// Built-in patterns
// ---------------------------------------------------------------------------

/// Server line: `Adding packet with SN 2 to IB at time 2024-11-27 19:16:12.309514278`
pub const SERVER_SN_PATTERN: &str = "Adding packet with SN (.+?) to IB";
pub const SERVER_TS_PATTERN: &str = " to IB at time (.+?)$";

/// Client line: `Pushed packet with SN 2 to OB at time 2024-11-27 19:16:12.350295886`
pub const CLIENT_SN_PATTERN: &str = "Pushed packet with SN (.+?) to OB";
pub const CLIENT_TS_PATTERN: &str = " to OB at time (.+?)$";

/// `chrono` formats tried after RFC 3339, in order.
pub const DEFAULT_TIMESTAMP_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y/%m/%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
];

// ---------------------------------------------------------------------------
// MatchSpec
// ---------------------------------------------------------------------------

/// A compiled pair of extraction patterns plus the timestamp formats to try.
#[derive(Debug, Clone)]
pub struct MatchSpec {
    sn: Regex,
    ts: Regex,
    formats: Vec<String>,
}

impl MatchSpec {
    /// Compile a spec from two patterns. Each must contain exactly one
    /// capturing group.
    pub fn new(sn_pattern: &str, ts_pattern: &str) -> Result<Self> {
        Ok(Self {
            sn: compile(sn_pattern)?,
            ts: compile(ts_pattern)?,
            formats: DEFAULT_TIMESTAMP_FORMATS.iter().map(|f| f.to_string()).collect(),
        })
    }

    /// Replace the timestamp formats tried after RFC 3339.
    pub fn with_formats<I, S>(mut self, formats: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.formats = formats.into_iter().map(Into::into).collect();
        self
    }

    /// Input-buffer admissions logged by the server.
    pub fn server() -> Self {
        Self::new(SERVER_SN_PATTERN, SERVER_TS_PATTERN)
            .expect("built-in server patterns must compile")
    }

    /// Output-buffer deliveries logged by the client.
    pub fn client() -> Self {
        Self::new(CLIENT_SN_PATTERN, CLIENT_TS_PATTERN)
            .expect("built-in client patterns must compile")
    }

    /// Build the spec for one side from the `[patterns]` and `[timestamps]`
    /// config sections.
    pub fn from_config(side: Side, config: &Config) -> Result<Self> {
        let p = &config.patterns;
        let spec = match side {
            Side::Server => Self::new(&p.server_sn, &p.server_ts)?,
            Side::Client => Self::new(&p.client_sn, &p.client_ts)?,
        };
        Ok(spec.with_formats(config.timestamps.formats.iter().cloned()))
    }

    pub fn sn_pattern(&self) -> &str {
        self.sn.as_str()
    }

    pub fn ts_pattern(&self) -> &str {
        self.ts.as_str()
    }
}

fn compile(pattern: &str) -> Result<Regex> {
    let re = Regex::new(pattern).map_err(|source| ArqlogError::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })?;
    // captures_len counts the implicit whole-match group.
    let groups = re.captures_len() - 1;
    if groups != 1 {
        return Err(ArqlogError::CaptureGroups {
            pattern: pattern.to_string(),
            groups,
        });
    }
    Ok(re)
}

// ---------------------------------------------------------------------------
// Per-line parsing
// ---------------------------------------------------------------------------

/// Outcome of testing one line against a [`MatchSpec`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineMatch {
    /// Both patterns matched and the timestamp parsed.
    Entry(LogEntry),
    /// Both patterns matched but the timestamp text did not parse.
    Malformed { sn: String, ts_text: String },
    /// At least one pattern did not match.
    Unrelated,
}

/// Classify a single line. Trailing `\n`/`\r` are ignored.
pub fn classify_line(line: &str, spec: &MatchSpec) -> LineMatch {
    let line = line.trim_end_matches(['\n', '\r']);

    let Some(sn) = capture(&spec.sn, line) else {
        return LineMatch::Unrelated;
    };
    let Some(ts_text) = capture(&spec.ts, line) else {
        return LineMatch::Unrelated;
    };

    match parse_timestamp(ts_text, &spec.formats) {
        Some(ts) => LineMatch::Entry(LogEntry::new(sn, ts)),
        None => LineMatch::Malformed {
            sn: sn.to_string(),
            ts_text: ts_text.to_string(),
        },
    }
}

/// Try to lift one line into a [`LogEntry`]; `None` means skip the line.
pub fn try_parse_line(line: &str, spec: &MatchSpec) -> Option<LogEntry> {
    match classify_line(line, spec) {
        LineMatch::Entry(entry) => Some(entry),
        LineMatch::Malformed { .. } | LineMatch::Unrelated => None,
    }
}

fn capture<'l>(re: &Regex, line: &'l str) -> Option<&'l str> {
    re.captures(line)?.get(1).map(|m| m.as_str())
}

/// Parse timestamp text as RFC 3339 first, then each `formats` entry.
///
/// Offsets are normalised to UTC and dropped, so mixed inputs still compare
/// on one timeline.
pub fn parse_timestamp<S: AsRef<str>>(text: &str, formats: &[S]) -> Option<NaiveDateTime> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.naive_utc());
    }

    formats
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt.as_ref()).ok())
}

// ---------------------------------------------------------------------------
// Whole-stream extraction
// ---------------------------------------------------------------------------

/// Line counters gathered during one extraction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractStats {
    /// Lines read from the source.
    pub lines: usize,
    /// Entries emitted.
    pub entries: usize,
    /// Lines where both patterns matched but the timestamp did not parse.
    pub malformed: usize,
}

/// Extract every matching line from `source`, in order.
///
/// Read errors propagate; non-matching lines never do. Invalid UTF-8 is
/// replaced lossily rather than aborting the read.
pub fn extract<R: BufRead>(source: R, spec: &MatchSpec) -> io::Result<TimeSeries> {
    extract_with_stats(source, spec).map(|(series, _)| series)
}

/// As [`extract`], also returning [`ExtractStats`].
pub fn extract_with_stats<R: BufRead>(
    mut source: R,
    spec: &MatchSpec,
) -> io::Result<(TimeSeries, ExtractStats)> {
    let mut series = TimeSeries::new();
    let mut stats = ExtractStats::default();
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if source.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        stats.lines += 1;

        let line = String::from_utf8_lossy(&buf);
        match classify_line(&line, spec) {
            LineMatch::Entry(entry) => series.push(entry),
            LineMatch::Malformed { sn, ts_text } => {
                stats.malformed += 1;
                tracing::debug!(
                    line = stats.lines,
                    sn = %sn,
                    ts = %ts_text,
                    "skipping line with unparseable timestamp"
                );
            }
            LineMatch::Unrelated => {}
        }
    }

    stats.entries = series.len();
    Ok((series, stats))
}

/// Open `path` and extract it. The file is closed when this returns.
pub fn extract_file(path: &Path, spec: &MatchSpec) -> Result<(TimeSeries, ExtractStats)> {
    let file = File::open(path).map_err(|e| ArqlogError::io(path, e))?;
    let (series, stats) =
        extract_with_stats(BufReader::new(file), spec).map_err(|e| ArqlogError::io(path, e))?;

    tracing::debug!(
        path = %path.display(),
        lines = stats.lines,
        entries = stats.entries,
        malformed = stats.malformed,
        "extracted log file"
    );
    Ok((series, stats))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
