//! arqlog-core: ARQ benchmark log analysis.
//!
//! This crate holds the three pipeline stages plus the types and
//! configuration they share.
//!
//! # Pipeline
//!
//! ```text
//! server log ──► extract ──┐
//!                          ├──► validate ──► report (ChartContext)
//! client log ──► extract ──┘
//! ```
//!
//! Everything is synchronous and single-threaded; each stage only reads the
//! series handed to it.

pub mod config;
pub mod error;
pub mod extract;
pub mod report;
pub mod types;
pub mod validate;

pub use error::{ArqlogError, Result};
pub use extract::{extract, extract_file, try_parse_line, ExtractStats, MatchSpec};
pub use report::{compute_delays, ChartContext, DelayPoint, DelaySeries, DelaySink};
pub use types::{LogEntry, Side, TimeSeries};
pub use validate::{validate, Mismatch};
