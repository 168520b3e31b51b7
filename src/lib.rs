//! arqlog: ARQ benchmark log validation and delay charting.
//!
//! The root crate wires the stages from `arqlog-core` into a run over one
//! or more named log sets, and owns the JSON export and headless summary.
//!
//! # Architecture
//!
//! ```text
//! names ──► Pipeline ──► extract ×2 ──► validate ──► ChartContext ──┬──► TUI chart
//!                                                                  ├──► headless summary
//!                                                                  └──► JSON export
//! ```

pub mod export;
pub mod pipeline;

pub use pipeline::{require_names, LogSet, Pipeline};
