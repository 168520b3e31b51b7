//! Delay reporter: per-packet delay series and the chart surface they share.
//!
//! A [`ChartContext`] is the explicit rendering context: each call to
//! [`DelaySink::report`] appends one labelled [`DelaySeries`], and the
//! renderer later reads the accumulated series plus the axis helpers below.
//! Nothing is global, so several contexts can coexist in one process.
//!
//! # X axis
//!
//! Sequence numbers are opaque strings. When every sequence number on the
//! surface parses as a finite number the axis is numeric; otherwise each
//! distinct sequence number gets a slot in first-seen order (categorical).

use std::collections::{HashMap, HashSet};

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::{config::ChartConfig, types::LogEntry};

// ---------------------------------------------------------------------------
// Delay series
// ---------------------------------------------------------------------------

/// Delay of one packet between server admission and client delivery.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DelayPoint {
    pub sn: String,
    /// Fractional milliseconds; negative only if called on unvalidated input.
    pub delay_ms: f64,
}

/// One labelled line on the chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DelaySeries {
    pub label: String,
    pub points: Vec<DelayPoint>,
}

/// Plain min/mean/max over a series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DelaySummary {
    pub count: usize,
    pub min_ms: f64,
    pub mean_ms: f64,
    pub max_ms: f64,
}

impl DelaySeries {
    /// `None` for an empty series.
    pub fn summary(&self) -> Option<DelaySummary> {
        let first = self.points.first()?.delay_ms;
        let (min_ms, max_ms, sum) = self.points.iter().fold(
            (first, first, 0.0),
            |(lo, hi, sum), p| (lo.min(p.delay_ms), hi.max(p.delay_ms), sum + p.delay_ms),
        );
        let count = self.points.len();
        Some(DelaySummary {
            count,
            min_ms,
            mean_ms: sum / count as f64,
            max_ms,
        })
    }
}

impl std::fmt::Display for DelaySummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} packets, delay min {:.3} ms, mean {:.3} ms, max {:.3} ms",
            self.count, self.min_ms, self.mean_ms, self.max_ms
        )
    }
}

/// `to - from` in milliseconds, keeping sub-millisecond precision.
pub fn delay_ms(from: NaiveDateTime, to: NaiveDateTime) -> f64 {
    let delta = to - from;
    match delta.num_nanoseconds() {
        Some(ns) => ns as f64 / 1_000_000.0,
        // Beyond ~292 years of nanoseconds; microseconds still fit.
        None => delta.num_microseconds().map_or(delta.num_milliseconds() as f64, |us| {
            us as f64 / 1_000.0
        }),
    }
}

/// Pair the series by position and compute each packet's delay.
///
/// Assumes `validate` already succeeded for this pair; positions past the
/// shorter series are ignored.
pub fn compute_delays(server: &[LogEntry], client: &[LogEntry]) -> Vec<DelayPoint> {
    server
        .iter()
        .zip(client)
        .map(|(srv, cli)| DelayPoint {
            sn: srv.sn.clone(),
            delay_ms: delay_ms(srv.ts, cli.ts),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Sink + context
// ---------------------------------------------------------------------------

/// Consumer of validated server/client pairs.
pub trait DelaySink {
    /// Record the delays of one validated log set under `label`.
    fn report(&mut self, server: &[LogEntry], client: &[LogEntry], label: &str);
}

/// Shared chart surface: x = sequence number, y = delay in ms.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartContext {
    pub title: String,
    pub x_title: String,
    pub y_title: String,
    pub max_x_ticks: usize,
    series: Vec<DelaySeries>,
}

impl DelaySink for ChartContext {
    fn report(&mut self, server: &[LogEntry], client: &[LogEntry], label: &str) {
        let points = compute_delays(server, client);
        tracing::debug!(label, points = points.len(), "series added to chart");
        self.series.push(DelaySeries {
            label: label.to_string(),
            points,
        });
    }
}

/// How sequence numbers map onto the x axis.
#[derive(Debug, Clone, PartialEq)]
pub enum XAxis {
    /// Every sequence number is a number. `integral` when all are integers.
    Numeric { integral: bool },
    /// Distinct sequence numbers in first-seen order.
    Categorical(Vec<String>),
}

const Y_TICKS: usize = 5;

impl ChartContext {
    pub fn new(title: impl Into<String>, max_x_ticks: usize) -> Self {
        Self {
            title: title.into(),
            x_title: "Sequence number".to_string(),
            y_title: "Delay (ms)".to_string(),
            max_x_ticks: max_x_ticks.max(2),
            series: Vec::new(),
        }
    }

    pub fn from_config(chart: &ChartConfig) -> Self {
        Self::new(chart.title.clone(), chart.max_x_ticks)
    }

    pub fn series(&self) -> &[DelaySeries] {
        &self.series
    }

    pub fn is_empty(&self) -> bool {
        self.series.iter().all(|s| s.points.is_empty())
    }

    fn all_points(&self) -> impl Iterator<Item = &DelayPoint> {
        self.series.iter().flat_map(|s| s.points.iter())
    }

    pub fn x_axis(&self) -> XAxis {
        let numeric: Option<Vec<f64>> = self.all_points().map(|p| parse_sn(&p.sn)).collect();
        match numeric {
            Some(values) => XAxis::Numeric {
                integral: values.iter().all(|v| v.fract() == 0.0),
            },
            None => {
                let mut seen = HashSet::new();
                let mut order = Vec::new();
                for p in self.all_points() {
                    if seen.insert(p.sn.as_str()) {
                        order.push(p.sn.clone());
                    }
                }
                XAxis::Categorical(order)
            }
        }
    }

    /// `(x, delay_ms)` pairs for each series, in series order.
    pub fn plot_data(&self, axis: &XAxis) -> Vec<Vec<(f64, f64)>> {
        let slots: HashMap<&str, usize> = match axis {
            XAxis::Categorical(order) => {
                order.iter().enumerate().map(|(i, sn)| (sn.as_str(), i)).collect()
            }
            XAxis::Numeric { .. } => HashMap::new(),
        };

        self.series
            .iter()
            .map(|s| {
                s.points
                    .iter()
                    .filter_map(|p| {
                        let x = match axis {
                            XAxis::Numeric { .. } => parse_sn(&p.sn)?,
                            XAxis::Categorical(_) => *slots.get(p.sn.as_str())? as f64,
                        };
                        Some((x, p.delay_ms))
                    })
                    .collect()
            })
            .collect()
    }

    /// `[min, max]` over all x values, widened when degenerate.
    pub fn x_bounds(&self, axis: &XAxis) -> [f64; 2] {
        let xs = self.plot_data(axis).into_iter().flatten().map(|(x, _)| x);
        widen(min_max(xs).unwrap_or((0.0, 1.0)))
    }

    /// `[min(0, lowest delay), highest delay]` with 5% headroom.
    pub fn y_bounds(&self) -> [f64; 2] {
        let (lo, hi) = min_max(self.all_points().map(|p| p.delay_ms)).unwrap_or((0.0, 1.0));
        let [lo, hi] = widen((lo.min(0.0), hi));
        [lo, hi + (hi - lo) * 0.05]
    }

    /// Labels for the x axis, evenly spaced across `x_bounds`.
    ///
    /// One label per distinct x value while there are at most `max_x_ticks`
    /// of them; capped at `max_x_ticks` beyond that.
    pub fn x_ticks(&self, axis: &XAxis) -> Vec<String> {
        let data = self.plot_data(axis);
        let mut xs: Vec<f64> = data.iter().flatten().map(|(x, _)| *x).collect();
        xs.sort_by(f64::total_cmp);
        xs.dedup();

        let count = xs.len().min(self.max_x_ticks).max(2);
        let [lo, hi] = self.x_bounds(axis);

        tick_positions(lo, hi, count)
            .into_iter()
            .map(|x| match axis {
                // Ticks between two integer sequence numbers keep their fraction.
                XAxis::Numeric { integral: true } if (x - x.round()).abs() < 1e-6 => {
                    format!("{}", x.round() as i64)
                }
                XAxis::Numeric { .. } => format!("{x:.1}"),
                XAxis::Categorical(order) => {
                    let idx = x.round();
                    if idx >= 0.0 && (idx as usize) < order.len() {
                        order[idx as usize].clone()
                    } else {
                        String::new()
                    }
                }
            })
            .collect()
    }

    /// Labels for the y axis, evenly spaced across `y_bounds`.
    pub fn y_ticks(&self) -> Vec<String> {
        let [lo, hi] = self.y_bounds();
        tick_positions(lo, hi, Y_TICKS)
            .into_iter()
            .map(|y| format!("{y:.2}"))
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn parse_sn(sn: &str) -> Option<f64> {
    sn.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

fn min_max(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values.fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

fn widen((lo, hi): (f64, f64)) -> [f64; 2] {
    if hi > lo {
        [lo, hi]
    } else {
        [lo - 1.0, hi + 1.0]
    }
}

/// `count` evenly spaced values from `lo` to `hi` inclusive.
pub fn tick_positions(lo: f64, hi: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![lo],
        n => (0..n)
            .map(|i| lo + (hi - lo) * i as f64 / (n - 1) as f64)
            .collect(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
