//! Export: write the accumulated delay series as JSON, and render the
//! plain-text summary used by headless mode.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use anyhow::Context;
use arqlog_core::{
    report::{DelayPoint, DelaySummary},
    ChartContext,
};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct ExportDoc<'a> {
    title: &'a str,
    x_title: &'a str,
    y_title: &'a str,
    series: Vec<ExportSeries<'a>>,
}

#[derive(Debug, Serialize)]
struct ExportSeries<'a> {
    label: &'a str,
    summary: Option<DelaySummary>,
    points: &'a [DelayPoint],
}

fn document(chart: &ChartContext) -> ExportDoc<'_> {
    ExportDoc {
        title: &chart.title,
        x_title: &chart.x_title,
        y_title: &chart.y_title,
        series: chart
            .series()
            .iter()
            .map(|s| ExportSeries {
                label: &s.label,
                summary: s.summary(),
                points: &s.points,
            })
            .collect(),
    }
}

/// Serialize `chart` as pretty JSON into `out`.
pub fn write_json<W: Write>(chart: &ChartContext, out: W) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(out, &document(chart))?;
    Ok(())
}

/// Create (or truncate) `path` and write `chart` to it as JSON.
pub fn write_json_file(chart: &ChartContext, path: &Path) -> anyhow::Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut out = BufWriter::new(file);
    write_json(chart, &mut out)?;
    out.flush()
        .with_context(|| format!("writing {}", path.display()))?;
    tracing::info!(path = %path.display(), series = chart.series().len(), "chart exported");
    Ok(())
}

/// One line per series: `<label>: <summary>`.
pub fn summary_lines(chart: &ChartContext) -> Vec<String> {
    chart
        .series()
        .iter()
        .map(|s| match s.summary() {
            Some(summary) => format!("{}: {}", s.label, summary),
            None => format!("{}: no packets", s.label),
        })
        .collect()
}
