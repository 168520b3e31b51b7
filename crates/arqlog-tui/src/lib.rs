//! arqlog TUI: interactive terminal rendering of a delay chart.

pub mod app;
pub mod event;
pub mod theme;
pub mod widgets;

pub use app::App;
pub use theme::Theme;

use arqlog_core::ChartContext;

/// Show `chart` full-screen until the user quits.
pub fn run(chart: ChartContext, theme: Theme) -> anyhow::Result<()> {
    App::new(chart, theme).run()
}
