//! Delay chart widget: one line per log set, sequence number against delay.
//!
//! The widget only reads a [`ChartContext`]; all axis maths (bounds, tick
//! labels, categorical slots) lives in `arqlog_core::report`.

use arqlog_core::ChartContext;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    symbols::Marker,
    text::{Line, Span},
    widgets::{Axis, Block, Chart, Dataset, GraphType, LegendPosition, Paragraph, Widget},
};

use crate::theme::Theme;

pub struct DelayChart<'a> {
    ctx: &'a ChartContext,
    /// Index of the series drawn at full strength; the rest are dimmed.
    highlighted: Option<usize>,
    show_legend: bool,
    theme: &'a Theme,
}

impl<'a> DelayChart<'a> {
    pub fn new(ctx: &'a ChartContext, theme: &'a Theme) -> Self {
        Self {
            ctx,
            highlighted: None,
            show_legend: true,
            theme,
        }
    }

    pub fn highlighted(mut self, index: Option<usize>) -> Self {
        self.highlighted = index;
        self
    }

    pub fn show_legend(mut self, show: bool) -> Self {
        self.show_legend = show;
        self
    }
}

impl Widget for DelayChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .title(Span::styled(format!(" {} ", self.ctx.title), self.theme.title))
            .title_bottom(Line::from(" q:quit  tab:series  ?:help ").right_aligned())
            .border_style(self.theme.border);

        if self.ctx.is_empty() {
            Paragraph::new("no packets to plot")
                .style(self.theme.dimmed)
                .block(block)
                .render(area, buf);
            return;
        }

        let axis = self.ctx.x_axis();
        let data = self.ctx.plot_data(&axis);

        let datasets: Vec<Dataset> = self
            .ctx
            .series()
            .iter()
            .zip(&data)
            .enumerate()
            .map(|(i, (series, points))| {
                let style = match self.highlighted {
                    Some(h) if h != i => self.theme.dimmed,
                    _ => self.theme.series_style(i),
                };
                Dataset::default()
                    .name(series.label.clone())
                    .marker(Marker::Braille)
                    .graph_type(GraphType::Line)
                    .style(style)
                    .data(points)
            })
            .collect();

        let x_axis = Axis::default()
            .title(Span::styled(self.ctx.x_title.clone(), self.theme.axis_title))
            .style(self.theme.axis)
            .bounds(self.ctx.x_bounds(&axis))
            .labels(self.ctx.x_ticks(&axis));

        let y_axis = Axis::default()
            .title(Span::styled(self.ctx.y_title.clone(), self.theme.axis_title))
            .style(self.theme.axis)
            .bounds(self.ctx.y_bounds())
            .labels(self.ctx.y_ticks());

        let legend = self.show_legend.then_some(LegendPosition::TopLeft);

        Chart::new(datasets)
            .block(block)
            .x_axis(x_axis)
            .y_axis(y_axis)
            .legend_position(legend)
            // Keep the legend unless it would cover most of the plot.
            .hidden_legend_constraints((Constraint::Ratio(2, 3), Constraint::Ratio(2, 3)))
            .render(area, buf);
    }
}
