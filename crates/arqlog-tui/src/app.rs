//! Top-level application state and the main event loop.
//!
//! [`App::run`] sets up the terminal, drives the crossterm event loop, and
//! tears everything down cleanly on exit or panic.

use crate::{
    event::{self, AppEvent},
    theme::Theme,
    widgets::{delay_chart::DelayChart, help::HelpPopup},
};
use arqlog_core::ChartContext;
use crossterm::{
    event::{self as ct_event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Frame, Terminal};
use std::{io, time::Duration};

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

pub struct AppState {
    pub chart: ChartContext,
    pub theme: Theme,
    /// Series drawn at full strength; `None` draws all of them.
    pub highlighted: Option<usize>,
    pub show_legend: bool,
    pub show_help: bool,
    pub quit: bool,
}

impl AppState {
    pub fn new(chart: ChartContext, theme: Theme) -> Self {
        Self {
            chart,
            theme,
            highlighted: None,
            show_legend: true,
            show_help: false,
            quit: false,
        }
    }

    pub fn handle(&mut self, event: AppEvent) {
        // Help popup intercepts all events; only close keys pass through.
        if self.show_help {
            match event {
                AppEvent::ToggleHelp | AppEvent::Escape => {
                    tracing::debug!("help popup closed");
                    self.show_help = false;
                }
                AppEvent::Quit => self.quit = true,
                _ => {}
            }
            return;
        }

        let count = self.chart.series().len();
        match event {
            AppEvent::Quit => {
                tracing::debug!("quit");
                self.quit = true;
            }
            AppEvent::Escape => {
                if self.highlighted.take().is_none() {
                    self.quit = true;
                }
            }
            AppEvent::NextSeries if count > 0 => {
                self.highlighted = Some(self.highlighted.map_or(0, |i| (i + 1) % count));
                tracing::debug!(highlighted = ?self.highlighted, "series highlight");
            }
            AppEvent::PrevSeries if count > 0 => {
                self.highlighted =
                    Some(self.highlighted.map_or(count - 1, |i| (i + count - 1) % count));
                tracing::debug!(highlighted = ?self.highlighted, "series highlight");
            }
            AppEvent::ShowAll => self.highlighted = None,
            AppEvent::ToggleLegend => self.show_legend = !self.show_legend,
            AppEvent::ToggleHelp => {
                tracing::debug!("help popup opened");
                self.show_help = true;
            }
            // Terminal resize is handled automatically by ratatui
            AppEvent::Resize(_, _) | AppEvent::NextSeries | AppEvent::PrevSeries => {}
        }
    }
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

pub struct App {
    state: AppState,
}

impl App {
    pub fn new(chart: ChartContext, theme: Theme) -> Self {
        App {
            state: AppState::new(chart, theme),
        }
    }

    /// Set up the terminal, run the event loop, and restore the terminal on exit.
    pub fn run(mut self) -> anyhow::Result<()> {
        install_panic_hook();

        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(io::stdout());
        let mut terminal = Terminal::new(backend)?;

        let result = self.event_loop(&mut terminal);

        // Always restore terminal, even if the loop returned an error
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        let _ = terminal.show_cursor();

        result
    }

    fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        loop {
            {
                let s = &self.state;
                terminal.draw(|frame| draw(frame, s))?;
            }

            if self.state.quit {
                break;
            }

            if ct_event::poll(Duration::from_millis(250))? {
                if let Some(ev) = event::to_app_event(ct_event::read()?) {
                    self.state.handle(ev);
                }
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

pub fn draw(frame: &mut Frame, state: &AppState) {
    let area = frame.area();

    frame.render_widget(
        DelayChart::new(&state.chart, &state.theme)
            .highlighted(state.highlighted)
            .show_legend(state.show_legend),
        area,
    );

    if state.show_help {
        frame.render_widget(HelpPopup::new(&state.theme), area);
    }
}

// ---------------------------------------------------------------------------
// Terminal helpers
// ---------------------------------------------------------------------------

fn install_panic_hook() {
    let original = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original(info);
    }));
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
