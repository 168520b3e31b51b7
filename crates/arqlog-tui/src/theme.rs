//! Chart colours.
//!
//! A theme is a small TOML document with a `[chart]` table of element styles
//! and a `[series]` palette. Two themes ship embedded in the binary; pick one
//! with [`Theme::by_name`].
//!
//! ```toml
//! [chart]
//! title = { fg = "white", modifiers = ["bold"] }
//!
//! [series]
//! palette = ["cyan", "#fabd2f", "208"]
//! ```
//!
//! Colours use ratatui's own names (`light_red`, `dark-gray`, ...), `#rrggbb`,
//! or a bare 256-colour index. Series are coloured by position, so a log set
//! keeps its colour for the whole run.

use std::str::FromStr;

use config::{Config, File, FileFormat};
use ratatui::style::{Color, Modifier, Style};
use serde::Deserialize;

const DEFAULT_THEME_SRC: &str = include_str!("themes/default.toml");
const GRUVBOX_DARK_THEME_SRC: &str = include_str!("themes/gruvbox_dark.toml");

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct StyleSpec {
    fg: Option<String>,
    bg: Option<String>,
    modifiers: Vec<String>,
}

impl StyleSpec {
    fn resolve(&self) -> Style {
        let mut style = Style::new();
        if let Some(fg) = self.fg.as_deref().and_then(parse_color) {
            style = style.fg(fg);
        }
        if let Some(bg) = self.bg.as_deref().and_then(parse_color) {
            style = style.bg(bg);
        }
        self.modifiers
            .iter()
            .filter_map(|m| parse_modifier(m))
            .fold(style, Style::add_modifier)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ChartSpec {
    border: StyleSpec,
    title: StyleSpec,
    axis: StyleSpec,
    axis_title: StyleSpec,
    dimmed: StyleSpec,
}

#[derive(Debug, Deserialize)]
struct ThemeSpec {
    #[serde(default)]
    chart: ChartSpec,
    series: SeriesSpec,
}

#[derive(Debug, Deserialize)]
struct SeriesSpec {
    palette: Vec<String>,
}

/// Resolved styles for every element of the delay chart.
#[derive(Debug, Clone)]
pub struct Theme {
    pub border: Style,
    pub title: Style,
    pub axis: Style,
    pub axis_title: Style,
    /// Series that are not highlighted while one is.
    pub dimmed: Style,
    palette: Vec<Color>,
}

impl Theme {
    pub fn load_default() -> Self {
        Self::from_toml_str(DEFAULT_THEME_SRC).expect("embedded default theme must be valid TOML")
    }

    pub fn load_gruvbox_dark() -> Self {
        Self::from_toml_str(GRUVBOX_DARK_THEME_SRC)
            .expect("embedded gruvbox dark theme must be valid TOML")
    }

    /// `gruvbox` (or `gruvbox_dark`) selects Gruvbox Dark; anything else
    /// gets the default theme.
    pub fn by_name(name: &str) -> Self {
        match name.to_ascii_lowercase().replace('-', "_").as_str() {
            "gruvbox" | "gruvbox_dark" => Self::load_gruvbox_dark(),
            other => {
                if other != "default" {
                    tracing::warn!(theme = name, "unknown theme, using default");
                }
                Self::load_default()
            }
        }
    }

    /// Parse a theme document. Unresolvable colours and modifiers are
    /// dropped rather than rejected.
    pub fn from_toml_str(src: &str) -> anyhow::Result<Self> {
        let spec: ThemeSpec = Config::builder()
            .add_source(File::from_str(src, FileFormat::Toml))
            .build()?
            .try_deserialize()?;

        let palette: Vec<Color> = spec
            .series
            .palette
            .iter()
            .filter_map(|c| parse_color(c))
            .collect();
        anyhow::ensure!(!palette.is_empty(), "theme palette has no usable colours");

        Ok(Self {
            border: spec.chart.border.resolve(),
            title: spec.chart.title.resolve(),
            axis: spec.chart.axis.resolve(),
            axis_title: spec.chart.axis_title.resolve(),
            dimmed: spec.chart.dimmed.resolve(),
            palette,
        })
    }

    /// Line style for the series at `index`.
    pub fn series_style(&self, index: usize) -> Style {
        Style::new().fg(self.palette[index % self.palette.len()])
    }
}

fn parse_color(s: &str) -> Option<Color> {
    Color::from_str(s.trim()).ok()
}

fn parse_modifier(s: &str) -> Option<Modifier> {
    Some(match s.trim().to_ascii_lowercase().as_str() {
        "bold" => Modifier::BOLD,
        "dim" => Modifier::DIM,
        "italic" => Modifier::ITALIC,
        "underlined" | "underline" => Modifier::UNDERLINED,
        "reversed" => Modifier::REVERSED,
        _ => return None,
    })
}
