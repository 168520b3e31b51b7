//! Ratatui widgets for the arqlog chart view.

pub mod delay_chart;
pub mod help;
