//! Keybinding overlay, toggled with `?`.

use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    widgets::{Block, Clear, Row, Table, Widget},
};

/// (keys, action) pairs in display order.
pub const BINDINGS: &[(&str, &str)] = &[
    ("q, Ctrl+c", "quit"),
    ("Esc", "close help, clear highlight, then quit"),
    ("Tab, Right, l", "highlight next log set"),
    ("Shift+Tab, Left, h", "highlight previous log set"),
    ("a", "show every log set"),
    ("L", "show or hide the legend"),
    ("?", "show or hide this help"),
];

const KEY_COLUMN: u16 = 20;
const POPUP_WIDTH: u16 = 64;

pub struct HelpPopup<'a> {
    theme: &'a Theme,
}

impl<'a> HelpPopup<'a> {
    pub fn new(theme: &'a Theme) -> Self {
        Self { theme }
    }
}

impl Widget for HelpPopup<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Two border rows plus the header row.
        let popup = centered(area, POPUP_WIDTH, BINDINGS.len() as u16 + 3);
        Clear.render(popup, buf);

        let rows = BINDINGS.iter().map(|(keys, action)| {
            Row::new([*keys, *action]).style(self.theme.axis)
        });
        Table::new(rows, [Constraint::Length(KEY_COLUMN), Constraint::Fill(1)])
            .column_spacing(1)
            .block(
                Block::bordered()
                    .title(" keys ")
                    .title_style(self.theme.title)
                    .border_style(self.theme.border),
            )
            .header(
                Row::new(["key", "action"])
                    .style(Style::new().add_modifier(Modifier::BOLD | Modifier::UNDERLINED)),
            )
            .render(popup, buf);
    }
}

/// A `width` x `height` rect centred in `area`, clipped to it.
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
