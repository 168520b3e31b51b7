//! Semantic application events: crossterm key events mapped to a
//! widget-agnostic vocabulary so widgets never touch crossterm directly.
//!
//! # Keybindings
//!
//! | Key(s)                  | Event           |
//! |-------------------------|-----------------|
//! | `q`, `Ctrl+c`           | `Quit`          |
//! | `Esc`                   | `Escape`        |
//! | `Tab`, `→` / `l`        | `NextSeries`    |
//! | `Shift+Tab`, `←` / `h`  | `PrevSeries`    |
//! | `a`                     | `ShowAll`       |
//! | `L`                     | `ToggleLegend`  |
//! | `?`                     | `ToggleHelp`    |
//! | terminal resize         | `Resize(w, h)`  |

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// A semantic application event derived from a raw crossterm [`Event`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// Exit the chart view.
    Quit,
    /// Close the help popup, or clear the highlight, or quit.
    Escape,
    /// Highlight the next series and dim the others.
    NextSeries,
    /// Highlight the previous series.
    PrevSeries,
    /// Drop the highlight so every series is drawn at full strength.
    ShowAll,
    /// Show or hide the legend.
    ToggleLegend,
    /// Show or hide the keybinding popup.
    ToggleHelp,
    /// The terminal was resized to the given (width, height).
    Resize(u16, u16),
}

/// Map a raw crossterm [`Event`] to an [`AppEvent`].
///
/// Returns `None` for mouse events, key releases and unbound keys.
pub fn to_app_event(event: Event) -> Option<AppEvent> {
    match event {
        Event::Resize(w, h) => Some(AppEvent::Resize(w, h)),
        Event::Key(key) if key.kind != KeyEventKind::Release => map_key(key),
        _ => None,
    }
}

fn map_key(key: KeyEvent) -> Option<AppEvent> {
    use KeyCode::*;
    use KeyModifiers as Mod;

    match key.code {
        Char('q') if key.modifiers == Mod::NONE => Some(AppEvent::Quit),
        Char('c') if key.modifiers == Mod::CONTROL => Some(AppEvent::Quit),
        Esc => Some(AppEvent::Escape),

        Tab if key.modifiers == Mod::NONE => Some(AppEvent::NextSeries),
        Right | Char('l') if key.modifiers == Mod::NONE => Some(AppEvent::NextSeries),
        // Terminals report Shift+Tab as BackTab, with or without SHIFT set.
        BackTab => Some(AppEvent::PrevSeries),
        Left | Char('h') if key.modifiers == Mod::NONE => Some(AppEvent::PrevSeries),

        Char('a') if key.modifiers == Mod::NONE => Some(AppEvent::ShowAll),
        // Uppercase: SHIFT may or may not be set depending on the terminal.
        Char('L') => Some(AppEvent::ToggleLegend),
        Char('?') => Some(AppEvent::ToggleHelp),

        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
