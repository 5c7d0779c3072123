//! Vim-style command bar: a single-line overlay at the bottom of the screen.
//!
//! Activated by pressing `:` outside the search bar. `Enter` parses and
//! executes the command; `Escape` cancels.
//!
//! # Supported commands
//!
//! | Command | Action |
//! |---------|--------|
//! | `q`, `quit` | Quit |
//! | `help` | Toggle the help popup |
//! | `search <name>` | Search with the current filter |
//! | `filter <any\|positive\|negative>` | Set the Gram filter |
//! | `detail <tax_id>` | Show one organism's detail |
//! | `compare` | Compare the marked results |
//! | `clear` | Clear the comparison selection |
//! | `theme <name>` | Switch theme (`default`, `gruvbox`) |

use crate::event::AppEvent;
use crate::theme::Theme;
use crate::widgets::line_input::LineInput;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Clear, Widget},
};

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct CommandBarState {
    /// Text after the `:` prompt.
    pub input: LineInput,
    /// Why the last command was rejected; shown until the next key.
    pub error: Option<String>,
}

impl CommandBarState {
    /// Blank the bar. Called whenever it opens or closes.
    pub fn clear(&mut self) {
        self.input.clear();
        self.error = None;
    }

    /// Editing keys only. `Enter` and `Escape` are handled by the app.
    pub fn handle(&mut self, event: &AppEvent) {
        self.error = None;
        self.input.edit(event);
    }

    /// Screen column for the terminal cursor, one past the prompt glyph.
    pub fn cursor_col(&self, area: Rect) -> u16 {
        (area.x + 1 + self.input.cursor_chars()).min(area.right().saturating_sub(1))
    }
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

/// The `:` prompt, drawn over the tray row.
pub struct CommandBar<'a> {
    state: &'a CommandBarState,
    theme: &'a Theme,
}

impl<'a> CommandBar<'a> {
    pub fn new(state: &'a CommandBarState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }
}

impl Widget for CommandBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);

        let line = match &self.state.error {
            Some(err) => Line::styled(format!("E  {err}"), self.theme.banner_error),
            None => Line::from(vec![
                Span::styled(":", self.theme.border_command_bar.add_modifier(Modifier::BOLD)),
                Span::raw(self.state.input.text()),
            ]),
        };
        buf.set_line(area.x, area.y, &line, area.width);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typing_clears_a_shown_error() {
        let mut s = CommandBarState::default();
        s.error = Some("unknown command: bogus".to_string());
        for c in "detail 562".chars() {
            s.handle(&AppEvent::Char(c));
        }
        assert!(s.error.is_none());
        assert_eq!(s.input.text(), "detail 562");
    }

    #[test]
    fn cursor_sits_after_prompt_and_clamps() {
        let mut s = CommandBarState::default();
        let area = Rect { x: 2, y: 10, width: 6, height: 1 };
        assert_eq!(s.cursor_col(area), 3);
        for c in "compare".chars() {
            s.handle(&AppEvent::Char(c));
        }
        assert_eq!(s.cursor_col(area), 7);
        s.clear();
        assert!(s.input.is_empty());
    }
}
