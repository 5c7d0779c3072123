//! Search bar widget: text input plus the Gram filter selector.
//!
//! Text editing goes through [`LineInput`]; `CycleFilter` steps
//! Any → Gram-positive → Gram-negative.

use crate::event::AppEvent;
use crate::theme::Theme;
use crate::widgets::line_input::LineInput;
use micrographia_core::GramFilter;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction as LayoutDir, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget},
};

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct SearchBarState {
    /// The organism name typed by the user.
    pub input: LineInput,
    pub filter: GramFilter,
}

impl SearchBarState {
    pub fn query(&self) -> &str {
        self.input.text()
    }

    /// Replace the query text, moving the cursor to the end.
    pub fn set_query(&mut self, query: &str) {
        self.input.set(query);
    }

    pub fn handle(&mut self, event: &AppEvent) {
        if let AppEvent::CycleFilter = event {
            self.filter = self.filter.next();
            tracing::debug!(filter = %self.filter, "search: filter changed");
        } else if self.input.edit(event) {
            tracing::debug!(query = %self.input.text(), cursor = self.input.cursor(), "search: edited");
        }
    }
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

pub struct SearchBar<'a> {
    state: &'a SearchBarState,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> SearchBar<'a> {
    pub fn new(state: &'a SearchBarState, focused: bool, theme: &'a Theme) -> Self {
        Self { state, focused, theme }
    }

    /// Absolute terminal position of the text cursor within this widget's
    /// rendered area.
    pub fn cursor_position(&self, area: Rect) -> (u16, u16) {
        let col = self.state.input.cursor_chars();
        let x = (area.x + 1 + col).min(area.right().saturating_sub(1));
        (x, area.y + 1)
    }
}

impl Widget for SearchBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .title("Search")
            .border_style(self.theme.border(self.focused));
        let inner = block.inner(area);
        block.render(area, buf);

        let chunks = Layout::default()
            .direction(LayoutDir::Horizontal)
            .constraints([Constraint::Fill(1), Constraint::Length(24)])
            .split(inner);

        let query_line = if self.state.input.is_empty() && !self.focused {
            Line::from(Span::styled("press / to search by name", self.theme.muted))
        } else {
            Line::from(self.state.query())
        };
        Paragraph::new(query_line).render(chunks[0], buf);

        let filter = Line::from(vec![
            Span::styled("gram: ", self.theme.muted),
            Span::styled(self.state.filter.label(), self.theme.label),
        ]);
        Paragraph::new(filter).render(chunks[1], buf);
    }
}
