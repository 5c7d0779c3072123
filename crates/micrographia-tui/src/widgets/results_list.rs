//! Results list widget: the search results with their compare marks.
//!
//! Rows are read from the rendered `#searchResultsContainer` subtree, so the
//! `[x]` mark on each row is whatever the renderer derived from the
//! selection set. When the container holds no list (no search yet, or no
//! matches) its text is shown instead.

use crate::event::{AppEvent, Direction};
use crate::theme::Theme;
use micrographia_core::view::{Element, Tag};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, List, ListItem, ListState, Paragraph, StatefulWidget, Widget, Wrap},
};

const PAGE_STEP: usize = 10;

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct ResultsListState {
    /// Index of the highlighted row.
    pub cursor: usize,
}

impl ResultsListState {
    /// Move the cursor within a list of `len` rows.
    pub fn handle(&mut self, event: &AppEvent, len: usize) {
        if len == 0 {
            self.cursor = 0;
            return;
        }
        let last = len - 1;
        match event {
            AppEvent::Nav(Direction::Up) => self.cursor = self.cursor.saturating_sub(1),
            AppEvent::Nav(Direction::Down) => self.cursor = (self.cursor + 1).min(last),
            AppEvent::ScrollUp => self.cursor = self.cursor.saturating_sub(PAGE_STEP),
            AppEvent::ScrollDown => self.cursor = (self.cursor + PAGE_STEP).min(last),
            _ => return,
        }
        tracing::debug!(cursor = self.cursor, "results: cursor moved");
    }
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

pub struct ResultsList<'a> {
    container: Option<&'a Element>,
    filter_status: Option<&'a str>,
    state: &'a ResultsListState,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> ResultsList<'a> {
    pub fn new(
        container: Option<&'a Element>,
        filter_status: Option<&'a str>,
        state: &'a ResultsListState,
        focused: bool,
        theme: &'a Theme,
    ) -> Self {
        Self {
            container,
            filter_status,
            state,
            focused,
            theme,
        }
    }

    fn row(&self, li: &Element) -> ListItem<'static> {
        let checked = li
            .find(&|e| e.tag == Tag::Input)
            .is_some_and(|input| input.has_attr("checked"));
        let mark = if checked {
            Span::styled("[x] ", self.theme.checked)
        } else {
            Span::raw("[ ] ")
        };
        let name = li
            .find_by_class("result-name")
            .map(Element::text_content)
            .unwrap_or_default();
        ListItem::new(Line::from(vec![mark, Span::raw(name)]))
    }
}

impl Widget for ResultsList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = match self.filter_status {
            Some(status) => format!("Results ({status})"),
            None => "Results".to_string(),
        };
        let block = Block::bordered()
            .title(title)
            .border_style(self.theme.border(self.focused));
        let inner = block.inner(area);
        block.render(area, buf);

        let Some(container) = self.container else {
            return;
        };
        let rows: Vec<&Element> = container.find_all(&|e| e.tag == Tag::Li);
        if rows.is_empty() {
            let text = container.text_content();
            Paragraph::new(Line::styled(text, self.theme.muted))
                .wrap(Wrap { trim: true })
                .render(inner, buf);
            return;
        }

        let items: Vec<ListItem> = rows.iter().map(|li| self.row(li)).collect();
        let list = List::new(items).highlight_style(self.theme.cursor);
        let selected = self.focused.then_some(self.state.cursor.min(rows.len() - 1));
        let mut list_state = ListState::default().with_selected(selected);
        StatefulWidget::render(list, inner, buf, &mut list_state);
    }
}
