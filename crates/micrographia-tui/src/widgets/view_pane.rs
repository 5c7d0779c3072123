//! View pane: paints a rendered view tree into styled terminal lines.
//!
//! This is the TUI's "apply" step for the renderer's output. Block elements
//! start new lines, list items get bullets, checkboxes become `[x]`/`[ ]`,
//! tables are laid out as aligned columns and elements carrying a panel id
//! in the skip list are left to their own widgets.
//!
//! # Navigation (when pane is focused)
//!
//! | Key | Action |
//! |-----|--------|
//! | `↑` / `k` | Scroll up one line |
//! | `↓` / `j` | Scroll down one line |
//! | `PageUp` / `Ctrl+u` | Scroll up one page |
//! | `PageDown` / `Ctrl+d` | Scroll down one page |

use std::cell::Cell;

use crate::event::{AppEvent, Direction};
use crate::theme::Theme;
use micrographia_core::view::{Element, Node, Tag};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget, Wrap},
};

const PAGE_STEP: u16 = 10;

// ---------------------------------------------------------------------------
// Painter
// ---------------------------------------------------------------------------

/// Lay out `root` as lines, skipping subtrees whose `id` is in `skip`.
pub fn paint(root: &Element, skip: &[&str], theme: &Theme) -> Vec<Line<'static>> {
    let mut painter = Painter {
        theme,
        skip,
        lines: Vec::new(),
        current: Vec::new(),
        indent: 0,
    };
    painter.element(root, Style::default());
    painter.flush();
    while painter.lines.last().is_some_and(|l| l.spans.is_empty()) {
        painter.lines.pop();
    }
    painter.lines
}

struct Painter<'a> {
    theme: &'a Theme,
    skip: &'a [&'a str],
    lines: Vec<Line<'static>>,
    current: Vec<Span<'static>>,
    indent: usize,
}

impl Painter<'_> {
    fn flush(&mut self) {
        if !self.current.is_empty() {
            let spans = std::mem::take(&mut self.current);
            self.lines.push(Line::from(spans));
        }
    }

    fn blank(&mut self) {
        self.flush();
        if self.lines.last().is_some_and(|l| !l.spans.is_empty()) {
            self.lines.push(Line::default());
        }
    }

    fn push(&mut self, text: &str, style: Style) {
        for (i, piece) in text.split('\n').enumerate() {
            if i > 0 {
                self.flush();
            }
            if piece.is_empty() {
                continue;
            }
            if self.current.is_empty() && self.indent > 0 {
                self.current.push(Span::raw(" ".repeat(self.indent)));
            }
            self.current.push(Span::styled(piece.to_string(), style));
        }
    }

    fn style_for(&self, e: &Element) -> Style {
        if e.has_class("error") {
            return if e.has_class("minor") {
                self.theme.banner_minor
            } else {
                self.theme.banner_error
            };
        }
        match e.tag {
            Tag::H2 | Tag::H3 | Tag::H4 => self.theme.heading,
            Tag::Strong => self.theme.label,
            Tag::A => self.theme.link,
            Tag::Em => self.theme.muted,
            _ => match e.get_attr("id") {
                Some("loadingIndicator" | "noImageText" | "comparisonPlaceholderText") => {
                    self.theme.muted
                }
                _ => Style::default(),
            },
        }
    }

    fn element(&mut self, e: &Element, inherited: Style) {
        if e.get_attr("id").is_some_and(|id| self.skip.contains(&id)) {
            return;
        }
        let style = inherited.patch(self.style_for(e));

        match e.tag {
            Tag::Input => {
                let checked = e.has_attr("checked");
                let (mark, mark_style) = if checked {
                    ("[x] ", style.patch(self.theme.checked))
                } else {
                    ("[ ] ", style)
                };
                self.push(mark, mark_style);
                return;
            }
            Tag::Img => {
                let src = e.get_attr("src").unwrap_or_default().to_string();
                self.push(&format!("[image] {src}"), style.patch(self.theme.muted));
                return;
            }
            Tag::Button => {
                let button_style = if e.has_attr("disabled") {
                    self.theme.button_disabled
                } else {
                    self.theme.button_enabled
                };
                self.push(&format!("[ {} ]", e.text_content()), button_style);
                self.push(" ", Style::default());
                return;
            }
            Tag::Table => {
                self.flush();
                self.table(e, style);
                return;
            }
            _ => {}
        }

        let block = e.tag.is_block();
        if block {
            self.flush();
        }
        if matches!(e.tag, Tag::H3 | Tag::H4) {
            self.blank();
        }
        if e.tag == Tag::Li && e.find(&|c| c.tag == Tag::Input).is_none() {
            self.push("• ", style);
        }

        let nested = e.tag == Tag::Ul;
        if nested {
            self.indent += 2;
        }
        for child in &e.children {
            match child {
                Node::Text(t) => self.push(t, style),
                Node::Element(c) => self.element(c, style),
            }
        }
        if nested {
            self.indent -= 2;
        }

        if e.tag == Tag::A {
            if let Some(href) = e.get_attr("href") {
                if href != e.text_content() {
                    self.push(&format!(" <{href}>"), self.theme.muted);
                }
            }
        }
        if block {
            self.flush();
        }
        if e.tag == Tag::Section {
            self.blank();
        }
    }

    fn table(&mut self, table: &Element, style: Style) {
        let rows: Vec<Vec<(String, bool)>> = table
            .find_all(&|x| x.tag == Tag::Tr)
            .into_iter()
            .map(|tr| {
                tr.elements()
                    .map(|cell| (cell.text_content(), cell.tag == Tag::Th))
                    .collect()
            })
            .collect();

        let cols = rows.iter().map(Vec::len).max().unwrap_or(0);
        let mut widths = vec![0usize; cols];
        for row in &rows {
            for (i, (text, _)) in row.iter().enumerate() {
                widths[i] = widths[i].max(text.chars().count());
            }
        }

        for row in &rows {
            let header = row.iter().any(|(_, th)| *th);
            let mut spans = Vec::with_capacity(row.len() * 2);
            for (i, (text, _)) in row.iter().enumerate() {
                if i > 0 {
                    spans.push(Span::styled(" │ ", self.theme.muted));
                }
                let cell_style = if header || i == 0 { self.theme.label } else { style };
                spans.push(Span::styled(format!("{:<w$}", text, w = widths[i]), cell_style));
            }
            self.lines.push(Line::from(spans));
            if header {
                let rule: Vec<String> = widths.iter().map(|w| "─".repeat(*w)).collect();
                self.lines.push(Line::styled(rule.join("─┼─"), self.theme.muted));
            }
        }
    }
}

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct ViewPaneState {
    pub scroll: u16,
    /// Largest useful scroll offset, cached from the last render.
    max_scroll: Cell<u16>,
}

impl ViewPaneState {
    pub fn reset(&mut self) {
        self.scroll = 0;
    }

    pub fn handle(&mut self, event: &AppEvent) {
        let max = self.max_scroll.get();
        match event {
            AppEvent::Nav(Direction::Up) => self.scroll = self.scroll.saturating_sub(1),
            AppEvent::Nav(Direction::Down) => self.scroll = (self.scroll + 1).min(max),
            AppEvent::ScrollUp => self.scroll = self.scroll.saturating_sub(PAGE_STEP),
            AppEvent::ScrollDown => self.scroll = self.scroll.saturating_add(PAGE_STEP).min(max),
            _ => return,
        }
        tracing::debug!(scroll = self.scroll, "view: scrolled");
    }
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

pub struct ViewPane<'a> {
    lines: Vec<Line<'static>>,
    state: &'a ViewPaneState,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> ViewPane<'a> {
    pub fn new(
        lines: Vec<Line<'static>>,
        state: &'a ViewPaneState,
        focused: bool,
        theme: &'a Theme,
    ) -> Self {
        Self { lines, state, focused, theme }
    }
}

impl Widget for ViewPane<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .title("Microbe")
            .border_style(self.theme.border(self.focused));
        let inner = block.inner(area);
        block.render(area, buf);

        let lines = if self.lines.is_empty() {
            vec![Line::styled(
                "Press / to search, Enter on a result for details.",
                self.theme.muted,
            )]
        } else {
            self.lines
        };

        let max = (lines.len() as u16).saturating_sub(inner.height);
        self.state.max_scroll.set(max);

        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .scroll((self.state.scroll.min(max), 0))
            .render(inner, buf);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use micrographia_core::view::el;
    use pretty_assertions::assert_eq;

    fn texts(lines: &[Line<'_>]) -> Vec<String> {
        lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect()
    }

    #[test]
    fn blocks_start_lines_and_lists_get_bullets() {
        let tree = el(Tag::Div)
            .child(el(Tag::P).child(el(Tag::Strong).text("Rank:")).text(" species"))
            .child(el(Tag::Ul).child(el(Tag::Li).text("one")).child(el(Tag::Li).text("two")));
        let lines = paint(&tree, &[], &Theme::load_default());
        assert_eq!(texts(&lines), vec!["Rank: species", "  • one", "  • two"]);
    }

    #[test]
    fn skipped_ids_are_not_painted() {
        let tree = el(Tag::Main)
            .child(el(Tag::Div).id("searchResultsContainer").text("hidden"))
            .child(el(Tag::P).text("shown"));
        let lines = paint(&tree, &["searchResultsContainer"], &Theme::load_default());
        assert_eq!(texts(&lines), vec!["shown"]);
    }

    #[test]
    fn checkbox_and_button_marks() {
        let tree = el(Tag::Li)
            .child(el(Tag::Input).attr("type", "checkbox").flag("checked", true))
            .child(el(Tag::Span).text("Alpha"))
            .child(el(Tag::Button).flag("disabled", true).text("Compare"));
        let lines = paint(&tree, &[], &Theme::load_default());
        assert_eq!(texts(&lines), vec!["[x] Alpha[ Compare ] "]);
    }

    #[test]
    fn tables_align_columns() {
        let tree = el(Tag::Table)
            .child(el(Tag::Tr).child(el(Tag::Th).text("Feature")).child(el(Tag::Th).text("E. coli")))
            .child(el(Tag::Tr).child(el(Tag::Td).text("Rank")).child(el(Tag::Td).text("species")));
        let lines = paint(&tree, &[], &Theme::load_default());
        assert_eq!(
            texts(&lines),
            vec!["Feature │ E. coli", "────────┼────────", "Rank    │ species"]
        );
    }

    #[test]
    fn links_show_target_when_text_differs() {
        let tree = el(Tag::P).child(el(Tag::A).attr("href", "https://x.test").text("NCBI"));
        let lines = paint(&tree, &[], &Theme::load_default());
        assert_eq!(texts(&lines), vec!["NCBI <https://x.test>"]);
    }

    #[test]
    fn embedded_newlines_split_lines() {
        let tree = el(Tag::P).text("first\nsecond");
        let lines = paint(&tree, &[], &Theme::load_default());
        assert_eq!(texts(&lines), vec!["first", "second"]);
    }
}
