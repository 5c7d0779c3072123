//! Help popup: centred floating overlay listing the keybindings.
//!
//! Toggle with `?`; close with `?` or `Escape`.

use crate::event::Keymap;
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Clear, Paragraph, Widget},
};

pub struct HelpPopup<'a> {
    keymap: &'a Keymap,
    theme: &'a Theme,
}

impl<'a> HelpPopup<'a> {
    pub fn new(keymap: &'a Keymap, theme: &'a Theme) -> Self {
        Self { keymap, theme }
    }
}

fn key_name(c: char) -> String {
    match c {
        ' ' => "Space".to_string(),
        c => c.to_string(),
    }
}

impl Widget for HelpPopup<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let popup = centered_rect(72, 22, area);
        Clear.render(popup, buf);

        let block = Block::bordered()
            .title(" micrographia: keybindings (? to close) ")
            .border_style(self.theme.border_focused);
        let inner = block.inner(popup);
        block.render(popup, buf);

        let k = self.keymap;
        let bindings: Vec<(String, &str)> = vec![
            ("q  /  Ctrl+c".into(), "Quit"),
            ("Tab".into(), "Cycle focus: search → results → details"),
            (key_name(k.search_focus), "Focus the search bar"),
            ("Enter (search bar)".into(), "Run the search"),
            ("Enter (results)".into(), "Show details for the highlighted result"),
            (key_name(k.toggle_compare), "Mark / unmark the highlighted result"),
            (key_name(k.compare), "Compare the marked results"),
            (key_name(k.clear_comparison), "Clear the comparison selection"),
            (key_name(k.cycle_filter), "Cycle the Gram stain filter"),
            ("↑ k  /  ↓ j".into(), "Move in results / scroll details"),
            ("PageUp  /  Ctrl+u".into(), "Page up"),
            ("PageDown / Ctrl+d".into(), "Page down"),
            ("Escape".into(), "Leave the search bar"),
            (":".into(), "Command line (search, filter, detail, compare, clear, theme)"),
            ("?".into(), "Toggle this help popup"),
        ];

        let lines: Vec<Line> = bindings
            .into_iter()
            .map(|(key, desc)| {
                Line::from(vec![
                    Span::styled(format!("  {:<22}", key), self.theme.label),
                    Span::raw(desc),
                ])
            })
            .collect();

        Paragraph::new(lines).render(inner, buf);
    }
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}
