//! Title bar: one line at the top with the API host, activity and key hints.

use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

pub struct TitleBar<'a> {
    host: &'a str,
    /// Requests started but not yet completed.
    in_flight: usize,
    theme: &'a Theme,
}

impl<'a> TitleBar<'a> {
    pub fn new(host: &'a str, in_flight: usize, theme: &'a Theme) -> Self {
        Self { host, in_flight, theme }
    }
}

impl Widget for TitleBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut spans = vec![
            Span::styled(" micrographia ", self.theme.heading),
            Span::styled(self.host.to_string(), self.theme.muted),
        ];
        if self.in_flight > 0 {
            spans.push(Span::styled(format!("  ⟳ {} pending", self.in_flight), self.theme.label));
        }
        buf.set_line(area.x, area.y, &Line::from(spans), area.width);

        let hint = " q:quit  ?:help ";
        let hint_x = area.right().saturating_sub(hint.len() as u16);
        buf.set_string(hint_x, area.y, hint, Style::default().add_modifier(Modifier::DIM));
    }
}
