//! Tray bar: a one-line summary of the comparison tray.
//!
//! Reads the rendered `#comparisonTrayArea`; absent means the selection is
//! empty and a hint is shown instead. While a request is pending the
//! compare and clear key hints are withheld.

use crate::event::Keymap;
use crate::theme::Theme;
use micrographia_core::view::Element;
use micrographia_core::MAX_COMPARE_ITEMS;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::Widget,
};

pub struct TrayBar<'a> {
    tray: Option<&'a Element>,
    keymap: &'a Keymap,
    busy: bool,
    theme: &'a Theme,
}

impl<'a> TrayBar<'a> {
    pub fn new(tray: Option<&'a Element>, keymap: &'a Keymap, busy: bool, theme: &'a Theme) -> Self {
        Self { tray, keymap, busy, theme }
    }
}

fn key_label(c: char) -> String {
    match c {
        ' ' => "Space".to_string(),
        c => c.to_string(),
    }
}

impl Widget for TrayBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let Some(tray) = self.tray else {
            let hint = format!(
                " {} marks a result for comparison (up to {MAX_COMPARE_ITEMS})",
                key_label(self.keymap.toggle_compare)
            );
            buf.set_line(area.x, area.y, &Line::styled(hint, self.theme.muted), area.width);
            return;
        };

        let count = tray
            .find_by_id("comparisonCount")
            .map(Element::text_content)
            .unwrap_or_default();
        let members: Vec<String> = tray
            .find_by_id("comparisonSelectedList")
            .map(|list| list.elements().map(Element::text_content).collect())
            .unwrap_or_default();
        let compare_enabled = tray
            .find_by_id("compareSelectedButton")
            .is_some_and(|b| !b.has_attr("disabled"));

        let button = if compare_enabled {
            self.theme.button_enabled
        } else {
            self.theme.button_disabled
        };

        let mut spans = vec![
            Span::raw(" Compare "),
            Span::styled(format!("{count}/{MAX_COMPARE_ITEMS}"), self.theme.tray_count),
            Span::raw(": "),
            Span::raw(members.join(", ")),
        ];
        if !self.busy {
            spans.extend([
                Span::raw("  "),
                Span::styled(format!("[{}] Compare Selected", key_label(self.keymap.compare)), button),
                Span::raw("  "),
                Span::styled(
                    format!("[{}] Clear Selection", key_label(self.keymap.clear_comparison)),
                    self.theme.button_enabled,
                ),
            ]);
        }
        buf.set_line(area.x, area.y, &Line::from(spans), area.width);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use micrographia_core::page::Tray;
    use micrographia_core::render::render_tray;

    fn row(tray: Option<&Element>, busy: bool) -> String {
        let area = Rect::new(0, 0, 100, 1);
        let mut buf = Buffer::empty(area);
        let keymap = Keymap::default();
        let theme = Theme::load_default();
        TrayBar::new(tray, &keymap, busy, &theme).render(area, &mut buf);
        (0..area.width).map(|x| buf[(x, 0)].symbol()).collect::<String>()
    }

    fn two_members() -> Element {
        render_tray(&Tray {
            visible: true,
            members: vec!["Alpha".into(), "Beta".into()],
            count: "2".into(),
            compare_enabled: true,
        })
    }

    #[test]
    fn summarises_members_and_keys() {
        let text = row(Some(&two_members()), false);
        assert!(text.contains("Compare 2/5: Alpha, Beta"));
        assert!(text.contains("[c] Compare Selected"));
        assert!(text.contains("[x] Clear Selection"));
    }

    #[test]
    fn pending_request_hides_triggers() {
        let text = row(Some(&two_members()), true);
        assert!(text.contains("Alpha, Beta"));
        assert!(!text.contains("Compare Selected"));
    }

    #[test]
    fn empty_tray_shows_hint() {
        assert!(row(None, false).contains("Space marks a result"));
    }
}
