//! Colour theme for the micrographia TUI.
//!
//! Themes are defined as TOML files. Both built-in themes are embedded in the
//! binary via [`include_str!`] so the application works without any files on
//! disk. Pick one with [`Theme::by_name`] at startup and pass it through the
//! application as a shared reference.

use config::{Config, File, FileFormat};
use ratatui::style::{Color, Modifier, Style};
use serde::Deserialize;
use std::str::FromStr;

const DEFAULT_THEME_SRC: &str = include_str!("themes/default.toml");
const GRUVBOX_DARK_THEME_SRC: &str = include_str!("themes/gruvbox_dark.toml");

// ---------------------------------------------------------------------------
// Raw (serde) types, mirroring the TOML structure
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct RawStyle {
    fg: Option<String>,
    bg: Option<String>,
    #[serde(default)]
    bold: bool,
    #[serde(default)]
    dim: bool,
    #[serde(default)]
    italic: bool,
    #[serde(default)]
    underlined: bool,
}

impl RawStyle {
    fn into_style(self) -> Style {
        let modifiers = [
            (self.bold, Modifier::BOLD),
            (self.dim, Modifier::DIM),
            (self.italic, Modifier::ITALIC),
            (self.underlined, Modifier::UNDERLINED),
        ]
        .into_iter()
        .filter(|(on, _)| *on)
        .fold(Modifier::empty(), |acc, (_, m)| acc | m);

        let base = Style::default().add_modifier(modifiers);
        let base = match self.fg.as_deref().and_then(parse_color) {
            Some(c) => base.fg(c),
            None => base,
        };
        match self.bg.as_deref().and_then(parse_color) {
            Some(c) => base.bg(c),
            None => base,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawBorders {
    focused: RawStyle,
    unfocused: RawStyle,
    command_bar: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawText {
    heading: RawStyle,
    label: RawStyle,
    link: RawStyle,
    muted: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawBanner {
    error: RawStyle,
    minor: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawResults {
    checked: RawStyle,
    cursor: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawTray {
    count: RawStyle,
    enabled: RawStyle,
    disabled: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawTheme {
    borders: RawBorders,
    text: RawText,
    banner: RawBanner,
    results: RawResults,
    tray: RawTray,
}

// ---------------------------------------------------------------------------
// Public Theme type
// ---------------------------------------------------------------------------

/// Application colour theme. All styles are pre-resolved at load time.
#[derive(Debug, Clone)]
pub struct Theme {
    pub border_focused: Style,
    pub border_unfocused: Style,
    pub border_command_bar: Style,

    /// Section and panel headings in the main pane.
    pub heading: Style,
    /// `<strong>` labels such as "Rank:".
    pub label: Style,
    pub link: Style,
    /// Placeholders, loading text and other secondary copy.
    pub muted: Style,

    pub banner_error: Style,
    pub banner_minor: Style,

    /// Compare mark on a selected result row.
    pub checked: Style,
    /// Highlight for the row under the results cursor.
    pub cursor: Style,

    pub tray_count: Style,
    pub button_enabled: Style,
    pub button_disabled: Style,
}

impl Theme {
    /// The embedded default theme.
    pub fn load_default() -> Self {
        Self::embedded("default", DEFAULT_THEME_SRC)
    }

    pub fn load_gruvbox_dark() -> Self {
        Self::embedded("gruvbox_dark", GRUVBOX_DARK_THEME_SRC)
    }

    /// # Panics
    ///
    /// Panics if a built-in theme file is malformed, which the tests below
    /// rule out.
    fn embedded(name: &str, src: &str) -> Self {
        match Self::from_toml_str(src) {
            Ok(theme) => theme,
            Err(e) => panic!("built-in theme {name} is invalid: {e}"),
        }
    }

    /// Resolve a theme name as written in `config.toml` or `:theme`. Unknown
    /// names fall back to the default theme.
    pub fn by_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "gruvbox" | "gruvbox_dark" | "gruvbox-dark" => Self::load_gruvbox_dark(),
            other => {
                if other != "default" {
                    tracing::warn!(theme = other, "unknown theme, using default");
                }
                Self::load_default()
            }
        }
    }

    /// Parse a theme from a TOML string. Unknown keys are ignored.
    pub fn from_toml_str(src: &str) -> anyhow::Result<Self> {
        let raw: RawTheme = Config::builder()
            .add_source(File::from_str(src, FileFormat::Toml))
            .build()?
            .try_deserialize()?;

        Ok(Self {
            border_focused: raw.borders.focused.into_style(),
            border_unfocused: raw.borders.unfocused.into_style(),
            border_command_bar: raw.borders.command_bar.into_style(),
            heading: raw.text.heading.into_style(),
            label: raw.text.label.into_style(),
            link: raw.text.link.into_style(),
            muted: raw.text.muted.into_style(),
            banner_error: raw.banner.error.into_style(),
            banner_minor: raw.banner.minor.into_style(),
            checked: raw.results.checked.into_style(),
            cursor: raw.results.cursor.into_style(),
            tray_count: raw.tray.count.into_style(),
            button_enabled: raw.tray.enabled.into_style(),
            button_disabled: raw.tray.disabled.into_style(),
        })
    }

    pub fn border(&self, focused: bool) -> Style {
        if focused {
            self.border_focused
        } else {
            self.border_unfocused
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Resolve a colour as written in a theme file.
///
/// Anything ratatui's own parser takes is accepted (`red`, `dark_gray`,
/// `#rrggbb`, a bare 256-colour index), plus `indexed:N` for readability.
/// Unrecognised values leave the colour unset.
fn parse_color(s: &str) -> Option<Color> {
    let s = s.trim();
    if let Some(n) = s.strip_prefix("indexed:") {
        return n.parse().ok().map(Color::Indexed);
    }
    Color::from_str(s).ok()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_theme_loads() {
        let theme = Theme::load_default();
        assert_ne!(theme.banner_error, Style::default());
        assert_ne!(theme.border_focused, Style::default());
        assert_ne!(theme.checked, Style::default());
    }

    #[test]
    fn gruvbox_dark_theme_loads() {
        let theme = Theme::load_gruvbox_dark();
        assert_eq!(theme.link.fg, Some(Color::Rgb(0x83, 0xa5, 0x98)));
        assert_ne!(theme.banner_minor, Style::default());
    }

    #[test]
    fn by_name_resolves_aliases() {
        assert_eq!(Theme::by_name("Gruvbox-Dark").heading, Theme::load_gruvbox_dark().heading);
        assert_eq!(Theme::by_name("nonsense").heading, Theme::load_default().heading);
    }

    #[test]
    fn theme_colour_spellings() {
        assert_eq!(parse_color("#fe8019"), Some(Color::Rgb(0xfe, 0x80, 0x19)));
        assert_eq!(parse_color("dark_gray"), Some(Color::DarkGray));
        assert_eq!(parse_color("light_cyan"), Some(Color::LightCyan));
        assert_eq!(parse_color("indexed:208"), Some(Color::Indexed(208)));
        assert_eq!(parse_color("chartreuse"), None);
    }

    #[test]
    fn modifiers_combine() {
        let raw = RawStyle {
            fg: Some("red".into()),
            bg: None,
            bold: true,
            dim: false,
            italic: true,
            underlined: false,
        };
        let style = raw.into_style();
        assert_eq!(style.fg, Some(Color::Red));
        assert_eq!(style.add_modifier, Modifier::BOLD | Modifier::ITALIC);
    }
}
