//! Semantic application events: crossterm key events mapped to a
//! widget-agnostic vocabulary so widgets never touch crossterm directly.
//!
//! # Keybindings
//!
//! The five action keys come from the `[keybindings]` section of
//! `config.toml` through a [`Keymap`]; the rest are fixed.
//!
//! | Key(s)                  | Event                      |
//! |-------------------------|----------------------------|
//! | `q`, `Ctrl+c`           | `Quit`                     |
//! | `Tab`                   | `FocusNext`                |
//! | `/` (configurable)      | `SearchFocus`              |
//! | `Space` (configurable)  | `ToggleCompare`            |
//! | `c` (configurable)      | `Compare`                  |
//! | `x` (configurable)      | `ClearComparison`          |
//! | `f` (configurable)      | `CycleFilter`              |
//! | `PageUp`, `Ctrl+u`      | `ScrollUp`                 |
//! | `PageDown`, `Ctrl+d`    | `ScrollDown`               |
//! | `↑` / `k`               | `Nav(Up)`                  |
//! | `↓` / `j`               | `Nav(Down)`                |
//! | printable char          | `Char(c)`                  |
//! | `Backspace`             | `Backspace`                |
//! | `Enter`                 | `Enter`                    |
//! | terminal resize         | `Resize(w, h)`             |
//!
//! ## Insert mode
//!
//! When a text-input widget (search bar, command bar) is focused, the event
//! loop calls [`to_app_event_insert`] instead, which forwards every printable
//! character as `Char` so the user can type freely.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use micrographia_core::config::KeybindingsConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    Quit,
    FocusNext,
    SearchFocus,
    ToggleCompare,
    Compare,
    ClearComparison,
    CycleFilter,
    ScrollUp,
    ScrollDown,
    Nav(Direction),
    Char(char),
    Backspace,
    Enter,
    Resize(u16, u16),
    Escape,
}

/// The configurable action keys, resolved to characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Keymap {
    pub search_focus: char,
    pub toggle_compare: char,
    pub compare: char,
    pub clear_comparison: char,
    pub cycle_filter: char,
}

impl Default for Keymap {
    fn default() -> Self {
        Self {
            search_focus: '/',
            toggle_compare: ' ',
            compare: 'c',
            clear_comparison: 'x',
            cycle_filter: 'f',
        }
    }
}

impl Keymap {
    /// Resolve the configured bindings. An empty binding keeps its default;
    /// the words `Space` and `Tab` are accepted for those keys.
    pub fn from_config(cfg: &KeybindingsConfig) -> Self {
        let defaults = Self::default();
        let pick = |binding: &str, fallback: char| match binding {
            "Space" | "space" => ' ',
            other => KeybindingsConfig::key(other).unwrap_or(fallback),
        };
        Self {
            search_focus: pick(&cfg.search_focus, defaults.search_focus),
            toggle_compare: pick(&cfg.toggle_compare, defaults.toggle_compare),
            compare: pick(&cfg.compare, defaults.compare),
            clear_comparison: pick(&cfg.clear_comparison, defaults.clear_comparison),
            cycle_filter: pick(&cfg.cycle_filter, defaults.cycle_filter),
        }
    }
}

/// Map a raw crossterm [`Event`] to an [`AppEvent`] (navigation mode).
///
/// Returns `None` for events that carry no meaning for the application
/// (mouse events, unbound keys).
pub fn to_app_event(event: Event, keymap: &Keymap) -> Option<AppEvent> {
    match event {
        Event::Resize(w, h) => Some(AppEvent::Resize(w, h)),
        Event::Key(key) => map_key(key, keymap),
        _ => None,
    }
}

/// Map a raw crossterm [`Event`] to an [`AppEvent`] for text-input mode.
pub fn to_app_event_insert(event: Event) -> Option<AppEvent> {
    match event {
        Event::Resize(w, h) => Some(AppEvent::Resize(w, h)),
        Event::Key(key) => map_key_insert(key),
        _ => None,
    }
}

fn map_key(key: KeyEvent, keymap: &Keymap) -> Option<AppEvent> {
    use KeyCode::*;
    use KeyModifiers as Mod;

    let plain = key.modifiers == Mod::NONE || key.modifiers == Mod::SHIFT;

    match key.code {
        Char('c') if key.modifiers == Mod::CONTROL => Some(AppEvent::Quit),
        Char('u') if key.modifiers == Mod::CONTROL => Some(AppEvent::ScrollUp),
        Char('d') if key.modifiers == Mod::CONTROL => Some(AppEvent::ScrollDown),

        // Configurable keys win over the fixed ones below
        Char(c) if plain && c == keymap.search_focus => Some(AppEvent::SearchFocus),
        Char(c) if plain && c == keymap.toggle_compare => Some(AppEvent::ToggleCompare),
        Char(c) if plain && c == keymap.compare => Some(AppEvent::Compare),
        Char(c) if plain && c == keymap.clear_comparison => Some(AppEvent::ClearComparison),
        Char(c) if plain && c == keymap.cycle_filter => Some(AppEvent::CycleFilter),

        Char('q') if key.modifiers == Mod::NONE => Some(AppEvent::Quit),
        Tab if key.modifiers == Mod::NONE => Some(AppEvent::FocusNext),

        PageUp => Some(AppEvent::ScrollUp),
        PageDown => Some(AppEvent::ScrollDown),

        Up | Char('k') if key.modifiers == Mod::NONE => Some(AppEvent::Nav(Direction::Up)),
        Down | Char('j') if key.modifiers == Mod::NONE => Some(AppEvent::Nav(Direction::Down)),
        Left | Char('h') if key.modifiers == Mod::NONE => Some(AppEvent::Nav(Direction::Left)),
        Right | Char('l') if key.modifiers == Mod::NONE => Some(AppEvent::Nav(Direction::Right)),

        Char(c) if plain => Some(AppEvent::Char(c)),

        Backspace if key.modifiers == Mod::NONE => Some(AppEvent::Backspace),
        Enter if key.modifiers == Mod::NONE => Some(AppEvent::Enter),
        Esc => Some(AppEvent::Escape),

        _ => None,
    }
}

fn map_key_insert(key: KeyEvent) -> Option<AppEvent> {
    use KeyCode::*;
    use KeyModifiers as Mod;

    match key.code {
        // Ctrl+c always quits, even while typing
        Char('c') if key.modifiers == Mod::CONTROL => Some(AppEvent::Quit),

        Up => Some(AppEvent::Nav(Direction::Up)),
        Down => Some(AppEvent::Nav(Direction::Down)),
        Left => Some(AppEvent::Nav(Direction::Left)),
        Right => Some(AppEvent::Nav(Direction::Right)),

        Tab if key.modifiers == Mod::NONE => Some(AppEvent::FocusNext),

        Char(c) if key.modifiers == Mod::NONE || key.modifiers == Mod::SHIFT => {
            Some(AppEvent::Char(c))
        }

        Backspace if key.modifiers == Mod::NONE => Some(AppEvent::Backspace),
        Enter if key.modifiers == Mod::NONE => Some(AppEvent::Enter),
        Esc => Some(AppEvent::Escape),

        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
