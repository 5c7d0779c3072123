//! Ratatui widgets for the micrographia TUI.

pub mod command_bar;
pub mod help;
pub mod line_input;
pub mod results_list;
pub mod search_bar;
pub mod title_bar;
pub mod tray_bar;
pub mod view_pane;
