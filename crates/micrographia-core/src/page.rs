//! Page model: the visible state of every panel.
//!
//! The controller mutates a [`Page`]; the renderer reads it. Panels that the
//! browser client toggled with `display: none` are modelled as `Option`s or
//! `visible` flags so "hidden" and "empty" stay distinct.

use crate::selection::SelectionSet;
use crate::types::{DetailRecord, GramFilter, SearchResult};

/// Severity of the shared banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Hides the detail and comparison panels.
    Error,
    /// Leaves the panels as they are.
    Minor,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub message: String,
    pub severity: Severity,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum ResultsPanel {
    #[default]
    Empty,
    /// A successful search that matched nothing.
    NoMatches(String),
    Listing(Vec<SearchResult>),
}

impl ResultsPanel {
    pub fn rows(&self) -> &[SearchResult] {
        match self {
            ResultsPanel::Listing(rows) => rows,
            _ => &[],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ComparisonPanel {
    pub visible: bool,
    /// Records shown as table columns. Empty means the placeholder is shown.
    pub records: Vec<DetailRecord>,
}

/// The comparison tray: everything derived from the selection set.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Tray {
    pub visible: bool,
    pub members: Vec<String>,
    pub count: String,
    pub compare_enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Page {
    pub loading: bool,
    pub banner: Option<Banner>,
    pub filter_status: Option<String>,
    pub results: ResultsPanel,
    /// `Some` while the detail panel is visible.
    pub detail: Option<DetailRecord>,
    pub comparison: ComparisonPanel,
    pub tray: Tray,
}

impl Page {
    pub fn new() -> Self {
        Self {
            tray: Tray {
                count: "0".to_string(),
                ..Tray::default()
            },
            ..Self::default()
        }
    }

    pub fn show_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    /// Put a message in the banner. A non-minor error also hides the detail
    /// and comparison panels.
    pub fn show_error(&mut self, message: impl Into<String>, severity: Severity) {
        self.banner = Some(Banner {
            message: message.into(),
            severity,
        });
        if severity == Severity::Error {
            self.detail = None;
            self.comparison.visible = false;
        }
    }

    pub fn hide_error(&mut self) {
        self.banner = None;
    }

    /// Hide both result panels ahead of a fetch.
    pub fn hide_panels(&mut self) {
        self.detail = None;
        self.comparison.visible = false;
    }

    /// Drop the comparison table so the placeholder shows again.
    pub fn reset_comparison(&mut self) {
        self.comparison.records.clear();
    }

    pub fn set_filter_status(&mut self, filter: GramFilter) {
        self.filter_status = match filter {
            GramFilter::Any => None,
            f => Some(format!("Filtered by: {}", f.label())),
        };
    }

    pub fn has_fatal_error(&self) -> bool {
        self.banner
            .as_ref()
            .is_some_and(|b| b.severity == Severity::Error)
    }
}

/// Bring every selection-derived part of the page in line with `selection`.
///
/// Idempotent; call it once after each selection mutation. Checkbox marks are
/// not stored on the page: the renderer derives them from the selection set.
pub fn sync_view(page: &mut Page, selection: &SelectionSet) {
    let tray = &mut page.tray;
    tray.visible = !selection.is_empty();
    tray.members = selection.members().iter().map(|c| c.name.clone()).collect();
    tray.count = selection.len().to_string();
    tray.compare_enabled = selection.can_compare();
}
