//! Interaction controller.
//!
//! The controller owns the [`Page`] and the [`SelectionSet`] and is their
//! only mutator. It is sans-IO: [`Controller::dispatch`] turns a user
//! [`Action`] into at most one [`Request`], the front end runs that request
//! with [`execute`] wherever it likes, and hands the resulting [`Outcome`]
//! back to [`Controller::complete`].
//!
//! Outcomes are applied in arrival order. Two overlapping detail fetches
//! are not reconciled: whichever response arrives last fills the panel.

use crate::api::TaxonomyApi;
use crate::error::{ClientError, QueryError, ValidationError};
use crate::page::{sync_view, Page, ResultsPanel, Severity};
use crate::render::{no_matches_message, render_page};
use crate::selection::SelectionSet;
use crate::types::{Candidate, ComparisonResult, DetailRecord, GramFilter, SearchResult};
use crate::view::Element;
use std::collections::BTreeMap;

pub const NO_COMPARISON_DATA: &str = "No data returned for the selected microbes for comparison.";

/// A user intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Search { term: String, filter: GramFilter },
    ShowDetail { tax_id: String },
    /// A compare checkbox changed to `checked`.
    ToggleCompare { candidate: Candidate, checked: bool },
    Compare,
    ClearComparison,
}

/// A gateway call the controller wants made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Search { term: String, filter: GramFilter },
    Detail { tax_id: String },
    Batch { tax_ids: Vec<String> },
}

/// The settled result of a [`Request`].
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Search {
        term: String,
        filter: GramFilter,
        result: Result<Vec<SearchResult>, QueryError>,
    },
    Detail {
        tax_id: String,
        result: Result<DetailRecord, QueryError>,
    },
    Batch {
        tax_ids: Vec<String>,
        result: Result<ComparisonResult, QueryError>,
    },
}

/// Run one request against `api`.
pub async fn execute<A: TaxonomyApi>(api: &A, request: Request) -> Outcome {
    tracing::debug!(request = ?request, "executing request");
    match request {
        Request::Search { term, filter } => {
            let result = api.search(&term, filter).await;
            Outcome::Search { term, filter, result }
        }
        Request::Detail { tax_id } => {
            let result = api.fetch_detail(&tax_id).await;
            Outcome::Detail { tax_id, result }
        }
        Request::Batch { tax_ids } => {
            let result = api.fetch_batch_detail(&tax_ids).await;
            Outcome::Batch { tax_ids, result }
        }
    }
}

#[derive(Debug, Clone)]
pub struct Controller {
    page: Page,
    selection: SelectionSet,
}

impl Default for Controller {
    fn default() -> Self {
        Self::new()
    }
}

impl Controller {
    pub fn new() -> Self {
        let mut controller = Self {
            page: Page::new(),
            selection: SelectionSet::new(),
        };
        sync_view(&mut controller.page, &controller.selection);
        controller
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    /// Render the whole page from current state.
    pub fn render(&self) -> Element {
        render_page(&self.page, &self.selection)
    }

    /// Apply a user action. Returns the request to run, if any.
    pub fn dispatch(&mut self, action: Action) -> Option<Request> {
        tracing::debug!(action = ?action, "controller: dispatch");
        match action {
            Action::Search { term, filter } => self.begin_search(&term, filter),
            Action::ShowDetail { tax_id } => {
                self.begin_fetch();
                self.page.reset_comparison();
                Some(Request::Detail { tax_id })
            }
            Action::ToggleCompare { candidate, checked } => {
                self.toggle_compare(candidate, checked);
                None
            }
            Action::Compare => self.begin_compare(),
            Action::ClearComparison => {
                self.selection.clear();
                sync_view(&mut self.page, &self.selection);
                self.page.comparison.visible = false;
                self.page.reset_comparison();
                None
            }
        }
    }

    /// Apply a settled request. The loading indicator is hidden exactly once.
    pub fn complete(&mut self, outcome: Outcome) {
        self.page.show_loading(false);
        match outcome {
            Outcome::Search { term, filter, result } => match result {
                Ok(rows) if rows.is_empty() => {
                    tracing::debug!(term = %term, "search: no matches");
                    self.page.results = ResultsPanel::NoMatches(no_matches_message(&term, filter));
                }
                Ok(rows) => {
                    tracing::debug!(term = %term, hits = rows.len(), "search: results");
                    self.page.results = ResultsPanel::Listing(rows);
                    sync_view(&mut self.page, &self.selection);
                }
                Err(e) => {
                    tracing::warn!(term = %term, error = %e, "search failed");
                    self.page.show_error(format!("Search error: {e}"), Severity::Error);
                }
            },
            Outcome::Detail { tax_id, result } => match result {
                Ok(record) => {
                    tracing::debug!(tax_id = %tax_id, "detail: loaded");
                    self.page.detail = Some(record);
                }
                Err(e) => {
                    tracing::warn!(tax_id = %tax_id, error = %e, "detail fetch failed");
                    self.page.show_error(format!("Detail fetch error: {e}"), Severity::Error);
                }
            },
            Outcome::Batch { tax_ids, result } => self.finish_compare(&tax_ids, result),
        }
    }

    /// Dispatch, run and complete in one go.
    pub async fn run<A: TaxonomyApi>(&mut self, api: &A, action: Action) {
        if let Some(request) = self.dispatch(action) {
            let outcome = execute(api, request).await;
            self.complete(outcome);
        }
    }

    fn fail(&mut self, err: impl Into<ClientError>) {
        let err = err.into();
        let severity = err.severity();
        self.page.show_error(err.to_string(), severity);
    }

    fn begin_fetch(&mut self) {
        self.page.show_loading(true);
        self.page.hide_error();
        self.page.hide_panels();
    }

    fn begin_search(&mut self, term: &str, filter: GramFilter) -> Option<Request> {
        let term = term.trim();
        if term.is_empty() {
            self.fail(ValidationError::EmptySearchTerm);
            self.page.results = ResultsPanel::Empty;
            return None;
        }
        self.begin_fetch();
        self.page.results = ResultsPanel::Empty;
        self.page.reset_comparison();
        self.page.set_filter_status(filter);
        Some(Request::Search {
            term: term.to_string(),
            filter,
        })
    }

    fn toggle_compare(&mut self, candidate: Candidate, checked: bool) {
        if checked {
            if let Err(e) = self.selection.add(candidate) {
                // The checkbox reverts on its own: rows read their mark from
                // the selection set.
                self.fail(e);
            }
        } else {
            self.selection.remove(&candidate.tax_id);
        }
        sync_view(&mut self.page, &self.selection);
    }

    fn begin_compare(&mut self) -> Option<Request> {
        if !self.selection.can_compare() {
            self.fail(ValidationError::TooFewSelections {
                selected: self.selection.len(),
            });
            return None;
        }
        self.begin_fetch();
        Some(Request::Batch {
            tax_ids: self.selection.tax_ids(),
        })
    }

    fn finish_compare(&mut self, tax_ids: &[String], result: Result<ComparisonResult, QueryError>) {
        match result {
            Ok(comparison) if !comparison.successes.is_empty() => {
                tracing::debug!(
                    columns = comparison.successes.len(),
                    failed = comparison.failures.len(),
                    "compare: loaded"
                );
                let partial = comparison.is_partial();
                self.page.comparison.visible = true;
                self.page.comparison.records = comparison.successes;
                if partial {
                    let message = partial_failure_message(&comparison.failures, tax_ids, &self.selection);
                    tracing::warn!(message = %message, "compare: partial failure");
                    self.page.show_error(message, Severity::Minor);
                }
            }
            Ok(_) => {
                self.page.reset_comparison();
                self.page.comparison.visible = true;
                self.page.show_error(NO_COMPARISON_DATA, Severity::Minor);
            }
            Err(e) => {
                tracing::warn!(error = %e, "compare failed");
                self.page.reset_comparison();
                self.page.show_error(format!("Comparison error: {e}"), Severity::Error);
            }
        }
    }
}

/// Banner text for a batch where some identifiers failed.
///
/// Names come from the selection set, falling back to `TaxID <id>`. Failures
/// are listed in request order; any the server reported for identifiers that
/// were not requested follow.
pub fn partial_failure_message(
    failures: &BTreeMap<String, String>,
    requested: &[String],
    selection: &SelectionSet,
) -> String {
    let ordered = requested
        .iter()
        .filter(|id| failures.contains_key(*id))
        .chain(failures.keys().filter(|id| !requested.contains(id)));

    let parts: Vec<String> = ordered
        .map(|id| {
            let name = selection
                .name_of(id)
                .map(str::to_owned)
                .unwrap_or_else(|| format!("TaxID {id}"));
            format!("{name} ({})", failures[id])
        })
        .collect();

    format!(
        "Note: Some microbes could not be fetched for comparison: {}",
        parts.join("; ")
    )
}
