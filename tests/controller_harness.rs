#![allow(unused)]
//! Interaction controller end-to-end harness.
//!
//! # What this covers
//!
//! Drives a [`Controller`] through real HTTP against the fake API, the same
//! path the terminal front end takes:
//!
//! - **Search then detail**: searching "Bacillus" lists its hits; opening
//!   TaxID 1423 shows Gram stain "Positive" and hides the loading indicator.
//! - **Filters and empty results**: the filter status line and the
//!   no-matches message.
//! - **Comparison**: three selections with one failing render a two-column
//!   table and a minor banner naming the failed organism; all failing shows
//!   the placeholder; fewer than two never reaches the network.
//! - **Capacity**: a sixth selection is refused with a minor banner.
//! - **Error banners**: gateway failures hide the detail and comparison
//!   panels.
//! - **Overlapping fetches**: the response that completes last wins.
//!
//! # What this does NOT cover
//!
//! - Key handling and painting (see the tui crate's tests)
//!
//! # Running
//!
//! ```sh
//! cargo test --test controller_harness
//! ```

mod common;
use common::*;

use micrographia_core::controller::NO_COMPARISON_DATA;
use micrographia_core::page::ResultsPanel;
use micrographia_core::view::Tag;
use micrographia_core::{
    execute, Action, Candidate, Controller, GramFilter, Outcome, Request, Severity,
};
use micrographia_gateway::HttpGateway;
use pretty_assertions::assert_eq;

async fn setup() -> (FakeTaxonomyApi, HttpGateway) {
    let api = FakeTaxonomyApi::start().await.unwrap();
    api.add_search("bacillus", bacillus_rows()).await;
    api.add_detail(bacillus_subtilis().build_json()).await;
    api.add_detail(escherichia_coli().build_json()).await;
    api.add_detail(staph_aureus().build_json()).await;
    let gateway = HttpGateway::new(&api.base_url()).unwrap();
    (api, gateway)
}

fn search(term: &str, filter: GramFilter) -> Action {
    Action::Search {
        term: term.to_string(),
        filter,
    }
}

fn pick((tax_id, name): (&str, &str)) -> Action {
    Action::ToggleCompare {
        candidate: Candidate::new(tax_id, name),
        checked: true,
    }
}

#[tokio::test]
async fn search_then_detail() {
    let (_api, gateway) = setup().await;
    let mut c = Controller::new();

    c.run(&gateway, search("Bacillus", GramFilter::Any)).await;
    let tree = c.render();
    let names: Vec<String> = tree
        .find_all(&|e| e.has_class("result-name"))
        .iter()
        .map(|e| e.text_content())
        .collect();
    assert_eq!(
        names,
        vec![
            "Bacillus subtilis (TaxID: 1423)",
            "Bacillus cereus (TaxID: 1396)",
            "Bacillus oddity (TaxID: 99999)",
        ]
    );

    c.run(
        &gateway,
        Action::ShowDetail {
            tax_id: BACILLUS_SUBTILIS.0.to_string(),
        },
    )
    .await;
    let tree = c.render();
    assert_text!(tree, "gramStain", "Positive");
    assert_text!(tree, "microbeScientificName", BACILLUS_SUBTILIS.1);
    assert_absent!(tree, "loadingIndicator");
    assert_absent!(tree, "errorContainer");
    // The listing survives opening a detail.
    assert_eq!(c.page().results.rows().len(), 3);
}

#[tokio::test]
async fn filtered_search_shows_status() {
    let (_api, gateway) = setup().await;
    let mut c = Controller::new();

    c.run(&gateway, search("bacillus", GramFilter::Positive)).await;
    let tree = c.render();
    assert_text!(tree, "filterStatus", "Filtered by: Gram-positive");
    assert_eq!(c.page().results.rows().len(), 2);

    c.run(&gateway, search("bacillus", GramFilter::Any)).await;
    assert_absent!(c.render(), "filterStatus");
}

#[tokio::test]
async fn no_matches_message_names_term_and_filter() {
    let (_api, gateway) = setup().await;
    let mut c = Controller::new();

    c.run(&gateway, search("xyzzy", GramFilter::Negative)).await;
    assert_eq!(
        c.page().results,
        ResultsPanel::NoMatches(
            "No results found for \"xyzzy\" with filter: Gram-negative.".to_string()
        )
    );
    assert!(c.page().banner.is_none());
}

#[tokio::test]
async fn blank_search_makes_no_request() {
    let (api, gateway) = setup().await;
    let mut c = Controller::new();

    c.run(&gateway, search("  ", GramFilter::Any)).await;
    assert_banner!(c, "Please enter a microbe name to search.", fatal);
    assert!(api.requests().await.is_empty());
}

#[tokio::test]
async fn partial_comparison_names_failed_organism() {
    let (api, gateway) = setup().await;
    api.fail_in_batch(STAPH_AUREUS.0, "upstream timeout").await;
    let mut c = Controller::new();

    c.run(&gateway, pick(BACILLUS_SUBTILIS)).await;
    c.run(&gateway, pick(ECOLI)).await;
    c.run(&gateway, pick(STAPH_AUREUS)).await;
    c.run(&gateway, Action::Compare).await;

    let tree = c.render();
    let table = tree.find_by_id("comparisonTableContainer").unwrap();
    let headers: Vec<String> = table
        .find_all(&|e| e.tag == Tag::Th)
        .iter()
        .map(|e| e.text_content())
        .collect();
    assert_eq!(headers, vec!["Feature", BACILLUS_SUBTILIS.1, ECOLI.1]);
    assert_banner!(
        c,
        "Note: Some microbes could not be fetched for comparison: Staphylococcus aureus (upstream timeout)",
        minor
    );
    // The selection is untouched by a comparison.
    assert_eq!(c.selection().len(), 3);
}

#[tokio::test]
async fn comparison_with_no_successes_shows_placeholder() {
    let (api, gateway) = setup().await;
    api.fail_in_batch(BACILLUS_SUBTILIS.0, "gone").await;
    api.fail_in_batch(ECOLI.0, "gone").await;
    let mut c = Controller::new();

    c.run(&gateway, pick(BACILLUS_SUBTILIS)).await;
    c.run(&gateway, pick(ECOLI)).await;
    c.run(&gateway, Action::Compare).await;

    let tree = c.render();
    assert!(tree.find_by_id("comparisonDisplayArea").is_some());
    assert!(tree.find_by_id("comparisonPlaceholderText").is_some());
    assert_banner!(c, NO_COMPARISON_DATA, minor);
}

#[tokio::test]
async fn compare_with_one_selection_never_hits_network() {
    let (api, gateway) = setup().await;
    let mut c = Controller::new();

    c.run(&gateway, pick(BACILLUS_SUBTILIS)).await;
    c.run(&gateway, Action::Compare).await;
    assert_banner!(c, "Please select at least two microbes to compare.", fatal);
    assert!(api.requests().await.is_empty());
}

#[tokio::test]
async fn sixth_selection_is_refused() {
    let (_api, gateway) = setup().await;
    let mut c = Controller::new();

    for n in 0..5 {
        c.run(&gateway, pick((&n.to_string(), "Organism"))).await;
    }
    c.run(&gateway, pick(BACILLUS_SUBTILIS)).await;

    assert_eq!(c.selection().len(), 5);
    assert!(!c.selection().contains(BACILLUS_SUBTILIS.0));
    assert_banner!(c, "You can select a maximum of 5 microbes for comparison.", minor);
    assert_text!(c.render(), "comparisonCount", "5");
}

#[tokio::test]
async fn detail_failure_hides_panels() {
    let (_api, gateway) = setup().await;
    let mut c = Controller::new();

    c.run(&gateway, pick(BACILLUS_SUBTILIS)).await;
    c.run(&gateway, pick(ECOLI)).await;
    c.run(&gateway, Action::Compare).await;
    assert!(c.page().comparison.visible);

    c.run(
        &gateway,
        Action::ShowDetail {
            tax_id: "404404".to_string(),
        },
    )
    .await;
    let tree = c.render();
    assert_banner!(c, "Detail fetch error: Microbe with TaxID 404404 not found", fatal);
    assert_absent!(tree, "microbeDetailSection");
    assert_absent!(tree, "comparisonDisplayArea");
    assert_absent!(tree, "loadingIndicator");
}

#[tokio::test]
async fn server_error_on_search_surfaces_in_banner() {
    let (api, gateway) = setup().await;
    api.fail_all(500, "").await;
    let mut c = Controller::new();

    c.run(&gateway, search("Bacillus", GramFilter::Any)).await;
    assert_banner!(c, "Search error: HTTP error 500", fatal);
    assert!(!c.page().loading);
}

#[tokio::test]
async fn clear_hides_tray_and_comparison() {
    let (_api, gateway) = setup().await;
    let mut c = Controller::new();

    c.run(&gateway, pick(BACILLUS_SUBTILIS)).await;
    c.run(&gateway, pick(ECOLI)).await;
    c.run(&gateway, Action::Compare).await;
    c.run(&gateway, Action::ClearComparison).await;

    let tree = c.render();
    assert!(c.selection().is_empty());
    assert_absent!(tree, "comparisonTrayArea");
    assert_absent!(tree, "comparisonDisplayArea");
}

#[tokio::test]
async fn last_completed_detail_wins() {
    let (_api, gateway) = setup().await;
    let mut c = Controller::new();

    let first = c
        .dispatch(Action::ShowDetail {
            tax_id: BACILLUS_SUBTILIS.0.to_string(),
        })
        .unwrap();
    let second = c
        .dispatch(Action::ShowDetail {
            tax_id: ECOLI.0.to_string(),
        })
        .unwrap();
    assert!(c.page().loading);

    // Complete out of order: the first request settles last.
    let second = execute(&gateway, second).await;
    let first = execute(&gateway, first).await;
    c.complete(second);
    c.complete(first);

    assert_text!(c.render(), "microbeScientificName", BACILLUS_SUBTILIS.1);
    assert!(!c.page().loading);
}
