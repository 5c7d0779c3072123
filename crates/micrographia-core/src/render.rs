//! View renderer: pure functions from fetched data to a [`view`](crate::view) tree.
//!
//! Nothing here mutates the selection set or the page, and nothing issues
//! requests. Each surface has its own function so front ends can render a
//! single panel; [`render_page`] assembles all of them.

use crate::page::{Banner, ComparisonPanel, Page, ResultsPanel, Severity, Tray};
use crate::selection::SelectionSet;
use crate::types::{keys, BiosampleRecord, DetailRecord, GenomeRecord, GramFilter, LineageStep};
use crate::view::{el, Element, Tag};

pub const NOT_AVAILABLE: &str = "N/A";
pub const NOT_DETERMINED: &str = "Not Determined";
pub const NO_LINEAGE: &str = "No lineage information available.";
pub const NO_GENOMIC_RECORDS: &str = "No genomic records found.";
pub const NO_BIOSAMPLE_RECORDS: &str = "No BioSample records found.";
pub const NO_DESCRIPTION: &str = "Detailed summary not available from this source.";
pub const NO_IMAGE: &str = "No image available.";
pub const MORE_ATTRIBUTES: &str = "... and more attributes not shown here.";
pub const COMPARISON_PLACEHOLDER: &str = "No data available to display in comparison table.";
pub const LOADING: &str = "Loading...";

const NCBI_TAXONOMY_BROWSER: &str = "https://www.ncbi.nlm.nih.gov/Taxonomy/Browser/wwwtax.cgi?id=";
const NCBI_NUCCORE: &str = "https://www.ncbi.nlm.nih.gov/nuccore/";
const NCBI_BIOSAMPLE: &str = "https://www.ncbi.nlm.nih.gov/biosample/";

/// BioSample attributes always shown, compared against the lowercased name.
pub const ATTRIBUTE_ALLOW_LIST: [&str; 8] = [
    "isolation source",
    "host",
    "geographic location",
    "collection date",
    "strain",
    "isolate",
    "sample name",
    "sample type",
];

/// Sub-records with at most this many attributes show all of them.
pub const MAX_ATTRIBUTES_SHOWN: usize = 8;

/// Comparison table rows: (detail field, row label), in display order.
pub const COMPARISON_FEATURES: [(&str, &str); 6] = [
    (keys::TAX_ID, "NCBI TaxID"),
    (keys::RANK, "Rank"),
    (keys::GRAM_STAIN, "Gram Stain"),
    (keys::OXYGEN_REQUIREMENT, "Oxygen Requirement"),
    (keys::PRIMARY_GENOME_SIZE, "Genome Size (bp)"),
    (keys::PRIMARY_ISOLATION_SOURCE, "Isolation Source"),
];

// ---------------------------------------------------------------------------
// Search results
// ---------------------------------------------------------------------------

/// Message for a successful search with no hits.
pub fn no_matches_message(term: &str, filter: GramFilter) -> String {
    match filter {
        GramFilter::Any => format!("No results found for \"{term}\"."),
        f => format!("No results found for \"{term}\" with filter: {}.", f.label()),
    }
}

/// The result list. Each row carries a compare checkbox, checked when the
/// row's organism is in `selection`.
pub fn render_search_results(results: &ResultsPanel, selection: &SelectionSet) -> Element {
    let container = el(Tag::Div).id("searchResultsContainer");
    match results {
        ResultsPanel::Empty => container,
        ResultsPanel::NoMatches(message) => container.child(el(Tag::P).text(message.as_str())),
        ResultsPanel::Listing(rows) => container.child(el(Tag::Ul).class("search-results-list").children(
            rows.iter().map(|row| {
                el(Tag::Li)
                    .child(
                        el(Tag::Input)
                            .attr("type", "checkbox")
                            .class("compare-checkbox")
                            .attr("data-tax-id", row.tax_id.as_str())
                            .attr("data-name", row.scientific_name.as_str())
                            .flag("checked", selection.contains(&row.tax_id)),
                    )
                    .child(
                        el(Tag::Span)
                            .class("result-name")
                            .attr("data-tax-id", row.tax_id.as_str())
                            .text(format!("{} (TaxID: {})", row.scientific_name, row.tax_id)),
                    )
            }),
        )),
    }
}

// ---------------------------------------------------------------------------
// Detail panel
// ---------------------------------------------------------------------------

fn field(label: &str, id: &str, value: Element) -> Element {
    el(Tag::P)
        .class("field")
        .child(el(Tag::Strong).text(format!("{label}:")))
        .text(" ")
        .child(value.id(id))
}

fn value_span(value: Option<String>, fallback: &str) -> Element {
    el(Tag::Span).text(value.unwrap_or_else(|| fallback.to_string()))
}

fn link(href: String, text: impl Into<String>) -> Element {
    el(Tag::A).attr("href", href).attr("target", "_blank").text(text)
}

/// Whether a value is present and not the server's own "N/A" marker.
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| *v != NOT_AVAILABLE)
}

/// The full detail panel for one organism.
pub fn render_detail(record: &DetailRecord) -> Element {
    let name = record.scientific_name();

    let tax_id = match record.tax_id().filter(|id| id != NOT_AVAILABLE) {
        Some(id) => el(Tag::Span).child(link(format!("{NCBI_TAXONOMY_BROWSER}{id}"), id)),
        None => el(Tag::Span).text(NOT_AVAILABLE),
    };

    let image = match record.image_url() {
        Some(url) => el(Tag::Img)
            .id("microbeImage")
            .attr("src", url)
            .attr("alt", format!("Image of {}", name.as_deref().unwrap_or(NOT_AVAILABLE))),
        None => el(Tag::P).id("noImageText").text(NO_IMAGE),
    };

    el(Tag::Section)
        .id("microbeDetailSection")
        .child(el(Tag::H2).id("microbeScientificName").text(name.clone().unwrap_or_else(|| NOT_AVAILABLE.into())))
        .child(image)
        .child(field("Rank", "microbeRank", value_span(record.rank(), NOT_AVAILABLE)))
        .child(field("NCBI TaxID", "ncbiTaxId", tax_id))
        .child(field("Gram Stain", "gramStain", value_span(record.gram_stain(), NOT_DETERMINED)))
        .child(field("Cell Shape", "cellShape", value_span(record.cell_shape(), NOT_AVAILABLE)))
        .child(field(
            "Oxygen Requirement",
            "oxygenRequirement",
            value_span(record.oxygen_requirement(), NOT_AVAILABLE),
        ))
        .child(field("GC Content", "gcContent", value_span(record.gc_content(), NOT_AVAILABLE)))
        .child(
            el(Tag::P)
                .id("microbeDescription")
                .text(record.description().unwrap_or_else(|| NO_DESCRIPTION.into())),
        )
        .child(el(Tag::H3).text("Taxonomy Lineage"))
        .child(render_lineage(&record.lineage()))
        .child(el(Tag::H3).text("Genomic Records"))
        .child(render_genome_records(&record.genome_records()))
        .child(el(Tag::H3).text("BioSample Records"))
        .child(render_biosample_records(&record.biosamples()))
        .child(el(Tag::H3).text("External Links"))
        .child(render_external_links(record, name.as_deref()))
}

pub fn render_lineage(lineage: &[LineageStep]) -> Element {
    let container = el(Tag::Div).id("taxonomyLineage");
    if lineage.is_empty() {
        return container.child(el(Tag::P).text(NO_LINEAGE));
    }
    container.child(el(Tag::Ul).class("lineage").children(lineage.iter().map(|step| {
        el(Tag::Li)
            .child(
                el(Tag::Span)
                    .class("rank-label")
                    .text(format!("{}:", step.rank.as_deref().unwrap_or(NOT_AVAILABLE))),
            )
            .text(format!(" {}", step.scientific_name.as_deref().unwrap_or(NOT_AVAILABLE)))
    })))
}

fn accession_line(accession: &Option<String>, base: &str) -> Element {
    let line = el(Tag::P)
        .class("record-title")
        .child(el(Tag::Strong).text("Accession:"))
        .text(" ");
    match present(accession) {
        Some(acc) => line.child(link(format!("{base}{acc}"), acc)),
        None => line.text(NOT_AVAILABLE),
    }
}

pub fn render_genome_records(records: &[GenomeRecord]) -> Element {
    let container = el(Tag::Div).id("nuccoreRecordsList");
    if records.is_empty() {
        return container.child(el(Tag::P).text(NO_GENOMIC_RECORDS));
    }
    container.children(records.iter().map(|rec| {
        let mut item = el(Tag::Div)
            .class("record-item")
            .child(accession_line(&rec.nuccore_id, NCBI_NUCCORE));
        if let Some(title) = &rec.title {
            item = item.child(el(Tag::P).child(el(Tag::Em).text(title.as_str())));
        }
        if let Some(len) = present(&rec.sequence_length) {
            item = item.child(el(Tag::P).text(format!("Length: {len} bp")));
        }
        if let Some(mol) = present(&rec.molecule_type) {
            item = item.child(el(Tag::P).text(format!("Molecule: {mol}")));
        }
        item
    }))
}

pub fn render_biosample_records(records: &[BiosampleRecord]) -> Element {
    let container = el(Tag::Div).id("biosampleRecordsList");
    if records.is_empty() {
        return container.child(el(Tag::P).text(NO_BIOSAMPLE_RECORDS));
    }
    container.children(records.iter().map(|rec| {
        let mut item = el(Tag::Div)
            .class("record-item")
            .child(accession_line(&rec.accession, NCBI_BIOSAMPLE));
        if let Some(title) = &rec.title {
            item = item.child(el(Tag::P).child(el(Tag::Em).text(title.as_str())));
        }
        if let Some(list) = render_attribute_list(rec) {
            item = item.child(list);
        }
        item
    }))
}

/// Attribute list for one BioSample, or `None` when it has no attributes.
///
/// An attribute is shown when its lowercased name is allow-listed or the
/// sample has at most [`MAX_ATTRIBUTES_SHOWN`] attributes. Samples above that
/// count end with the [`MORE_ATTRIBUTES`] marker.
pub fn render_attribute_list(record: &BiosampleRecord) -> Option<Element> {
    let attrs = &record.attributes;
    if attrs.is_empty() {
        return None;
    }
    let show_all = attrs.len() <= MAX_ATTRIBUTES_SHOWN;
    let mut list = el(Tag::Ul).class("attribute-list").children(
        attrs
            .iter()
            .filter(|a| show_all || ATTRIBUTE_ALLOW_LIST.contains(&a.name.to_lowercase().as_str()))
            .map(|a| {
                el(Tag::Li)
                    .child(el(Tag::Strong).text(format!("{}:", a.name)))
                    .text(format!(" {}", a.value.as_deref().unwrap_or(NOT_AVAILABLE)))
            }),
    );
    if !show_all {
        list = list.child(el(Tag::Li).class("more-attributes").text(MORE_ATTRIBUTES));
    }
    Some(list)
}

fn render_external_links(record: &DetailRecord, name: Option<&str>) -> Element {
    let item = match record.ncbi_taxonomy_link() {
        Some(href) => link(
            href,
            format!("NCBI Taxonomy Home for {}", name.unwrap_or(NOT_AVAILABLE)),
        ),
        None => link(
            format!(
                "{NCBI_TAXONOMY_BROWSER}{}",
                record.tax_id().unwrap_or_default()
            ),
            "View on NCBI Taxonomy Browser",
        ),
    };
    el(Tag::Ul).id("externalLinksList").child(el(Tag::Li).child(item))
}

// ---------------------------------------------------------------------------
// Comparison
// ---------------------------------------------------------------------------

/// Comparison table, one column per record in the given order. With no
/// records the container holds only the placeholder paragraph.
pub fn render_comparison_table(records: &[DetailRecord]) -> Element {
    let container = el(Tag::Div).id("comparisonTableContainer");
    if records.is_empty() {
        return container.child(
            el(Tag::P)
                .id("comparisonPlaceholderText")
                .text(COMPARISON_PLACEHOLDER),
        );
    }

    let header = el(Tag::Tr).child(el(Tag::Th).text("Feature")).children(records.iter().map(|r| {
        el(Tag::Th).text(r.scientific_name().unwrap_or_else(|| {
            format!("TaxID: {}", r.tax_id().unwrap_or_else(|| NOT_AVAILABLE.into()))
        }))
    }));

    let rows = COMPARISON_FEATURES.iter().map(|(key, label)| {
        el(Tag::Tr)
            .child(el(Tag::Td).class("feature-label").text(*label))
            .children(records.iter().map(|r| {
                el(Tag::Td).text(r.text(key).unwrap_or_else(|| NOT_AVAILABLE.into()))
            }))
    });

    container.child(
        el(Tag::Table)
            .class("comparison-table")
            .child(el(Tag::Thead).child(header))
            .child(el(Tag::Tbody).children(rows)),
    )
}

pub fn render_comparison(panel: &ComparisonPanel) -> Element {
    el(Tag::Section)
        .id("comparisonDisplayArea")
        .child(el(Tag::H2).text("Comparison"))
        .child(render_comparison_table(&panel.records))
}

pub fn render_tray(tray: &Tray) -> Element {
    el(Tag::Div)
        .id("comparisonTrayArea")
        .child(
            el(Tag::P)
                .text("Selected for comparison: ")
                .child(el(Tag::Span).id("comparisonCount").text(tray.count.as_str())),
        )
        .child(
            el(Tag::Ul)
                .id("comparisonSelectedList")
                .children(tray.members.iter().map(|m| el(Tag::Li).text(m.as_str()))),
        )
        .child(
            el(Tag::Button)
                .id("compareSelectedButton")
                .flag("disabled", !tray.compare_enabled)
                .text("Compare Selected"),
        )
        .child(el(Tag::Button).id("clearComparisonButton").text("Clear Selection"))
}

pub fn render_banner(banner: &Banner) -> Element {
    let class = match banner.severity {
        Severity::Error => "error",
        Severity::Minor => "error minor",
    };
    el(Tag::Div)
        .id("errorContainer")
        .class(class)
        .text(banner.message.as_str())
}

// ---------------------------------------------------------------------------
// Whole page
// ---------------------------------------------------------------------------

/// Assemble every visible panel. Hidden panels are omitted entirely.
pub fn render_page(page: &Page, selection: &SelectionSet) -> Element {
    let mut main = el(Tag::Main);
    if page.loading {
        main = main.child(el(Tag::Div).id("loadingIndicator").text(LOADING));
    }
    if let Some(banner) = &page.banner {
        main = main.child(render_banner(banner));
    }
    if let Some(status) = &page.filter_status {
        main = main.child(el(Tag::P).id("filterStatus").text(status.as_str()));
    }
    main = main.child(render_search_results(&page.results, selection));
    if page.tray.visible {
        main = main.child(render_tray(&page.tray));
    }
    if let Some(record) = &page.detail {
        main = main.child(render_detail(record));
    }
    if page.comparison.visible {
        main = main.child(render_comparison(&page.comparison));
    }
    main
}
