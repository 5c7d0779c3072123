//! Canned organisms shared across harnesses.

use super::builders::{search_row, DetailRecordBuilder};
use serde_json::Value;

pub const BACILLUS_SUBTILIS: (&str, &str) = ("1423", "Bacillus subtilis");
pub const BACILLUS_CEREUS: (&str, &str) = ("1396", "Bacillus cereus");
pub const ECOLI: (&str, &str) = ("562", "Escherichia coli");
pub const STAPH_AUREUS: (&str, &str) = ("1280", "Staphylococcus aureus");

/// Rows for a "Bacillus" search; one of them Gram-negative so filters bite.
pub fn bacillus_rows() -> Vec<Value> {
    vec![
        search_row(BACILLUS_SUBTILIS.1, BACILLUS_SUBTILIS.0, "positive"),
        search_row(BACILLUS_CEREUS.1, BACILLUS_CEREUS.0, "positive"),
        search_row("Bacillus oddity", "99999", "negative"),
    ]
}

pub fn bacillus_subtilis() -> DetailRecordBuilder {
    DetailRecordBuilder::new(BACILLUS_SUBTILIS.0, BACILLUS_SUBTILIS.1)
        .rank("species")
        .gram("Positive")
        .oxygen("Aerobe")
        .genome_size(4_215_606)
        .isolation_source("soil")
        .lineage(&[("phylum", "Bacillota"), ("genus", "Bacillus")])
}

pub fn escherichia_coli() -> DetailRecordBuilder {
    DetailRecordBuilder::new(ECOLI.0, ECOLI.1)
        .rank("species")
        .gram("Negative")
        .oxygen("Facultative anaerobe")
        .genome_size(4_641_652)
        .isolation_source("human gut")
}

pub fn staph_aureus() -> DetailRecordBuilder {
    DetailRecordBuilder::new(STAPH_AUREUS.0, STAPH_AUREUS.1)
        .rank("species")
        .gram("Positive")
}
