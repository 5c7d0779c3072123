//! Core types for micrographia-core.
//!
//! This module defines the data that flows between the gateway, the renderer
//! and the controller: search hits, comparison candidates, the Gram filter,
//! and the opaque [`DetailRecord`] returned by the detail endpoints.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::str::FromStr;

// ---------------------------------------------------------------------------
// Search results and candidates
// ---------------------------------------------------------------------------

/// One row of a name search, as returned by `/api/microbe/search`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    #[serde(default = "not_available")]
    pub scientific_name: String,
    /// NCBI taxonomy identifier. Accepted as a JSON string or number.
    #[serde(deserialize_with = "string_or_number")]
    pub tax_id: String,
}

impl SearchResult {
    pub fn new(scientific_name: impl Into<String>, tax_id: impl Into<String>) -> Self {
        Self {
            scientific_name: scientific_name.into(),
            tax_id: tax_id.into(),
        }
    }
}

/// An organism marked for comparison.
///
/// Identity is the taxonomy identifier alone; two candidates with the same
/// `tax_id` but different names are equal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candidate {
    pub tax_id: String,
    pub name: String,
}

impl Candidate {
    pub fn new(tax_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            tax_id: tax_id.into(),
            name: name.into(),
        }
    }
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.tax_id == other.tax_id
    }
}

impl Eq for Candidate {}

impl From<&SearchResult> for Candidate {
    fn from(result: &SearchResult) -> Self {
        Candidate::new(result.tax_id.clone(), result.scientific_name.clone())
    }
}

// ---------------------------------------------------------------------------
// Gram filter
// ---------------------------------------------------------------------------

/// Server-side Gram stain filter applied to a name search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GramFilter {
    #[default]
    Any,
    Positive,
    Negative,
}

impl GramFilter {
    /// Value for the `gram_filter` query parameter; `None` means the
    /// parameter is omitted.
    pub fn query_value(self) -> Option<&'static str> {
        match self {
            GramFilter::Any => None,
            GramFilter::Positive => Some("positive"),
            GramFilter::Negative => Some("negative"),
        }
    }

    /// Human-readable label, as shown next to the filter selector.
    pub fn label(self) -> &'static str {
        match self {
            GramFilter::Any => "Any",
            GramFilter::Positive => "Gram-positive",
            GramFilter::Negative => "Gram-negative",
        }
    }

    /// Cycle any → positive → negative → any.
    pub fn next(self) -> Self {
        match self {
            GramFilter::Any => GramFilter::Positive,
            GramFilter::Positive => GramFilter::Negative,
            GramFilter::Negative => GramFilter::Any,
        }
    }
}

impl std::fmt::Display for GramFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GramFilter::Any => write!(f, "any"),
            GramFilter::Positive => write!(f, "positive"),
            GramFilter::Negative => write!(f, "negative"),
        }
    }
}

impl FromStr for GramFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "any" => Ok(GramFilter::Any),
            "positive" | "gram-positive" | "+" => Ok(GramFilter::Positive),
            "negative" | "gram-negative" | "-" => Ok(GramFilter::Negative),
            other => Err(format!("unknown gram filter: {other} (expected any|positive|negative)")),
        }
    }
}

// ---------------------------------------------------------------------------
// Detail record
// ---------------------------------------------------------------------------

/// Field names of the detail payload.
pub mod keys {
    pub const SCIENTIFIC_NAME: &str = "scientific_name";
    pub const RANK: &str = "rank";
    pub const TAX_ID: &str = "tax_id";
    pub const LINEAGE: &str = "lineage";
    pub const GRAM_STAIN: &str = "gram_stain_derived";
    pub const OXYGEN_REQUIREMENT: &str = "oxygen_requirement_derived";
    pub const CELL_SHAPE: &str = "cell_shape";
    pub const GC_CONTENT: &str = "gc_content";
    pub const DESCRIPTION: &str = "description";
    pub const IMAGE_URL: &str = "image_url";
    pub const GENOME_INFO: &str = "genome_info";
    pub const BIOSAMPLE_INFO: &str = "biosample_info";
    pub const EXTERNAL_LINKS: &str = "external_links";
    pub const PRIMARY_GENOME_SIZE: &str = "primary_genome_size_bp";
    pub const PRIMARY_ISOLATION_SOURCE: &str = "primary_isolation_source";
}

/// A single organism's detail record.
///
/// The record is kept as the raw JSON object the API returned. The client
/// never validates or rewrites it; the accessors below read fields leniently
/// and report anything missing, `null` or empty as `None`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DetailRecord(Map<String, Value>);

/// One step of the taxonomic lineage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineageStep {
    pub rank: Option<String>,
    pub scientific_name: Option<String>,
}

/// A linked nucleotide (nuccore) record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenomeRecord {
    pub nuccore_id: Option<String>,
    pub title: Option<String>,
    pub sequence_length: Option<String>,
    pub molecule_type: Option<String>,
}

/// A linked BioSample record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BiosampleRecord {
    pub accession: Option<String>,
    pub title: Option<String>,
    pub attributes: Vec<BiosampleAttribute>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BiosampleAttribute {
    pub name: String,
    pub value: Option<String>,
}

impl DetailRecord {
    /// Wrap a JSON value. Returns `None` unless the value is an object.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self(map)),
            _ => None,
        }
    }

    /// Raw access to any field.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Scalar field rendered as text. Strings, numbers and booleans are
    /// accepted; `null`, empty strings, arrays and objects yield `None`.
    pub fn text(&self, key: &str) -> Option<String> {
        self.0.get(key).and_then(scalar_text)
    }

    pub fn scientific_name(&self) -> Option<String> {
        self.text(keys::SCIENTIFIC_NAME)
    }

    pub fn tax_id(&self) -> Option<String> {
        self.text(keys::TAX_ID)
    }

    pub fn rank(&self) -> Option<String> {
        self.text(keys::RANK)
    }

    pub fn gram_stain(&self) -> Option<String> {
        self.text(keys::GRAM_STAIN)
    }

    pub fn oxygen_requirement(&self) -> Option<String> {
        self.text(keys::OXYGEN_REQUIREMENT)
    }

    pub fn cell_shape(&self) -> Option<String> {
        self.text(keys::CELL_SHAPE)
    }

    pub fn gc_content(&self) -> Option<String> {
        self.text(keys::GC_CONTENT)
    }

    pub fn description(&self) -> Option<String> {
        self.text(keys::DESCRIPTION)
    }

    pub fn image_url(&self) -> Option<String> {
        self.text(keys::IMAGE_URL)
    }

    pub fn ncbi_taxonomy_link(&self) -> Option<String> {
        self.0
            .get(keys::EXTERNAL_LINKS)
            .and_then(|links| links.get("ncbi_taxonomy"))
            .and_then(scalar_text)
    }

    pub fn lineage(&self) -> Vec<LineageStep> {
        self.objects(keys::LINEAGE)
            .map(|step| LineageStep {
                rank: field_text(step, "rank"),
                scientific_name: field_text(step, "scientific_name"),
            })
            .collect()
    }

    pub fn genome_records(&self) -> Vec<GenomeRecord> {
        self.objects(keys::GENOME_INFO)
            .map(|rec| GenomeRecord {
                nuccore_id: field_text(rec, "nuccore_id"),
                title: field_text(rec, "title"),
                sequence_length: field_text(rec, "sequence_length"),
                molecule_type: field_text(rec, "molecule_type"),
            })
            .collect()
    }

    pub fn biosamples(&self) -> Vec<BiosampleRecord> {
        self.objects(keys::BIOSAMPLE_INFO)
            .map(|rec| BiosampleRecord {
                accession: field_text(rec, "accession"),
                title: field_text(rec, "title"),
                attributes: rec
                    .get("attributes")
                    .and_then(Value::as_array)
                    .map(|attrs| {
                        attrs
                            .iter()
                            .filter(|a| a.is_object())
                            .map(|a| BiosampleAttribute {
                                name: field_text(a, "name").unwrap_or_default(),
                                value: field_text(a, "value"),
                            })
                            .collect()
                    })
                    .unwrap_or_default(),
            })
            .collect()
    }

    /// Object elements of an array field; non-objects are skipped.
    fn objects<'a>(&'a self, key: &str) -> impl Iterator<Item = &'a Value> + 'a {
        self.0
            .get(key)
            .and_then(Value::as_array)
            .into_iter()
            .flatten()
            .filter(|v| v.is_object())
    }
}

fn field_text(obj: &Value, key: &str) -> Option<String> {
    obj.get(key).and_then(scalar_text)
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Comparison result
// ---------------------------------------------------------------------------

/// Outcome of a batch detail request that reached the server.
///
/// `successes` are in the order the server returned them; `failures` maps
/// each unresolved identifier to the server's message.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ComparisonResult {
    pub successes: Vec<DetailRecord>,
    pub failures: BTreeMap<String, String>,
}

impl ComparisonResult {
    pub fn is_partial(&self) -> bool {
        !self.failures.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Serde helpers
// ---------------------------------------------------------------------------

fn not_available() -> String {
    "N/A".to_string()
}

/// Accept either `"1423"` or `1423` for identifier fields.
pub fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number identifier, got {other}"
        ))),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn record(value: Value) -> DetailRecord {
        DetailRecord::from_value(value).unwrap()
    }

    #[test]
    fn candidate_equality_is_by_tax_id() {
        assert_eq!(Candidate::new("1423", "Bacillus subtilis"), Candidate::new("1423", "B. subtilis"));
        assert_ne!(Candidate::new("1423", "x"), Candidate::new("1390", "x"));
    }

    #[test]
    fn search_result_accepts_numeric_tax_id() {
        let parsed: Vec<SearchResult> =
            serde_json::from_value(json!([{"scientific_name": "E. coli", "tax_id": 562}])).unwrap();
        assert_eq!(parsed, vec![SearchResult::new("E. coli", "562")]);
    }

    #[test]
    fn search_result_missing_name_defaults_to_na() {
        let parsed: SearchResult = serde_json::from_value(json!({"tax_id": "1"})).unwrap();
        assert_eq!(parsed.scientific_name, "N/A");
    }

    #[test]
    fn empty_and_null_fields_read_as_none() {
        let rec = record(json!({"rank": "", "gram_stain_derived": null, "gc_content": 43.5}));
        assert_eq!(rec.rank(), None);
        assert_eq!(rec.gram_stain(), None);
        assert_eq!(rec.gc_content().as_deref(), Some("43.5"));
        assert_eq!(rec.scientific_name(), None);
    }

    #[test]
    fn nested_records_are_read_leniently() {
        let rec = record(json!({
            "lineage": [{"rank": "genus", "scientific_name": "Bacillus"}, "junk"],
            "genome_info": [{"nuccore_id": "NC_000964", "sequence_length": 4215606}],
            "biosample_info": [{"accession": "SAMN1", "attributes": [{"name": "host", "value": null}]}]
        }));
        assert_eq!(
            rec.lineage(),
            vec![LineageStep {
                rank: Some("genus".into()),
                scientific_name: Some("Bacillus".into())
            }]
        );
        let genomes = rec.genome_records();
        assert_eq!(genomes[0].sequence_length.as_deref(), Some("4215606"));
        assert_eq!(genomes[0].title, None);
        let samples = rec.biosamples();
        assert_eq!(samples[0].attributes[0].name, "host");
        assert_eq!(samples[0].attributes[0].value, None);
    }

    #[test]
    fn gram_filter_round_trips_through_str() {
        for f in [GramFilter::Any, GramFilter::Positive, GramFilter::Negative] {
            assert_eq!(f.to_string().parse::<GramFilter>(), Ok(f));
        }
        assert!("sideways".parse::<GramFilter>().is_err());
        assert_eq!(GramFilter::Any.query_value(), None);
        assert_eq!(GramFilter::Negative.next(), GramFilter::Any);
    }
}
