//! Test builders: ergonomic constructors for detail records and search rows.
//!
//! These builders are designed for readability in test assertions, not for
//! production use.

use micrographia_core::DetailRecord;
use serde_json::{json, Map, Value};

// ---------------------------------------------------------------------------
// DetailRecordBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for detail payloads.
///
/// # Example
///
/// ```rust,ignore
/// let record = DetailRecordBuilder::new("1423", "Bacillus subtilis")
///     .rank("species")
///     .gram("Positive")
///     .lineage(&[("genus", "Bacillus")])
///     .build();
/// ```
pub struct DetailRecordBuilder {
    fields: Map<String, Value>,
}

impl DetailRecordBuilder {
    pub fn new(tax_id: &str, scientific_name: &str) -> Self {
        let mut fields = Map::new();
        fields.insert("tax_id".into(), json!(tax_id));
        fields.insert("scientific_name".into(), json!(scientific_name));
        Self { fields }
    }

    /// A record with only a `tax_id`, as a sparse server response.
    pub fn bare(tax_id: &str) -> Self {
        let mut fields = Map::new();
        fields.insert("tax_id".into(), json!(tax_id));
        Self { fields }
    }

    pub fn field(mut self, key: &str, value: Value) -> Self {
        self.fields.insert(key.to_string(), value);
        self
    }

    pub fn rank(self, rank: &str) -> Self {
        self.field("rank", json!(rank))
    }

    pub fn gram(self, gram: &str) -> Self {
        self.field("gram_stain_derived", json!(gram))
    }

    pub fn oxygen(self, oxygen: &str) -> Self {
        self.field("oxygen_requirement_derived", json!(oxygen))
    }

    pub fn genome_size(self, bp: u64) -> Self {
        self.field("primary_genome_size_bp", json!(bp))
    }

    pub fn isolation_source(self, source: &str) -> Self {
        self.field("primary_isolation_source", json!(source))
    }

    pub fn lineage(self, steps: &[(&str, &str)]) -> Self {
        let steps: Vec<Value> = steps
            .iter()
            .map(|(rank, name)| json!({"rank": rank, "scientific_name": name}))
            .collect();
        self.field("lineage", Value::Array(steps))
    }

    pub fn build_json(self) -> Value {
        Value::Object(self.fields)
    }

    pub fn build(self) -> DetailRecord {
        DetailRecord::from_value(Value::Object(self.fields)).expect("builder holds an object")
    }
}

/// A search row as the API returns it, tagged with a Gram stain for the fake
/// server's filter.
pub fn search_row(name: &str, tax_id: &str, gram: &str) -> Value {
    json!({"scientific_name": name, "tax_id": tax_id, "gram": gram})
}
