//! Request and response bodies as they appear on the wire.

use micrographia_core::{ComparisonResult, DetailRecord, SearchResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Body of `POST /api/microbes/details`.
#[derive(Debug, Serialize)]
pub struct BatchRequest<'a> {
    pub tax_ids: &'a [String],
}

/// Search responses are a bare array; `null` means no matches.
#[derive(Debug, Deserialize)]
#[serde(transparent)]
pub struct SearchResponse(pub Option<Vec<SearchResult>>);

impl SearchResponse {
    pub fn into_results(self) -> Vec<SearchResult> {
        self.0.unwrap_or_default()
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct BatchResponse {
    #[serde(default)]
    pub results: Option<Vec<Value>>,
    #[serde(default)]
    pub errors: Option<BTreeMap<String, Value>>,
}

impl BatchResponse {
    /// Non-object entries in `results` are dropped. Error values that are not
    /// strings are kept in their JSON form.
    pub fn into_comparison(self) -> ComparisonResult {
        let successes = self
            .results
            .unwrap_or_default()
            .into_iter()
            .filter_map(DetailRecord::from_value)
            .collect();
        let failures = self
            .errors
            .unwrap_or_default()
            .into_iter()
            .map(|(id, err)| {
                let message = match err {
                    Value::String(s) => s,
                    other => other.to_string(),
                };
                (id, message)
            })
            .collect();
        ComparisonResult { successes, failures }
    }
}
