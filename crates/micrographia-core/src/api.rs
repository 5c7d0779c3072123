//! The taxonomy API as seen by the controller.
//!
//! Implemented over HTTP by `micrographia-gateway`; tests substitute
//! in-memory fakes. Every operation is a single attempt: no retry, no
//! caching, no timeout beyond the transport's default.

use crate::error::QueryError;
use crate::types::{ComparisonResult, DetailRecord, GramFilter, SearchResult};
use std::future::Future;

pub trait TaxonomyApi: Send + Sync {
    /// Name search. An empty list is a successful "no matches".
    fn search(
        &self,
        term: &str,
        filter: GramFilter,
    ) -> impl Future<Output = Result<Vec<SearchResult>, QueryError>> + Send;

    fn fetch_detail(
        &self,
        tax_id: &str,
    ) -> impl Future<Output = Result<DetailRecord, QueryError>> + Send;

    /// One request for several organisms. Identifiers the server could not
    /// resolve come back in [`ComparisonResult::failures`], not as an error.
    fn fetch_batch_detail(
        &self,
        tax_ids: &[String],
    ) -> impl Future<Output = Result<ComparisonResult, QueryError>> + Send;
}
