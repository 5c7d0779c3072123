//! HTTP implementation of the taxonomy API.

use crate::wire::{BatchRequest, BatchResponse, SearchResponse};
use micrographia_core::{
    ComparisonResult, DetailRecord, GramFilter, QueryError, SearchResult, TaxonomyApi,
};
use reqwest::Client;
use serde::de::DeserializeOwned;
use thiserror::Error;
use url::Url;

const SEARCH_PATH: &str = "/api/microbe/search";
const DETAIL_PATH: &str = "/api/microbe/detail";
const BATCH_PATH: &str = "/api/microbes/details";

/// Failure to construct a gateway. Query failures are [`QueryError`]s.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("invalid base URL {url:?}: {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("base URL {0:?} cannot carry a path")]
    OpaqueBaseUrl(String),
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: Client,
    base: Url,
}

impl HttpGateway {
    pub fn new(base_url: &str) -> Result<Self, GatewayError> {
        Self::with_user_agent(base_url, concat!("micrographia/", env!("CARGO_PKG_VERSION")))
    }

    pub fn with_user_agent(base_url: &str, user_agent: &str) -> Result<Self, GatewayError> {
        let base = Url::parse(base_url).map_err(|source| GatewayError::InvalidBaseUrl {
            url: base_url.to_string(),
            source,
        })?;
        if base.cannot_be_a_base() {
            return Err(GatewayError::OpaqueBaseUrl(base_url.to_string()));
        }
        let client = Client::builder().user_agent(user_agent).build()?;
        Ok(Self { client, base })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Join `path` onto the base URL, keeping any path prefix the base has.
    fn endpoint(&self, path: &str) -> Url {
        let mut url = self.base.clone();
        let joined = format!("{}{}", self.base.path().trim_end_matches('/'), path);
        url.set_path(&joined);
        url.set_query(None);
        url
    }

    pub fn search_url(&self, term: &str, filter: GramFilter) -> Url {
        let mut url = self.endpoint(SEARCH_PATH);
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("name", term);
            if let Some(value) = filter.query_value() {
                pairs.append_pair("gram_filter", value);
            }
        }
        url
    }

    pub fn detail_url(&self, tax_id: &str) -> Url {
        let mut url = self.endpoint(DETAIL_PATH);
        url.query_pairs_mut().append_pair("tax_id", tax_id);
        url
    }

    pub fn batch_url(&self) -> Url {
        self.endpoint(BATCH_PATH)
    }

    /// Send a request and decode a successful body as JSON.
    async fn send_json<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, QueryError> {
        let response = request.send().await.map_err(transport_error)?;
        let status = response.status();
        let body = response.bytes().await.map_err(transport_error)?;

        if !status.is_success() {
            let err = QueryError::from_response(status.as_u16(), &body);
            tracing::warn!(status = status.as_u16(), error = %err, "gateway: non-success status");
            return Err(err);
        }

        serde_json::from_slice(&body).map_err(|e| {
            tracing::warn!(error = %e, "gateway: undecodable body");
            QueryError::with_status(format!("invalid response: {e}"), status.as_u16())
        })
    }
}

fn transport_error(e: reqwest::Error) -> QueryError {
    tracing::warn!(error = %e, "gateway: transport failure");
    match e.status() {
        Some(status) => QueryError::with_status(e.to_string(), status.as_u16()),
        None => QueryError::new(e.to_string()),
    }
}

impl TaxonomyApi for HttpGateway {
    async fn search(&self, term: &str, filter: GramFilter) -> Result<Vec<SearchResult>, QueryError> {
        let url = self.search_url(term, filter);
        tracing::debug!(%url, "gateway: search");
        let response: SearchResponse = self.send_json(self.client.get(url)).await?;
        Ok(response.into_results())
    }

    async fn fetch_detail(&self, tax_id: &str) -> Result<DetailRecord, QueryError> {
        let url = self.detail_url(tax_id);
        tracing::debug!(%url, "gateway: detail");
        let value: serde_json::Value = self.send_json(self.client.get(url)).await?;
        DetailRecord::from_value(value)
            .ok_or_else(|| QueryError::new("invalid response: expected a JSON object"))
    }

    async fn fetch_batch_detail(&self, tax_ids: &[String]) -> Result<ComparisonResult, QueryError> {
        let url = self.batch_url();
        tracing::debug!(%url, count = tax_ids.len(), "gateway: batch detail");
        let request = self.client.post(url).json(&BatchRequest { tax_ids });
        let response: BatchResponse = self.send_json(request).await?;
        Ok(response.into_comparison())
    }
}
