//! Error taxonomy.
//!
//! [`ValidationError`] and [`SelectionError`] are raised locally and never
//! reach the network; [`QueryError`] is the uniform failure of every gateway
//! operation. Partial batch failures are not errors: they travel inside
//! [`ComparisonResult`](crate::types::ComparisonResult).

use crate::page::Severity;
use thiserror::Error;

/// A request that could not be answered: non-2xx status, transport failure,
/// or a body that did not decode.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct QueryError {
    pub message: String,
    /// HTTP status, when the server answered at all.
    pub status: Option<u16>,
}

impl QueryError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: None,
        }
    }

    pub fn with_status(message: impl Into<String>, status: u16) -> Self {
        Self {
            message: message.into(),
            status: Some(status),
        }
    }

    /// Build the error for a non-success response.
    ///
    /// The message is the `error` field of a JSON body when one is present,
    /// otherwise `HTTP error <status>`.
    pub fn from_response(status: u16, body: &[u8]) -> Self {
        let message = serde_json::from_slice::<serde_json::Value>(body)
            .ok()
            .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_owned))
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| format!("HTTP error {status}"));
        Self::with_status(message, status)
    }
}

/// Input rejected before any request is made.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter a microbe name to search.")]
    EmptySearchTerm,
    #[error("Please select at least two microbes to compare.")]
    TooFewSelections { selected: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("You can select a maximum of {capacity} microbes for comparison.")]
    CapacityExceeded { capacity: usize },
}

/// Any failure the controller can surface in the banner.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Selection(#[from] SelectionError),
    #[error(transparent)]
    Query(#[from] QueryError),
}

impl ClientError {
    /// Banner severity. A rejected selection leaves the panels alone.
    pub fn severity(&self) -> Severity {
        match self {
            Self::Selection(_) => Severity::Minor,
            Self::Validation(_) | Self::Query(_) => Severity::Error,
        }
    }
}
