//! micrographia-core: the taxonomy explorer's state and rendering.
//!
//! Everything in this crate is free of I/O. Front ends feed user actions to
//! the [`Controller`], run the [`Request`]s it hands back through a
//! [`TaxonomyApi`] implementation, and paint the [`view`] tree it renders.
//!
//! # Architecture
//!
//! ```text
//! Action ──► Controller ──► Request ──► TaxonomyApi
//!               ▲    │                      │
//!               │    └──► Page + Selection  │
//!               └────────── Outcome ◄───────┘
//!                            │
//!                 render ──► view::Element
//! ```

pub mod api;
pub mod config;
pub mod controller;
pub mod error;
pub mod page;
pub mod render;
pub mod selection;
pub mod types;
pub mod view;

pub use api::TaxonomyApi;
pub use controller::{execute, Action, Controller, Outcome, Request};
pub use error::{ClientError, QueryError, SelectionError, ValidationError};
pub use page::{sync_view, Page, Severity};
pub use selection::{SelectionSet, MAX_COMPARE_ITEMS, MIN_COMPARE_ITEMS};
pub use types::{Candidate, ComparisonResult, DetailRecord, GramFilter, SearchResult};
