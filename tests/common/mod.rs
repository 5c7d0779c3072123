//! Shared test utilities for micrographia integration harnesses.
//!
//! Import everything you need via `mod common; use common::*;` at the top of
//! each harness file.

pub mod assertions;
pub mod builders;
pub mod fake_taxonomy_api;
pub mod fixtures;

pub use assertions::*;
pub use builders::*;
pub use fake_taxonomy_api::FakeTaxonomyApi;
pub use fixtures::*;
