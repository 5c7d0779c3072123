//! micrographia-gateway: the remote query gateway.
//!
//! [`HttpGateway`] speaks to the taxonomy service over HTTP and implements
//! [`micrographia_core::TaxonomyApi`]. Every failure, whether transport,
//! status or decoding, comes back as a [`micrographia_core::QueryError`].

pub mod http;
pub mod wire;

pub use http::{GatewayError, HttpGateway};
