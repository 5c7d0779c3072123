//! micrographia: browse the microbial taxonomy API from the terminal.
//!
//! The binary runs the ratatui front end by default. Its subcommands run a
//! single interaction headlessly and print the resulting page as HTML, which
//! is also how the integration harnesses drive the whole stack.
//!
//! # Architecture
//!
//! ```text
//! micrographia-tui ─┐
//!                   ├──► micrographia-core (controller, renderer)
//! headless ─────────┘            │
//!                                ▼ TaxonomyApi
//!                      micrographia-gateway ──► HTTP
//! ```

pub mod headless;

pub use micrographia_core;
pub use micrographia_gateway;
