//! Advisory adapters - optional reason enrichment via an external
//! language-model service.

mod http_enricher;

pub use http_enricher::{HttpEnricherConfig, HttpReasonEnricher};
