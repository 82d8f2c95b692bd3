//! Remote AI layer: per-provider enrichment clients and the comparison client.
//!
//! Both clients absorb every failure at their public boundary. Enrichment
//! always yields an [`EnrichmentResult`](rapport_core::EnrichmentResult) and
//! comparison yields `Option<ComparisonResult>`, so callers can fan out
//! without per-branch error handling.

mod compare;
mod config;
mod enrich;
mod error;
mod service;

pub use compare::ComparisonClient;
pub use config::{DEFAULT_TIMEOUT, ProviderConfig};
pub use enrich::EnrichmentClient;
pub use error::RemoteError;
pub use service::{Comparer, Enricher};
