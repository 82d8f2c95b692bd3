//! Collaborator seams the reconciliation controller is written against.

use async_trait::async_trait;
use rapport_core::{
    ComparisonResult, EnrichmentPayload, EnrichmentRequest, EnrichmentResult, Provider,
};

/// One provider's enrichment service. Never fails: every error comes back
/// as [`EnrichmentResult::failure`].
#[async_trait]
pub trait Enricher: Send + Sync {
    fn provider(&self) -> Provider;

    async fn enrich(&self, request: &EnrichmentRequest) -> EnrichmentResult;
}

/// The scoring service. `None` means no comparison is available.
#[async_trait]
pub trait Comparer: Send + Sync {
    async fn compare(
        &self,
        a: &EnrichmentPayload,
        b: &EnrichmentPayload,
        entity_name: &str,
    ) -> Option<ComparisonResult>;
}
