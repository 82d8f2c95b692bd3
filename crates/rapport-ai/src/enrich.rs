//! Per-provider enrichment client.

use std::time::Instant;

use async_trait::async_trait;
use rapport_core::{
    EnrichmentPayload, EnrichmentRequest, EnrichmentResult, EntityKind, Provider, completeness,
};
use serde::Deserialize;
use serde_json::Value;
use tracing::{info, warn};

use crate::config::ProviderConfig;
use crate::error::RemoteError;
use crate::service::Enricher;

const USER_AGENT: &str = concat!("rapport/", env!("CARGO_PKG_VERSION"));

/// HTTP client for one provider's enrichment function.
///
/// Sends `{entityName, websiteUrl, profileUrl}` and expects
/// `{data, metadata: {completenessScore, processingTime, timestamp}}` back.
pub struct EnrichmentClient {
    client: reqwest::Client,
    provider: Provider,
    kind: EntityKind,
    config: ProviderConfig,
}

#[derive(Deserialize)]
struct EnrichResponse {
    #[serde(default)]
    data: Option<Value>,
    /// Loose: malformed metadata falls back to local values.
    #[serde(default)]
    metadata: Option<Value>,
}

/// A decoded success, before it is wrapped in the envelope.
struct Enriched {
    payload: EnrichmentPayload,
    completeness: Option<u8>,
    processing_time_ms: Option<u64>,
}

impl EnrichmentClient {
    pub fn new(
        provider: Provider,
        kind: EntityKind,
        config: ProviderConfig,
    ) -> Result<Self, RemoteError> {
        let client = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self {
            client,
            provider,
            kind,
            config,
        })
    }

    pub fn provider(&self) -> Provider {
        self.provider
    }

    /// Run one enrichment call. Never fails; see [`Enricher`].
    pub async fn enrich(&self, request: &EnrichmentRequest) -> EnrichmentResult {
        let start = Instant::now();
        let timeout = self.config.timeout;
        let outcome = match tokio::time::timeout(timeout, self.try_enrich(request)).await {
            Ok(outcome) => outcome,
            Err(_) => Err(RemoteError::Timeout(timeout)),
        };
        let elapsed_ms = start.elapsed().as_millis() as u64;

        match outcome {
            Ok(enriched) => {
                let score = enriched
                    .completeness
                    .unwrap_or_else(|| completeness(&enriched.payload));
                info!(
                    provider = %self.provider,
                    completeness = score,
                    elapsed_ms,
                    "enrichment complete"
                );
                EnrichmentResult::success(
                    self.provider,
                    enriched.payload,
                    score,
                    enriched.processing_time_ms.unwrap_or(elapsed_ms),
                )
            }
            Err(e) => {
                warn!(provider = %self.provider, error = %e, elapsed_ms, "enrichment failed");
                EnrichmentResult::failure(self.provider, format!("{}: {e}", self.provider))
            }
        }
    }

    async fn try_enrich(&self, request: &EnrichmentRequest) -> Result<Enriched, RemoteError> {
        info!(
            provider = %self.provider,
            url = %self.config.endpoint,
            entity = %request.entity_name,
            "requesting enrichment"
        );
        let resp = self
            .client
            .post(&self.config.endpoint)
            .bearer_auth(&self.config.token)
            .json(request)
            .send()
            .await?;
        let status = resp.status();
        let body = resp.text().await?;
        if !status.is_success() {
            return Err(RemoteError::from_status(status.as_u16(), &body));
        }

        let parsed: EnrichResponse = serde_json::from_str(&body)?;
        let data = parsed
            .data
            .filter(|d| !d.is_null())
            .ok_or(RemoteError::MissingData)?;
        let payload = EnrichmentPayload::from_value(self.kind, data)?;
        let metadata = parsed.metadata.unwrap_or(Value::Null);
        Ok(Enriched {
            payload,
            completeness: metadata
                .get("completenessScore")
                .and_then(Value::as_f64)
                .map(|s| s.round().clamp(0.0, 100.0) as u8),
            processing_time_ms: metadata
                .get("processingTime")
                .and_then(Value::as_f64)
                .filter(|t| *t >= 0.0)
                .map(|t| t.round() as u64),
        })
    }
}

#[async_trait]
impl Enricher for EnrichmentClient {
    fn provider(&self) -> Provider {
        self.provider
    }

    async fn enrich(&self, request: &EnrichmentRequest) -> EnrichmentResult {
        EnrichmentClient::enrich(self, request).await
    }
}
