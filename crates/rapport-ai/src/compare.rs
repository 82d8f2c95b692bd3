//! Comparison client: asks the scoring function to judge both payloads.

use async_trait::async_trait;
use rapport_core::{ComparisonResult, EnrichmentPayload};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use crate::config::ProviderConfig;
use crate::error::RemoteError;
use crate::service::Comparer;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CompareRequest<'a> {
    provider_a_response: &'a EnrichmentPayload,
    provider_b_response: &'a EnrichmentPayload,
    entity_name: &'a str,
}

#[derive(Deserialize)]
struct CompareResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    comparison: Option<Value>,
    #[serde(default)]
    error: Option<String>,
}

/// HTTP client for the comparison function.
///
/// Only `{success: true, comparison: {...}}` counts as a result; every other
/// outcome is logged and reported as `None`.
pub struct ComparisonClient {
    client: reqwest::Client,
    config: ProviderConfig,
}

impl ComparisonClient {
    pub fn new(config: ProviderConfig) -> Result<Self, RemoteError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("rapport/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client, config })
    }

    pub async fn compare(
        &self,
        a: &EnrichmentPayload,
        b: &EnrichmentPayload,
        entity_name: &str,
    ) -> Option<ComparisonResult> {
        let call = self.try_compare(a, b, entity_name);
        let outcome = match tokio::time::timeout(self.config.timeout, call).await {
            Ok(outcome) => outcome,
            Err(_) => Err(RemoteError::Timeout(self.config.timeout)),
        };
        match outcome {
            Ok(comparison) => {
                info!(
                    recommended = %comparison.recommended_provider,
                    score_a = comparison.score.a,
                    score_b = comparison.score.b,
                    "comparison complete"
                );
                Some(comparison)
            }
            Err(e) => {
                warn!(error = %e, entity = entity_name, "comparison unavailable");
                None
            }
        }
    }

    async fn try_compare(
        &self,
        a: &EnrichmentPayload,
        b: &EnrichmentPayload,
        entity_name: &str,
    ) -> Result<ComparisonResult, RemoteError> {
        let body = CompareRequest {
            provider_a_response: a,
            provider_b_response: b,
            entity_name,
        };
        info!(url = %self.config.endpoint, entity = entity_name, "requesting comparison");
        let resp = self
            .client
            .post(&self.config.endpoint)
            .bearer_auth(&self.config.token)
            .json(&body)
            .send()
            .await?;
        let status = resp.status();
        let text = resp.text().await?;
        if !status.is_success() {
            return Err(RemoteError::from_status(status.as_u16(), &text));
        }

        let parsed: CompareResponse = serde_json::from_str(&text)?;
        if !parsed.success {
            let reason = parsed
                .error
                .unwrap_or_else(|| "success flag not set".to_string());
            return Err(RemoteError::Rejected(reason));
        }
        let raw = parsed
            .comparison
            .filter(|c| !c.is_null())
            .ok_or(RemoteError::MissingData)?;
        Ok(serde_json::from_value(raw)?)
    }
}

#[async_trait]
impl Comparer for ComparisonClient {
    async fn compare(
        &self,
        a: &EnrichmentPayload,
        b: &EnrichmentPayload,
        entity_name: &str,
    ) -> Option<ComparisonResult> {
        ComparisonClient::compare(self, a, b, entity_name).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use rapport_core::{ClientPayload, PerProvider, Provider};
    use serde_json::json;
    use std::time::Duration;

    const PATH: &str = "/functions/v1/compare-ai-responses";

    fn payload(company: &str) -> EnrichmentPayload {
        EnrichmentPayload::Client(ClientPayload {
            company: Some(company.into()),
            ..Default::default()
        })
    }

    fn client_for(url: &str) -> ComparisonClient {
        ComparisonClient::new(
            ProviderConfig::new(url, "test-token").with_timeout(Duration::from_millis(500)),
        )
        .unwrap()
    }

    async fn compare_acme(url: &str) -> Option<ComparisonResult> {
        client_for(url)
            .compare(&payload("Acme Corp"), &payload("Acme Inc"), "Acme")
            .await
    }

    #[tokio::test]
    async fn success_decodes_comparison_and_sends_both_payloads() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path(PATH)
                    .header("authorization", "Bearer test-token")
                    .json_body(json!({
                        "providerAResponse": {"company": "Acme Corp"},
                        "providerBResponse": {"company": "Acme Inc"},
                        "entityName": "Acme"
                    }));
                then.status(200).json_body(json!({
                    "success": true,
                    "comparison": {
                        "recommendedProvider": "A",
                        "score": {"A": 82, "B": 75},
                        "reasoning": "A found more services",
                        "strengths": {"A": ["services"], "B": ["contacts"]},
                        "weaknesses": {"A": [], "B": ["no blogs"]},
                        "completeness": {"A": 70, "B": 64}
                    }
                }));
            })
            .await;

        let cmp = compare_acme(&server.url(PATH)).await.unwrap();

        mock.assert_async().await;
        assert_eq!(cmp.recommended_provider, Provider::A);
        assert_eq!(cmp.score, PerProvider::new(82, 75));
        assert_eq!(cmp.weaknesses.b, vec!["no blogs".to_string()]);
    }

    #[tokio::test]
    async fn any_other_shape_is_absent() {
        let replies: Vec<(u16, String)> = vec![
            (200, json!({"success": false, "error": "OpenAI API error"}).to_string()),
            (200, json!({"success": true}).to_string()),
            (200, json!({"success": true, "comparison": null}).to_string()),
            (
                200,
                json!({"comparison": {"recommendedProvider": "A", "score": {"A": 1, "B": 2}}})
                    .to_string(),
            ),
            (
                200,
                json!({"success": true, "comparison": {"reasoning": "no verdict"}}).to_string(),
            ),
            (500, json!({"success": false, "error": "Internal server error"}).to_string()),
            (200, "{truncated".into()),
        ];
        for (status, body) in replies {
            let server = MockServer::start_async().await;
            server
                .mock_async(|when, then| {
                    when.method(POST).path(PATH);
                    then.status(status)
                        .header("content-type", "application/json")
                        .body(body.clone());
                })
                .await;
            assert!(compare_acme(&server.url(PATH)).await.is_none(), "{status} {body}");
        }
    }

    #[tokio::test]
    async fn unreachable_service_is_absent() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        assert!(compare_acme(&format!("http://{addr}{PATH}")).await.is_none());
    }

    #[tokio::test]
    async fn slow_comparison_is_absent() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path(PATH);
                then.status(200)
                    .json_body(json!({"success": true}))
                    .delay(Duration::from_secs(5));
            })
            .await;
        assert!(compare_acme(&server.url(PATH)).await.is_none());
    }
}
