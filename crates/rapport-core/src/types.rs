//! Provider identity, enrichment inputs, and the per-provider result envelope.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::payload::EnrichmentPayload;

/// One of the two interchangeable remote enrichment services.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Provider {
    #[serde(alias = "a")]
    A,
    #[serde(alias = "b")]
    B,
}

impl Provider {
    pub const BOTH: [Provider; 2] = [Provider::A, Provider::B];

    pub fn other(self) -> Self {
        match self {
            Self::A => Self::B,
            Self::B => Self::A,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::A => "Provider A",
            Self::B => "Provider B",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for Provider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "a" | "provider-a" => Ok(Self::A),
            "b" | "provider-b" => Ok(Self::B),
            other => Err(format!("unknown provider '{other}' (expected 'a' or 'b')")),
        }
    }
}

/// Which kind of entity is being enriched.
///
/// Clients are customers added to the CRM; the company profile is the user's
/// own organisation, captured during onboarding. The payload shapes differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    #[default]
    Client,
    Company,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Client => "client",
            Self::Company => "company",
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RequestError {
    #[error("{0} is required")]
    MissingField(&'static str),
}

/// Inputs sent identically to both providers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichmentRequest {
    pub entity_name: String,
    pub website_url: String,
    pub profile_url: String,
}

impl EnrichmentRequest {
    pub fn new(
        entity_name: impl Into<String>,
        website_url: impl Into<String>,
        profile_url: impl Into<String>,
    ) -> Self {
        Self {
            entity_name: entity_name.into(),
            website_url: website_url.into(),
            profile_url: profile_url.into(),
        }
    }

    /// Check that all three inputs are non-blank, naming the first that isn't.
    pub fn validate(&self) -> Result<(), RequestError> {
        let fields = [
            ("entityName", &self.entity_name),
            ("websiteUrl", &self.website_url),
            ("profileUrl", &self.profile_url),
        ];
        for (name, value) in fields {
            if value.trim().is_empty() {
                return Err(RequestError::MissingField(name));
            }
        }
        Ok(())
    }

    pub fn is_complete(&self) -> bool {
        self.validate().is_ok()
    }
}

/// Outcome of one provider's enrichment attempt.
///
/// Exactly one of [`payload`](Self::payload) and
/// [`error_message`](Self::error_message) is present; the two constructors are
/// the only way to build one.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichmentResult {
    provider: Provider,
    #[serde(skip_serializing_if = "Option::is_none")]
    payload: Option<EnrichmentPayload>,
    completeness_score: u8,
    processing_time_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    error_message: Option<String>,
}

impl EnrichmentResult {
    pub fn success(
        provider: Provider,
        payload: EnrichmentPayload,
        completeness_score: u8,
        processing_time_ms: u64,
    ) -> Self {
        Self {
            provider,
            payload: Some(payload),
            completeness_score: completeness_score.min(100),
            processing_time_ms,
            error_message: None,
        }
    }

    /// A failed attempt. Score and time are zeroed; a blank message is
    /// replaced so the error is never empty.
    pub fn failure(provider: Provider, message: impl Into<String>) -> Self {
        let mut message = message.into();
        if message.trim().is_empty() {
            message = format!("{provider} request failed");
        }
        Self {
            provider,
            payload: None,
            completeness_score: 0,
            processing_time_ms: 0,
            error_message: Some(message),
        }
    }

    pub fn provider(&self) -> Provider {
        self.provider
    }

    pub fn payload(&self) -> Option<&EnrichmentPayload> {
        self.payload.as_ref()
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn completeness_score(&self) -> u8 {
        self.completeness_score
    }

    pub fn processing_time_ms(&self) -> u64 {
        self.processing_time_ms
    }

    pub fn is_success(&self) -> bool {
        self.payload.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payload::ClientPayload;

    #[test]
    fn provider_other_and_parse() {
        assert_eq!(Provider::A.other(), Provider::B);
        assert_eq!("b".parse::<Provider>(), Ok(Provider::B));
        assert_eq!(" A ".parse::<Provider>(), Ok(Provider::A));
        assert!("c".parse::<Provider>().is_err());
    }

    #[test]
    fn provider_serde_accepts_lowercase() {
        let p: Provider = serde_json::from_str("\"a\"").unwrap();
        assert_eq!(p, Provider::A);
        assert_eq!(serde_json::to_string(&Provider::B).unwrap(), "\"B\"");
    }

    #[test]
    fn request_validation_names_first_missing_field() {
        let req = EnrichmentRequest::new("Acme", "  ", "");
        assert_eq!(req.validate(), Err(RequestError::MissingField("websiteUrl")));
        let req = EnrichmentRequest::new(
            "Acme",
            "https://acme.com",
            "https://linkedin.com/company/acme",
        );
        assert!(req.is_complete());
    }

    #[test]
    fn request_serializes_camel_case() {
        let req = EnrichmentRequest::new(
            "Acme",
            "https://acme.com",
            "https://linkedin.com/company/acme",
        );
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["entityName"], "Acme");
        assert_eq!(json["websiteUrl"], "https://acme.com");
        assert_eq!(json["profileUrl"], "https://linkedin.com/company/acme");
    }

    #[test]
    fn success_and_failure_are_mutually_exclusive() {
        let ok = EnrichmentResult::success(
            Provider::A,
            EnrichmentPayload::Client(ClientPayload::default()),
            140,
            1200,
        );
        assert!(ok.payload().is_some());
        assert!(ok.error_message().is_none());
        assert_eq!(ok.completeness_score(), 100);

        let err = EnrichmentResult::failure(Provider::B, "");
        assert!(err.payload().is_none());
        assert_eq!(err.error_message(), Some("Provider B request failed"));
        assert_eq!(err.completeness_score(), 0);
        assert_eq!(err.processing_time_ms(), 0);
    }
}
