//! Read-only projection of the controller state for presentation.

use rapport_core::{
    ComparisonResult, EnrichmentPayload, EnrichmentRequest, EnrichmentResult, PerProvider, Provider,
};

use crate::phase::Phase;

/// One provider's column in the comparison screen.
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderCard {
    /// No round has been started.
    Idle,
    Pending,
    Failed { message: String },
    Ready {
        payload: EnrichmentPayload,
        completeness: u8,
        processing_time_ms: u64,
    },
}

impl ProviderCard {
    pub(crate) fn from_result(result: Option<&EnrichmentResult>, phase: Phase) -> Self {
        match result {
            None if phase == Phase::Idle => ProviderCard::Idle,
            None => ProviderCard::Pending,
            Some(r) => match (r.payload(), r.error_message()) {
                (Some(payload), _) => ProviderCard::Ready {
                    payload: payload.clone(),
                    completeness: r.completeness_score(),
                    processing_time_ms: r.processing_time_ms(),
                },
                (None, message) => ProviderCard::Failed {
                    message: message.unwrap_or_default().to_string(),
                },
            },
        }
    }

    pub fn payload(&self) -> Option<&EnrichmentPayload> {
        match self {
            ProviderCard::Ready { payload, .. } => Some(payload),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            ProviderCard::Failed { message } => Some(message),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonStatus {
    /// Still waiting on providers or on the comparison service.
    Pending,
    Ready,
    /// Nothing will arrive until the session is regenerated.
    Unavailable,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReconciliationView {
    pub generation: u64,
    pub phase: Phase,
    pub request: Option<EnrichmentRequest>,
    pub cards: PerProvider<ProviderCard>,
    pub comparison: Option<ComparisonResult>,
    pub comparison_status: ComparisonStatus,
    pub selected_provider: Option<Provider>,
}

impl ReconciliationView {
    pub fn card(&self, provider: Provider) -> &ProviderCard {
        self.cards.get(provider)
    }

    pub fn recommended_provider(&self) -> Option<Provider> {
        self.comparison.as_ref().map(|c| c.recommended_provider)
    }

    pub fn is_recommended(&self, provider: Provider) -> bool {
        self.recommended_provider() == Some(provider)
    }

    /// Whether a select action for `provider` would be accepted.
    pub fn can_select(&self, provider: Provider) -> bool {
        self.selected_provider.is_none() && self.card(provider).payload().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rapport_core::{ClientPayload, EntityKind};

    fn ready() -> EnrichmentResult {
        EnrichmentResult::success(
            Provider::A,
            EnrichmentPayload::Client(ClientPayload::default()),
            40,
            1200,
        )
    }

    #[test]
    fn cards_reflect_results() {
        assert_eq!(ProviderCard::from_result(None, Phase::Idle), ProviderCard::Idle);
        assert_eq!(ProviderCard::from_result(None, Phase::Fetching), ProviderCard::Pending);

        let failed = EnrichmentResult::failure(Provider::B, "Provider B: timed out after 90s");
        let card = ProviderCard::from_result(Some(&failed), Phase::ComparisonSkipped);
        assert_eq!(card.error_message(), Some("Provider B: timed out after 90s"));
        assert!(card.payload().is_none());

        let card = ProviderCard::from_result(Some(&ready()), Phase::ComparisonPending);
        assert_eq!(card.payload().map(|p| p.kind()), Some(EntityKind::Client));
        assert!(matches!(
            card,
            ProviderCard::Ready { completeness: 40, processing_time_ms: 1200, .. }
        ));
    }

    #[test]
    fn selection_closes_both_choices() {
        let ready_card = ProviderCard::from_result(Some(&ready()), Phase::Settled);
        let mut view = ReconciliationView {
            generation: 1,
            phase: Phase::ComparisonSkipped,
            request: None,
            cards: PerProvider::new(ready_card.clone(), ready_card),
            comparison: None,
            comparison_status: ComparisonStatus::Unavailable,
            selected_provider: None,
        };
        assert!(view.can_select(Provider::A));
        assert!(view.can_select(Provider::B));
        assert_eq!(view.recommended_provider(), None);

        view.selected_provider = Some(Provider::A);
        assert!(!view.can_select(Provider::A));
        assert!(!view.can_select(Provider::B));
    }
}
