//! The reconciliation controller.
//!
//! Each fetch round is tagged with a generation number. A round that finds
//! the generation moved on when its providers (or the comparison) answer
//! drops its results, so a regenerate issued mid-flight always wins.

use std::sync::Arc;

use rapport_ai::{Comparer, Enricher};
use rapport_core::{
    CanonicalFormData, ComparisonResult, EnrichmentPayload, EnrichmentRequest, EnrichmentResult,
    PerProvider, Provider, map_payload,
};
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::phase::{Phase, SelectError};
use crate::view::{ComparisonStatus, ProviderCard, ReconciliationView};

#[derive(Default)]
struct State {
    generation: u64,
    phase: Phase,
    request: Option<EnrichmentRequest>,
    /// Input set the one-shot auto trigger last fired for.
    auto_fetched: Option<EnrichmentRequest>,
    results: PerProvider<Option<EnrichmentResult>>,
    comparison: Option<ComparisonResult>,
    comparison_done: bool,
    selected: Option<Provider>,
}

impl State {
    fn enter(&mut self, phase: Phase) {
        info!(generation = self.generation, from = ?self.phase, to = ?phase, "phase transition");
        self.phase = phase;
    }

    /// Reset for a new round and return its generation.
    fn begin(&mut self, request: EnrichmentRequest) -> u64 {
        self.generation += 1;
        self.request = Some(request);
        self.results = PerProvider::default();
        self.comparison = None;
        self.comparison_done = false;
        self.selected = None;
        self.enter(Phase::Fetching);
        self.generation
    }

    fn is_current(&self, generation: u64, what: &str) -> bool {
        if self.generation == generation {
            return true;
        }
        debug!(
            stale = generation,
            current = self.generation,
            what,
            "dropping stale completion"
        );
        false
    }
}

/// Drives one entity through enrichment, comparison and selection.
///
/// Cloning is cheap and clones share state, so one task can regenerate while
/// another is still awaiting a round.
#[derive(Clone)]
pub struct Reconciler {
    enrichers: PerProvider<Arc<dyn Enricher>>,
    comparer: Arc<dyn Comparer>,
    state: Arc<Mutex<State>>,
}

impl Reconciler {
    pub fn new(
        provider_a: Arc<dyn Enricher>,
        provider_b: Arc<dyn Enricher>,
        comparer: Arc<dyn Comparer>,
    ) -> Self {
        Self {
            enrichers: PerProvider::new(provider_a, provider_b),
            comparer,
            state: Arc::new(Mutex::new(State::default())),
        }
    }

    /// Start a round if every input is filled in and no round has been
    /// auto-started for this input set yet. Returns whether a round ran.
    pub async fn auto_trigger(&self, request: &EnrichmentRequest) -> bool {
        {
            let mut state = self.state.lock().await;
            if !request.is_complete() || state.auto_fetched.as_ref() == Some(request) {
                return false;
            }
            state.auto_fetched = Some(request.clone());
        }
        self.run_round(request.clone()).await;
        true
    }

    /// Discard everything from the current round and fetch again with the
    /// last request. Returns false if nothing has been fetched yet.
    pub async fn regenerate(&self) -> bool {
        let request = self.state.lock().await.request.clone();
        match request {
            Some(request) => {
                info!(entity = %request.entity_name, "regenerating");
                self.run_round(request).await;
                true
            }
            None => false,
        }
    }

    /// Map the chosen provider's payload into the canonical record.
    pub async fn select(&self, provider: Provider) -> Result<CanonicalFormData, SelectError> {
        let mut state = self.state.lock().await;
        if state.selected.is_some() {
            return Err(SelectError::AlreadySelected);
        }
        if !state.phase.is_settled() {
            return Err(SelectError::NotSettled);
        }
        let result = state
            .results
            .get(provider)
            .as_ref()
            .ok_or(SelectError::NotSettled)?;
        let payload = result.payload().ok_or_else(|| SelectError::NoPayload {
            provider,
            reason: result.error_message().unwrap_or_default().to_string(),
        })?;
        let form = map_payload(payload, provider);

        state.selected = Some(provider);
        state.enter(Phase::Selected);
        info!(%provider, entity = form.entity_name(), "provider selected");
        Ok(form)
    }

    pub async fn snapshot(&self) -> ReconciliationView {
        let state = self.state.lock().await;
        let card = |p| ProviderCard::from_result(state.results.get(p).as_ref(), state.phase);
        let comparison_status = match (&state.comparison, state.comparison_done) {
            (Some(_), _) => ComparisonStatus::Ready,
            (None, true) => ComparisonStatus::Unavailable,
            (None, false) => ComparisonStatus::Pending,
        };
        ReconciliationView {
            generation: state.generation,
            phase: state.phase,
            request: state.request.clone(),
            cards: PerProvider::new(card(Provider::A), card(Provider::B)),
            comparison: state.comparison.clone(),
            comparison_status,
            selected_provider: state.selected,
        }
    }

    async fn run_round(&self, request: EnrichmentRequest) {
        let generation = self.state.lock().await.begin(request.clone());

        let (a, b) = tokio::join!(
            self.enrichers.a.enrich(&request),
            self.enrichers.b.enrich(&request)
        );

        let to_compare = {
            let mut state = self.state.lock().await;
            if !state.is_current(generation, "enrichment") {
                return;
            }
            let pair = match (a.payload(), b.payload()) {
                (Some(pa), Some(pb)) => Some((pa.clone(), pb.clone())),
                _ => None,
            };
            state.results = PerProvider::new(Some(a), Some(b));
            state.enter(Phase::Settled);
            match pair {
                Some(pair) => {
                    state.enter(Phase::ComparisonPending);
                    pair
                }
                None => {
                    state.comparison_done = true;
                    state.enter(Phase::ComparisonSkipped);
                    return;
                }
            }
        };

        self.finish_comparison(generation, &request, to_compare).await;
    }

    async fn finish_comparison(
        &self,
        generation: u64,
        request: &EnrichmentRequest,
        (a, b): (EnrichmentPayload, EnrichmentPayload),
    ) {
        let comparison = self.comparer.compare(&a, &b, &request.entity_name).await;

        let mut state = self.state.lock().await;
        if !state.is_current(generation, "comparison") {
            return;
        }
        let next = if comparison.is_some() {
            Phase::ComparisonReady
        } else {
            Phase::ComparisonSkipped
        };
        state.comparison = comparison;
        state.comparison_done = true;
        // A selection made while the comparison ran stands.
        if state.selected.is_none() {
            state.enter(next);
        }
    }
}
