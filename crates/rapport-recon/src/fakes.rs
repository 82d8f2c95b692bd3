//! Scripted collaborators for controller tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rapport_ai::{Comparer, Enricher};
use rapport_core::{
    ClientPayload, ComparisonResult, EnrichmentPayload, EnrichmentRequest, EnrichmentResult,
    PerProvider, Provider,
};
use tokio::sync::watch;

/// Holds a scripted reply back until opened.
#[derive(Clone)]
pub struct Gate(Arc<watch::Sender<bool>>);

impl Gate {
    pub fn new() -> Self {
        Self(Arc::new(watch::channel(false).0))
    }

    pub fn open(&self) {
        self.0.send_replace(true);
    }

    async fn wait(&self) {
        let mut rx = self.0.subscribe();
        let _ = rx.wait_for(|open| *open).await;
    }
}

struct Step<T> {
    gate: Option<Gate>,
    reply: T,
}

fn next_step<T>(script: &Mutex<VecDeque<Step<T>>>) -> Option<Step<T>> {
    script.lock().unwrap().pop_front()
}

pub struct FakeEnricher {
    provider: Provider,
    script: Mutex<VecDeque<Step<Result<EnrichmentPayload, String>>>>,
    calls: AtomicUsize,
}

impl FakeEnricher {
    pub fn new(provider: Provider) -> Arc<Self> {
        Arc::new(Self {
            provider,
            script: Mutex::new(VecDeque::new()),
            calls: AtomicUsize::new(0),
        })
    }

    fn push(
        self: Arc<Self>,
        gate: Option<Gate>,
        reply: Result<EnrichmentPayload, String>,
    ) -> Arc<Self> {
        self.script.lock().unwrap().push_back(Step { gate, reply });
        self
    }

    pub fn then_ok(self: Arc<Self>, payload: EnrichmentPayload) -> Arc<Self> {
        self.push(None, Ok(payload))
    }

    pub fn then_err(self: Arc<Self>, message: &str) -> Arc<Self> {
        self.push(None, Err(message.to_string()))
    }

    pub fn then_gated(self: Arc<Self>, gate: Gate, payload: EnrichmentPayload) -> Arc<Self> {
        self.push(Some(gate), Ok(payload))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Enricher for FakeEnricher {
    fn provider(&self) -> Provider {
        self.provider
    }

    async fn enrich(&self, _request: &EnrichmentRequest) -> EnrichmentResult {
        let step = next_step(&self.script);
        self.calls.fetch_add(1, Ordering::SeqCst);
        let Some(step) = step else {
            return EnrichmentResult::success(self.provider, acme_payload("Acme Corp"), 50, 10);
        };
        if let Some(gate) = step.gate {
            gate.wait().await;
        }
        match step.reply {
            Ok(payload) => EnrichmentResult::success(self.provider, payload, 50, 10),
            Err(message) => EnrichmentResult::failure(self.provider, message),
        }
    }
}

pub struct FakeComparer {
    script: Mutex<VecDeque<Step<Option<ComparisonResult>>>>,
    entities: Mutex<Vec<String>>,
}

impl FakeComparer {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(VecDeque::new()),
            entities: Mutex::new(Vec::new()),
        })
    }

    pub fn then(self: Arc<Self>, reply: Option<ComparisonResult>) -> Arc<Self> {
        self.script.lock().unwrap().push_back(Step { gate: None, reply });
        self
    }

    pub fn then_gated(self: Arc<Self>, gate: Gate, reply: Option<ComparisonResult>) -> Arc<Self> {
        self.script
            .lock()
            .unwrap()
            .push_back(Step { gate: Some(gate), reply });
        self
    }

    pub fn calls(&self) -> usize {
        self.entities.lock().unwrap().len()
    }

    pub fn seen_entities(&self) -> Vec<String> {
        self.entities.lock().unwrap().clone()
    }
}

#[async_trait]
impl Comparer for FakeComparer {
    async fn compare(
        &self,
        _a: &EnrichmentPayload,
        _b: &EnrichmentPayload,
        entity_name: &str,
    ) -> Option<ComparisonResult> {
        self.entities.lock().unwrap().push(entity_name.to_string());
        let step = next_step(&self.script)?;
        if let Some(gate) = step.gate {
            gate.wait().await;
        }
        step.reply
    }
}

pub fn acme_request() -> EnrichmentRequest {
    EnrichmentRequest::new("Acme", "https://acme.com", "https://linkedin.com/company/acme")
}

pub fn acme_payload(company: &str) -> EnrichmentPayload {
    EnrichmentPayload::Client(ClientPayload {
        company: Some(company.to_string()),
        website: Some("https://acme.com".to_string()),
        ..Default::default()
    })
}

pub fn verdict(recommended: Provider, score_a: u8, score_b: u8) -> ComparisonResult {
    ComparisonResult {
        recommended_provider: recommended,
        score: PerProvider::new(score_a, score_b),
        reasoning: format!("{recommended} covers more of the profile"),
        strengths: PerProvider::default(),
        weaknesses: PerProvider::default(),
        completeness: PerProvider::new(score_a, score_b),
        key_differences: Vec::new(),
    }
}
