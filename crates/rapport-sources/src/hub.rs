//! Connector state and the simulated connect / sync / upload flows.

use std::collections::{BTreeMap, VecDeque};
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::Serialize;
use tokio::sync::{Mutex, broadcast};
use tracing::{info, warn};

use crate::SourceError;
use crate::catalog::{ConnectorId, ConnectorSpec, catalog};
use crate::ingest::{IngestionEvent, ItemType, mock_item};

/// Items ingested by a fresh connection.
const CONNECT_ITEMS: usize = 2;
/// Items ingested by a manual sync.
const SYNC_ITEMS: usize = 1;
/// Events kept for [`SourceHub::recent_events`].
const RECENT_EVENTS: usize = 50;

pub const CONNECT_FAILED: &str = "Connection failed - check your OAuth and retry.";
pub const SYNC_FAILED: &str = "Sync failed - please try again";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "message", rename_all = "snake_case")]
pub enum ConnectorStatus {
    NotConnected,
    Connecting,
    Connected,
    Error(String),
}

/// When simulated authorizations and syncs fail.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FailurePolicy {
    Never,
    Always,
    /// Each attempt fails with this probability, clamped to `0.0..=1.0`.
    Chance(f64),
    /// Every n-th attempt across the hub fails.
    OneIn(u32),
}

impl FailurePolicy {
    fn fails(self, attempt: u64) -> bool {
        match self {
            Self::Never => false,
            Self::Always => true,
            Self::Chance(p) if p.is_nan() => false,
            Self::Chance(p) => rand::thread_rng().gen_bool(p.clamp(0.0, 1.0)),
            Self::OneIn(0) => false,
            Self::OneIn(n) => attempt % u64::from(n) == 0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SimulationConfig {
    /// Time spent in `Connecting` while the grant is simulated.
    pub auth_delay: Duration,
    pub item_delay: Duration,
    pub sync_delay: Duration,
    pub upload_delay: Duration,
    pub failure: FailurePolicy,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            auth_delay: Duration::from_secs(1),
            item_delay: Duration::from_millis(500),
            sync_delay: Duration::from_secs(2),
            upload_delay: Duration::from_millis(300),
            failure: FailurePolicy::Chance(0.1),
        }
    }
}

impl SimulationConfig {
    /// No delays and no failures.
    pub fn instant() -> Self {
        Self {
            auth_delay: Duration::ZERO,
            item_delay: Duration::ZERO,
            sync_delay: Duration::ZERO,
            upload_delay: Duration::ZERO,
            failure: FailurePolicy::Never,
        }
    }

    pub fn with_failure(mut self, failure: FailurePolicy) -> Self {
        self.failure = failure;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectorState {
    pub spec: &'static ConnectorSpec,
    pub status: ConnectorStatus,
    pub items_count: u32,
    pub last_synced: Option<DateTime<Utc>>,
}

struct HubState {
    connectors: BTreeMap<ConnectorId, ConnectorState>,
    /// Bumped by `disconnect`; flows that slept re-check it before writing.
    epochs: BTreeMap<ConnectorId, u64>,
    recent: VecDeque<IngestionEvent>,
    next_event: u64,
    attempts: u64,
}

impl HubState {
    fn connector(&mut self, id: ConnectorId) -> &mut ConnectorState {
        self.connectors.entry(id).or_insert_with(|| ConnectorState {
            spec: id.spec(),
            status: ConnectorStatus::NotConnected,
            items_count: 0,
            last_synced: None,
        })
    }

    fn set_status(&mut self, id: ConnectorId, status: ConnectorStatus) {
        info!(connector = %id, status = ?status, "connector status");
        let conn = self.connector(id);
        if status == ConnectorStatus::Connected {
            conn.last_synced = Some(Utc::now());
        }
        conn.status = status;
    }

    fn next_attempt(&mut self) -> u64 {
        self.attempts += 1;
        self.attempts
    }

    fn epoch(&self, id: ConnectorId) -> u64 {
        self.epochs.get(&id).copied().unwrap_or(0)
    }

    fn ensure_epoch(&self, id: ConnectorId, epoch: u64) -> Result<(), SourceError> {
        if self.epoch(id) == epoch {
            Ok(())
        } else {
            info!(connector = %id, "dropping work for a disconnected connector");
            Err(SourceError::Disconnected(id))
        }
    }
}

/// Owns every connector's state and broadcasts ingestion activity.
///
/// Clones share state. The lock is released during simulated delays, so
/// other connectors progress concurrently.
#[derive(Clone)]
pub struct SourceHub {
    state: Arc<Mutex<HubState>>,
    events: broadcast::Sender<IngestionEvent>,
    config: SimulationConfig,
}

impl SourceHub {
    pub fn new(config: SimulationConfig) -> Self {
        let connectors = catalog()
            .iter()
            .map(|spec| {
                (
                    spec.id,
                    ConnectorState {
                        spec,
                        status: ConnectorStatus::NotConnected,
                        items_count: 0,
                        last_synced: None,
                    },
                )
            })
            .collect();
        let (events, _) = broadcast::channel(RECENT_EVENTS);
        Self {
            state: Arc::new(Mutex::new(HubState {
                connectors,
                epochs: BTreeMap::new(),
                recent: VecDeque::new(),
                next_event: 0,
                attempts: 0,
            })),
            events,
            config,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<IngestionEvent> {
        self.events.subscribe()
    }

    /// All connectors in catalog order.
    pub async fn connectors(&self) -> Vec<ConnectorState> {
        self.state.lock().await.connectors.values().cloned().collect()
    }

    pub async fn connector(&self, id: ConnectorId) -> ConnectorState {
        self.state.lock().await.connector(id).clone()
    }

    /// Most recent events first.
    pub async fn recent_events(&self) -> Vec<IngestionEvent> {
        self.state.lock().await.recent.iter().cloned().collect()
    }

    /// Authorize a connector and pull its first items.
    ///
    /// Returns the number of items ingested. A simulated failure leaves the
    /// connector in the error state and is also returned as an error. A
    /// disconnect while this runs wins and yields [`SourceError::Disconnected`].
    pub async fn connect(&self, id: ConnectorId, client_id: &str) -> Result<usize, SourceError> {
        if id.is_upload_only() {
            return Err(SourceError::UploadOnly(id));
        }
        let epoch = {
            let mut state = self.state.lock().await;
            match state.connector(id).status {
                ConnectorStatus::Connecting => return Err(SourceError::Busy(id)),
                ConnectorStatus::Connected => return Err(SourceError::AlreadyConnected(id)),
                _ => {}
            }
            state.set_status(id, ConnectorStatus::Connecting);
            state.epoch(id)
        };
        tokio::time::sleep(self.config.auth_delay).await;
        {
            let mut state = self.state.lock().await;
            state.ensure_epoch(id, epoch)?;
            let attempt = state.next_attempt();
            if self.config.failure.fails(attempt) {
                warn!(connector = %id, attempt, "simulated authorization failure");
                state.set_status(id, ConnectorStatus::Error(CONNECT_FAILED.to_string()));
                return Err(SourceError::Failed {
                    connector: id,
                    message: CONNECT_FAILED.to_string(),
                });
            }
            state.set_status(id, ConnectorStatus::Connected);
        }
        self.ingest(id, client_id, CONNECT_ITEMS, epoch).await
    }

    /// Pull one more item from a connected (or errored) connector.
    pub async fn sync(&self, id: ConnectorId, client_id: &str) -> Result<usize, SourceError> {
        let epoch = {
            let mut state = self.state.lock().await;
            match state.connector(id).status {
                ConnectorStatus::Connected | ConnectorStatus::Error(_) => {}
                _ => return Err(SourceError::NotConnected(id)),
            }
            let attempt = state.next_attempt();
            if self.config.failure.fails(attempt) {
                warn!(connector = %id, attempt, "simulated sync failure");
                state.set_status(id, ConnectorStatus::Error(SYNC_FAILED.to_string()));
                return Err(SourceError::Failed {
                    connector: id,
                    message: SYNC_FAILED.to_string(),
                });
            }
            state.epoch(id)
        };
        tokio::time::sleep(self.config.sync_delay).await;
        {
            let mut state = self.state.lock().await;
            state.ensure_epoch(id, epoch)?;
            state.set_status(id, ConnectorStatus::Connected);
        }
        self.ingest(id, client_id, SYNC_ITEMS, epoch).await
    }

    /// Disconnect and forget everything the connector ingested.
    ///
    /// In-flight connects, syncs and uploads for this connector stop at their
    /// next step and leave nothing behind.
    pub async fn disconnect(&self, id: ConnectorId) {
        let mut state = self.state.lock().await;
        *state.epochs.entry(id).or_insert(0) += 1;
        state.set_status(id, ConnectorStatus::NotConnected);
        let conn = state.connector(id);
        conn.items_count = 0;
        conn.last_synced = None;
        state.recent.retain(|e| e.connector_id != id);
    }

    /// Add uploaded files through the documents connector.
    pub async fn upload_documents(
        &self,
        client_id: &str,
        file_names: &[String],
    ) -> Result<usize, SourceError> {
        let id = ConnectorId::Documents;
        let epoch = self.state.lock().await.epoch(id);
        for name in file_names {
            tokio::time::sleep(self.config.upload_delay).await;
            let mut state = self.state.lock().await;
            state.ensure_epoch(id, epoch)?;
            self.emit(
                &mut state,
                id,
                client_id,
                format!("Document uploaded: {name}"),
                ItemType::Document,
            );
            state.connector(id).items_count += 1;
        }
        let mut state = self.state.lock().await;
        state.ensure_epoch(id, epoch)?;
        if state.connector(id).status == ConnectorStatus::NotConnected {
            state.set_status(id, ConnectorStatus::Connected);
        }
        Ok(file_names.len())
    }

    async fn ingest(
        &self,
        id: ConnectorId,
        client_id: &str,
        count: usize,
        epoch: u64,
    ) -> Result<usize, SourceError> {
        for index in 0..count {
            tokio::time::sleep(self.config.item_delay).await;
            let (description, item_type) = mock_item(id, index);
            let mut state = self.state.lock().await;
            state.ensure_epoch(id, epoch)?;
            self.emit(&mut state, id, client_id, description, item_type);
            state.connector(id).items_count += 1;
        }
        let mut state = self.state.lock().await;
        state.ensure_epoch(id, epoch)?;
        let conn = state.connector(id);
        conn.last_synced = Some(Utc::now());
        info!(connector = %id, items = count, total = conn.items_count, "ingestion complete");
        Ok(count)
    }

    fn emit(
        &self,
        state: &mut HubState,
        id: ConnectorId,
        client_id: &str,
        description: String,
        item_type: ItemType,
    ) {
        state.next_event += 1;
        let event = IngestionEvent {
            id: format!("evt-{}", state.next_event),
            connector_id: id,
            client_id: client_id.to_string(),
            timestamp: Utc::now(),
            description,
            item_type,
        };
        state.recent.push_front(event.clone());
        state.recent.truncate(RECENT_EVENTS);
        // No subscribers is fine.
        let _ = self.events.send(event);
    }
}
