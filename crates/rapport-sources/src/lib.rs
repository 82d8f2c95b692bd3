//! Simulated data-source connectors.
//!
//! Connecting, syncing and uploading produce mock items and publish one
//! [`IngestionEvent`] per item on a broadcast channel. Delays and failures
//! come from [`SimulationConfig`].

mod catalog;
mod error;
mod hub;
mod ingest;

pub use catalog::{ConnectorId, ConnectorSpec, IngestKind, catalog};
pub use error::SourceError;
pub use hub::{
    CONNECT_FAILED, ConnectorState, ConnectorStatus, FailurePolicy, SYNC_FAILED, SimulationConfig,
    SourceHub,
};
pub use ingest::{IngestionEvent, ItemType};
