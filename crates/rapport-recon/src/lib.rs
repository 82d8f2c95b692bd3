//! Reconciliation of two providers' enrichment results.
//!
//! [`Reconciler`] fans a request out to both providers, waits for both to
//! settle, asks for a comparison when both succeeded, and lets the caller pick
//! one payload to map into the canonical record. It is storage-agnostic:
//! draft checkpoints are the caller's business.

mod controller;
mod phase;
mod view;

#[cfg(test)]
mod fakes;

pub use controller::Reconciler;
pub use phase::{Phase, SelectError};
pub use view::{ComparisonStatus, ProviderCard, ReconciliationView};
