//! Draft persistence for in-progress wizard sessions.
//!
//! The wizard saves its state at checkpoints (inputs collected, provider
//! selected) so a restarted session can resume, and clears it once the record
//! is persisted. The reconciliation controller never touches drafts.

use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::form::CanonicalFormData;
use crate::types::{EnrichmentRequest, EntityKind, Provider};

#[derive(Error, Debug)]
pub enum DraftError {
    #[error("draft I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("draft could not be encoded: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("stored draft is corrupt: {0}")]
    Corrupt(#[source] serde_json::Error),
}

/// Snapshot of an in-progress wizard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WizardDraft {
    pub kind: EntityKind,
    pub step: u8,
    pub request: EnrichmentRequest,
    #[serde(default)]
    pub selected_provider: Option<Provider>,
    #[serde(default)]
    pub form: Option<CanonicalFormData>,
    pub saved_at: DateTime<Utc>,
}

impl WizardDraft {
    pub fn new(kind: EntityKind, request: EnrichmentRequest) -> Self {
        Self {
            kind,
            step: 1,
            request,
            selected_provider: None,
            form: None,
            saved_at: Utc::now(),
        }
    }

    /// Record a selection and advance to the review step.
    pub fn with_selection(mut self, provider: Provider, form: CanonicalFormData) -> Self {
        self.selected_provider = Some(provider);
        self.form = Some(form);
        self.step = self.step.max(2);
        self.saved_at = Utc::now();
        self
    }
}

/// Where wizard drafts live between sessions.
pub trait DraftStore: Send + Sync {
    fn save(&self, draft: &WizardDraft) -> Result<(), DraftError>;
    fn load(&self) -> Result<Option<WizardDraft>, DraftError>;
    fn clear(&self) -> Result<(), DraftError>;
}

/// Process-local draft store.
#[derive(Default)]
pub struct MemoryDraftStore {
    slot: Mutex<Option<WizardDraft>>,
}

impl MemoryDraftStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DraftStore for MemoryDraftStore {
    fn save(&self, draft: &WizardDraft) -> Result<(), DraftError> {
        *self.slot.lock().unwrap_or_else(|e| e.into_inner()) = Some(draft.clone());
        Ok(())
    }

    fn load(&self) -> Result<Option<WizardDraft>, DraftError> {
        Ok(self.slot.lock().unwrap_or_else(|e| e.into_inner()).clone())
    }

    fn clear(&self) -> Result<(), DraftError> {
        *self.slot.lock().unwrap_or_else(|e| e.into_inner()) = None;
        Ok(())
    }
}
