pub mod comparison;
pub mod completeness;
pub mod draft;
pub mod form;
pub mod mapper;
pub mod payload;
pub mod types;

pub use comparison::{ComparisonResult, PerProvider};
pub use completeness::completeness;
pub use draft::{DraftError, DraftStore, MemoryDraftStore, WizardDraft};
pub use form::{CanonicalFormData, ClientFormData, CompanyFormData};
pub use mapper::map_payload;
pub use payload::{ClientPayload, CompanyPayload, EnrichmentPayload};
pub use types::{EnrichmentRequest, EnrichmentResult, EntityKind, Provider, RequestError};
