//! Storage layer: DuckDB for persisted records, JSON files for wizard drafts.

mod draft;
mod error;

pub use draft::JsonFileDraftStore;
pub use error::StoreError;

#[cfg(feature = "duckdb")]
mod columns;
#[cfg(feature = "duckdb")]
mod duck;
#[cfg(feature = "duckdb")]
pub use duck::{ClientStore, StoredClient, StoredCompanyProfile};
