use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[cfg(feature = "duckdb")]
    #[error("duckdb error: {0}")]
    DuckDb(#[from] ::duckdb::Error),

    #[error("record encoding failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}
