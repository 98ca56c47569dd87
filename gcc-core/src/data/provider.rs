use async_trait::async_trait;
use thiserror::Error;

use crate::models::ReferenceTables;

#[derive(Debug, Error)]
pub enum ReferenceDataError {
    #[error("Reference data not found: {0}")]
    NotFound(String),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("Parse error in {sheet} sheet: {message}")]
    Parse { sheet: String, message: String },

    #[error("Missing required columns in {sheet} sheet: {missing:?}")]
    MissingColumns { sheet: String, missing: Vec<String> },

    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Source of the lookup tables consumed by the cost calculator.
///
/// Implementations validate column presence and normalize tier names before
/// returning; the calculator trusts the tables as given.
#[async_trait]
pub trait ReferenceDataProvider: Send + Sync {
    async fn get_tables(&self) -> Result<ReferenceTables, ReferenceDataError>;
}
