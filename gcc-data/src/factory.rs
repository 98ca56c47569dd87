use std::path::Path;

use async_trait::async_trait;
use gcc_core::data::{ProviderConfig, ProviderFactory, ProviderRegistry};
use gcc_core::{ReferenceDataError, ReferenceDataProvider};

use crate::provider::{CsvDirectoryProvider, TomlWorkbookProvider};

/// [`ProviderFactory`] for a directory of CSV sheets.
///
/// Register this with a [`ProviderRegistry`] to make the `"csv"` backend
/// available:
///
/// ```rust,no_run
/// use gcc_core::data::ProviderRegistry;
/// use gcc_data::CsvProviderFactory;
///
/// let mut registry = ProviderRegistry::new();
/// registry.register(Box::new(CsvProviderFactory));
/// ```
pub struct CsvProviderFactory;

#[async_trait]
impl ProviderFactory for CsvProviderFactory {
    fn backend_name(&self) -> &'static str {
        "csv"
    }

    /// `config.location` must be an existing directory.
    async fn create(
        &self,
        config: &ProviderConfig,
    ) -> Result<Box<dyn ReferenceDataProvider>, ReferenceDataError> {
        let dir = Path::new(&config.location);
        if !dir.is_dir() {
            return Err(ReferenceDataError::NotFound(format!(
                "reference data directory '{}'",
                config.location
            )));
        }
        Ok(Box::new(CsvDirectoryProvider::new(dir)))
    }
}

/// [`ProviderFactory`] for a single TOML workbook (`"toml"` backend).
pub struct TomlProviderFactory;

#[async_trait]
impl ProviderFactory for TomlProviderFactory {
    fn backend_name(&self) -> &'static str {
        "toml"
    }

    /// `config.location` must be an existing file.
    async fn create(
        &self,
        config: &ProviderConfig,
    ) -> Result<Box<dyn ReferenceDataProvider>, ReferenceDataError> {
        let path = Path::new(&config.location);
        if !path.is_file() {
            return Err(ReferenceDataError::NotFound(format!(
                "reference workbook '{}'",
                config.location
            )));
        }
        Ok(Box::new(TomlWorkbookProvider::new(path)))
    }
}

/// A registry with every backend this crate provides.
pub fn default_registry() -> ProviderRegistry {
    let mut registry = ProviderRegistry::new();
    registry.register(Box::new(CsvProviderFactory));
    registry.register(Box::new(TomlProviderFactory));
    registry
}
