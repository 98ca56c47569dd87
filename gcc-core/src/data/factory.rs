use std::collections::HashMap;

use async_trait::async_trait;

use super::provider::{ReferenceDataError, ReferenceDataProvider};

/// Backend-agnostic reference-data source configuration.
///
/// `backend` must match the [`ProviderFactory::backend_name`] of a
/// registered factory.  `location` is passed through to that factory
/// unchanged; its meaning is backend-specific.
///
/// | backend | location examples                 |
/// |---------|-----------------------------------|
/// | `csv`   | `data`, `/srv/gcc/reference`      |
/// | `toml`  | `gcc_reference.toml`              |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    /// Lowercase identifier matching a registered factory (e.g. `"csv"`).
    pub backend: String,
    /// Opaque value forwarded to the factory's `create` method.
    pub location: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            backend: "csv".to_string(),
            location: "data".to_string(),
        }
    }
}

/// One implementation per reference-data backend.  Each backend exports a
/// unit struct that implements this trait and is registered with a
/// [`ProviderRegistry`] at startup.
#[async_trait]
pub trait ProviderFactory: Send + Sync {
    /// Unique, lowercase identifier for this backend.
    fn backend_name(&self) -> &'static str;

    /// Build a provider for `config.location`.  Implementations may check
    /// that the location exists but should defer reading tables until
    /// [`ReferenceDataProvider::get_tables`] is called.
    async fn create(
        &self,
        config: &ProviderConfig,
    ) -> Result<Box<dyn ReferenceDataProvider>, ReferenceDataError>;
}

/// Registry of [`ProviderFactory`] instances, keyed by backend name.
///
/// Typical lifetime:
/// 1. Create with `ProviderRegistry::new()`.
/// 2. Call `register` once per known backend.
/// 3. Call `create` whenever a provider is needed.
pub struct ProviderRegistry {
    factories: HashMap<&'static str, Box<dyn ProviderFactory>>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Register a backend factory.
    ///
    /// If a factory with the same [`ProviderFactory::backend_name`] is
    /// already present it is silently replaced.
    pub fn register(
        &mut self,
        factory: Box<dyn ProviderFactory>,
    ) {
        self.factories.insert(factory.backend_name(), factory);
    }

    /// Names of every registered backend, sorted alphabetically.
    pub fn available_backends(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.factories.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Dispatch to the factory that matches `config.backend` and return
    /// the provider it produces.
    ///
    /// # Errors
    /// * [`ReferenceDataError::Configuration`]: no factory is registered
    ///   for the requested backend name.
    /// * Any error the chosen factory itself returns.
    pub async fn create(
        &self,
        config: &ProviderConfig,
    ) -> Result<Box<dyn ReferenceDataProvider>, ReferenceDataError> {
        let factory = self
            .factories
            .get(config.backend.as_str())
            .ok_or_else(|| {
                ReferenceDataError::Configuration(format!(
                    "unknown backend '{}'; available: {:?}",
                    config.backend,
                    self.available_backends()
                ))
            })?;

        factory.create(config).await
    }
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self::new()
    }
}
