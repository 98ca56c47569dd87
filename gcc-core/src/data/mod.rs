pub mod factory;
pub mod provider;

pub use factory::{ProviderConfig, ProviderFactory, ProviderRegistry};
pub use provider::{ReferenceDataError, ReferenceDataProvider};
