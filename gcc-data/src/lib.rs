pub mod factory;
pub mod loader;
pub mod provider;
pub mod workbook;

pub use factory::{CsvProviderFactory, TomlProviderFactory, default_registry};
pub use loader::{ReferenceDataLoader, clean_tier_name};
pub use provider::{CsvDirectoryProvider, TomlWorkbookProvider};
