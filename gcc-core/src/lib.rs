pub mod calculations;
pub mod data;
pub mod models;

pub use data::{ReferenceDataError, ReferenceDataProvider};
pub use models::*;
