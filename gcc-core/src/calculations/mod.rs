//! Cost calculation modules for GCC setup estimates.
//!
//! This module provides the cost calculator itself, the reference catalog
//! derived from the lookup tables, and shared rounding helpers.

pub mod catalog;
pub mod common;
pub mod cost_calculator;

pub use catalog::{CostRange, ReferenceCatalog, TierAverages};
pub use cost_calculator::{CostCalculator, CostCalculatorError, compute};
