use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{ComponentToggles, Plan};

/// Rejections raised before any cost lookup takes place.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InvalidInputError {
    #[error("headcount '{0}' is not a whole number")]
    UnparseableHeadcount(String),

    #[error("headcount must be a positive integer, got {0}")]
    NonPositiveHeadcount(i64),

    #[error("city is required")]
    MissingCity,

    #[error("unknown plan '{0}'; expected one of Basic, Premium, Advance")]
    UnknownPlan(String),
}

/// A validated cost request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostRequest {
    pub headcount: u32,
    pub city: String,
    pub plan: Plan,
    pub toggles: ComponentToggles,
}

/// Raw named fields as submitted by a user, before validation.
///
/// Toggles are presence flags: a component is included only when its flag is
/// set. `tier` is informational and never used for cost lookups.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostRequestForm {
    pub headcount: String,
    pub city: String,
    pub tier: Option<String>,
    pub plan: String,
    pub real_estate: bool,
    pub it_infra: bool,
    pub enabling: bool,
    pub technology: bool,
}

impl CostRequestForm {
    /// Parse the form into a [`CostRequest`].
    ///
    /// Fields are checked in order: headcount, city, plan. The first failure
    /// is returned.
    pub fn validate(&self) -> Result<CostRequest, InvalidInputError> {
        let headcount = parse_headcount(&self.headcount)?;

        let city = self.city.trim();
        if city.is_empty() {
            return Err(InvalidInputError::MissingCity);
        }

        let plan_name = self.plan.trim();
        let plan = Plan::parse(plan_name)
            .ok_or_else(|| InvalidInputError::UnknownPlan(plan_name.to_string()))?;

        Ok(CostRequest {
            headcount,
            city: city.to_string(),
            plan,
            toggles: ComponentToggles {
                real_estate: self.real_estate,
                it_infra: self.it_infra,
                enabling: self.enabling,
                technology: self.technology,
            },
        })
    }
}

fn parse_headcount(raw: &str) -> Result<u32, InvalidInputError> {
    let trimmed = raw.trim();
    let value: i64 = trimmed
        .parse()
        .map_err(|_| InvalidInputError::UnparseableHeadcount(trimmed.to_string()))?;
    if value <= 0 {
        return Err(InvalidInputError::NonPositiveHeadcount(value));
    }
    u32::try_from(value).map_err(|_| InvalidInputError::UnparseableHeadcount(trimmed.to_string()))
}
