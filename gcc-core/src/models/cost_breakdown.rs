use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::CostCategory;

/// Monthly cost per category plus the derived hourly per-head rate.
///
/// Amounts are in local currency; `hourly_cost_per_head_usd` is in US dollars
/// and kept at full precision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub real_estate_cost: Decimal,
    pub it_infra_cost: Decimal,
    pub enabling_cost: Decimal,
    pub technology_cost: Decimal,
    pub total_cost: Decimal,
    pub hourly_cost_per_head_usd: Decimal,
}

impl CostBreakdown {
    pub fn category_cost(
        &self,
        category: CostCategory,
    ) -> Decimal {
        match category {
            CostCategory::RealEstate => self.real_estate_cost,
            CostCategory::ItInfra => self.it_infra_cost,
            CostCategory::Enabling => self.enabling_cost,
            CostCategory::Technology => self.technology_cost,
        }
    }
}
