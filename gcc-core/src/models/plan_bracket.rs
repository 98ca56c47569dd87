use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Plan;

/// Flat monthly enabling-function and technology costs for a headcount range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanBracket {
    pub min_headcount: u32,
    pub max_headcount: u32,
    pub enabling_cost_basic: Decimal,
    pub enabling_cost_premium: Decimal,
    pub enabling_cost_advance: Decimal,
    pub tech_cost_basic: Decimal,
    pub tech_cost_premium: Decimal,
    pub tech_cost_advance: Decimal,
}

impl PlanBracket {
    /// Inclusive on both ends.
    pub fn contains(
        &self,
        headcount: u32,
    ) -> bool {
        self.min_headcount <= headcount && headcount <= self.max_headcount
    }

    /// True when MinHC is above MaxHC, so no headcount ever matches.
    pub fn is_inverted(&self) -> bool {
        self.min_headcount > self.max_headcount
    }

    /// True when some headcount falls inside both brackets.
    pub fn overlaps(
        &self,
        other: &PlanBracket,
    ) -> bool {
        !self.is_inverted()
            && !other.is_inverted()
            && self.min_headcount <= other.max_headcount
            && other.min_headcount <= self.max_headcount
    }

    pub fn enabling_cost(
        &self,
        plan: Plan,
    ) -> Decimal {
        match plan {
            Plan::Basic => self.enabling_cost_basic,
            Plan::Premium => self.enabling_cost_premium,
            Plan::Advance => self.enabling_cost_advance,
        }
    }

    pub fn technology_cost(
        &self,
        plan: Plan,
    ) -> Decimal {
        match plan {
            Plan::Basic => self.tech_cost_basic,
            Plan::Premium => self.tech_cost_premium,
            Plan::Advance => self.tech_cost_advance,
        }
    }
}
