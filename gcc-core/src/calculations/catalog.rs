//! Summary of the reference tables for choosing a location and plan.
//!
//! The catalog lists the tiers and their cities, the average per-seat cost of
//! each tier, and the range of enabling-function costs each plan spans across
//! all brackets.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::calculations::common::mean;
use crate::models::{CostTable, Plan, ReferenceTables};

/// Average monthly per-seat cost of the cities in a tier.
///
/// An average is `None` when the table has no rows for the tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TierAverages {
    pub real_estate: Option<Decimal>,
    pub it_infra: Option<Decimal>,
}

/// Lowest and highest enabling-function cost of a plan across brackets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CostRange {
    pub min: Decimal,
    pub max: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReferenceCatalog {
    /// Distinct tiers of the real-estate table, sorted.
    pub tiers: Vec<String>,
    pub cities_by_tier: BTreeMap<String, Vec<String>>,
    pub average_costs: BTreeMap<String, TierAverages>,
    /// Absent when there are no brackets.
    pub plan_ranges: BTreeMap<Plan, CostRange>,
}

impl ReferenceCatalog {
    pub fn from_tables(tables: &ReferenceTables) -> Self {
        let tiers: Vec<String> = tables
            .real_estate
            .tiers()
            .into_iter()
            .map(str::to_string)
            .collect();

        let cities_by_tier = tiers
            .iter()
            .map(|tier| {
                let cities = tables
                    .real_estate
                    .cities_in_tier(tier)
                    .into_iter()
                    .map(str::to_string)
                    .collect();
                (tier.clone(), cities)
            })
            .collect();

        let average_costs = tiers
            .iter()
            .map(|tier| {
                let averages = TierAverages {
                    real_estate: tier_average(&tables.real_estate, tier),
                    it_infra: tier_average(&tables.it_infra, tier),
                };
                (tier.clone(), averages)
            })
            .collect();

        let plan_ranges = Plan::all()
            .iter()
            .filter_map(|plan| {
                enabling_cost_range(tables, *plan).map(|range| (*plan, range))
            })
            .collect();

        Self {
            tiers,
            cities_by_tier,
            average_costs,
            plan_ranges,
        }
    }
}

fn tier_average(
    table: &CostTable,
    tier: &str,
) -> Option<Decimal> {
    mean(
        table
            .rows()
            .iter()
            .filter(|row| row.tier == tier)
            .map(|row| row.monthly_cost),
    )
}

fn enabling_cost_range(
    tables: &ReferenceTables,
    plan: Plan,
) -> Option<CostRange> {
    let mut costs = tables
        .plan_brackets
        .iter()
        .map(|bracket| bracket.enabling_cost(plan));
    let first = costs.next()?;
    let (min, max) = costs.fold((first, first), |(min, max), cost| {
        (min.min(cost), max.max(cost))
    });
    Some(CostRange { min, max })
}
