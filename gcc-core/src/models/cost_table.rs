use std::collections::HashSet;
use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CostCategory {
    RealEstate,
    ItInfra,
    Enabling,
    Technology,
}

impl CostCategory {
    pub fn all() -> &'static [CostCategory] {
        &[
            CostCategory::RealEstate,
            CostCategory::ItInfra,
            CostCategory::Enabling,
            CostCategory::Technology,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RealEstate => "real_estate",
            Self::ItInfra => "it_infra",
            Self::Enabling => "enabling",
            Self::Technology => "technology",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::RealEstate => "Real Estate",
            Self::ItInfra => "IT Infrastructure",
            Self::Enabling => "Enabling Functions",
            Self::Technology => "Technology",
        }
    }
}

impl fmt::Display for CostCategory {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of a per-seat monthly cost sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostTableRow {
    pub tier: String,
    pub city: String,
    pub monthly_cost: Decimal,
}

/// A per-seat cost sheet for a single [`CostCategory`].
///
/// Rows keep their source order. Lookups match on city alone and return the
/// first matching row, so a city listed twice resolves to its earliest entry.
/// Use [`CostTable::duplicate_cities`] to find such cities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostTable {
    pub category: CostCategory,
    pub rows: Vec<CostTableRow>,
}

impl CostTable {
    pub fn new(
        category: CostCategory,
        rows: Vec<CostTableRow>,
    ) -> Self {
        Self { category, rows }
    }

    pub fn rows(&self) -> &[CostTableRow] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// First row whose city equals `city` exactly.
    pub fn find_by_city(
        &self,
        city: &str,
    ) -> Option<&CostTableRow> {
        self.rows.iter().find(|row| row.city == city)
    }

    pub fn tier_for_city(
        &self,
        city: &str,
    ) -> Option<&str> {
        self.find_by_city(city).map(|row| row.tier.as_str())
    }

    /// Distinct tier names, sorted.
    pub fn tiers(&self) -> Vec<&str> {
        let mut tiers: Vec<&str> = self.rows.iter().map(|row| row.tier.as_str()).collect();
        tiers.sort_unstable();
        tiers.dedup();
        tiers
    }

    /// Distinct cities belonging to `tier`, sorted.
    pub fn cities_in_tier(
        &self,
        tier: &str,
    ) -> Vec<&str> {
        let mut cities: Vec<&str> = self
            .rows
            .iter()
            .filter(|row| row.tier == tier)
            .map(|row| row.city.as_str())
            .collect();
        cities.sort_unstable();
        cities.dedup();
        cities
    }

    /// Cities that appear on more than one row, in order of their second
    /// appearance. Only the first row of each is ever used for lookups.
    pub fn duplicate_cities(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        let mut duplicates = Vec::new();
        for row in &self.rows {
            if !seen.insert(row.city.as_str()) && !duplicates.contains(&row.city.as_str()) {
                duplicates.push(row.city.as_str());
            }
        }
        duplicates
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn row(
        tier: &str,
        city: &str,
        cost: Decimal,
    ) -> CostTableRow {
        CostTableRow {
            tier: tier.to_string(),
            city: city.to_string(),
            monthly_cost: cost,
        }
    }

    fn sample_table() -> CostTable {
        CostTable::new(
            CostCategory::RealEstate,
            vec![
                row("Tier 2", "Pune", dec!(9000)),
                row("Tier 1", "Mumbai", dec!(15000)),
                row("Tier 1", "Bengaluru", dec!(14000)),
                row("Tier 1", "Mumbai", dec!(99999)),
            ],
        )
    }

    #[test]
    fn find_by_city_returns_first_match() {
        let table = sample_table();

        let found = table.find_by_city("Mumbai").unwrap();

        assert_eq!(found.monthly_cost, dec!(15000));
    }

    #[test]
    fn find_by_city_is_case_sensitive() {
        let table = sample_table();

        assert!(table.find_by_city("mumbai").is_none());
    }

    #[test]
    fn tier_for_city_uses_first_match() {
        let table = sample_table();

        assert_eq!(table.tier_for_city("Pune"), Some("Tier 2"));
        assert_eq!(table.tier_for_city("Chennai"), None);
    }

    #[test]
    fn tiers_are_sorted_and_unique() {
        let table = sample_table();

        assert_eq!(table.tiers(), vec!["Tier 1", "Tier 2"]);
    }

    #[test]
    fn cities_in_tier_are_sorted_and_unique() {
        let table = sample_table();

        assert_eq!(table.cities_in_tier("Tier 1"), vec!["Bengaluru", "Mumbai"]);
        assert!(table.cities_in_tier("Tier 3").is_empty());
    }

    #[test]
    fn duplicate_cities_lists_each_repeat_once() {
        let mut table = sample_table();
        table.rows.push(row("Tier 1", "Mumbai", dec!(1)));

        assert_eq!(table.duplicate_cities(), vec!["Mumbai"]);
    }

    #[test]
    fn category_keys_and_labels() {
        assert_eq!(CostCategory::ItInfra.as_str(), "it_infra");
        assert_eq!(CostCategory::ItInfra.label(), "IT Infrastructure");
        assert_eq!(CostCategory::RealEstate.to_string(), "real_estate");
        assert_eq!(CostCategory::all().len(), 4);
    }
}
