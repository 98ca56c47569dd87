use std::fmt::Write as _;

use chrono::NaiveDateTime;
use clap::ValueEnum;
use gcc_core::calculations::{CostCalculator, CostCalculatorError, ReferenceCatalog};
use gcc_core::data::{ProviderConfig, ProviderRegistry};
use gcc_core::{
    ComponentToggles, CostBreakdown, CostRequest, CostRequestForm, Plan, PlanDetails,
    ReferenceDataError, ReferenceTables,
};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::report::CostReport;
use crate::utils::format_currency;

/// Tier shown when the request names none and the city has no real-estate row.
pub const UNKNOWN_TIER: &str = "-";

/// How command results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Structured result of one calculation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalculationResult {
    pub headcount: u32,
    pub tier: String,
    pub city: String,
    pub plan: Plan,
    pub toggles: ComponentToggles,
    pub breakdown: CostBreakdown,
    pub plan_details: PlanDetails,
}

impl CalculationResult {
    pub fn new(
        request: &CostRequest,
        tier: String,
        breakdown: CostBreakdown,
    ) -> Self {
        Self {
            headcount: request.headcount,
            tier,
            city: request.city.clone(),
            plan: request.plan,
            toggles: request.toggles,
            breakdown,
            plan_details: request.plan.details(),
        }
    }

    pub fn report(
        &self,
        generated_at: NaiveDateTime,
    ) -> CostReport {
        CostReport {
            generated_at,
            headcount: self.headcount,
            tier: self.tier.clone(),
            city: self.city.clone(),
            plan: self.plan,
            toggles: self.toggles,
            breakdown: self.breakdown.clone(),
        }
    }
}

/// Registry with every reference-data backend the estimator can read.
pub fn build_registry() -> ProviderRegistry {
    gcc_data::default_registry()
}

/// Open the configured source and load all three tables.
pub async fn load_tables(config: &ProviderConfig) -> Result<ReferenceTables, ReferenceDataError> {
    debug!(backend = %config.backend, location = %config.location, "loading reference data");
    let provider = build_registry().create(config).await?;
    provider.get_tables().await
}

/// Pick the tier to display: the requested one, else the city's real-estate
/// tier, else [`UNKNOWN_TIER`].
pub fn resolve_tier(
    requested: Option<&str>,
    tables: &ReferenceTables,
    city: &str,
) -> String {
    requested
        .map(str::trim)
        .filter(|tier| !tier.is_empty())
        .or_else(|| tables.real_estate.tier_for_city(city))
        .unwrap_or(UNKNOWN_TIER)
        .to_string()
}

/// Validate `form` and run the calculator against `tables`.
pub fn run_calculation(
    form: &CostRequestForm,
    tables: &ReferenceTables,
) -> Result<CalculationResult, CostCalculatorError> {
    let request = form.validate().inspect_err(|e| warn!("rejected request: {e}"))?;

    let breakdown = CostCalculator::from_tables(tables)
        .calculate(&request)
        .inspect_err(|e| {
            warn!(
                city = %request.city,
                headcount = request.headcount,
                "calculation failed: {e}"
            )
        })?;

    let tier = resolve_tier(form.tier.as_deref(), tables, &request.city);
    info!(
        city = %request.city,
        headcount = request.headcount,
        plan = %request.plan,
        total = %breakdown.total_cost,
        "cost calculated"
    );

    Ok(CalculationResult::new(&request, tier, breakdown))
}

fn optional_amount(value: Option<Decimal>) -> String {
    value.map(format_currency).unwrap_or_else(|| "n/a".to_string())
}

/// Text listing of tiers, their cities and averages, and plan cost ranges.
pub fn render_catalog(catalog: &ReferenceCatalog) -> String {
    let mut out = String::new();

    writeln!(out, "LOCATIONS:").ok();
    for tier in &catalog.tiers {
        let cities = catalog
            .cities_by_tier
            .get(tier)
            .map(|c| c.join(", "))
            .unwrap_or_default();
        writeln!(out, "- {tier}: {cities}").ok();
        if let Some(averages) = catalog.average_costs.get(tier) {
            writeln!(
                out,
                "  average per seat: real estate {}, IT infrastructure {}",
                optional_amount(averages.real_estate),
                optional_amount(averages.it_infra)
            )
            .ok();
        }
    }

    writeln!(out).ok();
    writeln!(out, "ENABLING FUNCTIONS BY PLAN (Monthly):").ok();
    for plan in Plan::all() {
        let range = catalog
            .plan_ranges
            .get(plan)
            .map(|range| format!("{} to {}", format_currency(range.min), format_currency(range.max)))
            .unwrap_or_else(|| "n/a".to_string());
        writeln!(out, "- {plan}: {range}").ok();
    }

    out
}

/// Text description of every plan.
pub fn render_plans() -> String {
    let mut out = String::new();
    for (idx, plan) in Plan::all().iter().enumerate() {
        let details = plan.details();
        if idx > 0 {
            writeln!(out).ok();
        }
        writeln!(out, "{}: {}", details.name, details.description).ok();
        writeln!(out, "- Real Estate: {}", details.real_estate).ok();
        writeln!(out, "- IT Infrastructure: {}", details.it_infra).ok();
        writeln!(out, "- Enabling Functions: {}", details.enabling_functions).ok();
        writeln!(out, "- Technology: {}", details.technology).ok();
    }
    out
}

#[cfg(test)]
mod tests {
    use gcc_core::{CostCategory, CostTable, CostTableRow, InvalidInputError, PlanBracket};
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

    fn tables() -> ReferenceTables {
        ReferenceTables {
            real_estate: CostTable::new(
                CostCategory::RealEstate,
                vec![row("Tier 1", "CityA", dec!(10000)), row("Tier 2", "CityB", dec!(6000))],
            ),
            it_infra: CostTable::new(CostCategory::ItInfra, vec![row("Tier 1", "CityA", dec!(5000))]),
            plan_brackets: vec![PlanBracket {
                min_headcount: 1,
                max_headcount: 100,
                enabling_cost_basic: dec!(2000),
                enabling_cost_premium: dec!(4000),
                enabling_cost_advance: dec!(6000),
                tech_cost_basic: dec!(3000),
                tech_cost_premium: dec!(5000),
                tech_cost_advance: dec!(7000),
            }],
        }
    }

    fn form(city: &str) -> CostRequestForm {
        CostRequestForm {
            headcount: "10".to_string(),
            city: city.to_string(),
            tier: None,
            plan: "Basic".to_string(),
            real_estate: true,
            it_infra: true,
            enabling: true,
            technology: true,
        }
    }

    // =========================================================================
    // resolve_tier tests
    // =========================================================================

    #[test]
    fn resolve_tier_prefers_requested_tier() {
        assert_eq!(resolve_tier(Some(" Tier 3 "), &tables(), "CityA"), "Tier 3");
    }

    #[test]
    fn resolve_tier_falls_back_to_real_estate_row() {
        assert_eq!(resolve_tier(None, &tables(), "CityB"), "Tier 2");
        assert_eq!(resolve_tier(Some("  "), &tables(), "CityA"), "Tier 1");
    }

    #[test]
    fn resolve_tier_unknown_city() {
        assert_eq!(resolve_tier(None, &tables(), "Nowhere"), UNKNOWN_TIER);
    }

    // =========================================================================
    // run_calculation tests
    // =========================================================================

    #[test]
    fn run_calculation_worked_example() {
        let result = run_calculation(&form("CityA"), &tables()).expect("calculation should succeed");

        assert_eq!(result.tier, "Tier 1");
        assert_eq!(result.plan, Plan::Basic);
        assert_eq!(result.plan_details, Plan::Basic.details());
        assert_eq!(result.breakdown.total_cost, dec!(155000));
        assert_eq!(result.breakdown.real_estate_cost, dec!(100000));
        assert_eq!(result.breakdown.it_infra_cost, dec!(50000));
    }

    #[test]
    fn run_calculation_rejects_invalid_form() {
        let mut bad = form("CityA");
        bad.plan = "Gold".to_string();

        let result = run_calculation(&bad, &tables());

        assert_eq!(
            result,
            Err(CostCalculatorError::InvalidInput(InvalidInputError::UnknownPlan(
                "Gold".to_string()
            )))
        );
    }

    #[test]
    fn run_calculation_city_missing_from_enabled_table() {
        let result = run_calculation(&form("CityB"), &tables());

        assert_eq!(
            result,
            Err(CostCalculatorError::Lookup {
                category: CostCategory::ItInfra,
                city: "CityB".to_string(),
            })
        );
    }

    #[test]
    fn calculation_result_serializes_breakdown_and_plan_details() {
        let result = run_calculation(&form("CityA"), &tables()).unwrap();

        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["headcount"], 10);
        assert_eq!(json["plan"], "Basic");
        assert_eq!(json["toggles"]["it_infra"], true);
        assert_eq!(json["breakdown"]["total_cost"], "155000");
        assert_eq!(json["plan_details"]["name"], "Basic");
    }

    #[test]
    fn report_carries_result_fields() {
        let result = run_calculation(&form("CityA"), &tables()).unwrap();
        let at = chrono::NaiveDate::from_ymd_opt(2025, 1, 2)
            .unwrap()
            .and_hms_opt(3, 4, 5)
            .unwrap();

        let report = result.report(at);

        assert_eq!(report.tier, "Tier 1");
        assert_eq!(report.breakdown, result.breakdown);
        assert_eq!(report.filename(), "gcc_cost_report_20250102_030405.txt");
    }

    // =========================================================================
    // render tests
    // =========================================================================

    #[test]
    fn render_catalog_lists_tiers_and_ranges() {
        let catalog = ReferenceCatalog::from_tables(&tables());

        let text = render_catalog(&catalog);

        assert!(text.contains("- Tier 1: CityA\n"), "got: {text}");
        assert!(
            text.contains("average per seat: real estate ₹10,000, IT infrastructure ₹5,000"),
            "got: {text}"
        );
        assert!(text.contains("IT infrastructure n/a"), "got: {text}");
        assert!(text.contains("- Premium: ₹4,000 to ₹4,000\n"), "got: {text}");
    }

    #[test]
    fn render_plans_describes_every_plan() {
        let text = render_plans();

        for plan in Plan::all() {
            assert!(text.contains(&format!("{}: ", plan.details().name)));
        }
        assert!(text.contains("Comprehensive GCC setup with full customization"));
    }
}
