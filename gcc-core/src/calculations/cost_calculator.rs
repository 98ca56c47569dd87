//! GCC setup cost calculation.
//!
//! This module turns a validated [`CostRequest`] and the three reference
//! tables into a monthly [`CostBreakdown`] and an hourly per-head rate.
//!
//! # Calculation Steps
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | Real estate: per-seat monthly cost for the city × headcount |
//! | 2    | IT infrastructure: per-seat monthly cost for the city × headcount |
//! | 3    | Bracket: first plan bracket whose range contains the headcount |
//! | 4    | Enabling functions: flat bracket cost for the plan |
//! | 5    | Technology: flat bracket cost for the plan |
//! | 6    | Total: sum of steps 1, 2, 4 and 5 |
//! | 7    | Hourly per head: total ÷ headcount ÷ hours per month ÷ USD rate |
//!
//! Each of steps 1, 2, 4 and 5 contributes zero when its toggle is off. The
//! bracket lookup in step 3 runs regardless of toggles, so a headcount outside
//! every bracket always fails the calculation.
//!
//! No markup is applied to any figure.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use gcc_core::calculations::CostCalculator;
//! use gcc_core::{
//!     ComponentToggles, CostCategory, CostRequest, CostTable, CostTableRow, Plan, PlanBracket,
//! };
//!
//! let real_estate = CostTable::new(
//!     CostCategory::RealEstate,
//!     vec![CostTableRow {
//!         tier: "Tier 1".to_string(),
//!         city: "CityA".to_string(),
//!         monthly_cost: dec!(10000),
//!     }],
//! );
//! let it_infra = CostTable::new(
//!     CostCategory::ItInfra,
//!     vec![CostTableRow {
//!         tier: "Tier 1".to_string(),
//!         city: "CityA".to_string(),
//!         monthly_cost: dec!(5000),
//!     }],
//! );
//! let brackets = vec![PlanBracket {
//!     min_headcount: 1,
//!     max_headcount: 100,
//!     enabling_cost_basic: dec!(2000),
//!     enabling_cost_premium: dec!(4000),
//!     enabling_cost_advance: dec!(6000),
//!     tech_cost_basic: dec!(3000),
//!     tech_cost_premium: dec!(5000),
//!     tech_cost_advance: dec!(7000),
//! }];
//!
//! let request = CostRequest {
//!     headcount: 10,
//!     city: "CityA".to_string(),
//!     plan: Plan::Basic,
//!     toggles: ComponentToggles::all(),
//! };
//!
//! let calculator = CostCalculator::new(&real_estate, &it_infra, &brackets);
//! let breakdown = calculator.calculate(&request).unwrap();
//!
//! assert_eq!(breakdown.total_cost, dec!(155000));
//! assert_eq!(breakdown.hourly_cost_per_head_usd.round_dp(6), dec!(1.519608));
//! ```

use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::{
    ConversionConfig, CostBreakdown, CostCategory, CostRequest, CostTable, InvalidInputError,
    PlanBracket, ReferenceTables,
};

/// Errors that can occur during a cost calculation.
///
/// Any of these aborts the whole calculation; no partial breakdown is produced.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CostCalculatorError {
    /// The request failed validation.
    #[error(transparent)]
    InvalidInput(#[from] InvalidInputError),

    /// The city has no row in an enabled cost table.
    #[error("no {category} cost found for city '{city}'")]
    Lookup {
        category: CostCategory,
        city: String,
    },

    /// No plan bracket covers the requested headcount.
    #[error("no plan bracket covers headcount {0}")]
    NoMatchingBracket(u32),

    /// The conversion constants would divide by zero or flip the sign.
    #[error(
        "conversion constants must be positive, got {hours_per_month} hours per month and \
         exchange rate {usd_to_local_rate}"
    )]
    InvalidConversionConfig {
        hours_per_month: Decimal,
        usd_to_local_rate: Decimal,
    },

    /// A product, sum or quotient left the range `Decimal` can represent.
    /// Holds the cost category, `"total"` or `"hourly"`.
    #[error("{0} cost is too large to represent")]
    Overflow(&'static str),
}

/// Calculator for GCC setup costs.
///
/// Borrows the reference tables for its lifetime and never modifies them, so
/// one set of tables can back any number of calculators.
#[derive(Debug, Clone)]
pub struct CostCalculator<'a> {
    real_estate: &'a CostTable,
    it_infra: &'a CostTable,
    plan_brackets: &'a [PlanBracket],
    config: ConversionConfig,
}

impl<'a> CostCalculator<'a> {
    /// Creates a calculator using the default [`ConversionConfig`].
    ///
    /// Plan brackets are searched in slice order; the first bracket containing
    /// the headcount wins even if a later one also contains it.
    pub fn new(
        real_estate: &'a CostTable,
        it_infra: &'a CostTable,
        plan_brackets: &'a [PlanBracket],
    ) -> Self {
        Self {
            real_estate,
            it_infra,
            plan_brackets,
            config: ConversionConfig::default(),
        }
    }

    pub fn from_tables(tables: &'a ReferenceTables) -> Self {
        Self::new(&tables.real_estate, &tables.it_infra, &tables.plan_brackets)
    }

    /// Replaces the conversion constants used for the hourly rate.
    pub fn with_config(
        mut self,
        config: ConversionConfig,
    ) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &ConversionConfig {
        &self.config
    }

    /// Calculates the cost breakdown for `request`.
    ///
    /// # Errors
    ///
    /// Returns [`CostCalculatorError`] if:
    /// - the headcount is zero or the city is blank
    /// - the conversion constants are not positive
    /// - an enabled cost table has no row for the city
    /// - no plan bracket contains the headcount
    /// - a cost leaves the representable decimal range
    pub fn calculate(
        &self,
        request: &CostRequest,
    ) -> Result<CostBreakdown, CostCalculatorError> {
        self.validate_request(request)?;
        self.validate_config()?;

        let real_estate_cost = if request.toggles.real_estate {
            self.seat_cost(CostCategory::RealEstate, self.real_estate, request)?
        } else {
            Decimal::ZERO
        };

        let it_infra_cost = if request.toggles.it_infra {
            self.seat_cost(CostCategory::ItInfra, self.it_infra, request)?
        } else {
            Decimal::ZERO
        };

        let bracket = self.select_bracket(request.headcount)?;

        let enabling_cost = if request.toggles.enabling {
            bracket.enabling_cost(request.plan)
        } else {
            Decimal::ZERO
        };

        let technology_cost = if request.toggles.technology {
            bracket.technology_cost(request.plan)
        } else {
            Decimal::ZERO
        };

        let total_cost = [it_infra_cost, enabling_cost, technology_cost]
            .into_iter()
            .try_fold(real_estate_cost, Decimal::checked_add)
            .ok_or(CostCalculatorError::Overflow("total"))?;
        let hourly_cost_per_head_usd = self.hourly_cost_per_head(total_cost, request.headcount)?;

        Ok(CostBreakdown {
            real_estate_cost,
            it_infra_cost,
            enabling_cost,
            technology_cost,
            total_cost,
            hourly_cost_per_head_usd,
        })
    }

    fn validate_request(
        &self,
        request: &CostRequest,
    ) -> Result<(), InvalidInputError> {
        if request.headcount == 0 {
            return Err(InvalidInputError::NonPositiveHeadcount(0));
        }
        if request.city.trim().is_empty() {
            return Err(InvalidInputError::MissingCity);
        }
        Ok(())
    }

    fn validate_config(&self) -> Result<(), CostCalculatorError> {
        if self.config.is_valid() {
            Ok(())
        } else {
            Err(CostCalculatorError::InvalidConversionConfig {
                hours_per_month: self.config.hours_per_month,
                usd_to_local_rate: self.config.usd_to_local_rate,
            })
        }
    }

    /// Per-seat monthly cost for the request's city times the headcount.
    fn seat_cost(
        &self,
        category: CostCategory,
        table: &CostTable,
        request: &CostRequest,
    ) -> Result<Decimal, CostCalculatorError> {
        let row = table
            .find_by_city(&request.city)
            .ok_or_else(|| CostCalculatorError::Lookup {
                category,
                city: request.city.clone(),
            })?;

        row.monthly_cost
            .checked_mul(Decimal::from(request.headcount))
            .ok_or(CostCalculatorError::Overflow(category.as_str()))
    }

    /// First bracket, in table order, containing `headcount`.
    fn select_bracket(
        &self,
        headcount: u32,
    ) -> Result<&'a PlanBracket, CostCalculatorError> {
        self.plan_brackets
            .iter()
            .find(|bracket| bracket.contains(headcount))
            .ok_or(CostCalculatorError::NoMatchingBracket(headcount))
    }

    fn hourly_cost_per_head(
        &self,
        total_cost: Decimal,
        headcount: u32,
    ) -> Result<Decimal, CostCalculatorError> {
        total_cost
            .checked_div(Decimal::from(headcount))
            .and_then(|v| v.checked_div(self.config.hours_per_month))
            .and_then(|v| v.checked_div(self.config.usd_to_local_rate))
            .ok_or(CostCalculatorError::Overflow("hourly"))
    }
}

/// Runs a [`CostCalculator`] with the default conversion constants.
pub fn compute(
    request: &CostRequest,
    real_estate: &CostTable,
    it_infra: &CostTable,
    plan_brackets: &[PlanBracket],
) -> Result<CostBreakdown, CostCalculatorError> {
    CostCalculator::new(real_estate, it_infra, plan_brackets).calculate(request)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::calculations::common::round_hourly_rate;
    use crate::models::{ComponentToggles, CostTableRow, Plan};

    fn cost_row(
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

    fn test_real_estate() -> CostTable {
        CostTable::new(
            CostCategory::RealEstate,
            vec![
                cost_row("Tier 1", "CityA", dec!(10000)),
                cost_row("Tier 2", "CityB", dec!(6000)),
            ],
        )
    }

    fn test_it_infra() -> CostTable {
        CostTable::new(
            CostCategory::ItInfra,
            vec![
                cost_row("Tier1", "CityA", dec!(5000)),
                cost_row("Tier 2", "CityB", dec!(3500)),
            ],
        )
    }

    fn bracket(
        min: u32,
        max: u32,
        enabling_basic: Decimal,
        tech_basic: Decimal,
    ) -> PlanBracket {
        PlanBracket {
            min_headcount: min,
            max_headcount: max,
            enabling_cost_basic: enabling_basic,
            enabling_cost_premium: enabling_basic * dec!(2),
            enabling_cost_advance: enabling_basic * dec!(3),
            tech_cost_basic: tech_basic,
            tech_cost_premium: tech_basic * dec!(2),
            tech_cost_advance: tech_basic * dec!(3),
        }
    }

    fn test_brackets() -> Vec<PlanBracket> {
        vec![
            bracket(1, 100, dec!(2000), dec!(3000)),
            bracket(101, 500, dec!(8000), dec!(9000)),
        ]
    }

    fn test_request() -> CostRequest {
        CostRequest {
            headcount: 10,
            city: "CityA".to_string(),
            plan: Plan::Basic,
            toggles: ComponentToggles::all(),
        }
    }

    // =========================================================================
    // seat cost tests
    // =========================================================================

    #[test]
    fn real_estate_cost_scales_with_headcount() {
        let (re, it, brackets) = (test_real_estate(), test_it_infra(), test_brackets());
        let mut request = test_request();
        request.headcount = 37;

        let result = compute(&request, &re, &it, &brackets).unwrap();

        assert_eq!(result.real_estate_cost, dec!(370000));
        assert_eq!(result.it_infra_cost, dec!(185000));
    }

    #[test]
    fn seat_cost_ignores_tier_spelling() {
        // IT table spells the tier "Tier1"; the lookup still matches on city.
        let (re, it, brackets) = (test_real_estate(), test_it_infra(), test_brackets());

        let result = compute(&test_request(), &re, &it, &brackets).unwrap();

        assert_eq!(result.it_infra_cost, dec!(50000));
    }

    #[test]
    fn seat_cost_uses_first_duplicate_city_row() {
        let mut re = test_real_estate();
        re.rows.push(cost_row("Tier 3", "CityA", dec!(1)));
        let (it, brackets) = (test_it_infra(), test_brackets());

        let result = compute(&test_request(), &re, &it, &brackets).unwrap();

        assert_eq!(result.real_estate_cost, dec!(100000));
    }

    #[test]
    fn missing_city_in_real_estate_fails() {
        let (re, it, brackets) = (test_real_estate(), test_it_infra(), test_brackets());
        let mut request = test_request();
        request.city = "Nowhere".to_string();

        let result = compute(&request, &re, &it, &brackets);

        assert_eq!(
            result,
            Err(CostCalculatorError::Lookup {
                category: CostCategory::RealEstate,
                city: "Nowhere".to_string(),
            })
        );
    }

    #[test]
    fn missing_city_in_it_infra_fails_even_when_real_estate_matches() {
        let re = test_real_estate();
        let it = CostTable::new(
            CostCategory::ItInfra,
            vec![cost_row("Tier 2", "CityB", dec!(3500))],
        );
        let brackets = test_brackets();

        let result = compute(&test_request(), &re, &it, &brackets);

        assert_eq!(
            result,
            Err(CostCalculatorError::Lookup {
                category: CostCategory::ItInfra,
                city: "CityA".to_string(),
            })
        );
    }

    #[test]
    fn missing_city_is_ignored_when_table_toggled_off() {
        let (re, it, brackets) = (test_real_estate(), test_it_infra(), test_brackets());
        let mut request = test_request();
        request.city = "Nowhere".to_string();
        request.toggles.real_estate = false;
        request.toggles.it_infra = false;

        let result = compute(&request, &re, &it, &brackets).unwrap();

        assert_eq!(result.real_estate_cost, Decimal::ZERO);
        assert_eq!(result.it_infra_cost, Decimal::ZERO);
        assert_eq!(result.total_cost, dec!(5000));
    }

    #[test]
    fn seat_cost_overflow_is_an_error() {
        let re = CostTable::new(
            CostCategory::RealEstate,
            vec![cost_row("Tier 1", "CityA", dec!(100000000000000000000))],
        );
        let it = test_it_infra();
        let mut request = test_request();
        request.headcount = 4_000_000_000;
        request.toggles = ComponentToggles {
            real_estate: true,
            ..ComponentToggles::none()
        };

        let result = compute(&request, &re, &it, &[]);

        assert_eq!(result, Err(CostCalculatorError::Overflow("real_estate")));
    }

    #[test]
    fn total_overflow_is_an_error() {
        let re = CostTable::new(
            CostCategory::RealEstate,
            vec![cost_row("Tier 1", "CityA", Decimal::MAX)],
        );
        let (it, brackets) = (test_it_infra(), test_brackets());
        let mut request = test_request();
        request.headcount = 1;

        let result = compute(&request, &re, &it, &brackets);

        assert_eq!(result, Err(CostCalculatorError::Overflow("total")));
    }

    // =========================================================================
    // bracket selection tests
    // =========================================================================

    #[test]
    fn bracket_selection_is_inclusive_at_bounds() {
        let (re, it, brackets) = (test_real_estate(), test_it_infra(), test_brackets());
        let mut request = test_request();
        request.toggles = ComponentToggles {
            enabling: true,
            ..ComponentToggles::none()
        };

        request.headcount = 100;
        assert_eq!(
            compute(&request, &re, &it, &brackets).unwrap().enabling_cost,
            dec!(2000)
        );

        request.headcount = 101;
        assert_eq!(
            compute(&request, &re, &it, &brackets).unwrap().enabling_cost,
            dec!(8000)
        );
    }

    #[test]
    fn bracket_selection_prefers_first_overlapping_bracket() {
        let (re, it) = (test_real_estate(), test_it_infra());
        let brackets = vec![
            bracket(1, 50, dec!(1111), dec!(0)),
            bracket(40, 100, dec!(2222), dec!(0)),
        ];
        let mut request = test_request();
        request.headcount = 45;

        for _ in 0..3 {
            let result = compute(&request, &re, &it, &brackets).unwrap();
            assert_eq!(result.enabling_cost, dec!(1111));
        }
    }

    #[test]
    fn headcount_outside_brackets_fails_whole_calculation() {
        let (re, it, brackets) = (test_real_estate(), test_it_infra(), test_brackets());
        let mut request = test_request();
        request.headcount = 501;

        let result = compute(&request, &re, &it, &brackets);

        assert_eq!(result, Err(CostCalculatorError::NoMatchingBracket(501)));
    }

    #[test]
    fn headcount_outside_brackets_fails_even_with_plan_toggles_off() {
        let (re, it, brackets) = (test_real_estate(), test_it_infra(), test_brackets());
        let mut request = test_request();
        request.headcount = 900;
        request.toggles.enabling = false;
        request.toggles.technology = false;

        let result = compute(&request, &re, &it, &brackets);

        assert_eq!(result, Err(CostCalculatorError::NoMatchingBracket(900)));
    }

    #[test]
    fn empty_bracket_table_fails() {
        let (re, it) = (test_real_estate(), test_it_infra());

        let result = compute(&test_request(), &re, &it, &[]);

        assert_eq!(result, Err(CostCalculatorError::NoMatchingBracket(10)));
    }

    // =========================================================================
    // plan cost tests
    // =========================================================================

    #[test]
    fn plan_costs_follow_selected_plan() {
        let (re, it, brackets) = (test_real_estate(), test_it_infra(), test_brackets());
        let mut request = test_request();

        request.plan = Plan::Premium;
        let premium = compute(&request, &re, &it, &brackets).unwrap();
        request.plan = Plan::Advance;
        let advance = compute(&request, &re, &it, &brackets).unwrap();

        assert_eq!(premium.enabling_cost, dec!(4000));
        assert_eq!(premium.technology_cost, dec!(6000));
        assert_eq!(advance.enabling_cost, dec!(6000));
        assert_eq!(advance.technology_cost, dec!(9000));
    }

    #[test]
    fn plan_costs_are_flat_within_bracket() {
        let (re, it, brackets) = (test_real_estate(), test_it_infra(), test_brackets());
        let mut request = test_request();

        request.headcount = 1;
        let small = compute(&request, &re, &it, &brackets).unwrap();
        request.headcount = 99;
        let large = compute(&request, &re, &it, &brackets).unwrap();

        assert_eq!(small.enabling_cost, large.enabling_cost);
        assert_eq!(small.technology_cost, large.technology_cost);
    }

    #[test]
    fn technology_toggle_is_independent_of_enabling() {
        let (re, it, brackets) = (test_real_estate(), test_it_infra(), test_brackets());
        let mut request = test_request();
        request.toggles = ComponentToggles {
            technology: true,
            ..ComponentToggles::none()
        };

        let result = compute(&request, &re, &it, &brackets).unwrap();

        assert_eq!(result.enabling_cost, Decimal::ZERO);
        assert_eq!(result.technology_cost, dec!(3000));
    }

    // =========================================================================
    // validation tests
    // =========================================================================

    #[test]
    fn zero_headcount_is_invalid_input() {
        let (re, it, brackets) = (test_real_estate(), test_it_infra(), test_brackets());
        let mut request = test_request();
        request.headcount = 0;

        let result = compute(&request, &re, &it, &brackets);

        assert_eq!(
            result,
            Err(CostCalculatorError::InvalidInput(
                InvalidInputError::NonPositiveHeadcount(0)
            ))
        );
    }

    #[test]
    fn zero_headcount_is_invalid_even_with_all_toggles_off() {
        let (re, it, brackets) = (test_real_estate(), test_it_infra(), test_brackets());
        let mut request = test_request();
        request.headcount = 0;
        request.toggles = ComponentToggles::none();

        let result = compute(&request, &re, &it, &brackets);

        assert!(matches!(result, Err(CostCalculatorError::InvalidInput(_))));
    }

    #[test]
    fn blank_city_is_invalid_input() {
        let (re, it, brackets) = (test_real_estate(), test_it_infra(), test_brackets());
        let mut request = test_request();
        request.city = " ".to_string();

        let result = compute(&request, &re, &it, &brackets);

        assert_eq!(
            result,
            Err(CostCalculatorError::InvalidInput(
                InvalidInputError::MissingCity
            ))
        );
    }

    #[test]
    fn zero_hours_per_month_is_rejected() {
        let (re, it, brackets) = (test_real_estate(), test_it_infra(), test_brackets());
        let calculator = CostCalculator::new(&re, &it, &brackets).with_config(ConversionConfig {
            hours_per_month: Decimal::ZERO,
            usd_to_local_rate: dec!(85),
        });

        let result = calculator.calculate(&test_request());

        assert_eq!(
            result,
            Err(CostCalculatorError::InvalidConversionConfig {
                hours_per_month: Decimal::ZERO,
                usd_to_local_rate: dec!(85),
            })
        );
    }

    // =========================================================================
    // calculate (integration) tests
    // =========================================================================

    #[test]
    fn calculate_all_components_reference_case() {
        let (re, it, brackets) = (test_real_estate(), test_it_infra(), test_brackets());

        let result = compute(&test_request(), &re, &it, &brackets).unwrap();

        assert_eq!(result.real_estate_cost, dec!(100000));
        assert_eq!(result.it_infra_cost, dec!(50000));
        assert_eq!(result.enabling_cost, dec!(2000));
        assert_eq!(result.technology_cost, dec!(3000));
        assert_eq!(result.total_cost, dec!(155000));
        // (155000 / 10 / 120) / 85 = 1.5196078...
        assert_eq!(
            round_hourly_rate(result.hourly_cost_per_head_usd),
            dec!(1.519608)
        );
    }

    #[test]
    fn calculate_all_toggles_off_is_zero() {
        let (re, it, brackets) = (test_real_estate(), test_it_infra(), test_brackets());
        for plan in Plan::all() {
            for headcount in [1, 50, 100, 250, 500] {
                let request = CostRequest {
                    headcount,
                    city: "CityB".to_string(),
                    plan: *plan,
                    toggles: ComponentToggles::none(),
                };

                let result = compute(&request, &re, &it, &brackets).unwrap();

                assert_eq!(result.total_cost, Decimal::ZERO);
                assert_eq!(result.hourly_cost_per_head_usd, Decimal::ZERO);
            }
        }
    }

    #[test]
    fn calculate_total_is_exact_sum_of_components() {
        let (re, it, brackets) = (test_real_estate(), test_it_infra(), test_brackets());
        let toggle_sets = [
            ComponentToggles::all(),
            ComponentToggles {
                real_estate: true,
                technology: true,
                ..ComponentToggles::none()
            },
            ComponentToggles {
                it_infra: true,
                enabling: true,
                ..ComponentToggles::none()
            },
        ];

        for toggles in toggle_sets {
            for headcount in [3, 77, 333] {
                let request = CostRequest {
                    headcount,
                    city: "CityB".to_string(),
                    plan: Plan::Premium,
                    toggles,
                };

                let result = compute(&request, &re, &it, &brackets).unwrap();

                assert_eq!(
                    result.total_cost,
                    result.real_estate_cost
                        + result.it_infra_cost
                        + result.enabling_cost
                        + result.technology_cost
                );
            }
        }
    }

    #[test]
    fn calculate_with_substituted_conversion_constants() {
        let (re, it, brackets) = (test_real_estate(), test_it_infra(), test_brackets());
        let calculator = CostCalculator::new(&re, &it, &brackets).with_config(ConversionConfig {
            hours_per_month: dec!(100),
            usd_to_local_rate: dec!(50),
        });

        let result = calculator.calculate(&test_request()).unwrap();

        // 155000 / 10 / 100 / 50 = 3.1
        assert_eq!(result.hourly_cost_per_head_usd, dec!(3.1));
    }

    #[test]
    fn calculate_from_reference_tables() {
        let tables = ReferenceTables {
            real_estate: test_real_estate(),
            it_infra: test_it_infra(),
            plan_brackets: test_brackets(),
        };
        let calculator = CostCalculator::from_tables(&tables);

        let result = calculator.calculate(&test_request()).unwrap();

        assert_eq!(result.total_cost, dec!(155000));
        assert_eq!(calculator.config(), &ConversionConfig::default());
    }

    #[test]
    fn lookup_error_message_names_category_and_city() {
        let err = CostCalculatorError::Lookup {
            category: CostCategory::ItInfra,
            city: "Atlantis".to_string(),
        };

        assert_eq!(err.to_string(), "no it_infra cost found for city 'Atlantis'");
    }
}
