mod component_toggles;
mod conversion_config;
mod cost_breakdown;
mod cost_request;
mod cost_table;
mod plan;
mod plan_bracket;
mod reference_tables;

pub use component_toggles::ComponentToggles;
pub use conversion_config::{ConversionConfig, DEFAULT_HOURS_PER_MONTH, DEFAULT_USD_TO_LOCAL_RATE};
pub use cost_breakdown::CostBreakdown;
pub use cost_request::{CostRequest, CostRequestForm, InvalidInputError};
pub use cost_table::{CostCategory, CostTable, CostTableRow};
pub use plan::{Plan, PlanDetails};
pub use plan_bracket::PlanBracket;
pub use reference_tables::ReferenceTables;
