use std::io::Read;
use std::sync::LazyLock;

use gcc_core::{
    CostCategory, CostTable, CostTableRow, PlanBracket, ReferenceDataError, ReferenceTables,
};
use regex::Regex;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::{info, warn};

pub const REAL_ESTATE_SHEET: &str = "Real_Estate";
pub const IT_INFRA_SHEET: &str = "IT_Infra";
pub const PLANS_SHEET: &str = "Plans";

/// Columns both per-seat cost sheets must carry.
pub const COST_SHEET_COLUMNS: &[&str] = &["Tier", "City", "Cost_INR_PM"];

/// Columns the plan bracket sheet must carry.
pub const PLANS_SHEET_COLUMNS: &[&str] = &[
    "MinHC",
    "MaxHC",
    "Enab_Basic",
    "Enab_Premium",
    "Enab_Advance",
    "Tech_Basic",
    "Tech_Premium",
    "Tech_Advance",
];

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));
static TIER_NAME: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^Tier \d+$").expect("valid regex"));

/// Normalizes a tier label to the canonical `"Tier N"` form.
///
/// Runs of whitespace are collapsed and the ends trimmed. If the result reads
/// `Tier <digits>` it is returned; any other value comes back unchanged.
///
/// ```
/// use gcc_data::clean_tier_name;
///
/// assert_eq!(clean_tier_name("  Tier   2 "), "Tier 2");
/// assert_eq!(clean_tier_name(" Metro "), " Metro ");
/// ```
pub fn clean_tier_name(tier: &str) -> String {
    let collapsed = WHITESPACE.replace_all(tier.trim(), " ");
    if TIER_NAME.is_match(&collapsed) {
        collapsed.into_owned()
    } else {
        tier.to_string()
    }
}

/// A single row of the `Real_Estate` or `IT_Infra` sheet.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct CostSheetRecord {
    #[serde(rename = "Tier")]
    pub tier: String,
    #[serde(rename = "City")]
    pub city: String,
    #[serde(rename = "Cost_INR_PM")]
    pub cost_inr_pm: Decimal,
}

/// A single row of the `Plans` sheet.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct PlanSheetRecord {
    #[serde(rename = "MinHC")]
    pub min_hc: u32,
    #[serde(rename = "MaxHC")]
    pub max_hc: u32,
    #[serde(rename = "Enab_Basic")]
    pub enab_basic: Decimal,
    #[serde(rename = "Enab_Premium")]
    pub enab_premium: Decimal,
    #[serde(rename = "Enab_Advance")]
    pub enab_advance: Decimal,
    #[serde(rename = "Tech_Basic")]
    pub tech_basic: Decimal,
    #[serde(rename = "Tech_Premium")]
    pub tech_premium: Decimal,
    #[serde(rename = "Tech_Advance")]
    pub tech_advance: Decimal,
}

impl From<PlanSheetRecord> for PlanBracket {
    fn from(record: PlanSheetRecord) -> Self {
        PlanBracket {
            min_headcount: record.min_hc,
            max_headcount: record.max_hc,
            enabling_cost_basic: record.enab_basic,
            enabling_cost_premium: record.enab_premium,
            enabling_cost_advance: record.enab_advance,
            tech_cost_basic: record.tech_basic,
            tech_cost_premium: record.tech_premium,
            tech_cost_advance: record.tech_advance,
        }
    }
}

pub(crate) fn parse_error(
    sheet: &str,
    message: impl ToString,
) -> ReferenceDataError {
    ReferenceDataError::Parse {
        sheet: sheet.to_string(),
        message: message.to_string(),
    }
}

/// Parser and validator for the reference-data sheets.
///
/// The sheet parsers are format-specific (CSV here, TOML in
/// [`crate::workbook`]); column checks, record conversion and the
/// anomaly report are shared.
pub struct ReferenceDataLoader;

impl ReferenceDataLoader {
    /// Verify that every `required` column is present.
    ///
    /// All missing columns are reported together, in `required` order.
    pub fn check_columns<'a, I>(
        sheet: &str,
        present: I,
        required: &[&str],
    ) -> Result<(), ReferenceDataError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let present: Vec<&str> = present.into_iter().collect();
        let missing: Vec<String> = required
            .iter()
            .filter(|column| !present.contains(*column))
            .map(|column| column.to_string())
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(ReferenceDataError::MissingColumns {
                sheet: sheet.to_string(),
                missing,
            })
        }
    }

    /// Turn a cost sheet record into a table row, normalizing the tier.
    ///
    /// `row` is 1-based (header excluded) and only used for messages.
    pub fn cost_row(
        sheet: &str,
        record: CostSheetRecord,
        row: usize,
    ) -> Result<CostTableRow, ReferenceDataError> {
        if record.cost_inr_pm < Decimal::ZERO {
            return Err(parse_error(
                sheet,
                format!(
                    "row {row}: Cost_INR_PM must not be negative, got {}",
                    record.cost_inr_pm
                ),
            ));
        }

        Ok(CostTableRow {
            tier: clean_tier_name(&record.tier),
            city: record.city,
            monthly_cost: record.cost_inr_pm,
        })
    }

    /// Parse a `Real_Estate` or `IT_Infra` sheet from CSV.
    pub fn parse_cost_sheet<R: Read>(
        sheet: &str,
        reader: R,
    ) -> Result<Vec<CostTableRow>, ReferenceDataError> {
        let mut csv_reader = csv_reader(reader);
        let headers = csv_reader
            .headers()
            .map_err(|e| parse_error(sheet, e))?
            .clone();
        Self::check_columns(sheet, headers.iter(), COST_SHEET_COLUMNS)?;

        csv_reader
            .deserialize::<CostSheetRecord>()
            .enumerate()
            .map(|(idx, result)| {
                let record = result.map_err(|e| parse_error(sheet, e))?;
                Self::cost_row(sheet, record, idx + 1)
            })
            .collect()
    }

    /// Parse the `Plans` sheet from CSV. Brackets keep file order.
    pub fn parse_plans_sheet<R: Read>(reader: R) -> Result<Vec<PlanBracket>, ReferenceDataError> {
        let mut csv_reader = csv_reader(reader);
        let headers = csv_reader
            .headers()
            .map_err(|e| parse_error(PLANS_SHEET, e))?
            .clone();
        Self::check_columns(PLANS_SHEET, headers.iter(), PLANS_SHEET_COLUMNS)?;

        csv_reader
            .deserialize::<PlanSheetRecord>()
            .map(|result| {
                result
                    .map(PlanBracket::from)
                    .map_err(|e| parse_error(PLANS_SHEET, e))
            })
            .collect()
    }

    /// Bundle parsed sheets into [`ReferenceTables`] and log what was loaded.
    ///
    /// Anomalies are logged but never rejected: lookups keep their
    /// first-match behaviour.
    pub fn assemble(
        real_estate: Vec<CostTableRow>,
        it_infra: Vec<CostTableRow>,
        plan_brackets: Vec<PlanBracket>,
    ) -> ReferenceTables {
        let tables = ReferenceTables {
            real_estate: CostTable::new(CostCategory::RealEstate, real_estate),
            it_infra: CostTable::new(CostCategory::ItInfra, it_infra),
            plan_brackets,
        };

        for anomaly in Self::anomalies(&tables) {
            warn!("{anomaly}");
        }
        info!(
            real_estate_rows = tables.real_estate.rows().len(),
            it_infra_rows = tables.it_infra.rows().len(),
            plan_brackets = tables.plan_brackets.len(),
            "reference data loaded"
        );

        tables
    }

    /// Human-readable descriptions of rows that lookups will shadow or skip.
    pub fn anomalies(tables: &ReferenceTables) -> Vec<String> {
        let mut found = Vec::new();

        for (sheet, table) in [
            (REAL_ESTATE_SHEET, &tables.real_estate),
            (IT_INFRA_SHEET, &tables.it_infra),
        ] {
            for city in table.duplicate_cities() {
                found.push(format!(
                    "{sheet}: city '{city}' appears more than once; only the first row is used"
                ));
            }
        }

        for (idx, bracket) in tables.plan_brackets.iter().enumerate() {
            if bracket.is_inverted() {
                found.push(format!(
                    "{PLANS_SHEET}: bracket {} has MinHC {} above MaxHC {} and never matches",
                    idx + 1,
                    bracket.min_headcount,
                    bracket.max_headcount
                ));
            }
        }

        for (earlier, later) in tables.overlapping_brackets() {
            found.push(format!(
                "{PLANS_SHEET}: brackets {} and {} overlap; bracket {} wins for shared headcounts",
                earlier + 1,
                later + 1,
                earlier + 1
            ));
        }

        found
    }
}

fn csv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader)
}
