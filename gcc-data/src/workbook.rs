//! Single-file TOML workbook holding all three reference sheets.
//!
//! Each sheet is an array of tables named after the sheet, with the same
//! column names the CSV files use as keys:
//!
//! ```toml
//! [[Real_Estate]]
//! Tier = "Tier 1"
//! City = "Mumbai"
//! Cost_INR_PM = 16000
//!
//! [[IT_Infra]]
//! Tier = "Tier 1"
//! City = "Mumbai"
//! Cost_INR_PM = 5500
//!
//! [[Plans]]
//! MinHC = 1
//! MaxHC = 50
//! Enab_Basic = 150000
//! Enab_Premium = 250000
//! Enab_Advance = 350000
//! Tech_Basic = 50000
//! Tech_Premium = 90000
//! Tech_Advance = 140000
//! ```
//!
//! Unknown top-level keys are ignored.

use gcc_core::{CostTableRow, PlanBracket, ReferenceDataError, ReferenceTables};
use serde::de::DeserializeOwned;

use crate::loader::{
    COST_SHEET_COLUMNS, CostSheetRecord, IT_INFRA_SHEET, PLANS_SHEET, PLANS_SHEET_COLUMNS,
    PlanSheetRecord, REAL_ESTATE_SHEET, ReferenceDataLoader, parse_error,
};

/// Parse a complete workbook and assemble the reference tables.
pub fn parse_workbook(text: &str) -> Result<ReferenceTables, ReferenceDataError> {
    let workbook: toml::Table = text
        .parse()
        .map_err(|e: toml::de::Error| parse_error("workbook", e.message()))?;

    let real_estate = parse_cost_sheet(&workbook, REAL_ESTATE_SHEET)?;
    let it_infra = parse_cost_sheet(&workbook, IT_INFRA_SHEET)?;
    let plan_brackets = sheet_records::<PlanSheetRecord>(&workbook, PLANS_SHEET, PLANS_SHEET_COLUMNS)?
        .into_iter()
        .map(PlanBracket::from)
        .collect();

    Ok(ReferenceDataLoader::assemble(
        real_estate,
        it_infra,
        plan_brackets,
    ))
}

fn parse_cost_sheet(
    workbook: &toml::Table,
    sheet: &str,
) -> Result<Vec<CostTableRow>, ReferenceDataError> {
    sheet_records::<CostSheetRecord>(workbook, sheet, COST_SHEET_COLUMNS)?
        .into_iter()
        .enumerate()
        .map(|(idx, record)| ReferenceDataLoader::cost_row(sheet, record, idx + 1))
        .collect()
}

/// Deserialize every row of `sheet`, checking columns row by row.
fn sheet_records<T: DeserializeOwned>(
    workbook: &toml::Table,
    sheet: &str,
    required: &[&str],
) -> Result<Vec<T>, ReferenceDataError> {
    let rows = workbook
        .get(sheet)
        .ok_or_else(|| ReferenceDataError::NotFound(format!("{sheet} sheet in workbook")))?
        .as_array()
        .ok_or_else(|| parse_error(sheet, "expected an array of tables"))?;

    rows.iter()
        .enumerate()
        .map(|(idx, row)| {
            let table = row
                .as_table()
                .ok_or_else(|| parse_error(sheet, format!("row {} is not a table", idx + 1)))?;
            ReferenceDataLoader::check_columns(sheet, table.keys().map(String::as_str), required)?;
            let record: T = row
                .clone()
                .try_into()
                .map_err(|e: toml::de::Error| {
                    parse_error(sheet, format!("row {}: {}", idx + 1, e.message()))
                })?;
            Ok(record)
        })
        .collect()
}
