use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use gcc_core::{ReferenceDataError, ReferenceDataProvider, ReferenceTables};
use tracing::debug;

use crate::loader::{IT_INFRA_SHEET, PLANS_SHEET, REAL_ESTATE_SHEET, ReferenceDataLoader};
use crate::workbook::parse_workbook;

async fn read_source(path: &Path) -> Result<String, ReferenceDataError> {
    debug!(path = %path.display(), "reading reference data");
    tokio::fs::read_to_string(path).await.map_err(|e| match e.kind() {
        ErrorKind::NotFound => ReferenceDataError::NotFound(path.display().to_string()),
        _ => ReferenceDataError::Io(format!("{}: {e}", path.display())),
    })
}

/// Reads `Real_Estate.csv`, `IT_Infra.csv` and `Plans.csv` from a directory.
///
/// Files are re-read on every [`ReferenceDataProvider::get_tables`] call, so
/// edits to the sheets take effect on the next calculation.
#[derive(Debug, Clone)]
pub struct CsvDirectoryProvider {
    dir: PathBuf,
}

impl CsvDirectoryProvider {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn sheet_path(
        &self,
        sheet: &str,
    ) -> PathBuf {
        self.dir.join(format!("{sheet}.csv"))
    }
}

#[async_trait]
impl ReferenceDataProvider for CsvDirectoryProvider {
    async fn get_tables(&self) -> Result<ReferenceTables, ReferenceDataError> {
        let real_estate_csv = read_source(&self.sheet_path(REAL_ESTATE_SHEET)).await?;
        let it_infra_csv = read_source(&self.sheet_path(IT_INFRA_SHEET)).await?;
        let plans_csv = read_source(&self.sheet_path(PLANS_SHEET)).await?;

        let real_estate =
            ReferenceDataLoader::parse_cost_sheet(REAL_ESTATE_SHEET, real_estate_csv.as_bytes())?;
        let it_infra =
            ReferenceDataLoader::parse_cost_sheet(IT_INFRA_SHEET, it_infra_csv.as_bytes())?;
        let plan_brackets = ReferenceDataLoader::parse_plans_sheet(plans_csv.as_bytes())?;

        Ok(ReferenceDataLoader::assemble(
            real_estate,
            it_infra,
            plan_brackets,
        ))
    }
}

/// Reads all three sheets from one TOML workbook file.
#[derive(Debug, Clone)]
pub struct TomlWorkbookProvider {
    path: PathBuf,
}

impl TomlWorkbookProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl ReferenceDataProvider for TomlWorkbookProvider {
    async fn get_tables(&self) -> Result<ReferenceTables, ReferenceDataError> {
        let text = read_source(&self.path).await?;
        parse_workbook(&text)
    }
}
