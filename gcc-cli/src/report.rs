//! Plain-text cost report and its downloadable file.
//!
//! The report lists the request, the components included and the monthly
//! breakdown. Monthly amounts are printed as whole currency units and the
//! hourly rate with six decimals; [`parse_report_totals`] reads those figures
//! back from a rendered report.
//!
//! The closing markup note is part of the fixed text. No markup is added to
//! any amount.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use gcc_core::{ComponentToggles, CostBreakdown, CostCategory, CostRequest, Plan};
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::info;

use crate::utils::{
    CURRENCY_SYMBOL, HOURLY_RATE_SYMBOL, format_currency, format_hourly_rate, parse_decimal,
    yes_no,
};

pub const REPORT_TITLE: &str = "GCC SETUP COST REPORT";
pub const MARKUP_NOTE: &str = "NOTE: All costs include a 30% markup for company services.";

const BREAKDOWN_HEADER: &str = "COST BREAKDOWN (Monthly):";
const TOTAL_LABEL: &str = "TOTAL COST";
const HOURLY_LABEL: &str = "HOURLY COST PER HEAD";

/// Build the download filename for a report generated at `generated_at`.
///
/// ```
/// use chrono::NaiveDate;
/// use gcc_cli::report::report_filename;
///
/// let at = NaiveDate::from_ymd_opt(2024, 3, 9)
///     .unwrap()
///     .and_hms_opt(14, 5, 7)
///     .unwrap();
/// assert_eq!(report_filename(&at), "gcc_cost_report_20240309_140507.txt");
/// ```
pub fn report_filename(generated_at: &NaiveDateTime) -> String {
    format!("gcc_cost_report_{}.txt", generated_at.format("%Y%m%d_%H%M%S"))
}

/// Everything printed in one report.
#[derive(Debug, Clone, PartialEq)]
pub struct CostReport {
    pub generated_at: NaiveDateTime,
    pub headcount: u32,
    pub tier: String,
    pub city: String,
    pub plan: Plan,
    pub toggles: ComponentToggles,
    pub breakdown: CostBreakdown,
}

impl CostReport {
    pub fn new(
        request: &CostRequest,
        tier: impl Into<String>,
        breakdown: CostBreakdown,
        generated_at: NaiveDateTime,
    ) -> Self {
        Self {
            generated_at,
            headcount: request.headcount,
            tier: tier.into(),
            city: request.city.clone(),
            plan: request.plan,
            toggles: request.toggles,
            breakdown,
        }
    }

    /// The full report text, ending with a newline.
    pub fn render(&self) -> String {
        self.to_string()
    }

    pub fn filename(&self) -> String {
        report_filename(&self.generated_at)
    }

    /// Write the rendered report into `dir` under [`CostReport::filename`].
    ///
    /// The directory must already exist. Returns the path written.
    pub fn write_to_dir(
        &self,
        dir: &Path,
    ) -> io::Result<PathBuf> {
        let path = dir.join(self.filename());
        fs::write(&path, self.render())?;
        info!(path = %path.display(), "report written");
        Ok(path)
    }
}

impl fmt::Display for CostReport {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        writeln!(f, "{REPORT_TITLE}")?;
        writeln!(
            f,
            "Generated on: {}",
            self.generated_at.format("%Y-%m-%d %H:%M:%S")
        )?;
        writeln!(f)?;

        writeln!(f, "CONFIGURATION:")?;
        writeln!(f, "- Headcount: {}", self.headcount)?;
        writeln!(f, "- Tier: {}", self.tier)?;
        writeln!(f, "- City: {}", self.city)?;
        writeln!(f, "- Plan: {}", self.plan)?;
        writeln!(f)?;

        writeln!(f, "COMPONENTS INCLUDED:")?;
        for category in CostCategory::all() {
            writeln!(
                f,
                "- {}: {}",
                category.label(),
                yes_no(self.toggles.is_enabled(*category))
            )?;
        }
        writeln!(f)?;

        writeln!(f, "{BREAKDOWN_HEADER}")?;
        for category in CostCategory::all() {
            writeln!(
                f,
                "- {}: {}",
                category.label(),
                format_currency(self.breakdown.category_cost(*category))
            )?;
        }
        writeln!(
            f,
            "- {TOTAL_LABEL}: {}",
            format_currency(self.breakdown.total_cost)
        )?;
        writeln!(f)?;

        writeln!(
            f,
            "{HOURLY_LABEL}: {}",
            format_hourly_rate(self.breakdown.hourly_cost_per_head_usd)
        )?;
        writeln!(f)?;
        writeln!(f, "{MARKUP_NOTE}")
    }
}

/// The numeric figures of a rendered report, as printed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportTotals {
    pub real_estate_cost: Decimal,
    pub it_infra_cost: Decimal,
    pub enabling_cost: Decimal,
    pub technology_cost: Decimal,
    pub total_cost: Decimal,
    pub hourly_cost_per_head_usd: Decimal,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReportParseError {
    #[error("report has no '{0}' line")]
    MissingLine(String),

    #[error("invalid amount '{value}' on '{label}' line")]
    InvalidAmount { label: String, value: String },
}

/// Read the breakdown figures back from text produced by [`CostReport::render`].
///
/// Lines are matched by label after leading whitespace is stripped, so an
/// indented copy of a report parses as well.
pub fn parse_report_totals(text: &str) -> Result<ReportTotals, ReportParseError> {
    let lines: Vec<&str> = text.lines().map(str::trim_start).collect();
    let breakdown_start = lines
        .iter()
        .position(|line| line.trim_end() == BREAKDOWN_HEADER)
        .ok_or_else(|| ReportParseError::MissingLine(BREAKDOWN_HEADER.to_string()))?;
    let breakdown = &lines[breakdown_start + 1..];

    let amount = |label: &str| -> Result<Decimal, ReportParseError> {
        let prefix = format!("- {label}: ");
        let value = labelled_value(breakdown, &prefix)
            .ok_or_else(|| ReportParseError::MissingLine(label.to_string()))?;
        parse_amount(label, value, CURRENCY_SYMBOL)
    };

    let hourly_prefix = format!("{HOURLY_LABEL}: ");
    let hourly = labelled_value(breakdown, &hourly_prefix)
        .ok_or_else(|| ReportParseError::MissingLine(HOURLY_LABEL.to_string()))?;

    Ok(ReportTotals {
        real_estate_cost: amount(CostCategory::RealEstate.label())?,
        it_infra_cost: amount(CostCategory::ItInfra.label())?,
        enabling_cost: amount(CostCategory::Enabling.label())?,
        technology_cost: amount(CostCategory::Technology.label())?,
        total_cost: amount(TOTAL_LABEL)?,
        hourly_cost_per_head_usd: parse_amount(HOURLY_LABEL, hourly, HOURLY_RATE_SYMBOL)?,
    })
}

fn labelled_value<'a>(
    lines: &[&'a str],
    prefix: &str,
) -> Option<&'a str> {
    lines
        .iter()
        .copied()
        .find_map(|line| line.strip_prefix(prefix))
        .map(str::trim)
}

fn parse_amount(
    label: &str,
    value: &str,
    symbol: &str,
) -> Result<Decimal, ReportParseError> {
    let invalid = || ReportParseError::InvalidAmount {
        label: label.to_string(),
        value: value.to_string(),
    };
    let (negative, unsigned) = match value.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, value),
    };
    let digits = unsigned.strip_prefix(symbol).ok_or_else(invalid)?;
    // Blank input would otherwise parse as zero.
    if !digits.starts_with(|c: char| c.is_ascii_digit()) {
        return Err(invalid());
    }
    let amount = parse_decimal(digits).map_err(|_| invalid())?;
    Ok(if negative { -amount } else { amount })
}
