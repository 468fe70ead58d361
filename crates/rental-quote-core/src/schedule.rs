//! 12-month budget schedule and its CSV file.
//!
//! Rows are always computed in full in memory before anything touches the
//! filesystem, so a failed run never leaves a partial file behind.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Local;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::contract::clamp_installments;
use crate::error::RentalQuoteError;
use crate::types::{format_money, round_money, Money};
use crate::RentalQuoteResult;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

pub const SCHEDULE_MONTHS: u32 = 12;
pub const DEFAULT_OUTPUT_DIR: &str = "output";
pub const CSV_HEADER: [&str; 4] = ["month", "rent", "contract_installment", "total_for_month"];

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// One month of the budget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleRow {
    /// Month number (1-indexed)
    pub month: u32,
    pub rent: Money,
    /// Contract fee share due this month, zero after the last installment
    pub contract_installment: Money,
    pub total_for_month: Money,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Build the 12 schedule rows, month 1 first.
///
/// The first `installments_count` months (clamped to 1..=5) carry
/// `installment_value`; the rest carry zero.
pub fn generate_schedule(
    monthly_rent: Money,
    installment_value: Money,
    installments_count: u32,
) -> Vec<ScheduleRow> {
    let installments = clamp_installments(i32::try_from(installments_count).unwrap_or(i32::MAX));
    (1..=SCHEDULE_MONTHS)
        .map(|month| {
            let contract_installment = if month <= installments {
                installment_value
            } else {
                dec!(0.00)
            };
            ScheduleRow {
                month,
                rent: monthly_rent,
                contract_installment,
                total_for_month: round_money(monthly_rent + contract_installment),
            }
        })
        .collect()
}

/// Sum of every month's total.
pub fn schedule_total(rows: &[ScheduleRow]) -> Money {
    rows.iter().map(|r| r.total_for_month).sum()
}

/// Serialize rows as CSV into `writer`, header first.
pub fn write_csv<W: Write>(rows: &[ScheduleRow], writer: W) -> RentalQuoteResult<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(CSV_HEADER)?;
    for row in rows {
        wtr.write_record([
            row.month.to_string(),
            format_money(row.rent),
            format_money(row.contract_installment),
            format_money(row.total_for_month),
        ])?;
    }
    wtr.flush()
        .map_err(|e| RentalQuoteError::SerializationError(e.to_string()))?;
    Ok(())
}

/// Render rows to a CSV string.
pub fn render_csv(rows: &[ScheduleRow]) -> RentalQuoteResult<String> {
    let mut buffer = Vec::new();
    write_csv(rows, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| RentalQuoteError::SerializationError(e.to_string()))
}

/// Default file name, e.g. `orcamento_20261019_143005.csv`.
pub fn default_filename() -> String {
    format!("orcamento_{}.csv", Local::now().format("%Y%m%d_%H%M%S"))
}

/// Write the schedule to `output_dir/filename`, creating the directory if
/// needed. Returns the path written.
pub fn to_csv(
    rows: &[ScheduleRow],
    output_dir: &Path,
    filename: Option<&str>,
) -> RentalQuoteResult<PathBuf> {
    let contents = render_csv(rows)?;

    let name = match filename {
        Some(name) => name.to_string(),
        None => default_filename(),
    };
    let path = output_dir.join(name);

    fs::create_dir_all(output_dir).map_err(|e| write_failure(output_dir, e))?;
    debug!(dir = %output_dir.display(), "output directory ready");

    fs::write(&path, contents).map_err(|e| write_failure(&path, e))?;
    info!(path = %path.display(), rows = rows.len(), "schedule written");

    Ok(path)
}

fn write_failure(path: &Path, e: std::io::Error) -> RentalQuoteError {
    RentalQuoteError::FileWriteFailure {
        path: path.display().to_string(),
        reason: e.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
