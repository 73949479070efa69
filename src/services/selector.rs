use polars::prelude::*;

use super::excel::types::{CleanSheet, Period};
use crate::error::AppError;

/// Marketing channels tracked by the report, in chart order.
pub const TRACKED_CHANNELS: [&str; 10] =
    ["SP", "MG", "FN", "AT", "JB", "WC", "EB", "HW", "CB", "CM"];

/// Cumulative ad-spend rows overlaid on every chart.
pub const SPEND_ROWS: [&str; 2] = ["ESP Spend", "Sage Spend"];

/// The cleaned, filtered subset of the sheet actually plotted and reported
/// on: one f64 column per extracted row, aligned on the retained periods.
#[derive(Debug, Clone)]
pub struct WorkingTable {
    pub frame: DataFrame,
    pub periods: Vec<Period>,
    /// Tracked channels present in the sheet, in `TRACKED_CHANNELS` order.
    pub channels: Vec<String>,
}

impl WorkingTable {
    pub fn series(&self, label: &str) -> Option<Vec<f64>> {
        let column = self.frame.column(label).ok()?;
        Some(column.f64().ok()?.into_no_null_iter().collect())
    }
}

/// Extracts the tracked channel rows plus the spend rows into a
/// [`WorkingTable`]. A wanted row absent from the sheet is skipped without
/// error; missing cells count as zero. Periods where every tracked channel
/// value is zero are dropped.
pub fn build_working_table(sheet: &CleanSheet) -> Result<WorkingTable, AppError> {
    let mut columns: Vec<Series> = Vec::new();
    let mut channels: Vec<String> = Vec::new();

    for label in TRACKED_CHANNELS.into_iter().chain(SPEND_ROWS) {
        let Some(row) = sheet.row(label) else {
            tracing::warn!("Row {} not found in sheet, skipping", label);
            continue;
        };
        let values: Vec<f64> = row.values.iter().map(|v| v.unwrap_or(0.0)).collect();
        if TRACKED_CHANNELS.contains(&label) {
            channels.push(label.to_string());
        }
        columns.push(Series::new(label, values));
    }

    if columns.is_empty() {
        return Err(AppError::InvalidInput(
            "None of the tracked rows exist in the sheet".to_string(),
        ));
    }
    let frame = DataFrame::new(columns)?;

    let channel_values: Vec<Vec<f64>> = channels
        .iter()
        .filter_map(|c| {
            let column = frame.column(c).ok()?;
            Some(column.f64().ok()?.into_no_null_iter().collect())
        })
        .collect();
    let keep: Vec<bool> = (0..sheet.periods.len())
        .map(|i| channel_values.iter().any(|vals| vals[i] != 0.0))
        .collect();

    let mask = BooleanChunked::from_slice("keep", &keep);
    let frame = frame.filter(&mask)?;
    let periods: Vec<Period> = sheet
        .periods
        .iter()
        .zip(&keep)
        .filter(|(_, keep)| **keep)
        .map(|(p, _)| p.clone())
        .collect();

    tracing::info!(
        "Working table: {} channel(s), {} spend row(s), {} period(s)",
        channels.len(),
        frame.width() - channels.len(),
        periods.len()
    );

    Ok(WorkingTable {
        frame,
        periods,
        channels,
    })
}
