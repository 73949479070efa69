use calamine::Data;

use super::types::{CategoryRow, CleanSheet, Period};
use super::utils::{cell_to_label, cell_to_number, header_to_period};
use crate::error::AppError;

/// Normalizes raw sheet rows into a [`CleanSheet`]: the first column becomes
/// the row index, headers that are not dates (or are unnamed placeholders)
/// are discarded, cell values are coerced to numbers, rows with no numeric
/// value at all are dropped, and periods end up sorted chronologically.
///
/// Malformed date headers are excluded without signaling an error.
pub fn clean_sheet(rows: Vec<Vec<Data>>) -> Result<CleanSheet, AppError> {
    let header = rows
        .first()
        .ok_or_else(|| AppError::InvalidInput("Sheet has no header row".to_string()))?;

    let mut period_cols: Vec<(usize, Period)> = header
        .iter()
        .enumerate()
        .skip(1)
        .filter_map(|(idx, cell)| header_to_period(cell).map(|p| (idx, p)))
        .collect();
    period_cols.sort_by_key(|(_, p)| p.date);

    if period_cols.is_empty() {
        return Err(AppError::InvalidInput(
            "No period columns found in header row".to_string(),
        ));
    }
    let dropped = header.len().saturating_sub(1) - period_cols.len();
    if dropped > 0 {
        tracing::debug!("Dropped {} non-period header column(s)", dropped);
    }

    let mut out_rows = Vec::new();
    for row in rows.iter().skip(1) {
        let label = match row.first() {
            Some(cell) => cell_to_label(cell),
            None => continue,
        };
        if label.is_empty() {
            continue;
        }

        let values: Vec<Option<f64>> = period_cols
            .iter()
            .map(|(idx, _)| row.get(*idx).and_then(cell_to_number))
            .collect();
        if values.iter().all(Option::is_none) {
            continue;
        }
        out_rows.push(CategoryRow { label, values });
    }

    tracing::info!(
        "Cleaned sheet: {} row(s) over {} period(s)",
        out_rows.len(),
        period_cols.len()
    );

    Ok(CleanSheet {
        periods: period_cols.into_iter().map(|(_, p)| p).collect(),
        rows: out_rows,
    })
}
