use std::path::Path;

use calamine::{open_workbook, Data, Reader, Xlsx};

use crate::error::AppError;

/// Opens the workbook and reads the named worksheet into raw rows of cells.
/// Any access failure (missing file, missing sheet, unreadable workbook)
/// propagates to the caller.
pub fn load_sheet(path: &Path, sheet_name: &str) -> Result<Vec<Vec<Data>>, AppError> {
    tracing::info!("Opening workbook {}", path.display());
    let mut workbook: Xlsx<_> = open_workbook(path)?;

    if !workbook.sheet_names().iter().any(|n| n == sheet_name) {
        return Err(AppError::SheetNotFound(sheet_name.to_string()));
    }

    let range = workbook.worksheet_range(sheet_name)?;
    let rows: Vec<Vec<Data>> = range.rows().map(|row| row.to_vec()).collect();
    if rows.is_empty() {
        return Err(AppError::InvalidInput(format!(
            "Sheet {} is empty",
            sheet_name
        )));
    }

    tracing::info!("Read {} rows from sheet {}", rows.len(), sheet_name);
    Ok(rows)
}
