//! Customer row operations against a [`SheetsApi`].
//!
//! Each operation issues the remote call(s) for one already-validated form
//! submission. Reporting and the follow-up refresh are the caller's job (see
//! `command_executors.rs`).

use crate::constants::{COLUMN_COUNT, EDIT_COLUMN_COUNT, FIRST_DATA_ROW};
use crate::debug_log;
use crate::error::AppError;
use crate::models::{CustomerRow, DisplayIndex};
use crate::sheets::{row_range, rows_from, BatchUpdateRequest, SheetsApi};

/// Write `row` into the first row after the existing data.
///
/// Reads column A to count data rows, then writes A..L at `count + 2`. Two
/// concurrent writers can pick the same row; there is no lock on the sheet.
pub async fn add_customer<S: SheetsApi>(
    api: &S,
    sheet: &str,
    row: &CustomerRow,
) -> Result<usize, AppError> {
    let existing = api.get_values(&rows_from(sheet, FIRST_DATA_ROW, 1)).await?;
    let target = existing.values.len() + FIRST_DATA_ROW;
    debug_log!("appending customer at sheet row {}", target);
    api.update_values(&row_range(sheet, target, COLUMN_COUNT), vec![row.values()])
        .await?;
    Ok(target)
}

/// Overwrite columns A..H of the displayed row `index`.
pub async fn edit_customer<S: SheetsApi>(
    api: &S,
    sheet: &str,
    index: DisplayIndex,
    row: &CustomerRow,
) -> Result<usize, AppError> {
    let target = index.sheet_row();
    api.update_values(
        &row_range(sheet, target, EDIT_COLUMN_COUNT),
        vec![row.edit_values()],
    )
    .await?;
    Ok(target)
}

/// Remove the displayed row `index` from the sheet with numeric id `sheet_id`.
pub async fn delete_customer<S: SheetsApi>(
    api: &S,
    sheet_id: i64,
    index: DisplayIndex,
) -> Result<(), AppError> {
    let (start, end) = index.dimension_range();
    api.batch_update(&BatchUpdateRequest::delete_rows(sheet_id, start, end))
        .await
}

/// All customer rows below the header, padded to full width.
pub async fn fetch_customers<S: SheetsApi>(
    api: &S,
    sheet: &str,
) -> Result<Vec<CustomerRow>, AppError> {
    let range = api
        .get_values(&rows_from(sheet, FIRST_DATA_ROW, COLUMN_COUNT))
        .await?;
    Ok(range.values.into_iter().map(CustomerRow::from_cells).collect())
}
