//! Google Sheets v4 surface used by the app.
//!
//! [`SheetsApi`] is the seam between the row operations and the `gapi` JS
//! client ([`gapi::GapiSheets`]); tests substitute an in-memory sheet.

pub mod gapi;

use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::column_letter;

pub use gapi::GapiSheets;

#[allow(async_fn_in_trait)] // single-threaded wasm; futures are never Send
pub trait SheetsApi {
    /// `spreadsheets.values.get`
    async fn get_values(&self, range: &str) -> Result<ValueRange, AppError>;

    /// `spreadsheets.values.update` with `valueInputOption=USER_ENTERED`.
    async fn update_values(&self, range: &str, values: Vec<Vec<String>>) -> Result<(), AppError>;

    /// `spreadsheets.batchUpdate`
    async fn batch_update(&self, request: &BatchUpdateRequest) -> Result<(), AppError>;
}

/// Response (and request body) shape of the `values` endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueRange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub major_dimension: Option<String>,
    /// Omitted by the API when the range is empty.
    #[serde(default)]
    pub values: Vec<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchUpdateRequest {
    pub requests: Vec<Request>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Request {
    DeleteDimension(DeleteDimensionRequest),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteDimensionRequest {
    pub range: DimensionRange,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Dimension {
    Rows,
    Columns,
}

/// 0-based, end-exclusive row or column span on one sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DimensionRange {
    pub sheet_id: i64,
    pub dimension: Dimension,
    pub start_index: usize,
    pub end_index: usize,
}

impl BatchUpdateRequest {
    /// Delete rows `[start, end)` of the sheet with numeric id `sheet_id`.
    pub fn delete_rows(sheet_id: i64, start_index: usize, end_index: usize) -> Self {
        Self {
            requests: vec![Request::DeleteDimension(DeleteDimensionRequest {
                range: DimensionRange {
                    sheet_id,
                    dimension: Dimension::Rows,
                    start_index,
                    end_index,
                },
            })],
        }
    }
}

/// Quote a tab name for A1 notation (`Sheet 1` -> `'Sheet 1'`).
pub fn quote_sheet(name: &str) -> String {
    format!("'{}'", name.replace('\'', "''"))
}

/// `'<sheet>'!A<row>:<last><row>` spanning `columns` columns.
pub fn row_range(sheet: &str, row: usize, columns: usize) -> String {
    let last = column_letter(columns.saturating_sub(1));
    format!("{}!A{}:{}{}", quote_sheet(sheet), row, last, row)
}

/// Open-ended range from `first_row` down, `columns` wide: `'<sheet>'!A2:L`.
pub fn rows_from(sheet: &str, first_row: usize, columns: usize) -> String {
    let last = column_letter(columns.saturating_sub(1));
    format!("{}!A{}:{}", quote_sheet(sheet), first_row, last)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn a1_ranges() {
        assert_eq!(row_range("Clientes", 5, 12), "'Clientes'!A5:L5");
        assert_eq!(row_range("Clientes", 2, 8), "'Clientes'!A2:H2");
        assert_eq!(rows_from("Clientes", 2, 12), "'Clientes'!A2:L");
        assert_eq!(rows_from("Clientes", 2, 1), "'Clientes'!A2:A");
        assert_eq!(quote_sheet("O'Brien"), "'O''Brien'");
    }

    #[test]
    fn delete_rows_matches_batch_update_wire_format() {
        let req = BatchUpdateRequest::delete_rows(0, 1, 2);
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({
                "requests": [{
                    "deleteDimension": {
                        "range": {
                            "sheetId": 0,
                            "dimension": "ROWS",
                            "startIndex": 1,
                            "endIndex": 2
                        }
                    }
                }]
            })
        );
    }

    #[test]
    fn empty_value_range_has_no_values_key() {
        let vr: ValueRange =
            serde_json::from_str(r#"{"range":"'Clientes'!A2:L1000","majorDimension":"ROWS"}"#)
                .unwrap();
        assert!(vr.values.is_empty());
        assert_eq!(vr.major_dimension.as_deref(), Some("ROWS"));
    }
}
