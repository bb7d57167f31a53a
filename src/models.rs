// Customer data model. A customer is one spreadsheet row, columns A..L.

use crate::constants::{COLUMN_COUNT, EDIT_COLUMN_COUNT, FIELD_IDS, FIRST_DATA_ROW, HEADER_ROWS};
use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    NearestAccessPoint,
    Name,
    Address,
    Phone,
    Salesperson,
    VisitStatus,
    Notes,
    Status,
    Email,
    Neighborhood,
    VisitDate,
    Priority,
}

impl Field {
    pub const ALL: [Field; COLUMN_COUNT] = [
        Field::NearestAccessPoint,
        Field::Name,
        Field::Address,
        Field::Phone,
        Field::Salesperson,
        Field::VisitStatus,
        Field::Notes,
        Field::Status,
        Field::Email,
        Field::Neighborhood,
        Field::VisitDate,
        Field::Priority,
    ];

    /// 0-based column position.
    pub fn column(self) -> usize {
        self as usize
    }

    pub fn column_letter(self) -> char {
        column_letter(self.column())
    }

    /// Id of the matching input in the add form.
    pub fn dom_id(self) -> &'static str {
        FIELD_IDS[self.column()]
    }
}

/// Fields that must be non-empty for a customer to be added.
pub const REQUIRED_FIELDS: [Field; 5] = [
    Field::NearestAccessPoint,
    Field::Name,
    Field::Address,
    Field::Phone,
    Field::Salesperson,
];

/// Column letter for a 0-based column index (A..Z is all we ever address).
pub fn column_letter(col: usize) -> char {
    debug_assert!(col < 26);
    (b'A' + col as u8) as char
}

/// One customer, always exactly `COLUMN_COUNT` cells wide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerRow {
    cells: Vec<String>,
}

impl Default for CustomerRow {
    fn default() -> Self {
        Self::new()
    }
}

impl CustomerRow {
    pub fn new() -> Self {
        Self {
            cells: vec![String::new(); COLUMN_COUNT],
        }
    }

    /// Build from a raw sheet row. The API drops trailing empty cells, so short
    /// rows are padded; anything past column L is ignored.
    pub fn from_cells<I, S>(cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut row = Self::new();
        for (slot, value) in row.cells.iter_mut().zip(cells) {
            *slot = value.into();
        }
        row
    }

    pub fn get(&self, field: Field) -> &str {
        &self.cells[field.column()]
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        self.cells[field.column()] = value.into().trim().to_string();
    }

    pub fn with(mut self, field: Field, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    /// All 12 values in column order, as sent by the add path.
    pub fn values(&self) -> Vec<String> {
        self.cells.clone()
    }

    /// Columns A..H, as written by the edit path.
    pub fn edit_values(&self) -> Vec<String> {
        self.cells[..EDIT_COLUMN_COUNT].to_vec()
    }

    pub fn missing_required(&self) -> Vec<Field> {
        REQUIRED_FIELDS
            .iter()
            .copied()
            .filter(|f| self.get(*f).trim().is_empty())
            .collect()
    }

    pub fn validate_required(&self) -> Result<(), AppError> {
        let missing = self.missing_required();
        if missing.is_empty() {
            return Ok(());
        }
        let ids: Vec<&str> = missing.iter().map(|f| f.dom_id()).collect();
        Err(AppError::Validation(format!(
            "required fields empty: {}",
            ids.join(", ")
        )))
    }
}

/// A 0-based index into the displayed customer list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayIndex(pub usize);

impl DisplayIndex {
    /// Parse the value of a `data-row-index` attribute or hidden input.
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        raw.trim()
            .parse::<usize>()
            .map(DisplayIndex)
            .map_err(|_| AppError::Validation(format!("invalid row index '{}'", raw)))
    }

    /// 1-based sheet row: header row plus 1-based addressing.
    pub fn sheet_row(self) -> usize {
        self.0 + FIRST_DATA_ROW
    }

    /// End-exclusive 0-based row range covering this row, as used by
    /// `deleteDimension`.
    pub fn dimension_range(self) -> (usize, usize) {
        let start = self.0 + HEADER_ROWS;
        (start, start + 1)
    }
}
