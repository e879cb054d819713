//! Conversion of Gherkin data tables into POS records.
//!
//! The first row is a header naming the columns; every further row is one
//! POS. Column order is free, but all of `name`, `description`, `type`,
//! `campus`, `street`, `houseNumber`, `postalCode` and `city` must be
//! present.

use thiserror::Error;

use campus_coffee_core::{CampusType, PosDto, PosType};

/// Column names expected in a POS data table.
pub const COLUMNS: [&str; 8] = [
    "name",
    "description",
    "type",
    "campus",
    "street",
    "houseNumber",
    "postalCode",
    "city",
];

/// Errors raised while reading a POS data table.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TableError {
    /// The table has no header row.
    #[error("data table is empty")]
    Empty,

    /// A required column is absent from the header.
    #[error("data table has no '{0}' column")]
    MissingColumn(&'static str),

    /// A data row is shorter than the header.
    #[error("row {row} has {len} cells, expected {expected}")]
    ShortRow {
        row: usize,
        len: usize,
        expected: usize,
    },

    /// A cell could not be parsed.
    #[error("row {row}, column '{column}': invalid value '{value}'")]
    InvalidValue {
        row: usize,
        column: &'static str,
        value: String,
    },
}

/// Resolved column positions.
struct Layout([usize; COLUMNS.len()]);

impl Layout {
    fn from_header(header: &[String]) -> Result<Self, TableError> {
        let mut positions = [0; COLUMNS.len()];
        for (slot, column) in positions.iter_mut().zip(COLUMNS) {
            *slot = header
                .iter()
                .position(|cell| cell.trim() == column)
                .ok_or(TableError::MissingColumn(column))?;
        }
        Ok(Self(positions))
    }

    fn width(&self) -> usize {
        self.0.iter().copied().max().map_or(0, |max| max + 1)
    }
}

/// Build POS records from the rows of a data table, header included.
///
/// Cells are taken verbatim except for `type`, `campus` and `postalCode`,
/// which are trimmed before parsing.
///
/// # Errors
///
/// Returns `TableError` if the header is missing a column or a cell cannot
/// be parsed.
pub fn pos_list_from_rows(rows: &[Vec<String>]) -> Result<Vec<PosDto>, TableError> {
    let (header, body) = rows.split_first().ok_or(TableError::Empty)?;
    let layout = Layout::from_header(header)?;
    let width = layout.width();

    body.iter()
        .enumerate()
        .map(|(index, cells)| {
            let row = index + 1;
            if cells.len() < width {
                return Err(TableError::ShortRow {
                    row,
                    len: cells.len(),
                    expected: width,
                });
            }
            pos_from_cells(row, &layout, cells)
        })
        .collect()
}

fn pos_from_cells(row: usize, layout: &Layout, cells: &[String]) -> Result<PosDto, TableError> {
    let [name, description, pos_type, campus, street, house_number, postal_code, city] =
        layout.0.map(|position| cells.get(position).map_or("", String::as_str));

    let invalid = |column: &'static str, value: &str| TableError::InvalidValue {
        row,
        column,
        value: value.to_owned(),
    };

    Ok(PosDto {
        id: None,
        created_at: None,
        updated_at: None,
        name: name.to_owned(),
        description: description.to_owned(),
        pos_type: pos_type
            .trim()
            .parse::<PosType>()
            .map_err(|e| invalid("type", e.value()))?,
        campus: campus
            .trim()
            .parse::<CampusType>()
            .map_err(|e| invalid("campus", e.value()))?,
        street: street.to_owned(),
        house_number: house_number.to_owned(),
        postal_code: postal_code
            .trim()
            .parse::<i32>()
            .map_err(|_| invalid("postalCode", postal_code))?,
        city: city.to_owned(),
    })
}
