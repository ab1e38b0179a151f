//! Named-column sheets and row lookup

use crate::{CellValue, PriceTableError, Result};
use std::collections::{HashMap, HashSet};

/// Column holding the row key for every pricing sheet
pub const SIZE_COLUMN: &str = "SYSTEM SIZE";

/// Normalize a column header for lookups
///
/// Trims, collapses internal whitespace runs to one space and uppercases, so
/// `" Inverter  size "` and `"INVERTER SIZE"` name the same column.
pub fn normalize_header(header: &str) -> String {
    header
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_uppercase()
}

/// One sheet of the pricing workbook
#[derive(Debug, Clone)]
pub struct PriceSheet {
    name: String,
    /// Display names (trimmed) in column order
    columns: Vec<String>,
    /// Normalized header -> column index
    index: HashMap<String, usize>,
    rows: Vec<Vec<CellValue>>,
}

impl PriceSheet {
    /// Build a sheet from a header row and data rows
    ///
    /// Blank headers become `Unnamed: <index>`. Headers that normalize to the
    /// same key are rejected. Data rows that are entirely empty are dropped,
    /// short rows are padded with [`CellValue::Empty`].
    pub fn new(
        name: impl Into<String>,
        headers: Vec<String>,
        rows: Vec<Vec<CellValue>>,
    ) -> Result<Self> {
        let name = name.into();
        let mut columns = Vec::with_capacity(headers.len());
        let mut index = HashMap::with_capacity(headers.len());

        for (i, header) in headers.iter().enumerate() {
            let display = match header.trim() {
                "" => format!("Unnamed: {i}"),
                trimmed => trimmed.to_string(),
            };
            if index.insert(normalize_header(&display), i).is_some() {
                return Err(PriceTableError::DuplicateColumn {
                    sheet: name,
                    column: display,
                });
            }
            columns.push(display);
        }

        let width = columns.len();
        let rows = rows
            .into_iter()
            .filter(|row| !row.iter().all(CellValue::is_empty))
            .map(|mut row| {
                row.resize(width, CellValue::Empty);
                row
            })
            .collect();

        Ok(Self {
            name,
            columns,
            index,
            rows,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Column headers as loaded (trimmed)
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.index.contains_key(&normalize_header(column))
    }

    fn column_index(&self, column: &str) -> Result<usize> {
        self.index
            .get(&normalize_header(column))
            .copied()
            .ok_or_else(|| PriceTableError::ColumnNotFound {
                sheet: self.name.clone(),
                column: column.to_string(),
            })
    }

    /// Every row key in sheet order
    ///
    /// Rows with an empty size cell (notes under the table) have no key.
    pub fn size_keys(&self) -> Result<Vec<String>> {
        let col = self.column_index(SIZE_COLUMN)?;
        Ok(self
            .rows
            .iter()
            .filter(|row| !row[col].is_empty())
            .map(|row| row[col].to_string())
            .collect())
    }

    /// Reject sheets where two rows stringify to the same size key
    pub fn ensure_unique_sizes(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for key in self.size_keys()? {
            if !seen.insert(key.clone()) {
                return Err(PriceTableError::DuplicateSize {
                    sheet: self.name.clone(),
                    size: key,
                });
            }
        }
        Ok(())
    }

    /// Find the row whose size column stringifies exactly to `size_key`
    pub fn lookup(&self, size_key: &str) -> Result<PriceRow<'_>> {
        let col = self.column_index(SIZE_COLUMN)?;
        self.rows
            .iter()
            .find(|row| !row[col].is_empty() && row[col].to_string() == size_key)
            .map(|cells| PriceRow { sheet: self, cells })
            .ok_or_else(|| PriceTableError::SizeNotAvailable {
                sheet: self.name.clone(),
                size: size_key.to_string(),
            })
    }

    /// Check that every listed column exists
    pub fn require_columns(&self, columns: &[&str]) -> Result<()> {
        for column in columns {
            self.column_index(column)?;
        }
        Ok(())
    }
}

/// A borrowed view of one sheet row with named-column access
#[derive(Debug, Clone, Copy)]
pub struct PriceRow<'a> {
    sheet: &'a PriceSheet,
    cells: &'a [CellValue],
}

impl<'a> PriceRow<'a> {
    pub fn sheet_name(&self) -> &'a str {
        &self.sheet.name
    }

    /// Raw cell value of a named column
    pub fn get(&self, column: &str) -> Result<&'a CellValue> {
        let col = self.sheet.column_index(column)?;
        Ok(&self.cells[col])
    }

    /// Cell value of a named column, stringified
    pub fn text(&self, column: &str) -> Result<String> {
        self.get(column).map(|value| value.to_string())
    }

    /// All `(column, value)` pairs in column order
    pub fn fields(&self) -> impl Iterator<Item = (&'a str, &'a CellValue)> {
        self.sheet
            .columns
            .iter()
            .map(String::as_str)
            .zip(self.cells.iter())
    }
}
