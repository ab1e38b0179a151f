//! Pricing workbook loading

use crate::sheet::{PriceRow, PriceSheet};
use crate::{CellValue, PriceTableError, Result};
use calamine::{Data, DataType, Reader, Xlsx};
use log::debug;
use std::collections::BTreeMap;
use std::io::{Cursor, Read, Seek};
use std::path::Path;

/// The whole pricing workbook, one [`PriceSheet`] per worksheet
///
/// Built once at startup and shared read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct PriceList {
    sheets: BTreeMap<String, PriceSheet>,
}

impl PriceList {
    /// Create a price list from already-built sheets
    pub fn from_sheets(sheets: impl IntoIterator<Item = PriceSheet>) -> Self {
        Self {
            sheets: sheets
                .into_iter()
                .map(|sheet| (sheet.name().to_string(), sheet))
                .collect(),
        }
    }

    /// Load every worksheet of an `.xlsx` file
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read(path).map_err(|e| {
            PriceTableError::WorkbookLoadError(format!("{}: {}", path.display(), e))
        })?;
        Self::from_bytes(&data)
    }

    /// Load every worksheet of an `.xlsx` workbook held in memory
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let workbook = calamine::open_workbook_from_rs::<Xlsx<_>, _>(Cursor::new(data))
            .map_err(|e| PriceTableError::WorkbookLoadError(e.to_string()))?;
        Self::from_workbook(workbook)
    }

    fn from_workbook<RS: Read + Seek>(mut workbook: Xlsx<RS>) -> Result<Self> {
        let mut sheets = Vec::new();
        for name in workbook.sheet_names() {
            let range = workbook
                .worksheet_range(&name)
                .map_err(|e| PriceTableError::WorkbookLoadError(format!("{name}: {e}")))?;

            let mut rows = range.rows();
            let headers = rows
                .next()
                .map(|row| row.iter().map(|cell| cell_value(cell).to_string()).collect())
                .unwrap_or_default();
            let data = rows
                .map(|row| row.iter().map(cell_value).collect())
                .collect();

            let sheet = PriceSheet::new(name, headers, data)?;
            debug!(
                "Loaded sheet '{}' ({} rows), columns: {:?}",
                sheet.name(),
                sheet.row_count(),
                sheet.columns()
            );
            sheets.push(sheet);
        }
        Ok(Self::from_sheets(sheets))
    }

    /// Get a sheet by name
    pub fn sheet(&self, name: &str) -> Result<&PriceSheet> {
        self.sheets
            .get(name)
            .ok_or_else(|| PriceTableError::SheetNotFound(name.to_string()))
    }

    pub fn sheet_names(&self) -> impl Iterator<Item = &str> {
        self.sheets.keys().map(String::as_str)
    }

    /// Every sheet, ordered by name
    pub fn sheets(&self) -> impl Iterator<Item = &PriceSheet> {
        self.sheets.values()
    }

    /// Find the row of `sheet_name` whose system size stringifies to `size_key`
    ///
    /// # Example
    /// ```ignore
    /// let prices = PriceList::open("PRICELIST.xlsx")?;
    /// let row = prices.lookup("OnGrid", "6")?;
    /// let premium = row.text("PREMIUM (VAT NOT INCLUDED)")?;
    /// ```
    pub fn lookup(&self, sheet_name: &str, size_key: &str) -> Result<PriceRow<'_>> {
        self.sheet(sheet_name)?.lookup(size_key)
    }

    /// Check a sheet exists and contains every column
    pub fn require_columns(&self, sheet_name: &str, columns: &[&str]) -> Result<()> {
        self.sheet(sheet_name)?.require_columns(columns)
    }
}

/// Convert a calamine cell into a [`CellValue`]
fn cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Empty,
        Data::String(s) => CellValue::String(s.clone()),
        Data::Int(n) => CellValue::Int(*n),
        Data::Float(n) => CellValue::Float(*n),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => match cell.as_datetime() {
            Some(datetime) => CellValue::DateTime(datetime),
            None => CellValue::Float(dt.as_f64()),
        },
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::String(s.clone()),
        Data::Error(e) => CellValue::String(e.to_string()),
    }
}
