//! Price Table - pricing workbook lookup
//!
//! This crate provides:
//! - Loading every sheet of an `.xlsx` pricing workbook
//! - Header normalization (trimmed, whitespace-collapsed, case-insensitive)
//! - Row lookup by the `SYSTEM SIZE` column
//! - One value-to-text rule for every cell
//!
//! # Example
//!
//! ```ignore
//! use price_table::PriceList;
//!
//! let prices = PriceList::open("PRICELIST.xlsx")?;
//! let row = prices.lookup("Hybrid", "5")?;
//! let premium = row.text("TOTAL PREMIUM")?;
//! ```

mod sheet;
mod value;
mod workbook;

pub use sheet::{normalize_header, PriceRow, PriceSheet, SIZE_COLUMN};
pub use value::{format_float, CellValue};
pub use workbook::PriceList;

use thiserror::Error;

/// Errors that can occur while loading or querying the pricing workbook
#[derive(Debug, Error)]
pub enum PriceTableError {
    #[error("Failed to load workbook: {0}")]
    WorkbookLoadError(String),

    #[error("Sheet not found: {0}")]
    SheetNotFound(String),

    #[error("Column '{column}' not found in sheet '{sheet}'")]
    ColumnNotFound { sheet: String, column: String },

    #[error("Duplicate column '{column}' in sheet '{sheet}'")]
    DuplicateColumn { sheet: String, column: String },

    #[error("Duplicate system size '{size}' in sheet '{sheet}'")]
    DuplicateSize { sheet: String, size: String },

    #[error("Selected size '{size}' is not available in sheet '{sheet}'")]
    SizeNotAvailable { sheet: String, size: String },
}

impl PriceTableError {
    /// True for errors caused by user input rather than the workbook itself
    pub fn is_user_error(&self) -> bool {
        matches!(self, PriceTableError::SizeNotAvailable { .. })
    }
}

/// Result type for price table operations
pub type Result<T> = std::result::Result<T, PriceTableError>;
