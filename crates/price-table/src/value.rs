//! Cell values and the value-to-text rule

use chrono::NaiveDateTime;
use std::fmt;

/// A spreadsheet cell value
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    DateTime(NaiveDateTime),
}

impl CellValue {
    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::String(s) => s.trim().is_empty(),
            _ => false,
        }
    }
}

/// The single value-to-text rule used for size keys and placeholder values
///
/// Whole floats print without a fractional part (`125000.0` -> `125000`),
/// other floats use the shortest round-trip form. No grouping separators.
impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::String(s) => f.write_str(s),
            CellValue::Int(n) => write!(f, "{n}"),
            CellValue::Float(n) => f.write_str(&format_float(*n)),
            CellValue::Bool(b) => f.write_str(if *b { "TRUE" } else { "FALSE" }),
            CellValue::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S")),
        }
    }
}

/// Format a float in its natural decimal representation
///
/// # Examples
/// ```
/// use price_table::format_float;
/// assert_eq!(format_float(125000.0), "125000");
/// assert_eq!(format_float(5.5), "5.5");
/// assert_eq!(format_float(-0.25), "-0.25");
/// ```
pub fn format_float(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        // -0.0 prints as "0"
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::String(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::String(s)
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        CellValue::Int(n)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Float(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_display_numbers() {
        assert_eq!(CellValue::Int(6).to_string(), "6");
        assert_eq!(CellValue::Float(6.0).to_string(), "6");
        assert_eq!(CellValue::Float(10.56).to_string(), "10.56");
        assert_eq!(CellValue::Float(-0.0).to_string(), "0");
        assert_eq!(CellValue::Float(1e20).to_string(), "100000000000000000000");
    }

    #[test]
    fn test_display_other_kinds() {
        assert_eq!(CellValue::Empty.to_string(), "");
        assert_eq!(CellValue::from("3 YEARS").to_string(), "3 YEARS");
        assert_eq!(CellValue::Bool(true).to_string(), "TRUE");

        let dt = NaiveDate::from_ymd_opt(2025, 5, 21)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(CellValue::DateTime(dt).to_string(), "2025-05-21 00:00:00");
    }

    #[test]
    fn test_is_empty() {
        assert!(CellValue::Empty.is_empty());
        assert!(CellValue::from("  ").is_empty());
        assert!(!CellValue::Int(0).is_empty());
    }
}
