//! DOCX Core - Low-level WordprocessingML manipulation
//!
//! This crate provides functionality for:
//! - Opening and saving DOCX packages (zip + Open Packaging Conventions)
//! - Walking body paragraphs and table-cell paragraphs
//! - Reading and replacing paragraph text across runs
//! - Setting paragraph alignment
//!
//! # Example
//!
//! ```ignore
//! use docx_core::{Align, DocxDocument};
//!
//! let mut doc = DocxDocument::open("template.docx")?;
//! for mut para in doc.paragraphs_mut()? {
//!     if para.text().contains("{{CLIENT}}") {
//!         para.set_text(&para.text().replace("{{CLIENT}}", "ACME CORP"));
//!         para.set_alignment(Align::Left);
//!     }
//! }
//! doc.save("output.docx")?;
//! ```

mod document;
mod paragraph;
pub mod xml;

pub use document::{DocxDocument, DOCX_MIME_TYPE};
pub use paragraph::{Paragraph, ParagraphRef};

use thiserror::Error;

/// Errors that can occur during DOCX operations
#[derive(Debug, Error)]
pub enum DocxError {
    #[error("Failed to open DOCX: {0}")]
    OpenError(String),

    #[error("Failed to save DOCX: {0}")]
    SaveError(String),

    #[error("Missing package part: {0}")]
    MissingPart(String),

    #[error("XML error: {0}")]
    XmlError(String),

    #[error("Zip error: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type for DOCX operations
pub type Result<T> = std::result::Result<T, DocxError>;

/// Paragraph alignment (`w:jc`)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
    Justify,
}

impl Align {
    /// Value written to `w:jc/@w:val`
    pub fn as_ooxml(self) -> &'static str {
        match self {
            Align::Left => "left",
            Align::Center => "center",
            Align::Right => "right",
            Align::Justify => "both",
        }
    }

    /// Parse a `w:jc/@w:val` value, accepting both transitional and strict names
    pub fn from_ooxml(value: &str) -> Option<Self> {
        match value {
            "left" | "start" => Some(Align::Left),
            "center" => Some(Align::Center),
            "right" | "end" => Some(Align::Right),
            "both" | "distribute" => Some(Align::Justify),
            _ => None,
        }
    }
}
