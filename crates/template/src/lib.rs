//! Template - proposal placeholders and DOCX template filling
//!
//! This crate provides:
//! - Typed `{{TOKEN}}` placeholders with alignment classes
//! - Form validation into a proposal request
//! - Placeholder values resolved from the pricing workbook
//! - Substitution over body and table-cell paragraphs
//!
//! # Example
//!
//! ```ignore
//! use docx_core::DocxDocument;
//! use price_table::PriceList;
//! use template::{build_placeholders, fill_template, ProposalForm};
//!
//! let prices = PriceList::open("PRICELIST.xlsx")?;
//! let template = DocxDocument::open("HYBRID-20250521-TEMPLATE.docx")?;
//! let request = form.validate()?;
//! let placeholders = build_placeholders(&request, &prices)?;
//! let (doc, report) = fill_template(&template, &placeholders);
//! doc.save("proposal.docx")?;
//! ```

mod filler;
mod form;
mod placeholders;
mod proposal;
mod token;

pub use filler::{fill_template, render_proposal, FillReport, TemplateFiller};
pub use form::ProposalForm;
pub use placeholders::Placeholders;
pub use proposal::{
    build_placeholders, validate_price_list, ClientDetails, ProposalRequest, ProposalType,
    Sizing, HYBRID_SHEET, ONGRID_SHEET,
};
pub use token::{find_placeholders, AlignClass, Token};

use thiserror::Error;

/// Errors that can occur while building a proposal
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error(transparent)]
    PriceTable(#[from] price_table::PriceTableError),

    #[error("DOCX error: {0}")]
    Docx(#[from] docx_core::DocxError),
}

impl TemplateError {
    /// True for errors the submitter can fix by changing the form
    pub fn is_user_error(&self) -> bool {
        match self {
            TemplateError::MissingField(_) => true,
            TemplateError::PriceTable(e) => e.is_user_error(),
            TemplateError::Docx(_) => false,
        }
    }
}

/// Result type for template operations
pub type Result<T> = std::result::Result<T, TemplateError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_errors() {
        assert!(TemplateError::MissingField("client").is_user_error());
        let miss = price_table::PriceTableError::SizeNotAvailable {
            sheet: "OnGrid".to_string(),
            size: "7KW".to_string(),
        };
        let err = TemplateError::from(miss);
        assert!(err.is_user_error());
        assert_eq!(
            err.to_string(),
            "Selected size '7KW' is not available in sheet 'OnGrid'"
        );
        assert!(!TemplateError::from(docx_core::DocxError::MissingPart(
            "word/document.xml".to_string()
        ))
        .is_user_error());
    }
}
