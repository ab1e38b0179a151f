//! Shared, read-only application state

use crate::config::Args;
use anyhow::{Context, Result};
use docx_core::DocxDocument;
use log::info;
use price_table::PriceList;
use template::{validate_price_list, ProposalType};

/// Everything a request needs, loaded once at startup
#[derive(Debug)]
pub struct AppState {
    prices: PriceList,
    hybrid_template: DocxDocument,
    ongrid_template: DocxDocument,
}

impl AppState {
    pub fn new(prices: PriceList, hybrid_template: DocxDocument, ongrid_template: DocxDocument) -> Self {
        Self {
            prices,
            hybrid_template,
            ongrid_template,
        }
    }

    /// Load and check the pricing workbook and both templates
    pub fn load(args: &Args) -> Result<Self> {
        let prices = PriceList::open(&args.pricelist)
            .with_context(|| format!("Failed to load price list {}", args.pricelist.display()))?;
        validate_price_list(&prices)
            .with_context(|| format!("Price list {} is incomplete", args.pricelist.display()))?;
        for sheet in prices.sheets() {
            info!("Sheet {}: {} sizes", sheet.name(), sheet.row_count());
        }

        let hybrid_template = open_template(&args.hybrid_template)?;
        let ongrid_template = open_template(&args.ongrid_template)?;

        Ok(Self::new(prices, hybrid_template, ongrid_template))
    }

    pub fn prices(&self) -> &PriceList {
        &self.prices
    }

    pub fn template_for(&self, proposal_type: ProposalType) -> &DocxDocument {
        match proposal_type {
            ProposalType::Hybrid => &self.hybrid_template,
            ProposalType::OnGrid => &self.ongrid_template,
        }
    }
}

fn open_template(path: &std::path::Path) -> Result<DocxDocument> {
    let doc = DocxDocument::open(path)
        .with_context(|| format!("Failed to load template {}", path.display()))?;
    info!(
        "Loaded template {} ({} paragraphs)",
        path.display(),
        doc.paragraphs().len() + doc.table_paragraphs().len()
    );
    Ok(doc)
}
