//! Proposal requests and their placeholder mappings

use crate::{Placeholders, Result, Token};
use log::debug;
use price_table::{PriceList, PriceRow};

/// Pricing sheet for hybrid proposals
pub const HYBRID_SHEET: &str = "Hybrid";
/// Pricing sheet for on-grid proposals
pub const ONGRID_SHEET: &str = "OnGrid";

/// Payment schedule columns, shared by every proposal type
const PAYMENT_PREMIUM: &str = "PREMIUM (VAT NOT INCLUDED)";
const PAYMENT_30: &str = "30% RESERVATION FEE / DOWNPAYMENT BEFORE MOBILIZATION";
const PAYMENT_20: &str = "20% UPON MATERIALS DELIVERY ON SITE";
const PAYMENT_45: &str = "45% UPON COMPLETION";
const PAYMENT_5: &str = "5% UPON TESTING AND COMMISSIONING";
const PAYMENT_TOTAL: &str = "TOTAL PAYMENTS";
const PAYMENT_PREMIUM5: &str = "PREMIUM (VAT NOT INCLUDED) +5%";

const AREA: &str = "SOLAR PANELS AREA COVERED (Sq. M.)";
const MONTHLY_ENERGY: &str = "MONTHLY GENERATED ENERGY (kWh)";
const INVERTER: &str = "INVERTER SIZE";
const SAVINGS: &str = "ESTIMATED MONTHLY SAVINGS";
const ROI: &str = "RETURN OF INVESTMENT";

/// Hybrid sheet columns
const HYBRID_FIELDS: &[(Token, &str)] = &[
    (Token::HybridPvSize, "PV SYSTEM SIZE"),
    (Token::HybridArea, AREA),
    (Token::HybridMonthlyEnergy, MONTHLY_ENERGY),
    (Token::HybridPanels, "NO. OF SOLAR PANELS (545W EACH)"),
    (Token::HybridInverter, INVERTER),
    (Token::HybridPremium, "TOTAL PREMIUM"),
    (Token::HybridSavings, SAVINGS),
    (Token::HybridRoi, ROI),
    (Token::HPremium, PAYMENT_PREMIUM),
    (Token::H30, PAYMENT_30),
    (Token::H20, PAYMENT_20),
    (Token::H45, PAYMENT_45),
    (Token::H5, PAYMENT_5),
    (Token::HTotal, PAYMENT_TOTAL),
    (Token::HPremium5, PAYMENT_PREMIUM5),
];

/// On-grid zero bill row
const ZERO_FIELDS: &[(Token, &str)] = &[
    (Token::ZeroPvSize, "PV SYSTEM SIZE (kWp)"),
    (Token::ZeroArea, AREA),
    (Token::ZeroMonthlyEnergy, MONTHLY_ENERGY),
    (Token::ZeroPanels, "NO. OF SOLAR PANELS (580W EACH)"),
    (Token::ZeroInverter, INVERTER),
    (Token::ZeroPremium, PAYMENT_PREMIUM),
    (Token::ZeroSavings, SAVINGS),
    (Token::ZeroRoi, ROI),
    (Token::OfPremium, PAYMENT_PREMIUM),
    (Token::Of30, PAYMENT_30),
    (Token::Of20, PAYMENT_20),
    (Token::Of45, PAYMENT_45),
    (Token::Of5, PAYMENT_5),
    (Token::OfTotal, PAYMENT_TOTAL),
    (Token::OfPremium5, PAYMENT_PREMIUM5),
];

/// On-grid lower bill row
const LOWER_FIELDS: &[(Token, &str)] = &[
    (Token::LowerPvSize, "PV SYSTEM SIZE (kWp)"),
    (Token::LowerArea, AREA),
    (Token::LowerMonthlyEnergy, MONTHLY_ENERGY),
    (Token::LowerPanels, "NO. OF SOLAR PANELS (580W EACH)"),
    (Token::LowerInverter, INVERTER),
    (Token::LowerPremium, PAYMENT_PREMIUM),
    (Token::LowerSavings, SAVINGS),
    (Token::LowerRoi, ROI),
    (Token::OlPremium, PAYMENT_PREMIUM),
    (Token::Ol30, PAYMENT_30),
    (Token::Ol20, PAYMENT_20),
    (Token::Ol45, PAYMENT_45),
    (Token::Ol5, PAYMENT_5),
    (Token::OlTotal, PAYMENT_TOTAL),
    (Token::OlPremium5, PAYMENT_PREMIUM5),
];

/// Which template and pricing sheet a proposal uses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProposalType {
    Hybrid,
    OnGrid,
}

impl ProposalType {
    /// `hybrid` selects the hybrid proposal; any other value is on-grid
    pub fn from_form_value(value: &str) -> Self {
        if value == "hybrid" {
            ProposalType::Hybrid
        } else {
            ProposalType::OnGrid
        }
    }

    pub fn sheet_name(self) -> &'static str {
        match self {
            ProposalType::Hybrid => HYBRID_SHEET,
            ProposalType::OnGrid => ONGRID_SHEET,
        }
    }

    /// Every pricing column this proposal type reads
    pub fn required_columns(self) -> Vec<&'static str> {
        let fields: Vec<&(Token, &'static str)> = match self {
            ProposalType::Hybrid => HYBRID_FIELDS.iter().collect(),
            ProposalType::OnGrid => ZERO_FIELDS.iter().chain(LOWER_FIELDS).collect(),
        };
        let mut columns: Vec<&'static str> = Vec::new();
        for &(_, column) in fields {
            if !columns.contains(&column) {
                columns.push(column);
            }
        }
        columns
    }
}

/// Check the workbook has both sheets, each with unique size keys and
/// every column a proposal reads
pub fn validate_price_list(prices: &PriceList) -> Result<()> {
    for proposal_type in [ProposalType::Hybrid, ProposalType::OnGrid] {
        let sheet = prices.sheet(proposal_type.sheet_name())?;
        sheet.ensure_unique_sizes()?;
        sheet.require_columns(&proposal_type.required_columns())?;
    }
    Ok(())
}

/// Client details copied verbatim into the proposal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientDetails {
    pub client: String,
    pub email: String,
    pub contact: String,
    pub location: String,
    pub electric_bill: String,
    pub energy_rate: String,
    pub expiry: String,
}

/// Selected size keys
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sizing {
    Hybrid {
        system_size: String,
    },
    OnGrid {
        zero_bill_size: String,
        lower_bill_size: String,
    },
}

/// A validated proposal request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProposalRequest {
    /// `proposal_type` exactly as submitted, used in the download name
    pub proposal_type: String,
    pub details: ClientDetails,
    pub sizing: Sizing,
}

impl ProposalRequest {
    pub fn kind(&self) -> ProposalType {
        match self.sizing {
            Sizing::Hybrid { .. } => ProposalType::Hybrid,
            Sizing::OnGrid { .. } => ProposalType::OnGrid,
        }
    }
}

fn insert_row(placeholders: &mut Placeholders, row: &PriceRow<'_>, fields: &[(Token, &str)]) -> Result<()> {
    for (token, column) in fields {
        placeholders.insert(*token, row.text(column)?);
    }
    Ok(())
}

/// Resolve every token of a request against the price list
///
/// All lookups happen here, so a missing size fails before any document is
/// touched.
pub fn build_placeholders(request: &ProposalRequest, prices: &PriceList) -> Result<Placeholders> {
    let details = &request.details;
    let mut placeholders: Placeholders = [
        (Token::Client, details.client.as_str()),
        (Token::Email, details.email.as_str()),
        (Token::Contact, details.contact.as_str()),
        (Token::Location, details.location.as_str()),
        (Token::ElectricBill, details.electric_bill.as_str()),
        (Token::EnergyRate, details.energy_rate.as_str()),
        (Token::ExpiryDate, details.expiry.as_str()),
    ]
    .into_iter()
    .collect();

    match &request.sizing {
        Sizing::Hybrid { system_size } => {
            let row = prices.lookup(HYBRID_SHEET, system_size)?;
            placeholders.insert(Token::SystemSize, system_size.as_str());
            insert_row(&mut placeholders, &row, HYBRID_FIELDS)?;
        }
        Sizing::OnGrid {
            zero_bill_size,
            lower_bill_size,
        } => {
            let zero = prices.lookup(ONGRID_SHEET, zero_bill_size)?;
            let lower = prices.lookup(ONGRID_SHEET, lower_bill_size)?;
            placeholders
                .insert(Token::ZeroBillSize, zero_bill_size.as_str())
                .insert(Token::LowerBillSize, lower_bill_size.as_str());
            insert_row(&mut placeholders, &zero, ZERO_FIELDS)?;
            insert_row(&mut placeholders, &lower, LOWER_FIELDS)?;
        }
    }

    debug!(
        "Built {} placeholders for {:?} proposal",
        placeholders.len(),
        request.kind()
    );
    Ok(placeholders)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use crate::TemplateError;
    use price_table::{CellValue, PriceSheet, PriceTableError};

    fn sheet(name: &str, fields: &[(Token, &str)], sizes: &[&str]) -> PriceSheet {
        let mut headers = vec!["SYSTEM SIZE".to_string()];
        for (_, column) in fields {
            if !headers.iter().any(|h| h == column) {
                headers.push(column.to_string());
            }
        }
        let rows = sizes
            .iter()
            .map(|size| {
                headers
                    .iter()
                    .enumerate()
                    .map(|(i, header)| {
                        if i == 0 {
                            CellValue::from(*size)
                        } else {
                            CellValue::from(format!("{size} {header}"))
                        }
                    })
                    .collect()
            })
            .collect();
        PriceSheet::new(name, headers, rows).unwrap()
    }

    fn price_list() -> PriceList {
        PriceList::from_sheets([
            sheet(HYBRID_SHEET, HYBRID_FIELDS, &["5", "8"]),
            sheet(
                ONGRID_SHEET,
                &[ZERO_FIELDS, LOWER_FIELDS].concat(),
                &["6KW", "10KW"],
            ),
        ])
    }

    fn details() -> ClientDetails {
        ClientDetails {
            client: "acme corp".to_string(),
            email: "a@acme.test".to_string(),
            contact: "0917".to_string(),
            location: "cebu".to_string(),
            electric_bill: "8000".to_string(),
            energy_rate: "12".to_string(),
            expiry: "2025-06-30".to_string(),
        }
    }

    #[test]
    fn test_proposal_type_from_form_value() {
        assert_eq!(ProposalType::from_form_value("hybrid"), ProposalType::Hybrid);
        assert_eq!(ProposalType::from_form_value("ongrid"), ProposalType::OnGrid);
        assert_eq!(ProposalType::from_form_value("Hybrid"), ProposalType::OnGrid);
        assert_eq!(ProposalType::OnGrid.sheet_name(), "OnGrid");
    }

    #[test]
    fn test_required_columns_are_deduplicated() {
        let columns = ProposalType::OnGrid.required_columns();
        assert_eq!(columns.len(), ZERO_FIELDS.len() - 1);
        assert!(columns.contains(&"PV SYSTEM SIZE (kWp)"));
    }

    #[test]
    fn test_validate_price_list() {
        assert!(validate_price_list(&price_list()).is_ok());

        let missing_ongrid = PriceList::from_sheets([sheet(HYBRID_SHEET, HYBRID_FIELDS, &["5"])]);
        assert!(validate_price_list(&missing_ongrid).is_err());
    }

    #[test]
    fn test_validate_rejects_duplicate_sizes() {
        let prices = PriceList::from_sheets([
            sheet(HYBRID_SHEET, HYBRID_FIELDS, &["5", "5"]),
            sheet(ONGRID_SHEET, &[ZERO_FIELDS, LOWER_FIELDS].concat(), &["6KW"]),
        ]);
        assert!(matches!(
            validate_price_list(&prices),
            Err(TemplateError::PriceTable(PriceTableError::DuplicateSize { .. }))
        ));
    }

    #[test]
    fn test_build_hybrid_placeholders() {
        let request = ProposalRequest {
            proposal_type: "hybrid".to_string(),
            details: details(),
            sizing: Sizing::Hybrid {
                system_size: "8".to_string(),
            },
        };
        let placeholders = build_placeholders(&request, &price_list()).unwrap();

        assert_eq!(placeholders.len(), 7 + 1 + HYBRID_FIELDS.len());
        assert_eq!(placeholders.get(Token::Client), Some("acme corp"));
        assert_eq!(placeholders.get(Token::SystemSize), Some("8"));
        assert_eq!(placeholders.get(Token::HybridRoi), Some("8 RETURN OF INVESTMENT"));
        assert!(!placeholders.contains(Token::ZeroPremium));
    }

    #[test]
    fn test_build_ongrid_placeholders_uses_both_rows() {
        let request = ProposalRequest {
            proposal_type: "ongrid".to_string(),
            details: details(),
            sizing: Sizing::OnGrid {
                zero_bill_size: "10KW".to_string(),
                lower_bill_size: "6KW".to_string(),
            },
        };
        let placeholders = build_placeholders(&request, &price_list()).unwrap();

        assert_eq!(
            placeholders.get(Token::ZeroPremium),
            Some("10KW PREMIUM (VAT NOT INCLUDED)")
        );
        assert_eq!(
            placeholders.get(Token::OlTotal),
            Some("6KW TOTAL PAYMENTS")
        );
        assert_eq!(placeholders.get(Token::LowerBillSize), Some("6KW"));
        assert!(!placeholders.contains(Token::SystemSize));
    }

    #[test]
    fn test_unknown_size_fails_before_fill() {
        let request = ProposalRequest {
            proposal_type: "ongrid".to_string(),
            details: details(),
            sizing: Sizing::OnGrid {
                zero_bill_size: "10KW".to_string(),
                lower_bill_size: "7KW".to_string(),
            },
        };
        let err = build_placeholders(&request, &price_list()).unwrap_err();
        assert!(err.is_user_error());
    }
}
