//! The proposal input form

use crate::proposal::{ClientDetails, ProposalRequest, ProposalType, Sizing};
use crate::{Result, TemplateError};
use serde::Deserialize;

/// Raw form submission; every field is optional until validated
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProposalForm {
    pub proposal_type: Option<String>,
    /// Requested output format; generation always produces DOCX
    pub format: Option<String>,
    pub client: Option<String>,
    pub email: Option<String>,
    pub contact: Option<String>,
    pub location: Option<String>,
    pub electric_bill: Option<String>,
    pub energy_rate: Option<String>,
    pub expiry: Option<String>,
    pub system_size: Option<String>,
    pub zero_bill_size: Option<String>,
    pub lower_bill_size: Option<String>,
}

/// Trimmed value of a required field
fn required(value: &Option<String>, field: &'static str) -> Result<String> {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(TemplateError::MissingField(field)),
    }
}

impl ProposalForm {
    /// Check required fields in form order and build a request
    pub fn validate(&self) -> Result<ProposalRequest> {
        let proposal_type = required(&self.proposal_type, "proposal_type")?;
        let details = ClientDetails {
            client: required(&self.client, "client")?,
            email: required(&self.email, "email")?,
            contact: required(&self.contact, "contact")?,
            location: required(&self.location, "location")?,
            electric_bill: required(&self.electric_bill, "electric_bill")?,
            energy_rate: required(&self.energy_rate, "energy_rate")?,
            expiry: required(&self.expiry, "expiry")?,
        };

        let sizing = match ProposalType::from_form_value(&proposal_type) {
            ProposalType::Hybrid => Sizing::Hybrid {
                system_size: required(&self.system_size, "system_size")?,
            },
            ProposalType::OnGrid => Sizing::OnGrid {
                zero_bill_size: required(&self.zero_bill_size, "zero_bill_size")?,
                lower_bill_size: required(&self.lower_bill_size, "lower_bill_size")?,
            },
        };

        Ok(ProposalRequest {
            proposal_type,
            details,
            sizing,
        })
    }
}
