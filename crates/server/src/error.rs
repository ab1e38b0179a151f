//! Failure responses

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use log::{error, info};
use price_table::{PriceList, PriceTableError};
use serde::Serialize;
use template::TemplateError;

/// A request failure, rendered as a JSON body
#[derive(Debug)]
pub enum AppError {
    MissingField(&'static str),
    SizeNotAvailable {
        message: String,
        available: Vec<String>,
    },
    Internal(String),
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    field: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    available: Option<&'a [String]>,
}

impl AppError {
    /// Classify a proposal error; size misses list the sheet's valid sizes
    pub fn from_template(err: TemplateError, prices: &PriceList) -> Self {
        match err {
            TemplateError::MissingField(field) => AppError::MissingField(field),
            TemplateError::PriceTable(PriceTableError::SizeNotAvailable { sheet, size }) => {
                let available = prices
                    .sheet(&sheet)
                    .and_then(|s| s.size_keys())
                    .unwrap_or_default();
                let message = PriceTableError::SizeNotAvailable { sheet, size }.to_string();
                AppError::SizeNotAvailable { message, available }
            }
            other => AppError::Internal(other.to_string()),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MissingField(_) | AppError::SizeNotAvailable { .. } => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> String {
        match self {
            AppError::MissingField(field) => format!("Missing required field: {field}"),
            AppError::SizeNotAvailable { message, .. } | AppError::Internal(message) => {
                message.clone()
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = self.message();
        let body = match &self {
            AppError::MissingField(field) => ErrorBody {
                error: &message,
                kind: "missing_field",
                field: Some(*field),
                available: None,
            },
            AppError::SizeNotAvailable { available, .. } => ErrorBody {
                error: &message,
                kind: "size_not_available",
                field: None,
                available: Some(available.as_slice()),
            },
            AppError::Internal(_) => ErrorBody {
                error: &message,
                kind: "internal",
                field: None,
                available: None,
            },
        };

        if self.status().is_server_error() {
            error!("Proposal generation failed: {message}");
        } else {
            info!("Rejected proposal: {message}");
        }
        (self.status(), Json(&body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use price_table::{CellValue, PriceSheet};

    fn prices() -> PriceList {
        let sheet = PriceSheet::new(
            "OnGrid",
            vec!["SYSTEM SIZE".to_string()],
            vec![vec![CellValue::from("6KW")], vec![CellValue::from("10KW")]],
        )
        .unwrap();
        PriceList::from_sheets([sheet])
    }

    #[test]
    fn test_size_miss_lists_available_sizes() {
        let err = TemplateError::from(PriceTableError::SizeNotAvailable {
            sheet: "OnGrid".to_string(),
            size: "7KW".to_string(),
        });
        match AppError::from_template(err, &prices()) {
            AppError::SizeNotAvailable { message, available } => {
                assert_eq!(message, "Selected size '7KW' is not available in sheet 'OnGrid'");
                assert_eq!(available, vec!["6KW".to_string(), "10KW".to_string()]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::MissingField("client").status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        let err = TemplateError::from(PriceTableError::SheetNotFound("Hybrid".to_string()));
        let app_err = AppError::from_template(err, &prices());
        assert_eq!(app_err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
