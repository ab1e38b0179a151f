//! DOCX download responses

use axum::http::header;
use axum::response::{IntoResponse, Response};
use docx_core::DOCX_MIME_TYPE;

/// Replace every character outside `[A-Za-z0-9_-]` with `_`
pub fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// `<client>-<proposal_type>.docx`, both parts sanitized
pub fn download_filename(client: &str, proposal_type: &str) -> String {
    format!(
        "{}-{}.docx",
        sanitize_filename(client),
        sanitize_filename(proposal_type)
    )
}

/// Attachment response carrying a generated document
pub fn docx_response(filename: &str, bytes: Vec<u8>) -> Response {
    (
        [
            (header::CONTENT_TYPE, DOCX_MIME_TYPE.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        bytes,
    )
        .into_response()
}
