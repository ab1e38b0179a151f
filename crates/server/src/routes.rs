//! Request handlers

use crate::download::{docx_response, download_filename};
use crate::error::AppError;
use crate::state::AppState;
use axum::extract::State;
use axum::response::{Html, Response};
use axum::Form;
use log::{debug, info};
use std::sync::Arc;
use template::{build_placeholders, render_proposal, ProposalForm};

const FORM_HTML: &str = include_str!("../assets/form.html");

/// `GET /`: the proposal input form
pub async fn index() -> Html<&'static str> {
    Html(FORM_HTML)
}

/// `POST /`: validate the form, fill the matching template and return it
pub async fn submit(
    State(state): State<Arc<AppState>>,
    Form(form): Form<ProposalForm>,
) -> Result<Response, AppError> {
    let prices = state.prices();
    let request = form
        .validate()
        .map_err(|e| AppError::from_template(e, prices))?;
    debug!("Proposal request: {request:?}");

    let placeholders =
        build_placeholders(&request, prices).map_err(|e| AppError::from_template(e, prices))?;
    let template = state.template_for(request.kind());
    let (bytes, report) =
        render_proposal(template, &placeholders).map_err(|e| AppError::from_template(e, prices))?;

    let filename = download_filename(&request.details.client, &request.proposal_type);
    info!(
        "Generated {filename}: {} paragraphs filled, {} tokens matched",
        report.paragraphs_changed,
        report.matched.len()
    );
    Ok(docx_response(&filename, bytes))
}
