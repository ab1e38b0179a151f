//! Solar proposal server
//!
//! Serves the proposal form at `GET /` and returns a filled DOCX for each
//! `POST /` submission.
//!
//! # Example
//!
//! ```ignore
//! use solar_proposal_server::{router, AppState, Args};
//!
//! let state = AppState::load(&args)?;
//! let listener = tokio::net::TcpListener::bind(&args.bind).await?;
//! axum::serve(listener, router(Arc::new(state))).await?;
//! ```

pub mod config;
pub mod download;
mod error;
pub mod logging;
pub mod routes;
mod state;

pub use config::Args;
pub use error::AppError;
pub use state::AppState;

use axum::routing::get;
use axum::Router;
use std::sync::Arc;

/// Build the application router
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(routes::index).post(routes::submit))
        .with_state(state)
}
