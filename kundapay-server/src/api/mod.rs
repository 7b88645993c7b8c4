//! Public quote API.
//!
//! # Endpoints
//!
//! - `GET  /corridors` – corridor catalogue with offered methods
//! - `POST /quotes`    – quote a transfer
//! - `GET  /quotes/ws` – WebSocket stream of debounced quotes

use axum::{
    Json, Router,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use kundapay_core::quote::QuoteError;
use kundapay_sdk::objects::ApiErrorBody;

use crate::state::AppState;

mod corridors;
mod quote_stream;
mod quotes;

/// Build the quote API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/corridors", get(corridors::list_corridors))
        .route("/quotes", post(quotes::create_quote))
        .route("/quotes/ws", get(quote_stream::quote_stream_ws))
}

// ---------------------------------------------------------------------------
// Error handling
// ---------------------------------------------------------------------------

/// A failed quote, rendered as an [`ApiErrorBody`].
#[derive(Debug)]
struct QuoteApiError(QuoteError);

impl From<QuoteError> for QuoteApiError {
    fn from(value: QuoteError) -> Self {
        Self(value)
    }
}

fn status_for(error: &QuoteError) -> StatusCode {
    match error {
        QuoteError::InvalidAmount | QuoteError::InvalidDirection(_) => StatusCode::BAD_REQUEST,
        QuoteError::PromoCodeInvalid(_) | QuoteError::TransferLimitExceeded(_) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        QuoteError::RateUnavailable { .. } | QuoteError::FeeUnavailable { .. } => {
            StatusCode::NOT_FOUND
        }
        QuoteError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// The body sent to clients. Store failures are logged, not exposed.
fn error_body(error: &QuoteError) -> ApiErrorBody {
    let message = match error {
        QuoteError::Store(e) => {
            tracing::error!(error = %e, "Quote API store error");
            "internal server error".to_owned()
        }
        other => other.to_string(),
    };
    ApiErrorBody {
        kind: error.kind().to_owned(),
        message,
    }
}

impl IntoResponse for QuoteApiError {
    fn into_response(self) -> axum::response::Response {
        (status_for(&self.0), Json(error_body(&self.0))).into_response()
    }
}
