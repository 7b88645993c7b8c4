use axum::{Json, extract::State};
use kundapay_sdk::objects::{QuoteRequest, TransferQuote};

use super::QuoteApiError;
use crate::state::AppState;

/// `POST /quotes`: quote a transfer.
pub(super) async fn create_quote(
    state: State<AppState>,
    Json(body): Json<QuoteRequest>,
) -> Result<Json<TransferQuote>, QuoteApiError> {
    let quote = state.calculator.calculate_transfer_details(&body).await?;
    Ok(Json(quote))
}
