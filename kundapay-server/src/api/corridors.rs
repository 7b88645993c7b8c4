use axum::Json;
use kundapay_core::corridor::catalogue;
use kundapay_sdk::objects::CorridorInfo;

/// `GET /corridors`: every supported corridor with its methods and defaults.
pub(super) async fn list_corridors() -> Json<Vec<CorridorInfo>> {
    Json(catalogue())
}
