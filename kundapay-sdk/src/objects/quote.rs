use crate::objects::countries::{Country, Currency};
use crate::objects::methods::{PaymentMethod, ReceivingMethod};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request payload for a transfer quote.
///
/// `amount` is the anchor amount: the send amount, or the receive amount
/// when `is_receive_amount` is set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QuoteRequest {
    pub amount: Decimal,
    /// Direction token, e.g. `FRANCE_TO_GABON`.
    pub direction: String,
    pub payment_method: PaymentMethod,
    pub receiving_method: ReceivingMethod,
    #[serde(default)]
    pub is_receive_amount: bool,
    #[serde(default)]
    pub promo_code: Option<String>,
}

/// A computed transfer quote.
///
/// Fee percentages are fractions (`0.005` is half a percent).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferQuote {
    pub amount_sent: Decimal,
    pub fees: Decimal,
    pub amount_received: Decimal,
    pub sender_currency: Currency,
    pub receiver_currency: Currency,
    pub exchange_rate: Decimal,
    pub direction: String,
    pub payment_method: PaymentMethod,
    pub receiving_method: ReceivingMethod,
    pub promo_code_id: Option<Uuid>,
    pub original_fee_percentage: Decimal,
    pub effective_fee_percentage: Decimal,
}

/// How a promo code reduces the fee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DiscountType {
    /// `value` percent off the fee percentage.
    Percentage,
    /// `value` units of the anchor currency off the fee.
    Fixed,
}

/// One entry of the corridor catalogue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorridorInfo {
    pub direction: String,
    pub origin: Country,
    pub destination: Country,
    pub sender_currency: Currency,
    pub receiver_currency: Currency,
    pub payment_methods: Vec<PaymentMethod>,
    pub receiving_methods: Vec<ReceivingMethod>,
    pub default_payment_method: PaymentMethod,
    pub default_receiving_method: ReceivingMethod,
}

/// Error body returned by the quote API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    /// Stable machine-readable error kind, e.g. `transfer_limit_exceeded`.
    pub kind: String,
    /// User-facing message.
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_defaults() {
        let json = r#"{
            "amount": "100",
            "direction": "FRANCE_TO_GABON",
            "payment_method": "BANK_TRANSFER",
            "receiving_method": "AIRTEL_MONEY"
        }"#;
        let request: QuoteRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.amount, Decimal::from(100));
        assert!(!request.is_receive_amount);
        assert_eq!(request.promo_code, None);
    }

    #[test]
    fn test_request_accepts_numeric_amount() {
        let json = r#"{
            "amount": 65265,
            "direction": "FRANCE_TO_GABON",
            "payment_method": "BANK_TRANSFER",
            "receiving_method": "CASH",
            "is_receive_amount": true,
            "promo_code": "WELCOME"
        }"#;
        let request: QuoteRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.amount, Decimal::from(65265));
        assert!(request.is_receive_amount);
        assert_eq!(request.promo_code.as_deref(), Some("WELCOME"));
    }
}
