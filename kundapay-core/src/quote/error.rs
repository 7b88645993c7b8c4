use crate::repository::StoreError;
use kundapay_sdk::objects::{Country, Currency, PaymentMethod, ReceivingMethod};
use thiserror::Error;

/// Errors that abort a quote calculation.
///
/// Every variant except [`QuoteError::Store`] carries a message meant to be
/// shown to the user as is.
#[derive(Debug, Error)]
pub enum QuoteError {
    /// Amount missing, zero or negative.
    #[error("amount must be greater than 0")]
    InvalidAmount,

    /// The direction token does not name a supported corridor.
    #[error("invalid transfer direction: {0}")]
    InvalidDirection(String),

    /// No usable exchange rate for the currency pair.
    #[error("exchange rate not available ({from} → {to})")]
    RateUnavailable { from: Currency, to: Currency },

    /// No usable fee rule for the corridor and methods.
    #[error(
        "fees not available for this combination ({origin} → {destination}, {payment} / {receiving})"
    )]
    FeeUnavailable {
        origin: Country,
        destination: Country,
        payment: PaymentMethod,
        receiving: ReceivingMethod,
    },

    /// The promo code failed validation; the message comes from the validator.
    #[error("{0}")]
    PromoCodeInvalid(String),

    /// The computed transfer exceeds a corridor ceiling.
    #[error("{0}")]
    TransferLimitExceeded(String),

    /// The rate/fee/promo store could not be queried.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

impl QuoteError {
    /// Stable machine-readable kind, used as the `kind` of API error bodies.
    pub fn kind(&self) -> &'static str {
        match self {
            QuoteError::InvalidAmount => "invalid_amount",
            QuoteError::InvalidDirection(_) => "invalid_direction",
            QuoteError::RateUnavailable { .. } => "rate_unavailable",
            QuoteError::FeeUnavailable { .. } => "fee_unavailable",
            QuoteError::PromoCodeInvalid(_) => "promo_code_invalid",
            QuoteError::TransferLimitExceeded(_) => "transfer_limit_exceeded",
            QuoteError::Store(_) => "store",
        }
    }
}
