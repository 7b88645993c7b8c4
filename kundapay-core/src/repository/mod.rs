//! Rate, fee and promo-code lookups.
//!
//! The quote calculator only talks to [`QuoteRepository`]. The Postgres
//! store, the in-memory fixtures and the caching wrapper all implement it,
//! so the backend is picked when the server starts.

mod cached;
mod fixtures;
mod postgres;

pub use cached::CachedQuoteRepository;
pub use fixtures::FixtureQuoteRepository;
pub use postgres::PgQuoteRepository;

use kundapay_sdk::objects::{Country, Currency, DiscountType, PaymentMethod, ReceivingMethod};
use rust_decimal::Decimal;
use thiserror::Error;
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("malformed {table} row: {reason}")]
    Malformed { table: &'static str, reason: String },
}

/// Lookup key of a fee rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FeeKey {
    pub origin: Country,
    pub destination: Country,
    pub payment: PaymentMethod,
    pub receiving: ReceivingMethod,
}

#[async_trait::async_trait]
pub trait QuoteRepository: Send + Sync {
    /// Every stored rate for the pair. More than one row means the table is
    /// ambiguous and the caller treats the rate as unavailable.
    async fn exchange_rates(&self, from: Currency, to: Currency) -> Result<Vec<Decimal>, StoreError>;

    /// Every stored fee percentage for the corridor and method pair.
    async fn fee_rules(&self, key: FeeKey) -> Result<Vec<Decimal>, StoreError>;

    /// Validate `code` for transfers in `direction`.
    async fn validate_promo_code(
        &self,
        code: &str,
        direction: &str,
    ) -> Result<PromoCodeValidation, StoreError>;
}

/// Outcome of a promo-code check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromoCodeValidation {
    pub valid: bool,
    pub message: String,
    pub discount_type: Option<DiscountType>,
    pub discount_value: Option<Decimal>,
    pub promo_code_id: Option<Uuid>,
}

impl PromoCodeValidation {
    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            message: message.into(),
            discount_type: None,
            discount_value: None,
            promo_code_id: None,
        }
    }

    pub fn accepted(promo: &PromoCode) -> Self {
        Self {
            valid: true,
            message: "promo code applied".to_owned(),
            discount_type: Some(promo.discount_type),
            discount_value: Some(promo.discount_value),
            promo_code_id: Some(promo.id),
        }
    }
}

/// A promo code as stored in `promo_codes`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromoCode {
    pub id: Uuid,
    pub code: String,
    pub direction: String,
    pub discount_type: DiscountType,
    pub discount_value: Decimal,
    pub starts_at: Option<OffsetDateTime>,
    pub ends_at: Option<OffsetDateTime>,
    pub max_uses: Option<u32>,
    pub current_uses: u32,
    pub active: bool,
}

impl PromoCode {
    /// Check the code against a transfer direction at `now`.
    ///
    /// Mirrors the `validate_promo_code` database function.
    pub fn validate(&self, direction: &str, now: OffsetDateTime) -> PromoCodeValidation {
        if self.direction != direction {
            return PromoCodeValidation::rejected("promo code not valid for this corridor");
        }
        if !self.active {
            return PromoCodeValidation::rejected("promo code is not active");
        }
        if self.starts_at.is_some_and(|start| now < start) {
            return PromoCodeValidation::rejected("promo code is not yet valid");
        }
        if self.ends_at.is_some_and(|end| now > end) {
            return PromoCodeValidation::rejected("promo code has expired");
        }
        if self.max_uses.is_some_and(|cap| self.current_uses >= cap) {
            return PromoCodeValidation::rejected("promo code usage limit reached");
        }
        PromoCodeValidation::accepted(self)
    }
}
