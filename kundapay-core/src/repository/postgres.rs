use super::{FeeKey, PromoCodeValidation, QuoteRepository, StoreError};
use crate::entities::exchange_rates::GetExchangeRates;
use crate::entities::promo_codes::{PromoCodeCheck, ValidatePromoCode};
use crate::entities::transfer_fees::GetTransferFees;
use crate::framework::DatabaseProcessor;
use kanau::processor::Processor;
use kundapay_sdk::objects::{Currency, DiscountType};
use rust_decimal::Decimal;

/// Lookups against the `exchange_rates`, `transfer_fees` and `promo_codes`
/// tables.
#[derive(Debug, Clone)]
pub struct PgQuoteRepository {
    processor: DatabaseProcessor,
}

impl PgQuoteRepository {
    pub fn new(processor: DatabaseProcessor) -> Self {
        Self { processor }
    }
}

fn parse_discount_type(raw: &str) -> Result<DiscountType, StoreError> {
    match raw {
        "PERCENTAGE" => Ok(DiscountType::Percentage),
        "FIXED" => Ok(DiscountType::Fixed),
        other => Err(StoreError::Malformed {
            table: "promo_codes",
            reason: format!("unknown discount type {other:?}"),
        }),
    }
}

impl TryFrom<PromoCodeCheck> for PromoCodeValidation {
    type Error = StoreError;

    fn try_from(check: PromoCodeCheck) -> Result<Self, StoreError> {
        let discount_type = check
            .discount_type
            .as_deref()
            .map(parse_discount_type)
            .transpose()?;
        Ok(PromoCodeValidation {
            valid: check.valid,
            message: check.message.unwrap_or_default(),
            discount_type,
            discount_value: check.discount_value,
            promo_code_id: check.promo_code_id,
        })
    }
}

#[async_trait::async_trait]
impl QuoteRepository for PgQuoteRepository {
    async fn exchange_rates(&self, from: Currency, to: Currency) -> Result<Vec<Decimal>, StoreError> {
        Ok(self.processor.process(GetExchangeRates { from, to }).await?)
    }

    async fn fee_rules(&self, key: FeeKey) -> Result<Vec<Decimal>, StoreError> {
        Ok(self.processor.process(GetTransferFees { key }).await?)
    }

    async fn validate_promo_code(
        &self,
        code: &str,
        direction: &str,
    ) -> Result<PromoCodeValidation, StoreError> {
        let check = self
            .processor
            .process(ValidatePromoCode {
                code: code.to_owned(),
                direction: direction.to_owned(),
            })
            .await?;
        match check {
            Some(check) => check.try_into(),
            None => Ok(PromoCodeValidation::rejected("unknown promo code")),
        }
    }
}
