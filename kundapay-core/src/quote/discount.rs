//! Promo-code discounts on the fee percentage.

use crate::quote::QuoteError;
use crate::repository::PromoCodeValidation;
use kundapay_sdk::objects::DiscountType;
use rust_decimal::Decimal;

/// A validated promo discount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Discount {
    /// Percent off the fee percentage (`50` halves the fee).
    Percentage(Decimal),
    /// Amount off the fee, in units of the anchor currency.
    Fixed(Decimal),
}

impl Discount {
    pub fn new(discount_type: DiscountType, value: Decimal) -> Self {
        match discount_type {
            DiscountType::Percentage => Discount::Percentage(value),
            DiscountType::Fixed => Discount::Fixed(value),
        }
    }

    /// Turn a validation response into a discount, or the user-facing error
    /// explaining why the code cannot be used.
    pub fn from_validation(validation: &PromoCodeValidation) -> Result<Self, QuoteError> {
        if !validation.valid {
            let message = if validation.message.trim().is_empty() {
                "invalid promo code".to_owned()
            } else {
                validation.message.clone()
            };
            return Err(QuoteError::PromoCodeInvalid(message));
        }
        match (validation.discount_type, validation.discount_value) {
            (Some(discount_type), Some(value)) => Ok(Discount::new(discount_type, value)),
            _ => Err(QuoteError::PromoCodeInvalid(
                "promo code has no discount".to_owned(),
            )),
        }
    }

    /// Apply the discount to `fee_percentage`.
    ///
    /// A fixed discount is converted to a fraction of `anchor_amount`, the
    /// amount the user typed. The result never goes below zero.
    pub fn apply_to(self, fee_percentage: Decimal, anchor_amount: Decimal) -> Decimal {
        let discounted = match self {
            Discount::Percentage(value) => {
                fee_percentage * (Decimal::ONE - value / Decimal::ONE_HUNDRED)
            }
            Discount::Fixed(value) => match value.checked_div(anchor_amount) {
                Some(equivalent) => fee_percentage - equivalent,
                // Quotient too large to represent: the discount exceeds any fee.
                None => Decimal::ZERO,
            },
        };
        discounted.max(Decimal::ZERO)
    }
}
