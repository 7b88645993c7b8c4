use crate::corridor::Corridor;
use crate::quote::amount::{AmountInputs, ResolvedAmounts, Side, resolve_amounts};
use crate::quote::discount::Discount;
use crate::quote::limits::{LimitPolicy, LimitRule};
use crate::quote::QuoteError;
use crate::repository::{FeeKey, QuoteRepository};
use kundapay_sdk::objects::{Currency, PaymentMethod, QuoteRequest, ReceivingMethod, TransferQuote};
use rust_decimal::Decimal;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Computes transfer quotes from the rate, fee and promo tables.
///
/// Cloning is cheap; clones share the repository and the limit policy.
#[derive(Clone)]
pub struct QuoteCalculator {
    repository: Arc<dyn QuoteRepository>,
    limits: Arc<RwLock<LimitPolicy>>,
}

impl QuoteCalculator {
    pub fn new(repository: Arc<dyn QuoteRepository>, limits: LimitPolicy) -> Self {
        Self {
            repository,
            limits: Arc::new(RwLock::new(limits)),
        }
    }

    /// Swap the limit policy used by every clone of this calculator.
    pub async fn replace_limits(&self, limits: LimitPolicy) {
        *self.limits.write().await = limits;
    }

    pub async fn limits(&self) -> LimitPolicy {
        self.limits.read().await.clone()
    }

    /// Quote a transfer.
    ///
    /// Steps run in a fixed order and the first failure aborts the quote:
    /// amount, corridor, fee, rate, promo, amounts, limits.
    #[tracing::instrument(
        skip_all,
        fields(
            direction = %request.direction,
            payment = %request.payment_method,
            receiving = %request.receiving_method,
        )
    )]
    pub async fn calculate_transfer_details(
        &self,
        request: &QuoteRequest,
    ) -> Result<TransferQuote, QuoteError> {
        if request.amount <= Decimal::ZERO {
            return Err(QuoteError::InvalidAmount);
        }
        let corridor = Corridor::resolve(&request.direction)?;
        let sender_currency = corridor.sender_currency();
        let receiver_currency = corridor.receiver_currency();

        let original_fee = self
            .fee_percentage(corridor, request.payment_method, request.receiving_method)
            .await?;
        let exchange_rate = self.exchange_rate(sender_currency, receiver_currency).await?;

        let promo_code = request
            .promo_code
            .as_deref()
            .map(str::trim)
            .filter(|code| !code.is_empty());
        let (effective_fee, promo_code_id) = match promo_code {
            Some(code) => {
                self.apply_promo(code, &corridor, original_fee, request.amount)
                    .await?
            }
            None => (original_fee, None),
        };

        let amounts = resolve_amounts(AmountInputs {
            anchor_amount: request.amount,
            anchor: Side::from_receive_flag(request.is_receive_amount),
            exchange_rate,
            effective_fee,
            sender_currency,
            receiver_currency,
        })?;

        self.check_limits(&corridor, &amounts).await?;

        tracing::debug!(
            amount_sent = %amounts.amount_sent,
            amount_received = %amounts.amount_received,
            fees = %amounts.fees,
            "quote calculated"
        );

        Ok(TransferQuote {
            amount_sent: amounts.amount_sent,
            fees: amounts.fees,
            amount_received: amounts.amount_received,
            sender_currency,
            receiver_currency,
            exchange_rate,
            direction: corridor.token(),
            payment_method: request.payment_method,
            receiving_method: request.receiving_method,
            promo_code_id,
            original_fee_percentage: original_fee,
            effective_fee_percentage: effective_fee,
        })
    }

    async fn fee_percentage(
        &self,
        corridor: Corridor,
        payment: PaymentMethod,
        receiving: ReceivingMethod,
    ) -> Result<Decimal, QuoteError> {
        let unavailable = || QuoteError::FeeUnavailable {
            origin: corridor.origin,
            destination: corridor.destination,
            payment,
            receiving,
        };
        let rows = self
            .repository
            .fee_rules(FeeKey {
                origin: corridor.origin,
                destination: corridor.destination,
                payment,
                receiving,
            })
            .await?;
        let [fee] = rows.as_slice() else {
            if rows.len() > 1 {
                tracing::warn!(%corridor, %payment, %receiving, "ambiguous fee rules");
            }
            return Err(unavailable());
        };
        if *fee < Decimal::ZERO || *fee >= Decimal::ONE {
            tracing::warn!(%corridor, %fee, "fee percentage out of range");
            return Err(unavailable());
        }
        Ok(*fee)
    }

    async fn exchange_rate(&self, from: Currency, to: Currency) -> Result<Decimal, QuoteError> {
        if from == to {
            return Ok(Decimal::ONE);
        }
        let rows = self.repository.exchange_rates(from, to).await?;
        let [rate] = rows.as_slice() else {
            if rows.len() > 1 {
                tracing::warn!(%from, %to, "ambiguous exchange rates");
            }
            return Err(QuoteError::RateUnavailable { from, to });
        };
        if *rate <= Decimal::ZERO {
            tracing::warn!(%from, %to, %rate, "non-positive exchange rate");
            return Err(QuoteError::RateUnavailable { from, to });
        }
        Ok(*rate)
    }

    async fn apply_promo(
        &self,
        code: &str,
        corridor: &Corridor,
        original_fee: Decimal,
        anchor_amount: Decimal,
    ) -> Result<(Decimal, Option<Uuid>), QuoteError> {
        let validation = self
            .repository
            .validate_promo_code(code, &corridor.token())
            .await?;
        let discount = Discount::from_validation(&validation)?;
        Ok((
            discount.apply_to(original_fee, anchor_amount),
            validation.promo_code_id,
        ))
    }

    async fn check_limits(
        &self,
        corridor: &Corridor,
        amounts: &ResolvedAmounts,
    ) -> Result<(), QuoteError> {
        let rules: Vec<LimitRule> = self
            .limits
            .read()
            .await
            .rules_for(corridor)
            .cloned()
            .collect();

        for rule in rules {
            let amount = if rule.currency == corridor.sender_currency() {
                amounts.amount_sent
            } else if rule.currency == corridor.receiver_currency() {
                amounts.amount_received
            } else {
                let rate = self
                    .exchange_rate(corridor.sender_currency(), rule.currency)
                    .await?;
                amounts
                    .amount_sent
                    .checked_mul(rate)
                    .ok_or(QuoteError::InvalidAmount)?
            };
            rule.check(amount)?;
        }
        Ok(())
    }
}
