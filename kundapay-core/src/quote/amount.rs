//! Amount resolution and currency rounding.
//!
//! CFA franc amounts are settled in multiples of 5: the sent side rounds up
//! so the sender always covers the fee basis, the received side rounds down
//! so the platform never over-disburses. Other currencies round to cents.

use crate::quote::QuoteError;
use kundapay_sdk::objects::Currency;
use rust_decimal::{Decimal, RoundingStrategy};

const FIVE: Decimal = Decimal::from_parts(5, 0, 0, false, 0);

/// Which side of the transfer the user typed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Send,
    Receive,
}

impl Side {
    pub fn from_receive_flag(is_receive_amount: bool) -> Self {
        if is_receive_amount {
            Side::Receive
        } else {
            Side::Send
        }
    }
}

/// Round an amount on the given side of the transfer.
pub fn round_amount(amount: Decimal, currency: Currency, side: Side) -> Decimal {
    if currency.rounds_to_five() {
        let fives = amount / FIVE;
        let fives = match side {
            Side::Send => fives.ceil(),
            Side::Receive => fives.floor(),
        };
        return fives * FIVE;
    }
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Round a fee amount in the sender currency.
pub fn round_fee(fee: Decimal, currency: Currency) -> Decimal {
    let dp = if currency.rounds_to_five() { 0 } else { 2 };
    fee.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

/// Both sides of a transfer and its fee, rounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedAmounts {
    pub amount_sent: Decimal,
    pub amount_received: Decimal,
    pub fees: Decimal,
}

/// Inputs of [`resolve_amounts`].
#[derive(Debug, Clone, Copy)]
pub struct AmountInputs {
    pub anchor_amount: Decimal,
    pub anchor: Side,
    pub exchange_rate: Decimal,
    pub effective_fee: Decimal,
    pub sender_currency: Currency,
    pub receiver_currency: Currency,
}

/// Compute the complementary amount from the anchor.
///
/// - send anchor: `received = sent × (1 − fee) × rate`
/// - receive anchor: `sent = received / (rate × (1 − fee))`
///
/// The fee is always `sent × fee`, taken after `sent` is rounded.
///
/// An anchor too small to leave a positive amount on both sides after
/// rounding is rejected as [`QuoteError::InvalidAmount`].
pub fn resolve_amounts(inputs: AmountInputs) -> Result<ResolvedAmounts, QuoteError> {
    let AmountInputs {
        anchor_amount,
        anchor,
        exchange_rate,
        effective_fee,
        sender_currency,
        receiver_currency,
    } = inputs;

    let net_share = Decimal::ONE - effective_fee;

    let (amount_sent, amount_received) = match anchor {
        Side::Send => {
            let received = anchor_amount
                .checked_mul(net_share)
                .and_then(|v| v.checked_mul(exchange_rate))
                .ok_or(QuoteError::InvalidAmount)?;
            (anchor_amount, received)
        }
        Side::Receive => {
            let divisor = exchange_rate.checked_mul(net_share).ok_or(QuoteError::InvalidAmount)?;
            let sent = anchor_amount
                .checked_div(divisor)
                .ok_or(QuoteError::RateUnavailable {
                    from: sender_currency,
                    to: receiver_currency,
                })?;
            (sent, anchor_amount)
        }
    };

    let amount_sent = round_amount(amount_sent, sender_currency, Side::Send);
    let amount_received = round_amount(amount_received, receiver_currency, Side::Receive);
    if amount_sent <= Decimal::ZERO || amount_received <= Decimal::ZERO {
        return Err(QuoteError::InvalidAmount);
    }
    let fees = amount_sent
        .checked_mul(effective_fee)
        .map(|fee| round_fee(fee, sender_currency))
        .ok_or(QuoteError::InvalidAmount)?;

    Ok(ResolvedAmounts {
        amount_sent,
        amount_received,
        fees,
    })
}
