//! Display formatting for amounts, in the French style used by the KundaPay
//! frontends: space-grouped thousands and a comma decimal separator.

use crate::objects::Currency;
use rust_decimal::{Decimal, RoundingStrategy};

/// Format an amount for display.
///
/// CFA franc amounts are shown rounded to the nearest 5 with the `FCFA`
/// suffix (`65 265 FCFA`); every other currency is shown with two decimals
/// followed by its code (`1 234,50 EUR`).
pub fn format_currency(amount: Decimal, currency: Currency) -> String {
    if currency.rounds_to_five() {
        let five = Decimal::from(5);
        let rounded = (amount / five).round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            * five;
        return format_exact(rounded, currency);
    }
    format_exact(amount, currency)
}

/// Like [`format_currency`], but CFA franc amounts are only rounded to whole
/// units. Used for configured ceilings, which must be shown verbatim.
pub fn format_exact(amount: Decimal, currency: Currency) -> String {
    if currency.rounds_to_five() {
        let rounded = amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
        let text = format!("{rounded:.0}");
        return format!("{} FCFA", group_thousands(&text));
    }

    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let text = format!("{rounded:.2}");
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), "00"));
    format!(
        "{},{} {}",
        group_thousands(int_part),
        frac_part,
        currency.code()
    )
}

fn group_thousands(digits: &str) -> String {
    let (sign, digits) = match digits.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", digits),
    };
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(ch);
    }
    format!("{sign}{grouped}")
}
