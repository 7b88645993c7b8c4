pub mod exchange_rates;
pub mod promo_codes;
pub mod transfer_fees;
