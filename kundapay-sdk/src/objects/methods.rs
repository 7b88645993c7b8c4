//! Payment and receiving methods.
//!
//! The wire and database representation of every method is its
//! `SCREAMING_SNAKE_CASE` name (e.g. `AIRTEL_MONEY`).

use serde::{Deserialize, Serialize};

/// How the sender pays KundaPay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    AirtelMoney,
    MoovMoney,
    Cash,
    BankTransfer,
    Wero,
    Card,
    Paypal,
    Ach,
    ApplePay,
    Interac,
    Alipay,
}

impl PaymentMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            PaymentMethod::AirtelMoney => "AIRTEL_MONEY",
            PaymentMethod::MoovMoney => "MOOV_MONEY",
            PaymentMethod::Cash => "CASH",
            PaymentMethod::BankTransfer => "BANK_TRANSFER",
            PaymentMethod::Wero => "WERO",
            PaymentMethod::Card => "CARD",
            PaymentMethod::Paypal => "PAYPAL",
            PaymentMethod::Ach => "ACH",
            PaymentMethod::ApplePay => "APPLE_PAY",
            PaymentMethod::Interac => "INTERAC",
            PaymentMethod::Alipay => "ALIPAY",
        }
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the beneficiary receives the funds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReceivingMethod {
    AirtelMoney,
    MoovMoney,
    Cash,
    BankTransfer,
    Wero,
    Paypal,
    Alipay,
    Ach,
    VisaDirect,
    MastercardSend,
    Interac,
    Card,
}

impl ReceivingMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            ReceivingMethod::AirtelMoney => "AIRTEL_MONEY",
            ReceivingMethod::MoovMoney => "MOOV_MONEY",
            ReceivingMethod::Cash => "CASH",
            ReceivingMethod::BankTransfer => "BANK_TRANSFER",
            ReceivingMethod::Wero => "WERO",
            ReceivingMethod::Paypal => "PAYPAL",
            ReceivingMethod::Alipay => "ALIPAY",
            ReceivingMethod::Ach => "ACH",
            ReceivingMethod::VisaDirect => "VISA_DIRECT",
            ReceivingMethod::MastercardSend => "MASTERCARD_SEND",
            ReceivingMethod::Interac => "INTERAC",
            ReceivingMethod::Card => "CARD",
        }
    }
}

impl std::fmt::Display for ReceivingMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
