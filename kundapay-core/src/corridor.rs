//! Corridor resolution.
//!
//! A direction token such as `FRANCE_TO_GABON` names an ordered
//! (origin, destination) country pair. Only the corridors listed in
//! [`SUPPORTED_CORRIDORS`] resolve; everything else is rejected before any
//! store lookup happens.

use crate::quote::QuoteError;
use kundapay_sdk::objects::{Country, CorridorInfo, Currency, PaymentMethod, ReceivingMethod};

/// Every corridor KundaPay operates, in catalogue order.
pub const SUPPORTED_CORRIDORS: [Corridor; 11] = [
    Corridor::new(Country::Fr, Country::Ga),
    Corridor::new(Country::Ga, Country::Fr),
    Corridor::new(Country::Be, Country::Ga),
    Corridor::new(Country::Ga, Country::Be),
    Corridor::new(Country::De, Country::Ga),
    Corridor::new(Country::Ga, Country::De),
    Corridor::new(Country::Ga, Country::Cn),
    Corridor::new(Country::Us, Country::Ga),
    Corridor::new(Country::Ga, Country::Us),
    Corridor::new(Country::Ca, Country::Ga),
    Corridor::new(Country::Ga, Country::Ca),
];

/// An ordered (origin, destination) country pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Corridor {
    pub origin: Country,
    pub destination: Country,
}

impl Corridor {
    pub const fn new(origin: Country, destination: Country) -> Self {
        Self {
            origin,
            destination,
        }
    }

    /// Resolve a direction token to a supported corridor.
    pub fn resolve(token: &str) -> Result<Corridor, QuoteError> {
        let invalid = || QuoteError::InvalidDirection(token.to_owned());

        let (origin, destination) = token.split_once("_TO_").ok_or_else(invalid)?;
        let origin = Country::from_token_name(origin).ok_or_else(invalid)?;
        let destination = Country::from_token_name(destination).ok_or_else(invalid)?;

        let corridor = Corridor::new(origin, destination);
        if !SUPPORTED_CORRIDORS.contains(&corridor) {
            return Err(invalid());
        }
        Ok(corridor)
    }

    /// The canonical direction token, e.g. `GABON_TO_CHINA`.
    pub fn token(&self) -> String {
        format!(
            "{}_TO_{}",
            self.origin.token_name(),
            self.destination.token_name()
        )
    }

    pub fn sender_currency(&self) -> Currency {
        self.origin.currency()
    }

    pub fn receiver_currency(&self) -> Currency {
        self.destination.currency()
    }

    /// Payment methods offered to senders on this corridor.
    pub fn payment_methods(&self) -> &'static [PaymentMethod] {
        use PaymentMethod::*;
        match (self.origin, self.destination) {
            (Country::Fr | Country::Be | Country::De, Country::Ga) => {
                &[BankTransfer, Wero, Card, Paypal]
            }
            (Country::Us, Country::Ga) => &[Card, Ach, ApplePay, Paypal],
            (Country::Ca, Country::Ga) => &[Card, Interac, Paypal],
            (Country::Ga, _) => &[AirtelMoney, MoovMoney, Cash],
            _ => &[],
        }
    }

    /// Receiving methods offered to beneficiaries on this corridor.
    pub fn receiving_methods(&self) -> &'static [ReceivingMethod] {
        use ReceivingMethod::*;
        match (self.origin, self.destination) {
            (_, Country::Ga) => &[AirtelMoney, MoovMoney, Cash],
            (Country::Ga, Country::Fr | Country::Be | Country::De) => {
                &[BankTransfer, Wero, Paypal]
            }
            (Country::Ga, Country::Cn) => &[Alipay],
            (Country::Ga, Country::Us) => &[Ach, VisaDirect, MastercardSend],
            (Country::Ga, Country::Ca) => &[Interac, VisaDirect, MastercardSend],
            _ => &[],
        }
    }

    /// The (payment, receiving) pair preselected for new transfers.
    pub fn default_methods(&self) -> (PaymentMethod, ReceivingMethod) {
        match (self.origin, self.destination) {
            (Country::Us | Country::Ca, Country::Ga) => {
                (PaymentMethod::Card, ReceivingMethod::AirtelMoney)
            }
            (_, Country::Ga) => (PaymentMethod::BankTransfer, ReceivingMethod::AirtelMoney),
            (Country::Ga, Country::Cn) => (PaymentMethod::AirtelMoney, ReceivingMethod::Alipay),
            (Country::Ga, Country::Us) => (PaymentMethod::AirtelMoney, ReceivingMethod::Ach),
            (Country::Ga, Country::Ca) => (PaymentMethod::AirtelMoney, ReceivingMethod::Interac),
            _ => (PaymentMethod::AirtelMoney, ReceivingMethod::BankTransfer),
        }
    }

    /// Catalogue entry for the corridor listing API.
    pub fn info(&self) -> CorridorInfo {
        let (default_payment_method, default_receiving_method) = self.default_methods();
        CorridorInfo {
            direction: self.token(),
            origin: self.origin,
            destination: self.destination,
            sender_currency: self.sender_currency(),
            receiver_currency: self.receiver_currency(),
            payment_methods: self.payment_methods().to_vec(),
            receiving_methods: self.receiving_methods().to_vec(),
            default_payment_method,
            default_receiving_method,
        }
    }
}

impl std::fmt::Display for Corridor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} → {}", self.origin, self.destination)
    }
}

/// The full corridor catalogue.
pub fn catalogue() -> Vec<CorridorInfo> {
    SUPPORTED_CORRIDORS.iter().map(Corridor::info).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_known_tokens() {
        let corridor = Corridor::resolve("FRANCE_TO_GABON").unwrap();
        assert_eq!(corridor.origin, Country::Fr);
        assert_eq!(corridor.destination, Country::Ga);
        assert_eq!(corridor.sender_currency(), Currency::Eur);
        assert_eq!(corridor.receiver_currency(), Currency::Xaf);

        let corridor = Corridor::resolve("GABON_TO_CHINA").unwrap();
        assert_eq!(corridor.sender_currency(), Currency::Xaf);
        assert_eq!(corridor.receiver_currency(), Currency::Cny);
    }

    #[test]
    fn test_resolve_rejects_unknown_tokens() {
        for token in [
            "MARS_TO_GABON",
            "GABON_TO_GABON",
            "FRANCE_TO_CHINA",
            "FRANCE-GABON",
            "france_to_gabon",
            "",
        ] {
            match Corridor::resolve(token) {
                Err(QuoteError::InvalidDirection(t)) => assert_eq!(t, token),
                other => panic!("expected InvalidDirection for {token:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_tokens_round_trip() {
        for corridor in SUPPORTED_CORRIDORS {
            assert_eq!(Corridor::resolve(&corridor.token()).unwrap(), corridor);
        }
    }

    #[test]
    fn test_catalogue_defaults_are_offered() {
        for info in catalogue() {
            assert!(
                info.payment_methods.contains(&info.default_payment_method),
                "{} default payment not offered",
                info.direction
            );
            assert!(
                info.receiving_methods.contains(&info.default_receiving_method),
                "{} default receiving not offered",
                info.direction
            );
        }
    }
}
