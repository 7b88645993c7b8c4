//! Corridor transfer ceilings.

use crate::corridor::Corridor;
use crate::quote::QuoteError;
use kundapay_sdk::format::format_exact;
use kundapay_sdk::objects::{Country, Currency};
use rust_decimal::Decimal;

/// Which end of the corridor a ceiling is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LimitScope {
    /// Transfers leaving `country`.
    Origin(Country),
    /// Transfers arriving in `country`.
    Destination(Country),
}

/// A maximum transfer amount, expressed in `currency`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LimitRule {
    pub scope: LimitScope,
    pub ceiling: Decimal,
    pub currency: Currency,
    /// Optional human equivalent shown next to the ceiling, e.g. `300 EUR`.
    pub reference: Option<String>,
}

impl LimitRule {
    pub fn applies_to(&self, corridor: &Corridor) -> bool {
        match self.scope {
            LimitScope::Origin(country) => corridor.origin == country,
            LimitScope::Destination(country) => corridor.destination == country,
        }
    }

    /// User-facing description of the ceiling.
    pub fn description(&self) -> String {
        let subject = match self.scope {
            LimitScope::Origin(country) => format!("transfers from {}", country.display_name()),
            LimitScope::Destination(country) => format!("transfers to {}", country.display_name()),
        };
        let ceiling = format_exact(self.ceiling, self.currency);
        match &self.reference {
            Some(reference) => format!("{subject} are limited to {ceiling} ({reference})"),
            None => format!("{subject} are limited to {ceiling}"),
        }
    }

    /// Check an amount already expressed in this rule's currency.
    pub fn check(&self, amount: Decimal) -> Result<(), QuoteError> {
        if amount > self.ceiling {
            return Err(QuoteError::TransferLimitExceeded(self.description()));
        }
        Ok(())
    }
}

/// The set of ceilings enforced on computed quotes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LimitPolicy {
    rules: Vec<LimitRule>,
}

impl LimitPolicy {
    pub fn new(rules: Vec<LimitRule>) -> Self {
        Self { rules }
    }

    /// No ceilings at all.
    pub fn unlimited() -> Self {
        Self::default()
    }

    /// Transfers leaving Gabon are capped at the CFA equivalent of 300 EUR.
    pub fn kundapay_defaults() -> Self {
        Self::new(vec![LimitRule {
            scope: LimitScope::Origin(Country::Ga),
            ceiling: Decimal::from(196_788),
            currency: Currency::Xaf,
            reference: Some("300 EUR".to_owned()),
        }])
    }

    pub fn rules(&self) -> &[LimitRule] {
        &self.rules
    }

    /// Rules that apply to `corridor`.
    pub fn rules_for<'a>(&'a self, corridor: &'a Corridor) -> impl Iterator<Item = &'a LimitRule> {
        self.rules.iter().filter(move |rule| rule.applies_to(corridor))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rule_scope() {
        let policy = LimitPolicy::kundapay_defaults();
        let outbound = Corridor::new(Country::Ga, Country::Cn);
        let inbound = Corridor::new(Country::Fr, Country::Ga);
        assert_eq!(policy.rules_for(&outbound).count(), 1);
        assert_eq!(policy.rules_for(&inbound).count(), 0);
    }

    #[test]
    fn test_check_at_and_above_ceiling() {
        let policy = LimitPolicy::kundapay_defaults();
        let rule = &policy.rules()[0];
        assert!(rule.check(Decimal::from(196_788)).is_ok());
        match rule.check(Decimal::from(196_790)) {
            Err(QuoteError::TransferLimitExceeded(message)) => assert_eq!(
                message,
                "transfers from Gabon are limited to 196 788 FCFA (300 EUR)"
            ),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_destination_description() {
        let rule = LimitRule {
            scope: LimitScope::Destination(Country::Cn),
            ceiling: Decimal::from(5000),
            currency: Currency::Cny,
            reference: None,
        };
        assert!(rule.applies_to(&Corridor::new(Country::Ga, Country::Cn)));
        assert_eq!(rule.description(), "transfers to China are limited to 5 000,00 CNY");
    }
}
