use super::{FeeKey, PromoCode, PromoCodeValidation, QuoteRepository, StoreError};
use kundapay_sdk::objects::{Country, Currency, PaymentMethod, ReceivingMethod};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use time::OffsetDateTime;

/// In-memory rate, fee and promo tables.
///
/// Seeded with the same rows as the initial database migration, so a server
/// running on fixtures quotes exactly like a freshly migrated database.
#[derive(Debug, Default)]
pub struct FixtureQuoteRepository {
    rates: HashMap<(Currency, Currency), Vec<Decimal>>,
    fees: HashMap<FeeKey, Vec<Decimal>>,
    promo_codes: Vec<PromoCode>,
    lookups: AtomicUsize,
}

impl FixtureQuoteRepository {
    /// Empty tables.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The default KundaPay rates and fees.
    pub fn seeded() -> Self {
        use Country::*;

        let rates = [
            (Currency::Eur, Currency::Xaf, Decimal::new(655_96, 2)),
            (Currency::Xaf, Currency::Eur, Decimal::new(1524, 6)),
            (Currency::Eur, Currency::Cny, Decimal::new(7_5099, 4)),
            (Currency::Cny, Currency::Eur, Decimal::new(133_157, 6)),
            (Currency::Xaf, Currency::Cny, Decimal::new(11_445, 6)),
            (Currency::Cny, Currency::Xaf, Decimal::new(87_34, 2)),
        ];
        let fees = [
            (Ga, Cn, PaymentMethod::AirtelMoney, ReceivingMethod::Alipay, Decimal::new(85, 3)),
            (Ga, Cn, PaymentMethod::Cash, ReceivingMethod::Alipay, Decimal::new(75, 3)),
            (Fr, Ga, PaymentMethod::BankTransfer, ReceivingMethod::AirtelMoney, Decimal::new(5, 3)),
            (Fr, Ga, PaymentMethod::BankTransfer, ReceivingMethod::Cash, Decimal::new(4, 3)),
            (Ga, Fr, PaymentMethod::AirtelMoney, ReceivingMethod::BankTransfer, Decimal::new(55, 3)),
            (Ga, Fr, PaymentMethod::Cash, ReceivingMethod::BankTransfer, Decimal::new(4, 2)),
        ];

        let mut repository = Self::empty();
        for (from, to, rate) in rates {
            repository = repository.with_rate(from, to, rate);
        }
        for (origin, destination, payment, receiving, fee) in fees {
            let key = FeeKey {
                origin,
                destination,
                payment,
                receiving,
            };
            repository = repository.with_fee(key, fee);
        }
        repository
    }

    pub fn with_rate(mut self, from: Currency, to: Currency, rate: Decimal) -> Self {
        self.rates.entry((from, to)).or_default().push(rate);
        self
    }

    pub fn with_fee(mut self, key: FeeKey, fee_percentage: Decimal) -> Self {
        self.fees.entry(key).or_default().push(fee_percentage);
        self
    }

    pub fn with_promo_code(mut self, promo: PromoCode) -> Self {
        self.promo_codes.push(promo);
        self
    }

    /// Number of lookups served so far.
    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::Relaxed)
    }

    fn count(&self) {
        self.lookups.fetch_add(1, Ordering::Relaxed);
    }
}

#[async_trait::async_trait]
impl QuoteRepository for FixtureQuoteRepository {
    async fn exchange_rates(&self, from: Currency, to: Currency) -> Result<Vec<Decimal>, StoreError> {
        self.count();
        Ok(self.rates.get(&(from, to)).cloned().unwrap_or_default())
    }

    async fn fee_rules(&self, key: FeeKey) -> Result<Vec<Decimal>, StoreError> {
        self.count();
        Ok(self.fees.get(&key).cloned().unwrap_or_default())
    }

    async fn validate_promo_code(
        &self,
        code: &str,
        direction: &str,
    ) -> Result<PromoCodeValidation, StoreError> {
        self.count();
        let mut same_code = self.promo_codes.iter().filter(|promo| promo.code == code).peekable();
        let Some(first) = same_code.peek().copied() else {
            return Ok(PromoCodeValidation::rejected("unknown promo code"));
        };
        let promo = same_code
            .find(|promo| promo.direction == direction)
            .unwrap_or(first);
        Ok(promo.validate(direction, OffsetDateTime::now_utc()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kundapay_sdk::objects::DiscountType;
    use uuid::Uuid;

    #[tokio::test]
    async fn test_seeded_tables() {
        let repository = FixtureQuoteRepository::seeded();
        assert_eq!(
            repository.exchange_rates(Currency::Eur, Currency::Xaf).await.unwrap(),
            vec![Decimal::new(655_96, 2)]
        );
        assert!(repository
            .exchange_rates(Currency::Usd, Currency::Xaf)
            .await
            .unwrap()
            .is_empty());
        let key = FeeKey {
            origin: Country::Fr,
            destination: Country::Ga,
            payment: PaymentMethod::BankTransfer,
            receiving: ReceivingMethod::AirtelMoney,
        };
        assert_eq!(repository.fee_rules(key).await.unwrap(), vec![Decimal::new(5, 3)]);
        assert_eq!(repository.lookups(), 3);
    }

    #[tokio::test]
    async fn test_promo_lookup() {
        let repository = FixtureQuoteRepository::empty().with_promo_code(PromoCode {
            id: Uuid::nil(),
            code: "CHINA10".to_owned(),
            direction: "GABON_TO_CHINA".to_owned(),
            discount_type: DiscountType::Percentage,
            discount_value: Decimal::from(10),
            starts_at: None,
            ends_at: None,
            max_uses: None,
            current_uses: 0,
            active: true,
        });

        let v = repository.validate_promo_code("NOPE", "GABON_TO_CHINA").await.unwrap();
        assert_eq!(v.message, "unknown promo code");

        let v = repository.validate_promo_code("CHINA10", "FRANCE_TO_GABON").await.unwrap();
        assert_eq!(v.message, "promo code not valid for this corridor");

        let v = repository.validate_promo_code("CHINA10", "GABON_TO_CHINA").await.unwrap();
        assert!(v.valid);
    }
}
