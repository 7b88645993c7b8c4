use super::{FeeKey, PromoCodeValidation, QuoteRepository, StoreError};
use kundapay_sdk::objects::Currency;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;

#[derive(Debug)]
struct Entry {
    stored_at: Instant,
    rows: Vec<Decimal>,
}

#[derive(Debug)]
struct TtlMap<K> {
    ttl: Duration,
    entries: RwLock<HashMap<K, Entry>>,
}

impl<K: Eq + Hash> TtlMap<K> {
    fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: RwLock::new(HashMap::new()),
        }
    }

    async fn get(&self, key: &K) -> Option<Vec<Decimal>> {
        let entries = self.entries.read().await;
        entries
            .get(key)
            .filter(|entry| entry.stored_at.elapsed() < self.ttl)
            .map(|entry| entry.rows.clone())
    }

    async fn insert(&self, key: K, rows: Vec<Decimal>) {
        let mut entries = self.entries.write().await;
        let ttl = self.ttl;
        entries.retain(|_, entry| entry.stored_at.elapsed() < ttl);
        entries.insert(
            key,
            Entry {
                stored_at: Instant::now(),
                rows,
            },
        );
    }
}

/// Caches rate and fee lookups of another repository for a fixed TTL.
///
/// Promo validation always goes to the inner repository since usage counts
/// and validity windows change independently of the tables.
pub struct CachedQuoteRepository {
    inner: Arc<dyn QuoteRepository>,
    rates: TtlMap<(Currency, Currency)>,
    fees: TtlMap<FeeKey>,
}

impl CachedQuoteRepository {
    pub fn new(inner: Arc<dyn QuoteRepository>, ttl: Duration) -> Self {
        Self {
            inner,
            rates: TtlMap::new(ttl),
            fees: TtlMap::new(ttl),
        }
    }
}

#[async_trait::async_trait]
impl QuoteRepository for CachedQuoteRepository {
    async fn exchange_rates(&self, from: Currency, to: Currency) -> Result<Vec<Decimal>, StoreError> {
        if let Some(rows) = self.rates.get(&(from, to)).await {
            tracing::trace!(%from, %to, "exchange rate cache hit");
            return Ok(rows);
        }
        let rows = self.inner.exchange_rates(from, to).await?;
        self.rates.insert((from, to), rows.clone()).await;
        Ok(rows)
    }

    async fn fee_rules(&self, key: FeeKey) -> Result<Vec<Decimal>, StoreError> {
        if let Some(rows) = self.fees.get(&key).await {
            tracing::trace!(?key, "fee rule cache hit");
            return Ok(rows);
        }
        let rows = self.inner.fee_rules(key).await?;
        self.fees.insert(key, rows.clone()).await;
        Ok(rows)
    }

    async fn validate_promo_code(
        &self,
        code: &str,
        direction: &str,
    ) -> Result<PromoCodeValidation, StoreError> {
        self.inner.validate_promo_code(code, direction).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::FixtureQuoteRepository;

    #[tokio::test(start_paused = true)]
    async fn test_rates_cached_until_ttl() {
        let fixtures = Arc::new(FixtureQuoteRepository::seeded());
        let cached = CachedQuoteRepository::new(fixtures.clone(), Duration::from_secs(60));

        let first = cached.exchange_rates(Currency::Eur, Currency::Xaf).await.unwrap();
        let second = cached.exchange_rates(Currency::Eur, Currency::Xaf).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(fixtures.lookups(), 1);

        tokio::time::advance(Duration::from_secs(61)).await;
        cached.exchange_rates(Currency::Eur, Currency::Xaf).await.unwrap();
        assert_eq!(fixtures.lookups(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_promo_never_cached() {
        let fixtures = Arc::new(FixtureQuoteRepository::seeded());
        let cached = CachedQuoteRepository::new(fixtures.clone(), Duration::from_secs(60));

        cached.validate_promo_code("X", "FRANCE_TO_GABON").await.unwrap();
        cached.validate_promo_code("X", "FRANCE_TO_GABON").await.unwrap();
        assert_eq!(fixtures.lookups(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_ttl_passes_through() {
        let fixtures = Arc::new(FixtureQuoteRepository::seeded());
        let cached = CachedQuoteRepository::new(fixtures.clone(), Duration::ZERO);

        cached.exchange_rates(Currency::Eur, Currency::Xaf).await.unwrap();
        cached.exchange_rates(Currency::Eur, Currency::Xaf).await.unwrap();
        assert_eq!(fixtures.lookups(), 2);
    }
}
