use crate::framework::DatabaseProcessor;
use kanau::processor::Processor;
use kundapay_sdk::objects::Currency;
use rust_decimal::Decimal;

#[derive(Debug, Clone, Copy)]
/// Rates stored for one currency pair.
pub struct GetExchangeRates {
    pub from: Currency,
    pub to: Currency,
}

impl Processor<GetExchangeRates> for DatabaseProcessor {
    type Output = Vec<Decimal>;
    type Error = sqlx::Error;
    #[tracing::instrument(skip_all, err, name = "SQL:GetExchangeRates")]
    async fn process(&self, query: GetExchangeRates) -> Result<Vec<Decimal>, sqlx::Error> {
        let rates = sqlx::query_scalar::<_, Decimal>(
            r#"
            SELECT rate
            FROM exchange_rates
            WHERE from_currency = $1 AND to_currency = $2
            "#,
        )
        .bind(query.from.code())
        .bind(query.to.code())
        .fetch_all(&self.pool)
        .await?;
        Ok(rates)
    }
}
