use crate::framework::DatabaseProcessor;
use crate::repository::FeeKey;
use kanau::processor::Processor;
use rust_decimal::Decimal;

#[derive(Debug, Clone, Copy)]
/// Fee percentages stored for a corridor and method pair.
pub struct GetTransferFees {
    pub key: FeeKey,
}

impl Processor<GetTransferFees> for DatabaseProcessor {
    type Output = Vec<Decimal>;
    type Error = sqlx::Error;
    #[tracing::instrument(skip_all, err, name = "SQL:GetTransferFees")]
    async fn process(&self, query: GetTransferFees) -> Result<Vec<Decimal>, sqlx::Error> {
        let fees = sqlx::query_scalar::<_, Decimal>(
            r#"
            SELECT fee_percentage
            FROM transfer_fees
            WHERE origin_country = $1
              AND destination_country = $2
              AND payment_method = $3
              AND receiving_method = $4
            "#,
        )
        .bind(query.key.origin.code())
        .bind(query.key.destination.code())
        .bind(query.key.payment.as_str())
        .bind(query.key.receiving.as_str())
        .fetch_all(&self.pool)
        .await?;
        Ok(fees)
    }
}
