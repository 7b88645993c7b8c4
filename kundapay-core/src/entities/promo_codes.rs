use crate::framework::DatabaseProcessor;
use kanau::processor::Processor;
use rust_decimal::Decimal;
use uuid::Uuid;

/// One row returned by the `validate_promo_code` database function.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct PromoCodeCheck {
    pub valid: bool,
    pub message: Option<String>,
    pub discount_type: Option<String>,
    pub discount_value: Option<Decimal>,
    pub promo_code_id: Option<Uuid>,
}

#[derive(Debug, Clone)]
/// Validate a promo code for a transfer direction.
pub struct ValidatePromoCode {
    pub code: String,
    pub direction: String,
}

impl Processor<ValidatePromoCode> for DatabaseProcessor {
    type Output = Option<PromoCodeCheck>;
    type Error = sqlx::Error;
    #[tracing::instrument(skip_all, err, name = "SQL:ValidatePromoCode")]
    async fn process(&self, query: ValidatePromoCode) -> Result<Option<PromoCodeCheck>, sqlx::Error> {
        let check = sqlx::query_as::<_, PromoCodeCheck>(
            r#"
            SELECT valid, message, discount_type, discount_value, promo_code_id
            FROM validate_promo_code($1, $2)
            "#,
        )
        .bind(query.code)
        .bind(query.direction)
        .fetch_optional(&self.pool)
        .await?;
        Ok(check)
    }
}
