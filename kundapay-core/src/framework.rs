use sqlx::PgPool;

/// Runs read queries against the pool. Every query type in
/// [`crate::entities`] is a `kanau` processor on this struct.
#[derive(Debug, Clone)]
pub struct DatabaseProcessor {
    pub pool: PgPool,
}

impl DatabaseProcessor {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}
