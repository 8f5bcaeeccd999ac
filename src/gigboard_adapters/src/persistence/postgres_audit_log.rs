use async_trait::async_trait;
use sqlx::PgPool;

use gigboard_core::{AuditLog, AuditLogError, LoginAttempt};

#[derive(Clone)]
pub struct PostgresAuditLog {
    pool: PgPool,
}

impl PostgresAuditLog {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuditLog for PostgresAuditLog {
    #[tracing::instrument(name = "Recording login attempt in PostgreSQL", skip_all)]
    async fn record_login_attempt(&self, attempt: LoginAttempt) -> Result<(), AuditLogError> {
        sqlx::query(
            r#"
                INSERT INTO login_attempts (account_id, success, location)
                VALUES ($1, $2, $3)
            "#,
        )
        .bind(attempt.account_id)
        .bind(attempt.success)
        .bind(&attempt.location)
        .execute(&self.pool)
        .await
        .map_err(|e| AuditLogError::Unexpected(e.to_string()))?;

        Ok(())
    }
}
