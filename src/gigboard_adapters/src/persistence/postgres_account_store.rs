use async_trait::async_trait;
use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, Secret};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use gigboard_core::{
    Account, AccountKind, AccountStore, AccountStoreError, Email, NewAccount, ProfileUpdate,
};

#[derive(Clone)]
pub struct PostgresAccountStore {
    pool: PgPool,
}

impl PostgresAccountStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct AccountRow {
    id: Uuid,
    first_name: String,
    last_name: String,
    email: String,
    password_hash: String,
    account_type: String,
    bio: Option<String>,
    skills: Option<String>,
    hourly_rate: Option<f64>,
    avatar_url: Option<String>,
    is_verified: bool,
    verification_token: Option<String>,
    reset_token_hash: Option<String>,
    reset_token_expires_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

impl TryFrom<AccountRow> for Account {
    type Error = String;

    fn try_from(row: AccountRow) -> Result<Self, Self::Error> {
        let email = Email::parse(&row.email).map_err(|e| e.to_string())?;
        let kind = row
            .account_type
            .parse::<AccountKind>()
            .map_err(|e| e.to_string())?;
        Ok(Account {
            id: row.id,
            first_name: row.first_name,
            last_name: row.last_name,
            email,
            password_hash: Secret::from(row.password_hash),
            kind,
            bio: row.bio,
            skills: row.skills,
            hourly_rate: row.hourly_rate,
            avatar_url: row.avatar_url,
            is_verified: row.is_verified,
            verification_token: row.verification_token,
            reset_token_hash: row.reset_token_hash.map(Secret::from),
            reset_token_expires_at: row.reset_token_expires_at,
            created_at: row.created_at,
        })
    }
}

const SELECT_ACCOUNT: &str = r#"
    SELECT id, first_name, last_name, email, password_hash, account_type,
           bio, skills, hourly_rate, avatar_url, is_verified,
           verification_token, reset_token_hash, reset_token_expires_at,
           created_at
    FROM accounts
"#;

fn unexpected(e: sqlx::Error) -> AccountStoreError {
    AccountStoreError::Unexpected(e.to_string())
}

#[async_trait]
impl AccountStore for PostgresAccountStore {
    #[tracing::instrument(name = "Inserting account into PostgreSQL", skip_all)]
    async fn insert_account(&self, account: NewAccount) -> Result<Uuid, AccountStoreError> {
        let id = Uuid::new_v4();
        sqlx::query(
            r#"
                INSERT INTO accounts
                    (id, first_name, last_name, email, password_hash,
                     account_type, verification_token)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(id)
        .bind(&account.first_name)
        .bind(&account.last_name)
        .bind(account.email.as_str())
        .bind(account.password_hash.expose_secret())
        .bind(account.kind.as_str())
        .bind(&account.verification_token)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if e.as_database_error()
                .is_some_and(|db| db.is_unique_violation())
            {
                AccountStoreError::DuplicateEmail
            } else {
                unexpected(e)
            }
        })?;

        Ok(id)
    }

    #[tracing::instrument(name = "Fetching account by email from PostgreSQL", skip_all)]
    async fn find_by_email(&self, email: &Email) -> Result<Option<Account>, AccountStoreError> {
        let row = sqlx::query_as::<_, AccountRow>(&format!("{SELECT_ACCOUNT} WHERE email = $1"))
            .bind(email.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(unexpected)?;

        row.map(Account::try_from)
            .transpose()
            .map_err(AccountStoreError::Unexpected)
    }

    #[tracing::instrument(name = "Fetching account by id from PostgreSQL", skip_all)]
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, AccountStoreError> {
        let row = sqlx::query_as::<_, AccountRow>(&format!("{SELECT_ACCOUNT} WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(unexpected)?;

        row.map(Account::try_from)
            .transpose()
            .map_err(AccountStoreError::Unexpected)
    }

    #[tracing::instrument(name = "Consuming verification token in PostgreSQL", skip_all)]
    async fn consume_verification_token(
        &self,
        email: &Email,
        token: &str,
    ) -> Result<bool, AccountStoreError> {
        // The token match is part of the UPDATE, so concurrent redemptions
        // of the same token cannot both succeed.
        let result = sqlx::query(
            r#"
                UPDATE accounts
                SET is_verified = TRUE, verification_token = NULL
                WHERE email = $1 AND verification_token = $2
            "#,
        )
        .bind(email.as_str())
        .bind(token)
        .execute(&self.pool)
        .await
        .map_err(unexpected)?;

        Ok(result.rows_affected() == 1)
    }

    #[tracing::instrument(name = "Replacing verification token in PostgreSQL", skip_all)]
    async fn replace_verification_token(
        &self,
        email: &Email,
        token: &str,
    ) -> Result<bool, AccountStoreError> {
        let result = sqlx::query(
            r#"
                UPDATE accounts
                SET verification_token = $2
                WHERE email = $1 AND is_verified = FALSE
            "#,
        )
        .bind(email.as_str())
        .bind(token)
        .execute(&self.pool)
        .await
        .map_err(unexpected)?;

        Ok(result.rows_affected() == 1)
    }

    #[tracing::instrument(name = "Storing reset token in PostgreSQL", skip_all)]
    async fn store_reset_token(
        &self,
        email: &Email,
        token_hash: Secret<String>,
        expires_at: DateTime<Utc>,
    ) -> Result<(), AccountStoreError> {
        let result = sqlx::query(
            r#"
                UPDATE accounts
                SET reset_token_hash = $2, reset_token_expires_at = $3
                WHERE email = $1
            "#,
        )
        .bind(email.as_str())
        .bind(token_hash.expose_secret())
        .bind(expires_at)
        .execute(&self.pool)
        .await
        .map_err(unexpected)?;

        if result.rows_affected() == 0 {
            return Err(AccountStoreError::NotFound);
        }
        Ok(())
    }

    #[tracing::instrument(name = "Listing pending resets from PostgreSQL", skip_all)]
    async fn accounts_with_pending_reset(
        &self,
        now: DateTime<Utc>,
    ) -> Result<Vec<Account>, AccountStoreError> {
        let rows = sqlx::query_as::<_, AccountRow>(&format!(
            "{SELECT_ACCOUNT} WHERE reset_token_hash IS NOT NULL AND reset_token_expires_at > $1"
        ))
        .bind(now)
        .fetch_all(&self.pool)
        .await
        .map_err(unexpected)?;

        rows.into_iter()
            .map(|row| Account::try_from(row).map_err(AccountStoreError::Unexpected))
            .collect()
    }

    #[tracing::instrument(name = "Completing password reset in PostgreSQL", skip_all)]
    async fn complete_password_reset(
        &self,
        id: Uuid,
        new_password_hash: Secret<String>,
    ) -> Result<(), AccountStoreError> {
        let result = sqlx::query(
            r#"
                UPDATE accounts
                SET password_hash = $2,
                    reset_token_hash = NULL,
                    reset_token_expires_at = NULL
                WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(new_password_hash.expose_secret())
        .execute(&self.pool)
        .await
        .map_err(unexpected)?;

        if result.rows_affected() == 0 {
            return Err(AccountStoreError::NotFound);
        }
        Ok(())
    }

    #[tracing::instrument(name = "Updating profile in PostgreSQL", skip_all)]
    async fn update_profile(
        &self,
        id: Uuid,
        update: ProfileUpdate,
    ) -> Result<(), AccountStoreError> {
        let result = sqlx::query(
            r#"
                UPDATE accounts
                SET first_name = $2, last_name = $3, bio = $4,
                    skills = $5, hourly_rate = $6, avatar_url = $7
                WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(&update.first_name)
        .bind(&update.last_name)
        .bind(&update.bio)
        .bind(&update.skills)
        .bind(update.hourly_rate)
        .bind(&update.avatar_url)
        .execute(&self.pool)
        .await
        .map_err(unexpected)?;

        if result.rows_affected() == 0 {
            return Err(AccountStoreError::NotFound);
        }
        Ok(())
    }
}
