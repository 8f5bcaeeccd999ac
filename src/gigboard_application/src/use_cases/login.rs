use secrecy::Secret;
use uuid::Uuid;

use gigboard_core::{
    AccountStore, AccountStoreError, AccountSummary, AuditLog, Email, EmailClient, LoginAttempt,
    Password, PasswordHashError, PasswordHasher, SessionIdentity, TokenCodec, TokenCodecError,
};

use crate::notifications::NotificationSender;

/// A real argon2 hash of a throwaway password. Verifying a candidate against
/// it costs the same work as a genuine check, so the unknown-email path is
/// not measurably faster than the wrong-password path.
const FALLBACK_PASSWORD_HASH: &str = "$argon2id$v=19$m=15000,t=2,p=1$\
    gZiV/M1gPc22ElAH/Jh1Hw$CWOrkoo7oJBQ/iyh7uJ0LO2aLEfrHwTWllSAxT0zRno";

/// Error types for the login use case
#[derive(Debug, thiserror::Error)]
pub enum LoginError {
    /// Unknown email and wrong password collapse into this one variant.
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Email not verified")]
    EmailNotVerified { email: Email },
    #[error("Account store error: {0}")]
    AccountStoreError(#[from] AccountStoreError),
    #[error("Password hash error: {0}")]
    PasswordHashError(#[from] PasswordHashError),
    #[error("Token error: {0}")]
    TokenCodecError(#[from] TokenCodecError),
}

#[derive(Debug)]
pub struct LoginSuccess {
    pub token: String,
    pub account: AccountSummary,
}

/// Login use case - checks credentials, requires a verified email and
/// issues the session token. Every attempt lands in the audit log, with or
/// without a matching account.
pub struct LoginUseCase<S, A, H, C, E>
where
    S: AccountStore,
    A: AuditLog,
    H: PasswordHasher,
    C: TokenCodec,
    E: EmailClient,
{
    accounts: S,
    audit: A,
    hasher: H,
    codec: C,
    notifier: NotificationSender<E>,
}

impl<S, A, H, C, E> LoginUseCase<S, A, H, C, E>
where
    S: AccountStore,
    A: AuditLog,
    H: PasswordHasher,
    C: TokenCodec,
    E: EmailClient,
{
    pub fn new(accounts: S, audit: A, hasher: H, codec: C, notifier: NotificationSender<E>) -> Self {
        Self {
            accounts,
            audit,
            hasher,
            codec,
            notifier,
        }
    }

    #[tracing::instrument(name = "LoginUseCase::execute", skip(self, password))]
    pub async fn execute(
        &self,
        email: Email,
        password: Password,
        location: Option<String>,
    ) -> Result<LoginSuccess, LoginError> {
        let account = match self.accounts.find_by_email(&email).await? {
            Some(account) => account,
            None => {
                // Burn the same hashing work as the real path; the result is
                // discarded.
                let fallback = Secret::from(FALLBACK_PASSWORD_HASH.to_string());
                let _ = self.hasher.verify(password.as_ref(), &fallback).await;
                self.record_attempt(None, false, location.as_deref()).await;
                return Err(LoginError::InvalidCredentials);
            }
        };

        // A hasher error here is a server fault and must surface as one;
        // only a clean mismatch counts as bad credentials.
        let password_matches = self
            .hasher
            .verify(password.as_ref(), &account.password_hash)
            .await?;
        if !password_matches {
            self.record_attempt(Some(account.id), false, location.as_deref())
                .await;
            return Err(LoginError::InvalidCredentials);
        }

        if !account.is_verified {
            self.record_attempt(Some(account.id), false, location.as_deref())
                .await;
            return Err(LoginError::EmailNotVerified {
                email: account.email,
            });
        }

        let identity = SessionIdentity {
            account_id: account.id,
            email: account.email.clone(),
            kind: account.kind,
        };
        let token = self.codec.issue_session_token(&identity)?;

        self.record_attempt(Some(account.id), true, location.as_deref())
            .await;
        self.notifier
            .send_login_alert(&account.email, location.as_deref())
            .await;

        Ok(LoginSuccess {
            token,
            account: AccountSummary::from(&account),
        })
    }

    async fn record_attempt(&self, account_id: Option<Uuid>, success: bool, location: Option<&str>) {
        let attempt = LoginAttempt {
            account_id,
            success,
            location: location.map(str::to_string),
        };
        if let Err(error) = self.audit.record_login_attempt(attempt).await {
            tracing::warn!(%error, "failed to record login attempt");
        }
    }
}
