use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{Duration, Utc};
use rand::RngCore;
use secrecy::Secret;

use gigboard_core::{
    AccountStore, AccountStoreError, Email, EmailClient, PasswordHashError, PasswordHasher,
    RESET_TOKEN_TTL_SECONDS,
};

use crate::notifications::NotificationSender;

const RESET_TOKEN_BYTES: usize = 32;

#[derive(Debug, thiserror::Error)]
enum IssueError {
    #[error("Account store error: {0}")]
    AccountStoreError(#[from] AccountStoreError),
    #[error("Password hash error: {0}")]
    PasswordHashError(#[from] PasswordHashError),
}

/// Request password reset use case - mints a single-use reset token for the
/// account behind `email`, if there is one, and mails it out.
///
/// `execute` never reports whether the email matched: the lookup, hashing
/// and delivery run on a detached task after the response is already on its
/// way, so neither the status code nor the response time differ between
/// known and unknown addresses.
pub struct RequestPasswordResetUseCase<S, H, E>
where
    S: AccountStore + Clone + 'static,
    H: PasswordHasher + Clone + 'static,
    E: EmailClient + Clone + 'static,
{
    accounts: S,
    hasher: H,
    notifier: NotificationSender<E>,
}

impl<S, H, E> RequestPasswordResetUseCase<S, H, E>
where
    S: AccountStore + Clone + 'static,
    H: PasswordHasher + Clone + 'static,
    E: EmailClient + Clone + 'static,
{
    pub fn new(accounts: S, hasher: H, notifier: NotificationSender<E>) -> Self {
        Self {
            accounts,
            hasher,
            notifier,
        }
    }

    #[tracing::instrument(name = "RequestPasswordResetUseCase::execute", skip(self))]
    pub async fn execute(&self, email: Email) {
        let accounts = self.accounts.clone();
        let hasher = self.hasher.clone();
        let notifier = self.notifier.clone();
        tokio::spawn(async move {
            if let Err(error) = issue_reset_token(accounts, hasher, notifier, email).await {
                tracing::warn!(%error, "password reset issuance failed");
            }
        });
    }
}

async fn issue_reset_token<S, H, E>(
    accounts: S,
    hasher: H,
    notifier: NotificationSender<E>,
    email: Email,
) -> Result<(), IssueError>
where
    S: AccountStore,
    H: PasswordHasher,
    E: EmailClient,
{
    let Some(account) = accounts.find_by_email(&email).await? else {
        return Ok(());
    };

    let raw_token = generate_reset_token();
    // Only the hash is stored; the raw token exists in the email alone.
    let token_hash = hasher.hash(&Secret::from(raw_token.clone())).await?;
    let expires_at = Utc::now() + Duration::seconds(RESET_TOKEN_TTL_SECONDS);

    accounts
        .store_reset_token(&account.email, token_hash, expires_at)
        .await?;
    notifier.send_reset_email(&account.email, &raw_token).await;
    Ok(())
}

fn generate_reset_token() -> String {
    let mut bytes = [0u8; RESET_TOKEN_BYTES];
    rand::rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}
