use chrono::Utc;
use secrecy::Secret;

use gigboard_core::{
    AccountStore, AccountStoreError, EmailClient, Password, PasswordHashError, PasswordHasher,
};

use crate::notifications::NotificationSender;

/// Error types for the reset password use case
#[derive(Debug, thiserror::Error)]
pub enum ResetPasswordError {
    #[error("Invalid or expired reset token")]
    InvalidToken,
    #[error("Account store error: {0}")]
    AccountStoreError(#[from] AccountStoreError),
    #[error("Password hash error: {0}")]
    PasswordHashError(#[from] PasswordHashError),
}

/// Reset password use case - redeems a reset token for a new password.
///
/// Reset tokens are stored hashed, so there is no direct lookup: the token
/// is checked against every account with an unexpired pending reset. The
/// candidate set is tiny (accounts mid-reset within the last hour), which
/// keeps the scan cheap.
pub struct ResetPasswordUseCase<S, H, E>
where
    S: AccountStore,
    H: PasswordHasher,
    E: EmailClient,
{
    accounts: S,
    hasher: H,
    notifier: NotificationSender<E>,
}

impl<S, H, E> ResetPasswordUseCase<S, H, E>
where
    S: AccountStore,
    H: PasswordHasher,
    E: EmailClient,
{
    pub fn new(accounts: S, hasher: H, notifier: NotificationSender<E>) -> Self {
        Self {
            accounts,
            hasher,
            notifier,
        }
    }

    #[tracing::instrument(name = "ResetPasswordUseCase::execute", skip_all)]
    pub async fn execute(
        &self,
        token: Secret<String>,
        new_password: Password,
    ) -> Result<(), ResetPasswordError> {
        let candidates = self.accounts.accounts_with_pending_reset(Utc::now()).await?;

        for account in candidates {
            let Some(stored_hash) = account.reset_token_hash.as_ref() else {
                continue;
            };
            if self.hasher.verify(&token, stored_hash).await? {
                let new_hash = self.hasher.hash(new_password.as_ref()).await?;
                self.accounts
                    .complete_password_reset(account.id, new_hash)
                    .await?;
                self.notifier.send_password_changed(&account.email).await;
                return Ok(());
            }
        }

        Err(ResetPasswordError::InvalidToken)
    }
}
