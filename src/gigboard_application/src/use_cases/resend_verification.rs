use gigboard_core::{AccountStore, AccountStoreError, Email, EmailClient, TokenCodec, TokenCodecError};

use crate::notifications::NotificationSender;

/// Error types for the resend verification use case
#[derive(Debug, thiserror::Error)]
pub enum ResendVerificationError {
    /// Deliberately covers both "no such account" and "already verified" so
    /// the endpoint cannot be used to probe which addresses are registered.
    #[error("Account not found or already verified")]
    NotEligible,
    #[error("Account store error: {0}")]
    AccountStoreError(#[from] AccountStoreError),
    #[error("Token error: {0}")]
    TokenCodecError(#[from] TokenCodecError),
}

/// Resend verification use case - issues a fresh verification token for an
/// unverified account. The stored token is replaced, so any previously
/// mailed link stops working.
pub struct ResendVerificationUseCase<S, C, E>
where
    S: AccountStore,
    C: TokenCodec,
    E: EmailClient,
{
    accounts: S,
    codec: C,
    notifier: NotificationSender<E>,
}

impl<S, C, E> ResendVerificationUseCase<S, C, E>
where
    S: AccountStore,
    C: TokenCodec,
    E: EmailClient,
{
    pub fn new(accounts: S, codec: C, notifier: NotificationSender<E>) -> Self {
        Self {
            accounts,
            codec,
            notifier,
        }
    }

    #[tracing::instrument(name = "ResendVerificationUseCase::execute", skip(self))]
    pub async fn execute(&self, email: Email) -> Result<(), ResendVerificationError> {
        let token = self.codec.issue_verification_token(&email)?;

        let replaced = self
            .accounts
            .replace_verification_token(&email, &token)
            .await?;
        if !replaced {
            return Err(ResendVerificationError::NotEligible);
        }

        self.notifier.send_verification_email(&email, &token).await;
        Ok(())
    }
}
