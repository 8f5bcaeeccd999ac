use uuid::Uuid;

use gigboard_core::{
    AccountKind, AccountStore, AccountStoreError, Email, EmailClient, NewAccount, Password,
    PasswordHashError, PasswordHasher, TokenCodec, TokenCodecError,
};

use crate::notifications::NotificationSender;

/// Error types for the register use case
#[derive(Debug, thiserror::Error)]
pub enum RegisterError {
    #[error("Account store error: {0}")]
    AccountStoreError(#[from] AccountStoreError),
    #[error("Password hash error: {0}")]
    PasswordHashError(#[from] PasswordHashError),
    #[error("Token error: {0}")]
    TokenCodecError(#[from] TokenCodecError),
}

/// Register use case - creates an unverified account and emails the
/// verification link. The verification token is part of the insert itself,
/// so a stored account always has one.
pub struct RegisterUseCase<S, H, C, E>
where
    S: AccountStore,
    H: PasswordHasher,
    C: TokenCodec,
    E: EmailClient,
{
    accounts: S,
    hasher: H,
    codec: C,
    notifier: NotificationSender<E>,
}

impl<S, H, C, E> RegisterUseCase<S, H, C, E>
where
    S: AccountStore,
    H: PasswordHasher,
    C: TokenCodec,
    E: EmailClient,
{
    pub fn new(accounts: S, hasher: H, codec: C, notifier: NotificationSender<E>) -> Self {
        Self {
            accounts,
            hasher,
            codec,
            notifier,
        }
    }

    #[tracing::instrument(name = "RegisterUseCase::execute", skip(self, password))]
    pub async fn execute(
        &self,
        first_name: String,
        last_name: String,
        email: Email,
        password: Password,
        kind: AccountKind,
    ) -> Result<Uuid, RegisterError> {
        // Cheap existence probe so the common duplicate case skips the
        // expensive hash; the store's unique index still decides under races.
        if self.accounts.find_by_email(&email).await?.is_some() {
            return Err(AccountStoreError::DuplicateEmail.into());
        }

        let password_hash = self.hasher.hash(password.as_ref()).await?;
        let verification_token = self.codec.issue_verification_token(&email)?;

        let account_id = self
            .accounts
            .insert_account(NewAccount {
                first_name,
                last_name,
                email: email.clone(),
                password_hash,
                kind,
                verification_token: verification_token.clone(),
            })
            .await?;

        self.notifier
            .send_verification_email(&email, &verification_token)
            .await;

        Ok(account_id)
    }
}
