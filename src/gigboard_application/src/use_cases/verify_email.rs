use gigboard_core::{AccountStore, AccountStoreError, TokenCodec};

/// Error types for the email verification use case
#[derive(Debug, thiserror::Error)]
pub enum VerifyEmailError {
    #[error("Invalid or expired verification token")]
    InvalidToken,
    #[error("Account store error: {0}")]
    AccountStoreError(#[from] AccountStoreError),
}

/// Verify email use case - redeems a verification token. Redemption only
/// succeeds when the token is validly signed, unexpired and still the one
/// on file, so replayed and superseded links fail the same way as forged
/// ones.
pub struct VerifyEmailUseCase<S, C>
where
    S: AccountStore,
    C: TokenCodec,
{
    accounts: S,
    codec: C,
}

impl<S, C> VerifyEmailUseCase<S, C>
where
    S: AccountStore,
    C: TokenCodec,
{
    pub fn new(accounts: S, codec: C) -> Self {
        Self { accounts, codec }
    }

    #[tracing::instrument(name = "VerifyEmailUseCase::execute", skip_all)]
    pub async fn execute(&self, token: &str) -> Result<(), VerifyEmailError> {
        let email = self
            .codec
            .verify_verification_token(token)
            .map_err(|_| VerifyEmailError::InvalidToken)?;

        let consumed = self
            .accounts
            .consume_verification_token(&email, token)
            .await?;
        if consumed {
            Ok(())
        } else {
            Err(VerifyEmailError::InvalidToken)
        }
    }
}
