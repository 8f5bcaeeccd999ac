use gigboard_core::{AccountStore, AccountStoreError, AccountSummary, TokenCodec};

/// Error types for the session verification use case
#[derive(Debug, thiserror::Error)]
pub enum VerifySessionError {
    #[error("Invalid or expired session token")]
    InvalidToken,
    /// Kept separate from [`VerifySessionError::InvalidToken`]: "could not
    /// check" must not read as "checked and rejected", or transient store
    /// faults would log users out.
    #[error("Account store error: {0}")]
    AccountStoreError(#[from] AccountStoreError),
}

/// Verify session use case - validates a session token and re-reads the
/// account, so the caller always sees current profile data and role rather
/// than day-old claims.
pub struct VerifySessionUseCase<S, C>
where
    S: AccountStore,
    C: TokenCodec,
{
    accounts: S,
    codec: C,
}

impl<S, C> VerifySessionUseCase<S, C>
where
    S: AccountStore,
    C: TokenCodec,
{
    pub fn new(accounts: S, codec: C) -> Self {
        Self { accounts, codec }
    }

    #[tracing::instrument(name = "VerifySessionUseCase::execute", skip_all)]
    pub async fn execute(&self, token: &str) -> Result<AccountSummary, VerifySessionError> {
        let identity = self
            .codec
            .verify_session_token(token)
            .map_err(|_| VerifySessionError::InvalidToken)?;

        let account = self
            .accounts
            .find_by_id(identity.account_id)
            .await?
            .ok_or(VerifySessionError::InvalidToken)?;

        Ok(AccountSummary::from(&account))
    }
}
