//! Session extraction for protected routes.

use std::sync::Arc;

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
};
use uuid::Uuid;

use gigboard_application::VerifySessionUseCase;
use gigboard_core::{AccountKind, AccountStore, AccountSummary, TokenCodec};

use crate::error::ApiError;

/// Type-erased handle the [`CurrentAccount`] extractor pulls out of route
/// state. Handlers stay generic over their ports; the extractor alone needs
/// one concrete type, because `FromRequestParts` cannot thread the router's
/// own generics through to it.
#[derive(Clone)]
pub struct SessionGate {
    accounts: Arc<dyn AccountStore>,
    codec: Arc<dyn TokenCodec>,
}

impl SessionGate {
    pub fn new<S, C>(accounts: S, codec: C) -> Self
    where
        S: AccountStore + 'static,
        C: TokenCodec + 'static,
    {
        Self {
            accounts: Arc::new(accounts),
            codec: Arc::new(codec),
        }
    }

    pub async fn verify(&self, token: &str) -> Result<AccountSummary, ApiError> {
        let use_case =
            VerifySessionUseCase::new(Arc::clone(&self.accounts), Arc::clone(&self.codec));
        Ok(use_case.execute(token).await?)
    }
}

// Protected routes carry the gate as the first element of their state
// tuple; these impls let the extractor find it there.
impl<T> FromRef<(SessionGate, T)> for SessionGate {
    fn from_ref(state: &(SessionGate, T)) -> Self {
        state.0.clone()
    }
}

impl<T, U> FromRef<(SessionGate, T, U)> for SessionGate {
    fn from_ref(state: &(SessionGate, T, U)) -> Self {
        state.0.clone()
    }
}

/// The authenticated caller, extracted from the `Authorization` header.
/// Extraction re-reads the account, so the fields reflect the store now
/// rather than whatever the token was minted with.
#[derive(Debug, Clone)]
pub struct CurrentAccount(AccountSummary);

impl CurrentAccount {
    pub fn id(&self) -> Uuid {
        self.0.id
    }

    pub fn account(&self) -> &AccountSummary {
        &self.0
    }

    pub fn into_account(self) -> AccountSummary {
        self.0
    }

    pub fn is_admin(&self) -> bool {
        self.0.account_type == AccountKind::Admin
    }

    pub fn require_client_or_admin(&self) -> Result<(), ApiError> {
        match self.0.account_type {
            AccountKind::Client | AccountKind::Admin => Ok(()),
            AccountKind::Freelancer => Err(ApiError::Forbidden("Only clients can post jobs")),
        }
    }

    /// Admins do not pass this one: a proposal must come from the
    /// freelancer who would do the work.
    pub fn require_freelancer(&self) -> Result<(), ApiError> {
        match self.0.account_type {
            AccountKind::Freelancer => Ok(()),
            AccountKind::Client | AccountKind::Admin => Err(ApiError::Forbidden(
                "Only freelancers can submit proposals",
            )),
        }
    }

    pub fn require_owner_or_admin(&self, owner_id: Uuid) -> Result<(), ApiError> {
        if self.is_admin() || self.0.id == owner_id {
            Ok(())
        } else {
            Err(ApiError::Forbidden("Access denied"))
        }
    }
}

impl<St> FromRequestParts<St> for CurrentAccount
where
    St: Send + Sync,
    SessionGate: FromRef<St>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &St) -> Result<Self, Self::Rejection> {
        let gate = SessionGate::from_ref(state);
        let token = bearer_token(parts).ok_or(ApiError::MissingToken)?;
        let account = gate.verify(&token).await?;
        Ok(CurrentAccount(account))
    }
}

fn bearer_token(parts: &Parts) -> Option<String> {
    parts
        .headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::to_owned)
}
