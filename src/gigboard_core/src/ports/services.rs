use std::sync::Arc;

use async_trait::async_trait;
use secrecy::Secret;
use thiserror::Error;

use crate::domain::{email::Email, session::SessionIdentity};

#[async_trait]
pub trait EmailClient: Send + Sync {
    async fn send_email(
        &self,
        recipient: &Email,
        subject: &str,
        content: &str,
    ) -> Result<(), String>;
}

// PasswordHasher port trait and errors
#[derive(Debug, Error)]
pub enum PasswordHashError {
    #[error("Failed to hash password: {0}")]
    Hash(String),
    #[error("Failed to verify password hash: {0}")]
    Verify(String),
}

/// Slow, salted hashing for credentials and reset tokens. `verify` returns
/// `Ok(false)` on a clean mismatch; `Err` is reserved for malformed hashes
/// and runtime failures, which callers must not treat as "wrong password".
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    async fn hash(&self, plaintext: &Secret<String>) -> Result<Secret<String>, PasswordHashError>;

    async fn verify(
        &self,
        candidate: &Secret<String>,
        expected_hash: &Secret<String>,
    ) -> Result<bool, PasswordHashError>;
}

// TokenCodec port trait and errors
#[derive(Debug, Error, PartialEq)]
pub enum TokenCodecError {
    /// Forged, malformed and expired tokens are deliberately
    /// indistinguishable to callers.
    #[error("Invalid or expired token")]
    Invalid,
    #[error("Failed to issue token: {0}")]
    Issue(String),
}

/// Issues and checks the two signed token kinds. Session and verification
/// tokens are signed with independent secrets, so one can never pass for
/// the other.
pub trait TokenCodec: Send + Sync {
    fn issue_session_token(&self, identity: &SessionIdentity) -> Result<String, TokenCodecError>;

    fn verify_session_token(&self, token: &str) -> Result<SessionIdentity, TokenCodecError>;

    fn issue_verification_token(&self, email: &Email) -> Result<String, TokenCodecError>;

    fn verify_verification_token(&self, token: &str) -> Result<Email, TokenCodecError>;
}

impl<T> TokenCodec for Arc<T>
where
    T: TokenCodec + ?Sized,
{
    fn issue_session_token(&self, identity: &SessionIdentity) -> Result<String, TokenCodecError> {
        (**self).issue_session_token(identity)
    }

    fn verify_session_token(&self, token: &str) -> Result<SessionIdentity, TokenCodecError> {
        (**self).verify_session_token(token)
    }

    fn issue_verification_token(&self, email: &Email) -> Result<String, TokenCodecError> {
        (**self).issue_verification_token(email)
    }

    fn verify_verification_token(&self, token: &str) -> Result<Email, TokenCodecError> {
        (**self).verify_verification_token(token)
    }
}
