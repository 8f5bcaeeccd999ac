use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Validation, decode, encode};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use gigboard_core::{
    AccountKind, Email, SESSION_TOKEN_TTL_SECONDS, SessionIdentity, TokenCodec, TokenCodecError,
    VERIFICATION_TOKEN_TTL_SECONDS,
};

/// HS256 implementation of the token codec. Session and verification tokens
/// are signed with separate secrets, so presenting one where the other is
/// expected fails signature validation no matter what the claims say.
#[derive(Clone)]
pub struct JwtTokenCodec {
    session_secret: Secret<String>,
    verification_secret: Secret<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct SessionClaims {
    sub: Uuid,
    email: String,
    kind: AccountKind,
    iat: usize,
    exp: usize,
}

#[derive(Debug, Serialize, Deserialize)]
struct VerificationClaims {
    email: String,
    /// Fresh per token, so a resend yields a distinct token even within the
    /// same second.
    jti: Uuid,
    exp: usize,
}

impl JwtTokenCodec {
    pub fn new(session_secret: Secret<String>, verification_secret: Secret<String>) -> Self {
        Self {
            session_secret,
            verification_secret,
        }
    }

    fn session_token_with_ttl(
        &self,
        identity: &SessionIdentity,
        ttl_seconds: i64,
    ) -> Result<String, TokenCodecError> {
        let (iat, exp) = claim_timestamps(ttl_seconds)?;
        let claims = SessionClaims {
            sub: identity.account_id,
            email: identity.email.to_string(),
            kind: identity.kind,
            iat,
            exp,
        };
        sign(&claims, &self.session_secret)
    }

    fn verification_token_with_ttl(
        &self,
        email: &Email,
        ttl_seconds: i64,
    ) -> Result<String, TokenCodecError> {
        let (_iat, exp) = claim_timestamps(ttl_seconds)?;
        let claims = VerificationClaims {
            email: email.to_string(),
            jti: Uuid::new_v4(),
            exp,
        };
        sign(&claims, &self.verification_secret)
    }
}

impl TokenCodec for JwtTokenCodec {
    fn issue_session_token(&self, identity: &SessionIdentity) -> Result<String, TokenCodecError> {
        self.session_token_with_ttl(identity, SESSION_TOKEN_TTL_SECONDS)
    }

    fn verify_session_token(&self, token: &str) -> Result<SessionIdentity, TokenCodecError> {
        let claims = decode::<SessionClaims>(
            token,
            &DecodingKey::from_secret(self.session_secret.expose_secret().as_bytes()),
            &strict_validation(),
        )
        .map(|data| data.claims)
        .map_err(|_| TokenCodecError::Invalid)?;

        let email = Email::parse(&claims.email).map_err(|_| TokenCodecError::Invalid)?;
        Ok(SessionIdentity {
            account_id: claims.sub,
            email,
            kind: claims.kind,
        })
    }

    fn issue_verification_token(&self, email: &Email) -> Result<String, TokenCodecError> {
        self.verification_token_with_ttl(email, VERIFICATION_TOKEN_TTL_SECONDS)
    }

    fn verify_verification_token(&self, token: &str) -> Result<Email, TokenCodecError> {
        let claims = decode::<VerificationClaims>(
            token,
            &DecodingKey::from_secret(self.verification_secret.expose_secret().as_bytes()),
            &strict_validation(),
        )
        .map(|data| data.claims)
        .map_err(|_| TokenCodecError::Invalid)?;

        Email::parse(&claims.email).map_err(|_| TokenCodecError::Invalid)
    }
}

fn claim_timestamps(ttl_seconds: i64) -> Result<(usize, usize), TokenCodecError> {
    let delta = chrono::Duration::try_seconds(ttl_seconds)
        .ok_or_else(|| TokenCodecError::Issue("token ttl out of range".to_string()))?;

    let now = Utc::now();
    let exp = now
        .checked_add_signed(delta)
        .ok_or_else(|| TokenCodecError::Issue("token expiry out of range".to_string()))?
        .timestamp();

    let iat: usize = now
        .timestamp()
        .try_into()
        .map_err(|_| TokenCodecError::Issue("timestamp before epoch".to_string()))?;
    let exp: usize = exp
        .try_into()
        .map_err(|_| TokenCodecError::Issue("expiry before epoch".to_string()))?;

    Ok((iat, exp))
}

fn sign<C: Serialize>(claims: &C, secret: &Secret<String>) -> Result<String, TokenCodecError> {
    encode(
        &jsonwebtoken::Header::default(),
        claims,
        &EncodingKey::from_secret(secret.expose_secret().as_bytes()),
    )
    .map_err(|e| TokenCodecError::Issue(e.to_string()))
}

fn strict_validation() -> Validation {
    let mut validation = Validation::default();
    // Expired means expired; no grace window.
    validation.leeway = 0;
    validation
}
