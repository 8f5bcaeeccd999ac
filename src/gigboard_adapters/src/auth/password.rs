use argon2::{
    Algorithm, Argon2, Params, PasswordHash, PasswordVerifier, Version,
    password_hash::{PasswordHasher as _, SaltString, rand_core},
};
use async_trait::async_trait;
use secrecy::{ExposeSecret, Secret};

use gigboard_core::{PasswordHashError, PasswordHasher};

/// Argon2id with fixed parameters; every credential and reset token in the
/// system is hashed with the same work factor.
#[derive(Debug, Clone, Copy, Default)]
pub struct Argon2PasswordHasher;

#[async_trait]
impl PasswordHasher for Argon2PasswordHasher {
    async fn hash(&self, plaintext: &Secret<String>) -> Result<Secret<String>, PasswordHashError> {
        compute_password_hash(plaintext.clone())
            .await
            .map_err(PasswordHashError::Hash)
    }

    async fn verify(
        &self,
        candidate: &Secret<String>,
        expected_hash: &Secret<String>,
    ) -> Result<bool, PasswordHashError> {
        verify_password_hash(expected_hash.clone(), candidate.clone())
            .await
            .map_err(PasswordHashError::Verify)
    }
}

fn argon2() -> Result<Argon2<'static>, String> {
    Ok(Argon2::new(
        Algorithm::Argon2id,
        Version::V0x13,
        Params::new(15000, 2, 1, None).map_err(|e| e.to_string())?,
    ))
}

#[tracing::instrument(name = "Computing password hash", skip_all)]
async fn compute_password_hash(plaintext: Secret<String>) -> Result<Secret<String>, String> {
    let current_span: tracing::Span = tracing::Span::current();

    let result = tokio::task::spawn_blocking(move || {
        current_span.in_scope(move || {
            let salt: SaltString = SaltString::generate(rand_core::OsRng);
            argon2()?
                .hash_password(plaintext.expose_secret().as_bytes(), &salt)
                .map(|hash| Secret::from(hash.to_string()))
                .map_err(|e| e.to_string())
        })
    })
    .await
    .map_err(|e| e.to_string())?;

    result
}

#[tracing::instrument(name = "Verify password hash", skip_all)]
async fn verify_password_hash(
    expected_password_hash: Secret<String>,
    password_candidate: Secret<String>,
) -> Result<bool, String> {
    let current_span: tracing::Span = tracing::Span::current();

    let result = tokio::task::spawn_blocking(move || {
        current_span.in_scope(|| {
            let expected_password_hash: PasswordHash<'_> =
                PasswordHash::new(expected_password_hash.expose_secret())
                    .map_err(|e| e.to_string())?;

            match argon2()?.verify_password(
                password_candidate.expose_secret().as_bytes(),
                &expected_password_hash,
            ) {
                Ok(()) => Ok(true),
                // A clean mismatch is an answer, not an error.
                Err(argon2::password_hash::Error::Password) => Ok(false),
                Err(e) => Err(e.to_string()),
            }
        })
    })
    .await
    .map_err(|e| e.to_string())?;

    result
}
