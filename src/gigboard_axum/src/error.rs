use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use gigboard_application::{
    LoginError, RegisterError, ResendVerificationError, ResetPasswordError, VerifyEmailError,
    VerifySessionError,
};
use gigboard_core::{
    AccountKindError, AccountStoreError, Email, EmailError, JobStatusError, JobStoreError,
    PasswordError,
};

/// The `{"message": ...}` body every error response carries. The frontend
/// displays `message` verbatim, so the strings here are part of the API.
#[derive(Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid status")]
    InvalidStatus,

    #[error("User already exists")]
    DuplicateEmail,

    #[error("You have already submitted a proposal for this job")]
    DuplicateProposal,

    /// Unknown email and wrong password both land here.
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Please verify your email before logging in")]
    EmailNotVerified { email: Email },

    #[error("Invalid or expired token")]
    InvalidOrExpiredToken,

    /// Merged on purpose: distinguishing "no such account" from "already
    /// verified" would let the resend endpoint probe registered addresses.
    #[error("Account not found or already verified")]
    NotEligibleForVerification,

    /// No `Authorization: Bearer ...` header on a protected route.
    #[error("Access denied")]
    MissingToken,

    #[error("Invalid token")]
    InvalidSessionToken,

    #[error("{0}")]
    Forbidden(&'static str),

    #[error("{0}")]
    NotFound(&'static str),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // The unverified-login rejection carries extra fields the frontend
        // uses to offer a resend, so it does not fit ErrorResponse.
        if let ApiError::EmailNotVerified { email } = &self {
            let body = Json(serde_json::json!({
                "message": self.to_string(),
                "needsVerification": true,
                "email": email,
            }));
            return (StatusCode::FORBIDDEN, body).into_response();
        }

        let (status_code, message) = match &self {
            ApiError::InvalidInput(_)
            | ApiError::InvalidStatus
            | ApiError::DuplicateEmail
            | ApiError::DuplicateProposal
            | ApiError::InvalidCredentials
            | ApiError::InvalidOrExpiredToken
            | ApiError::NotEligibleForVerification => (StatusCode::BAD_REQUEST, self.to_string()),

            ApiError::MissingToken => (StatusCode::UNAUTHORIZED, self.to_string()),

            ApiError::EmailNotVerified { .. }
            | ApiError::InvalidSessionToken
            | ApiError::Forbidden(_) => (StatusCode::FORBIDDEN, self.to_string()),

            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),

            // Internal detail stays in the logs; clients get a fixed string.
            ApiError::Unexpected(detail) => {
                tracing::error!(error = %detail, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Server error".to_string(),
                )
            }
        };

        (status_code, Json(ErrorResponse { message })).into_response()
    }
}

impl From<EmailError> for ApiError {
    fn from(error: EmailError) -> Self {
        ApiError::InvalidInput(error.to_string())
    }
}

impl From<PasswordError> for ApiError {
    fn from(error: PasswordError) -> Self {
        ApiError::InvalidInput(error.to_string())
    }
}

impl From<AccountKindError> for ApiError {
    fn from(error: AccountKindError) -> Self {
        ApiError::InvalidInput(error.to_string())
    }
}

impl From<JobStatusError> for ApiError {
    fn from(_: JobStatusError) -> Self {
        ApiError::InvalidStatus
    }
}

impl From<AccountStoreError> for ApiError {
    fn from(error: AccountStoreError) -> Self {
        match error {
            AccountStoreError::DuplicateEmail => ApiError::DuplicateEmail,
            AccountStoreError::NotFound => ApiError::NotFound("User not found"),
            AccountStoreError::Unexpected(e) => ApiError::Unexpected(e),
        }
    }
}

impl From<JobStoreError> for ApiError {
    fn from(error: JobStoreError) -> Self {
        match error {
            JobStoreError::JobNotFound => ApiError::NotFound("Job not found"),
            JobStoreError::ProposalNotFound => ApiError::NotFound("Proposal not found"),
            JobStoreError::DuplicateProposal => ApiError::DuplicateProposal,
            JobStoreError::Unexpected(e) => ApiError::Unexpected(e),
        }
    }
}

impl From<RegisterError> for ApiError {
    fn from(error: RegisterError) -> Self {
        match error {
            RegisterError::AccountStoreError(e) => e.into(),
            RegisterError::PasswordHashError(e) => ApiError::Unexpected(e.to_string()),
            RegisterError::TokenCodecError(e) => ApiError::Unexpected(e.to_string()),
        }
    }
}

impl From<LoginError> for ApiError {
    fn from(error: LoginError) -> Self {
        match error {
            LoginError::InvalidCredentials => ApiError::InvalidCredentials,
            LoginError::EmailNotVerified { email } => ApiError::EmailNotVerified { email },
            LoginError::AccountStoreError(e) => e.into(),
            LoginError::PasswordHashError(e) => ApiError::Unexpected(e.to_string()),
            LoginError::TokenCodecError(e) => ApiError::Unexpected(e.to_string()),
        }
    }
}

impl From<VerifyEmailError> for ApiError {
    fn from(error: VerifyEmailError) -> Self {
        match error {
            VerifyEmailError::InvalidToken => ApiError::InvalidOrExpiredToken,
            VerifyEmailError::AccountStoreError(e) => e.into(),
        }
    }
}

impl From<ResendVerificationError> for ApiError {
    fn from(error: ResendVerificationError) -> Self {
        match error {
            ResendVerificationError::NotEligible => ApiError::NotEligibleForVerification,
            ResendVerificationError::AccountStoreError(e) => e.into(),
            ResendVerificationError::TokenCodecError(e) => ApiError::Unexpected(e.to_string()),
        }
    }
}

impl From<ResetPasswordError> for ApiError {
    fn from(error: ResetPasswordError) -> Self {
        match error {
            ResetPasswordError::InvalidToken => ApiError::InvalidOrExpiredToken,
            ResetPasswordError::AccountStoreError(e) => e.into(),
            ResetPasswordError::PasswordHashError(e) => ApiError::Unexpected(e.to_string()),
        }
    }
}

impl From<VerifySessionError> for ApiError {
    fn from(error: VerifySessionError) -> Self {
        match error {
            VerifySessionError::InvalidToken => ApiError::InvalidSessionToken,
            // "Could not check" must not read as "checked and rejected";
            // a store fault surfaces as a server error, not a logout.
            VerifySessionError::AccountStoreError(e) => ApiError::Unexpected(e.to_string()),
        }
    }
}
