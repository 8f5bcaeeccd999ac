use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use serde_json::json;

use gigboard_application::{VerifyEmailError, VerifyEmailUseCase};
use gigboard_core::{AccountStore, TokenCodec};

use crate::error::ApiError;

#[derive(Deserialize)]
pub struct VerifyEmailRequest {
    pub token: String,
}

/// JSON verification endpoint, used when the frontend submits the token
/// itself.
#[tracing::instrument(name = "Verify email", skip_all)]
pub async fn verify_email<S, C>(
    State((accounts, codec)): State<(S, C)>,
    Json(request): Json<VerifyEmailRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    S: AccountStore + Clone + 'static,
    C: TokenCodec + Clone + 'static,
{
    let use_case = VerifyEmailUseCase::new(accounts, codec);
    use_case.execute(&request.token).await?;

    Ok(Json(json!({ "message": "Email verified successfully" })))
}

/// Clickable variant of the same redemption, reached straight from the
/// email. Success sends the browser to the login page; failures render as
/// plain text because there is no JSON client on the other end.
#[tracing::instrument(name = "Verify email link", skip_all)]
pub async fn verify_email_link<S, C>(
    State((accounts, codec, login_redirect)): State<(S, C, String)>,
    Path(token): Path<String>,
) -> Response
where
    S: AccountStore + Clone + 'static,
    C: TokenCodec + Clone + 'static,
{
    let use_case = VerifyEmailUseCase::new(accounts, codec);
    match use_case.execute(&token).await {
        Ok(()) => Redirect::to(&login_redirect).into_response(),
        Err(VerifyEmailError::InvalidToken) => (
            StatusCode::BAD_REQUEST,
            "Invalid or expired verification link",
        )
            .into_response(),
        Err(VerifyEmailError::AccountStoreError(error)) => {
            tracing::error!(error = %error, "verification link redemption failed");
            (StatusCode::INTERNAL_SERVER_ERROR, "Server error").into_response()
        }
    }
}
