use axum::{Json, extract::State, response::IntoResponse};
use secrecy::Secret;
use serde::{Deserialize, Serialize};

use gigboard_application::{LoginUseCase, NotificationSender};
use gigboard_core::{
    AccountStore, AccountSummary, AuditLog, Email, EmailClient, Password, PasswordHasher,
    TokenCodec,
};

use crate::error::ApiError;

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: Secret<String>,
    pub location: Option<String>,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: AccountSummary,
}

#[tracing::instrument(name = "Login", skip_all)]
pub async fn login<S, A, H, C, E>(
    State((accounts, audit, hasher, codec, notifier)): State<(S, A, H, C, NotificationSender<E>)>,
    Json(request): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    S: AccountStore + Clone + 'static,
    A: AuditLog + Clone + 'static,
    H: PasswordHasher + Clone + 'static,
    C: TokenCodec + Clone + 'static,
    E: EmailClient + Clone + 'static,
{
    // A malformed address cannot belong to an account, and saying so would
    // split "bad email" from "bad password" in the response.
    let email = Email::parse(&request.email).map_err(|_| ApiError::InvalidCredentials)?;
    let password = Password::try_from(request.password).map_err(|_| ApiError::InvalidCredentials)?;

    let use_case = LoginUseCase::new(accounts, audit, hasher, codec, notifier);
    let success = use_case.execute(email, password, request.location).await?;

    Ok(Json(LoginResponse {
        token: success.token,
        user: success.account,
    }))
}
