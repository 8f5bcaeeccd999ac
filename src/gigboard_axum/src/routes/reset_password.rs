use axum::{Json, extract::State, response::IntoResponse};
use secrecy::Secret;
use serde::Deserialize;
use serde_json::json;

use gigboard_application::{NotificationSender, ResetPasswordUseCase};
use gigboard_core::{AccountStore, EmailClient, Password, PasswordHasher};

use crate::error::ApiError;

#[derive(Deserialize)]
pub struct ResetPasswordRequest {
    pub token: Secret<String>,
    pub password: Secret<String>,
}

#[tracing::instrument(name = "Reset password", skip_all)]
pub async fn reset_password<S, H, E>(
    State((accounts, hasher, notifier)): State<(S, H, NotificationSender<E>)>,
    Json(request): Json<ResetPasswordRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    S: AccountStore + Clone + 'static,
    H: PasswordHasher + Clone + 'static,
    E: EmailClient + Clone + 'static,
{
    let password = Password::try_from(request.password)?;

    let use_case = ResetPasswordUseCase::new(accounts, hasher, notifier);
    use_case.execute(request.token, password).await?;

    Ok(Json(json!({ "message": "Password reset successful" })))
}
