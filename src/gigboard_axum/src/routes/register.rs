use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use secrecy::Secret;
use serde::Deserialize;
use serde_json::json;

use gigboard_application::{NotificationSender, RegisterUseCase};
use gigboard_core::{
    AccountKind, AccountStore, Email, EmailClient, Password, PasswordHasher, TokenCodec,
};

use super::non_empty;
use crate::error::ApiError;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: Secret<String>,
    pub account_type: String,
}

#[tracing::instrument(name = "Register", skip_all)]
pub async fn register<S, H, C, E>(
    State((accounts, hasher, codec, notifier)): State<(S, H, C, NotificationSender<E>)>,
    Json(request): Json<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    S: AccountStore + Clone + 'static,
    H: PasswordHasher + Clone + 'static,
    C: TokenCodec + Clone + 'static,
    E: EmailClient + Clone + 'static,
{
    let first_name = non_empty(request.first_name, "First name")?;
    let last_name = non_empty(request.last_name, "Last name")?;
    let email = Email::parse(&request.email)?;
    let password = Password::try_from(request.password)?;
    let kind = request.account_type.parse::<AccountKind>()?;
    if kind == AccountKind::Admin {
        // Admin accounts are provisioned out of band, never self-registered.
        return Err(ApiError::InvalidInput(
            "Account type must be client or freelancer".to_string(),
        ));
    }

    let use_case = RegisterUseCase::new(accounts, hasher, codec, notifier);
    let account_id = use_case
        .execute(first_name, last_name, email, password, kind)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "User registered successfully",
            "userId": account_id,
        })),
    ))
}
