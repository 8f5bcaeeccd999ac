use axum::{Json, extract::State, response::IntoResponse};
use serde::Deserialize;
use serde_json::json;

use gigboard_application::{NotificationSender, ResendVerificationUseCase};
use gigboard_core::{AccountStore, Email, EmailClient, TokenCodec};

use crate::error::ApiError;

#[derive(Deserialize)]
pub struct ResendVerificationRequest {
    pub email: String,
}

#[tracing::instrument(name = "Resend verification", skip_all)]
pub async fn resend_verification<S, C, E>(
    State((accounts, codec, notifier)): State<(S, C, NotificationSender<E>)>,
    Json(request): Json<ResendVerificationRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    S: AccountStore + Clone + 'static,
    C: TokenCodec + Clone + 'static,
    E: EmailClient + Clone + 'static,
{
    // An unparseable address matches no account; same merged answer as any
    // other miss.
    let email = Email::parse(&request.email).map_err(|_| ApiError::NotEligibleForVerification)?;

    let use_case = ResendVerificationUseCase::new(accounts, codec, notifier);
    use_case.execute(email).await?;

    Ok(Json(json!({ "message": "Verification email sent" })))
}
