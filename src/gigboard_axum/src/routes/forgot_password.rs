use axum::{Json, extract::State, response::IntoResponse};
use serde::Deserialize;
use serde_json::json;

use gigboard_application::{NotificationSender, RequestPasswordResetUseCase};
use gigboard_core::{AccountStore, Email, EmailClient, PasswordHasher};

/// The one answer this endpoint ever gives. Neither content nor status may
/// vary with whether the address is registered.
pub const FORGOT_PASSWORD_REPLY: &str =
    "If an account with that email exists, a password reset link has been sent";

#[derive(Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

#[tracing::instrument(name = "Forgot password", skip_all)]
pub async fn forgot_password<S, H, E>(
    State((accounts, hasher, notifier)): State<(S, H, NotificationSender<E>)>,
    Json(request): Json<ForgotPasswordRequest>,
) -> impl IntoResponse
where
    S: AccountStore + Clone + 'static,
    H: PasswordHasher + Clone + 'static,
    E: EmailClient + Clone + 'static,
{
    if let Ok(email) = Email::parse(&request.email) {
        // Issuance runs on a detached task; execute returns before any
        // store lookup happens, so timing stays flat across inputs.
        RequestPasswordResetUseCase::new(accounts, hasher, notifier)
            .execute(email)
            .await;
    }

    Json(json!({ "message": FORGOT_PASSWORD_REPLY }))
}
