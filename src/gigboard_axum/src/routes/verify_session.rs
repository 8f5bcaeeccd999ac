use axum::Json;

use gigboard_core::AccountSummary;

use crate::extract::CurrentAccount;

/// Session check for the frontend. All the work happens in the
/// [`CurrentAccount`] extractor; reaching the body means the token was
/// valid and the account still exists.
#[tracing::instrument(name = "Verify session", skip_all)]
pub async fn verify_session(current: CurrentAccount) -> Json<AccountSummary> {
    Json(current.into_account())
}
