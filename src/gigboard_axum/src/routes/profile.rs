use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use gigboard_core::{AccountStore, AccountSummary, ProfileUpdate};

use super::non_empty;
use crate::error::ApiError;
use crate::extract::{CurrentAccount, SessionGate};

/// Public profile lookup; no session required.
#[tracing::instrument(name = "Get profile", skip_all, fields(account_id = %id))]
pub async fn get_profile<S>(
    State(accounts): State<S>,
    Path(id): Path<Uuid>,
) -> Result<Json<AccountSummary>, ApiError>
where
    S: AccountStore + Clone + 'static,
{
    let account = accounts
        .find_by_id(id)
        .await?
        .ok_or(ApiError::NotFound("User not found"))?;

    Ok(Json(AccountSummary::from(&account)))
}

#[derive(Deserialize)]
pub struct UpdateProfileRequest {
    pub first_name: String,
    pub last_name: String,
    pub bio: Option<String>,
    pub skills: Option<String>,
    pub hourly_rate: Option<f64>,
    pub avatar_url: Option<String>,
}

/// Updates the caller's own profile. The target account comes from the
/// session, never from the body.
#[tracing::instrument(name = "Update profile", skip_all)]
pub async fn update_profile<S>(
    State((_, accounts)): State<(SessionGate, S)>,
    current: CurrentAccount,
    Json(request): Json<UpdateProfileRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    S: AccountStore + Clone + 'static,
{
    let update = ProfileUpdate {
        first_name: non_empty(request.first_name, "First name")?,
        last_name: non_empty(request.last_name, "Last name")?,
        bio: request.bio,
        skills: request.skills,
        hourly_rate: request.hourly_rate,
        avatar_url: request.avatar_url,
    };

    accounts.update_profile(current.id(), update).await?;

    Ok(Json(json!({ "message": "Profile updated successfully" })))
}
