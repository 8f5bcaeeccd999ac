use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use gigboard_core::{
    AccountStore, JobStatus, JobStore, NewProposal, ProposalDetails, ProposalStatus,
};

use super::non_empty;
use crate::error::ApiError;
use crate::extract::{CurrentAccount, SessionGate};

#[derive(Deserialize)]
pub struct SubmitProposalRequest {
    pub cover_letter: String,
    pub bid_amount: f64,
}

#[tracing::instrument(name = "Submit proposal", skip_all, fields(job_id = %job_id))]
pub async fn submit_proposal<J, S>(
    State((_, jobs, _)): State<(SessionGate, J, S)>,
    current: CurrentAccount,
    Path(job_id): Path<Uuid>,
    Json(request): Json<SubmitProposalRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    J: JobStore + Clone + 'static,
    S: AccountStore + Clone + 'static,
{
    current.require_freelancer()?;

    jobs.find_job(job_id)
        .await?
        .ok_or(ApiError::NotFound("Job not found"))?;

    let proposal_id = jobs
        .insert_proposal(NewProposal {
            job_id,
            freelancer_id: current.id(),
            cover_letter: non_empty(request.cover_letter, "Cover letter")?,
            bid_amount: request.bid_amount,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Proposal submitted successfully",
            "proposalId": proposal_id,
        })),
    ))
}

/// Proposals for a job, visible to the job's owner or an admin. Each row
/// carries the submitting freelancer's public profile.
#[tracing::instrument(name = "List proposals", skip_all, fields(job_id = %job_id))]
pub async fn list_proposals<J, S>(
    State((_, jobs, accounts)): State<(SessionGate, J, S)>,
    current: CurrentAccount,
    Path(job_id): Path<Uuid>,
) -> Result<Json<Vec<ProposalDetails>>, ApiError>
where
    J: JobStore + Clone + 'static,
    S: AccountStore + Clone + 'static,
{
    let job = jobs
        .find_job(job_id)
        .await?
        .ok_or(ApiError::NotFound("Job not found"))?;
    current.require_owner_or_admin(job.client_id)?;

    let proposals = jobs.proposals_for_job(job_id).await?;
    let mut details = Vec::with_capacity(proposals.len());
    for proposal in proposals {
        // Inner-join semantics: a proposal whose freelancer no longer
        // exists is dropped rather than failing the whole listing.
        let Some(freelancer) = accounts.find_by_id(proposal.freelancer_id).await? else {
            continue;
        };
        details.push(ProposalDetails {
            id: proposal.id,
            job_id: proposal.job_id,
            freelancer_id: proposal.freelancer_id,
            cover_letter: proposal.cover_letter,
            bid_amount: proposal.bid_amount,
            status: proposal.status,
            created_at: proposal.created_at,
            first_name: freelancer.first_name,
            last_name: freelancer.last_name,
            email: freelancer.email,
            bio: freelancer.bio,
            skills: freelancer.skills,
            hourly_rate: freelancer.hourly_rate,
        });
    }

    Ok(Json(details))
}

#[derive(Deserialize)]
pub struct UpdateProposalStatusRequest {
    pub status: String,
}

/// Accepting or rejecting a bid. Accepting also moves the job to
/// `in_progress`; a proposal can never go back to pending through the API.
#[tracing::instrument(name = "Update proposal status", skip_all, fields(proposal_id = %id))]
pub async fn update_proposal_status<J>(
    State((_, jobs)): State<(SessionGate, J)>,
    current: CurrentAccount,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateProposalStatusRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    J: JobStore + Clone + 'static,
{
    let status = request.status.parse::<ProposalStatus>()?;
    if status == ProposalStatus::Pending {
        return Err(ApiError::InvalidStatus);
    }

    let proposal = jobs
        .find_proposal(id)
        .await?
        .ok_or(ApiError::NotFound("Proposal not found"))?;
    let job = jobs
        .find_job(proposal.job_id)
        .await?
        .ok_or(ApiError::NotFound("Job not found"))?;
    current.require_owner_or_admin(job.client_id)?;

    jobs.set_proposal_status(id, status).await?;
    if status == ProposalStatus::Accepted {
        jobs.set_job_status(proposal.job_id, JobStatus::InProgress)
            .await?;
    }

    Ok(Json(json!({ "message": "Proposal status updated successfully" })))
}
