use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use gigboard_core::{Job, JobStatus, JobStore, JobUpdate, NewJob};

use super::non_empty;
use crate::error::ApiError;
use crate::extract::{CurrentAccount, SessionGate};

/// Browsing jobs is public. The handler shares the protected group's state
/// tuple because it shares paths with the mutating routes; it never touches
/// the gate.
#[tracing::instrument(name = "List jobs", skip_all)]
pub async fn list_jobs<J>(
    State((_, jobs)): State<(SessionGate, J)>,
) -> Result<Json<Vec<Job>>, ApiError>
where
    J: JobStore + Clone + 'static,
{
    Ok(Json(jobs.list_jobs().await?))
}

#[tracing::instrument(name = "Get job", skip_all, fields(job_id = %id))]
pub async fn get_job<J>(
    State((_, jobs)): State<(SessionGate, J)>,
    Path(id): Path<Uuid>,
) -> Result<Json<Job>, ApiError>
where
    J: JobStore + Clone + 'static,
{
    let job = jobs
        .find_job(id)
        .await?
        .ok_or(ApiError::NotFound("Job not found"))?;

    Ok(Json(job))
}

#[derive(Deserialize)]
pub struct CreateJobRequest {
    pub title: String,
    pub description: String,
    pub budget: f64,
    pub skills: Option<String>,
    pub duration: Option<String>,
}

#[tracing::instrument(name = "Create job", skip_all)]
pub async fn create_job<J>(
    State((_, jobs)): State<(SessionGate, J)>,
    current: CurrentAccount,
    Json(request): Json<CreateJobRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    J: JobStore + Clone + 'static,
{
    current.require_client_or_admin()?;

    let job_id = jobs
        .insert_job(NewJob {
            client_id: current.id(),
            title: non_empty(request.title, "Title")?,
            description: non_empty(request.description, "Description")?,
            budget: request.budget,
            skills: request.skills,
            duration: request.duration,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Job created successfully",
            "jobId": job_id,
        })),
    ))
}

#[derive(Deserialize)]
pub struct UpdateJobRequest {
    pub title: String,
    pub description: String,
    pub budget: f64,
    pub skills: Option<String>,
    pub duration: Option<String>,
    pub status: String,
}

#[tracing::instrument(name = "Update job", skip_all, fields(job_id = %id))]
pub async fn update_job<J>(
    State((_, jobs)): State<(SessionGate, J)>,
    current: CurrentAccount,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateJobRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    J: JobStore + Clone + 'static,
{
    let job = jobs
        .find_job(id)
        .await?
        .ok_or(ApiError::NotFound("Job not found"))?;
    current.require_owner_or_admin(job.client_id)?;

    let update = JobUpdate {
        title: non_empty(request.title, "Title")?,
        description: non_empty(request.description, "Description")?,
        budget: request.budget,
        skills: request.skills,
        duration: request.duration,
        status: request.status.parse::<JobStatus>()?,
    };
    jobs.update_job(id, update).await?;

    Ok(Json(json!({ "message": "Job updated successfully" })))
}

#[derive(Deserialize)]
pub struct UpdateJobStatusRequest {
    pub status: String,
}

#[tracing::instrument(name = "Update job status", skip_all, fields(job_id = %id))]
pub async fn update_job_status<J>(
    State((_, jobs)): State<(SessionGate, J)>,
    current: CurrentAccount,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateJobStatusRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    J: JobStore + Clone + 'static,
{
    let job = jobs
        .find_job(id)
        .await?
        .ok_or(ApiError::NotFound("Job not found"))?;
    current.require_owner_or_admin(job.client_id)?;

    let status = request.status.parse::<JobStatus>()?;
    jobs.set_job_status(id, status).await?;

    Ok(Json(json!({ "message": "Job status updated successfully" })))
}

#[tracing::instrument(name = "Delete job", skip_all, fields(job_id = %id))]
pub async fn delete_job<J>(
    State((_, jobs)): State<(SessionGate, J)>,
    current: CurrentAccount,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError>
where
    J: JobStore + Clone + 'static,
{
    let job = jobs
        .find_job(id)
        .await?
        .ok_or(ApiError::NotFound("Job not found"))?;
    current.require_owner_or_admin(job.client_id)?;

    jobs.delete_job(id).await?;

    Ok(Json(json!({ "message": "Job deleted successfully" })))
}
