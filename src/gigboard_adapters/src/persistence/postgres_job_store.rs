use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use gigboard_core::{
    Job, JobStatus, JobStore, JobStoreError, JobUpdate, NewJob, NewProposal, Proposal,
    ProposalStatus,
};

#[derive(Clone)]
pub struct PostgresJobStore {
    pool: PgPool,
}

impl PostgresJobStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct JobRow {
    id: Uuid,
    client_id: Uuid,
    title: String,
    description: String,
    budget: f64,
    skills: Option<String>,
    duration: Option<String>,
    status: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<JobRow> for Job {
    type Error = String;

    fn try_from(row: JobRow) -> Result<Self, Self::Error> {
        let status = row.status.parse::<JobStatus>().map_err(|e| e.to_string())?;
        Ok(Job {
            id: row.id,
            client_id: row.client_id,
            title: row.title,
            description: row.description,
            budget: row.budget,
            skills: row.skills,
            duration: row.duration,
            status,
            created_at: row.created_at,
        })
    }
}

#[derive(FromRow)]
struct ProposalRow {
    id: Uuid,
    job_id: Uuid,
    freelancer_id: Uuid,
    cover_letter: String,
    bid_amount: f64,
    status: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<ProposalRow> for Proposal {
    type Error = String;

    fn try_from(row: ProposalRow) -> Result<Self, Self::Error> {
        let status = row
            .status
            .parse::<ProposalStatus>()
            .map_err(|e| e.to_string())?;
        Ok(Proposal {
            id: row.id,
            job_id: row.job_id,
            freelancer_id: row.freelancer_id,
            cover_letter: row.cover_letter,
            bid_amount: row.bid_amount,
            status,
            created_at: row.created_at,
        })
    }
}

const SELECT_JOB: &str = r#"
    SELECT id, client_id, title, description, budget, skills, duration,
           status, created_at
    FROM jobs
"#;

const SELECT_PROPOSAL: &str = r#"
    SELECT id, job_id, freelancer_id, cover_letter, bid_amount, status,
           created_at
    FROM proposals
"#;

fn unexpected(e: sqlx::Error) -> JobStoreError {
    JobStoreError::Unexpected(e.to_string())
}

#[async_trait]
impl JobStore for PostgresJobStore {
    #[tracing::instrument(name = "Inserting job into PostgreSQL", skip_all)]
    async fn insert_job(&self, job: NewJob) -> Result<Uuid, JobStoreError> {
        let id = Uuid::new_v4();
        sqlx::query(
            r#"
                INSERT INTO jobs
                    (id, client_id, title, description, budget, skills, duration)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(id)
        .bind(job.client_id)
        .bind(&job.title)
        .bind(&job.description)
        .bind(job.budget)
        .bind(&job.skills)
        .bind(&job.duration)
        .execute(&self.pool)
        .await
        .map_err(unexpected)?;

        Ok(id)
    }

    #[tracing::instrument(name = "Listing jobs from PostgreSQL", skip_all)]
    async fn list_jobs(&self) -> Result<Vec<Job>, JobStoreError> {
        let rows = sqlx::query_as::<_, JobRow>(&format!("{SELECT_JOB} ORDER BY created_at DESC"))
            .fetch_all(&self.pool)
            .await
            .map_err(unexpected)?;

        rows.into_iter()
            .map(|row| Job::try_from(row).map_err(JobStoreError::Unexpected))
            .collect()
    }

    #[tracing::instrument(name = "Fetching job from PostgreSQL", skip_all)]
    async fn find_job(&self, id: Uuid) -> Result<Option<Job>, JobStoreError> {
        let row = sqlx::query_as::<_, JobRow>(&format!("{SELECT_JOB} WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(unexpected)?;

        row.map(Job::try_from)
            .transpose()
            .map_err(JobStoreError::Unexpected)
    }

    #[tracing::instrument(name = "Updating job in PostgreSQL", skip_all)]
    async fn update_job(&self, id: Uuid, update: JobUpdate) -> Result<(), JobStoreError> {
        let result = sqlx::query(
            r#"
                UPDATE jobs
                SET title = $2, description = $3, budget = $4, skills = $5,
                    duration = $6, status = $7
                WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(&update.title)
        .bind(&update.description)
        .bind(update.budget)
        .bind(&update.skills)
        .bind(&update.duration)
        .bind(update.status.as_str())
        .execute(&self.pool)
        .await
        .map_err(unexpected)?;

        if result.rows_affected() == 0 {
            return Err(JobStoreError::JobNotFound);
        }
        Ok(())
    }

    #[tracing::instrument(name = "Setting job status in PostgreSQL", skip_all)]
    async fn set_job_status(&self, id: Uuid, status: JobStatus) -> Result<(), JobStoreError> {
        let result = sqlx::query("UPDATE jobs SET status = $2 WHERE id = $1")
            .bind(id)
            .bind(status.as_str())
            .execute(&self.pool)
            .await
            .map_err(unexpected)?;

        if result.rows_affected() == 0 {
            return Err(JobStoreError::JobNotFound);
        }
        Ok(())
    }

    #[tracing::instrument(name = "Deleting job from PostgreSQL", skip_all)]
    async fn delete_job(&self, id: Uuid) -> Result<(), JobStoreError> {
        let mut tx = self.pool.begin().await.map_err(unexpected)?;

        sqlx::query("DELETE FROM proposals WHERE job_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(unexpected)?;

        let result = sqlx::query("DELETE FROM jobs WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(unexpected)?;

        if result.rows_affected() == 0 {
            return Err(JobStoreError::JobNotFound);
        }

        tx.commit().await.map_err(unexpected)?;
        Ok(())
    }

    #[tracing::instrument(name = "Inserting proposal into PostgreSQL", skip_all)]
    async fn insert_proposal(&self, proposal: NewProposal) -> Result<Uuid, JobStoreError> {
        let id = Uuid::new_v4();
        sqlx::query(
            r#"
                INSERT INTO proposals
                    (id, job_id, freelancer_id, cover_letter, bid_amount)
                VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(id)
        .bind(proposal.job_id)
        .bind(proposal.freelancer_id)
        .bind(&proposal.cover_letter)
        .bind(proposal.bid_amount)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            let Some(db_err) = e.as_database_error() else {
                return unexpected(e);
            };
            if db_err.is_unique_violation() {
                JobStoreError::DuplicateProposal
            } else if db_err.is_foreign_key_violation() {
                JobStoreError::JobNotFound
            } else {
                unexpected(e)
            }
        })?;

        Ok(id)
    }

    #[tracing::instrument(name = "Listing proposals from PostgreSQL", skip_all)]
    async fn proposals_for_job(&self, job_id: Uuid) -> Result<Vec<Proposal>, JobStoreError> {
        let rows = sqlx::query_as::<_, ProposalRow>(&format!(
            "{SELECT_PROPOSAL} WHERE job_id = $1 ORDER BY created_at DESC"
        ))
        .bind(job_id)
        .fetch_all(&self.pool)
        .await
        .map_err(unexpected)?;

        rows.into_iter()
            .map(|row| Proposal::try_from(row).map_err(JobStoreError::Unexpected))
            .collect()
    }

    #[tracing::instrument(name = "Fetching proposal from PostgreSQL", skip_all)]
    async fn find_proposal(&self, id: Uuid) -> Result<Option<Proposal>, JobStoreError> {
        let row = sqlx::query_as::<_, ProposalRow>(&format!("{SELECT_PROPOSAL} WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(unexpected)?;

        row.map(Proposal::try_from)
            .transpose()
            .map_err(JobStoreError::Unexpected)
    }

    #[tracing::instrument(name = "Setting proposal status in PostgreSQL", skip_all)]
    async fn set_proposal_status(
        &self,
        id: Uuid,
        status: ProposalStatus,
    ) -> Result<(), JobStoreError> {
        let result = sqlx::query("UPDATE proposals SET status = $2 WHERE id = $1")
            .bind(id)
            .bind(status.as_str())
            .execute(&self.pool)
            .await
            .map_err(unexpected)?;

        if result.rows_affected() == 0 {
            return Err(JobStoreError::ProposalNotFound);
        }
        Ok(())
    }
}
