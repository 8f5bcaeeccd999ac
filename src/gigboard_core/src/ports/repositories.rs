use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use secrecy::Secret;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::{
    account::{Account, NewAccount, ProfileUpdate},
    audit::LoginAttempt,
    email::Email,
    job::{Job, JobStatus, JobUpdate, NewJob, NewProposal, Proposal, ProposalStatus},
};

// AccountStore port trait and errors
#[derive(Debug, Error)]
pub enum AccountStoreError {
    #[error("User already exists")]
    DuplicateEmail,
    #[error("Account not found")]
    NotFound,
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl PartialEq for AccountStoreError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::DuplicateEmail, Self::DuplicateEmail) => true,
            (Self::NotFound, Self::NotFound) => true,
            (Self::Unexpected(_), Self::Unexpected(_)) => true,
            _ => false,
        }
    }
}

#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Inserts the account and returns its id. Fails with
    /// [`AccountStoreError::DuplicateEmail`] when the email is already taken,
    /// even under concurrent inserts of the same address.
    async fn insert_account(&self, account: NewAccount) -> Result<Uuid, AccountStoreError>;

    async fn find_by_email(&self, email: &Email) -> Result<Option<Account>, AccountStoreError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, AccountStoreError>;

    /// Marks the account verified and clears the stored token, but only if
    /// `token` matches the one on file. Returns whether a row changed, so a
    /// replayed or superseded token comes back `false`.
    async fn consume_verification_token(
        &self,
        email: &Email,
        token: &str,
    ) -> Result<bool, AccountStoreError>;

    /// Swaps in a fresh verification token for an unverified account.
    /// Returns `false` when no account matches or it is already verified.
    async fn replace_verification_token(
        &self,
        email: &Email,
        token: &str,
    ) -> Result<bool, AccountStoreError>;

    async fn store_reset_token(
        &self,
        email: &Email,
        token_hash: Secret<String>,
        expires_at: DateTime<Utc>,
    ) -> Result<(), AccountStoreError>;

    /// All accounts holding an unexpired reset token as of `now`. The raw
    /// token is never stored, so redeeming one means verifying it against
    /// each candidate's hash.
    async fn accounts_with_pending_reset(
        &self,
        now: DateTime<Utc>,
    ) -> Result<Vec<Account>, AccountStoreError>;

    /// Replaces the password hash and clears the reset token in one step.
    async fn complete_password_reset(
        &self,
        id: Uuid,
        new_password_hash: Secret<String>,
    ) -> Result<(), AccountStoreError>;

    async fn update_profile(
        &self,
        id: Uuid,
        update: ProfileUpdate,
    ) -> Result<(), AccountStoreError>;
}

/// Shared handles satisfy the port, so a store can travel as
/// `Arc<dyn AccountStore>` where a concrete type is not available.
#[async_trait]
impl<T> AccountStore for Arc<T>
where
    T: AccountStore + ?Sized,
{
    async fn insert_account(&self, account: NewAccount) -> Result<Uuid, AccountStoreError> {
        (**self).insert_account(account).await
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<Account>, AccountStoreError> {
        (**self).find_by_email(email).await
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, AccountStoreError> {
        (**self).find_by_id(id).await
    }

    async fn consume_verification_token(
        &self,
        email: &Email,
        token: &str,
    ) -> Result<bool, AccountStoreError> {
        (**self).consume_verification_token(email, token).await
    }

    async fn replace_verification_token(
        &self,
        email: &Email,
        token: &str,
    ) -> Result<bool, AccountStoreError> {
        (**self).replace_verification_token(email, token).await
    }

    async fn store_reset_token(
        &self,
        email: &Email,
        token_hash: Secret<String>,
        expires_at: DateTime<Utc>,
    ) -> Result<(), AccountStoreError> {
        (**self).store_reset_token(email, token_hash, expires_at).await
    }

    async fn accounts_with_pending_reset(
        &self,
        now: DateTime<Utc>,
    ) -> Result<Vec<Account>, AccountStoreError> {
        (**self).accounts_with_pending_reset(now).await
    }

    async fn complete_password_reset(
        &self,
        id: Uuid,
        new_password_hash: Secret<String>,
    ) -> Result<(), AccountStoreError> {
        (**self).complete_password_reset(id, new_password_hash).await
    }

    async fn update_profile(
        &self,
        id: Uuid,
        update: ProfileUpdate,
    ) -> Result<(), AccountStoreError> {
        (**self).update_profile(id, update).await
    }
}

// JobStore port trait and errors
#[derive(Debug, Error)]
pub enum JobStoreError {
    #[error("Job not found")]
    JobNotFound,
    #[error("Proposal not found")]
    ProposalNotFound,
    #[error("You have already submitted a proposal for this job")]
    DuplicateProposal,
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl PartialEq for JobStoreError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::JobNotFound, Self::JobNotFound) => true,
            (Self::ProposalNotFound, Self::ProposalNotFound) => true,
            (Self::DuplicateProposal, Self::DuplicateProposal) => true,
            (Self::Unexpected(_), Self::Unexpected(_)) => true,
            _ => false,
        }
    }
}

#[async_trait]
pub trait JobStore: Send + Sync {
    async fn insert_job(&self, job: NewJob) -> Result<Uuid, JobStoreError>;

    /// All jobs, newest first.
    async fn list_jobs(&self) -> Result<Vec<Job>, JobStoreError>;

    async fn find_job(&self, id: Uuid) -> Result<Option<Job>, JobStoreError>;

    async fn update_job(&self, id: Uuid, update: JobUpdate) -> Result<(), JobStoreError>;

    async fn set_job_status(&self, id: Uuid, status: JobStatus) -> Result<(), JobStoreError>;

    /// Deletes the job and any proposals attached to it.
    async fn delete_job(&self, id: Uuid) -> Result<(), JobStoreError>;

    /// One proposal per freelancer per job;  a second submission fails with
    /// [`JobStoreError::DuplicateProposal`].
    async fn insert_proposal(&self, proposal: NewProposal) -> Result<Uuid, JobStoreError>;

    /// Proposals for a job, newest first.
    async fn proposals_for_job(&self, job_id: Uuid) -> Result<Vec<Proposal>, JobStoreError>;

    async fn find_proposal(&self, id: Uuid) -> Result<Option<Proposal>, JobStoreError>;

    async fn set_proposal_status(
        &self,
        id: Uuid,
        status: ProposalStatus,
    ) -> Result<(), JobStoreError>;
}

// AuditLog port trait and errors
#[derive(Debug, Error)]
pub enum AuditLogError {
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

#[async_trait]
pub trait AuditLog: Send + Sync {
    async fn record_login_attempt(&self, attempt: LoginAttempt) -> Result<(), AuditLogError>;
}
