//! Map-backed store implementations. They keep the same contracts as the
//! Postgres stores and back local development and the black-box API tests,
//! where spinning up a database would be all cost and no coverage.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use secrecy::Secret;
use tokio::sync::RwLock;
use uuid::Uuid;

use gigboard_core::{
    Account, AccountStore, AccountStoreError, AuditLog, AuditLogError, Email, Job, JobStatus,
    JobStore, JobStoreError, JobUpdate, LoginAttempt, NewAccount, NewJob, NewProposal,
    ProfileUpdate, Proposal, ProposalStatus,
};

#[derive(Clone, Default)]
pub struct InMemoryAccountStore {
    accounts: Arc<DashMap<Email, Account>>,
}

impl InMemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Direct write access for test setup.
    pub fn upsert(&self, account: Account) {
        self.accounts.insert(account.email.clone(), account);
    }

    pub fn get(&self, email: &Email) -> Option<Account> {
        self.accounts.get(email).map(|entry| entry.value().clone())
    }
}

#[async_trait]
impl AccountStore for InMemoryAccountStore {
    async fn insert_account(&self, account: NewAccount) -> Result<Uuid, AccountStoreError> {
        // The entry API decides occupancy and inserts under one lock, which
        // is what makes concurrent duplicate registrations safe here.
        match self.accounts.entry(account.email.clone()) {
            Entry::Occupied(_) => Err(AccountStoreError::DuplicateEmail),
            Entry::Vacant(vacant) => {
                let id = Uuid::new_v4();
                vacant.insert(Account {
                    id,
                    first_name: account.first_name,
                    last_name: account.last_name,
                    email: account.email,
                    password_hash: account.password_hash,
                    kind: account.kind,
                    bio: None,
                    skills: None,
                    hourly_rate: None,
                    avatar_url: None,
                    is_verified: false,
                    verification_token: Some(account.verification_token),
                    reset_token_hash: None,
                    reset_token_expires_at: None,
                    created_at: Utc::now(),
                });
                Ok(id)
            }
        }
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<Account>, AccountStoreError> {
        Ok(self.get(email))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, AccountStoreError> {
        Ok(self
            .accounts
            .iter()
            .find(|entry| entry.value().id == id)
            .map(|entry| entry.value().clone()))
    }

    async fn consume_verification_token(
        &self,
        email: &Email,
        token: &str,
    ) -> Result<bool, AccountStoreError> {
        if let Some(mut entry) = self.accounts.get_mut(email) {
            let account = entry.value_mut();
            if account.verification_token.as_deref() == Some(token) {
                account.is_verified = true;
                account.verification_token = None;
                return Ok(true);
            }
        }
        Ok(false)
    }

    async fn replace_verification_token(
        &self,
        email: &Email,
        token: &str,
    ) -> Result<bool, AccountStoreError> {
        if let Some(mut entry) = self.accounts.get_mut(email) {
            let account = entry.value_mut();
            if !account.is_verified {
                account.verification_token = Some(token.to_string());
                return Ok(true);
            }
        }
        Ok(false)
    }

    async fn store_reset_token(
        &self,
        email: &Email,
        token_hash: Secret<String>,
        expires_at: DateTime<Utc>,
    ) -> Result<(), AccountStoreError> {
        let mut entry = self
            .accounts
            .get_mut(email)
            .ok_or(AccountStoreError::NotFound)?;
        let account = entry.value_mut();
        account.reset_token_hash = Some(token_hash);
        account.reset_token_expires_at = Some(expires_at);
        Ok(())
    }

    async fn accounts_with_pending_reset(
        &self,
        now: DateTime<Utc>,
    ) -> Result<Vec<Account>, AccountStoreError> {
        Ok(self
            .accounts
            .iter()
            .filter(|entry| {
                let account = entry.value();
                account.reset_token_hash.is_some()
                    && account.reset_token_expires_at.is_some_and(|at| at > now)
            })
            .map(|entry| entry.value().clone())
            .collect())
    }

    async fn complete_password_reset(
        &self,
        id: Uuid,
        new_password_hash: Secret<String>,
    ) -> Result<(), AccountStoreError> {
        let mut entry = self
            .accounts
            .iter_mut()
            .find(|entry| entry.value().id == id)
            .ok_or(AccountStoreError::NotFound)?;
        let account = entry.value_mut();
        account.password_hash = new_password_hash;
        account.reset_token_hash = None;
        account.reset_token_expires_at = None;
        Ok(())
    }

    async fn update_profile(
        &self,
        id: Uuid,
        update: ProfileUpdate,
    ) -> Result<(), AccountStoreError> {
        let mut entry = self
            .accounts
            .iter_mut()
            .find(|entry| entry.value().id == id)
            .ok_or(AccountStoreError::NotFound)?;
        let account = entry.value_mut();
        account.first_name = update.first_name;
        account.last_name = update.last_name;
        account.bio = update.bio;
        account.skills = update.skills;
        account.hourly_rate = update.hourly_rate;
        account.avatar_url = update.avatar_url;
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct InMemoryJobStore {
    jobs: Arc<DashMap<Uuid, Job>>,
    proposals: Arc<DashMap<Uuid, Proposal>>,
}

impl InMemoryJobStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl JobStore for InMemoryJobStore {
    async fn insert_job(&self, job: NewJob) -> Result<Uuid, JobStoreError> {
        let id = Uuid::new_v4();
        self.jobs.insert(
            id,
            Job {
                id,
                client_id: job.client_id,
                title: job.title,
                description: job.description,
                budget: job.budget,
                skills: job.skills,
                duration: job.duration,
                status: JobStatus::Open,
                created_at: Utc::now(),
            },
        );
        Ok(id)
    }

    async fn list_jobs(&self) -> Result<Vec<Job>, JobStoreError> {
        let mut jobs: Vec<Job> = self
            .jobs
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        jobs.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(jobs)
    }

    async fn find_job(&self, id: Uuid) -> Result<Option<Job>, JobStoreError> {
        Ok(self.jobs.get(&id).map(|entry| entry.value().clone()))
    }

    async fn update_job(&self, id: Uuid, update: JobUpdate) -> Result<(), JobStoreError> {
        let mut entry = self.jobs.get_mut(&id).ok_or(JobStoreError::JobNotFound)?;
        let job = entry.value_mut();
        job.title = update.title;
        job.description = update.description;
        job.budget = update.budget;
        job.skills = update.skills;
        job.duration = update.duration;
        job.status = update.status;
        Ok(())
    }

    async fn set_job_status(&self, id: Uuid, status: JobStatus) -> Result<(), JobStoreError> {
        let mut entry = self.jobs.get_mut(&id).ok_or(JobStoreError::JobNotFound)?;
        entry.value_mut().status = status;
        Ok(())
    }

    async fn delete_job(&self, id: Uuid) -> Result<(), JobStoreError> {
        self.jobs.remove(&id).ok_or(JobStoreError::JobNotFound)?;
        self.proposals.retain(|_, proposal| proposal.job_id != id);
        Ok(())
    }

    async fn insert_proposal(&self, proposal: NewProposal) -> Result<Uuid, JobStoreError> {
        if !self.jobs.contains_key(&proposal.job_id) {
            return Err(JobStoreError::JobNotFound);
        }
        // Scan-then-insert is racy in principle; the Postgres store's unique
        // index is the real guarantee, this backend only mirrors the
        // contract for tests and local runs.
        let duplicate = self.proposals.iter().any(|entry| {
            entry.value().job_id == proposal.job_id
                && entry.value().freelancer_id == proposal.freelancer_id
        });
        if duplicate {
            return Err(JobStoreError::DuplicateProposal);
        }

        let id = Uuid::new_v4();
        self.proposals.insert(
            id,
            Proposal {
                id,
                job_id: proposal.job_id,
                freelancer_id: proposal.freelancer_id,
                cover_letter: proposal.cover_letter,
                bid_amount: proposal.bid_amount,
                status: ProposalStatus::Pending,
                created_at: Utc::now(),
            },
        );
        Ok(id)
    }

    async fn proposals_for_job(&self, job_id: Uuid) -> Result<Vec<Proposal>, JobStoreError> {
        let mut proposals: Vec<Proposal> = self
            .proposals
            .iter()
            .filter(|entry| entry.value().job_id == job_id)
            .map(|entry| entry.value().clone())
            .collect();
        proposals.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(proposals)
    }

    async fn find_proposal(&self, id: Uuid) -> Result<Option<Proposal>, JobStoreError> {
        Ok(self.proposals.get(&id).map(|entry| entry.value().clone()))
    }

    async fn set_proposal_status(
        &self,
        id: Uuid,
        status: ProposalStatus,
    ) -> Result<(), JobStoreError> {
        let mut entry = self
            .proposals
            .get_mut(&id)
            .ok_or(JobStoreError::ProposalNotFound)?;
        entry.value_mut().status = status;
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct InMemoryAuditLog {
    attempts: Arc<RwLock<Vec<LoginAttempt>>>,
}

impl InMemoryAuditLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn attempts(&self) -> Vec<LoginAttempt> {
        self.attempts.read().await.clone()
    }
}

#[async_trait]
impl AuditLog for InMemoryAuditLog {
    async fn record_login_attempt(&self, attempt: LoginAttempt) -> Result<(), AuditLogError> {
        self.attempts.write().await.push(attempt);
        Ok(())
    }
}
